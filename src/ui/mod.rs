//! Watch face UI

use heapless::String;

pub mod icon;
pub mod style;
pub mod sunshine_watchface;

pub use icon::Icon;
pub use style::StyleConfig;
pub use sunshine_watchface::{FrameLayout, Label, SunshineWatchFace};

/// Temperature text exactly as the phone sent it
pub type Temperature = String<16>;

/// State for the watch face
#[derive(Debug, Clone, Default)]
pub struct DisplayState {
    /// Forecast high, empty until the phone syncs
    pub high: Temperature,
    /// Forecast low, empty until the phone syncs
    pub low: Temperature,
    /// Forecast icon, absent until the first fetch succeeds
    pub icon: Option<Icon>,
    /// Low-power always-on mode
    pub ambient: bool,
    /// Round screen, reported by the insets
    pub round: bool,
    /// Display has few colours in ambient mode
    pub low_bit_ambient: bool,
}

/// Replace `dst` with as much of `src` as fits.
pub(crate) fn set_text<const N: usize>(dst: &mut String<N>, src: &str) {
    dst.clear();
    for c in src.chars() {
        if dst.push(c).is_err() {
            break;
        }
    }
}
