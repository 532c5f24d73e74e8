//! General watch face configuration

use embassy_time::Duration;
use embedded_graphics::{geometry::Size, pixelcolor::Rgb565};

/// Tunable constants of the watch face.
///
/// Build with `WatchFaceConfig::default()` and override single fields with
/// struct update syntax where a board or test needs something else.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WatchFaceConfig {
    /// Interval between redraws while interactive
    pub update_rate: Duration,
    /// How long an icon fetch may wait for the sync channel to connect
    pub connect_timeout: Duration,
    /// Data item path carrying the forecast
    pub weather_path: &'static str,
    /// Data map key of the high temperature
    pub high_key: &'static str,
    /// Data map key of the low temperature
    pub low_key: &'static str,
    /// Data map key of the icon asset
    pub icon_key: &'static str,
    /// Vertical shift applied to every text line on round screens
    pub round_offset: i32,
    /// Baseline of the time line
    pub time_y: i32,
    /// Baseline of the date line
    pub date_y: i32,
    /// Baseline of the temperature line
    pub temperature_y: i32,
    /// Interactive background fill
    pub background: Rgb565,
    /// Time and temperature text
    pub text_color: Rgb565,
    /// Date text
    pub date_color: Rgb565,
}

impl WatchFaceConfig {
    /// Weather icons are always scaled to this size.
    pub const ICON_SIZE: Size = Size::new(75, 75);
}

impl Default for WatchFaceConfig {
    fn default() -> Self {
        Self {
            update_rate: Duration::from_millis(1000),
            connect_timeout: Duration::from_millis(5000),
            weather_path: "/weather",
            high_key: "high",
            low_key: "low",
            icon_key: "icon",
            round_offset: 20,
            time_y: 60,
            date_y: 85,
            temperature_y: 200,
            // #03A9F4
            background: Rgb565::new(0, 42, 30),
            text_color: Rgb565::new(31, 63, 31),
            // #B3E5FC
            date_color: Rgb565::new(22, 57, 31),
        }
    }
}
