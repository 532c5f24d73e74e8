//! Sunshine watchface: time, date, forecast temperatures and icon

use core::fmt::Write;

use chrono::{DateTime, FixedOffset};
use embedded_graphics::{
    draw_target::DrawTarget,
    geometry::{Point, Size},
    mono_font::MonoTextStyle,
    pixelcolor::Rgb565,
    prelude::{Primitive, RgbColor},
    primitives::{PrimitiveStyle, Rectangle},
    text::{renderer::TextRenderer, Baseline, Text},
    Drawable,
};
use heapless::String;

use super::{DisplayState, StyleConfig};
use crate::system::{
    config::WatchFaceConfig,
    time::{date_text, time_text},
};

/// Shown for a temperature the phone has not sent
const PLACEHOLDER: &str = "--";

/// Text anchored at its left baseline
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Label<const N: usize> {
    pub text: String<N>,
    pub position: Point,
}

impl<const N: usize> Label<N> {
    fn draw<D>(&self, target: &mut D, style: MonoTextStyle<'static, Rgb565>) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb565>,
    {
        Text::with_baseline(&self.text, self.position, style, Baseline::Alphabetic).draw(target)?;
        Ok(())
    }
}

/// Where everything goes in one frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameLayout {
    pub time: Label<8>,
    pub date: Label<24>,
    pub temperature: Label<40>,
    /// Top left corner of the icon, `None` when it is not drawn
    pub icon: Option<Point>,
}

/// Renders the display state; holds no mutable state of its own.
pub struct SunshineWatchFace {
    config: WatchFaceConfig,
}

impl SunshineWatchFace {
    pub fn new(config: WatchFaceConfig) -> Self {
        Self { config }
    }

    /// Compute text and positions without drawing anything
    pub fn layout(
        &self,
        bounds: Rectangle,
        style: &StyleConfig,
        state: &DisplayState,
        now: &DateTime<FixedOffset>,
    ) -> FrameLayout {
        let origin = bounds.top_left;
        let width = bounds.size.width as i32;
        let centered = |text_width: u32| origin.x + (width - text_width as i32) / 2;
        let offset = style.round_offset;

        // Seconds are left out in ambient mode
        let time = time_text(now, !state.ambient);
        let time_width = if state.ambient {
            style.time_width_ambient
        } else {
            style.time_width
        };
        let time = Label {
            text: time,
            position: Point::new(centered(time_width), origin.y + self.config.time_y + offset),
        };

        let date = date_text(now);
        let date_size = measure(style.date_style(), &date);
        let date = Label {
            position: Point::new(
                centered(date_size.width),
                origin.y + self.config.date_y + offset,
            ),
            text: date,
        };

        let temperature = temperature_text(&state.high, &state.low);
        let temperature_size = measure(style.temperature_style(), &temperature);
        let temperature_y = origin.y + self.config.temperature_y + offset;
        let temperature = Label {
            position: Point::new(centered(temperature_size.width), temperature_y),
            text: temperature,
        };

        let icon_size = WatchFaceConfig::ICON_SIZE;
        let icon = (!state.ambient && state.icon.is_some()).then(|| {
            Point::new(
                centered(icon_size.width),
                temperature_y - temperature_size.height as i32 - icon_size.height as i32,
            )
        });

        FrameLayout {
            time,
            date,
            temperature,
            icon,
        }
    }

    /// Paint one frame. Performs no I/O.
    pub fn render<D>(
        &self,
        target: &mut D,
        bounds: Rectangle,
        style: &StyleConfig,
        state: &DisplayState,
        now: &DateTime<FixedOffset>,
    ) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb565>,
    {
        let background = if state.ambient {
            Rgb565::BLACK
        } else {
            style.background
        };
        bounds
            .into_styled(PrimitiveStyle::with_fill(background))
            .draw(target)?;

        let layout = self.layout(bounds, style, state, now);
        layout.time.draw(target, style.time_style())?;
        layout.date.draw(target, style.date_style())?;
        layout.temperature.draw(target, style.temperature_style())?;

        if let (Some(top_left), Some(icon)) = (layout.icon, &state.icon) {
            icon.draw_at(target, top_left)?;
        }
        Ok(())
    }
}

/// `{high} | {low}` with missing values shown as `--`
pub fn temperature_text(high: &str, low: &str) -> String<40> {
    let mut text = String::new();
    let _ = write!(text, "{} | {}", or_placeholder(high), or_placeholder(low));
    text
}

fn or_placeholder(value: &str) -> &str {
    if value.is_empty() {
        PLACEHOLDER
    } else {
        value
    }
}

fn measure(style: MonoTextStyle<'static, Rgb565>, text: &str) -> Size {
    style
        .measure_string(text, Point::zero(), Baseline::Alphabetic)
        .bounding_box
        .size
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::{system::time::Calendar, ui::Icon};
    use embedded_graphics::geometry::{Dimensions, OriginDimensions};

    /// 240x240 RGB565 framebuffer
    pub(crate) struct Framebuffer {
        pub pixels: Vec<Rgb565>,
    }

    impl Framebuffer {
        pub fn new() -> Self {
            Self {
                pixels: vec![Rgb565::new(1, 2, 3); 240 * 240],
            }
        }

        pub fn at(&self, x: i32, y: i32) -> Rgb565 {
            self.pixels[(y * 240 + x) as usize]
        }
    }

    impl OriginDimensions for Framebuffer {
        fn size(&self) -> Size {
            Size::new(240, 240)
        }
    }

    impl DrawTarget for Framebuffer {
        type Color = Rgb565;
        type Error = core::convert::Infallible;

        fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
        where
            I: IntoIterator<Item = embedded_graphics::Pixel<Self::Color>>,
        {
            for embedded_graphics::Pixel(p, color) in pixels {
                if (0..240).contains(&p.x) && (0..240).contains(&p.y) {
                    self.pixels[(p.y * 240 + p.x) as usize] = color;
                }
            }
            Ok(())
        }
    }

    // 2026-10-16T09:05:07.250Z
    const NOW_MS: u64 = 1_792_141_507_250;

    fn now() -> DateTime<FixedOffset> {
        Calendar::default().local(NOW_MS)
    }

    fn bounds() -> Rectangle {
        Rectangle::new(Point::zero(), Size::new(240, 240))
    }

    fn face() -> SunshineWatchFace {
        SunshineWatchFace::new(WatchFaceConfig::default())
    }

    fn style_for(state: &DisplayState) -> StyleConfig {
        StyleConfig::new(
            &WatchFaceConfig::default(),
            state.round,
            state.ambient,
            state.low_bit_ambient,
        )
    }

    #[test]
    fn test_temperature_placeholders() {
        assert_eq!(temperature_text("", "-5").as_str(), "-- | -5");
        assert_eq!(temperature_text("72", "").as_str(), "72 | --");
        assert_eq!(temperature_text("", "").as_str(), "-- | --");
        assert_eq!(temperature_text("72", "58").as_str(), "72 | 58");
    }

    #[test]
    fn test_interactive_layout() {
        let state = DisplayState::default();
        let style = style_for(&state);
        let layout = face().layout(bounds(), &style, &state, &now());

        assert_eq!(layout.time.text.as_str(), "09:05:07");
        assert_eq!(layout.time.position.x, (240 - style.time_width as i32) / 2);
        assert_eq!(layout.time.position.y, 60);
        assert_eq!(layout.date.text.as_str(), "Fri - Oct 16, 2026");
        assert_eq!(layout.temperature.text.as_str(), "-- | --");
        assert_eq!(layout.icon, None);
    }

    #[test]
    fn test_ambient_layout_drops_seconds_and_icon() {
        let state = DisplayState {
            ambient: true,
            icon: Some(Icon::filled(Rgb565::RED)),
            ..Default::default()
        };
        let style = style_for(&state);
        let layout = face().layout(bounds(), &style, &state, &now());

        assert_eq!(layout.time.text.as_str(), "09:05");
        assert_eq!(
            layout.time.position.x,
            (240 - style.time_width_ambient as i32) / 2
        );
        assert_eq!(layout.icon, None);
    }

    #[test]
    fn test_round_offset_shifts_every_line() {
        let square = DisplayState::default();
        let round = DisplayState {
            round: true,
            ..Default::default()
        };
        let a = face().layout(bounds(), &style_for(&square), &square, &now());
        let b = face().layout(bounds(), &style_for(&round), &round, &now());

        assert_eq!(b.time.position.y - a.time.position.y, 20);
        assert_eq!(b.date.position.y - a.date.position.y, 20);
        assert_eq!(b.temperature.position.y - a.temperature.position.y, 20);
    }

    #[test]
    fn test_icon_sits_above_temperature() {
        let state = DisplayState {
            icon: Some(Icon::filled(Rgb565::RED)),
            ..Default::default()
        };
        let style = style_for(&state);
        let layout = face().layout(bounds(), &style, &state, &now());
        let text_height = measure(style.temperature_style(), "-- | --").height as i32;

        assert_eq!(
            layout.icon,
            Some(Point::new((240 - 75) / 2, 200 - text_height - 75))
        );
    }

    #[test]
    fn test_render_paints_background_and_icon() {
        let state = DisplayState {
            icon: Some(Icon::filled(Rgb565::RED)),
            ..Default::default()
        };
        let style = style_for(&state);
        let mut fb = Framebuffer::new();
        let area = fb.bounding_box();
        face()
            .render(&mut fb, area, &style, &state, &now())
            .unwrap();

        assert_eq!(fb.at(0, 0), style.background);
        let icon = face()
            .layout(bounds(), &style, &state, &now())
            .icon
            .unwrap();
        assert_eq!(fb.at(icon.x + 37, icon.y + 37), Rgb565::RED);
    }

    #[test]
    fn test_render_ambient_is_black_without_icon() {
        let state = DisplayState {
            ambient: true,
            icon: Some(Icon::filled(Rgb565::RED)),
            ..Default::default()
        };
        let style = style_for(&state);
        let mut fb = Framebuffer::new();
        let area = fb.bounding_box();
        face()
            .render(&mut fb, area, &style, &state, &now())
            .unwrap();

        assert_eq!(fb.at(0, 0), Rgb565::BLACK);
        assert!(fb.pixels.iter().all(|&p| p != Rgb565::RED));
    }
}
