//! Text and colour styling
//!
//! Computed once at start and again only when the insets, the ambient mode
//! or the device properties change; rendering just reads it.

use embedded_graphics::{
    geometry::Point,
    mono_font::{MonoFont, MonoTextStyle},
    pixelcolor::Rgb565,
    prelude::RgbColor,
    text::{renderer::TextRenderer, Baseline},
};
use profont::{
    PROFONT_10_POINT, PROFONT_12_POINT, PROFONT_14_POINT, PROFONT_18_POINT, PROFONT_24_POINT,
};

use crate::system::config::WatchFaceConfig;

/// Widest time strings, measured once so centring does not jitter as
/// digits change.
const TIME_TEMPLATE: &str = "12:55:55";
const TIME_TEMPLATE_AMBIENT: &str = "55:55";

#[derive(Clone, Copy)]
pub struct StyleConfig {
    pub time_font: &'static MonoFont<'static>,
    pub date_font: &'static MonoFont<'static>,
    pub temperature_font: &'static MonoFont<'static>,
    pub background: Rgb565,
    pub text_color: Rgb565,
    pub date_color: Rgb565,
    /// Smooth palette; off on low-bit displays while ambient
    pub anti_alias: bool,
    /// Added to every vertical text position
    pub round_offset: i32,
    /// Width of `12:55:55` in the time font
    pub time_width: u32,
    /// Width of `55:55` in the time font
    pub time_width_ambient: u32,
}

impl StyleConfig {
    pub fn new(config: &WatchFaceConfig, round: bool, ambient: bool, low_bit_ambient: bool) -> Self {
        let (time_font, date_font, temperature_font) = if round {
            (&PROFONT_24_POINT, &PROFONT_12_POINT, &PROFONT_18_POINT)
        } else {
            (&PROFONT_18_POINT, &PROFONT_10_POINT, &PROFONT_14_POINT)
        };

        // Low-bit panels only switch pixels fully on or off in ambient mode
        let anti_alias = !(low_bit_ambient && ambient);
        let (text_color, date_color) = if anti_alias {
            (config.text_color, config.date_color)
        } else {
            (Rgb565::WHITE, Rgb565::WHITE)
        };

        Self {
            time_font,
            date_font,
            temperature_font,
            background: config.background,
            text_color,
            date_color,
            anti_alias,
            round_offset: if round { config.round_offset } else { 0 },
            time_width: text_width(time_font, TIME_TEMPLATE),
            time_width_ambient: text_width(time_font, TIME_TEMPLATE_AMBIENT),
        }
    }

    pub fn time_style(&self) -> MonoTextStyle<'static, Rgb565> {
        MonoTextStyle::new(self.time_font, self.text_color)
    }

    pub fn date_style(&self) -> MonoTextStyle<'static, Rgb565> {
        MonoTextStyle::new(self.date_font, self.date_color)
    }

    pub fn temperature_style(&self) -> MonoTextStyle<'static, Rgb565> {
        MonoTextStyle::new(self.temperature_font, self.text_color)
    }
}

/// Rendered width of `text` in `font`
pub fn text_width(font: &'static MonoFont<'static>, text: &str) -> u32 {
    MonoTextStyle::new(font, Rgb565::WHITE)
        .measure_string(text, Point::zero(), Baseline::Alphabetic)
        .bounding_box
        .size
        .width
}
