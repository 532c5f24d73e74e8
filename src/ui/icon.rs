//! Weather icon bitmap

use core::ops::Range;

use embedded_graphics::{
    draw_target::DrawTarget,
    geometry::{OriginDimensions, Point, Size},
    pixelcolor::Rgb565,
    prelude::RgbColor,
    primitives::Rectangle,
    Pixel,
};
use tinybmp::Bmp;

use crate::{error::FetchError, system::config::WatchFaceConfig};

const WIDTH: u32 = WatchFaceConfig::ICON_SIZE.width;
const HEIGHT: u32 = WatchFaceConfig::ICON_SIZE.height;
const PIXELS: usize = (WIDTH * HEIGHT) as usize;

/// Decoded icon, always scaled to `WatchFaceConfig::ICON_SIZE`
#[derive(Clone, PartialEq)]
pub struct Icon {
    pixels: [Rgb565; PIXELS],
}

impl core::fmt::Debug for Icon {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Icon").field("size", &self.size()).finish()
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Icon {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "Icon({}x{})", WIDTH, HEIGHT)
    }
}

impl OriginDimensions for Icon {
    fn size(&self) -> Size {
        WatchFaceConfig::ICON_SIZE
    }
}

impl Icon {
    /// Single-colour icon
    pub fn filled(color: Rgb565) -> Self {
        Self {
            pixels: [color; PIXELS],
        }
    }

    /// Decode a BMP image and scale it (nearest neighbour) to the icon size.
    pub fn from_bmp(bytes: &[u8]) -> Result<Self, FetchError> {
        let bmp = Bmp::<Rgb565>::from_slice(bytes).map_err(|_| FetchError::Decode)?;
        let source = bmp.size();
        if source.width == 0 || source.height == 0 {
            return Err(FetchError::Decode);
        }

        let mut icon = Self::filled(Rgb565::BLACK);
        // Each source pixel covers the destination cells that sample it,
        // which works for shrinking and enlarging alike.
        for Pixel(point, color) in bmp.pixels() {
            let (Ok(x), Ok(y)) = (u32::try_from(point.x), u32::try_from(point.y)) else {
                continue;
            };
            for dy in sampled_by(y, source.height, HEIGHT) {
                for dx in sampled_by(x, source.width, WIDTH) {
                    icon.pixels[(dy * WIDTH + dx) as usize] = color;
                }
            }
        }
        Ok(icon)
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgb565> {
        (x < WIDTH && y < HEIGHT).then(|| self.pixels[(y * WIDTH + x) as usize])
    }

    /// Draw with the top left corner at `top_left`
    pub fn draw_at<D>(&self, target: &mut D, top_left: Point) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb565>,
    {
        target.fill_contiguous(
            &Rectangle::new(top_left, self.size()),
            self.pixels.iter().copied(),
        )
    }
}

/// Destination indices whose nearest source index is `src`
fn sampled_by(src: u32, src_len: u32, dst_len: u32) -> Range<u32> {
    let start = (src * dst_len).div_ceil(src_len);
    let end = ((src + 1) * dst_len).div_ceil(src_len);
    start.min(dst_len)..end.min(dst_len)
}
