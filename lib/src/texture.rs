use std::path::Path;

use image::{GrayImage, Luma, Rgba, RgbaImage};
use log::{debug, warn};

use crate::color::HexColor;

/// Marker in a texture path for grayscale masks that need a tint.
pub const GRAYSCALE_MASK_MARKER: &str = "_GS";

pub fn is_grayscale_mask(path: &str) -> bool {
    path.contains(GRAYSCALE_MASK_MARKER)
}

/// Average color of the image at `path`.
///
/// A `tint` colorizes the image as a grayscale mask first. Load failures are
/// logged and yield black, they never abort the caller.
pub fn average_image_color(path: &Path, tint: Option<HexColor>) -> HexColor {
    match try_average_image_color(path, tint) {
        Ok(color) => color,
        Err(err) => {
            warn!("Failed to process image: {} ({err})", path.display());
            HexColor::BLACK
        }
    }
}

pub fn try_average_image_color(path: &Path, tint: Option<HexColor>) -> crate::Result<HexColor> {
    let image = image::open(path)?;

    let rgba = match tint {
        Some(tint) => {
            debug!("Colorizing {} with {tint}", path.display());
            colorize(&luma_601(&image.to_rgba8()), tint)
        }
        None => image.to_rgba8(),
    };

    Ok(average_rgba(&rgba))
}

/// ITU-R 601 luma in 16 bit fixed point, alpha dropped.
pub fn luma_601(image: &RgbaImage) -> GrayImage {
    GrayImage::from_fn(image.width(), image.height(), |x, y| {
        let [r, g, b, _] = image.get_pixel(x, y).0.map(u32::from);
        let l = (r * 19595 + g * 38470 + b * 7471 + 0x8000) >> 16;

        Luma([l as u8])
    })
}

/// Maps luminance onto a black to `tint` ramp. Alpha is not kept.
pub fn colorize(gray: &GrayImage, tint: HexColor) -> RgbaImage {
    let tint = tint.components();

    RgbaImage::from_fn(gray.width(), gray.height(), |x, y| {
        let l = gray.get_pixel(x, y).0[0] as u32;
        let [r, g, b] = tint.map(|c| (l * c as u32 / 255) as u8);

        Rgba([r, g, b, u8::MAX])
    })
}

/// Truncated mean of every pixel with non-zero alpha, black if there are none.
pub fn average_rgba(image: &RgbaImage) -> HexColor {
    let mut total = [0u64; 3];
    let mut count = 0u64;

    for Rgba([r, g, b, a]) in image.pixels() {
        if *a == 0 {
            continue;
        }

        total[0] += *r as u64;
        total[1] += *g as u64;
        total[2] += *b as u64;
        count += 1;
    }

    if count == 0 {
        return HexColor::BLACK;
    }

    let [r, g, b] = total.map(|sum| (sum / count) as u8);

    HexColor::new(r, g, b)
}
