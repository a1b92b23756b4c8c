//! Saving the generated image as an RGB PNG

use std::path::{Path, PathBuf};

use image::{DynamicImage, ImageFormat, Rgb, RgbImage};
use tracing::debug;

use crate::error::NanoBananaError;

/// Flattens anything with alpha onto opaque white.
pub fn composite_on_white(image: &DynamicImage) -> RgbImage {
    let rgba = image.to_rgba8();
    let mut flattened = RgbImage::new(rgba.width(), rgba.height());
    for (x, y, pixel) in rgba.enumerate_pixels() {
        let [r, g, b, a] = pixel.0;
        let alpha = u32::from(a);
        let blend = |channel: u8| -> u8 {
            // rounded (c * a + 255 * (255 - a)) / 255, always fits in a u8
            ((u32::from(channel) * alpha + 255 * (255 - alpha) + 127) / 255) as u8
        };
        flattened.put_pixel(x, y, Rgb([blend(r), blend(g), blend(b)]));
    }
    flattened
}

/// Turns decoded output into 3-channel RGB.
///
/// Alpha gets composited onto white, 8-bit RGB passes through untouched and
/// everything else (grayscale, 16-bit, float) is converted.
pub fn normalize_to_rgb(image: DynamicImage) -> RgbImage {
    if image.color().has_alpha() {
        debug!("Compositing {:?} image onto white", image.color());
        composite_on_white(&image)
    } else {
        match image {
            DynamicImage::ImageRgb8(rgb) => rgb,
            other => {
                debug!("Converting {:?} image to RGB", other.color());
                other.to_rgb8()
            }
        }
    }
}

/// Decodes the generated image bytes and writes them to `path` as an RGB PNG,
/// creating missing parent directories. Returns the absolute path written.
pub fn save_png(bytes: &[u8], path: &Path) -> Result<PathBuf, NanoBananaError> {
    let image = image::load_from_memory(bytes)
        .map_err(|err| NanoBananaError::InvalidImageData(err.to_string()))?;
    let rgb = normalize_to_rgb(image);

    let output_error = |source: image::ImageError| NanoBananaError::Output {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent).map_err(|err| output_error(err.into()))?;
    }

    rgb.save_with_format(path, ImageFormat::Png)
        .map_err(output_error)?;
    debug!(
        "Wrote {}x{} PNG to {}",
        rgb.width(),
        rgb.height(),
        path.display()
    );

    std::fs::canonicalize(path)
        .or_else(|_| std::path::absolute(path))
        .map_err(|err| output_error(err.into()))
}
