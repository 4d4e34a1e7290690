//! Raster image inputs.
//!
//! An image becomes a one-page PDF whose MediaBox is the image's pixel size
//! (one pixel per point). The page draws a single 8-bit `DeviceRGB` image
//! XObject stretched over the whole MediaBox. Transparency is flattened onto
//! white first, so viewers never show a black background behind it.

use std::io::Write;

use flate2::Compression;
use flate2::write::ZlibEncoder;
use image::{DynamicImage, ImageFormat, Rgb, RgbImage};
use lopdf::{Document, Object, Stream, dictionary};

use crate::error::{MergeError, Result};

/// Resource name of the page image.
const IMAGE_NAME: &str = "Im0";

/// Decode image bytes of a known format.
///
/// # Errors
///
/// Returns [`MergeError::InvalidImage`] if decoding fails or the image has no
/// pixels.
pub fn decode(name: &str, data: &[u8], format: ImageFormat) -> Result<DynamicImage> {
    let image = image::load_from_memory_with_format(data, format)
        .map_err(|e| MergeError::invalid_image(name, e.to_string()))?;

    if image.width() == 0 || image.height() == 0 {
        return Err(MergeError::invalid_image(name, "image has no pixels"));
    }

    Ok(image)
}

/// Convert any color model to opaque 8-bit RGB.
///
/// Alpha is composited over white, `out = a * pixel + (1 - a) * 255`, per
/// channel. Images without alpha go through the library's standard
/// conversion.
pub fn flatten_to_rgb(image: DynamicImage) -> RgbImage {
    if !image.color().has_alpha() {
        return image.into_rgb8();
    }

    let rgba = image.into_rgba8();
    let (width, height) = rgba.dimensions();
    let mut rgb = RgbImage::new(width, height);

    for (src, dst) in rgba.pixels().zip(rgb.pixels_mut()) {
        let [r, g, b, a] = src.0;
        *dst = Rgb([
            blend_on_white(r, a),
            blend_on_white(g, a),
            blend_on_white(b, a),
        ]);
    }

    rgb
}

fn blend_on_white(channel: u8, alpha: u8) -> u8 {
    let (c, a) = (u32::from(channel), u32::from(alpha));
    ((c * a + 255 * (255 - a) + 127) / 255) as u8
}

/// Wrap an RGB raster as a standalone one-page PDF.
///
/// # Errors
///
/// Returns [`MergeError::InvalidImage`] if the pixel data cannot be
/// compressed.
pub fn wrap_as_page(name: &str, rgb: &RgbImage) -> Result<Document> {
    let (width, height) = rgb.dimensions();
    let (width, height) = (i64::from(width), i64::from(height));

    let samples = deflate(rgb.as_raw())
        .map_err(|e| MergeError::invalid_image(name, format!("failed to compress pixels: {e}")))?;

    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let image_id = doc.add_object(Stream::new(
        dictionary! {
            "Type" => "XObject",
            "Subtype" => "Image",
            "Width" => width,
            "Height" => height,
            "ColorSpace" => "DeviceRGB",
            "BitsPerComponent" => 8,
            "Filter" => "FlateDecode",
        },
        samples,
    ));

    let content = format!("q\n{width} 0 0 {height} 0 0 cm\n/{IMAGE_NAME} Do\nQ\n");
    let content_id = doc.add_object(Stream::new(dictionary! {}, content.into_bytes()));

    let page_id = doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "MediaBox" => vec![0.into(), 0.into(), width.into(), height.into()],
        "Resources" => dictionary! {
            "XObject" => dictionary! { IMAGE_NAME => image_id },
        },
        "Contents" => content_id,
    });

    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => vec![page_id.into()],
            "Count" => 1,
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    Ok(doc)
}

fn deflate(data: &[u8]) -> std::io::Result<Vec<u8>> {
    let mut encoder = ZlibEncoder::new(Vec::with_capacity(data.len() / 2), Compression::default());
    encoder.write_all(data)?;
    encoder.finish()
}
