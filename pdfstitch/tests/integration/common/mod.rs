//! Shared fixtures for the integration tests.
//!
//! Every fixture is generated in code: PDFs with lopdf, images with the
//! image crate.

#![allow(dead_code)]

use std::io::Cursor;
use std::path::Path;

use image::{DynamicImage, ImageFormat, RgbImage, Rgba, RgbaImage};
use lopdf::{Document, Object, ObjectId, Stream, dictionary};
use pdfstitch::InputItem;

/// A PDF with `pages` US Letter pages.
///
/// The content stream of page `k` (1-based) starts with the comment line
/// `% <marker>-<k>`, so tests can tell pages apart after a merge.
pub fn pdf_with_pages(pages: usize, marker: &str) -> Vec<u8> {
    let mut doc = Document::with_version("1.4");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
    });

    let kids: Vec<Object> = (1..=pages)
        .map(|k| {
            let content = format!("% {marker}-{k}\nBT /F1 24 Tf 72 700 Td ({marker} {k}) Tj ET\n");
            let content_id = doc.add_object(Stream::new(dictionary! {}, content.into_bytes()));
            doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
                "Resources" => dictionary! {
                    "Font" => dictionary! { "F1" => font_id },
                },
                "Contents" => content_id,
            })
            .into()
        })
        .collect();

    doc.objects.insert(
        pages_id,
        dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => pages as i64,
        }
        .into(),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes).unwrap();
    bytes
}

fn encode(image: DynamicImage, format: ImageFormat) -> Vec<u8> {
    let mut bytes = Vec::new();
    image.write_to(&mut Cursor::new(&mut bytes), format).unwrap();
    bytes
}

/// An opaque RGB PNG filled with `color`.
pub fn png_rgb(width: u32, height: u32, color: [u8; 3]) -> Vec<u8> {
    let image = RgbImage::from_pixel(width, height, image::Rgb(color));
    encode(DynamicImage::ImageRgb8(image), ImageFormat::Png)
}

/// An RGBA PNG filled with `color`.
pub fn png_rgba(width: u32, height: u32, color: [u8; 4]) -> Vec<u8> {
    let image = RgbaImage::from_pixel(width, height, Rgba(color));
    encode(DynamicImage::ImageRgba8(image), ImageFormat::Png)
}

/// A grayscale PNG filled with `level`.
pub fn png_gray(width: u32, height: u32, level: u8) -> Vec<u8> {
    let image = image::GrayImage::from_pixel(width, height, image::Luma([level]));
    encode(DynamicImage::ImageLuma8(image), ImageFormat::Png)
}

/// An RGB JPEG with a horizontal gradient.
pub fn jpeg_rgb(width: u32, height: u32) -> Vec<u8> {
    let image = RgbImage::from_fn(width, height, |x, _| {
        let v = (x * 255 / width.max(1)) as u8;
        image::Rgb([v, 128, 255 - v])
    });
    encode(DynamicImage::ImageRgb8(image), ImageFormat::Jpeg)
}

/// Shorthand for an input item.
pub fn item(name: &str, content: Vec<u8>) -> InputItem {
    InputItem::new(name, content)
}

/// Parse merged output.
pub fn load(bytes: &[u8]) -> Document {
    Document::load_mem(bytes).expect("merged output is a valid PDF")
}

/// Page ids in page order.
pub fn page_ids(doc: &Document) -> Vec<ObjectId> {
    doc.get_pages().into_values().collect()
}

/// Decoded content of every page, in page order.
pub fn page_contents(doc: &Document) -> Vec<Vec<u8>> {
    page_ids(doc)
        .into_iter()
        .map(|id| doc.get_page_content(id).unwrap())
        .collect()
}

/// MediaBox of a page as numbers.
pub fn media_box(doc: &Document, page_id: ObjectId) -> Vec<f32> {
    doc.get_dictionary(page_id)
        .unwrap()
        .get(b"MediaBox")
        .unwrap()
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v.as_float().unwrap())
        .collect()
}

/// The single image XObject drawn by an image page.
pub fn page_image(doc: &Document, page_id: ObjectId) -> &Stream {
    let resources = doc
        .get_dictionary(page_id)
        .unwrap()
        .get(b"Resources")
        .unwrap();
    let resources = match resources {
        Object::Reference(id) => doc.get_dictionary(*id).unwrap(),
        other => other.as_dict().unwrap(),
    };
    let xobjects = match resources.get(b"XObject").unwrap() {
        Object::Reference(id) => doc.get_dictionary(*id).unwrap(),
        other => other.as_dict().unwrap(),
    };
    let image_id = xobjects.get(b"Im0").unwrap().as_reference().unwrap();
    doc.get_object(image_id).unwrap().as_stream().unwrap()
}

/// Number of entries directly inside `dir`.
pub fn entries(dir: &Path) -> usize {
    std::fs::read_dir(dir).unwrap().count()
}
