use crate::refs::{ObjectReferences, RefType};
use crate::PDFError;
use image::{ColorType, DynamicImage, GenericImageView, ImageFormat};
use miniz_oxide::deflate::{compress_to_vec_zlib, CompressionLevel};
use pdf_writer::{Filter, Finish, Pdf};
use std::path::Path;

/// How the image's pixels will be embedded in the PDF
pub enum RasterImage {
    /// Baseline RGB JPEGs are stored as-is with a DCT filter
    Jpeg(Vec<u8>),
    /// Anything else gets decoded and re-compressed with a flate filter
    Decoded(DynamicImage),
}

/// A raster image loaded from disk, ready to be embedded into a document. Sizes are
/// in pixels; the layout engine converts them to points.
pub struct Image {
    pub image: RasterImage,
    pub width: u32,
    pub height: u32,
}

struct EncodeOutput {
    filter: Filter,
    bytes: Vec<u8>,
    mask: Option<Vec<u8>>,
}

impl Image {
    /// Load an image from disk, guessing its format from its contents
    pub fn new_from_disk<P: AsRef<Path>>(path: P) -> Result<Image, PDFError> {
        let data = std::fs::read(path.as_ref())?;
        Self::new_from_memory(data)
    }

    /// Load an image from encoded bytes (PNG, JPEG, ...)
    pub fn new_from_memory(data: Vec<u8>) -> Result<Image, PDFError> {
        let format = image::guess_format(&data)?;
        let image = image::load_from_memory_with_format(&data, format)?;
        let (width, height) = image.dimensions();

        let image = match (format, image.color()) {
            // we can embed it directly!
            (ImageFormat::Jpeg, ColorType::Rgb8) => RasterImage::Jpeg(data),
            _ => RasterImage::Decoded(image),
        };

        Ok(Image {
            image,
            width,
            height,
        })
    }

    fn encode(&self) -> EncodeOutput {
        match &self.image {
            RasterImage::Jpeg(bytes) => EncodeOutput {
                filter: Filter::DctDecode,
                bytes: bytes.clone(),
                mask: None,
            },
            RasterImage::Decoded(image) => {
                let level = CompressionLevel::DefaultLevel as u8;

                let mask = image.color().has_alpha().then(|| {
                    let alphas: Vec<u8> = image.pixels().map(|p| (p.2).0[3]).collect();
                    compress_to_vec_zlib(&alphas, level)
                });

                let bytes = compress_to_vec_zlib(image.to_rgb8().as_raw(), level);

                EncodeOutput {
                    filter: Filter::FlateDecode,
                    bytes,
                    mask,
                }
            }
        }
    }

    pub(crate) fn write(&self, refs: &mut ObjectReferences, image_index: usize, writer: &mut Pdf) {
        let id = refs.gen(RefType::Image(image_index));
        let encoded = self.encode();

        let mask_id = encoded
            .mask
            .as_ref()
            .map(|_| refs.gen(RefType::ImageMask(image_index)));

        let mut image = writer.image_xobject(id, encoded.bytes.as_slice());
        image.filter(encoded.filter);
        image.width(self.width as i32);
        image.height(self.height as i32);
        image.color_space().device_rgb();
        image.bits_per_component(8);
        if let Some(mask_id) = mask_id {
            image.s_mask(mask_id);
        }
        image.finish();

        // add a transparency mask if we have one
        if let (Some(mask_id), Some(mask)) = (mask_id, encoded.mask.as_ref()) {
            let mut s_mask = writer.image_xobject(mask_id, mask.as_slice());
            s_mask.filter(Filter::FlateDecode);
            s_mask.width(self.width as i32);
            s_mask.height(self.height as i32);
            s_mask.color_space().device_gray();
            s_mask.bits_per_component(8);
        }
    }
}
