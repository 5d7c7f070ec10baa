use crate::refs::{ObjectReferences, RefType};
use crate::DocumentError;
use image::{ColorType, DynamicImage, GenericImageView};
use miniz_oxide::deflate::{compress_to_vec_zlib, CompressionLevel};
use pdf_writer::{Filter, Finish, Pdf};

/// A raster image, already encoded into the form it will take inside the PDF.
///
/// Encoding happens when the image is created rather than when the document is
/// written, so a bad image is reported by the call that supplied it and can never
/// fail serialization.
pub struct Image {
    pub width: u32,
    pub height: u32,
    filter: Filter,
    bytes: Vec<u8>,
    mask: Option<Vec<u8>>,
}

impl Image {
    /// Decode an image of any format the `image` crate recognises
    pub fn decode(data: &[u8]) -> Result<Image, DocumentError> {
        let format = image::guess_format(data)?;
        let image = image::load_from_memory_with_format(data, format)?;

        match (format, image.color()) {
            // three-component JPEGs can be embedded as-is; CMYK ones also decode to
            // Rgb8 but would be drawn with the wrong colour space
            (image::ImageFormat::Jpeg, ColorType::Rgb8) if jpeg_components(data) == Some(3) => {
                let (width, height) = image.dimensions();
                if width == 0 || height == 0 {
                    return Err(DocumentError::EmptyImage);
                }
                Ok(Image {
                    width,
                    height,
                    filter: Filter::DctDecode,
                    bytes: data.to_vec(),
                    mask: None,
                })
            }
            _ => Self::new_raster(image),
        }
    }

    /// Flate-compress the RGB channels, with any alpha channel split out into a soft mask
    pub fn new_raster(image: DynamicImage) -> Result<Image, DocumentError> {
        let (width, height) = image.dimensions();
        if width == 0 || height == 0 {
            return Err(DocumentError::EmptyImage);
        }

        let level = CompressionLevel::DefaultLevel as u8;
        let mask = image.color().has_alpha().then(|| {
            let alphas: Vec<u8> = image.pixels().map(|(_, _, px)| px.0[3]).collect();
            compress_to_vec_zlib(&alphas, level)
        });
        let bytes = compress_to_vec_zlib(image.to_rgb8().as_raw(), level);

        Ok(Image {
            width,
            height,
            filter: Filter::FlateDecode,
            bytes,
            mask,
        })
    }

    /// Width divided by height
    pub fn aspect_ratio(&self) -> f32 {
        self.width as f32 / self.height as f32
    }

    pub fn has_mask(&self) -> bool {
        self.mask.is_some()
    }

    pub(crate) fn write(&self, refs: &mut ObjectReferences, image_index: usize, writer: &mut Pdf) {
        let id = refs.gen(RefType::Image(image_index));
        let mask_id = self
            .mask
            .as_ref()
            .map(|_| refs.gen(RefType::ImageMask(image_index)));

        let mut image = writer.image_xobject(id, self.bytes.as_slice());
        image.filter(self.filter);
        image.width(self.width as i32);
        image.height(self.height as i32);
        image.color_space().device_rgb();
        image.bits_per_component(8);
        if let Some(mask_id) = mask_id {
            image.s_mask(mask_id);
        }
        image.finish();

        if let (Some(mask_id), Some(mask)) = (mask_id, self.mask.as_ref()) {
            let mut s_mask = writer.image_xobject(mask_id, mask.as_slice());
            s_mask.filter(Filter::FlateDecode);
            s_mask.width(self.width as i32);
            s_mask.height(self.height as i32);
            s_mask.color_space().device_gray();
            s_mask.bits_per_component(8);
        }
    }
}

/// Number of colour components declared by a JPEG's start-of-frame segment
fn jpeg_components(data: &[u8]) -> Option<u8> {
    if !data.starts_with(&[0xff, 0xd8]) {
        return None;
    }

    let mut pos = 2;
    while pos + 4 <= data.len() {
        if data[pos] != 0xff {
            return None;
        }
        let marker = data[pos + 1];
        match marker {
            // fill byte before a marker
            0xff => {
                pos += 1;
                continue;
            }
            // markers without a length
            0x01 | 0xd0..=0xd7 => {
                pos += 2;
                continue;
            }
            // SOS or EOI before any frame header
            0xd9 | 0xda => return None,
            _ => {}
        }

        let length = u16::from_be_bytes([data[pos + 2], data[pos + 3]]) as usize;
        // SOF0 to SOF15, apart from DHT, JPG and DAC
        if matches!(marker, 0xc0..=0xcf) && !matches!(marker, 0xc4 | 0xc8 | 0xcc) {
            // length, precision, height, width, then the component count
            return data.get(pos + 9).copied();
        }
        pos += 2 + length;
    }
    None
}
