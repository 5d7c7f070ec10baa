//! Drawn signatures arrive from the browser canvas as `data:` URLs.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use crate::image::Image;

/// A decoded signature bitmap, ready to place on the form
pub struct SignatureAsset {
    pub image: Image,
}

impl SignatureAsset {
    /// Decode a `data:image/...;base64,...` URL.
    ///
    /// Anything that isn't an image data URL, or whose payload fails to decode,
    /// gives `None`: a missing signature leaves the signature box blank but never
    /// stops the form being generated.
    pub fn from_data_url(url: &str) -> Option<SignatureAsset> {
        let url = url.trim();
        if url.is_empty() {
            return None;
        }
        if !url.starts_with("data:image") {
            log::warn!("signature is not an image data URL, leaving it blank");
            return None;
        }
        let Some((_, payload)) = url.split_once(',') else {
            log::warn!("signature data URL has no payload, leaving it blank");
            return None;
        };

        let bytes = match STANDARD.decode(payload.trim()) {
            Ok(bytes) => bytes,
            Err(e) => {
                log::warn!("signature payload is not valid base64: {e}");
                return None;
            }
        };

        match Image::decode(&bytes) {
            Ok(image) => {
                log::debug!("decoded {}x{} signature", image.width, image.height);
                Some(SignatureAsset { image })
            }
            Err(e) => {
                log::warn!("failed to decode signature image: {e}");
                None
            }
        }
    }
}
