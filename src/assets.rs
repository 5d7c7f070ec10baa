//! Fonts and the logo, loaded once and shared by every generated form.

use std::sync::Arc;

use crate::config::Settings;
use crate::font::FontSet;
use crate::DocumentError;

/// Read-only resources for composing forms. Cloning is cheap; the font set is shared.
#[derive(Clone)]
pub struct Assets {
    pub fonts: Arc<FontSet>,
    /// Raw bytes of the logo image. It is decoded per document, so a logo that
    /// turns out to be undecodable only ever costs the logo.
    pub logo: Option<Arc<[u8]>>,
}

impl Assets {
    /// Built-in fonts and no logo
    pub fn builtin() -> Assets {
        Assets {
            fonts: Arc::new(FontSet::builtin()),
            logo: None,
        }
    }

    /// Load the configured fonts and logo.
    ///
    /// A configured font directory that lacks either face is an error. A logo path
    /// that doesn't point at a file is not; the form is drawn without a logo.
    pub fn load(settings: &Settings) -> Result<Assets, DocumentError> {
        let fonts = match &settings.fonts_dir {
            Some(dir) => {
                let fonts = FontSet::load_dir(dir)?;
                log::info!("loaded fonts from {}", dir.display());
                fonts
            }
            None => {
                log::info!("no font directory configured, using built-in Helvetica");
                FontSet::builtin()
            }
        };

        let logo: Option<Arc<[u8]>> = match &settings.logo_path {
            Some(path) if path.is_file() => {
                let bytes = std::fs::read(path)?;
                log::debug!("loaded {} byte logo from {}", bytes.len(), path.display());
                Some(Arc::from(bytes))
            }
            Some(path) => {
                log::warn!("logo {} not found, forms will have no logo", path.display());
                None
            }
            None => None,
        };

        Ok(Assets {
            fonts: Arc::new(fonts),
            logo,
        })
    }
}
