use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while building or serializing a document
#[derive(Error, Debug)]
pub enum DocumentError {
    #[error(transparent)]
    /// An I/O error occurred
    Io(#[from] std::io::Error),

    #[error(transparent)]
    /// [owned_ttf_parser] failed to parse the font
    FaceParsing(#[from] owned_ttf_parser::FaceParsingError),

    #[error(transparent)]
    /// [image] failed to decode the image
    Image(#[from] image::ImageError),

    #[error("font file {0} does not exist")]
    /// A font named by the configuration could not be found on disk
    MissingFontFile(PathBuf),

    #[error("font {0} has no `?` glyph to stand in for unsupported characters")]
    /// Embedded fonts must at least be able to draw a replacement glyph
    NoReplacementGlyph(String),

    #[error("no page is open to draw on")]
    /// A drawing primitive was called outside of `new_page` / `end_page`
    NoOpenPage,

    #[error("a page is already open")]
    /// `new_page` was called before the previous page was ended
    PageAlreadyOpen,

    #[error("image has zero width or height")]
    /// Images with no pixels can't be embedded
    EmptyImage,
}

/// Errors raised by an email [`Dispatcher`](crate::Dispatcher)
#[derive(Error, Debug)]
pub enum DispatchError {
    #[error("email dispatch is not configured (missing API key)")]
    NotConfigured,

    #[error("email provider rejected the message: {0}")]
    Rejected(String),

    #[error("email transport failed: {0}")]
    Transport(String),
}

/// Errors raised while reading [`Settings`](crate::Settings) from the environment
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("environment variable {name} is not valid unicode")]
    NotUnicode { name: &'static str },

    #[error("environment variable {name} must not be empty")]
    Empty { name: &'static str },
}
