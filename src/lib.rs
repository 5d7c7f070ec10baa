//! Composes the Mon Freight CP72 customs declaration form as a PDF.
//!
//! A submitted form is normalised into a [FormRecord] and laid out by a
//! [Composer] onto a [Surface], normally a [PdfSurface]. Fonts and the logo are
//! loaded once into [Assets] and shared between documents.
//!
//! ```
//! use cp72_pdf::{Assets, Composer, GoodsRow, InboundRecord};
//!
//! let inbound = InboundRecord {
//!     sender: "Bat-Erdene".to_string(),
//!     recipient: "Oyunaa".to_string(),
//!     item_description: vec!["Books".to_string()],
//!     item_quantity: vec!["2".to_string()],
//!     item_weight: vec!["1.5".to_string()],
//!     item_origin: vec!["AU".to_string()],
//!     item_value: vec!["40".to_string()],
//!     ..InboundRecord::default()
//! };
//! let parts = inbound.into_parts();
//!
//! let composer = Composer::new(Assets::builtin());
//! let pdf = composer.generate(&parts.record, None).unwrap();
//! assert!(pdf.starts_with(b"%PDF-"));
//! ```

mod assets;
pub use assets::*;

mod colour;
pub use colour::*;

mod composer;
pub use composer::*;

mod config;
pub use config::*;

mod content;

mod cursor;
pub use cursor::*;

mod document;
pub use document::*;

mod email;
pub use email::*;

mod error;
pub use error::*;

mod font;
pub use font::*;

mod goods;
pub use goods::*;

mod image;
pub use self::image::*;

mod info;
pub use info::*;

pub mod layout;

mod page;
pub use page::*;

pub mod pagesize;

mod record;
pub use record::*;

mod rect;
pub use rect::*;

pub(crate) mod refs;

mod signature;
pub use signature::*;

mod surface;
pub use surface::*;

mod units;
pub use units::*;
