//! Text layout utilities.
//!
//! The CP72 template lays free text out by character count rather than by measured
//! glyph widths: addresses are wrapped with [`wrap_text`](crate::layout::wrap_text)
//! to a fixed budget and each resulting line is drawn one line-pitch below the last.
//!
//! # Example
//!
//! ```
//! use cp72_pdf::layout::wrap_text;
//!
//! let lines = wrap_text("12 Example Street, Sydney NSW 2000", 20);
//! assert_eq!(lines, vec!["12 Example Street,", "Sydney NSW 2000"]);
//! ```

mod text;

pub use text::*;
