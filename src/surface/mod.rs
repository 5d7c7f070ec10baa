//! The drawing primitives the composer targets.
//!
//! [`Surface`] is the seam between the CP72 layout logic and the thing that actually
//! produces bytes. Coordinates are millimetres with the origin at the bottom-left of
//! the page, as in PDF itself. [`PdfSurface`] is the real implementation.

mod pdf;
#[cfg(test)]
pub(crate) mod recording;

pub use pdf::*;

use crate::colour::{colours, Colour};
use crate::font::FontWeight;
use crate::image::Image;
use crate::info::Info;
use crate::pagesize::PageSize;
use crate::units::*;
use crate::DocumentError;

/// How [`Surface::measure_and_draw_table`] draws a grid of text cells. The first row
/// is the header row.
#[derive(Clone, Debug, PartialEq)]
pub struct TableStyle {
    pub column_widths: Vec<Mm>,
    pub font_size: Pt,
    /// Fill behind the header row
    pub header_background: Colour,
    pub grid_colour: Colour,
    pub grid_width: Pt,
    /// Space between a cell's left edge and its text
    pub horizontal_padding: Pt,
    /// Space above and below the text line in each row
    pub vertical_padding: Pt,
}

impl TableStyle {
    /// Height of one row: a 1.2 leading line plus padding above and below
    pub fn row_height(&self) -> Pt {
        self.font_size * 1.2 + self.vertical_padding * 2.0
    }

    /// Height of a table with `rows` rows, header included
    pub fn table_height(&self, rows: usize) -> Mm {
        (self.row_height() * rows as f32).into()
    }

    pub fn total_width(&self) -> Mm {
        self.column_widths.iter().copied().sum()
    }
}

impl Default for TableStyle {
    fn default() -> Self {
        TableStyle {
            column_widths: Vec::new(),
            font_size: Pt(9.0),
            header_background: colours::LIGHT_GREY,
            grid_colour: colours::BLACK,
            grid_width: Pt(0.6),
            horizontal_padding: Pt(6.0),
            vertical_padding: Pt(3.0),
        }
    }
}

/// Drawing primitives, in the style of a canvas: font and fill colour are state that
/// applies to everything drawn after they are set.
///
/// Everything except [`Surface::draw_image`] is treated as mandatory by the composer,
/// and its errors fail document generation.
pub trait Surface {
    /// Start a new page. Only one page may be open at a time.
    fn new_page(&mut self, size: PageSize) -> Result<(), DocumentError>;

    fn set_font(&mut self, weight: FontWeight, size: Pt);

    fn set_fill_colour(&mut self, colour: Colour);

    /// Draw `text` with its baseline starting at (x, y)
    fn draw_string(&mut self, x: Mm, y: Mm, text: &str) -> Result<(), DocumentError>;

    /// Draw `text` with its baseline ending at (x, y)
    fn draw_right_aligned_string(&mut self, x: Mm, y: Mm, text: &str)
        -> Result<(), DocumentError>;

    /// Fill a rectangle with the current fill colour; (x, y) is its lower-left corner
    fn fill_rect(&mut self, x: Mm, y: Mm, width: Mm, height: Mm) -> Result<(), DocumentError>;

    /// Place an image in the box whose lower-left corner is (x, y). With
    /// `preserve_aspect` the image is scaled to fit and centred in the box.
    fn draw_image(
        &mut self,
        image: Image,
        x: Mm,
        y: Mm,
        width: Mm,
        height: Mm,
        preserve_aspect: bool,
    ) -> Result<(), DocumentError>;

    /// Draw `rows` as a table whose top-left corner is (x, top), returning the height
    /// it occupies
    fn measure_and_draw_table(
        &mut self,
        rows: &[Vec<String>],
        x: Mm,
        top: Mm,
        style: &TableStyle,
    ) -> Result<Mm, DocumentError>;

    /// Close the open page
    fn end_page(&mut self) -> Result<(), DocumentError>;

    /// Document metadata written alongside the pages
    fn set_info(&mut self, info: Info);

    /// Finish the document. Consumes the surface, so nothing can be drawn afterwards.
    fn serialize(self) -> Result<Vec<u8>, DocumentError>
    where
        Self: Sized;
}
