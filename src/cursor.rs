//! The vertical write position on a page.
//!
//! Content is committed top to bottom, so the cursor starts near the top edge and
//! only ever moves down. Every layout step takes the cursor by value and hands back
//! the updated one.

use crate::colour::colours;
use crate::font::FontWeight;
use crate::surface::Surface;
use crate::units::*;
use crate::DocumentError;

/// Left edge of all content
pub const LEFT_MARGIN: Mm = Mm(20.0);
/// Width between the left and right margins of an A4 page
pub const CONTENT_WIDTH: Mm = Mm(170.0);

const BANNER_HEIGHT: Mm = Mm(7.0);
const BANNER_LABEL_INSET: Mm = Mm(3.0);
const BANNER_LABEL_RISE: Mm = Mm(2.2);
/// How far the cursor drops past a banner, measured from the banner's base
const BANNER_ADVANCE: Mm = Mm(8.0);
const BANNER_LABEL_SIZE: Pt = Pt(10.0);

/// Baseline of the next thing to be drawn, in millimetres from the bottom of the page
#[derive(Copy, Clone, Debug, PartialEq, PartialOrd)]
pub struct Cursor(pub Mm);

impl Cursor {
    pub fn y(self) -> Mm {
        self.0
    }

    /// The cursor moved `by` further down the page
    pub fn down(self, by: Mm) -> Cursor {
        Cursor(self.0 - by)
    }
}

/// Draw a section header banner at the cursor: a dark strip across the content width
/// with the label in white bold. The fill colour is left black and the returned
/// cursor sits below the banner.
///
/// The label is drawn in bold 10pt; callers set their own font afterwards if they
/// need something else.
pub fn section_header<S: Surface>(
    surface: &mut S,
    cursor: Cursor,
    label: &str,
) -> Result<Cursor, DocumentError> {
    let y = cursor.y();

    surface.set_fill_colour(colours::BANNER);
    surface.fill_rect(LEFT_MARGIN, y, CONTENT_WIDTH, BANNER_HEIGHT)?;

    surface.set_fill_colour(colours::WHITE);
    surface.set_font(FontWeight::Bold, BANNER_LABEL_SIZE);
    surface.draw_string(LEFT_MARGIN + BANNER_LABEL_INSET, y + BANNER_LABEL_RISE, label)?;

    surface.set_fill_colour(colours::BLACK);
    Ok(cursor.down(BANNER_ADVANCE))
}
