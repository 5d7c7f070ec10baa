use crate::units::*;

/// A rectangle, specified by two opposite corners.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Rect {
    /// The x-coordinate of the first (typically, lower-left) corner.
    pub x1: Pt,
    /// The y-coordinate of the first (typically, lower-left) corner.
    pub y1: Pt,
    /// The x-coordinate of the second (typically, upper-right) corner.
    pub x2: Pt,
    /// The y-coordinate of the second (typically, upper-right) corner.
    pub y2: Pt,
}

impl Rect {
    /// Build a rectangle from its lower-left corner and its size
    pub fn from_origin_size(x: Pt, y: Pt, width: Pt, height: Pt) -> Rect {
        Rect {
            x1: x,
            y1: y,
            x2: x + width,
            y2: y + height,
        }
    }

    pub fn width(&self) -> Pt {
        self.x2 - self.x1
    }

    pub fn height(&self) -> Pt {
        self.y2 - self.y1
    }

    /// The largest rectangle with the given aspect ratio (width / height) that fits
    /// inside `self`, centred on both axes
    pub fn fit_centred(&self, aspect: f32) -> Rect {
        let (w, h) = (self.width(), self.height());
        if aspect <= 0.0 || !aspect.is_finite() || *h <= 0.0 {
            return *self;
        }
        let (fw, fh) = if *w / *h > aspect {
            (h * aspect, h)
        } else {
            (w, w / aspect)
        };
        Rect::from_origin_size(
            self.x1 + (w - fw) / 2.0,
            self.y1 + (h - fh) / 2.0,
            fw,
            fh,
        )
    }
}

impl From<Rect> for pdf_writer::Rect {
    fn from(r: Rect) -> Self {
        pdf_writer::Rect {
            x1: r.x1.into(),
            y1: r.y1.into(),
            x2: r.x2.into(),
            y2: r.y2.into(),
        }
    }
}
