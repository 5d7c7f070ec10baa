//! A [Surface] that only remembers what was asked of it, for layout tests.

use super::{Surface, TableStyle};
use crate::colour::Colour;
use crate::font::FontWeight;
use crate::image::Image;
use crate::info::Info;
use crate::pagesize::PageSize;
use crate::units::*;
use crate::DocumentError;

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Op {
    NewPage,
    Font(FontWeight, Pt),
    Fill(Colour),
    Text { x: Mm, y: Mm, text: String },
    RightText { x: Mm, y: Mm, text: String },
    Rect { x: Mm, y: Mm, width: Mm, height: Mm },
    Image { x: Mm, y: Mm, width: Mm, height: Mm },
    Table { rows: Vec<Vec<String>>, x: Mm, top: Mm },
    EndPage,
}

#[derive(Default)]
pub(crate) struct RecordingSurface {
    pub ops: Vec<Op>,
    pub info: Option<Info>,
    /// Every `draw_image` call fails when set
    pub fail_images: bool,
    /// `draw_string` fails for text containing this
    pub fail_text_containing: Option<String>,
}

impl RecordingSurface {
    pub fn texts(&self) -> Vec<&str> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                Op::Text { text, .. } | Op::RightText { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn tables(&self) -> Vec<&Vec<Vec<String>>> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                Op::Table { rows, .. } => Some(rows),
                _ => None,
            })
            .collect()
    }

    pub fn page_count(&self) -> usize {
        self.ops.iter().filter(|op| **op == Op::NewPage).count()
    }

    pub fn images(&self) -> usize {
        self.ops
            .iter()
            .filter(|op| matches!(op, Op::Image { .. }))
            .count()
    }

    /// Ops issued while the `n`th page (0-based) was open
    pub fn page_ops(&self, n: usize) -> Vec<&Op> {
        let mut page: Option<usize> = None;
        let mut out = Vec::new();
        for op in self.ops.iter() {
            if *op == Op::NewPage {
                page = Some(page.map_or(0, |p| p + 1));
            }
            if page == Some(n) {
                out.push(op);
            }
        }
        out
    }
}

impl Surface for RecordingSurface {
    fn new_page(&mut self, _size: PageSize) -> Result<(), DocumentError> {
        self.ops.push(Op::NewPage);
        Ok(())
    }

    fn set_font(&mut self, weight: FontWeight, size: Pt) {
        self.ops.push(Op::Font(weight, size));
    }

    fn set_fill_colour(&mut self, colour: Colour) {
        self.ops.push(Op::Fill(colour));
    }

    fn draw_string(&mut self, x: Mm, y: Mm, text: &str) -> Result<(), DocumentError> {
        if let Some(needle) = &self.fail_text_containing {
            if text.contains(needle.as_str()) {
                return Err(DocumentError::Io(std::io::Error::other("text refused")));
            }
        }
        self.ops.push(Op::Text {
            x,
            y,
            text: text.to_string(),
        });
        Ok(())
    }

    fn draw_right_aligned_string(
        &mut self,
        x: Mm,
        y: Mm,
        text: &str,
    ) -> Result<(), DocumentError> {
        self.ops.push(Op::RightText {
            x,
            y,
            text: text.to_string(),
        });
        Ok(())
    }

    fn fill_rect(&mut self, x: Mm, y: Mm, width: Mm, height: Mm) -> Result<(), DocumentError> {
        self.ops.push(Op::Rect {
            x,
            y,
            width,
            height,
        });
        Ok(())
    }

    fn draw_image(
        &mut self,
        _image: Image,
        x: Mm,
        y: Mm,
        width: Mm,
        height: Mm,
        _preserve_aspect: bool,
    ) -> Result<(), DocumentError> {
        if self.fail_images {
            return Err(DocumentError::EmptyImage);
        }
        self.ops.push(Op::Image {
            x,
            y,
            width,
            height,
        });
        Ok(())
    }

    fn measure_and_draw_table(
        &mut self,
        rows: &[Vec<String>],
        x: Mm,
        top: Mm,
        style: &TableStyle,
    ) -> Result<Mm, DocumentError> {
        self.ops.push(Op::Table {
            rows: rows.to_vec(),
            x,
            top,
        });
        Ok(style.table_height(rows.len()))
    }

    fn end_page(&mut self) -> Result<(), DocumentError> {
        self.ops.push(Op::EndPage);
        Ok(())
    }

    fn set_info(&mut self, info: Info) {
        self.info = Some(info);
    }

    fn serialize(self) -> Result<Vec<u8>, DocumentError> {
        Ok(format!("{} ops", self.ops.len()).into_bytes())
    }
}
