use super::{Surface, TableStyle};
use crate::colour::{colours, Colour};
use crate::document::Document;
use crate::font::{FontSet, FontWeight};
use crate::image::Image;
use crate::info::Info;
use crate::page::{ImageLayout, Page, RectLayout, SpanFont, SpanLayout};
use crate::pagesize::PageSize;
use crate::rect::Rect;
use crate::units::*;
use crate::DocumentError;
use std::sync::Arc;

/// A [Surface] that builds a PDF [Document] in memory.
///
/// ```
/// use std::sync::Arc;
/// use cp72_pdf::{pagesize, FontSet, FontWeight, Mm, PdfSurface, Pt, Surface};
///
/// let mut surface = PdfSurface::new(Arc::new(FontSet::builtin()));
/// surface.new_page(pagesize::A4).unwrap();
/// surface.set_font(FontWeight::Bold, Pt(16.0));
/// surface.draw_string(Mm(20.0), Mm(277.0), "MON FREIGHT").unwrap();
/// surface.end_page().unwrap();
///
/// let bytes = surface.serialize().unwrap();
/// assert!(bytes.starts_with(b"%PDF-"));
/// ```
pub struct PdfSurface {
    document: Document,
    page: Option<Page>,
    font: SpanFont,
    fill: Colour,
}

impl PdfSurface {
    pub fn new(fonts: Arc<FontSet>) -> PdfSurface {
        PdfSurface {
            document: Document::new(fonts),
            page: None,
            font: SpanFont {
                weight: FontWeight::Regular,
                size: Pt(10.0),
            },
            fill: Colour::default(),
        }
    }

    /// Pages that have been ended so far
    pub fn pages(&self) -> &[Page] {
        &self.document.pages
    }

    fn open_page(&mut self) -> Result<&mut Page, DocumentError> {
        self.page.as_mut().ok_or(DocumentError::NoOpenPage)
    }

    fn span(&self, text: &str, x: Pt, y: Pt) -> SpanLayout {
        SpanLayout {
            text: text.to_string(),
            font: self.font,
            colour: self.fill,
            coords: (x, y),
        }
    }
}

impl Surface for PdfSurface {
    fn new_page(&mut self, size: PageSize) -> Result<(), DocumentError> {
        if self.page.is_some() {
            return Err(DocumentError::PageAlreadyOpen);
        }
        self.page = Some(Page::new(size));
        Ok(())
    }

    fn set_font(&mut self, weight: FontWeight, size: Pt) {
        self.font = SpanFont { weight, size };
    }

    fn set_fill_colour(&mut self, colour: Colour) {
        self.fill = colour;
    }

    fn draw_string(&mut self, x: Mm, y: Mm, text: &str) -> Result<(), DocumentError> {
        let span = self.span(text, x.into(), y.into());
        self.open_page()?.add_span(span);
        Ok(())
    }

    fn draw_right_aligned_string(
        &mut self,
        x: Mm,
        y: Mm,
        text: &str,
    ) -> Result<(), DocumentError> {
        let width = self
            .document
            .fonts
            .get(self.font.weight)
            .width_of_text(text, self.font.size);
        let x: Pt = x.into();
        let span = self.span(text, x - width, y.into());
        self.open_page()?.add_span(span);
        Ok(())
    }

    fn fill_rect(&mut self, x: Mm, y: Mm, width: Mm, height: Mm) -> Result<(), DocumentError> {
        let colour = self.fill;
        self.open_page()?.add_rect(RectLayout {
            rect: Rect::from_origin_size(x.into(), y.into(), width.into(), height.into()),
            colour,
            line_width: None,
        });
        Ok(())
    }

    fn draw_image(
        &mut self,
        image: Image,
        x: Mm,
        y: Mm,
        width: Mm,
        height: Mm,
        preserve_aspect: bool,
    ) -> Result<(), DocumentError> {
        // check for a page before the image is added to the document
        self.open_page()?;
        let slot = Rect::from_origin_size(x.into(), y.into(), width.into(), height.into());
        let position = if preserve_aspect {
            slot.fit_centred(image.aspect_ratio())
        } else {
            slot
        };
        let image_id = self.document.add_image(image);
        self.open_page()?.add_image(ImageLayout { image_id, position });
        Ok(())
    }

    fn measure_and_draw_table(
        &mut self,
        rows: &[Vec<String>],
        x: Mm,
        top: Mm,
        style: &TableStyle,
    ) -> Result<Mm, DocumentError> {
        let fonts = Arc::clone(&self.document.fonts);
        let page = self.open_page()?;

        let row_height = style.row_height();
        let left: Pt = x.into();
        let top: Pt = top.into();
        let width: Pt = style.total_width().into();

        let column_edges: Vec<Pt> = style
            .column_widths
            .iter()
            .scan(left, |edge, &column| {
                let start = *edge;
                *edge += Pt::from(column);
                Some(start)
            })
            .collect();

        for (r, row) in rows.iter().enumerate() {
            let row_top = top - row_height * r as f32;
            let row_bottom = row_top - row_height;
            let weight = if r == 0 {
                FontWeight::Bold
            } else {
                FontWeight::Regular
            };

            if r == 0 {
                page.add_rect(RectLayout {
                    rect: Rect::from_origin_size(left, row_bottom, width, row_height),
                    colour: style.header_background,
                    line_width: None,
                });
            }

            // centre the capital height of the text within the row
            let cap = fonts.get(weight).cap_height(style.font_size);
            let baseline = row_bottom + (row_height - cap) / 2.0;
            for (cell, &edge) in row.iter().zip(column_edges.iter()) {
                if cell.is_empty() {
                    continue;
                }
                page.add_span(SpanLayout {
                    text: cell.clone(),
                    font: SpanFont {
                        weight,
                        size: style.font_size,
                    },
                    colour: colours::BLACK,
                    coords: (edge + style.horizontal_padding, baseline),
                });
            }

            for (&edge, &column) in column_edges.iter().zip(style.column_widths.iter()) {
                page.add_rect(RectLayout {
                    rect: Rect::from_origin_size(edge, row_bottom, column.into(), row_height),
                    colour: style.grid_colour,
                    line_width: Some(style.grid_width),
                });
            }
        }

        Ok(style.table_height(rows.len()))
    }

    fn end_page(&mut self) -> Result<(), DocumentError> {
        let page = self.page.take().ok_or(DocumentError::NoOpenPage)?;
        self.document.add_page(page);
        Ok(())
    }

    fn set_info(&mut self, info: Info) {
        self.document.set_info(info);
    }

    fn serialize(mut self) -> Result<Vec<u8>, DocumentError> {
        // an unterminated page still belongs to the document
        if self.page.is_some() {
            self.end_page()?;
        }
        let mut bytes: Vec<u8> = Vec::new();
        self.document.write(&mut bytes)?;
        Ok(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pagesize;

    fn surface() -> PdfSurface {
        PdfSurface::new(Arc::new(FontSet::builtin()))
    }

    #[test]
    fn drawing_without_a_page_fails() {
        let mut surface = surface();
        assert!(matches!(
            surface.draw_string(Mm(0.0), Mm(0.0), "x"),
            Err(DocumentError::NoOpenPage)
        ));
        assert!(matches!(surface.end_page(), Err(DocumentError::NoOpenPage)));
    }

    #[test]
    fn pages_cannot_nest() {
        let mut surface = surface();
        surface.new_page(pagesize::A4).unwrap();
        assert!(matches!(
            surface.new_page(pagesize::A4),
            Err(DocumentError::PageAlreadyOpen)
        ));
    }

    #[test]
    fn right_aligned_text_ends_at_x() {
        let mut surface = surface();
        surface.new_page(pagesize::A4).unwrap();
        surface.set_font(FontWeight::Regular, Pt(9.0));
        surface
            .draw_right_aligned_string(Mm(195.0), Mm(10.0), "Page 1")
            .unwrap();
        surface.end_page().unwrap();

        let span = surface.pages()[0].spans().next().unwrap().clone();
        let width = FontSet::builtin().regular.width_of_text("Page 1", Pt(9.0));
        let right: Pt = Mm(195.0).into();
        assert!((*(span.coords.0 + width) - *right).abs() < 1e-3);
    }

    #[test]
    fn table_height_counts_every_row() {
        let mut surface = surface();
        surface.new_page(pagesize::A4).unwrap();
        let style = TableStyle {
            column_widths: vec![Mm(10.0), Mm(60.0)],
            ..TableStyle::default()
        };
        let rows = vec![
            vec!["#".to_string(), "Description".to_string()],
            vec!["1".to_string(), "Books".to_string()],
            vec!["2".to_string(), "Tea".to_string()],
        ];
        let height = surface
            .measure_and_draw_table(&rows, Mm(20.0), Mm(200.0), &style)
            .unwrap();
        // 3 rows of 9 * 1.2 + 6 = 16.8pt
        let expected: Mm = Pt(16.8 * 3.0).into();
        assert!((*height - *expected).abs() < 1e-3);

        surface.end_page().unwrap();
        let texts: Vec<String> = surface.pages()[0].spans().map(|s| s.text.clone()).collect();
        assert_eq!(texts, vec!["#", "Description", "1", "Books", "2", "Tea"]);
    }
}
