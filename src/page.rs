use crate::colour::Colour;
use crate::content::render_contents;
use crate::font::{FontSet, FontWeight};
use crate::image::Image;
use crate::pagesize::PageSize;
use crate::rect::Rect;
use crate::refs::{ObjectReferences, RefType};
use crate::units::*;
use crate::DocumentError;
use id_arena::{Arena, Id};
use pdf_writer::{Finish, Name, Pdf};

#[derive(Copy, Clone, PartialEq, Debug)]
pub struct SpanFont {
    pub weight: FontWeight,
    pub size: Pt,
}

/// A run of text set in a single font and colour, starting at a baseline coordinate
#[derive(Clone, PartialEq, Debug)]
pub struct SpanLayout {
    pub text: String,
    pub font: SpanFont,
    pub colour: Colour,
    pub coords: (Pt, Pt),
}

#[derive(Clone, PartialEq, Debug)]
pub struct ImageLayout {
    pub image_id: Id<Image>,
    pub position: Rect,
}

/// A rectangle, either filled with `colour` or outlined with a `line_width` stroke
#[derive(Clone, PartialEq, Debug)]
pub struct RectLayout {
    pub rect: Rect,
    pub colour: Colour,
    pub line_width: Option<Pt>,
}

#[derive(Clone, PartialEq, Debug)]
pub enum PageContents {
    Text(Vec<SpanLayout>),
    Image(ImageLayout),
    Rect(RectLayout),
}

/// A single page of the document and everything drawn on it, in painting order
pub struct Page {
    /// The size of the page
    pub media_box: Rect,
    pub contents: Vec<PageContents>,
}

impl Page {
    pub fn new(size: PageSize) -> Page {
        let (width, height) = size;
        Page {
            media_box: Rect {
                x1: Pt(0.0),
                y1: Pt(0.0),
                x2: width.into(),
                y2: height.into(),
            },
            contents: Vec::default(),
        }
    }

    pub fn add_span(&mut self, span: SpanLayout) {
        self.contents.push(PageContents::Text(vec![span]));
    }

    pub fn add_image(&mut self, image: ImageLayout) {
        self.contents.push(PageContents::Image(image));
    }

    pub fn add_rect(&mut self, rect: RectLayout) {
        self.contents.push(PageContents::Rect(rect));
    }

    /// All text drawn on the page, in painting order
    pub fn spans(&self) -> impl Iterator<Item = &SpanLayout> + '_ {
        self.contents
            .iter()
            .filter_map(|content| match content {
                PageContents::Text(spans) => Some(spans.iter()),
                _ => None,
            })
            .flatten()
    }

    pub(crate) fn write(
        &self,
        refs: &mut ObjectReferences,
        page_index: usize,
        fonts: &FontSet,
        images: &Arena<Image>,
        writer: &mut Pdf,
    ) -> Result<(), DocumentError> {
        let id = refs
            .get(RefType::Page(page_index))
            .expect("page refs are generated before pages are written");
        let page_tree_id = refs
            .get(RefType::PageTree)
            .expect("page tree ref is generated first");
        let content_id = refs.gen(RefType::ContentForPage(page_index));

        let mut page = writer.page(id);
        page.media_box(self.media_box.into());
        page.parent(page_tree_id);

        let mut resources = page.resources();
        let mut resource_fonts = resources.fonts();
        for (i, _) in fonts.iter() {
            if let Some(font_ref) = refs.get(RefType::Font(i)) {
                resource_fonts.pair(Name(format!("F{i}").as_bytes()), font_ref);
            }
        }
        resource_fonts.finish();
        let mut resource_xobjects = resources.x_objects();
        for (i, _) in images.iter() {
            if let Some(image_ref) = refs.get(RefType::Image(i.index())) {
                resource_xobjects.pair(Name(format!("I{}", i.index()).as_bytes()), image_ref);
            }
        }
        resource_xobjects.finish();
        resources.finish();

        page.contents(content_id);
        page.finish();

        let rendered = render_contents(&self.contents, fonts)?;
        writer.stream(content_id, rendered.as_slice());
        Ok(())
    }
}
