use crate::{
    font::FontSet,
    image::Image,
    info::Info,
    page::Page,
    refs::{ObjectReferences, RefType},
    DocumentError,
};
use id_arena::{Arena, Id};
use pdf_writer::{Pdf, Ref};
use std::{io::Write, sync::Arc};

/// A document is the main object that stores all the contents of the PDF
/// then renders it out with a call to [Document::write]
pub struct Document {
    pub info: Option<Info>,
    pub pages: Vec<Page>,
    pub images: Arena<Image>,
    pub fonts: Arc<FontSet>,
}

impl Document {
    /// Start an empty document set in the given fonts. The font set is shared, never
    /// copied, so one set can serve any number of documents at once.
    pub fn new(fonts: Arc<FontSet>) -> Document {
        Document {
            info: None,
            pages: Vec::new(),
            images: Arena::new(),
            fonts,
        }
    }

    /// Sets information about the document. If not provided, no information block will be
    /// written to the PDF
    pub fn set_info(&mut self, info: Info) {
        self.info = Some(info);
    }

    /// Add a page to the end of the document, returning its 0-based index
    pub fn add_page(&mut self, page: Page) -> usize {
        self.pages.push(page);
        self.pages.len() - 1
    }

    /// Add an image to the document structure. Images are stored "globally" within the
    /// document, such that any page can refer to them by the returned id.
    pub fn add_image(&mut self, image: Image) -> Id<Image> {
        self.images.alloc(image)
    }

    /// Write the entire document to the writer. The document is rendered in memory
    /// first, then written out in one go.
    pub fn write<W: Write>(self, mut w: W) -> Result<(), DocumentError> {
        let Document {
            info,
            pages,
            images,
            fonts,
        } = self;

        let mut refs = ObjectReferences::new();

        let catalog_id = refs.gen(RefType::Catalog);
        let page_tree_id = refs.gen(RefType::PageTree);

        let mut writer = Pdf::new();
        if let Some(info) = info {
            info.write(&mut refs, &mut writer);
        }

        let page_refs: Vec<Ref> = (0..pages.len())
            .map(|i| refs.gen(RefType::Page(i)))
            .collect();

        writer
            .pages(page_tree_id)
            .count(page_refs.len() as i32)
            .kids(page_refs);

        for (i, font) in fonts.iter() {
            font.write(&mut refs, i, &mut writer);
        }

        for (id, image) in images.iter() {
            image.write(&mut refs, id.index(), &mut writer);
        }

        for (page_index, page) in pages.iter().enumerate() {
            page.write(&mut refs, page_index, &fonts, &images, &mut writer)?;
        }

        writer.catalog(catalog_id).pages(page_tree_id);

        w.write_all(writer.finish().as_slice()).map_err(Into::into)
    }
}
