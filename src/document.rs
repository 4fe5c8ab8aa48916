use crate::{
    font::{FontFamily, FontStyle},
    image::Image,
    info::Info,
    page::Page,
    refs::{ObjectReferences, RefType},
    PDFError,
};
use id_arena::{Arena, Id};
use pdf_writer::{Pdf, Ref};
use std::io::Write;

/// A document stores all the pages, fonts and images of the PDF and renders them out
/// with a call to [Document::write]
pub struct Document {
    pub info: Option<Info>,
    pub pages: Arena<Page>,
    pub page_order: Vec<Id<Page>>,
    /// Every page's text is set in one of these two faces
    pub fonts: FontFamily,
    pub images: Arena<Image>,
}

impl Document {
    pub fn new(fonts: FontFamily) -> Document {
        Document {
            info: None,
            pages: Arena::new(),
            page_order: Vec::new(),
            fonts,
            images: Arena::new(),
        }
    }

    /// Sets information about the document. If not provided, no information block will be
    /// written to the PDF
    pub fn set_info(&mut self, info: Info) {
        self.info = Some(info);
    }

    /// Add a page to the end of the document, returning its id
    pub fn add_page(&mut self, page: Page) -> Id<Page> {
        let id = self.pages.alloc(page);
        self.page_order.push(id);
        id
    }

    /// Add an image to the document structure. Images are stored "globally" within the
    /// document, such that any page can re-use an image by referring to its id.
    pub fn add_image(&mut self, image: Image) -> Id<Image> {
        self.images.alloc(image)
    }

    pub fn page_count(&self) -> usize {
        self.page_order.len()
    }

    /// Write the entire document to the writer. Note: although this can write to arbitrary
    /// streams, the entire document is "rendered" in memory first.
    pub fn write<W: Write>(self, mut w: W) -> Result<(), PDFError> {
        let Document {
            info,
            pages,
            page_order,
            fonts,
            images,
        } = self;

        let mut refs = ObjectReferences::new();

        let catalog_id = refs.gen(RefType::Catalog);
        let page_tree_id = refs.gen(RefType::PageTree);

        let mut writer = Pdf::new();
        if let Some(info) = info {
            info.write(&mut refs, &mut writer);
        }

        let page_refs: Vec<Ref> = (0..page_order.len())
            .map(|i| refs.gen(RefType::Page(i)))
            .collect();

        writer
            .pages(page_tree_id)
            .count(page_refs.len() as i32)
            .kids(page_refs.iter().copied());

        for style in FontStyle::ALL {
            fonts
                .face(style)
                .write(&mut refs, style.resource_index(), &mut writer);
        }

        for (id, image) in images.iter() {
            image.write(&mut refs, id.index(), &mut writer);
        }

        for (page_index, (id, page_ref)) in page_order.iter().zip(page_refs).enumerate() {
            let page = pages.get(*id).ok_or(PDFError::PageMissing)?;
            page.write(&mut refs, page_index, page_ref, &fonts, &images, &mut writer)?;
        }

        writer.catalog(catalog_id).pages(page_tree_id);

        w.write_all(writer.finish().as_slice())?;
        Ok(())
    }
}
