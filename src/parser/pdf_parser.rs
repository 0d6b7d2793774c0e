//! PDF document parser producing span layouts.

use std::io::Read;
use std::path::Path;

use crate::error::{Error, Result};
use crate::model::{DocumentLayout, PageLayout};

use super::backend::{LopdfBackend, PageId, PdfBackend};
use super::content::SpanExtractor;
use super::layout::LayoutBuilder;
use super::options::{ErrorMode, ExtractOptions};

/// PDF document parser.
pub struct PdfParser<B: PdfBackend = LopdfBackend> {
    backend: B,
    options: ExtractOptions,
    layout: LayoutBuilder,
}

impl PdfParser<LopdfBackend> {
    /// Open a PDF file.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::open_with_options(path, ExtractOptions::default())
    }

    /// Open a PDF file with custom options.
    pub fn open_with_options<P: AsRef<Path>>(path: P, options: ExtractOptions) -> Result<Self> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(Error::InvalidInput(format!(
                "not a readable file: {}",
                path.display()
            )));
        }

        let backend = LopdfBackend::load_file(path)?;
        Ok(Self::loaded(backend, options))
    }

    /// Parse a PDF from bytes.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        Self::from_bytes_with_options(data, ExtractOptions::default())
    }

    /// Parse a PDF from bytes with custom options.
    pub fn from_bytes_with_options(data: &[u8], options: ExtractOptions) -> Result<Self> {
        let backend = LopdfBackend::load_bytes(data)?;
        Ok(Self::loaded(backend, options))
    }

    /// Parse a PDF from a reader.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let backend = LopdfBackend::load_reader(reader)?;
        Ok(Self::loaded(backend, ExtractOptions::default()))
    }

    fn loaded(backend: LopdfBackend, options: ExtractOptions) -> Self {
        if backend.is_encrypted() {
            log::warn!(
                "PDF {} is encrypted; text may be unreadable",
                backend.version()
            );
        }
        Self::with_backend(backend, options)
    }
}

impl<B: PdfBackend> PdfParser<B> {
    /// Wrap an already loaded backend.
    pub fn with_backend(backend: B, options: ExtractOptions) -> Self {
        Self {
            backend,
            options,
            layout: LayoutBuilder::default(),
        }
    }

    /// Number of pages in the document.
    pub fn page_count(&self) -> u32 {
        self.backend.pages().len() as u32
    }

    /// Extract the span layout of every page.
    pub fn parse(&self) -> Result<DocumentLayout> {
        let mut document = DocumentLayout::new();

        for (page_num, page_id) in self.backend.pages() {
            match self.parse_page(page_num, page_id) {
                Ok(page) => document.add_page(page),
                Err(e) if self.options.error_mode == ErrorMode::Lenient => {
                    log::warn!("Skipping unreadable page {}: {}", page_num, e);
                    let media_box = self.backend.media_box(page_id);
                    document.add_page(PageLayout::new(
                        page_num,
                        media_box.width(),
                        media_box.height(),
                    ));
                }
                Err(e) => return Err(e),
            }
        }

        log::debug!("Parsed {} pages", document.page_count());
        Ok(document)
    }

    fn parse_page(&self, page_num: u32, page_id: PageId) -> Result<PageLayout> {
        let extractor = SpanExtractor::new(&self.backend, self.options.preserve_whitespace);
        let content = extractor.extract_page(page_id)?;
        let media_box = self.backend.media_box(page_id);

        log::trace!(
            "page {}: {} spans, {} images",
            page_num,
            content.spans.len(),
            content.images.len()
        );

        Ok(self
            .layout
            .build_page(page_num, media_box.width(), media_box.height(), content))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::backend::{
        ContentOp, FormXObject, MediaBox, ObjectRef, PdfValue, ResourceScope, XObjectKind,
    };
    use std::collections::{BTreeMap, HashMap};

    /// Two pages; the second has a content stream that fails to decode.
    struct TwoPageBackend;

    impl PdfBackend for TwoPageBackend {
        fn pages(&self) -> BTreeMap<u32, PageId> {
            BTreeMap::from([(1, (10, 0)), (2, (20, 0))])
        }

        fn media_box(&self, _page: PageId) -> MediaBox {
            MediaBox {
                llx: 0.0,
                lly: 0.0,
                urx: 595.0,
                ury: 842.0,
            }
        }

        fn page_content(&self, page: PageId) -> Result<Vec<u8>> {
            Ok(if page.0 == 10 { b"ok".to_vec() } else { b"bad".to_vec() })
        }

        fn decode_content(&self, data: &[u8]) -> Result<Vec<ContentOp>> {
            if data == b"bad" {
                return Err(Error::PdfParse("unexpected token".to_string()));
            }
            Ok(vec![
                ContentOp::new("BT", vec![]),
                ContentOp::new("Tf", vec![PdfValue::Name(b"F1".to_vec()), PdfValue::Integer(20)]),
                ContentOp::new("Td", vec![PdfValue::Integer(72), PdfValue::Integer(760)]),
                ContentOp::new("Tj", vec![PdfValue::Str(b"Quarterly Review".to_vec())]),
                ContentOp::new("ET", vec![]),
            ])
        }

        fn decode_text(&self, _scope: ResourceScope, _font: &[u8], bytes: &[u8]) -> String {
            String::from_utf8_lossy(bytes).into_owned()
        }

        fn xobjects(&self, _scope: ResourceScope) -> HashMap<Vec<u8>, XObjectKind> {
            HashMap::new()
        }

        fn form_xobject(&self, form: ObjectRef) -> Result<FormXObject> {
            Err(Error::MissingObject(format!("form {} {}", form.0, form.1)))
        }
    }

    #[test]
    fn test_strict_mode_aborts_on_bad_page() {
        let parser = PdfParser::with_backend(TwoPageBackend, ExtractOptions::default());
        assert_eq!(parser.page_count(), 2);
        assert!(matches!(parser.parse(), Err(Error::PdfParse(_))));
    }

    #[test]
    fn test_lenient_mode_keeps_empty_page() {
        let parser = PdfParser::with_backend(TwoPageBackend, ExtractOptions::new().lenient());
        let layout = parser.parse().unwrap();

        assert_eq!(layout.page_count(), 2);
        assert_eq!(layout.pages[0].text_lines().count(), 1);
        assert_eq!(layout.pages[0].width, 595.0);
        assert!(layout.pages[1].blocks.is_empty());
        assert_eq!(layout.pages[1].number, 2);
    }

    #[test]
    fn test_open_missing_file() {
        let result = PdfParser::open("/nonexistent/report.pdf");
        assert!(matches!(result, Err(Error::InvalidInput(_))));
    }

    #[test]
    fn test_from_bytes_rejects_garbage() {
        assert!(PdfParser::from_bytes(b"not a pdf at all").is_err());
    }
}
