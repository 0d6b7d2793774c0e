//! PDF backend abstraction layer.
//!
//! Provides a trait-based interface for PDF operations, isolating
//! the concrete PDF library (lopdf) from span extraction.

use std::collections::{BTreeMap, HashMap};

use crate::error::{Error, Result};

/// Indirect object identifier: (object number, generation number).
pub type ObjectRef = (u32, u16);

/// Page identifier.
pub type PageId = ObjectRef;

/// The resource dictionary a content stream is painted with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceScope {
    /// A page's own or inherited resources
    Page(PageId),
    /// A form XObject's resources, falling back to its page's
    Form { form: ObjectRef, page: PageId },
}

impl ResourceScope {
    /// The page this scope is painted on.
    pub fn page(&self) -> PageId {
        match *self {
            ResourceScope::Page(page) => page,
            ResourceScope::Form { page, .. } => page,
        }
    }
}

/// What a `Do` operator paints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum XObjectKind {
    Image,
    Form(ObjectRef),
}

/// Content and placement of a form XObject.
#[derive(Debug, Clone, PartialEq)]
pub struct FormXObject {
    /// Decoded content stream
    pub content: Vec<u8>,
    /// Form space to user space, `[a b c d e f]`
    pub matrix: [f32; 6],
}

/// Page boundaries in PDF user space (origin bottom-left).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MediaBox {
    pub llx: f32,
    pub lly: f32,
    pub urx: f32,
    pub ury: f32,
}

impl MediaBox {
    /// US Letter, used when a page declares no usable MediaBox.
    pub const LETTER: MediaBox = MediaBox {
        llx: 0.0,
        lly: 0.0,
        urx: 612.0,
        ury: 792.0,
    };

    /// Page width.
    pub fn width(&self) -> f32 {
        self.urx - self.llx
    }

    /// Page height.
    pub fn height(&self) -> f32 {
        self.ury - self.lly
    }
}

/// A value from a PDF content stream operand.
#[derive(Debug, Clone, PartialEq)]
pub enum PdfValue {
    Integer(i64),
    Real(f32),
    Name(Vec<u8>),
    Str(Vec<u8>),
    Array(Vec<PdfValue>),
    Other,
}

impl PdfValue {
    /// Numeric value, if this is a number.
    pub fn as_number(&self) -> Option<f32> {
        match self {
            PdfValue::Integer(i) => Some(*i as f32),
            PdfValue::Real(r) => Some(*r),
            _ => None,
        }
    }
}

/// A single operation from a PDF content stream.
#[derive(Debug, Clone, PartialEq)]
pub struct ContentOp {
    pub operator: String,
    pub operands: Vec<PdfValue>,
}

impl ContentOp {
    /// Create an operation.
    pub fn new(operator: impl Into<String>, operands: Vec<PdfValue>) -> Self {
        Self {
            operator: operator.into(),
            operands,
        }
    }

    /// Numeric operand at `idx`.
    pub fn number(&self, idx: usize) -> Option<f32> {
        self.operands.get(idx).and_then(PdfValue::as_number)
    }
}

/// Abstract interface for PDF document access.
///
/// Implementations provide page enumeration, page geometry, content stream
/// decoding and text decoding, without exposing any concrete PDF library types.
pub trait PdfBackend {
    /// Return all pages as (page_number → PageId).
    fn pages(&self) -> BTreeMap<u32, PageId>;

    /// Return the page's MediaBox, falling back to Letter.
    fn media_box(&self, page: PageId) -> MediaBox;

    /// Return the raw (decompressed) content stream bytes for a page.
    fn page_content(&self, page: PageId) -> Result<Vec<u8>>;

    /// Parse raw content stream bytes into a sequence of operations.
    fn decode_content(&self, data: &[u8]) -> Result<Vec<ContentOp>>;

    /// Decode a text byte sequence using the font's encoding in `scope`.
    /// Falls back to simple decoding if the font or encoding is unavailable.
    fn decode_text(&self, scope: ResourceScope, font_name: &[u8], bytes: &[u8]) -> String;

    /// XObjects that `Do` can paint in `scope`, by resource name.
    fn xobjects(&self, scope: ResourceScope) -> HashMap<Vec<u8>, XObjectKind>;

    /// Load a form XObject's content stream and matrix.
    fn form_xobject(&self, form: ObjectRef) -> Result<FormXObject>;
}

/// Simple text decoding fallback when no encoding is available.
pub fn decode_text_simple(bytes: &[u8]) -> String {
    if bytes.len() >= 2 && bytes[0] == 0xFE && bytes[1] == 0xFF {
        let utf16: Vec<u16> = bytes[2..]
            .chunks_exact(2)
            .map(|c| u16::from_be_bytes([c[0], c[1]]))
            .collect();
        return String::from_utf16_lossy(&utf16);
    }

    if let Ok(s) = std::str::from_utf8(bytes) {
        return s.to_string();
    }

    // Latin-1
    bytes.iter().map(|&b| b as char).collect()
}

// ---------------------------------------------------------------------------
// LopdfBackend: concrete implementation backed by lopdf
// ---------------------------------------------------------------------------

use lopdf::{Dictionary, Document as LopdfDocument, Object};

/// How far up the page tree inherited attributes are looked for.
const MAX_INHERIT_DEPTH: usize = 32;

/// Concrete [`PdfBackend`] backed by `lopdf::Document`.
pub struct LopdfBackend {
    doc: LopdfDocument,
}

impl LopdfBackend {
    /// Load from a file path.
    pub fn load_file<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let doc = LopdfDocument::load(path)?;
        Ok(Self { doc })
    }

    /// Load from an in-memory byte slice.
    pub fn load_bytes(data: &[u8]) -> Result<Self> {
        let doc = LopdfDocument::load_mem(data)?;
        Ok(Self { doc })
    }

    /// Load from a reader.
    pub fn load_reader<R: std::io::Read>(mut reader: R) -> Result<Self> {
        let mut data = Vec::new();
        reader.read_to_end(&mut data)?;
        Self::load_bytes(&data)
    }

    /// Check if the document is encrypted.
    pub fn is_encrypted(&self) -> bool {
        self.doc.is_encrypted()
    }

    /// Get PDF version string.
    pub fn version(&self) -> String {
        self.doc.version.to_string()
    }

    /// Look up a page attribute, following `/Parent` for inherited keys.
    fn inherited<'a>(&'a self, page: PageId, key: &[u8]) -> Option<&'a Object> {
        let mut dict = self.doc.get_dictionary(page).ok()?;
        for _ in 0..MAX_INHERIT_DEPTH {
            if let Ok(value) = dict.get(key) {
                return Some(value);
            }
            let parent = dict.get(b"Parent").ok()?.as_reference().ok()?;
            dict = self.doc.get_dictionary(parent).ok()?;
        }
        None
    }

    /// Resolve an object that may be a reference to a dictionary.
    fn resolve_dict<'a>(&'a self, obj: &'a Object) -> Option<&'a Dictionary> {
        match obj {
            Object::Reference(r) => self.doc.get_dictionary(*r).ok(),
            Object::Dictionary(d) => Some(d),
            _ => None,
        }
    }

    fn number(&self, obj: &Object) -> Option<f32> {
        match obj {
            Object::Integer(i) => Some(*i as f32),
            Object::Real(r) => Some(*r),
            Object::Reference(r) => self.doc.get_object(*r).ok().and_then(|o| self.number(o)),
            _ => None,
        }
    }

    /// Resource dictionary in effect for `scope`.
    fn resources(&self, scope: ResourceScope) -> Option<&Dictionary> {
        let page_resources = move |page: PageId| {
            self.inherited(page, b"Resources")
                .and_then(|res| self.resolve_dict(res))
        };

        match scope {
            ResourceScope::Page(page) => page_resources(page),
            ResourceScope::Form { form, page } => self
                .doc
                .get_object(form)
                .and_then(Object::as_stream)
                .ok()
                .and_then(|stream| stream.dict.get(b"Resources").ok())
                .and_then(|res| self.resolve_dict(res))
                .or_else(|| page_resources(page)),
        }
    }

    /// Font dictionary named `font_name` in `scope`.
    fn font(&self, scope: ResourceScope, font_name: &[u8]) -> Option<&Dictionary> {
        match scope {
            ResourceScope::Page(page) => self.doc.get_page_fonts(page).ok()?.get(font_name).copied(),
            ResourceScope::Form { page, .. } => self
                .resources(scope)
                .and_then(|res| res.get(b"Font").ok())
                .and_then(|fonts| self.resolve_dict(fonts))
                .and_then(|fonts| fonts.get(font_name).ok())
                .and_then(|font| self.resolve_dict(font))
                .or_else(|| self.font(ResourceScope::Page(page), font_name)),
        }
    }
}

impl PdfBackend for LopdfBackend {
    fn pages(&self) -> BTreeMap<u32, PageId> {
        self.doc.get_pages()
    }

    fn media_box(&self, page: PageId) -> MediaBox {
        let values: Option<Vec<f32>> = self
            .inherited(page, b"MediaBox")
            .and_then(|obj| match obj {
                Object::Reference(r) => self.doc.get_object(*r).ok(),
                other => Some(other),
            })
            .and_then(|obj| obj.as_array().ok())
            .map(|arr| arr.iter().filter_map(|o| self.number(o)).collect());

        match values.as_deref() {
            Some([x0, y0, x1, y1]) if x1 != x0 && y1 != y0 => MediaBox {
                llx: x0.min(*x1),
                lly: y0.min(*y1),
                urx: x0.max(*x1),
                ury: y0.max(*y1),
            },
            _ => MediaBox::LETTER,
        }
    }

    fn page_content(&self, page_id: PageId) -> Result<Vec<u8>> {
        if self.doc.get_dictionary(page_id).is_err() {
            return Err(Error::MissingObject(format!(
                "page object {} {}",
                page_id.0, page_id.1
            )));
        }

        // Concatenates every stream of /Contents; a page without one is blank
        self.doc
            .get_page_content(page_id)
            .map_err(|e| Error::Corrupted(format!("cannot read page content: {}", e)))
    }

    fn decode_content(&self, data: &[u8]) -> Result<Vec<ContentOp>> {
        let content =
            lopdf::content::Content::decode(data).map_err(|e| Error::PdfParse(e.to_string()))?;

        Ok(content
            .operations
            .into_iter()
            .map(|op| ContentOp {
                operator: op.operator,
                operands: op.operands.iter().map(convert_object).collect(),
            })
            .collect())
    }

    fn decode_text(&self, scope: ResourceScope, font_name: &[u8], bytes: &[u8]) -> String {
        // Encoding tables and ToUnicode CMaps as lopdf resolves them
        let encoding = self
            .font(scope, font_name)
            .and_then(|font| font.get_font_encoding(&self.doc).ok());

        match encoding {
            Some(enc) => LopdfDocument::decode_text(&enc, bytes).unwrap_or_else(|e| {
                log::debug!("cannot decode text in font {:?}: {}", String::from_utf8_lossy(font_name), e);
                decode_text_simple(bytes)
            }),
            None => decode_text_simple(bytes),
        }
    }

    fn xobjects(&self, scope: ResourceScope) -> HashMap<Vec<u8>, XObjectKind> {
        let mut kinds = HashMap::new();

        let xobjects = self
            .resources(scope)
            .and_then(|res| res.get(b"XObject").ok())
            .and_then(|xobj| self.resolve_dict(xobj));

        if let Some(xobjects) = xobjects {
            for (name, obj) in xobjects.iter() {
                let Ok(obj_ref) = obj.as_reference() else {
                    continue;
                };
                if let Ok(Object::Stream(stream)) = self.doc.get_object(obj_ref) {
                    let kind = match stream.dict.get(b"Subtype").and_then(Object::as_name) {
                        Ok(b"Image") => XObjectKind::Image,
                        Ok(b"Form") => XObjectKind::Form(obj_ref),
                        _ => continue,
                    };
                    kinds.insert(name.clone(), kind);
                }
            }
        }

        kinds
    }

    fn form_xobject(&self, form: ObjectRef) -> Result<FormXObject> {
        let stream = self
            .doc
            .get_object(form)
            .and_then(Object::as_stream)
            .map_err(|_| Error::MissingObject(format!("form xobject {} {}", form.0, form.1)))?;

        // Unfiltered streams are used as stored
        let content = stream
            .decompressed_content()
            .unwrap_or_else(|_| stream.content.clone());

        let values: Option<Vec<f32>> = stream
            .dict
            .get(b"Matrix")
            .and_then(Object::as_array)
            .ok()
            .map(|arr| arr.iter().filter_map(|o| self.number(o)).collect());
        let matrix = match values.as_deref() {
            Some(&[a, b, c, d, e, f]) => [a, b, c, d, e, f],
            _ => [1.0, 0.0, 0.0, 1.0, 0.0, 0.0],
        };

        Ok(FormXObject { content, matrix })
    }
}

/// Convert a `lopdf::Object` to [`PdfValue`].
fn convert_object(obj: &Object) -> PdfValue {
    match obj {
        Object::Integer(i) => PdfValue::Integer(*i),
        Object::Real(r) => PdfValue::Real(*r),
        Object::Name(n) => PdfValue::Name(n.clone()),
        Object::String(b, _) => PdfValue::Str(b.clone()),
        Object::Array(arr) => PdfValue::Array(arr.iter().map(convert_object).collect()),
        _ => PdfValue::Other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_text_simple_utf8() {
        assert_eq!(decode_text_simple(b"Scope"), "Scope");
    }

    #[test]
    fn test_decode_text_simple_latin1() {
        // 0xE9 = 'é' in Latin-1
        let bytes = [0x52, 0xE9, 0x73, 0x75, 0x6D, 0xE9];
        assert_eq!(decode_text_simple(&bytes), "Résumé");
    }

    #[test]
    fn test_decode_text_simple_utf16be() {
        let bytes = [0xFE, 0xFF, 0x00, 0x48, 0x00, 0x31];
        assert_eq!(decode_text_simple(&bytes), "H1");
    }

    #[test]
    fn test_operand_numbers() {
        let op = ContentOp::new(
            "Td",
            vec![PdfValue::Integer(72), PdfValue::Real(-14.5), PdfValue::Other],
        );
        assert_eq!(op.number(0), Some(72.0));
        assert_eq!(op.number(1), Some(-14.5));
        assert_eq!(op.number(2), None);
        assert_eq!(op.number(3), None);
    }

    #[test]
    fn test_media_box_dimensions() {
        assert_eq!(MediaBox::LETTER.width(), 612.0);
        assert_eq!(MediaBox::LETTER.height(), 792.0);
    }

    #[test]
    fn test_convert_nested_array() {
        let obj = Object::Array(vec![
            Object::string_literal("ab"),
            Object::Integer(-250),
            Object::Real(1.5),
            Object::Null,
        ]);
        assert_eq!(
            convert_object(&obj),
            PdfValue::Array(vec![
                PdfValue::Str(b"ab".to_vec()),
                PdfValue::Integer(-250),
                PdfValue::Real(1.5),
                PdfValue::Other,
            ])
        );
    }
}
