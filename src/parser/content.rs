//! Content stream interpretation into positioned spans.
//!
//! Tracks just enough graphics and text state (CTM, text and line matrices,
//! font, size, leading) to place every shown string on the page. Glyph
//! widths are estimated rather than read from font programs.

use crate::error::Result;
use crate::model::{BBox, Span};

use super::backend::{
    ContentOp, MediaBox, ObjectRef, PageId, PdfBackend, PdfValue, ResourceScope, XObjectKind,
};

/// Average glyph advance as a fraction of the font size.
const AVG_CHAR_WIDTH: f32 = 0.5;
/// Ascender height as a fraction of the font size.
const ASCENT: f32 = 0.8;
/// Descender depth as a fraction of the font size.
const DESCENT: f32 = 0.2;
/// TJ adjustments beyond this (in 1/1000 em) read as a word break.
const TJ_SPACE_THRESHOLD: f32 = 200.0;
/// Deepest chain of form XObjects followed from a page.
const MAX_FORM_DEPTH: usize = 8;

/// Spans and image regions of one page, in page space (origin top-left).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageContent {
    /// Shown text in content stream order
    pub spans: Vec<Span>,
    /// Painted image XObjects
    pub images: Vec<BBox>,
}

/// Affine transform `[a b c d e f]` as used throughout PDF.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Matrix {
    a: f32,
    b: f32,
    c: f32,
    d: f32,
    e: f32,
    f: f32,
}

impl Matrix {
    const IDENTITY: Matrix = Matrix {
        a: 1.0,
        b: 0.0,
        c: 0.0,
        d: 1.0,
        e: 0.0,
        f: 0.0,
    };

    fn new(a: f32, b: f32, c: f32, d: f32, e: f32, f: f32) -> Self {
        Self { a, b, c, d, e, f }
    }

    fn translation(tx: f32, ty: f32) -> Self {
        Self::new(1.0, 0.0, 0.0, 1.0, tx, ty)
    }

    /// `self × other`: apply `self` first, then `other`.
    fn then(&self, other: &Matrix) -> Matrix {
        Matrix {
            a: self.a * other.a + self.b * other.c,
            b: self.a * other.b + self.b * other.d,
            c: self.c * other.a + self.d * other.c,
            d: self.c * other.b + self.d * other.d,
            e: self.e * other.a + self.f * other.c + other.e,
            f: self.e * other.b + self.f * other.d + other.f,
        }
    }

    fn apply(&self, x: f32, y: f32) -> (f32, f32) {
        (
            x * self.a + y * self.c + self.e,
            x * self.b + y * self.d + self.f,
        )
    }

    /// Length of the transformed unit x vector.
    fn x_scale(&self) -> f32 {
        (self.a * self.a + self.b * self.b).sqrt()
    }

    /// Length of the transformed unit y vector.
    fn y_scale(&self) -> f32 {
        (self.c * self.c + self.d * self.d).sqrt()
    }

    fn from_array([a, b, c, d, e, f]: [f32; 6]) -> Self {
        Self::new(a, b, c, d, e, f)
    }

    fn from_operands(op: &ContentOp) -> Option<Matrix> {
        Some(Matrix::new(
            op.number(0)?,
            op.number(1)?,
            op.number(2)?,
            op.number(3)?,
            op.number(4)?,
            op.number(5)?,
        ))
    }
}

/// Text object state (PDF 32000 §9.3, §9.4).
#[derive(Debug, Clone)]
struct TextState {
    tm: Matrix,
    tlm: Matrix,
    font: Vec<u8>,
    size: f32,
    leading: f32,
}

impl Default for TextState {
    fn default() -> Self {
        Self {
            tm: Matrix::IDENTITY,
            tlm: Matrix::IDENTITY,
            font: Vec::new(),
            size: 12.0,
            leading: 0.0,
        }
    }
}

impl TextState {
    fn move_line(&mut self, tx: f32, ty: f32) {
        self.tlm = Matrix::translation(tx, ty).then(&self.tlm);
        self.tm = self.tlm;
    }

    fn next_line(&mut self) {
        self.move_line(0.0, -self.leading);
    }

    fn advance(&mut self, tx: f32) {
        self.tm = Matrix::translation(tx, 0.0).then(&self.tm);
    }
}

/// Interprets a page's content stream into spans.
pub struct SpanExtractor<'a, B: PdfBackend + ?Sized> {
    backend: &'a B,
    preserve_whitespace: bool,
}

impl<'a, B: PdfBackend + ?Sized> SpanExtractor<'a, B> {
    /// Create an extractor over a backend.
    pub fn new(backend: &'a B, preserve_whitespace: bool) -> Self {
        Self {
            backend,
            preserve_whitespace,
        }
    }

    /// Decode and interpret one page, following the form XObjects it paints.
    pub fn extract_page(&self, page: PageId) -> Result<PageContent> {
        let data = self.backend.page_content(page)?;
        if data.is_empty() {
            return Ok(PageContent::default());
        }
        let ops = self.backend.decode_content(&data)?;
        let media_box = self.backend.media_box(page);

        let mut out = PageContent::default();
        let mut forms = Vec::new();
        self.interpret(
            ResourceScope::Page(page),
            &ops,
            Matrix::IDENTITY,
            TextState::default(),
            media_box,
            &mut forms,
            &mut out,
        )?;
        Ok(out)
    }

    /// Run the operator loop over one content stream.
    ///
    /// `forms` holds the form XObjects currently being painted, outermost first.
    #[allow(clippy::too_many_arguments)]
    fn interpret(
        &self,
        scope: ResourceScope,
        ops: &[ContentOp],
        mut ctm: Matrix,
        mut text: TextState,
        media_box: MediaBox,
        forms: &mut Vec<ObjectRef>,
        out: &mut PageContent,
    ) -> Result<()> {
        let xobjects = self.backend.xobjects(scope);
        let mut ctm_stack: Vec<Matrix> = Vec::new();
        let mut in_text = false;

        for op in ops {
            match op.operator.as_str() {
                "q" => ctm_stack.push(ctm),
                "Q" => {
                    if let Some(saved) = ctm_stack.pop() {
                        ctm = saved;
                    }
                }
                "cm" => {
                    if let Some(m) = Matrix::from_operands(op) {
                        ctm = m.then(&ctm);
                    }
                }
                "BT" => {
                    in_text = true;
                    text.tm = Matrix::IDENTITY;
                    text.tlm = Matrix::IDENTITY;
                }
                "ET" => in_text = false,
                "Tf" => {
                    if let Some(PdfValue::Name(name)) = op.operands.first() {
                        text.font = name.clone();
                    }
                    if let Some(size) = op.number(1) {
                        text.size = size;
                    }
                }
                "TL" => {
                    if let Some(leading) = op.number(0) {
                        text.leading = leading;
                    }
                }
                "Td" => {
                    if let (Some(tx), Some(ty)) = (op.number(0), op.number(1)) {
                        text.move_line(tx, ty);
                    }
                }
                "TD" => {
                    if let (Some(tx), Some(ty)) = (op.number(0), op.number(1)) {
                        text.leading = -ty;
                        text.move_line(tx, ty);
                    }
                }
                "Tm" => {
                    if let Some(m) = Matrix::from_operands(op) {
                        text.tm = m;
                        text.tlm = m;
                    }
                }
                "T*" => text.next_line(),
                "Tj" | "TJ" | "'" | "\"" => {
                    if op.operator == "'" || op.operator == "\"" {
                        text.next_line();
                    }
                    if !in_text {
                        continue;
                    }
                    let operand = match op.operator.as_str() {
                        "\"" => op.operands.get(2),
                        _ => op.operands.first(),
                    };
                    if let Some(operand) = operand {
                        let (shown, advance) = self.decode_shown(scope, &text, operand);
                        self.push_span(out, &text, &ctm, media_box, shown, advance);
                        text.advance(advance);
                    }
                }
                "Do" => {
                    let Some(PdfValue::Name(name)) = op.operands.first() else {
                        continue;
                    };
                    match xobjects.get(name) {
                        Some(XObjectKind::Image) => out.images.push(image_bbox(&ctm, media_box)),
                        Some(&XObjectKind::Form(form)) => {
                            self.paint_form(scope, form, ctm, &text, media_box, forms, out)?
                        }
                        None => {}
                    }
                }
                _ => {}
            }
        }

        Ok(())
    }

    /// Interpret a form XObject in place, with its matrix applied on top of the CTM.
    #[allow(clippy::too_many_arguments)]
    fn paint_form(
        &self,
        scope: ResourceScope,
        form: ObjectRef,
        ctm: Matrix,
        text: &TextState,
        media_box: MediaBox,
        forms: &mut Vec<ObjectRef>,
        out: &mut PageContent,
    ) -> Result<()> {
        if forms.contains(&form) || forms.len() >= MAX_FORM_DEPTH {
            log::warn!(
                "Not following form XObject {} {}: nested {} deep",
                form.0,
                form.1,
                forms.len()
            );
            return Ok(());
        }

        let xobject = self.backend.form_xobject(form)?;
        if xobject.content.is_empty() {
            return Ok(());
        }
        let ops = self.backend.decode_content(&xobject.content)?;
        let form_ctm = Matrix::from_array(xobject.matrix).then(&ctm);

        forms.push(form);
        let result = self.interpret(
            ResourceScope::Form {
                form,
                page: scope.page(),
            },
            &ops,
            form_ctm,
            text.clone(),
            media_box,
            forms,
            out,
        );
        forms.pop();
        result
    }

    /// Decode a Tj string or TJ array; returns the text and its advance in
    /// unscaled text space.
    fn decode_shown(
        &self,
        scope: ResourceScope,
        text: &TextState,
        operand: &PdfValue,
    ) -> (String, f32) {
        match operand {
            PdfValue::Str(bytes) => {
                let decoded = self.backend.decode_text(scope, &text.font, bytes);
                let advance = decoded.chars().count() as f32 * AVG_CHAR_WIDTH * text.size;
                (decoded, advance)
            }
            PdfValue::Array(items) => {
                let mut combined = String::new();
                let mut advance = 0.0;
                for item in items {
                    match item {
                        PdfValue::Str(bytes) => {
                            let decoded = self.backend.decode_text(scope, &text.font, bytes);
                            advance += decoded.chars().count() as f32 * AVG_CHAR_WIDTH * text.size;
                            combined.push_str(&decoded);
                        }
                        other => {
                            if let Some(n) = other.as_number() {
                                // Negative values move the pen to the right
                                let adjustment = -n;
                                advance += adjustment / 1000.0 * text.size;
                                if adjustment > TJ_SPACE_THRESHOLD
                                    && !combined.is_empty()
                                    && !combined.ends_with(char::is_whitespace)
                                    && !combined.chars().last().is_some_and(is_spaceless_script_char)
                                {
                                    combined.push(' ');
                                }
                            }
                        }
                    }
                }
                (combined, advance)
            }
            _ => (String::new(), 0.0),
        }
    }

    fn push_span(
        &self,
        out: &mut PageContent,
        text: &TextState,
        ctm: &Matrix,
        media_box: MediaBox,
        shown: String,
        advance: f32,
    ) {
        if shown.is_empty() || (!self.preserve_whitespace && shown.trim().is_empty()) {
            return;
        }

        let trm = text.tm.then(ctm);
        let size = round_size(text.size * trm.y_scale());
        let (x, y) = trm.apply(0.0, 0.0);
        let width = advance * trm.x_scale();

        let x0 = x - media_box.llx;
        let baseline = media_box.ury - y;
        out.spans.push(Span::new(
            shown,
            size,
            BBox::new(x0, baseline - size * ASCENT, x0 + width, baseline + size * DESCENT),
        ));
    }
}

/// Page-space box of the unit square under the CTM.
fn image_bbox(ctm: &Matrix, media_box: MediaBox) -> BBox {
    let corners = [
        ctm.apply(0.0, 0.0),
        ctm.apply(1.0, 0.0),
        ctm.apply(0.0, 1.0),
        ctm.apply(1.0, 1.0),
    ];
    let (mut min_x, mut min_y) = (f32::MAX, f32::MAX);
    let (mut max_x, mut max_y) = (f32::MIN, f32::MIN);
    for (x, y) in corners {
        min_x = min_x.min(x);
        max_x = max_x.max(x);
        min_y = min_y.min(y);
        max_y = max_y.max(y);
    }
    BBox::new(
        min_x - media_box.llx,
        media_box.ury - max_y,
        max_x - media_box.llx,
        media_box.ury - min_y,
    )
}

/// Drop float noise from matrix products so 24pt stays 24pt after truncation.
fn round_size(size: f32) -> f32 {
    (size * 1000.0).round() / 1000.0
}

/// Check if character is from a script that doesn't use word spaces.
/// Chinese and Japanese don't use spaces between words, but Korean does.
fn is_spaceless_script_char(c: char) -> bool {
    let code = c as u32;

    // CJK Unified Ideographs and Extension A
    (0x4E00..=0x9FFF).contains(&code)
    || (0x3400..=0x4DBF).contains(&code)
    // Extensions B-F
    || (0x20000..=0x2EBEF).contains(&code)
    // Hiragana, Katakana
    || (0x3040..=0x30FF).contains(&code)
    // CJK Symbols and Punctuation
    || (0x3000..=0x303F).contains(&code)
}
