//! Shared fixtures: small PDFs assembled with lopdf.

#![allow(dead_code)]

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Dictionary, Document, Object, Stream};

/// One line of text placed with `Td` in PDF user space (origin bottom-left).
pub struct TextRun {
    pub text: &'static str,
    pub size: i64,
    pub x: i64,
    pub y: i64,
}

pub fn run(text: &'static str, size: i64, x: i64, y: i64) -> TextRun {
    TextRun { text, size, x, y }
}

fn content_for(runs: &[TextRun]) -> Content {
    let mut operations = Vec::new();
    for r in runs {
        operations.push(Operation::new("BT", vec![]));
        operations.push(Operation::new("Tf", vec!["F1".into(), r.size.into()]));
        operations.push(Operation::new("Td", vec![r.x.into(), r.y.into()]));
        operations.push(Operation::new("Tj", vec![Object::string_literal(r.text)]));
        operations.push(Operation::new("ET", vec![]));
    }
    Content { operations }
}

/// Build an A4 PDF with one page per entry of `pages`.
pub fn build_pdf(pages: &[Vec<TextRun>]) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            "F1" => font_id,
        },
    });

    let mut kids: Vec<Object> = Vec::new();
    for runs in pages {
        let encoded = content_for(runs).encode().unwrap();
        let content_id = doc.add_object(Stream::new(dictionary! {}, encoded));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        kids.push(page_id.into());
    }

    let count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
            "Resources" => resources_id,
            "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut buf = Vec::new();
    doc.save_to(&mut buf).unwrap();
    buf
}

/// Show `text` at `size` points with its top line at `y`, using font `F1`.
pub fn show(size: i64, y: i64, text: Object) -> Vec<Operation> {
    vec![
        Operation::new("BT", vec![]),
        Operation::new("Tf", vec!["F1".into(), size.into()]),
        Operation::new("Td", vec![72.into(), y.into()]),
        Operation::new("Tj", vec![text]),
        Operation::new("ET", vec![]),
    ]
}

/// Finish `doc` as a single A4 page painting `operations` with `resources`.
pub fn single_page_pdf(
    mut doc: Document,
    resources: Dictionary,
    operations: Vec<Operation>,
) -> Vec<u8> {
    let pages_id = doc.new_object_id();
    let encoded = Content { operations }.encode().unwrap();
    let content_id = doc.add_object(Stream::new(dictionary! {}, encoded));
    let resources_id = doc.add_object(resources);
    let page_id = doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "Contents" => content_id,
        "Resources" => resources_id,
    });
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => vec![page_id.into()],
            "Count" => 1,
            "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut buf = Vec::new();
    doc.save_to(&mut buf).unwrap();
    buf
}

/// Two-page report: a 24pt title, 16pt and 13pt headings, 10pt body.
pub fn annual_report() -> Vec<u8> {
    build_pdf(&[
        vec![
            run("Annual Report 2024", 24, 72, 760),
            run("Market Analysis", 16, 72, 700),
            run("Sales grew in every region this year.", 10, 72, 680),
            run("Margins held steady despite rising costs.", 10, 72, 668),
            run("Regional Results", 13, 72, 630),
            run("The north region led all others.", 10, 72, 612),
            run("1. First numbered item", 16, 72, 560),
        ],
        vec![
            run("Market Analysis", 16, 72, 760),
            run("Future Outlook Plans", 16, 72, 700),
            run("We expect continued growth next year.", 10, 72, 680),
        ],
    ])
}
