//! Benchmarks for outline extraction.
//!
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use pdf_outline::outline::{extract_outline, OutlineOptions};
use pdf_outline::{BBox, Block, DocumentLayout, Line, PageLayout, Span};

/// Creates a synthetic PDF where every page has a heading and body lines.
fn create_test_pdf(page_count: usize) -> Vec<u8> {
    let mut content = String::new();
    let mut offsets = Vec::new();

    content.push_str("%PDF-1.4\n");

    offsets.push(content.len());
    content.push_str("1 0 obj\n<< /Type /Catalog /Pages 2 0 R >>\nendobj\n");

    let kids: Vec<String> = (0..page_count).map(|i| format!("{} 0 R", i * 2 + 3)).collect();
    offsets.push(content.len());
    content.push_str(&format!(
        "2 0 obj\n<< /Type /Pages /Kids [{}] /Count {} >>\nendobj\n",
        kids.join(" "),
        page_count
    ));

    let mut next_obj = 3;
    for i in 0..page_count {
        let page_obj = next_obj;
        let content_obj = next_obj + 1;
        next_obj += 2;

        offsets.push(content.len());
        content.push_str(&format!(
            "{} 0 obj\n<< /Type /Page /Parent 2 0 R /MediaBox [0 0 612 792] /Contents {} 0 R >>\nendobj\n",
            page_obj, content_obj
        ));

        let mut text = String::new();
        if i == 0 {
            text.push_str("BT /F1 24 Tf 72 740 Td (Benchmark Report Title) Tj ET\n");
        }
        text.push_str(&format!("BT /F1 16 Tf 72 700 Td (Section Number {}) Tj ET\n", i + 1));
        text.push_str("BT /F1 13 Tf 72 660 Td (Detailed Subsection Notes) Tj ET\n");
        for line in 0..30 {
            text.push_str(&format!(
                "BT /F1 10 Tf 72 {} Td (Body line {} with ordinary prose for measurement.) Tj ET\n",
                640 - line * 12,
                line
            ));
        }

        offsets.push(content.len());
        content.push_str(&format!(
            "{} 0 obj\n<< /Length {} >>\nstream\n{}endstream\nendobj\n",
            content_obj,
            text.len(),
            text
        ));
    }

    let xref_offset = content.len();
    content.push_str(&format!("xref\n0 {}\n", next_obj));
    content.push_str("0000000000 65535 f \n");
    for offset in &offsets {
        content.push_str(&format!("{:010} 00000 n \n", offset));
    }

    content.push_str(&format!(
        "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{}\n%%EOF\n",
        next_obj, xref_offset
    ));

    content.into_bytes()
}

/// Creates a layout directly, skipping PDF parsing.
fn create_layout(page_count: u32) -> DocumentLayout {
    let mut doc = DocumentLayout::new();
    for number in 1..=page_count {
        let mut page = PageLayout::letter(number);
        if number == 1 {
            page.add_block(Block::text(vec![line("Benchmark Report Title", 24.0, 40.0)]));
        }
        page.add_block(Block::text(vec![line("Major Section Heading", 16.0, 80.0)]));
        page.add_block(Block::text(vec![line("Minor Subsection Heading", 13.0, 120.0)]));
        let body: Vec<Line> = (0..40)
            .map(|i| line("ordinary prose that is not a heading at all", 10.0, 140.0 + i as f32 * 12.0))
            .collect();
        page.add_block(Block::text(body));
        doc.add_page(page);
    }
    doc
}

fn line(text: &str, size: f32, y0: f32) -> Line {
    Line::from_spans(vec![Span::new(text, size, BBox::new(72.0, y0, 500.0, y0 + size))])
}

/// Benchmark the pure heuristic at various document sizes.
fn bench_outline_heuristic(c: &mut Criterion) {
    let mut group = c.benchmark_group("outline_heuristic");
    let options = OutlineOptions::default();

    for page_count in [1, 10, 100] {
        let layout = create_layout(page_count);
        group.bench_function(format!("{}_pages", page_count), |b| {
            b.iter(|| extract_outline(black_box(&layout), &options));
        });
    }

    group.finish();
}

/// Benchmark parsing plus extraction of in-memory PDFs.
fn bench_pdf_extraction(c: &mut Criterion) {
    let mut group = c.benchmark_group("pdf_extraction");

    for page_count in [1, 5, 10] {
        let data = create_test_pdf(page_count);
        group.bench_function(format!("{}_pages", page_count), |b| {
            b.iter(|| {
                let _ = pdf_outline::OutlineExtractor::new()
                    .lenient()
                    .extract_bytes(black_box(&data));
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_outline_heuristic, bench_pdf_extraction);
criterion_main!(benches);
