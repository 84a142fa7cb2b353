use anyhow::Context;
use lopdf::content::{Content, Operation};
use lopdf::{Document, Object, ObjectId, Stream, dictionary};

use super::ReportRow;

const TITLE: &str = "Daily Attendance Report";

// A4 in points
const PAGE_WIDTH: f32 = 595.0;
const PAGE_HEIGHT: f32 = 842.0;
const MARGIN: f32 = 50.0;

const TITLE_SIZE: f32 = 18.0;
const BODY_SIZE: f32 = 10.0;
const LEADING: f32 = 16.0;

// Courier glyphs are all 600/1000 em wide, so the title width is exact.
const COURIER_ADVANCE: f32 = 0.6;

/// Title centred on the first page, then one left-aligned line per row.
/// Rows continue on new pages once the bottom margin is reached.
pub fn render(rows: &[ReportRow]) -> anyhow::Result<Vec<u8>> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let body_font = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
        "Encoding" => "WinAnsiEncoding",
    });
    let title_font = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Courier-Bold",
        "Encoding" => "WinAnsiEncoding",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            "F1" => body_font,
            "F2" => title_font,
        },
    });

    let mut kids: Vec<Object> = Vec::new();
    for operations in layout(rows) {
        let page_id = add_page(&mut doc, pages_id, operations)?;
        kids.push(page_id.into());
    }

    let count = kids.len() as i64;
    let media_box: Vec<Object> = vec![0.into(), 0.into(), PAGE_WIDTH.into(), PAGE_HEIGHT.into()];
    let pages = dictionary! {
        "Type" => "Pages",
        "Kids" => kids,
        "Count" => count,
        "Resources" => resources_id,
        "MediaBox" => media_box,
    };
    doc.objects.insert(pages_id, Object::Dictionary(pages));

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut out = Vec::new();
    doc.save_to(&mut out).context("write pdf")?;
    Ok(out)
}

fn add_page(
    doc: &mut Document,
    pages_id: ObjectId,
    operations: Vec<Operation>,
) -> anyhow::Result<ObjectId> {
    let content = Content { operations };
    let content_id = doc.add_object(Stream::new(
        dictionary! {},
        content.encode().context("encode page content")?,
    ));

    Ok(doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "Contents" => content_id,
    }))
}

/// Content operations for each page, in order. Always at least one page.
fn layout(rows: &[ReportRow]) -> Vec<Vec<Operation>> {
    let mut pages = Vec::new();

    let title_width = TITLE.len() as f32 * TITLE_SIZE * COURIER_ADVANCE;
    let title_y = PAGE_HEIGHT - MARGIN - TITLE_SIZE;
    let mut ops = text_line("F2", TITLE_SIZE, (PAGE_WIDTH - title_width) / 2.0, title_y, TITLE);
    let mut y = title_y - 2.0 * LEADING;

    for row in rows {
        if y < MARGIN {
            pages.push(std::mem::take(&mut ops));
            y = PAGE_HEIGHT - MARGIN;
        }
        ops.extend(text_line("F1", BODY_SIZE, MARGIN, y, &row.line()));
        y -= LEADING;
    }

    pages.push(ops);
    pages
}

fn text_line(font: &str, size: f32, x: f32, y: f32, text: &str) -> Vec<Operation> {
    vec![
        Operation::new("BT", vec![]),
        Operation::new("Tf", vec![font.into(), size.into()]),
        Operation::new("Td", vec![x.into(), y.into()]),
        Operation::new("Tj", vec![Object::string_literal(win_ansi(text))]),
        Operation::new("ET", vec![]),
    ]
}

/// Latin-1 maps straight onto WinAnsi for the characters we care about;
/// anything else is shown as '?'.
fn win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| u8::try_from(u32::from(c)).unwrap_or(b'?'))
        .collect()
}
