//! PDF Report Rendering
//!
//! One line per record on A4 pages, Helvetica throughout. Layout runs
//! in points from the top margin down, breaking to a fresh page when
//! the cursor reaches the bottom margin.

use printpdf::{BuiltinFont, IndirectFontRef, Mm, PdfDocument, Pt};

use super::display_timestamp;
use crate::db::models::{FeedbackDetail, FoodItem};
use crate::utils::{AppError, AppResult};

const PAGE_WIDTH: Mm = Mm(210.0);
const PAGE_HEIGHT: Mm = Mm(297.0);
const MARGIN_PT: f32 = 40.0;
const TITLE_SIZE: f32 = 14.0;
const TITLE_GAP_PT: f32 = 24.0;
const ROW_SIZE: f32 = 9.0;
const ROW_GAP_PT: f32 = 14.0;
/// 超长行截断，避免溢出 A4 宽度
const MAX_LINE_CHARS: usize = 130;

/// Render food item history as PDF bytes
pub fn food_items_pdf(items: &[FoodItem]) -> AppResult<Vec<u8>> {
    let mut lines: Vec<String> = items
        .iter()
        .map(|item| {
            format!(
                "{} | {} | qty={} | {}",
                item.name,
                item.category,
                item.quantity,
                display_timestamp(item.created_at)
            )
        })
        .collect();
    if lines.is_empty() {
        lines.push("No food history found.".to_string());
    }

    render_lines("Food History Report", &lines)
}

/// Render feedback history as PDF bytes
pub fn feedback_pdf(entries: &[FeedbackDetail]) -> AppResult<Vec<u8>> {
    let mut lines: Vec<String> = entries
        .iter()
        .map(|entry| {
            format!(
                "{} | {} | rating={} | {} | {}",
                entry.student_name,
                entry.food_item_name.as_deref().unwrap_or("N/A"),
                entry.rating,
                entry.message,
                display_timestamp(entry.created_at)
            )
        })
        .collect();
    if lines.is_empty() {
        lines.push("No feedback history found.".to_string());
    }

    render_lines("Feedback Report", &lines)
}

/// Shared line-per-record renderer
fn render_lines(title: &str, lines: &[String]) -> AppResult<Vec<u8>> {
    let (doc, first_page, first_layer) = PdfDocument::new(title, PAGE_WIDTH, PAGE_HEIGHT, "Layer 1");
    let bold = builtin_font(&doc, BuiltinFont::HelveticaBold)?;
    let regular = builtin_font(&doc, BuiltinFont::Helvetica)?;

    let page_height_pt = Pt::from(PAGE_HEIGHT).0;
    let mut layer = doc.get_page(first_page).get_layer(first_layer);
    let mut y = page_height_pt - MARGIN_PT;

    layer.use_text(title, TITLE_SIZE, Mm::from(Pt(MARGIN_PT)), Mm::from(Pt(y)), &bold);
    y -= TITLE_GAP_PT;

    for line in lines {
        if y <= MARGIN_PT {
            let (page, page_layer) = doc.add_page(PAGE_WIDTH, PAGE_HEIGHT, "Layer 1");
            layer = doc.get_page(page).get_layer(page_layer);
            y = page_height_pt - MARGIN_PT;
        }

        let truncated: String = line.chars().take(MAX_LINE_CHARS).collect();
        layer.use_text(
            truncated,
            ROW_SIZE,
            Mm::from(Pt(MARGIN_PT)),
            Mm::from(Pt(y)),
            &regular,
        );
        y -= ROW_GAP_PT;
    }

    let mut bytes: Vec<u8> = Vec::new();
    {
        let mut writer = std::io::BufWriter::new(&mut bytes);
        doc.save(&mut writer)
            .map_err(|e| AppError::internal(format!("PDF render failed: {e}")))?;
    }
    Ok(bytes)
}

fn builtin_font(
    doc: &printpdf::PdfDocumentReference,
    font: BuiltinFont,
) -> AppResult<IndirectFontRef> {
    doc.add_builtin_font(font)
        .map_err(|e| AppError::internal(format!("PDF font load failed: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_item(name: &str) -> FoodItem {
        FoodItem {
            id: None,
            name: name.to_string(),
            category: "lunch".to_string(),
            quantity: 10,
            image: String::new(),
            created_at: 1_772_368_200_000,
        }
    }

    #[test]
    fn test_food_items_pdf_has_pdf_magic() {
        let bytes = food_items_pdf(&[make_item("Tacos")]).expect("render");
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn test_empty_history_still_renders() {
        let bytes = food_items_pdf(&[]).expect("render");
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn test_long_history_spans_multiple_pages() {
        // 60 rows at 14pt spacing exceeds one A4 page
        let items: Vec<FoodItem> = (0..120).map(|i| make_item(&format!("item_{}", i))).collect();

        let one = food_items_pdf(&items[..1].to_vec()).expect("render");
        let many = food_items_pdf(&items).expect("render");

        assert!(many.len() > one.len());
    }

    #[test]
    fn test_overlong_line_does_not_panic() {
        let entry = FeedbackDetail {
            id: None,
            student_name: "Maria".to_string(),
            food_item: None,
            food_item_name: None,
            rating: 3,
            message: "x".repeat(500),
            created_at: 1_772_368_200_000,
        };

        let bytes = feedback_pdf(&[entry]).expect("render");
        assert!(bytes.starts_with(b"%PDF"));
    }
}
