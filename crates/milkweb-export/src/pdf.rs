//! PDF statement rendering
//!
//! A4 portrait document: header block (organization, title, period,
//! customer), a ruled table mirroring the on-screen columns, and a
//! totals footer. Rows flow onto additional pages when they overflow.

use printpdf::{BuiltinFont, Color, IndirectFontRef, Line, Mm, PdfDocument, PdfLayerReference, Point, Rgb};
use std::io::BufWriter;

use milkweb_core::{format_amount, format_amount_or_dash, Statement, StatementColumns, Transaction};

use crate::error::ExportError;

const WIDTH: Mm = Mm(210.0);
const HEIGHT: Mm = Mm(297.0);
const MARGIN: f32 = 14.0;
const LEFT: Mm = Mm(MARGIN);
const RIGHT: Mm = Mm(210.0 - MARGIN);
const TOP: Mm = Mm(297.0 - MARGIN);
const BOTTOM: Mm = Mm(MARGIN);

const ROW_HEIGHT: f32 = 7.0;
const FONT_SIZE: f32 = 9.0;
const TITLE_FONT_SIZE: f32 = 14.0;
const LINE_WIDTH: f32 = 0.3;
// Approximate glyph advance at FONT_SIZE, used for right-aligning amounts
const CHAR_WIDTH: f32 = 1.7;
const DESCRIPTION_CUTOFF_CHARS: usize = 46;

// Column x offsets from the left margin
const DATE_X: f32 = 0.0;
const CUSTOMER_X: f32 = 26.0;
const DESCRIPTION_WITH_CUSTOMER_X: f32 = 74.0;
const DESCRIPTION_X: f32 = 26.0;
const BILLED_RIGHT_X: f32 = 152.0;
const PAID_RIGHT_X: f32 = 180.0;

/// Render a statement as PDF bytes
pub fn statement_pdf(
    statement: &Statement,
    org_name: &str,
    currency_symbol: &str,
) -> Result<Vec<u8>, ExportError> {
    let columns = statement.columns();
    let title = format!("{} - Account Statement", org_name);
    log::debug!(
        "Rendering PDF statement: {} rows, {}",
        statement.transactions.len(),
        statement.filter.range_label()
    );

    let (doc, page1, layer1) = PdfDocument::new(&title, WIDTH, HEIGHT, "layer");
    let font = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|e| ExportError::PdfError { message: e.to_string() })?;
    let bold = doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(|e| ExportError::PdfError { message: e.to_string() })?;

    let mut layer = doc.get_page(page1).get_layer(layer1);
    layer.set_outline_color(Color::Rgb(Rgb::new(0.6, 0.6, 0.6, None)));
    layer.set_outline_thickness(LINE_WIDTH);

    // Header block, page 1 only
    let mut y = TOP.0;
    layer.use_text(org_name, TITLE_FONT_SIZE, LEFT, Mm(y), &bold);
    y -= ROW_HEIGHT;
    layer.use_text("Account Statement", FONT_SIZE + 2.0, LEFT, Mm(y), &font);
    y -= ROW_HEIGHT;
    layer.use_text(
        format!("Period: {}", statement.filter.range_label()),
        FONT_SIZE,
        LEFT,
        Mm(y),
        &font,
    );
    y -= ROW_HEIGHT;
    layer.use_text(
        format!("Customer: {}", statement.customer_label()),
        FONT_SIZE,
        LEFT,
        Mm(y),
        &font,
    );
    y -= ROW_HEIGHT / 2.0;
    hline(&layer, y);
    y -= ROW_HEIGHT;

    render_table_header(&layer, &bold, &columns, y);
    y -= ROW_HEIGHT;

    if statement.transactions.is_empty() {
        layer.use_text(
            "No transactions found in this period.",
            FONT_SIZE,
            LEFT,
            Mm(y),
            &font,
        );
        y -= ROW_HEIGHT;
    }

    let mut page_no = 1;
    for transaction in &statement.transactions {
        if y < BOTTOM.0 + 2.0 * ROW_HEIGHT {
            page_no += 1;
            let (page_idx, layer_idx) = doc.add_page(WIDTH, HEIGHT, format!("layer{}", page_no));
            layer = doc.get_page(page_idx).get_layer(layer_idx);
            layer.set_outline_color(Color::Rgb(Rgb::new(0.6, 0.6, 0.6, None)));
            layer.set_outline_thickness(LINE_WIDTH);

            y = TOP.0;
            render_table_header(&layer, &bold, &columns, y);
            y -= ROW_HEIGHT;
        }
        render_row(&layer, &font, &columns, transaction, currency_symbol, y);
        y -= ROW_HEIGHT;
    }

    // Totals footer, on a fresh page if it would not fit
    if y < BOTTOM.0 + 5.0 * ROW_HEIGHT {
        page_no += 1;
        let (page_idx, layer_idx) = doc.add_page(WIDTH, HEIGHT, format!("layer{}", page_no));
        layer = doc.get_page(page_idx).get_layer(layer_idx);
        layer.set_outline_color(Color::Rgb(Rgb::new(0.6, 0.6, 0.6, None)));
        layer.set_outline_thickness(LINE_WIDTH);
        y = TOP.0;
    }
    y -= ROW_HEIGHT / 2.0;
    hline(&layer, y);
    y -= ROW_HEIGHT;

    let totals = [
        ("Total Billed", format_amount(statement.summary.total_billed)),
        ("Total Paid", format_amount(statement.summary.total_paid)),
        ("Pending Balance", format_amount(statement.summary.pending)),
    ];
    for (label, amount) in totals {
        layer.use_text(label, FONT_SIZE, LEFT, Mm(y), &bold);
        let text = format!("{} {}", currency_symbol, amount);
        layer.use_text(&text, FONT_SIZE, right_aligned(&text, PAID_RIGHT_X), Mm(y), &font);
        y -= ROW_HEIGHT;
    }

    let mut buffer = BufWriter::new(Vec::new());
    doc.save(&mut buffer)
        .map_err(|e| ExportError::PdfError { message: e.to_string() })?;
    let bytes = buffer
        .into_inner()
        .map_err(|e| ExportError::IoError(e.into_error()))?;
    Ok(bytes)
}

fn render_table_header(
    layer: &PdfLayerReference,
    bold: &IndirectFontRef,
    columns: &StatementColumns,
    y: f32,
) {
    layer.use_text("Date", FONT_SIZE, Mm(LEFT.0 + DATE_X), Mm(y), bold);
    if columns.show_customer {
        layer.use_text("Customer", FONT_SIZE, Mm(LEFT.0 + CUSTOMER_X), Mm(y), bold);
        layer.use_text(
            "Description",
            FONT_SIZE,
            Mm(LEFT.0 + DESCRIPTION_WITH_CUSTOMER_X),
            Mm(y),
            bold,
        );
    } else {
        layer.use_text("Description", FONT_SIZE, Mm(LEFT.0 + DESCRIPTION_X), Mm(y), bold);
    }
    layer.use_text("Billed", FONT_SIZE, right_aligned("Billed", BILLED_RIGHT_X), Mm(y), bold);
    layer.use_text("Paid", FONT_SIZE, right_aligned("Paid", PAID_RIGHT_X), Mm(y), bold);
    hline(layer, y - 2.0);
}

fn render_row(
    layer: &PdfLayerReference,
    font: &IndirectFontRef,
    columns: &StatementColumns,
    transaction: &Transaction,
    currency_symbol: &str,
    y: f32,
) {
    layer.use_text(&transaction.date, FONT_SIZE, Mm(LEFT.0 + DATE_X), Mm(y), font);

    let description_x = if columns.show_customer {
        layer.use_text(
            truncate(&transaction.customer_name, 24),
            FONT_SIZE,
            Mm(LEFT.0 + CUSTOMER_X),
            Mm(y),
            font,
        );
        DESCRIPTION_WITH_CUSTOMER_X
    } else {
        DESCRIPTION_X
    };
    layer.use_text(
        truncate(&transaction.description, DESCRIPTION_CUTOFF_CHARS),
        FONT_SIZE,
        Mm(LEFT.0 + description_x),
        Mm(y),
        font,
    );

    let billed = amount_cell(transaction.billed, currency_symbol);
    layer.use_text(&billed, FONT_SIZE, right_aligned(&billed, BILLED_RIGHT_X), Mm(y), font);
    let paid = amount_cell(transaction.paid, currency_symbol);
    layer.use_text(&paid, FONT_SIZE, right_aligned(&paid, PAID_RIGHT_X), Mm(y), font);
}

/// Zero renders as a dash without the currency glyph
fn amount_cell(amount: rust_decimal::Decimal, currency_symbol: &str) -> String {
    if amount.is_zero() {
        format_amount_or_dash(amount)
    } else {
        format!("{} {}", currency_symbol, format_amount(amount))
    }
}

fn right_aligned(text: &str, right_x: f32) -> Mm {
    Mm(LEFT.0 + right_x - text.chars().count() as f32 * CHAR_WIDTH)
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() > max_chars {
        let mut cut: String = text.chars().take(max_chars).collect();
        cut.push_str("...");
        cut
    } else {
        text.to_string()
    }
}

fn hline(layer: &PdfLayerReference, y: f32) {
    let line = Line {
        points: vec![
            (Point::new(LEFT, Mm(y)), false),
            (Point::new(RIGHT, Mm(y)), false),
        ],
        is_closed: false,
    };
    layer.add_line(line);
}

// ==================== Tests ====================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use milkweb_core::{
        statement_transactions, summarize, Payment, StatementFilter,
    };
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn statement_with_payments(count: u32) -> Statement {
        let payments: Vec<Payment> = (0..count)
            .map(|i| Payment {
                id: format!("pay-{}", i + 1),
                customer_id: "c1".to_string(),
                customer_name: "Asha Dairy Stand".to_string(),
                date: "2024-01-10".to_string(),
                amount: dec!(10.00),
            })
            .collect();
        let transactions = statement_transactions(&[], &payments);
        let summary = summarize(&transactions);
        Statement {
            filter: StatementFilter::all_customers(date(2024, 1, 1), date(2024, 1, 31)),
            customer_name: None,
            transactions,
            summary,
        }
    }

    #[test]
    fn test_pdf_bytes_have_pdf_magic() {
        let bytes = statement_pdf(&statement_with_payments(2), "Sunrise Dairy", "Rs.").unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn test_pdf_empty_statement_renders() {
        let bytes = statement_pdf(&statement_with_payments(0), "Sunrise Dairy", "Rs.").unwrap();
        assert!(bytes.starts_with(b"%PDF"));
        assert!(!bytes.is_empty());
    }

    #[test]
    fn test_pdf_many_rows_paginates() {
        // Enough rows to overflow the first page
        let small = statement_pdf(&statement_with_payments(2), "Sunrise Dairy", "Rs.").unwrap();
        let large = statement_pdf(&statement_with_payments(120), "Sunrise Dairy", "Rs.").unwrap();
        assert!(large.starts_with(b"%PDF"));
        assert!(large.len() > small.len());
    }

    #[test]
    fn test_amount_cell_dash_for_zero() {
        assert_eq!(amount_cell(dec!(0), "Rs."), "\u{2014}");
        assert_eq!(amount_cell(dec!(12.5), "Rs."), "Rs. 12.50");
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("a very long product name", 6), "a very...");
    }
}
