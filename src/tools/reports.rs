//! Order report generation
//!
//! Lay out aggregated order lines as a paginated table and render it to PDF.

use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use printpdf::path::{PaintMode, WindingOrder};
use printpdf::*;
use serde::Serialize;
use thiserror::Error;

use crate::config::ReportConfig;
use crate::models::OrderSummary;
use crate::orders::{summarize, DisplayRow, DisplayTotals};
use crate::sheet::load_rows;

// ============================================================================
// Color Constants (RGB 0-255)
// ============================================================================

const COLOR_HEADER_BG: (u8, u8, u8) = (44, 62, 80);       // #2c3e50
const COLOR_WHITESMOKE: (u8, u8, u8) = (245, 245, 245);
const COLOR_WHITE: (u8, u8, u8) = (255, 255, 255);
const COLOR_GRAY: (u8, u8, u8) = (128, 128, 128);
const COLOR_LIGHT_GRAY: (u8, u8, u8) = (211, 211, 211);
const COLOR_BLACK: (u8, u8, u8) = (0, 0, 0);

// ============================================================================
// Page Geometry (points)
// ============================================================================

const PAGE_WIDTH_MM: f32 = 210.0;  // A4
const PAGE_HEIGHT_MM: f32 = 297.0;
const PAGE_WIDTH_PT: f32 = 595.28;
const PAGE_HEIGHT_PT: f32 = 841.89;
const MARGIN_PT: f32 = 20.0;

const HEADERS: [&str; 6] = ["MRP", "CATEGORY", "ITEM NAME", "UNIT", "QTY", "FREE QTY"];
const COL_WIDTHS_PT: [f32; 6] = [50.0, 85.0, 185.0, 65.0, 45.0, 55.0];
/// Category and item name wrap and sit on the left; everything else is centered
const LEFT_ALIGNED: [bool; 6] = [false, true, true, false, false, false];

const CELL_PAD_X: f32 = 6.0;
const CELL_PAD_Y: f32 = 3.0;
const CELL_FONT_SIZE: f32 = 9.0;
const CELL_LEADING: f32 = 11.0;
const TOTAL_FONT_SIZE: f32 = 10.0;
const TOTAL_LEADING: f32 = 12.0;

const TITLE_FONT_SIZE: f32 = 24.0;
const SUBTITLE_FONT_SIZE: f32 = 16.0;
const STAMP_FONT_SIZE: f32 = 10.0;
/// Title, subtitle, timestamp and spacer above the table on page one
const TITLE_BLOCK_PT: f32 = 100.0;

pub const TOTAL_LABEL: &str = "TOTAL ITEMS";

// ============================================================================
// Error and Response Types
// ============================================================================

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("PDF error: {0}")]
    Pdf(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Serialize)]
pub struct GenerateReportResponse {
    pub success: bool,
    pub file_path: String,
    pub items: usize,
    pub rows_read: usize,
    pub rows_skipped: usize,
    pub unreadable_quantities: usize,
    pub total_quantity: f64,
    pub total_free_quantity: f64,
    pub pages: usize,
    pub message: String,
}

/// Header text for one report
#[derive(Debug, Clone)]
pub struct ReportMeta {
    pub company_name: String,
    pub report_title: String,
    pub generated_at: NaiveDateTime,
}

impl ReportMeta {
    pub fn from_config(config: &ReportConfig, generated_at: NaiveDateTime) -> Self {
        Self {
            company_name: config.company_name.clone(),
            report_title: config.report_title.clone(),
            generated_at,
        }
    }

    pub fn generated_on(&self) -> String {
        format!(
            "Generated on: {}",
            self.generated_at.format("%d-%m-%Y %I:%M %p")
        )
    }
}

/// `Ferrite_Order_HHMMSS.pdf`
pub fn default_file_name(generated_at: &NaiveDateTime) -> String {
    format!("Ferrite_Order_{}.pdf", generated_at.format("%H%M%S"))
}

// ============================================================================
// Text Metrics
// ============================================================================

/// Helvetica advance width in 1/1000 em
fn helvetica_glyph_width(c: char) -> u16 {
    match c {
        '0'..='9' => 556,
        ' ' | '.' | ',' | '/' | ':' | ';' | '!' | 'f' | 't' | 'I' => 278,
        'i' | 'j' | 'l' => 222,
        'r' | '-' | '(' | ')' => 333,
        '+' | '=' | '<' | '>' => 584,
        'm' | 'M' => 833,
        'w' => 722,
        '%' => 889,
        'W' => 944,
        'c' | 'k' | 's' | 'v' | 'x' | 'y' | 'z' | 'J' => 500,
        'F' | 'T' | 'Z' => 611,
        'L' => 556,
        'C' | 'D' | 'H' | 'N' | 'R' | 'U' => 722,
        'G' | 'O' | 'Q' => 778,
        'A' | 'B' | 'E' | 'K' | 'P' | 'S' | 'V' | 'X' | 'Y' | '&' => 667,
        _ => 556,
    }
}

/// Approximate rendered width of `text` in points
pub fn text_width(text: &str, size: f32, bold: bool) -> f32 {
    let units: u32 = text.chars().map(|c| helvetica_glyph_width(c) as u32).sum();
    let width = units as f32 * size / 1000.0;
    if bold {
        width * 1.06
    } else {
        width
    }
}

/// Greedy word wrap to `max_width` points; words wider than a line are split
pub fn wrap_text(text: &str, max_width: f32, size: f32, bold: bool) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let candidate = if current.is_empty() {
            word.to_string()
        } else {
            format!("{} {}", current, word)
        };

        if text_width(&candidate, size, bold) <= max_width {
            current = candidate;
            continue;
        }

        if !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }

        // Break an over-long word on characters
        for c in word.chars() {
            current.push(c);
            if text_width(&current, size, bold) > max_width && current.chars().count() > 1 {
                current.pop();
                lines.push(std::mem::take(&mut current));
                current.push(c);
            }
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

// ============================================================================
// Table Layout
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowKind {
    Header,
    /// Body rows alternate between two backgrounds
    Body { stripe: usize },
    Total,
}

impl RowKind {
    fn font_size(&self) -> f32 {
        match self {
            RowKind::Total => TOTAL_FONT_SIZE,
            RowKind::Header | RowKind::Body { .. } => CELL_FONT_SIZE,
        }
    }

    fn leading(&self) -> f32 {
        match self {
            RowKind::Total => TOTAL_LEADING,
            RowKind::Header | RowKind::Body { .. } => CELL_LEADING,
        }
    }

    fn bold(&self) -> bool {
        !matches!(self, RowKind::Body { .. })
    }

    fn background(&self) -> (u8, u8, u8) {
        match self {
            RowKind::Header => COLOR_HEADER_BG,
            RowKind::Body { stripe } if stripe % 2 == 0 => COLOR_WHITESMOKE,
            RowKind::Body { .. } => COLOR_WHITE,
            RowKind::Total => COLOR_LIGHT_GRAY,
        }
    }

    fn text_color(&self) -> (u8, u8, u8) {
        match self {
            RowKind::Header => COLOR_WHITESMOKE,
            RowKind::Body { .. } | RowKind::Total => COLOR_BLACK,
        }
    }
}

/// A table row with wrapped cell text and its position on the page
#[derive(Debug, Clone)]
pub struct PlacedRow {
    pub kind: RowKind,
    /// Wrapped lines per column
    pub cells: Vec<Vec<String>>,
    /// Top edge, in points from the bottom of the page
    pub top: f32,
    pub height: f32,
}

#[derive(Debug, Clone, Default)]
pub struct PageLayout {
    pub rows: Vec<PlacedRow>,
}

fn table_width() -> f32 {
    COL_WIDTHS_PT.iter().sum()
}

/// Left edge of the table, centered between the margins
fn table_left() -> f32 {
    MARGIN_PT + (PAGE_WIDTH_PT - 2.0 * MARGIN_PT - table_width()) / 2.0
}

fn build_row(kind: RowKind, texts: [String; 6]) -> PlacedRow {
    let cells: Vec<Vec<String>> = texts
        .iter()
        .zip(COL_WIDTHS_PT)
        .map(|(text, width)| wrap_text(text, width - 2.0 * CELL_PAD_X, kind.font_size(), kind.bold()))
        .collect();

    let line_count = cells.iter().map(Vec::len).max().unwrap_or(0).max(1);

    PlacedRow {
        kind,
        cells,
        top: 0.0,
        height: line_count as f32 * kind.leading() + 2.0 * CELL_PAD_Y,
    }
}

/// Split the report table into pages. The header row repeats on every page and
/// the totals row comes last.
pub fn layout_table(summary: &OrderSummary) -> Vec<PageLayout> {
    let header = build_row(RowKind::Header, HEADERS.map(str::to_string));

    let body = summary.rows.iter().enumerate().map(|(i, row)| {
        let d = DisplayRow::from(row);
        build_row(
            RowKind::Body { stripe: i % 2 },
            [d.mrp, d.category, d.item_name, d.unit, d.quantity, d.free_quantity],
        )
    });

    let totals = DisplayTotals::from(&summary.totals);
    let total = build_row(
        RowKind::Total,
        [
            String::new(),
            String::new(),
            TOTAL_LABEL.to_string(),
            String::new(),
            totals.quantity,
            totals.free_quantity,
        ],
    );

    let mut pages = Vec::new();
    let mut page = PageLayout::default();
    let mut y = PAGE_HEIGHT_PT - MARGIN_PT - TITLE_BLOCK_PT;

    place(&mut page, &mut y, header.clone());

    for row in body.chain(std::iter::once(total)) {
        // A page holding only the header still takes the row, however tall
        if y - row.height < MARGIN_PT && page.rows.len() > 1 {
            pages.push(std::mem::take(&mut page));
            y = PAGE_HEIGHT_PT - MARGIN_PT;
            place(&mut page, &mut y, header.clone());
        }
        place(&mut page, &mut y, row);
    }

    pages.push(page);
    pages
}

fn place(page: &mut PageLayout, y: &mut f32, mut row: PlacedRow) {
    row.top = *y;
    *y -= row.height;
    page.rows.push(row);
}

// ============================================================================
// PDF Generation Helper Functions
// ============================================================================

fn pt_to_mm(pt: f32) -> Mm {
    Mm(pt * 0.352_777_8)
}

fn rgb_to_printpdf(color: (u8, u8, u8)) -> Color {
    Color::Rgb(Rgb::new(
        color.0 as f32 / 255.0,
        color.1 as f32 / 255.0,
        color.2 as f32 / 255.0,
        None,
    ))
}

fn add_text(
    layer: &PdfLayerReference,
    font: &IndirectFontRef,
    text: &str,
    x: f32,
    y: f32,
    size: f32,
    color: (u8, u8, u8),
) {
    layer.set_fill_color(rgb_to_printpdf(color));
    layer.use_text(text, size, pt_to_mm(x), pt_to_mm(y), font);
}

fn add_line(layer: &PdfLayerReference, x1: f32, y1: f32, x2: f32, y2: f32, color: (u8, u8, u8), width: f32) {
    layer.set_outline_color(rgb_to_printpdf(color));
    layer.set_outline_thickness(width);

    let line = Line {
        points: vec![
            (Point::new(pt_to_mm(x1), pt_to_mm(y1)), false),
            (Point::new(pt_to_mm(x2), pt_to_mm(y2)), false),
        ],
        is_closed: false,
    };
    layer.add_line(line);
}

fn fill_rect(layer: &PdfLayerReference, x: f32, y: f32, width: f32, height: f32, color: (u8, u8, u8)) {
    layer.set_fill_color(rgb_to_printpdf(color));

    let ring = vec![
        (Point::new(pt_to_mm(x), pt_to_mm(y)), false),
        (Point::new(pt_to_mm(x + width), pt_to_mm(y)), false),
        (Point::new(pt_to_mm(x + width), pt_to_mm(y + height)), false),
        (Point::new(pt_to_mm(x), pt_to_mm(y + height)), false),
    ];
    layer.add_polygon(Polygon {
        rings: vec![ring],
        mode: PaintMode::Fill,
        winding_order: WindingOrder::NonZero,
    });
}

fn add_centered_text(
    layer: &PdfLayerReference,
    font: &IndirectFontRef,
    text: &str,
    y: f32,
    size: f32,
    bold: bool,
    color: (u8, u8, u8),
) {
    let x = (PAGE_WIDTH_PT - text_width(text, size, bold)) / 2.0;
    add_text(layer, font, text, x, y, size, color);
}

struct Fonts {
    regular: IndirectFontRef,
    bold: IndirectFontRef,
}

fn draw_row(layer: &PdfLayerReference, fonts: &Fonts, row: &PlacedRow) {
    let left = table_left();
    let bottom = row.top - row.height;
    fill_rect(layer, left, bottom, table_width(), row.height, row.kind.background());

    let font = if row.kind.bold() { &fonts.bold } else { &fonts.regular };
    let size = row.kind.font_size();
    let leading = row.kind.leading();

    let mut col_x = left;
    for (i, lines) in row.cells.iter().enumerate() {
        let width = COL_WIDTHS_PT[i];
        // Vertically centered block of lines
        let block_top = row.top - (row.height - lines.len() as f32 * leading) / 2.0;

        for (j, line) in lines.iter().enumerate() {
            let baseline = block_top - j as f32 * leading - leading / 2.0 - size * 0.35;
            let x = if LEFT_ALIGNED[i] {
                col_x + CELL_PAD_X
            } else {
                col_x + (width - text_width(line, size, row.kind.bold())) / 2.0
            };
            add_text(layer, font, line, x, baseline, size, row.kind.text_color());
        }
        col_x += width;
    }

    // Grid
    let right = left + table_width();
    add_line(layer, left, row.top, right, row.top, COLOR_GRAY, 0.5);
    add_line(layer, left, bottom, right, bottom, COLOR_GRAY, 0.5);
    let mut x = left;
    add_line(layer, x, row.top, x, bottom, COLOR_GRAY, 0.5);
    for width in COL_WIDTHS_PT {
        x += width;
        add_line(layer, x, row.top, x, bottom, COLOR_GRAY, 0.5);
    }
}

fn draw_title_block(layer: &PdfLayerReference, fonts: &Fonts, meta: &ReportMeta) {
    let mut y = PAGE_HEIGHT_PT - MARGIN_PT - TITLE_FONT_SIZE;
    add_centered_text(layer, &fonts.bold, &meta.company_name, y, TITLE_FONT_SIZE, true, COLOR_BLACK);
    y -= TITLE_FONT_SIZE * 0.2 + 5.0 + SUBTITLE_FONT_SIZE * 1.2;

    add_centered_text(layer, &fonts.regular, &meta.report_title, y, SUBTITLE_FONT_SIZE, false, COLOR_GRAY);
    y -= SUBTITLE_FONT_SIZE * 0.2 + 20.0 + STAMP_FONT_SIZE * 1.2;

    add_text(layer, &fonts.regular, &meta.generated_on(), table_left(), y, STAMP_FONT_SIZE, COLOR_BLACK);
}

fn build_document(summary: &OrderSummary, meta: &ReportMeta) -> Result<(PdfDocumentReference, usize), ReportError> {
    let pages = layout_table(summary);

    let (doc, page1, layer1) = PdfDocument::new(
        &meta.report_title,
        Mm(PAGE_WIDTH_MM),
        Mm(PAGE_HEIGHT_MM),
        "Layer 1",
    );

    let fonts = Fonts {
        regular: doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(|e| ReportError::Pdf(e.to_string()))?,
        bold: doc
            .add_builtin_font(BuiltinFont::HelveticaBold)
            .map_err(|e| ReportError::Pdf(e.to_string()))?,
    };

    let first_layer = doc.get_page(page1).get_layer(layer1);
    draw_title_block(&first_layer, &fonts, meta);

    for (index, page) in pages.iter().enumerate() {
        let layer = if index == 0 {
            first_layer.clone()
        } else {
            let name = format!("Page {}", index + 1);
            let (page_idx, layer_idx) =
                doc.add_page(Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), name.as_str());
            doc.get_page(page_idx).get_layer(layer_idx)
        };

        for row in &page.rows {
            draw_row(&layer, &fonts, row);
        }
    }

    Ok((doc, pages.len()))
}

// ============================================================================
// Report Rendering
// ============================================================================

/// Render the order report to PDF bytes
pub fn render_order_report(summary: &OrderSummary, meta: &ReportMeta) -> Result<Vec<u8>, ReportError> {
    let (doc, _) = build_document(summary, meta)?;
    doc.save_to_bytes().map_err(|e| ReportError::Pdf(e.to_string()))
}

/// Render the order report into a file, creating parent directories.
/// Returns the number of pages written.
pub fn write_order_report(summary: &OrderSummary, meta: &ReportMeta, output_path: &Path) -> Result<usize, ReportError> {
    let (doc, page_count) = build_document(summary, meta)?;

    if let Some(parent) = output_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let file = File::create(output_path)?;
    let mut writer = BufWriter::new(file);
    doc.save(&mut writer).map_err(|e| ReportError::Pdf(e.to_string()))?;

    tracing::info!(
        "Wrote order report with {} lines over {} pages to {}",
        summary.rows.len(),
        page_count,
        output_path.display()
    );
    Ok(page_count)
}

/// Read an order file, aggregate it and write the PDF report
pub fn generate_order_report(
    input_path: &str,
    output_path: Option<&str>,
    config: &ReportConfig,
    generated_at: NaiveDateTime,
) -> Result<GenerateReportResponse, String> {
    let loaded = load_rows(Path::new(input_path), config).map_err(|e| e.to_string())?;
    let summary = summarize(&loaded.rows, loaded.skipped_rows);
    generate_report_from_summary(&summary, output_path, config, generated_at)
}

/// Write the PDF report for an order that has already been aggregated
pub fn generate_report_from_summary(
    summary: &OrderSummary,
    output_path: Option<&str>,
    config: &ReportConfig,
    generated_at: NaiveDateTime,
) -> Result<GenerateReportResponse, String> {
    let path = match output_path {
        Some(p) => PathBuf::from(p),
        None => config.output_dir.join(default_file_name(&generated_at)),
    };

    let meta = ReportMeta::from_config(config, generated_at);
    let pages = write_order_report(summary, &meta, &path).map_err(|e| e.to_string())?;

    Ok(GenerateReportResponse {
        success: true,
        file_path: path.display().to_string(),
        items: summary.rows.len(),
        rows_read: summary.rows_read,
        rows_skipped: summary.rows_skipped,
        unreadable_quantities: summary.quantity_issues.len(),
        total_quantity: summary.totals.total_quantity,
        total_free_quantity: summary.totals.total_free_quantity,
        pages,
        message: format!(
            "Order report generated with {} items from {} rows",
            summary.rows.len(),
            summary.rows_read
        ),
    })
}
