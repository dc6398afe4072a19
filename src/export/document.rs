// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Paginated PDF report: title, summary table, transaction table.
//!
//! Positions are in millimetres from the bottom-left corner of a US Letter
//! page. Builtin fonts carry no metrics, so text widths are estimated from
//! an average glyph width.

use printpdf::path::PaintMode;
use printpdf::{
    BuiltinFont, Color, IndirectFontRef, Mm, PdfDocument, PdfLayerReference, Rect, Rgb,
};

use crate::analytics::{AnalyticsSnapshot, DateRange};
use crate::error::ReportError;
use crate::models::LedgerRecord;
use crate::series;
use crate::utils::fmt_money;

const PAGE_W: f32 = 215.9;
const PAGE_H: f32 = 279.4;
const MARGIN: f32 = 25.4;
const PT: f32 = 0.3528;
const CELL_PAD: f32 = 2.0;
const BODY_SIZE: f32 = 10.0;
const ELLIPSIS: &str = "...";

pub const DETAIL_HEADERS: [&str; 5] = ["Date", "Type", "Amount", "Description", "Payment Method"];

#[derive(Debug, Clone)]
pub struct ReportOptions {
    pub title: String,
    /// ISO 4217 code printed in the summary header.
    pub currency: String,
    pub period: DateRange,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            title: "Fruit & Juice Shop Financial Report".into(),
            currency: "INR".into(),
            period: DateRange::default(),
        }
    }
}

/// Renders the summary and the records, in the order given, as one PDF.
pub fn export_document(
    snap: &AnalyticsSnapshot,
    records: &[LedgerRecord],
    opts: &ReportOptions,
) -> Result<Vec<u8>, ReportError> {
    let pages = layout_document(snap, records, opts);
    let (doc, first_page, first_layer) =
        PdfDocument::new(&opts.title, Mm(PAGE_W), Mm(PAGE_H), "Layer 1");
    let regular = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|e| ReportError::Render(e.to_string()))?;
    let bold = doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(|e| ReportError::Render(e.to_string()))?;

    for (n, page) in pages.iter().enumerate() {
        let layer = if n == 0 {
            doc.get_page(first_page).get_layer(first_layer)
        } else {
            let (p, l) = doc.add_page(Mm(PAGE_W), Mm(PAGE_H), format!("Page {}, Layer 1", n + 1));
            doc.get_page(p).get_layer(l)
        };
        let font = |b: bool| if b { &bold } else { &regular };
        for block in &page.blocks {
            match block {
                Block::Text(t) => {
                    layer.set_fill_color(rgb((0.0, 0.0, 0.0)));
                    layer.use_text(t.text.as_str(), t.size, Mm(t.x), Mm(t.baseline), font(t.bold));
                }
                Block::Row(row) => draw_row(&layer, row, font(row.header)),
            }
        }
    }

    let bytes = doc
        .save_to_bytes()
        .map_err(|e| ReportError::Render(e.to_string()))?;
    tracing::debug!(
        records = records.len(),
        pages = pages.len(),
        bytes = bytes.len(),
        "exported report document"
    );
    Ok(bytes)
}

/// Places every line of text and every table cell, page by page.
pub fn layout_document(
    snap: &AnalyticsSnapshot,
    records: &[LedgerRecord],
    opts: &ReportOptions,
) -> Vec<Page> {
    let mut out = Layout::new();

    out.centered(&opts.title, 18.0, true);
    out.centered(&period_line(&opts.period), BODY_SIZE, false);
    out.spacer(7.0);

    let summary = TableData {
        headers: vec!["Metric".into(), format!("Amount ({})", opts.currency)],
        rows: series::summary(snap)
            .points
            .into_iter()
            .map(|p| vec![p.label, fmt_money(p.value)])
            .collect(),
        header_size: 14.0,
        flex: Some(0),
    };
    out.table(&summary);
    out.spacer(7.0);

    out.heading("Transactions", 14.0);
    out.spacer(3.5);

    let detail = TableData {
        headers: DETAIL_HEADERS.iter().map(|h| h.to_string()).collect(),
        rows: records
            .iter()
            .map(|r| {
                vec![
                    r.date.format("%Y-%m-%d").to_string(),
                    r.kind.to_string(),
                    fmt_money(r.amount),
                    r.description.clone().unwrap_or_default(),
                    r.payment_method.to_string(),
                ]
            })
            .collect(),
        header_size: 12.0,
        flex: Some(3),
    };
    out.table(&detail);

    out.pages
}

fn period_line(period: &DateRange) -> String {
    match (period.start, period.end) {
        (None, None) => "Period: all dates".into(),
        (Some(s), None) => format!("Period: from {}", s),
        (None, Some(e)) => format!("Period: through {}", e),
        (Some(s), Some(e)) => format!("Period: {} to {}", s, e),
    }
}

#[derive(Debug, Clone, Default)]
pub struct Page {
    pub blocks: Vec<Block>,
}

impl Page {
    pub fn rows(&self) -> impl Iterator<Item = &Row> {
        self.blocks.iter().filter_map(|b| match b {
            Block::Row(r) => Some(r),
            Block::Text(_) => None,
        })
    }

    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.blocks.iter().filter_map(|b| match b {
            Block::Text(t) => Some(t.text.as_str()),
            Block::Row(_) => None,
        })
    }
}

#[derive(Debug, Clone)]
pub enum Block {
    Text(TextLine),
    Row(Row),
}

#[derive(Debug, Clone)]
pub struct TextLine {
    pub text: String,
    pub size: f32,
    pub bold: bool,
    pub x: f32,
    pub baseline: f32,
}

#[derive(Debug, Clone)]
pub struct Row {
    pub header: bool,
    pub size: f32,
    /// Top edge, in millimetres from the bottom of the page.
    pub top: f32,
    pub cells: Vec<PlacedCell>,
}

impl Row {
    pub fn texts(&self) -> Vec<&str> {
        self.cells.iter().map(|c| c.text.as_str()).collect()
    }

    fn style(&self) -> CellStyle {
        if self.header {
            CellStyle::header(self.size)
        } else {
            CellStyle::body()
        }
    }
}

#[derive(Debug, Clone)]
pub struct PlacedCell {
    /// Cell text after truncation to the column width.
    pub text: String,
    pub x: f32,
    pub width: f32,
}

struct TableData {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
    header_size: f32,
    /// Column that gives up width when the table is too wide.
    flex: Option<usize>,
}

#[derive(Clone, Copy)]
struct CellStyle {
    size: f32,
    bold: bool,
    fill: (f32, f32, f32),
    text: (f32, f32, f32),
    pad_top: f32,
    pad_bottom: f32,
}

impl CellStyle {
    fn header(size: f32) -> Self {
        Self {
            size,
            bold: true,
            fill: (0.5, 0.5, 0.5),
            text: (0.96, 0.96, 0.96),
            pad_top: 1.5,
            pad_bottom: 4.2,
        }
    }

    fn body() -> Self {
        Self {
            size: BODY_SIZE,
            bold: false,
            fill: (0.96, 0.96, 0.86),
            text: (0.0, 0.0, 0.0),
            pad_top: 1.5,
            pad_bottom: 1.5,
        }
    }

    fn row_height(&self) -> f32 {
        self.size * PT + self.pad_top + self.pad_bottom
    }
}

struct Layout {
    pages: Vec<Page>,
    /// Top edge of the next element.
    cursor: f32,
}

impl Layout {
    fn new() -> Self {
        Self {
            pages: vec![Page::default()],
            cursor: PAGE_H - MARGIN,
        }
    }

    fn push(&mut self, block: Block) {
        if let Some(page) = self.pages.last_mut() {
            page.blocks.push(block);
        }
    }

    /// Starts a new page unless `height` still fits above the bottom margin.
    /// Returns whether a page break happened.
    fn ensure(&mut self, height: f32) -> bool {
        if self.cursor - height < MARGIN {
            self.pages.push(Page::default());
            self.cursor = PAGE_H - MARGIN;
            true
        } else {
            false
        }
    }

    fn spacer(&mut self, height: f32) {
        self.cursor -= height;
    }

    fn text(&mut self, text: &str, size: f32, bold: bool, x: impl Fn(f32) -> f32) {
        let height = size * PT * 1.4;
        self.ensure(height);
        self.push(Block::Text(TextLine {
            text: text.to_string(),
            size,
            bold,
            x: x(text_width(text, size, bold)),
            baseline: self.cursor - size * PT,
        }));
        self.cursor -= height;
    }

    fn centered(&mut self, text: &str, size: f32, bold: bool) {
        self.text(text, size, bold, |w| (PAGE_W - w) / 2.0);
    }

    fn heading(&mut self, text: &str, size: f32) {
        self.text(text, size, true, |_| MARGIN);
    }

    fn table(&mut self, data: &TableData) {
        let header = CellStyle::header(data.header_size);
        let body = CellStyle::body();
        let widths = column_widths(data, header, body);
        let left = (PAGE_W - widths.iter().sum::<f32>()) / 2.0;

        // Keep the header together with at least one body row.
        self.ensure(header.row_height() + body.row_height());
        self.row(&data.headers, &widths, left, header);
        for cells in &data.rows {
            if self.ensure(body.row_height()) {
                self.row(&data.headers, &widths, left, header);
            }
            self.row(cells, &widths, left, body);
        }
    }

    fn row(&mut self, cells: &[String], widths: &[f32], left: f32, style: CellStyle) {
        let mut x = left;
        let mut placed = Vec::with_capacity(cells.len());
        for (cell, width) in cells.iter().zip(widths) {
            placed.push(PlacedCell {
                text: fit(cell, width - 2.0 * CELL_PAD, style.size, style.bold),
                x,
                width: *width,
            });
            x += width;
        }
        self.push(Block::Row(Row {
            header: style.bold,
            size: style.size,
            top: self.cursor,
            cells: placed,
        }));
        self.cursor -= style.row_height();
    }
}

fn draw_row(layer: &PdfLayerReference, row: &Row, font: &IndirectFontRef) {
    let style = row.style();
    let height = style.row_height();
    layer.set_outline_color(rgb((0.0, 0.0, 0.0)));
    layer.set_outline_thickness(1.0);
    for cell in &row.cells {
        layer.set_fill_color(rgb(style.fill));
        layer.add_rect(
            Rect::new(
                Mm(cell.x),
                Mm(row.top - height),
                Mm(cell.x + cell.width),
                Mm(row.top),
            )
            .with_mode(PaintMode::FillStroke),
        );
        let text_x = cell.x + (cell.width - text_width(&cell.text, style.size, style.bold)) / 2.0;
        layer.set_fill_color(rgb(style.text));
        layer.use_text(
            cell.text.as_str(),
            style.size,
            Mm(text_x),
            Mm(row.top - height + style.pad_bottom),
            font,
        );
    }
}

fn rgb((r, g, b): (f32, f32, f32)) -> Color {
    Color::Rgb(Rgb::new(r, g, b, None))
}

fn text_width(text: &str, size: f32, bold: bool) -> f32 {
    let em = if bold { 0.58 } else { 0.52 };
    text.chars().count() as f32 * size * em * PT
}

/// Natural column widths. When they overflow the printable width the flex
/// column shrinks first, down to its header width; only then does every
/// column scale.
fn column_widths(data: &TableData, header: CellStyle, body: CellStyle) -> Vec<f32> {
    let header_widths: Vec<f32> = data
        .headers
        .iter()
        .map(|h| text_width(h, header.size, header.bold) + 2.0 * CELL_PAD)
        .collect();
    let mut widths = header_widths.clone();
    for row in &data.rows {
        for (w, cell) in widths.iter_mut().zip(row) {
            *w = w.max(text_width(cell, body.size, body.bold) + 2.0 * CELL_PAD);
        }
    }

    let usable = PAGE_W - 2.0 * MARGIN;
    let total: f32 = widths.iter().sum();
    if total <= usable {
        return widths;
    }
    if let Some(i) = data.flex.filter(|i| *i < widths.len()) {
        let others = total - widths[i];
        widths[i] = (usable - others).max(header_widths[i]);
    }
    let total: f32 = widths.iter().sum();
    if total > usable {
        let scale = usable / total;
        widths.iter_mut().for_each(|w| *w *= scale);
    }
    widths
}

fn fit(text: &str, avail: f32, size: f32, bold: bool) -> String {
    // Slack for the rounding between a natural width and its cell.
    if text_width(text, size, bold) <= avail + 0.01 {
        return text.to_string();
    }
    let budget = avail - text_width(ELLIPSIS, size, bold);
    let mut out = String::new();
    for c in text.chars() {
        let mut next = out.clone();
        next.push(c);
        if text_width(&next, size, bold) > budget {
            break;
        }
        out = next;
    }
    out.push_str(ELLIPSIS);
    out
}
