// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::f64::consts::PI;
use std::fmt::Write as _;

use base64::{Engine as _, engine::general_purpose::STANDARD};
use rust_decimal::prelude::ToPrimitive;

use crate::error::ReportError;
use crate::series::ChartSeries;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    Bar,
    Line,
    Pie,
}

#[derive(Debug, Clone)]
pub struct RenderedChart {
    pub mime: &'static str,
    pub bytes: Vec<u8>,
}

impl RenderedChart {
    pub fn to_base64(&self) -> String {
        STANDARD.encode(&self.bytes)
    }
}

/// Turns a labeled series into an encoded image.
pub trait ChartRenderer {
    fn render(
        &self,
        kind: ChartKind,
        title: &str,
        series: &ChartSeries,
    ) -> Result<RenderedChart, ReportError>;
}

const PALETTE: [&str; 4] = ["#FF9999", "#66B2FF", "#99FF99", "#FFD966"];

#[derive(Debug, Clone)]
pub struct SvgChartRenderer {
    pub width: u32,
    pub height: u32,
}

impl Default for SvgChartRenderer {
    fn default() -> Self {
        Self {
            width: 800,
            height: 500,
        }
    }
}

impl ChartRenderer for SvgChartRenderer {
    fn render(
        &self,
        kind: ChartKind,
        title: &str,
        series: &ChartSeries,
    ) -> Result<RenderedChart, ReportError> {
        let points: Vec<(&str, f64)> = series
            .points()
            .iter()
            .map(|p| (p.label.as_str(), p.value.to_f64().unwrap_or(0.0)))
            .collect();

        let (w, h) = (self.width as f64, self.height as f64);
        let mut svg = String::new();
        let _ = write!(
            svg,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#
        );
        let _ = write!(
            svg,
            r#"<rect width="100%" height="100%" fill="white"/><text x="{}" y="28" font-family="Helvetica" font-size="18" text-anchor="middle">{}</text>"#,
            w / 2.0,
            escape(title)
        );
        match kind {
            ChartKind::Bar | ChartKind::Line => draw_xy(&mut svg, kind, &points, w, h),
            ChartKind::Pie => draw_pie(&mut svg, &points, w, h),
        }
        svg.push_str("</svg>");
        tracing::debug!(?kind, points = points.len(), "rendered svg chart");
        Ok(RenderedChart {
            mime: "image/svg+xml",
            bytes: svg.into_bytes(),
        })
    }
}

fn draw_xy(svg: &mut String, kind: ChartKind, points: &[(&str, f64)], w: f64, h: f64) {
    let (left, right, top, bottom) = (60.0, 20.0, 50.0, 60.0);
    let plot_w = w - left - right;
    let plot_h = h - top - bottom;
    let max = points.iter().map(|p| p.1).fold(0.0_f64, f64::max);
    let min = points.iter().map(|p| p.1).fold(0.0_f64, f64::min);
    let span = if max - min > 0.0 { max - min } else { 1.0 };
    let y_of = |v: f64| top + (max - v) / span * plot_h;
    let slot = plot_w / points.len().max(1) as f64;
    let zero_y = y_of(0.0);

    let _ = write!(
        svg,
        r#"<line x1="{left}" y1="{zero_y}" x2="{}" y2="{zero_y}" stroke="black"/>"#,
        left + plot_w
    );
    let mut line_path = String::new();
    for (i, (label, v)) in points.iter().enumerate() {
        let cx = left + slot * (i as f64 + 0.5);
        let y = y_of(*v);
        match kind {
            ChartKind::Bar => {
                let _ = write!(
                    svg,
                    r##"<rect x="{}" y="{}" width="{}" height="{}" fill="#66B2FF"/>"##,
                    cx - slot * 0.35,
                    y.min(zero_y),
                    slot * 0.7,
                    (zero_y - y).abs()
                );
            }
            _ => {
                let _ = write!(line_path, "{}{cx},{y} ", if i == 0 { "M" } else { "L" });
            }
        }
        let _ = write!(
            svg,
            r#"<text x="{cx}" y="{}" font-family="Helvetica" font-size="10" text-anchor="middle">{}</text>"#,
            h - bottom + 16.0,
            escape(label)
        );
    }
    if kind == ChartKind::Line {
        let _ = write!(
            svg,
            r##"<path d="{}" fill="none" stroke="#66B2FF" stroke-width="2"/>"##,
            line_path.trim_end()
        );
    }
}

fn draw_pie(svg: &mut String, points: &[(&str, f64)], w: f64, h: f64) {
    let (cx, cy) = (w / 2.0, h / 2.0 + 15.0);
    let r = (w.min(h) / 2.0) - 60.0;
    let total: f64 = points.iter().map(|p| p.1.max(0.0)).sum();
    if total <= 0.0 {
        let _ = write!(svg, r#"<circle cx="{cx}" cy="{cy}" r="{r}" fill="{}"/>"#, PALETTE[0]);
        return;
    }

    let mut angle = -PI / 2.0;
    for (i, (label, v)) in points.iter().enumerate() {
        let frac = v.max(0.0) / total;
        if frac <= 0.0 {
            continue;
        }
        let color = PALETTE[i % PALETTE.len()];
        let sweep = frac * 2.0 * PI;
        if frac >= 1.0 {
            let _ = write!(svg, r#"<circle cx="{cx}" cy="{cy}" r="{r}" fill="{color}"/>"#);
        } else {
            let (x0, y0) = (cx + r * angle.cos(), cy + r * angle.sin());
            let end = angle + sweep;
            let (x1, y1) = (cx + r * end.cos(), cy + r * end.sin());
            let large = if sweep > PI { 1 } else { 0 };
            let _ = write!(
                svg,
                r#"<path d="M{cx},{cy} L{x0},{y0} A{r},{r} 0 {large} 1 {x1},{y1} Z" fill="{color}"/>"#
            );
        }
        let mid = angle + sweep / 2.0;
        let _ = write!(
            svg,
            r#"<text x="{}" y="{}" font-family="Helvetica" font-size="12" text-anchor="middle">{} ({:.1}%)</text>"#,
            cx + (r + 30.0) * mid.cos(),
            cy + (r + 30.0) * mid.sin(),
            escape(label),
            frac * 100.0
        );
        angle += sweep;
    }
}

fn escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
