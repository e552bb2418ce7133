// ==========================================
// 健身连锁记录系统 - SVG 图表渲染
// ==========================================
// 支持: bar / grouped-bar / stacked-bar / line / pie
// 输出: 单个 .svg 文件
// ==========================================

use crate::domain::report::ReportDataset;
use crate::domain::types::ChartKind;
use crate::render::error::{RenderError, RenderResult};
use crate::render::ChartRenderer;
use std::fmt::Write as _;
use std::fs;
use std::path::Path;
use tracing::debug;

const WIDTH: f64 = 860.0;
const HEIGHT: f64 = 520.0;
const MARGIN_LEFT: f64 = 80.0;
const MARGIN_RIGHT: f64 = 180.0; // 图例区
const MARGIN_TOP: f64 = 60.0;
const MARGIN_BOTTOM: f64 = 110.0;
const Y_TICKS: usize = 5;

const PALETTE: [&str; 8] = [
    "#4e79a7", "#f28e2b", "#e15759", "#76b7b2", "#59a14f", "#edc948", "#b07aa1", "#ff9da7",
];

// ==========================================
// SvgChartRenderer
// ==========================================
#[derive(Debug, Default, Clone)]
pub struct SvgChartRenderer;

impl SvgChartRenderer {
    pub fn new() -> Self {
        Self
    }

    /// 生成 SVG 文本 (不落盘)
    pub fn render_to_string(&self, dataset: &ReportDataset, kind: ChartKind) -> RenderResult<String> {
        if dataset.is_empty() {
            return Err(RenderError::EmptyDataset(dataset.report_name.clone()));
        }
        if !dataset.is_aligned() {
            return Err(RenderError::MisalignedDataset(dataset.report_name.clone()));
        }

        let mut doc = SvgDocument::new(&dataset.title);
        match kind {
            ChartKind::Bar | ChartKind::GroupedBar => draw_grouped_bars(&mut doc, dataset),
            ChartKind::StackedBar => draw_stacked_bars(&mut doc, dataset),
            ChartKind::Line => draw_lines(&mut doc, dataset),
            ChartKind::Pie => draw_pie(&mut doc, dataset)?,
        }
        Ok(doc.finish())
    }
}

impl ChartRenderer for SvgChartRenderer {
    fn render(
        &self,
        dataset: &ReportDataset,
        kind: ChartKind,
        output_path: &Path,
    ) -> RenderResult<()> {
        let content = self.render_to_string(dataset, kind)?;

        fs::write(output_path, content).map_err(|e| RenderError::WriteError {
            path: output_path.display().to_string(),
            message: e.to_string(),
        })?;

        debug!(
            report = %dataset.report_name,
            kind = %kind,
            path = %output_path.display(),
            "图表已写入"
        );
        Ok(())
    }

    fn file_extension(&self) -> &str {
        "svg"
    }
}

// ==========================================
// SvgDocument - 简易 SVG 文本构建
// ==========================================
struct SvgDocument {
    body: String,
}

impl SvgDocument {
    fn new(title: &str) -> Self {
        let mut body = String::new();
        let _ = writeln!(
            body,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}" font-family="sans-serif">"#,
            w = WIDTH,
            h = HEIGHT
        );
        let _ = writeln!(body, r#"<rect width="100%" height="100%" fill="white"/>"#);
        let _ = writeln!(
            body,
            r#"<text x="{:.1}" y="32" font-size="20" text-anchor="middle">{}</text>"#,
            WIDTH / 2.0,
            escape(title)
        );
        Self { body }
    }

    fn rect(&mut self, x: f64, y: f64, w: f64, h: f64, fill: &str) {
        let _ = writeln!(
            self.body,
            r#"<rect x="{:.1}" y="{:.1}" width="{:.1}" height="{:.1}" fill="{}"/>"#,
            x, y, w, h, fill
        );
    }

    fn line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, stroke: &str) {
        let _ = writeln!(
            self.body,
            r#"<line x1="{:.1}" y1="{:.1}" x2="{:.1}" y2="{:.1}" stroke="{}"/>"#,
            x1, y1, x2, y2, stroke
        );
    }

    fn text(&mut self, x: f64, y: f64, size: u32, anchor: &str, content: &str) {
        let _ = writeln!(
            self.body,
            r#"<text x="{:.1}" y="{:.1}" font-size="{}" text-anchor="{}">{}</text>"#,
            x,
            y,
            size,
            anchor,
            escape(content)
        );
    }

    fn rotated_text(&mut self, x: f64, y: f64, content: &str) {
        let _ = writeln!(
            self.body,
            r#"<text x="{x:.1}" y="{y:.1}" font-size="11" text-anchor="end" transform="rotate(-35 {x:.1} {y:.1})">{}</text>"#,
            escape(content),
            x = x,
            y = y
        );
    }

    fn polyline(&mut self, points: &[(f64, f64)], stroke: &str) {
        let coords: Vec<String> = points
            .iter()
            .map(|(x, y)| format!("{:.1},{:.1}", x, y))
            .collect();
        let _ = writeln!(
            self.body,
            r#"<polyline points="{}" fill="none" stroke="{}" stroke-width="2"/>"#,
            coords.join(" "),
            stroke
        );
        for (x, y) in points {
            let _ = writeln!(
                self.body,
                r#"<circle cx="{:.1}" cy="{:.1}" r="3" fill="{}"/>"#,
                x, y, stroke
            );
        }
    }

    fn path(&mut self, d: &str, fill: &str) {
        let _ = writeln!(
            self.body,
            r#"<path d="{}" fill="{}" stroke="white"/>"#,
            d, fill
        );
    }

    fn finish(mut self) -> String {
        self.body.push_str("</svg>\n");
        self.body
    }
}

fn escape(raw: &str) -> String {
    raw.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

fn color(idx: usize) -> &'static str {
    PALETTE[idx % PALETTE.len()]
}

// ==========================================
// 坐标系
// ==========================================
struct Plot {
    max: f64,
    slot: f64, // 每个分类占用的宽度
}

impl Plot {
    fn new(max: f64, categories: usize) -> Self {
        let plot_width = WIDTH - MARGIN_LEFT - MARGIN_RIGHT;
        Self {
            max: if max > 0.0 { max } else { 1.0 },
            slot: plot_width / categories.max(1) as f64,
        }
    }

    fn bottom(&self) -> f64 {
        HEIGHT - MARGIN_BOTTOM
    }

    fn height(&self) -> f64 {
        HEIGHT - MARGIN_TOP - MARGIN_BOTTOM
    }

    fn y(&self, value: f64) -> f64 {
        self.bottom() - value.max(0.0) / self.max * self.height()
    }

    fn slot_left(&self, idx: usize) -> f64 {
        MARGIN_LEFT + self.slot * idx as f64
    }

    fn slot_center(&self, idx: usize) -> f64 {
        self.slot_left(idx) + self.slot / 2.0
    }
}

fn draw_axes(doc: &mut SvgDocument, plot: &Plot, dataset: &ReportDataset) {
    let right = WIDTH - MARGIN_RIGHT;
    doc.line(MARGIN_LEFT, plot.bottom(), right, plot.bottom(), "#333");
    doc.line(MARGIN_LEFT, MARGIN_TOP, MARGIN_LEFT, plot.bottom(), "#333");

    for tick in 0..=Y_TICKS {
        let value = plot.max * tick as f64 / Y_TICKS as f64;
        let y = plot.y(value);
        doc.line(MARGIN_LEFT - 4.0, y, MARGIN_LEFT, y, "#333");
        doc.text(MARGIN_LEFT - 8.0, y + 4.0, 11, "end", &format_value(value));
    }

    for (idx, category) in dataset.categories.iter().enumerate() {
        doc.rotated_text(plot.slot_center(idx), plot.bottom() + 16.0, category);
    }

    if !dataset.x_label.is_empty() {
        doc.text(
            (MARGIN_LEFT + right) / 2.0,
            HEIGHT - 12.0,
            13,
            "middle",
            &dataset.x_label,
        );
    }
    if !dataset.y_label.is_empty() {
        doc.text(MARGIN_LEFT, MARGIN_TOP - 12.0, 13, "start", &dataset.y_label);
    }
}

fn draw_legend(doc: &mut SvgDocument, labels: &[String]) {
    let x = WIDTH - MARGIN_RIGHT + 20.0;
    for (idx, label) in labels.iter().enumerate() {
        let y = MARGIN_TOP + idx as f64 * 20.0;
        doc.rect(x, y, 12.0, 12.0, color(idx));
        doc.text(x + 18.0, y + 10.0, 12, "start", label);
    }
}

fn format_value(value: f64) -> String {
    if (value - value.round()).abs() < 1e-9 {
        format!("{}", value.round() as i64)
    } else {
        format!("{:.1}", value)
    }
}

fn series_names(dataset: &ReportDataset) -> Vec<String> {
    dataset.series.iter().map(|s| s.name.clone()).collect()
}

// ==========================================
// 各图表类型
// ==========================================

fn draw_grouped_bars(doc: &mut SvgDocument, dataset: &ReportDataset) {
    let max = dataset
        .series
        .iter()
        .flat_map(|s| s.values.iter().copied())
        .fold(0.0, f64::max);
    let plot = Plot::new(max, dataset.categories.len());
    draw_axes(doc, &plot, dataset);

    let group_width = plot.slot * 0.8;
    let bar_width = group_width / dataset.series.len() as f64;
    for (s_idx, series) in dataset.series.iter().enumerate() {
        for (c_idx, value) in series.values.iter().enumerate() {
            let x = plot.slot_left(c_idx) + plot.slot * 0.1 + bar_width * s_idx as f64;
            let y = plot.y(*value);
            doc.rect(x, y, bar_width, plot.bottom() - y, color(s_idx));
        }
    }

    if dataset.series.len() > 1 {
        draw_legend(doc, &series_names(dataset));
    }
}

fn draw_stacked_bars(doc: &mut SvgDocument, dataset: &ReportDataset) {
    let totals: Vec<f64> = (0..dataset.categories.len())
        .map(|c| dataset.series.iter().map(|s| s.values[c].max(0.0)).sum())
        .collect();
    let max = totals.iter().copied().fold(0.0, f64::max);
    let plot = Plot::new(max, dataset.categories.len());
    draw_axes(doc, &plot, dataset);

    let bar_width = plot.slot * 0.7;
    for c_idx in 0..dataset.categories.len() {
        let x = plot.slot_left(c_idx) + plot.slot * 0.15;
        let mut base = 0.0;
        for (s_idx, series) in dataset.series.iter().enumerate() {
            let value = series.values[c_idx].max(0.0);
            if value == 0.0 {
                continue;
            }
            let top = plot.y(base + value);
            doc.rect(x, top, bar_width, plot.y(base) - top, color(s_idx));
            base += value;
        }
    }

    draw_legend(doc, &series_names(dataset));
}

fn draw_lines(doc: &mut SvgDocument, dataset: &ReportDataset) {
    let max = dataset
        .series
        .iter()
        .flat_map(|s| s.values.iter().copied())
        .fold(0.0, f64::max);
    let plot = Plot::new(max, dataset.categories.len());
    draw_axes(doc, &plot, dataset);

    for (s_idx, series) in dataset.series.iter().enumerate() {
        let points: Vec<(f64, f64)> = series
            .values
            .iter()
            .enumerate()
            .map(|(c_idx, value)| (plot.slot_center(c_idx), plot.y(*value)))
            .collect();
        doc.polyline(&points, color(s_idx));
    }

    if dataset.series.len() > 1 {
        draw_legend(doc, &series_names(dataset));
    }
}

fn draw_pie(doc: &mut SvgDocument, dataset: &ReportDataset) -> RenderResult<()> {
    let series = &dataset.series[0];
    if series.values.iter().any(|v| *v < 0.0) {
        return Err(RenderError::UnsupportedData {
            kind: ChartKind::Pie.to_string(),
            message: "饼图不支持负值".to_string(),
        });
    }
    let total = series.total();
    if total <= 0.0 {
        return Err(RenderError::UnsupportedData {
            kind: ChartKind::Pie.to_string(),
            message: "饼图合计为 0".to_string(),
        });
    }

    let cx = (WIDTH - MARGIN_RIGHT) / 2.0;
    let cy = HEIGHT / 2.0 + 10.0;
    let radius = (HEIGHT - MARGIN_TOP - 60.0) / 2.0;

    let mut labels = Vec::new();
    let mut start = -std::f64::consts::FRAC_PI_2;
    for (idx, value) in series.values.iter().enumerate() {
        let share = value / total;
        labels.push(format!(
            "{} ({:.1}%)",
            dataset.categories[idx],
            share * 100.0
        ));
        if share <= 0.0 {
            continue;
        }
        if share >= 1.0 - 1e-9 {
            // 整圆无法用单段弧表示
            let d = format!(
                "M {cx:.1} {top:.1} A {r:.1} {r:.1} 0 1 1 {cx:.1} {bottom:.1} A {r:.1} {r:.1} 0 1 1 {cx:.1} {top:.1} Z",
                cx = cx,
                top = cy - radius,
                bottom = cy + radius,
                r = radius
            );
            doc.path(&d, color(idx));
            continue;
        }

        let end = start + share * std::f64::consts::TAU;
        let (x1, y1) = (cx + radius * start.cos(), cy + radius * start.sin());
        let (x2, y2) = (cx + radius * end.cos(), cy + radius * end.sin());
        let large_arc = if share > 0.5 { 1 } else { 0 };
        let d = format!(
            "M {:.1} {:.1} L {:.1} {:.1} A {:.1} {:.1} 0 {} 1 {:.1} {:.1} Z",
            cx, cy, x1, y1, radius, radius, large_arc, x2, y2
        );
        doc.path(&d, color(idx));
        start = end;
    }

    draw_legend(doc, &labels);
    Ok(())
}
