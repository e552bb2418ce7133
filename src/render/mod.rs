// ==========================================
// 健身连锁记录系统 - 图表渲染层
// ==========================================
// 职责: 数据集 -> 图表文件
// 红线: 单次写入, 覆盖同名旧文件
// ==========================================

pub mod error;
pub mod svg;

pub use error::{RenderError, RenderResult};
pub use svg::SvgChartRenderer;

use crate::domain::report::ReportDataset;
use crate::domain::types::ChartKind;
use std::path::Path;

// ==========================================
// ChartRenderer Trait
// ==========================================
// 实现者: SvgChartRenderer
pub trait ChartRenderer {
    /// 渲染数据集到 output_path
    fn render(
        &self,
        dataset: &ReportDataset,
        kind: ChartKind,
        output_path: &Path,
    ) -> RenderResult<()>;

    /// 产物文件扩展名 (不含点)
    fn file_extension(&self) -> &str;
}

impl<T: ChartRenderer + ?Sized> ChartRenderer for &T {
    fn render(
        &self,
        dataset: &ReportDataset,
        kind: ChartKind,
        output_path: &Path,
    ) -> RenderResult<()> {
        (**self).render(dataset, kind, output_path)
    }

    fn file_extension(&self) -> &str {
        (**self).file_extension()
    }
}
