// ==========================================
// 健身连锁记录系统 - 报表数据集与产物
// ==========================================
// 职责: ReportDataset (图表数据) / ReportArtifact (生成结果)
// 红线: 两者均为单次运行的临时对象, 不作为实体持久化
// ==========================================

use crate::domain::issue::DataIssue;
use crate::domain::types::ArtifactStatus;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

// ==========================================
// DataSeries - 命名数值序列
// ==========================================
// values 与 ReportDataset.categories 一一对应
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataSeries {
    pub name: String,
    pub values: Vec<f64>,
}

impl DataSeries {
    pub fn new(name: impl Into<String>, values: Vec<f64>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }

    pub fn total(&self) -> f64 {
        self.values.iter().sum()
    }
}

// ==========================================
// ReportDataset - 图表数据集
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportDataset {
    /// 产物名 (如 attendance_report), 同时决定输出文件名
    pub report_name: String,
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub categories: Vec<String>,
    pub series: Vec<DataSeries>,
    pub generated_at: DateTime<Utc>,
}

impl ReportDataset {
    pub fn new(report_name: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            report_name: report_name.into(),
            title: title.into(),
            x_label: String::new(),
            y_label: String::new(),
            categories: Vec::new(),
            series: Vec::new(),
            generated_at: Utc::now(),
        }
    }

    pub fn with_axes(mut self, x_label: impl Into<String>, y_label: impl Into<String>) -> Self {
        self.x_label = x_label.into();
        self.y_label = y_label.into();
        self
    }

    pub fn with_categories(mut self, categories: Vec<String>) -> Self {
        self.categories = categories;
        self
    }

    pub fn with_series(mut self, series: DataSeries) -> Self {
        self.series.push(series);
        self
    }

    /// 按名称查找序列
    pub fn series_named(&self, name: &str) -> Option<&DataSeries> {
        self.series.iter().find(|s| s.name == name)
    }

    /// 取某序列在某分类上的值
    pub fn value(&self, series: &str, category: &str) -> Option<f64> {
        let idx = self.categories.iter().position(|c| c == category)?;
        self.series_named(series)?.values.get(idx).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty() || self.series.is_empty()
    }

    /// 序列长度是否与分类数一致
    pub fn is_aligned(&self) -> bool {
        self.series
            .iter()
            .all(|s| s.values.len() == self.categories.len())
    }
}

// ==========================================
// ReportArtifact - 单个图表的生成结果
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportArtifact {
    pub report_name: String,
    pub output_path: PathBuf,
    pub status: ArtifactStatus,
    /// 非 Success 时必有
    pub reason: Option<String>,
    /// 生成过程中已恢复的记录级问题
    pub warnings: Vec<DataIssue>,
}

impl ReportArtifact {
    pub fn success(report_name: impl Into<String>, output_path: PathBuf) -> Self {
        Self {
            report_name: report_name.into(),
            output_path,
            status: ArtifactStatus::Success,
            reason: None,
            warnings: Vec::new(),
        }
    }

    pub fn skipped(
        report_name: impl Into<String>,
        output_path: PathBuf,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            report_name: report_name.into(),
            output_path,
            status: ArtifactStatus::Skipped,
            reason: Some(reason.into()),
            warnings: Vec::new(),
        }
    }

    pub fn failed(
        report_name: impl Into<String>,
        output_path: PathBuf,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            report_name: report_name.into(),
            output_path,
            status: ArtifactStatus::Failed,
            reason: Some(reason.into()),
            warnings: Vec::new(),
        }
    }

    pub fn with_warnings(mut self, warnings: Vec<DataIssue>) -> Self {
        self.warnings = warnings;
        self
    }

    pub fn is_success(&self) -> bool {
        self.status == ArtifactStatus::Success
    }
}
