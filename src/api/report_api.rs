// ==========================================
// 健身连锁记录系统 - 报表 API
// ==========================================
// 职责: 报表列表 / 单个报表生成 / 全量生成 + 运行汇总
// 供 CLI 与嵌入调用使用
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use crate::config::{ReportConfig, ReportParameters};
use crate::domain::report::ReportArtifact;
use crate::domain::types::{ArtifactStatus, SourceName};
use crate::engine::{ReportKind, ReportOrchestrator};
use crate::render::{ChartRenderer, SvgChartRenderer};
use crate::repository::{FlatFileRecordStore, RecordStore};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

// ==========================================
// ReportDescriptor - 报表说明
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportDescriptor {
    pub name: String,
    pub artifact_names: Vec<String>,
    pub required_sources: Vec<SourceName>,
    pub supplementary: bool,
}

impl From<ReportKind> for ReportDescriptor {
    fn from(kind: ReportKind) -> Self {
        Self {
            name: kind.name().to_string(),
            artifact_names: kind.artifact_names().iter().map(|n| n.to_string()).collect(),
            required_sources: kind.required_sources().to_vec(),
            supplementary: kind.is_supplementary(),
        }
    }
}

// ==========================================
// ReportRunSummary - 一次全量运行的汇总
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportRunSummary {
    pub run_id: String,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub duration_ms: i64,
    pub success_count: usize,
    pub skipped_count: usize,
    pub failed_count: usize,
    pub artifacts: Vec<ReportArtifact>,
}

impl ReportRunSummary {
    fn new(started_at: DateTime<Utc>, artifacts: Vec<ReportArtifact>) -> Self {
        let finished_at = Utc::now();
        let count = |status: ArtifactStatus| artifacts.iter().filter(|a| a.status == status).count();

        Self {
            run_id: Uuid::new_v4().to_string(),
            started_at,
            finished_at,
            duration_ms: (finished_at - started_at).num_milliseconds(),
            success_count: count(ArtifactStatus::Success),
            skipped_count: count(ArtifactStatus::Skipped),
            failed_count: count(ArtifactStatus::Failed),
            artifacts,
        }
    }

    pub fn has_failures(&self) -> bool {
        self.failed_count > 0
    }
}

// ==========================================
// ReportApi - 报表 API
// ==========================================
pub struct ReportApi<S, R>
where
    S: RecordStore,
    R: ChartRenderer,
{
    parameters: ReportParameters,
    orchestrator: ReportOrchestrator<S, R>,
}

impl ReportApi<FlatFileRecordStore, SvgChartRenderer> {
    /// 按配置创建平面文件 + SVG 的默认组合
    pub fn from_config(config: ReportConfig) -> ApiResult<Self> {
        config.validate()?;
        let store = FlatFileRecordStore::new(config.store_config());
        Ok(Self::new(config, store, SvgChartRenderer::new()))
    }
}

impl<S, R> ReportApi<S, R>
where
    S: RecordStore,
    R: ChartRenderer,
{
    /// 创建报表 API
    ///
    /// # 参数
    /// - config: 报表配置 (输出目录 / 参数 / 是否含补充报表)
    /// - store: 数据源
    /// - renderer: 图表渲染器
    pub fn new(config: ReportConfig, store: S, renderer: R) -> Self {
        let orchestrator = ReportOrchestrator::new(store, renderer, config.reports_directory())
            .with_supplementary(config.include_supplementary_reports);
        Self {
            parameters: config.parameters(),
            orchestrator,
        }
    }

    pub fn parameters(&self) -> &ReportParameters {
        &self.parameters
    }

    /// 全部可用报表 (标准报表在前)
    pub fn list_reports(&self) -> Vec<ReportDescriptor> {
        ReportKind::STANDARD
            .iter()
            .chain(ReportKind::SUPPLEMENTARY.iter())
            .copied()
            .map(ReportDescriptor::from)
            .collect()
    }

    /// 生成单个报表
    ///
    /// # 返回
    /// - Ok(Vec<ReportArtifact>): 每个图表一个产物
    /// - Err(UnknownReport): 报表名无法识别
    pub fn generate_report(&self, name: &str) -> ApiResult<Vec<ReportArtifact>> {
        let kind = ReportKind::from_name(name).ok_or_else(|| ApiError::UnknownReport {
            name: name.to_string(),
        })?;
        Ok(self.orchestrator.generate_one(kind, &self.parameters))
    }

    /// 生成全部报表并汇总
    pub fn generate_all(&self) -> ReportRunSummary {
        let started_at = Utc::now();
        let artifacts = self.orchestrator.generate_all(&self.parameters);
        let summary = ReportRunSummary::new(started_at, artifacts);

        info!(
            run_id = %summary.run_id,
            duration_ms = summary.duration_ms,
            success = summary.success_count,
            skipped = summary.skipped_count,
            failed = summary.failed_count,
            "报表运行结束"
        );
        summary
    }
}
