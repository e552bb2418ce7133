// ==========================================
// 健身连锁记录系统 - 报表编排器
// ==========================================
// 用途: 读取快照 -> 运行报表目录 -> 交给渲染器 -> 产出 ReportArtifact
// 红线: generate_all 从不提前终止, 单个报表/图表失败只影响自身
// 红线: 每次调用重新读取快照, 不跨调用缓存
// ==========================================

use crate::config::ReportParameters;
use crate::domain::issue::DataIssue;
use crate::domain::report::ReportArtifact;
use crate::domain::types::{ArtifactStatus, SourceName};
use crate::engine::catalog::{ChartPlan, ReportCatalog, ReportKind};
use crate::engine::error::{ReportError, ReportResult};
use crate::engine::snapshot::Snapshot;
use crate::render::ChartRenderer;
use crate::repository::RecordStore;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info, warn};

// ==========================================
// ReportOrchestrator - 报表编排器
// ==========================================
pub struct ReportOrchestrator<S, R>
where
    S: RecordStore,
    R: ChartRenderer,
{
    store: S,
    renderer: R,
    catalog: ReportCatalog,
    reports_directory: PathBuf,
    include_supplementary: bool,
}

impl<S, R> ReportOrchestrator<S, R>
where
    S: RecordStore,
    R: ChartRenderer,
{
    /// 创建编排器
    ///
    /// # 参数
    /// - store: 数据源
    /// - renderer: 图表渲染器
    /// - reports_directory: 产物输出目录 (不存在时按需创建)
    pub fn new(store: S, renderer: R, reports_directory: impl Into<PathBuf>) -> Self {
        Self {
            store,
            renderer,
            catalog: ReportCatalog::new(),
            reports_directory: reports_directory.into(),
            include_supplementary: false,
        }
    }

    /// generate_all 是否追加补充报表
    pub fn with_supplementary(mut self, include: bool) -> Self {
        self.include_supplementary = include;
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn reports_directory(&self) -> &Path {
        &self.reports_directory
    }

    /// generate_all 的执行顺序
    pub fn scheduled_kinds(&self) -> Vec<ReportKind> {
        let mut kinds = ReportKind::STANDARD.to_vec();
        if self.include_supplementary {
            kinds.extend(ReportKind::SUPPLEMENTARY);
        }
        kinds
    }

    /// 产物路径: reports_directory/{name}.{ext}
    pub fn artifact_path(&self, report_name: &str) -> PathBuf {
        self.reports_directory
            .join(format!("{}.{}", report_name, self.renderer.file_extension()))
    }

    /// 生成单个报表
    ///
    /// # 返回
    /// 每个图表一个产物; 报表级失败时只有一个以主图表命名的 Failed 产物
    pub fn generate_one(&self, kind: ReportKind, params: &ReportParameters) -> Vec<ReportArtifact> {
        let snapshot = Snapshot::capture(&self.store, kind.required_sources());
        self.run_report(kind, &snapshot, params)
    }

    /// 按固定顺序生成全部报表
    ///
    /// 调用开始时读取一次快照; 不返回错误
    pub fn generate_all(&self, params: &ReportParameters) -> Vec<ReportArtifact> {
        let kinds = self.scheduled_kinds();

        // ==========================================
        // 步骤1: 读取所需数据源的并集
        // ==========================================
        let sources: Vec<SourceName> = SourceName::ALL
            .iter()
            .copied()
            .filter(|source| kinds.iter().any(|k| k.required_sources().contains(source)))
            .collect();
        let snapshot = Snapshot::capture(&self.store, &sources);

        // ==========================================
        // 步骤2: 逐个运行报表, 互不影响
        // ==========================================
        let mut artifacts = Vec::new();
        for kind in &kinds {
            artifacts.extend(self.run_report(*kind, &snapshot, params));
        }

        let count = |status: ArtifactStatus| artifacts.iter().filter(|a| a.status == status).count();
        info!(
            reports = kinds.len(),
            artifacts = artifacts.len(),
            success = count(ArtifactStatus::Success),
            skipped = count(ArtifactStatus::Skipped),
            failed = count(ArtifactStatus::Failed),
            "全部报表生成完成"
        );

        artifacts
    }

    fn run_report(
        &self,
        kind: ReportKind,
        snapshot: &Snapshot,
        params: &ReportParameters,
    ) -> Vec<ReportArtifact> {
        info!(report = %kind, "开始生成报表");

        let Some(definition) = self.catalog.get(kind) else {
            return vec![self.report_failure(kind, "报表未在目录中注册")];
        };

        let output = match definition.build(snapshot, params) {
            Ok(output) => output,
            Err(e) => return vec![self.report_failure(kind, &e.to_string())],
        };

        let directory = self.ensure_reports_directory();
        let artifacts: Vec<ReportArtifact> = output
            .charts
            .iter()
            .map(|chart| self.materialize(chart, &directory, &output.warnings))
            .collect();

        debug!(
            report = %kind,
            charts = artifacts.len(),
            warnings = output.warnings.len(),
            "报表处理完成"
        );
        artifacts
    }

    fn report_failure(&self, kind: ReportKind, reason: &str) -> ReportArtifact {
        let name = kind.primary_artifact();
        error!(report = %kind, artifact = name, reason, "报表生成失败");
        ReportArtifact::failed(name, self.artifact_path(name), reason)
    }

    fn ensure_reports_directory(&self) -> ReportResult<()> {
        fs::create_dir_all(&self.reports_directory).map_err(|e| ReportError::OutputDirectory {
            path: self.reports_directory.display().to_string(),
            message: e.to_string(),
        })
    }

    /// 单个图表 -> 产物
    fn materialize(
        &self,
        chart: &ChartPlan,
        directory: &ReportResult<()>,
        warnings: &[DataIssue],
    ) -> ReportArtifact {
        let name = chart.report_name();
        let path = self.artifact_path(name);

        let artifact = match chart {
            ChartPlan::Skip { reason, .. } => {
                warn!(artifact = name, reason = %reason, "图表已跳过");
                ReportArtifact::skipped(name, path, reason.clone())
            }
            ChartPlan::Render { dataset, kind } => {
                let rendered = match directory {
                    Ok(()) => self
                        .renderer
                        .render(dataset, *kind, &path)
                        .map_err(ReportError::from),
                    Err(e) => Err(e.clone()),
                };
                match rendered {
                    Ok(()) => {
                        info!(artifact = name, path = %path.display(), "图表已生成");
                        ReportArtifact::success(name, path)
                    }
                    Err(e) => {
                        error!(artifact = name, error = %e, "图表生成失败");
                        ReportArtifact::failed(name, path, e.to_string())
                    }
                }
            }
        };

        artifact.with_warnings(warnings.to_vec())
    }
}
