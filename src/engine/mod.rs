// ==========================================
// 健身连锁记录系统 - 引擎层
// ==========================================
// 职责: 聚合 / 透视 / 报表目录 / 编排
// 红线: 引擎只读 RecordStore, 不写回数据源
// ==========================================

pub mod aggregation;
pub mod catalog;
pub mod error;
pub mod orchestrator;
pub mod pivot;
pub mod snapshot;

// 重导出核心引擎
pub use aggregation::{AggregationEngine, EnrichedMember, Grouped, JoinOutcome};
pub use catalog::{ChartPlan, ReportCatalog, ReportDefinition, ReportKind, ReportOutput};
pub use error::{ReportError, ReportResult};
pub use orchestrator::ReportOrchestrator;
pub use pivot::{PivotBuilder, PivotTable};
pub use snapshot::Snapshot;
