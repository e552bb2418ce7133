// ==========================================
// 健身连锁记录系统 - 报表核心库
// ==========================================
// 技术栈: Rust + CSV/JSON 平面文件 + SVG
// 系统定位: 记录汇总与图表生成 (只读数据源)
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 数据仓储层 - 数据源读写
pub mod repository;

// 导入层 - 无模式记录 -> 类型化实体
pub mod importer;

// 引擎层 - 聚合 / 透视 / 报表
pub mod engine;

// 渲染层 - 图表输出
pub mod render;

// 配置层 - 数据源映射与报表参数
pub mod config;

// 日志系统
pub mod logging;

// API 层 - 对外接口
pub mod api;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::{ArtifactStatus, ChartKind, SourceName, UserType};

// 领域实体
pub use domain::{
    AttendanceRecord, ClassRecord, DataIssue, GymRecord, MemberRecord, PaymentRecord,
    ReportArtifact, ReportDataset,
};

// 引擎
pub use engine::{
    AggregationEngine, PivotBuilder, ReportCatalog, ReportKind, ReportOrchestrator, Snapshot,
};

// 数据源 / 渲染
pub use render::{ChartRenderer, SvgChartRenderer};
pub use repository::{FlatFileRecordStore, InMemoryRecordStore, RecordStore};

// 配置 / API
pub use api::{ApiError, ReportApi, ReportRunSummary};
pub use config::{ReportConfig, ReportParameters};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "健身连锁记录系统";
