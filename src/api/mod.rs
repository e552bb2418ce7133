// ==========================================
// 健身连锁记录系统 - API 层
// ==========================================
// 职责: 对外报表接口, 供 CLI 与嵌入调用使用
// ==========================================

pub mod error;
pub mod report_api;

// 重导出核心类型
pub use error::{ApiError, ApiResult};
pub use report_api::{ReportApi, ReportDescriptor, ReportRunSummary};
