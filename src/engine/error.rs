// ==========================================
// 健身连锁记录系统 - 报表引擎错误类型
// ==========================================
// 红线: 报表级错误只影响当前报表, 由编排器隔离
// ==========================================

use crate::domain::types::SourceName;
use crate::render::RenderError;
use crate::repository::RepositoryError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ReportError {
    // ===== 数据源错误 =====
    #[error(transparent)]
    Source(#[from] RepositoryError),

    #[error("数据源未加载到快照: {0}")]
    SourceNotCaptured(SourceName),

    // ===== 参数错误 =====
    #[error("参数错误 ({name}): {message}")]
    InvalidParameter { name: String, message: String },

    // ===== 输出错误 =====
    #[error(transparent)]
    Render(#[from] RenderError),

    #[error("报表目录创建失败 ({path}): {message}")]
    OutputDirectory { path: String, message: String },
}

/// Result 类型别名
pub type ReportResult<T> = Result<T, ReportError>;
