// ==========================================
// 健身连锁记录系统 - API 层错误类型
// ==========================================
// 职责: 对外错误; 报表内部的失败以 Failed 产物返回, 不进入此类型
// ==========================================

use crate::config::ConfigError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("未知报表: {name}")]
    UnknownReport { name: String },

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Result 类型别名
pub type ApiResult<T> = Result<T, ApiError>;
