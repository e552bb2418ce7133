// ==========================================
// 健身连锁记录系统 - 仓储层错误类型
// ==========================================
// 工具: thiserror 派生宏
// ==========================================

use thiserror::Error;

/// 仓储层错误类型
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RepositoryError {
    // ===== 数据源错误 =====
    #[error("未注册的数据源: {name}")]
    UnknownSource { name: String },

    // ===== 文件错误 =====
    #[error("文件读写失败 ({path}): {message}")]
    Io { path: String, message: String },

    #[error("CSV 解析失败 ({path}): {message}")]
    CsvParse { path: String, message: String },

    #[error("JSON 解析失败 ({path}): {message}")]
    JsonParse { path: String, message: String },

    #[error("记录结构不支持 ({path}): {message}")]
    UnsupportedShape { path: String, message: String },

    // ===== 通用错误 =====
    #[error("锁获取失败: {0}")]
    LockError(String),
}

impl RepositoryError {
    pub(crate) fn io(path: &std::path::Path, err: std::io::Error) -> Self {
        RepositoryError::Io {
            path: path.display().to_string(),
            message: err.to_string(),
        }
    }
}

/// Result 类型别名
pub type RepositoryResult<T> = Result<T, RepositoryError>;
