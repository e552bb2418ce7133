// ==========================================
// 健身连锁记录系统 - 配置错误类型
// ==========================================
// 工具: thiserror 派生宏
// ==========================================

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("配置文件读取失败 ({path}): {message}")]
    ReadError { path: String, message: String },

    #[error("配置文件解析失败 ({path}): {message}")]
    ParseError { path: String, message: String },

    #[error("配置值错误 (key: {key}, value: {value}): {message}")]
    ConfigValueError {
        key: String,
        value: String,
        message: String,
    },
}

/// Result 类型别名
pub type ConfigResult<T> = Result<T, ConfigError>;
