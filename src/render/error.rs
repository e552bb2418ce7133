// ==========================================
// 健身连锁记录系统 - 渲染错误类型
// ==========================================

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum RenderError {
    #[error("数据集为空: {0}")]
    EmptyDataset(String),

    #[error("数据集序列与分类不一致: {0}")]
    MisalignedDataset(String),

    #[error("图表类型不支持该数据集 ({kind}): {message}")]
    UnsupportedData { kind: String, message: String },

    #[error("图表写入失败 ({path}): {message}")]
    WriteError { path: String, message: String },
}

/// Result 类型别名
pub type RenderResult<T> = Result<T, RenderError>;
