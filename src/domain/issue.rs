// ==========================================
// 健身连锁记录系统 - 记录级数据问题
// ==========================================
// 职责: 可恢复的数据问题 (记录无效 / 外键悬空)
// 红线: 这些问题只记录与告警, 不中断报表
// ==========================================

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DataIssue {
    #[error("记录无效 (source={source_name}, index={index}, field={field}): {message}")]
    InvalidRecord {
        source_name: String,
        index: usize,
        field: String,
        message: String,
    },

    #[error("引用缺失: member_id={member_id} 引用了不存在的 gym_id={gym_id}")]
    MissingReference { member_id: String, gym_id: String },
}

impl DataIssue {
    pub fn invalid(
        source_name: impl Into<String>,
        index: usize,
        field: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        DataIssue::InvalidRecord {
            source_name: source_name.into(),
            index,
            field: field.into(),
            message: message.into(),
        }
    }
}
