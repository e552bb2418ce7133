// ==========================================
// 健身连锁记录系统 - 会员/员工实体
// ==========================================
// 职责: MemberRecord 与排班时段定义
// 红线: 时段必须满足 end_time > start_time
// ==========================================

use crate::domain::types::UserType;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// 成员类型标记缺失时的汇总分组
pub const UNKNOWN_BUCKET: &str = "N/A";

// ==========================================
// TimeSlot - 排班时段
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSlot {
    pub start_time: String, // HH:MM
    pub end_time: String,   // HH:MM
}

impl TimeSlot {
    /// 校验时段格式与先后顺序
    ///
    /// 两端均为 "HH:MM" 且 end_time 在字典序上大于 start_time
    pub fn validate(&self) -> Result<(), String> {
        if !is_hh_mm(&self.start_time) {
            return Err(format!("开始时间格式错误: {}", self.start_time));
        }
        if !is_hh_mm(&self.end_time) {
            return Err(format!("结束时间格式错误: {}", self.end_time));
        }
        if self.end_time <= self.start_time {
            return Err(format!(
                "结束时间必须晚于开始时间: {} - {}",
                self.start_time, self.end_time
            ));
        }
        Ok(())
    }
}

fn is_hh_mm(value: &str) -> bool {
    let bytes = value.as_bytes();
    if bytes.len() != 5 || bytes[2] != b':' {
        return false;
    }
    let digits = [bytes[0], bytes[1], bytes[3], bytes[4]];
    if !digits.iter().all(|b| b.is_ascii_digit()) {
        return false;
    }
    let hour = (digits[0] - b'0') * 10 + (digits[1] - b'0');
    let minute = (digits[2] - b'0') * 10 + (digits[3] - b'0');
    hour < 24 && minute < 60
}

/// 周排班: weekday -> 有序时段列表
pub type WeeklySchedule = BTreeMap<String, Vec<TimeSlot>>;

// ==========================================
// MemberRecord - 会员/员工记录
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemberRecord {
    pub id: String,
    pub name: String,
    pub user_type: UserType,
    pub gym_id: String,
    pub membership_type: Option<String>, // 仅 GymUser 有意义
    pub cost: f64,                       // 非负, 缺失时为 0
    pub join_date: Option<String>,       // 原始文本, 可能为 "N/A"
    pub schedule: WeeklySchedule,
}

impl MemberRecord {
    /// 汇总时使用的会员类型分组名
    pub fn membership_bucket(&self) -> String {
        self.membership_type
            .clone()
            .unwrap_or_else(|| UNKNOWN_BUCKET.to_string())
    }
}
