// ==========================================
// 健身连锁记录系统 - 课程 / 缴费 / 签到实体
// ==========================================

use serde::{Deserialize, Serialize};

// ==========================================
// ClassRecord - 课程及报名
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassRecord {
    pub name: String,
    pub registered_users: Vec<Registration>,
}

/// 单条报名; day/time 缺失时仍计入报名总数, 只是无法排入课表
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Registration {
    pub user_id: Option<String>,
    pub day: Option<String>,
    pub time: Option<String>,
}

impl Registration {
    /// (星期, 时间), 两者齐全时才有值
    pub fn slot(&self) -> Option<(&str, &str)> {
        match (&self.day, &self.time) {
            (Some(day), Some(time)) => Some((day.as_str(), time.as_str())),
            _ => None,
        }
    }
}

impl ClassRecord {
    pub fn registration_count(&self) -> usize {
        self.registered_users.len()
    }
}

// ==========================================
// PaymentRecord - 缴费记录
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentRecord {
    pub date: String,
    pub amount: f64,
}

// ==========================================
// AttendanceRecord - 签到记录
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttendanceRecord {
    pub date: String,
    pub member_id: String,
}
