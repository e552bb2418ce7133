// ==========================================
// 健身连锁记录系统 - 领域类型定义
// ==========================================
// 职责: 用户类型 / 报表状态 / 图表类型 / 数据源名称
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 用户类型 (User Type)
// ==========================================
// 会员与三类员工共用 members 数据源
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserType {
    GymUser,         // 健身会员
    TrainingStaff,   // 训练员工
    WellbeingStaff,  // 健康员工
    ManagementStaff, // 管理员工
}

impl UserType {
    /// 宽松解析: 忽略大小写、空格、下划线与连字符
    ///
    /// "Gym User" / "gym_user" / "GymUser" 均解析为 GymUser
    pub fn parse(raw: &str) -> Option<Self> {
        let normalized: String = raw
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '_' && *c != '-')
            .collect::<String>()
            .to_lowercase();

        match normalized.as_str() {
            "gymuser" | "member" => Some(UserType::GymUser),
            "trainingstaff" => Some(UserType::TrainingStaff),
            "wellbeingstaff" => Some(UserType::WellbeingStaff),
            "managementstaff" => Some(UserType::ManagementStaff),
            _ => None,
        }
    }

    /// 是否为员工（成本计入员工成本）
    pub fn is_staff(&self) -> bool {
        !matches!(self, UserType::GymUser)
    }

    /// 图表中使用的展示名称
    pub fn label(&self) -> &'static str {
        match self {
            UserType::GymUser => "Gym User",
            UserType::TrainingStaff => "Training Staff",
            UserType::WellbeingStaff => "Wellbeing Staff",
            UserType::ManagementStaff => "Management Staff",
        }
    }
}

impl fmt::Display for UserType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UserType::GymUser => write!(f, "GYM_USER"),
            UserType::TrainingStaff => write!(f, "TRAINING_STAFF"),
            UserType::WellbeingStaff => write!(f, "WELLBEING_STAFF"),
            UserType::ManagementStaff => write!(f, "MANAGEMENT_STAFF"),
        }
    }
}

// ==========================================
// 报表产物状态 (Artifact Status)
// ==========================================
// Skipped: 数据不足，不是错误
// Failed: 出现未恢复的错误
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ArtifactStatus {
    Success,
    Skipped,
    Failed,
}

impl fmt::Display for ArtifactStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArtifactStatus::Success => write!(f, "SUCCESS"),
            ArtifactStatus::Skipped => write!(f, "SKIPPED"),
            ArtifactStatus::Failed => write!(f, "FAILED"),
        }
    }
}

// ==========================================
// 图表类型 (Chart Kind)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ChartKind {
    Bar,
    StackedBar,
    Line,
    Pie,
    GroupedBar,
}

impl fmt::Display for ChartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChartKind::Bar => write!(f, "bar"),
            ChartKind::StackedBar => write!(f, "stacked-bar"),
            ChartKind::Line => write!(f, "line"),
            ChartKind::Pie => write!(f, "pie"),
            ChartKind::GroupedBar => write!(f, "grouped-bar"),
        }
    }
}

// ==========================================
// 数据源名称 (Source Name)
// ==========================================
// 报表核心只通过这些名称向 RecordStore 取数
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceName {
    Members,
    Gyms,
    Classes,
    Payments,
    Attendance,
}

impl SourceName {
    pub const ALL: [SourceName; 5] = [
        SourceName::Members,
        SourceName::Gyms,
        SourceName::Classes,
        SourceName::Payments,
        SourceName::Attendance,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SourceName::Members => "members",
            SourceName::Gyms => "gyms",
            SourceName::Classes => "classes",
            SourceName::Payments => "payments",
            SourceName::Attendance => "attendance",
        }
    }
}

impl fmt::Display for SourceName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_type_parse_tolerant() {
        assert_eq!(UserType::parse("Gym User"), Some(UserType::GymUser));
        assert_eq!(UserType::parse("gym_user"), Some(UserType::GymUser));
        assert_eq!(UserType::parse("GymUser"), Some(UserType::GymUser));
        assert_eq!(
            UserType::parse("Training-Staff"),
            Some(UserType::TrainingStaff)
        );
        assert_eq!(
            UserType::parse("MANAGEMENT STAFF"),
            Some(UserType::ManagementStaff)
        );
        assert_eq!(UserType::parse("visitor"), None);
    }

    #[test]
    fn test_staff_flag() {
        assert!(!UserType::GymUser.is_staff());
        assert!(UserType::WellbeingStaff.is_staff());
    }

    #[test]
    fn test_chart_kind_display() {
        assert_eq!(ChartKind::StackedBar.to_string(), "stacked-bar");
        assert_eq!(ChartKind::GroupedBar.to_string(), "grouped-bar");
    }
}
