// ==========================================
// 健身连锁记录系统 - 报表目录
// ==========================================
// 职责: 固定的命名报表定义, 每个报表是快照+参数上的纯函数
// 输出: 一个或两个图表 (待渲染数据集 或 跳过原因)
// ==========================================

pub mod appointments;
pub mod attendance;
pub mod membership_fees;
pub mod membership_growth;
pub mod payment;
pub mod supplementary;

pub use appointments::AppointmentsVsStaffCostReport;
pub use attendance::AttendanceReport;
pub use membership_fees::MembershipFeesReport;
pub use membership_growth::MembershipGrowthReport;
pub use payment::PaymentReport;
pub use supplementary::{DailyAttendanceReport, GymMembershipReport, MonthlyRevenueReport};

use crate::config::ReportParameters;
use crate::domain::issue::DataIssue;
use crate::domain::report::ReportDataset;
use crate::domain::types::{ChartKind, SourceName};
use crate::engine::error::ReportResult;
use crate::engine::snapshot::Snapshot;
use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 产物名称 (固定, 每个图表一个)
// ==========================================
pub mod artifact_names {
    pub const ATTENDANCE: &str = "attendance_report";
    pub const ATTENDANCE_SCHEDULE: &str = "attendance_schedule_report";
    pub const MEMBERSHIP_GROWTH: &str = "membership_growth_report";
    pub const PAYMENT: &str = "payment_report";
    pub const PAYMENT_DISTRIBUTION: &str = "payment_distribution_pie_report";
    pub const APPOINTMENTS_VS_STAFF_COST: &str = "appointments_vs_staff_cost_report";
    pub const MEMBERSHIP_FEES: &str = "membership_fees_report";
    pub const GYM_MEMBERSHIP: &str = "gym_membership_report";
    pub const MONTHLY_REVENUE: &str = "monthly_revenue_report";
    pub const DAILY_ATTENDANCE: &str = "daily_attendance_report";
}

// ==========================================
// ReportKind - 报表种类
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportKind {
    Attendance,
    MembershipGrowth,
    Payment,
    AppointmentsVsStaffCost,
    MembershipFees,
    GymMembership,
    MonthlyRevenue,
    DailyAttendance,
}

impl ReportKind {
    /// generate_all 的固定顺序
    pub const STANDARD: [ReportKind; 5] = [
        ReportKind::Attendance,
        ReportKind::MembershipGrowth,
        ReportKind::Payment,
        ReportKind::AppointmentsVsStaffCost,
        ReportKind::MembershipFees,
    ];

    /// 补充报表, 仅在配置开启时追加到 generate_all 之后
    pub const SUPPLEMENTARY: [ReportKind; 3] = [
        ReportKind::GymMembership,
        ReportKind::MonthlyRevenue,
        ReportKind::DailyAttendance,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ReportKind::Attendance => "attendance",
            ReportKind::MembershipGrowth => "membership_growth",
            ReportKind::Payment => "payment",
            ReportKind::AppointmentsVsStaffCost => "appointments_vs_staff_cost",
            ReportKind::MembershipFees => "membership_fees",
            ReportKind::GymMembership => "gym_membership",
            ReportKind::MonthlyRevenue => "monthly_revenue",
            ReportKind::DailyAttendance => "daily_attendance",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        let normalized = name.trim().to_lowercase().replace('-', "_");
        Self::STANDARD
            .iter()
            .chain(Self::SUPPLEMENTARY.iter())
            .copied()
            .find(|kind| kind.name() == normalized)
    }

    /// 该报表产生的产物名 (首个为主图表)
    pub fn artifact_names(&self) -> &'static [&'static str] {
        use artifact_names::*;
        match self {
            ReportKind::Attendance => &[ATTENDANCE, ATTENDANCE_SCHEDULE],
            ReportKind::MembershipGrowth => &[MEMBERSHIP_GROWTH],
            ReportKind::Payment => &[PAYMENT, PAYMENT_DISTRIBUTION],
            ReportKind::AppointmentsVsStaffCost => &[APPOINTMENTS_VS_STAFF_COST],
            ReportKind::MembershipFees => &[MEMBERSHIP_FEES],
            ReportKind::GymMembership => &[GYM_MEMBERSHIP],
            ReportKind::MonthlyRevenue => &[MONTHLY_REVENUE],
            ReportKind::DailyAttendance => &[DAILY_ATTENDANCE],
        }
    }

    pub fn primary_artifact(&self) -> &'static str {
        self.artifact_names()[0]
    }

    /// 该报表依赖的数据源
    pub fn required_sources(&self) -> &'static [SourceName] {
        match self {
            ReportKind::Attendance => &[SourceName::Classes],
            ReportKind::MembershipGrowth
            | ReportKind::Payment
            | ReportKind::MembershipFees => &[SourceName::Members],
            ReportKind::AppointmentsVsStaffCost => &[SourceName::Classes, SourceName::Members],
            ReportKind::GymMembership => &[SourceName::Members, SourceName::Gyms],
            ReportKind::MonthlyRevenue => &[SourceName::Payments],
            ReportKind::DailyAttendance => &[SourceName::Attendance],
        }
    }

    pub fn is_supplementary(&self) -> bool {
        Self::SUPPLEMENTARY.contains(self)
    }
}

impl fmt::Display for ReportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ==========================================
// ChartPlan / ReportOutput - 报表输出
// ==========================================
#[derive(Debug, Clone, PartialEq)]
pub enum ChartPlan {
    /// 待渲染的数据集
    Render {
        dataset: ReportDataset,
        kind: ChartKind,
    },
    /// 数据不足, 跳过 (不是错误)
    Skip { report_name: String, reason: String },
}

impl ChartPlan {
    pub fn render(dataset: ReportDataset, kind: ChartKind) -> Self {
        ChartPlan::Render { dataset, kind }
    }

    pub fn skip(report_name: &str, reason: impl Into<String>) -> Self {
        ChartPlan::Skip {
            report_name: report_name.to_string(),
            reason: reason.into(),
        }
    }

    pub fn report_name(&self) -> &str {
        match self {
            ChartPlan::Render { dataset, .. } => &dataset.report_name,
            ChartPlan::Skip { report_name, .. } => report_name,
        }
    }

    pub fn dataset(&self) -> Option<&ReportDataset> {
        match self {
            ChartPlan::Render { dataset, .. } => Some(dataset),
            ChartPlan::Skip { .. } => None,
        }
    }

    pub fn is_skip(&self) -> bool {
        matches!(self, ChartPlan::Skip { .. })
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReportOutput {
    pub charts: Vec<ChartPlan>,
    /// 记录级已恢复问题 (加载 + 报表计算)
    pub warnings: Vec<DataIssue>,
}

impl ReportOutput {
    pub fn chart(&self, report_name: &str) -> Option<&ChartPlan> {
        self.charts.iter().find(|c| c.report_name() == report_name)
    }
}

// ==========================================
// ReportDefinition Trait
// ==========================================
pub trait ReportDefinition {
    fn kind(&self) -> ReportKind;

    /// 快照 + 参数 -> 报表输出
    fn build(&self, snapshot: &Snapshot, params: &ReportParameters) -> ReportResult<ReportOutput>;
}

// ==========================================
// ReportCatalog - 报表目录
// ==========================================
pub struct ReportCatalog {
    entries: Vec<Box<dyn ReportDefinition>>,
}

impl Default for ReportCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportCatalog {
    /// 全部内置报表
    pub fn new() -> Self {
        Self {
            entries: vec![
                Box::new(AttendanceReport::new()),
                Box::new(MembershipGrowthReport::new()),
                Box::new(PaymentReport::new()),
                Box::new(AppointmentsVsStaffCostReport::new()),
                Box::new(MembershipFeesReport::new()),
                Box::new(GymMembershipReport::new()),
                Box::new(MonthlyRevenueReport::new()),
                Box::new(DailyAttendanceReport::new()),
            ],
        }
    }

    pub fn get(&self, kind: ReportKind) -> Option<&dyn ReportDefinition> {
        self.entries
            .iter()
            .find(|entry| entry.kind() == kind)
            .map(|entry| entry.as_ref())
    }

    pub fn kinds(&self) -> Vec<ReportKind> {
        self.entries.iter().map(|entry| entry.kind()).collect()
    }
}
