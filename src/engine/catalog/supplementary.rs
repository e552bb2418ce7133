// ==========================================
// 健身连锁记录系统 - 补充报表
// ==========================================
// GymMembership:   场馆 × 用户类型 人数 (stacked-bar)
// MonthlyRevenue:  缴费按月汇总 (line)
// DailyAttendance: 签到按日计数 (bar)
// ==========================================

use crate::config::ReportParameters;
use crate::domain::issue::DataIssue;
use crate::domain::report::{DataSeries, ReportDataset};
use crate::domain::types::{ChartKind, SourceName};
use crate::engine::aggregation::{is_date_sentinel, month_bucket, AggregationEngine, DATE_PATTERN};
use crate::engine::catalog::artifact_names::{DAILY_ATTENDANCE, GYM_MEMBERSHIP, MONTHLY_REVENUE};
use crate::engine::catalog::{ChartPlan, ReportDefinition, ReportKind, ReportOutput};
use crate::engine::error::ReportResult;
use crate::engine::pivot::PivotBuilder;
use crate::engine::snapshot::Snapshot;
use chrono::NaiveDate;
use std::collections::HashSet;
use tracing::warn;

pub const PAYMENTS_SERIES: &str = "Payments";
pub const CHECK_INS_SERIES: &str = "Check-ins";

/// 解析日期列; 格式错误的非哨兵值记为 InvalidRecord
fn parse_dated<'r, T>(
    source: SourceName,
    records: &'r [T],
    date_of: impl Fn(&T) -> &str,
    issues: &mut Vec<DataIssue>,
) -> Vec<(NaiveDate, &'r T)> {
    let mut dated = Vec::new();
    for (index, record) in records.iter().enumerate() {
        let raw = date_of(record);
        match AggregationEngine::parse_date(raw, DATE_PATTERN) {
            Some(date) => dated.push((date, record)),
            None if raw.trim().is_empty() || is_date_sentinel(raw) => {}
            None => {
                let issue = DataIssue::invalid(
                    source.as_str(),
                    index,
                    "date",
                    format!("日期无法解析: {}", raw),
                );
                warn!(%issue, "记录已忽略");
                issues.push(issue);
            }
        }
    }
    // 稳定排序, 同日记录保持输入顺序
    dated.sort_by_key(|(date, _)| *date);
    dated
}

// ==========================================
// GymMembershipReport
// ==========================================
#[derive(Debug, Default)]
pub struct GymMembershipReport {
    aggregation: AggregationEngine,
    pivot: PivotBuilder,
}

impl GymMembershipReport {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ReportDefinition for GymMembershipReport {
    fn kind(&self) -> ReportKind {
        ReportKind::GymMembership
    }

    fn build(&self, snapshot: &Snapshot, _params: &ReportParameters) -> ReportResult<ReportOutput> {
        let members = snapshot.members()?;
        let gyms = snapshot.gyms()?;

        let joined = self
            .aggregation
            .join_members_with_gyms(&members.records, &gyms.records);

        let mut warnings = members.issues.clone();
        warnings.extend(gyms.issues.iter().cloned());
        warnings.extend(joined.issues);

        if joined.records.is_empty() {
            return Ok(ReportOutput {
                charts: vec![ChartPlan::skip(GYM_MEMBERSHIP, "没有可关联到场馆的会员")],
                warnings,
            });
        }

        let table = self.pivot.build_pivot(
            &joined.records,
            |m| m.gym_name.clone(),
            |m| m.member.user_type.label(),
        );
        let dataset = table
            .to_dataset(GYM_MEMBERSHIP, "Members per Gym")
            .with_axes("Gym", "Members");

        Ok(ReportOutput {
            charts: vec![ChartPlan::render(dataset, ChartKind::StackedBar)],
            warnings,
        })
    }
}

// ==========================================
// MonthlyRevenueReport
// ==========================================
#[derive(Debug, Default)]
pub struct MonthlyRevenueReport {
    aggregation: AggregationEngine,
}

impl MonthlyRevenueReport {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ReportDefinition for MonthlyRevenueReport {
    fn kind(&self) -> ReportKind {
        ReportKind::MonthlyRevenue
    }

    fn build(&self, snapshot: &Snapshot, _params: &ReportParameters) -> ReportResult<ReportOutput> {
        let payments = snapshot.payments()?;
        let mut warnings = payments.issues.clone();

        let dated = parse_dated(
            SourceName::Payments,
            &payments.records,
            |p| p.date.as_str(),
            &mut warnings,
        );
        if dated.is_empty() {
            return Ok(ReportOutput {
                charts: vec![ChartPlan::skip(MONTHLY_REVENUE, "没有有效的缴费日期")],
                warnings,
            });
        }

        let (categories, values): (Vec<String>, Vec<f64>) = self
            .aggregation
            .sum_by(&dated, |(date, _)| month_bucket(*date), |(_, p)| Some(p.amount))
            .into_vec()
            .into_iter()
            .unzip();

        let dataset = ReportDataset::new(MONTHLY_REVENUE, "Monthly Revenue")
            .with_axes("Month", "Revenue")
            .with_categories(categories)
            .with_series(DataSeries::new(PAYMENTS_SERIES, values));

        Ok(ReportOutput {
            charts: vec![ChartPlan::render(dataset, ChartKind::Line)],
            warnings,
        })
    }
}

// ==========================================
// DailyAttendanceReport
// ==========================================
#[derive(Debug, Default)]
pub struct DailyAttendanceReport {
    aggregation: AggregationEngine,
}

impl DailyAttendanceReport {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ReportDefinition for DailyAttendanceReport {
    fn kind(&self) -> ReportKind {
        ReportKind::DailyAttendance
    }

    fn build(&self, snapshot: &Snapshot, _params: &ReportParameters) -> ReportResult<ReportOutput> {
        let attendance = snapshot.attendance()?;
        let mut warnings = attendance.issues.clone();

        let mut dated = parse_dated(
            SourceName::Attendance,
            &attendance.records,
            |a| a.date.as_str(),
            &mut warnings,
        );
        // 同一会员同日重复签到只计一次
        let mut seen = HashSet::new();
        dated.retain(|(date, a)| seen.insert((*date, a.member_id.clone())));

        if dated.is_empty() {
            return Ok(ReportOutput {
                charts: vec![ChartPlan::skip(DAILY_ATTENDANCE, "没有有效的签到日期")],
                warnings,
            });
        }

        let (categories, values): (Vec<String>, Vec<f64>) = self
            .aggregation
            .count_by(&dated, |(date, _)| date.format(DATE_PATTERN).to_string())
            .into_vec()
            .into_iter()
            .map(|(day, count)| (day, count as f64))
            .unzip();

        let dataset = ReportDataset::new(DAILY_ATTENDANCE, "Daily Attendance")
            .with_axes("Date", "Check-ins")
            .with_categories(categories)
            .with_series(DataSeries::new(CHECK_INS_SERIES, values));

        Ok(ReportOutput {
            charts: vec![ChartPlan::render(dataset, ChartKind::Bar)],
            warnings,
        })
    }
}
