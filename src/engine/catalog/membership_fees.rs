// ==========================================
// 健身连锁记录系统 - 会员会费报表
// ==========================================
// 仅统计 GymUser, 按会员类型汇总 cost (bar)
// ==========================================

use crate::config::ReportParameters;
use crate::domain::member::MemberRecord;
use crate::domain::report::{DataSeries, ReportDataset};
use crate::domain::types::{ChartKind, UserType};
use crate::engine::aggregation::AggregationEngine;
use crate::engine::catalog::artifact_names::MEMBERSHIP_FEES;
use crate::engine::catalog::{ChartPlan, ReportDefinition, ReportKind, ReportOutput};
use crate::engine::error::ReportResult;
use crate::engine::snapshot::Snapshot;

pub const FEES_SERIES: &str = "Membership Fees";

#[derive(Debug, Default)]
pub struct MembershipFeesReport {
    aggregation: AggregationEngine,
}

impl MembershipFeesReport {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ReportDefinition for MembershipFeesReport {
    fn kind(&self) -> ReportKind {
        ReportKind::MembershipFees
    }

    fn build(&self, snapshot: &Snapshot, _params: &ReportParameters) -> ReportResult<ReportOutput> {
        let members = snapshot.members()?;
        let warnings = members.issues.clone();

        let gym_users: Vec<&MemberRecord> = members
            .records
            .iter()
            .filter(|m| m.user_type == UserType::GymUser)
            .collect();

        if gym_users.is_empty() {
            return Ok(ReportOutput {
                charts: vec![ChartPlan::skip(MEMBERSHIP_FEES, "没有 GymUser 类型的会员")],
                warnings,
            });
        }

        let (categories, values): (Vec<String>, Vec<f64>) = self
            .aggregation
            .sum_by(&gym_users, |m| m.membership_bucket(), |m| Some(m.cost))
            .into_vec()
            .into_iter()
            .unzip();

        let dataset = ReportDataset::new(MEMBERSHIP_FEES, "Membership Fees by Type")
            .with_axes("Membership Type", "Fees")
            .with_categories(categories)
            .with_series(DataSeries::new(FEES_SERIES, values));

        Ok(ReportOutput {
            charts: vec![ChartPlan::render(dataset, ChartKind::Bar)],
            warnings,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::member::WeeklySchedule;

    fn member(id: &str, user_type: UserType, membership: Option<&str>, cost: f64) -> MemberRecord {
        MemberRecord {
            id: id.to_string(),
            name: String::new(),
            user_type,
            gym_id: "G1".to_string(),
            membership_type: membership.map(str::to_string),
            cost,
            join_date: None,
            schedule: WeeklySchedule::new(),
        }
    }

    #[test]
    fn test_only_gym_users_counted() {
        let snapshot = Snapshot::empty().with_members(vec![
            member("1", UserType::GymUser, Some("Gold"), 40.0),
            member("2", UserType::TrainingStaff, None, 900.0),
            member("3", UserType::GymUser, Some("Gold"), 10.0),
        ]);

        let output = MembershipFeesReport::new()
            .build(&snapshot, &ReportParameters::default())
            .unwrap();

        let dataset = output.charts[0].dataset().unwrap();
        assert_eq!(dataset.categories, vec!["Gold"]);
        assert_eq!(dataset.value(FEES_SERIES, "Gold"), Some(50.0));
    }

    #[test]
    fn test_no_gym_users_is_skip() {
        let snapshot = Snapshot::empty().with_members(vec![member(
            "1",
            UserType::ManagementStaff,
            None,
            100.0,
        )]);

        let output = MembershipFeesReport::new()
            .build(&snapshot, &ReportParameters::default())
            .unwrap();

        assert!(output.charts[0].is_skip());
    }
}
