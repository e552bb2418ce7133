// ==========================================
// 健身连锁记录系统 - 预约收入 vs 员工成本报表
// ==========================================
// 收入 = 全部课程报名数 × 预约单价
// 成本 = 三类员工 cost 合计
// 红线: 单价必须为有限非负数, 否则报表失败
// ==========================================

use crate::config::ReportParameters;
use crate::domain::class::ClassRecord;
use crate::domain::member::MemberRecord;
use crate::domain::report::{DataSeries, ReportDataset};
use crate::domain::types::ChartKind;
use crate::engine::catalog::artifact_names::APPOINTMENTS_VS_STAFF_COST;
use crate::engine::catalog::{ChartPlan, ReportDefinition, ReportKind, ReportOutput};
use crate::engine::error::{ReportError, ReportResult};
use crate::engine::snapshot::Snapshot;
use tracing::debug;

pub const AMOUNT_SERIES: &str = "Amount";
pub const REVENUE_CATEGORY: &str = "Appointments Revenue";
pub const STAFF_COST_CATEGORY: &str = "Staff Cost";

#[derive(Debug, Default)]
pub struct AppointmentsVsStaffCostReport;

impl AppointmentsVsStaffCostReport {
    pub fn new() -> Self {
        Self
    }

    fn validate_fee(fee: f64) -> ReportResult<f64> {
        if !fee.is_finite() || fee < 0.0 {
            return Err(ReportError::InvalidParameter {
                name: "appointment_fee".to_string(),
                message: format!("预约单价必须为非负有限数, 实际为 {}", fee),
            });
        }
        Ok(fee)
    }

    /// 预约收入
    pub fn appointments_revenue(classes: &[ClassRecord], fee: f64) -> f64 {
        let registrations: usize = classes.iter().map(|c| c.registration_count()).sum();
        registrations as f64 * fee
    }

    /// 员工成本 (非有限值计为 0)
    pub fn staff_cost(members: &[MemberRecord]) -> f64 {
        members
            .iter()
            .filter(|m| m.user_type.is_staff())
            .map(|m| if m.cost.is_finite() { m.cost } else { 0.0 })
            .sum()
    }
}

impl ReportDefinition for AppointmentsVsStaffCostReport {
    fn kind(&self) -> ReportKind {
        ReportKind::AppointmentsVsStaffCost
    }

    fn build(&self, snapshot: &Snapshot, params: &ReportParameters) -> ReportResult<ReportOutput> {
        let fee = Self::validate_fee(params.appointment_fee)?;
        let classes = snapshot.classes()?;
        let members = snapshot.members()?;

        let revenue = Self::appointments_revenue(&classes.records, fee);
        let cost = Self::staff_cost(&members.records);
        debug!(revenue, cost, fee, "预约收入与员工成本计算完成");

        let dataset = ReportDataset::new(APPOINTMENTS_VS_STAFF_COST, "Appointments vs Staff Cost")
            .with_axes("Category", "Amount")
            .with_categories(vec![
                REVENUE_CATEGORY.to_string(),
                STAFF_COST_CATEGORY.to_string(),
            ])
            .with_series(DataSeries::new(AMOUNT_SERIES, vec![revenue, cost]));

        let mut warnings = classes.issues.clone();
        warnings.extend(members.issues.iter().cloned());

        Ok(ReportOutput {
            charts: vec![ChartPlan::render(dataset, ChartKind::Bar)],
            warnings,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::class::Registration;
    use crate::domain::member::WeeklySchedule;
    use crate::domain::types::UserType;

    fn class_with(registrations: usize) -> ClassRecord {
        ClassRecord {
            name: "Yoga".to_string(),
            registered_users: (0..registrations)
                .map(|i| Registration {
                    user_id: Some(i.to_string()),
                    day: Some("Mon".to_string()),
                    time: Some("10:00".to_string()),
                })
                .collect(),
        }
    }

    fn person(id: &str, user_type: UserType, cost: f64) -> MemberRecord {
        MemberRecord {
            id: id.to_string(),
            name: String::new(),
            user_type,
            gym_id: "G1".to_string(),
            membership_type: None,
            cost,
            join_date: None,
            schedule: WeeklySchedule::new(),
        }
    }

    fn snapshot() -> Snapshot {
        Snapshot::empty()
            .with_classes(vec![class_with(3)])
            .with_members(vec![
                person("1", UserType::GymUser, 99.0),
                person("2", UserType::TrainingStaff, 60.0),
                person("3", UserType::WellbeingStaff, 30.0),
                person("4", UserType::ManagementStaff, 10.0),
            ])
    }

    #[test]
    fn test_revenue_from_fee_and_registrations() {
        let params = ReportParameters { appointment_fee: 50.0 };
        let output = AppointmentsVsStaffCostReport::new()
            .build(&snapshot(), &params)
            .unwrap();

        let dataset = output.charts[0].dataset().unwrap();
        assert_eq!(dataset.value(AMOUNT_SERIES, REVENUE_CATEGORY), Some(150.0));
        assert_eq!(dataset.value(AMOUNT_SERIES, STAFF_COST_CATEGORY), Some(100.0));
    }

    #[test]
    fn test_negative_fee_fails() {
        let params = ReportParameters { appointment_fee: -1.0 };
        let result = AppointmentsVsStaffCostReport::new().build(&snapshot(), &params);

        assert!(matches!(result, Err(ReportError::InvalidParameter { .. })));
    }

    #[test]
    fn test_non_finite_fee_fails() {
        let params = ReportParameters {
            appointment_fee: f64::INFINITY,
        };
        assert!(AppointmentsVsStaffCostReport::new()
            .build(&snapshot(), &params)
            .is_err());
    }
}
