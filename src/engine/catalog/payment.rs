// ==========================================
// 健身连锁记录系统 - 会费收入报表
// ==========================================
// 主图: 按会员类型汇总 cost (bar)
// 副图: 各会员类型占总收入百分比 (pie)
// 退化: 无会员 -> 两图跳过; 总额为 0 -> 饼图跳过
// ==========================================

use crate::config::ReportParameters;
use crate::domain::member::MemberRecord;
use crate::domain::report::{DataSeries, ReportDataset};
use crate::domain::types::ChartKind;
use crate::engine::aggregation::AggregationEngine;
use crate::engine::catalog::artifact_names::{PAYMENT, PAYMENT_DISTRIBUTION};
use crate::engine::catalog::{ChartPlan, ReportDefinition, ReportKind, ReportOutput};
use crate::engine::error::ReportResult;
use crate::engine::snapshot::Snapshot;
use tracing::debug;

pub const REVENUE_SERIES: &str = "Revenue";
pub const SHARE_SERIES: &str = "Share (%)";

#[derive(Debug, Default)]
pub struct PaymentReport {
    aggregation: AggregationEngine,
}

impl PaymentReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// 会员类型 -> cost 合计
    fn revenue_by_membership(&self, members: &[MemberRecord]) -> (Vec<String>, Vec<f64>) {
        self.aggregation
            .sum_by(members, |m| m.membership_bucket(), |m| Some(m.cost))
            .into_vec()
            .into_iter()
            .unzip()
    }
}

impl ReportDefinition for PaymentReport {
    fn kind(&self) -> ReportKind {
        ReportKind::Payment
    }

    fn build(&self, snapshot: &Snapshot, _params: &ReportParameters) -> ReportResult<ReportOutput> {
        let members = snapshot.members()?;
        let mut output = ReportOutput {
            charts: Vec::new(),
            warnings: members.issues.clone(),
        };

        if members.records.is_empty() {
            output.charts.push(ChartPlan::skip(PAYMENT, "没有会员记录"));
            output
                .charts
                .push(ChartPlan::skip(PAYMENT_DISTRIBUTION, "没有会员记录"));
            return Ok(output);
        }

        let (categories, totals) = self.revenue_by_membership(&members.records);
        let grand_total: f64 = totals.iter().sum();
        debug!(buckets = categories.len(), total = grand_total, "会费汇总完成");

        let revenue = ReportDataset::new(PAYMENT, "Revenue by Membership Type")
            .with_axes("Membership Type", "Revenue")
            .with_categories(categories.clone())
            .with_series(DataSeries::new(REVENUE_SERIES, totals.clone()));
        output.charts.push(ChartPlan::render(revenue, ChartKind::Bar));

        if grand_total <= 0.0 {
            output
                .charts
                .push(ChartPlan::skip(PAYMENT_DISTRIBUTION, "会费总额为 0, 无法计算占比"));
            return Ok(output);
        }

        let shares: Vec<f64> = totals.iter().map(|t| t / grand_total * 100.0).collect();
        let distribution = ReportDataset::new(PAYMENT_DISTRIBUTION, "Revenue Distribution")
            .with_axes("Membership Type", "Share (%)")
            .with_categories(categories)
            .with_series(DataSeries::new(SHARE_SERIES, shares));
        output.charts.push(ChartPlan::render(distribution, ChartKind::Pie));

        Ok(output)
    }
}
