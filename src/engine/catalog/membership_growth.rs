// ==========================================
// 健身连锁记录系统 - 会员增长报表
// ==========================================
// 解析 join_date, 丢弃无效值, 按年月分桶计数 (line)
// 退化: 没有任何有效日期 -> 跳过并告警, 不算失败
// ==========================================

use crate::config::ReportParameters;
use crate::domain::issue::DataIssue;
use crate::domain::report::{DataSeries, ReportDataset};
use crate::domain::types::{ChartKind, SourceName};
use crate::engine::aggregation::{is_date_sentinel, month_bucket, AggregationEngine, DATE_PATTERN};
use crate::engine::catalog::artifact_names::MEMBERSHIP_GROWTH;
use crate::engine::catalog::{ChartPlan, ReportDefinition, ReportKind, ReportOutput};
use crate::engine::error::ReportResult;
use crate::engine::snapshot::Snapshot;
use chrono::NaiveDate;
use tracing::warn;

pub const NEW_MEMBERS_SERIES: &str = "New Members";

#[derive(Debug, Default)]
pub struct MembershipGrowthReport {
    aggregation: AggregationEngine,
}

impl MembershipGrowthReport {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ReportDefinition for MembershipGrowthReport {
    fn kind(&self) -> ReportKind {
        ReportKind::MembershipGrowth
    }

    fn build(&self, snapshot: &Snapshot, _params: &ReportParameters) -> ReportResult<ReportOutput> {
        let members = snapshot.members()?;
        let mut warnings = members.issues.clone();

        // 1. 解析入会日期; 格式错误记为 InvalidRecord, 空值与哨兵值直接忽略
        let mut join_dates: Vec<NaiveDate> = Vec::new();
        for (index, member) in members.records.iter().enumerate() {
            let Some(raw) = member.join_date.as_deref() else {
                continue;
            };
            match AggregationEngine::parse_date(raw, DATE_PATTERN) {
                Some(date) => join_dates.push(date),
                None if raw.trim().is_empty() || is_date_sentinel(raw) => {}
                None => {
                    let issue = DataIssue::invalid(
                        SourceName::Members.as_str(),
                        index,
                        "join_date",
                        format!("member {} 的入会日期无法解析: {}", member.id, raw),
                    );
                    warn!(%issue, "入会日期已忽略");
                    warnings.push(issue);
                }
            }
        }

        if join_dates.is_empty() {
            warn!("没有有效的入会日期, 会员增长报表跳过");
            return Ok(ReportOutput {
                charts: vec![ChartPlan::skip(MEMBERSHIP_GROWTH, "没有有效的入会日期")],
                warnings,
            });
        }

        // 2. 按年月分桶, 时间升序
        join_dates.sort();
        let buckets = self.aggregation.count_by(&join_dates, |d| month_bucket(*d));
        let (categories, values): (Vec<String>, Vec<f64>) = buckets
            .into_vec()
            .into_iter()
            .map(|(month, count)| (month, count as f64))
            .unzip();

        let dataset = ReportDataset::new(MEMBERSHIP_GROWTH, "Membership Growth")
            .with_axes("Month", "New Members")
            .with_categories(categories)
            .with_series(DataSeries::new(NEW_MEMBERS_SERIES, values));

        Ok(ReportOutput {
            charts: vec![ChartPlan::render(dataset, ChartKind::Line)],
            warnings,
        })
    }
}
