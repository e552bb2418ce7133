// ==========================================
// 健身连锁记录系统 - 课程出勤报表
// ==========================================
// 主图: 每门课程的报名总数 (bar)
// 副图: (课程, 星期) × 时间 的报名透视 (stacked-bar)
// 退化: 无任何报名 -> 副图跳过, 主图按 0 渲染; 无课程 -> 全部跳过
// 缺少 day/time 的报名计入主图, 不进入副图
// ==========================================

use crate::config::ReportParameters;
use crate::domain::class::{ClassRecord, Registration};
use crate::domain::report::{DataSeries, ReportDataset};
use crate::domain::types::ChartKind;
use crate::engine::aggregation::AggregationEngine;
use crate::engine::catalog::artifact_names::{ATTENDANCE, ATTENDANCE_SCHEDULE};
use crate::engine::catalog::{ChartPlan, ReportDefinition, ReportKind, ReportOutput};
use crate::engine::error::ReportResult;
use crate::engine::pivot::PivotBuilder;
use crate::engine::snapshot::Snapshot;

pub const REGISTRATIONS_SERIES: &str = "Registrations";

#[derive(Debug, Default)]
pub struct AttendanceReport {
    aggregation: AggregationEngine,
    pivot: PivotBuilder,
}

impl AttendanceReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// 主图: 课程 -> 报名数 (保留 0 报名的课程)
    fn registrations_per_class(&self, classes: &[ClassRecord]) -> ReportDataset {
        let totals = self.aggregation.sum_by(
            classes,
            |c| c.name.clone(),
            |c| Some(c.registration_count() as f64),
        );

        let (categories, values): (Vec<String>, Vec<f64>) = totals.into_vec().into_iter().unzip();
        ReportDataset::new(ATTENDANCE, "Class Attendance")
            .with_axes("Class", "Registrations")
            .with_categories(categories)
            .with_series(DataSeries::new(REGISTRATIONS_SERIES, values))
    }

    /// 副图: "课程 (星期)" × 时间
    fn schedule_pivot(&self, slots: &[(&ClassRecord, (&str, &str))]) -> ReportDataset {
        let table = self.pivot.build_pivot(
            slots,
            |(class, (day, _))| format!("{} ({})", class.name, day),
            |(_, (_, time))| time.to_string(),
        );

        table
            .to_dataset(ATTENDANCE_SCHEDULE, "Class Attendance by Day and Time")
            .with_axes("Class (Day)", "Registrations")
    }
}

impl ReportDefinition for AttendanceReport {
    fn kind(&self) -> ReportKind {
        ReportKind::Attendance
    }

    fn build(&self, snapshot: &Snapshot, _params: &ReportParameters) -> ReportResult<ReportOutput> {
        let classes = snapshot.classes()?;
        let mut output = ReportOutput {
            charts: Vec::new(),
            warnings: classes.issues.clone(),
        };

        if classes.records.is_empty() {
            output.charts.push(ChartPlan::skip(ATTENDANCE, "没有课程记录"));
            output
                .charts
                .push(ChartPlan::skip(ATTENDANCE_SCHEDULE, "没有课程记录"));
            return Ok(output);
        }

        output.charts.push(ChartPlan::render(
            self.registrations_per_class(&classes.records),
            ChartKind::Bar,
        ));

        let slots: Vec<(&ClassRecord, (&str, &str))> = classes
            .records
            .iter()
            .flat_map(|class| {
                class
                    .registered_users
                    .iter()
                    .filter_map(Registration::slot)
                    .map(move |slot| (class, slot))
            })
            .collect();

        if slots.is_empty() {
            output.charts.push(ChartPlan::skip(
                ATTENDANCE_SCHEDULE,
                "没有带星期与时间的课程报名记录",
            ));
        } else {
            output.charts.push(ChartPlan::render(
                self.schedule_pivot(&slots),
                ChartKind::StackedBar,
            ));
        }

        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn class(name: &str, slots: &[(&str, &str)]) -> ClassRecord {
        ClassRecord {
            name: name.to_string(),
            registered_users: slots
                .iter()
                .map(|(day, time)| Registration {
                    user_id: None,
                    day: Some(day.to_string()),
                    time: Some(time.to_string()),
                })
                .collect(),
        }
    }

    fn build(classes: Vec<ClassRecord>) -> ReportOutput {
        let snapshot = Snapshot::empty().with_classes(classes);
        AttendanceReport::new()
            .build(&snapshot, &ReportParameters::default())
            .unwrap()
    }

    #[test]
    fn test_single_registration() {
        let output = build(vec![class("Yoga", &[("Mon", "10:00")])]);

        let primary = output.chart(ATTENDANCE).unwrap().dataset().unwrap();
        assert_eq!(primary.value(REGISTRATIONS_SERIES, "Yoga"), Some(1.0));
        assert!(!output.chart(ATTENDANCE_SCHEDULE).unwrap().is_skip());
    }

    #[test]
    fn test_no_registrations_skips_secondary_only() {
        let output = build(vec![class("Yoga", &[]), class("Spin", &[])]);

        let primary = output.chart(ATTENDANCE).unwrap().dataset().unwrap();
        assert_eq!(primary.categories, vec!["Yoga".to_string(), "Spin".to_string()]);
        assert_eq!(primary.series[0].values, vec![0.0, 0.0]);
        assert!(output.chart(ATTENDANCE_SCHEDULE).unwrap().is_skip());
    }

    #[test]
    fn test_no_classes_skips_both() {
        let output = build(Vec::new());
        assert_eq!(output.charts.len(), 2);
        assert!(output.charts.iter().all(|c| c.is_skip()));
    }

    #[test]
    fn test_schedule_pivot_dense() {
        let output = build(vec![
            class("Yoga", &[("Mon", "10:00"), ("Mon", "10:00"), ("Wed", "18:00")]),
            class("Spin", &[("Tue", "07:00")]),
        ]);

        let schedule = output.chart(ATTENDANCE_SCHEDULE).unwrap().dataset().unwrap();
        assert_eq!(
            schedule.categories,
            vec!["Yoga (Mon)", "Yoga (Wed)", "Spin (Tue)"]
        );
        assert_eq!(schedule.series.len(), 3);
        assert_eq!(schedule.value("10:00", "Yoga (Mon)"), Some(2.0));
        assert_eq!(schedule.value("07:00", "Yoga (Mon)"), Some(0.0));
        assert!(schedule.is_aligned());

        let primary = output.chart(ATTENDANCE).unwrap().dataset().unwrap();
        assert_eq!(primary.value(REGISTRATIONS_SERIES, "Yoga"), Some(3.0));
    }

    #[test]
    fn test_unscheduled_registration_counted_in_primary_only() {
        let mut yoga = class("Yoga", &[("Mon", "10:00")]);
        yoga.registered_users.push(Registration {
            user_id: Some("1".to_string()),
            day: Some("Mon".to_string()),
            time: None,
        });

        let output = build(vec![yoga]);

        let primary = output.chart(ATTENDANCE).unwrap().dataset().unwrap();
        assert_eq!(primary.value(REGISTRATIONS_SERIES, "Yoga"), Some(2.0));
        let schedule = output.chart(ATTENDANCE_SCHEDULE).unwrap().dataset().unwrap();
        assert_eq!(schedule.value("10:00", "Yoga (Mon)"), Some(1.0));
        assert_eq!(schedule.series.len(), 1);
    }

    #[test]
    fn test_only_unscheduled_registrations_skip_secondary() {
        let mut yoga = class("Yoga", &[]);
        yoga.registered_users.push(Registration {
            user_id: Some("1".to_string()),
            day: None,
            time: None,
        });

        let output = build(vec![yoga]);

        let primary = output.chart(ATTENDANCE).unwrap().dataset().unwrap();
        assert_eq!(primary.value(REGISTRATIONS_SERIES, "Yoga"), Some(1.0));
        assert!(output.chart(ATTENDANCE_SCHEDULE).unwrap().is_skip());
    }
}
