// ==========================================
// 健身连锁记录系统 - 透视表构建
// ==========================================
// 职责: 两个分类维度上的计数表
// 红线: 稠密表, 每行覆盖数据中出现过的全部列 (缺失补 0)
// 红线: 行顺序 / 列顺序各自为首次出现顺序, 互不影响
// ==========================================

use crate::domain::report::{DataSeries, ReportDataset};
use std::collections::HashMap;
use std::fmt::Display;
use std::hash::Hash;

// ==========================================
// PivotTable - 稠密计数表
// ==========================================
#[derive(Debug, Clone)]
pub struct PivotTable<R, C> {
    rows: Vec<R>,
    columns: Vec<C>,
    row_index: HashMap<R, usize>,
    column_index: HashMap<C, usize>,
    counts: Vec<Vec<usize>>, // counts[row][column]
}

impl<R, C> PivotTable<R, C>
where
    R: Eq + Hash + Clone,
    C: Eq + Hash + Clone,
{
    fn empty() -> Self {
        Self {
            rows: Vec::new(),
            columns: Vec::new(),
            row_index: HashMap::new(),
            column_index: HashMap::new(),
            counts: Vec::new(),
        }
    }

    fn increment(&mut self, row: R, column: C) {
        let col_idx = match self.column_index.get(&column) {
            Some(&idx) => idx,
            None => {
                let idx = self.columns.len();
                self.column_index.insert(column.clone(), idx);
                self.columns.push(column);
                // 新列对所有已有行补 0
                for counts in &mut self.counts {
                    counts.push(0);
                }
                idx
            }
        };

        let row_idx = match self.row_index.get(&row) {
            Some(&idx) => idx,
            None => {
                let idx = self.rows.len();
                self.row_index.insert(row.clone(), idx);
                self.rows.push(row);
                self.counts.push(vec![0; self.columns.len()]);
                idx
            }
        };

        self.counts[row_idx][col_idx] += 1;
    }

    pub fn rows(&self) -> &[R] {
        &self.rows
    }

    pub fn columns(&self) -> &[C] {
        &self.columns
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// 单元格计数; 行或列不存在时返回 None
    pub fn count(&self, row: &R, column: &C) -> Option<usize> {
        let r = self.row_index.get(row)?;
        let c = self.column_index.get(column)?;
        Some(self.counts[*r][*c])
    }

    /// 某行的计数 (与 columns 顺序一致)
    pub fn row_counts(&self, row: &R) -> Option<&[usize]> {
        self.row_index.get(row).map(|&r| self.counts[r].as_slice())
    }

    pub fn row_total(&self, row: &R) -> usize {
        self.row_counts(row).map(|c| c.iter().sum()).unwrap_or(0)
    }

    pub fn column_total(&self, column: &C) -> usize {
        match self.column_index.get(column) {
            Some(&c) => self.counts.iter().map(|row| row[c]).sum(),
            None => 0,
        }
    }

    pub fn grand_total(&self) -> usize {
        self.counts.iter().flatten().sum()
    }
}

impl<R, C> PivotTable<R, C>
where
    R: Eq + Hash + Clone + Display,
    C: Eq + Hash + Clone + Display,
{
    /// 转为数据集: 行 -> 分类, 每列一条序列
    pub fn to_dataset(&self, report_name: &str, title: &str) -> ReportDataset {
        let categories = self.rows.iter().map(|r| r.to_string()).collect();
        let mut dataset = ReportDataset::new(report_name, title).with_categories(categories);

        for (c, column) in self.columns.iter().enumerate() {
            let values = self.counts.iter().map(|row| row[c] as f64).collect();
            dataset = dataset.with_series(DataSeries::new(column.to_string(), values));
        }
        dataset
    }
}

// ==========================================
// PivotBuilder - 透视表构建器
// ==========================================
#[derive(Debug, Default)]
pub struct PivotBuilder;

impl PivotBuilder {
    pub fn new() -> Self {
        Self
    }

    /// 构建稠密计数透视表
    ///
    /// # 参数
    /// - records: 输入记录
    /// - row_key_fn: 行键
    /// - col_key_fn: 列键
    pub fn build_pivot<T, R, C, FR, FC>(
        &self,
        records: &[T],
        row_key_fn: FR,
        col_key_fn: FC,
    ) -> PivotTable<R, C>
    where
        R: Eq + Hash + Clone,
        C: Eq + Hash + Clone,
        FR: Fn(&T) -> R,
        FC: Fn(&T) -> C,
    {
        let mut table = PivotTable::empty();
        for record in records {
            table.increment(row_key_fn(record), col_key_fn(record));
        }
        table
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn sample() -> Vec<(&'static str, &'static str)> {
        vec![
            ("Yoga Mon", "10:00"),
            ("Spin Tue", "18:00"),
            ("Yoga Mon", "10:00"),
            ("Yoga Wed", "07:00"),
            ("Spin Tue", "10:00"),
        ]
    }

    #[test]
    fn test_dense_zero_filled() {
        let table = PivotBuilder::new().build_pivot(&sample(), |r| r.0, |r| r.1);

        assert_eq!(table.rows(), &["Yoga Mon", "Spin Tue", "Yoga Wed"]);
        assert_eq!(table.columns(), &["10:00", "18:00", "07:00"]);
        for row in table.rows() {
            assert_eq!(table.row_counts(row).unwrap().len(), 3);
        }
        assert_eq!(table.count(&"Yoga Mon", &"10:00"), Some(2));
        assert_eq!(table.count(&"Yoga Mon", &"18:00"), Some(0));
        assert_eq!(table.count(&"Yoga Wed", &"07:00"), Some(1));
        assert_eq!(table.count(&"Boxing", &"07:00"), None);
    }

    #[test]
    fn test_column_order_independent_of_rows() {
        let records = vec![("b", "x"), ("a", "y"), ("a", "x"), ("b", "z")];
        let table = PivotBuilder::new().build_pivot(&records, |r| r.0, |r| r.1);

        assert_eq!(table.rows(), &["b", "a"]);
        assert_eq!(table.columns(), &["x", "y", "z"]);
    }

    #[test]
    fn test_key_sets_stable_under_permutation() {
        let builder = PivotBuilder::new();
        let original = sample();
        let mut reversed = original.clone();
        reversed.reverse();
        let mut rotated = original.clone();
        rotated.rotate_left(2);

        let base = builder.build_pivot(&original, |r| r.0, |r| r.1);
        let base_rows: HashSet<_> = base.rows().iter().collect();
        let base_cols: HashSet<_> = base.columns().iter().collect();

        for permuted in [&reversed, &rotated] {
            let table = builder.build_pivot(permuted, |r| r.0, |r| r.1);
            let rows: HashSet<_> = table.rows().iter().collect();
            let cols: HashSet<_> = table.columns().iter().collect();
            assert_eq!(rows, base_rows);
            assert_eq!(cols, base_cols);
            assert_eq!(table.grand_total(), base.grand_total());
        }
    }

    #[test]
    fn test_deterministic_for_fixed_input() {
        let builder = PivotBuilder::new();
        let first = builder.build_pivot(&sample(), |r| r.0, |r| r.1);
        let second = builder.build_pivot(&sample(), |r| r.0, |r| r.1);

        assert_eq!(first.rows(), second.rows());
        assert_eq!(first.columns(), second.columns());
    }

    #[test]
    fn test_totals_and_dataset() {
        let table = PivotBuilder::new().build_pivot(&sample(), |r| r.0, |r| r.1);

        assert_eq!(table.row_total(&"Yoga Mon"), 2);
        assert_eq!(table.column_total(&"10:00"), 3);
        assert_eq!(table.grand_total(), 5);

        let dataset = table.to_dataset("attendance_schedule_report", "Schedule");
        assert_eq!(dataset.categories.len(), 3);
        assert_eq!(dataset.series.len(), 3);
        assert!(dataset.is_aligned());
        assert_eq!(dataset.value("10:00", "Spin Tue"), Some(1.0));
    }

    #[test]
    fn test_empty_input() {
        let records: Vec<(&str, &str)> = Vec::new();
        let table = PivotBuilder::new().build_pivot(&records, |r| r.0, |r| r.1);
        assert!(table.is_empty());
        assert_eq!(table.grand_total(), 0);
    }
}
