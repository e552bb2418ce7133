// ==========================================
// 健身连锁记录系统 - 字段读取器
// ==========================================
// 职责: 按字段名 (含别名) 取值 + 类型转换
// 红线: 转换失败不返回错误, 而是记录 InvalidRecord 并给出缺省
// ==========================================

use crate::domain::issue::DataIssue;
use crate::importer::data_cleaner::{value_to_list, value_to_number, value_to_text};
use crate::repository::Record;
use serde_json::Value;
use tracing::warn;

// ==========================================
// FieldReader - 单条记录的字段读取
// ==========================================
pub struct FieldReader<'a> {
    source_name: &'a str,
    index: usize,
    record: &'a Record,
    issues: &'a mut Vec<DataIssue>,
}

impl<'a> FieldReader<'a> {
    pub fn new(
        source_name: &'a str,
        index: usize,
        record: &'a Record,
        issues: &'a mut Vec<DataIssue>,
    ) -> Self {
        Self {
            source_name,
            index,
            record,
            issues,
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    /// 记录一条 InvalidRecord 问题
    pub fn report(&mut self, field: &str, message: impl Into<String>) {
        let issue = DataIssue::invalid(self.source_name, self.index, field, message);
        warn!(%issue, "记录字段已恢复");
        self.issues.push(issue);
    }

    /// 取原始值, 支持字段别名
    pub fn value(&self, field: &str) -> Option<&'a Value> {
        let record = self.record;
        match aliases(field) {
            [] => record.get(field),
            names => names.iter().find_map(|alias| record.get(*alias)),
        }
    }

    /// 可选文本字段
    pub fn text(&mut self, field: &str) -> Option<String> {
        match value_to_text(self.value(field)) {
            Ok(v) => v,
            Err(message) => {
                self.report(field, message);
                None
            }
        }
    }

    /// 必填文本字段, 缺失时记录问题
    pub fn required_text(&mut self, field: &str) -> Option<String> {
        let value = self.text(field);
        if value.is_none() {
            self.report(field, "必填字段缺失");
        }
        value
    }

    /// 非负数值字段; 缺失取 default, 非法或为负时记录问题并取 default
    pub fn non_negative(&mut self, field: &str, default: f64) -> f64 {
        match value_to_number(self.value(field)) {
            Ok(None) => default,
            Ok(Some(n)) if n < 0.0 => {
                self.report(field, format!("数值不能为负: {}", n));
                default
            }
            Ok(Some(n)) => n,
            Err(message) => {
                self.report(field, message);
                default
            }
        }
    }

    /// 字符串列表字段
    pub fn list(&mut self, field: &str) -> Vec<String> {
        match value_to_list(self.value(field)) {
            Ok(items) => items,
            Err(message) => {
                self.report(field, message);
                Vec::new()
            }
        }
    }
}

/// 字段别名 (平面文件历史列名)
fn aliases(field: &str) -> &'static [&'static str] {
    match field {
        "id" => &["id", "ID"],
        "user_type" => &["user_type", "type"],
        "gym_id" => &["gym_id", "gym"],
        "membership_type" => &["membership_type", "membership"],
        "cost" => &["cost", "fee"],
        "join_date" => &["join_date", "joined"],
        "registered_users" => &["registered_users", "registrations"],
        "manager_contact" => &["manager_contact", "manager_phone"],
        _ => &[],
    }
}
