// ==========================================
// 健身连锁记录系统 - 实体映射
// ==========================================
// 职责: 无模式记录 -> 类型化实体 (加载时显式校验)
// 红线: 字段问题在此恢复 (跳过/缺省) 并记录, 不散落到业务逻辑
// ==========================================

use crate::domain::class::{AttendanceRecord, ClassRecord, PaymentRecord, Registration};
use crate::domain::gym::{validate_zone, GymRecord};
use crate::domain::issue::DataIssue;
use crate::domain::member::{MemberRecord, TimeSlot, WeeklySchedule};
use crate::domain::types::UserType;
use crate::importer::data_cleaner::value_to_text;
use crate::importer::field_mapper::FieldReader;
use crate::repository::Record;
use serde_json::Value;
use std::collections::HashSet;
use tracing::debug;

// ==========================================
// Loaded - 加载结果
// ==========================================
#[derive(Debug, Clone, PartialEq)]
pub struct Loaded<T> {
    pub records: Vec<T>,
    pub issues: Vec<DataIssue>,
}

impl<T> Default for Loaded<T> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
            issues: Vec::new(),
        }
    }
}

// ==========================================
// FromRecord Trait
// ==========================================
// 返回 None 表示整条记录被丢弃 (原因已通过 reader 记录)
pub trait FromRecord: Sized {
    fn from_record(reader: &mut FieldReader<'_>) -> Option<Self>;
}

/// 批量映射数据源记录
pub fn load_records<T: FromRecord>(source_name: &str, records: &[Record]) -> Loaded<T> {
    let mut loaded = Loaded::default();

    for (index, record) in records.iter().enumerate() {
        let mut reader = FieldReader::new(source_name, index, record, &mut loaded.issues);
        if let Some(entity) = T::from_record(&mut reader) {
            loaded.records.push(entity);
        }
    }

    debug!(
        source = source_name,
        total = records.len(),
        loaded = loaded.records.len(),
        issues = loaded.issues.len(),
        "数据源类型化完成"
    );
    loaded
}

// ==========================================
// MemberRecord
// ==========================================
impl FromRecord for MemberRecord {
    fn from_record(reader: &mut FieldReader<'_>) -> Option<Self> {
        let id = reader.required_text("id")?;
        let name = reader.text("name").unwrap_or_default();

        let user_type = match reader.required_text("user_type") {
            Some(raw) => match UserType::parse(&raw) {
                Some(t) => t,
                None => {
                    reader.report("user_type", format!("未知的用户类型: {}", raw));
                    return None;
                }
            },
            None => return None,
        };

        let gym_id = reader.required_text("gym_id").unwrap_or_default();
        let membership_type = reader.text("membership_type");
        let cost = reader.non_negative("cost", 0.0);
        let join_date = reader.text("join_date");
        let schedule = read_schedule(reader);

        Some(MemberRecord {
            id,
            name,
            user_type,
            gym_id,
            membership_type,
            cost,
            join_date,
            schedule,
        })
    }
}

/// 读取周排班, 丢弃不合法的时段
fn read_schedule(reader: &mut FieldReader<'_>) -> WeeklySchedule {
    let mut schedule = WeeklySchedule::new();

    let days = match reader.value("schedule") {
        None | Some(Value::Null) => return schedule,
        Some(Value::Object(days)) => days,
        Some(other) => {
            reader.report("schedule", format!("排班必须为对象: {}", other));
            return schedule;
        }
    };

    for (day, slots) in days {
        let items = match slots {
            Value::Array(items) => items,
            other => {
                reader.report("schedule", format!("{} 的时段必须为列表: {}", day, other));
                continue;
            }
        };

        let mut valid = Vec::new();
        for item in items {
            let slot = TimeSlot {
                start_time: slot_field(item, "start_time"),
                end_time: slot_field(item, "end_time"),
            };
            match slot.validate() {
                Ok(()) => valid.push(slot),
                Err(message) => reader.report("schedule", format!("{}: {}", day, message)),
            }
        }
        schedule.insert(day.clone(), valid);
    }

    schedule
}

fn slot_field(item: &Value, field: &str) -> String {
    value_to_text(item.get(field)).ok().flatten().unwrap_or_default()
}

// ==========================================
// GymRecord
// ==========================================
impl FromRecord for GymRecord {
    fn from_record(reader: &mut FieldReader<'_>) -> Option<Self> {
        let id = reader.required_text("id")?;
        let name = reader.required_text("name").unwrap_or_default();
        let city = reader.text("city");

        // 经理信息: 平铺字段或嵌套 manager 对象
        let (manager_name, manager_contact, manager_email) = match reader.value("manager") {
            Some(Value::Object(manager)) => (
                value_to_text(manager.get("name")).ok().flatten(),
                value_to_text(manager.get("contact")).ok().flatten(),
                value_to_text(manager.get("email")).ok().flatten(),
            ),
            Some(Value::String(name)) => (
                Some(name.trim().to_string()).filter(|n| !n.is_empty()),
                reader.text("manager_contact"),
                reader.text("manager_email"),
            ),
            _ => (
                reader.text("manager_name"),
                reader.text("manager_contact"),
                reader.text("manager_email"),
            ),
        };

        let mut zones = Vec::new();
        let mut seen = HashSet::new();
        for zone in reader.list("zones") {
            if let Err(message) = validate_zone(&zone) {
                reader.report("zones", message);
                continue;
            }
            if !seen.insert(zone.clone()) {
                reader.report("zones", format!("区域名重复: {}", zone));
                continue;
            }
            zones.push(zone);
        }

        Some(GymRecord {
            id,
            name,
            city,
            manager_name,
            manager_contact,
            manager_email,
            zones,
        })
    }
}

// ==========================================
// ClassRecord
// ==========================================
impl FromRecord for ClassRecord {
    fn from_record(reader: &mut FieldReader<'_>) -> Option<Self> {
        // 以课程名为键的 JSON 对象: 键已作为 id 注入
        let name = match reader.text("name").or_else(|| reader.text("id")) {
            Some(name) => name,
            None => {
                reader.report("name", "必填字段缺失");
                return None;
            }
        };

        let mut registered_users = Vec::new();
        match reader.value("registered_users") {
            None | Some(Value::Null) => {}
            Some(Value::Array(items)) => {
                for (pos, item) in items.iter().enumerate() {
                    let registration = Registration {
                        user_id: value_to_text(item.get("user_id")).ok().flatten(),
                        day: value_to_text(item.get("day")).ok().flatten(),
                        time: value_to_text(item.get("time")).ok().flatten(),
                    };
                    if registration.slot().is_none() {
                        reader.report(
                            "registered_users",
                            format!("第 {} 条报名缺少 day/time, 不计入课表", pos),
                        );
                    }
                    registered_users.push(registration);
                }
            }
            Some(other) => {
                reader.report("registered_users", format!("报名必须为列表: {}", other));
            }
        }

        Some(ClassRecord {
            name,
            registered_users,
        })
    }
}

// ==========================================
// PaymentRecord / AttendanceRecord
// ==========================================
impl FromRecord for PaymentRecord {
    fn from_record(reader: &mut FieldReader<'_>) -> Option<Self> {
        let date = reader.required_text("date")?;
        let amount = reader.non_negative("amount", 0.0);
        Some(PaymentRecord { date, amount })
    }
}

impl FromRecord for AttendanceRecord {
    fn from_record(reader: &mut FieldReader<'_>) -> Option<Self> {
        let date = reader.required_text("date")?;
        let member_id = reader.required_text("member_id")?;
        Some(AttendanceRecord { date, member_id })
    }
}
