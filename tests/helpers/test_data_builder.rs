// ==========================================
// 测试数据构建器 - 用于集成测试
// ==========================================
// 输出为数据源原始记录 (serde_json 对象), 与文件中的形态一致
// ==========================================

use gym_reports::repository::Record;
use serde_json::{json, Value};

fn into_record(value: Value) -> Record {
    match value {
        Value::Object(map) => map,
        _ => Record::new(),
    }
}

// ==========================================
// 会员/员工构建器
// ==========================================

pub struct MemberBuilder {
    id: String,
    name: String,
    user_type: String,
    gym_id: String,
    membership_type: Option<String>,
    cost: Option<Value>,
    join_date: Option<String>,
}

impl MemberBuilder {
    pub fn new(id: &str) -> Self {
        Self {
            id: id.to_string(),
            name: format!("Member {}", id),
            user_type: "GymUser".to_string(),
            gym_id: "G1".to_string(),
            membership_type: None,
            cost: None,
            join_date: None,
        }
    }

    pub fn user_type(mut self, user_type: &str) -> Self {
        self.user_type = user_type.to_string();
        self
    }

    pub fn gym(mut self, gym_id: &str) -> Self {
        self.gym_id = gym_id.to_string();
        self
    }

    pub fn membership(mut self, membership: &str) -> Self {
        self.membership_type = Some(membership.to_string());
        self
    }

    pub fn cost(mut self, cost: f64) -> Self {
        self.cost = Some(json!(cost));
        self
    }

    /// 原始 cost 值 (用于构造非法输入)
    pub fn raw_cost(mut self, cost: Value) -> Self {
        self.cost = Some(cost);
        self
    }

    pub fn joined(mut self, date: &str) -> Self {
        self.join_date = Some(date.to_string());
        self
    }

    pub fn build(self) -> Record {
        let mut record = into_record(json!({
            "id": self.id,
            "name": self.name,
            "user_type": self.user_type,
            "gym_id": self.gym_id,
        }));
        if let Some(membership) = self.membership_type {
            record.insert("membership_type".to_string(), json!(membership));
        }
        if let Some(cost) = self.cost {
            record.insert("cost".to_string(), cost);
        }
        if let Some(date) = self.join_date {
            record.insert("join_date".to_string(), json!(date));
        }
        record
    }
}

// ==========================================
// 场馆构建器
// ==========================================

pub struct GymBuilder {
    id: String,
    name: String,
    city: Option<String>,
    manager: Option<(String, String, String)>,
}

impl GymBuilder {
    pub fn new(id: &str, name: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            city: None,
            manager: None,
        }
    }

    pub fn city(mut self, city: &str) -> Self {
        self.city = Some(city.to_string());
        self
    }

    pub fn manager(mut self, name: &str, contact: &str, email: &str) -> Self {
        self.manager = Some((name.to_string(), contact.to_string(), email.to_string()));
        self
    }

    pub fn build(self) -> Record {
        let mut record = into_record(json!({"id": self.id, "name": self.name}));
        if let Some(city) = self.city {
            record.insert("city".to_string(), json!(city));
        }
        if let Some((name, contact, email)) = self.manager {
            record.insert(
                "manager".to_string(),
                json!({"name": name, "contact": contact, "email": email}),
            );
        }
        record
    }
}

// ==========================================
// 课程构建器
// ==========================================

pub struct ClassBuilder {
    name: String,
    registrations: Vec<Value>,
}

impl ClassBuilder {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            registrations: Vec::new(),
        }
    }

    pub fn registration(mut self, user_id: &str, day: &str, time: &str) -> Self {
        self.registrations
            .push(json!({"user_id": user_id, "day": day, "time": time}));
        self
    }

    /// 只有星期、缺少时间的报名
    pub fn registration_without_time(mut self, user_id: &str, day: &str) -> Self {
        self.registrations
            .push(json!({"user_id": user_id, "day": day}));
        self
    }

    pub fn build(self) -> Record {
        into_record(json!({
            "name": self.name,
            "registered_users": self.registrations,
        }))
    }
}
