// ==========================================
// 健身连锁记录系统 - 聚合引擎
// ==========================================
// 职责: 关联 / 过滤 / 分组 / 求和
// 红线: 无状态引擎, 所有方法都是纯函数
// 红线: 分组键顺序 = 首次出现顺序
// ==========================================

use crate::domain::gym::GymRecord;
use crate::domain::issue::DataIssue;
use crate::domain::member::MemberRecord;
use chrono::NaiveDate;
use std::collections::HashMap;
use std::hash::Hash;
use tracing::warn;

/// 日期缺失哨兵值 (大小写不敏感)
pub const DATE_SENTINELS: [&str; 3] = ["n/a", "unknown", "none"];

/// 标准日期格式
pub const DATE_PATTERN: &str = "%Y-%m-%d";

// ==========================================
// Grouped - 保序分组结果
// ==========================================
#[derive(Debug, Clone)]
pub struct Grouped<K, V> {
    entries: Vec<(K, V)>,
    index: HashMap<K, usize>,
}

impl<K, V> Default for Grouped<K, V> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            index: HashMap::new(),
        }
    }
}

impl<K: Eq + Hash + Clone, V> Grouped<K, V> {
    pub fn new() -> Self {
        Self::default()
    }

    /// 取键对应的值, 不存在时按首次出现插入
    pub fn entry_or_insert_with(&mut self, key: K, default: impl FnOnce() -> V) -> &mut V {
        let idx = match self.index.get(&key) {
            Some(&idx) => idx,
            None => {
                let idx = self.entries.len();
                self.index.insert(key.clone(), idx);
                self.entries.push((key, default()));
                idx
            }
        };
        &mut self.entries[idx].1
    }

    pub fn get(&self, key: &K) -> Option<&V> {
        self.index.get(key).map(|&idx| &self.entries[idx].1)
    }

    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.entries.iter().map(|(k, _)| k)
    }

    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.entries.iter().map(|(_, v)| v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> {
        self.entries.iter().map(|(k, v)| (k, v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn into_vec(self) -> Vec<(K, V)> {
        self.entries
    }
}

// ==========================================
// EnrichedMember - 关联场馆后的会员记录
// ==========================================
#[derive(Debug, Clone, PartialEq)]
pub struct EnrichedMember {
    pub member: MemberRecord,
    pub gym_name: String,
    pub gym_city: Option<String>,
    pub manager_name: Option<String>,
    pub manager_contact: Option<String>,
    pub manager_email: Option<String>,
}

impl EnrichedMember {
    pub fn gym_id(&self) -> &str {
        &self.member.gym_id
    }
}

#[derive(Debug, Clone, Default)]
pub struct JoinOutcome {
    pub records: Vec<EnrichedMember>,
    pub issues: Vec<DataIssue>,
}

// ==========================================
// AggregationEngine - 聚合引擎
// ==========================================
#[derive(Debug, Default)]
pub struct AggregationEngine;

impl AggregationEngine {
    pub fn new() -> Self {
        Self
    }

    /// 会员关联场馆
    ///
    /// 找不到场馆的会员被排除, 并记录 MissingReference
    /// 输出保持输入会员顺序
    pub fn join_members_with_gyms(
        &self,
        members: &[MemberRecord],
        gyms: &[GymRecord],
    ) -> JoinOutcome {
        let gyms_by_id: HashMap<&str, &GymRecord> =
            gyms.iter().map(|g| (g.id.as_str(), g)).collect();

        let mut outcome = JoinOutcome::default();
        for member in members {
            match gyms_by_id.get(member.gym_id.as_str()) {
                Some(gym) => outcome.records.push(EnrichedMember {
                    member: member.clone(),
                    gym_name: gym.name.clone(),
                    gym_city: gym.city.clone(),
                    manager_name: gym.manager_name.clone(),
                    manager_contact: gym.manager_contact.clone(),
                    manager_email: gym.manager_email.clone(),
                }),
                None => {
                    let issue = DataIssue::MissingReference {
                        member_id: member.id.clone(),
                        gym_id: member.gym_id.clone(),
                    };
                    warn!(%issue, "会员已从关联结果中排除");
                    outcome.issues.push(issue);
                }
            }
        }

        outcome
    }

    /// 按键分组, 键顺序为首次出现顺序
    pub fn group_by<'r, T, K, F>(&self, records: &'r [T], key_fn: F) -> Grouped<K, Vec<&'r T>>
    where
        K: Eq + Hash + Clone,
        F: Fn(&T) -> K,
    {
        let mut grouped = Grouped::new();
        for record in records {
            grouped
                .entry_or_insert_with(key_fn(record), Vec::new)
                .push(record);
        }
        grouped
    }

    /// 按键求和; 缺失或非有限值计为 0
    pub fn sum_by<T, K, F, G>(&self, records: &[T], key_fn: F, value_fn: G) -> Grouped<K, f64>
    where
        K: Eq + Hash + Clone,
        F: Fn(&T) -> K,
        G: Fn(&T) -> Option<f64>,
    {
        let mut grouped = Grouped::new();
        for record in records {
            let value = value_fn(record).filter(|v| v.is_finite()).unwrap_or(0.0);
            *grouped.entry_or_insert_with(key_fn(record), || 0.0) += value;
        }
        grouped
    }

    /// 按键计数
    pub fn count_by<T, K, F>(&self, records: &[T], key_fn: F) -> Grouped<K, usize>
    where
        K: Eq + Hash + Clone,
        F: Fn(&T) -> K,
    {
        let mut grouped = Grouped::new();
        for record in records {
            *grouped.entry_or_insert_with(key_fn(record), || 0) += 1;
        }
        grouped
    }

    /// 日期解析
    ///
    /// 空串、哨兵值 (N/A 等)、格式错误均返回 None, 不报错
    pub fn parse_date(raw: &str, pattern: &str) -> Option<NaiveDate> {
        let trimmed = raw.trim();
        if trimmed.is_empty() || is_date_sentinel(trimmed) {
            return None;
        }
        NaiveDate::parse_from_str(trimmed, pattern).ok()
    }
}

/// 是否为日期哨兵值
pub fn is_date_sentinel(raw: &str) -> bool {
    let lowered = raw.trim().to_lowercase();
    DATE_SENTINELS.contains(&lowered.as_str())
}

/// 月份分桶键 (YYYY-MM)
pub fn month_bucket(date: NaiveDate) -> String {
    date.format("%Y-%m").to_string()
}
