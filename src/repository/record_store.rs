// ==========================================
// 健身连锁记录系统 - RecordStore 接口
// ==========================================
// 职责: 统一表格/嵌套两种存储格式的数据源读写接口
// 红线: 格式解析只存在于实现方, 不泄露给聚合逻辑
// ==========================================

use crate::repository::error::{RepositoryError, RepositoryResult};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// 记录: 字段名 -> 标量或嵌套值 (保持字段顺序)
pub type Record = serde_json::Map<String, serde_json::Value>;

// ==========================================
// RecordStore Trait
// ==========================================
// 实现者: FlatFileRecordStore / InMemoryRecordStore
pub trait RecordStore {
    /// 读取数据源的全部记录
    ///
    /// # 返回
    /// - Ok(Vec): 有序记录; 底层文件不存在时为空
    /// - Err(UnknownSource): 数据源未注册
    fn get(&self, source_name: &str) -> RepositoryResult<Vec<Record>>;

    /// 覆盖写入数据源
    fn put(&self, source_name: &str, records: &[Record]) -> RepositoryResult<()>;

    /// 已注册的数据源名称
    fn source_names(&self) -> Vec<String>;
}

impl<T: RecordStore + ?Sized> RecordStore for Arc<T> {
    fn get(&self, source_name: &str) -> RepositoryResult<Vec<Record>> {
        (**self).get(source_name)
    }

    fn put(&self, source_name: &str, records: &[Record]) -> RepositoryResult<()> {
        (**self).put(source_name, records)
    }

    fn source_names(&self) -> Vec<String> {
        (**self).source_names()
    }
}

// ==========================================
// InMemoryRecordStore - 内存数据源
// ==========================================
// 用途: 测试与嵌入式调用; 只有注册过的名称可读写
#[derive(Debug, Default)]
pub struct InMemoryRecordStore {
    sources: Mutex<HashMap<String, Vec<Record>>>,
}

impl InMemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 创建并注册给定数据源 (初始为空)
    pub fn with_sources<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let sources = names
            .into_iter()
            .map(|name| (name.into(), Vec::new()))
            .collect();
        Self {
            sources: Mutex::new(sources),
        }
    }

    /// 注册数据源并写入记录
    pub fn register(&self, source_name: &str, records: Vec<Record>) -> RepositoryResult<()> {
        let mut sources = self
            .sources
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))?;
        sources.insert(source_name.to_string(), records);
        Ok(())
    }
}

impl RecordStore for InMemoryRecordStore {
    fn get(&self, source_name: &str) -> RepositoryResult<Vec<Record>> {
        let sources = self
            .sources
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))?;
        sources
            .get(source_name)
            .cloned()
            .ok_or_else(|| RepositoryError::UnknownSource {
                name: source_name.to_string(),
            })
    }

    fn put(&self, source_name: &str, records: &[Record]) -> RepositoryResult<()> {
        let mut sources = self
            .sources
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))?;
        match sources.get_mut(source_name) {
            Some(existing) => {
                *existing = records.to_vec();
                Ok(())
            }
            None => Err(RepositoryError::UnknownSource {
                name: source_name.to_string(),
            }),
        }
    }

    fn source_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .sources
            .lock()
            .map(|sources| sources.keys().cloned().collect())
            .unwrap_or_default();
        names.sort();
        names
    }
}
