// ==========================================
// 健身连锁记录系统 - 平面文件数据源
// ==========================================
// 职责: 按 StoreConfig 的映射读写 CSV / JSON 文件
// 红线: 只有映射中注册的数据源名称可用
// ==========================================

use crate::config::{SourceFormat, StoreConfig};
use crate::repository::error::{RepositoryError, RepositoryResult};
use crate::repository::file_format::{read_csv, read_json, write_csv, write_json};
use crate::repository::record_store::{Record, RecordStore};
use std::path::PathBuf;
use tracing::debug;

pub struct FlatFileRecordStore {
    config: StoreConfig,
}

impl FlatFileRecordStore {
    /// 创建新的平面文件数据源
    ///
    /// # 参数
    /// - config: 基础目录与数据源映射
    pub fn new(config: StoreConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    fn resolve(&self, source_name: &str) -> RepositoryResult<(PathBuf, SourceFormat)> {
        let binding =
            self.config
                .binding(source_name)
                .ok_or_else(|| RepositoryError::UnknownSource {
                    name: source_name.to_string(),
                })?;
        Ok((self.config.path_for(binding), binding.resolved_format()))
    }
}

impl RecordStore for FlatFileRecordStore {
    fn get(&self, source_name: &str) -> RepositoryResult<Vec<Record>> {
        let (path, format) = self.resolve(source_name)?;

        let records = match format {
            SourceFormat::Tabular => read_csv(&path)?,
            SourceFormat::Nested => read_json(&path)?,
        };

        debug!(
            source = source_name,
            path = %path.display(),
            count = records.len(),
            "数据源读取完成"
        );
        Ok(records)
    }

    fn put(&self, source_name: &str, records: &[Record]) -> RepositoryResult<()> {
        let (path, format) = self.resolve(source_name)?;

        match format {
            SourceFormat::Tabular => write_csv(&path, records)?,
            SourceFormat::Nested => write_json(&path, records)?,
        }

        debug!(
            source = source_name,
            path = %path.display(),
            count = records.len(),
            "数据源写入完成"
        );
        Ok(())
    }

    fn source_names(&self) -> Vec<String> {
        self.config.sources.iter().map(|b| b.name.clone()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    fn record(value: serde_json::Value) -> Record {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_missing_file_yields_empty() {
        let dir = TempDir::new().unwrap();
        let store = FlatFileRecordStore::new(StoreConfig::new(dir.path()));

        assert!(store.get("members").unwrap().is_empty());
        assert!(store.get("payments").unwrap().is_empty());
    }

    #[test]
    fn test_unknown_source() {
        let dir = TempDir::new().unwrap();
        let store = FlatFileRecordStore::new(StoreConfig::new(dir.path()));

        let result = store.get("lockers");
        assert!(matches!(
            result,
            Err(RepositoryError::UnknownSource { ref name }) if name == "lockers"
        ));
    }

    #[test]
    fn test_nested_round_trip() {
        let dir = TempDir::new().unwrap();
        let store = FlatFileRecordStore::new(StoreConfig::new(dir.path()));
        let members = vec![record(json!({
            "id": 1,
            "name": "Ana",
            "schedule": {"Mon": [{"start_time": "09:00", "end_time": "10:00"}]}
        }))];

        store.put("members", &members).unwrap();
        assert_eq!(store.get("members").unwrap(), members);
        assert!(dir.path().join("members.json").exists());
    }

    #[test]
    fn test_tabular_round_trip_as_text() {
        let dir = TempDir::new().unwrap();
        let store = FlatFileRecordStore::new(StoreConfig::new(dir.path()));
        let payments = vec![record(json!({"date": "2024-02-01", "amount": 30}))];

        store.put("payments", &payments).unwrap();
        let loaded = store.get("payments").unwrap();

        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].get("amount"), Some(&json!("30")));
    }
}
