// ==========================================
// 临时数据目录 - 用于集成测试
// ==========================================
// 职责: 在 tempfile 目录中写入数据源文件, 构造配置与数据源
// ==========================================

use gym_reports::config::{ReportConfig, StoreConfig};
use gym_reports::repository::{FlatFileRecordStore, Record};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub struct TestDataDir {
    dir: TempDir,
}

impl TestDataDir {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().unwrap(),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn reports_dir(&self) -> PathBuf {
        self.path().join("reports")
    }

    /// 写入 JSON 数组数据源
    pub fn write_json(&self, file: &str, records: &[Record]) {
        let content = serde_json::to_string_pretty(records).unwrap();
        fs::write(self.path().join(file), content).unwrap();
    }

    /// 写入原始文本 (CSV 或非标准 JSON)
    pub fn write_raw(&self, file: &str, content: &str) {
        fs::write(self.path().join(file), content).unwrap();
    }

    pub fn config(&self) -> ReportConfig {
        ReportConfig::with_base_directory(self.path())
    }

    pub fn store(&self) -> FlatFileRecordStore {
        FlatFileRecordStore::new(StoreConfig::new(self.path()))
    }
}
