// ==========================================
// 健身连锁记录系统 - 数据源配置
// ==========================================
// 职责: 基础目录 + 数据源到文件的映射
// 红线: 作为显式参数传入 RecordStore, 不使用全局可变状态
// ==========================================

use crate::domain::types::SourceName;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

// ==========================================
// SourceFormat - 文件格式
// ==========================================
// Tabular: CSV 表格; Nested: JSON 嵌套结构
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceFormat {
    Tabular,
    Nested,
}

impl SourceFormat {
    /// 根据扩展名推断格式
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();
        match ext.as_str() {
            "csv" => Some(SourceFormat::Tabular),
            "json" => Some(SourceFormat::Nested),
            _ => None,
        }
    }
}

// ==========================================
// SourceBinding - 单个数据源绑定
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceBinding {
    pub name: String,
    /// 相对 base_directory 的文件路径
    pub file: PathBuf,
    /// 缺省时按扩展名推断
    #[serde(default)]
    pub format: Option<SourceFormat>,
}

impl SourceBinding {
    pub fn new(name: impl Into<String>, file: impl Into<PathBuf>, format: SourceFormat) -> Self {
        Self {
            name: name.into(),
            file: file.into(),
            format: Some(format),
        }
    }

    /// 实际使用的格式; 无法推断时按 Nested 处理
    pub fn resolved_format(&self) -> SourceFormat {
        self.format
            .or_else(|| SourceFormat::from_path(&self.file))
            .unwrap_or(SourceFormat::Nested)
    }
}

/// 默认数据源映射
pub fn default_bindings() -> Vec<SourceBinding> {
    vec![
        SourceBinding::new(SourceName::Members.as_str(), "members.json", SourceFormat::Nested),
        SourceBinding::new(SourceName::Gyms.as_str(), "gyms.json", SourceFormat::Nested),
        SourceBinding::new(SourceName::Classes.as_str(), "classes.json", SourceFormat::Nested),
        SourceBinding::new(SourceName::Payments.as_str(), "payments.csv", SourceFormat::Tabular),
        SourceBinding::new(
            SourceName::Attendance.as_str(),
            "attendance.csv",
            SourceFormat::Tabular,
        ),
    ]
}

// ==========================================
// StoreConfig - RecordStore 构造参数
// ==========================================
#[derive(Debug, Clone, PartialEq)]
pub struct StoreConfig {
    pub base_directory: PathBuf,
    pub sources: Vec<SourceBinding>,
}

impl StoreConfig {
    pub fn new(base_directory: impl Into<PathBuf>) -> Self {
        Self {
            base_directory: base_directory.into(),
            sources: default_bindings(),
        }
    }

    pub fn with_sources(mut self, sources: Vec<SourceBinding>) -> Self {
        self.sources = sources;
        self
    }

    pub fn binding(&self, name: &str) -> Option<&SourceBinding> {
        self.sources.iter().find(|b| b.name == name)
    }

    /// 数据源对应的绝对文件路径
    pub fn path_for(&self, binding: &SourceBinding) -> PathBuf {
        if binding.file.is_absolute() {
            binding.file.clone()
        } else {
            self.base_directory.join(&binding.file)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_inferred_from_extension() {
        let binding = SourceBinding {
            name: "payments".to_string(),
            file: PathBuf::from("payments.CSV"),
            format: None,
        };
        assert_eq!(binding.resolved_format(), SourceFormat::Tabular);
    }

    #[test]
    fn test_default_bindings_cover_all_sources() {
        let config = StoreConfig::new("/tmp/gym");
        for source in SourceName::ALL {
            assert!(config.binding(source.as_str()).is_some());
        }
        let members = config.binding("members").unwrap();
        assert_eq!(
            config.path_for(members),
            PathBuf::from("/tmp/gym/members.json")
        );
    }
}
