// ==========================================
// 健身连锁记录系统 - 报表配置
// ==========================================
// 职责: 配置加载 (JSON 文件, 字段均可缺省) 与校验
// 配置项: base_directory / reports_directory / appointment_fee /
//         include_supplementary_reports / sources
// ==========================================

use crate::config::error::{ConfigError, ConfigResult};
use crate::config::store_config::{default_bindings, SourceBinding, StoreConfig};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

/// 预约单价默认值
pub const DEFAULT_APPOINTMENT_FEE: f64 = 50.0;

/// 数据目录环境变量
pub const DATA_DIR_ENV: &str = "GYM_REPORTS_DATA_DIR";

// ==========================================
// ReportParameters - 报表运行参数
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReportParameters {
    pub appointment_fee: f64,
}

impl Default for ReportParameters {
    fn default() -> Self {
        Self {
            appointment_fee: DEFAULT_APPOINTMENT_FEE,
        }
    }
}

// ==========================================
// ReportConfig - 报表配置
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    pub base_directory: Option<PathBuf>,
    pub reports_directory: Option<PathBuf>,
    pub appointment_fee: f64,
    pub include_supplementary_reports: bool,
    pub sources: Vec<SourceBinding>,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            base_directory: None,
            reports_directory: None,
            appointment_fee: DEFAULT_APPOINTMENT_FEE,
            include_supplementary_reports: false,
            sources: default_bindings(),
        }
    }
}

impl ReportConfig {
    /// 以指定数据目录创建配置
    pub fn with_base_directory(base_directory: impl Into<PathBuf>) -> Self {
        Self {
            base_directory: Some(base_directory.into()),
            ..Self::default()
        }
    }

    /// 从 JSON 文件加载配置并校验
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let raw = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        let config: ReportConfig =
            serde_json::from_str(&raw).map_err(|e| ConfigError::ParseError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

        config.validate()?;
        Ok(config)
    }

    /// 校验配置值
    pub fn validate(&self) -> ConfigResult<()> {
        if !self.appointment_fee.is_finite() || self.appointment_fee < 0.0 {
            return Err(ConfigError::ConfigValueError {
                key: "appointment_fee".to_string(),
                value: self.appointment_fee.to_string(),
                message: "必须为非负数".to_string(),
            });
        }

        let mut seen = HashSet::new();
        for binding in &self.sources {
            let name = binding.name.trim();
            if name.is_empty() {
                return Err(ConfigError::ConfigValueError {
                    key: "sources".to_string(),
                    value: binding.file.display().to_string(),
                    message: "数据源名称不能为空".to_string(),
                });
            }
            if !seen.insert(name.to_string()) {
                return Err(ConfigError::ConfigValueError {
                    key: "sources".to_string(),
                    value: name.to_string(),
                    message: "数据源名称重复".to_string(),
                });
            }
        }

        Ok(())
    }

    /// 数据目录 (未配置时使用默认目录)
    pub fn data_directory(&self) -> PathBuf {
        self.base_directory
            .clone()
            .unwrap_or_else(default_data_directory)
    }

    /// 报表输出目录 (未配置时为 <data>/reports)
    pub fn reports_directory(&self) -> PathBuf {
        self.reports_directory
            .clone()
            .unwrap_or_else(|| self.data_directory().join("reports"))
    }

    pub fn store_config(&self) -> StoreConfig {
        StoreConfig::new(self.data_directory()).with_sources(self.sources.clone())
    }

    pub fn parameters(&self) -> ReportParameters {
        ReportParameters {
            appointment_fee: self.appointment_fee,
        }
    }
}

/// 默认数据目录
///
/// 优先级: 环境变量 GYM_REPORTS_DATA_DIR > 用户数据目录/gym-reports > ./data
pub fn default_data_directory() -> PathBuf {
    if let Ok(path) = std::env::var(DATA_DIR_ENV) {
        let trimmed = path.trim();
        if !trimmed.is_empty() {
            return PathBuf::from(trimmed);
        }
    }

    match dirs::data_dir() {
        Some(data_dir) => data_dir.join("gym-reports"),
        None => PathBuf::from("./data"),
    }
}
