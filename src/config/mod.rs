// ==========================================
// 健身连锁记录系统 - 配置层
// ==========================================
// 职责: 数据源映射与报表参数, 构造时显式传入
// 存储: JSON 配置文件 (可选)
// ==========================================

pub mod error;
pub mod report_config;
pub mod store_config;

// 重导出
pub use error::{ConfigError, ConfigResult};
pub use report_config::{
    default_data_directory, ReportConfig, ReportParameters, DEFAULT_APPOINTMENT_FEE,
};
pub use store_config::{default_bindings, SourceBinding, SourceFormat, StoreConfig};
