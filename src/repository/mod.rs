// ==========================================
// 健身连锁记录系统 - 数据仓储层
// ==========================================
// 职责: 数据源读写 (RecordStore), 文件格式解析
// 红线: 不含业务规则, 不做类型化
// ==========================================

pub mod error;
pub mod file_format;
pub mod flat_file_store;
pub mod record_store;

// 重导出
pub use error::{RepositoryError, RepositoryResult};
pub use flat_file_store::FlatFileRecordStore;
pub use record_store::{InMemoryRecordStore, Record, RecordStore};
