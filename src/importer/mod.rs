// ==========================================
// 健身连锁记录系统 - 导入层
// ==========================================
// 职责: 数据源记录 -> 类型化实体, 加载时校验
// 红线: 只读, 不回写数据源
// ==========================================

pub mod data_cleaner;
pub mod entity_mapper;
pub mod field_mapper;

// 重导出
pub use entity_mapper::{load_records, FromRecord, Loaded};
pub use field_mapper::FieldReader;
