// ==========================================
// 健身连锁记录系统 - 领域模型层
// ==========================================
// 职责: 定义实体、类型、报表数据结构
// 红线: 不含数据访问逻辑, 不含聚合逻辑
// ==========================================

pub mod class;
pub mod gym;
pub mod issue;
pub mod member;
pub mod report;
pub mod types;

// 重导出核心类型
pub use class::{AttendanceRecord, ClassRecord, PaymentRecord, Registration};
pub use gym::GymRecord;
pub use issue::DataIssue;
pub use member::{MemberRecord, TimeSlot, WeeklySchedule, UNKNOWN_BUCKET};
pub use report::{DataSeries, ReportArtifact, ReportDataset};
pub use types::{ArtifactStatus, ChartKind, SourceName, UserType};
