// ==========================================
// 健身连锁记录系统 - 数据快照
// ==========================================
// 职责: 单次生成调用开始时读取并类型化所需数据源
// 红线: 不跨调用缓存; 单个数据源失败只影响依赖它的报表
// ==========================================

use crate::domain::class::{AttendanceRecord, ClassRecord, PaymentRecord};
use crate::domain::gym::GymRecord;
use crate::domain::member::MemberRecord;
use crate::domain::types::SourceName;
use crate::engine::error::{ReportError, ReportResult};
use crate::importer::{load_records, Loaded};
use crate::repository::{RecordStore, RepositoryError};
use chrono::{DateTime, Utc};
use tracing::{info, warn};

type Slot<T> = Option<Result<Loaded<T>, RepositoryError>>;

// ==========================================
// Snapshot - 一次运行的数据快照
// ==========================================
#[derive(Debug, Clone)]
pub struct Snapshot {
    captured_at: DateTime<Utc>,
    members: Slot<MemberRecord>,
    gyms: Slot<GymRecord>,
    classes: Slot<ClassRecord>,
    payments: Slot<PaymentRecord>,
    attendance: Slot<AttendanceRecord>,
}

impl Default for Snapshot {
    fn default() -> Self {
        Self::empty()
    }
}

impl Snapshot {
    /// 未加载任何数据源的快照
    pub fn empty() -> Self {
        Self {
            captured_at: Utc::now(),
            members: None,
            gyms: None,
            classes: None,
            payments: None,
            attendance: None,
        }
    }

    /// 从 RecordStore 读取指定数据源
    pub fn capture<S: RecordStore + ?Sized>(store: &S, sources: &[SourceName]) -> Self {
        let mut snapshot = Self::empty();

        for source in sources {
            match source {
                SourceName::Members => snapshot.members = Some(load(store, *source)),
                SourceName::Gyms => snapshot.gyms = Some(load(store, *source)),
                SourceName::Classes => snapshot.classes = Some(load(store, *source)),
                SourceName::Payments => snapshot.payments = Some(load(store, *source)),
                SourceName::Attendance => snapshot.attendance = Some(load(store, *source)),
            }
        }

        info!(sources = ?sources, "数据快照已读取");
        snapshot
    }

    pub fn captured_at(&self) -> DateTime<Utc> {
        self.captured_at
    }

    // ===== 直接构造 (测试与嵌入调用) =====

    pub fn with_members(mut self, records: Vec<MemberRecord>) -> Self {
        self.members = Some(Ok(loaded(records)));
        self
    }

    pub fn with_gyms(mut self, records: Vec<GymRecord>) -> Self {
        self.gyms = Some(Ok(loaded(records)));
        self
    }

    pub fn with_classes(mut self, records: Vec<ClassRecord>) -> Self {
        self.classes = Some(Ok(loaded(records)));
        self
    }

    pub fn with_payments(mut self, records: Vec<PaymentRecord>) -> Self {
        self.payments = Some(Ok(loaded(records)));
        self
    }

    pub fn with_attendance(mut self, records: Vec<AttendanceRecord>) -> Self {
        self.attendance = Some(Ok(loaded(records)));
        self
    }

    // ===== 读取 =====

    pub fn members(&self) -> ReportResult<&Loaded<MemberRecord>> {
        slot(&self.members, SourceName::Members)
    }

    pub fn gyms(&self) -> ReportResult<&Loaded<GymRecord>> {
        slot(&self.gyms, SourceName::Gyms)
    }

    pub fn classes(&self) -> ReportResult<&Loaded<ClassRecord>> {
        slot(&self.classes, SourceName::Classes)
    }

    pub fn payments(&self) -> ReportResult<&Loaded<PaymentRecord>> {
        slot(&self.payments, SourceName::Payments)
    }

    pub fn attendance(&self) -> ReportResult<&Loaded<AttendanceRecord>> {
        slot(&self.attendance, SourceName::Attendance)
    }
}

fn loaded<T>(records: Vec<T>) -> Loaded<T> {
    Loaded {
        records,
        issues: Vec::new(),
    }
}

fn load<S, T>(store: &S, source: SourceName) -> Result<Loaded<T>, RepositoryError>
where
    S: RecordStore + ?Sized,
    T: crate::importer::FromRecord,
{
    match store.get(source.as_str()) {
        Ok(records) => Ok(load_records(source.as_str(), &records)),
        Err(e) => {
            warn!(source = %source, error = %e, "数据源读取失败");
            Err(e)
        }
    }
}

fn slot<T>(slot: &Slot<T>, source: SourceName) -> ReportResult<&Loaded<T>> {
    match slot {
        Some(Ok(loaded)) => Ok(loaded),
        Some(Err(e)) => Err(ReportError::Source(e.clone())),
        None => Err(ReportError::SourceNotCaptured(source)),
    }
}
