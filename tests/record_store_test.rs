// ==========================================
// 数据源集成测试
// ==========================================
// 测试范围: FlatFileRecordStore 读写 + 类型化加载
// ==========================================

mod helpers;

use gym_reports::config::{SourceBinding, SourceFormat, StoreConfig};
use gym_reports::domain::{PaymentRecord, UserType};
use gym_reports::engine::Snapshot;
use gym_reports::importer::{load_records, Loaded};
use gym_reports::repository::{FlatFileRecordStore, RecordStore, RepositoryError};
use gym_reports::SourceName;
use helpers::test_data_builder::*;
use helpers::test_data_dir::TestDataDir;

#[test]
fn test_keyed_object_json_gets_ids() {
    let data = TestDataDir::new();
    data.write_raw(
        "members.json",
        r#"{
            "7": {"name": "Ana", "type": "gym user", "gym": "G1", "fee": "12.5"},
            "8": {"name": "Bo", "user_type": "ManagementStaff", "gym_id": "G1", "cost": 900}
        }"#,
    );

    let snapshot = Snapshot::capture(&data.store(), &[SourceName::Members]);
    let members = snapshot.members().unwrap();

    assert!(members.issues.is_empty());
    assert_eq!(members.records.len(), 2);
    assert_eq!(members.records[0].id, "7");
    assert_eq!(members.records[0].user_type, UserType::GymUser);
    assert_eq!(members.records[0].cost, 12.5);
    assert_eq!(members.records[1].user_type, UserType::ManagementStaff);
}

#[test]
fn test_keyed_object_classes_use_key_as_name() {
    let data = TestDataDir::new();
    data.write_raw(
        "classes.json",
        r#"{
            "Yoga": {"registered_users": [{"user_id": 1, "day": "Mon", "time": "10:00"}]},
            "Spin": {"registrations": []}
        }"#,
    );

    let snapshot = Snapshot::capture(&data.store(), &[SourceName::Classes]);
    let classes = snapshot.classes().unwrap();

    assert!(classes.issues.is_empty());
    let names: Vec<&str> = classes.records.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["Yoga", "Spin"]);
    assert_eq!(classes.records[0].registration_count(), 1);
}

#[test]
fn test_csv_put_rejects_nested_fields() {
    let data = TestDataDir::new();
    let config = StoreConfig::new(data.path()).with_sources(vec![SourceBinding::new(
        "gyms",
        "gyms.csv",
        SourceFormat::Tabular,
    )]);
    let store = FlatFileRecordStore::new(config);

    let gyms = vec![GymBuilder::new("G1", "Downtown")
        .manager("Lee", "0113 000", "lee@gym.test")
        .build()];

    assert!(matches!(
        store.put("gyms", &gyms),
        Err(RepositoryError::UnsupportedShape { .. })
    ));
    assert!(!data.path().join("gyms.csv").exists());
}

#[test]
fn test_csv_payments_loaded_and_recovered() {
    let data = TestDataDir::new();
    data.write_raw(
        "payments.csv",
        "date,amount\n2024-01-05,30\n\n2024-01-20,-4\n,10\n2024-02-01,abc\n",
    );

    let records = data.store().get("payments").unwrap();
    assert_eq!(records.len(), 4); // 空白行跳过

    let loaded: Loaded<PaymentRecord> = load_records("payments", &records);
    let amounts: Vec<f64> = loaded.records.iter().map(|p| p.amount).collect();
    // 负数与非数字取 0, 缺日期的记录丢弃
    assert_eq!(amounts, vec![30.0, 0.0, 0.0]);
    assert_eq!(loaded.issues.len(), 3);
}

#[test]
fn test_put_then_get_round_trip_both_formats() {
    let data = TestDataDir::new();
    let store = data.store();

    let members = vec![MemberBuilder::new("1").membership("Gold").cost(10.0).build()];
    store.put("members", &members).unwrap();
    assert_eq!(store.get("members").unwrap(), members);

    let attendance = vec![serde_json::json!({"date": "2024-03-01", "member_id": "1"})
        .as_object()
        .cloned()
        .unwrap()];
    store.put("attendance", &attendance).unwrap();
    assert_eq!(store.get("attendance").unwrap(), attendance);
}

#[test]
fn test_custom_bindings_and_unknown_source() {
    let data = TestDataDir::new();
    let config = StoreConfig::new(data.path()).with_sources(vec![SourceBinding::new(
        "members",
        "nested/people.csv",
        SourceFormat::Tabular,
    )]);
    let store = FlatFileRecordStore::new(config);

    store
        .put("members", &[MemberBuilder::new("1").build()])
        .unwrap();
    assert!(data.path().join("nested/people.csv").exists());
    assert_eq!(store.source_names(), vec!["members".to_string()]);

    assert!(matches!(
        store.get("gyms"),
        Err(RepositoryError::UnknownSource { .. })
    ));
}
