// ==========================================
// 导入API集成测试
// ==========================================
// 覆盖: 配置映射集合/操作人 → 导入落库 → CSV 导出回读
// ==========================================


use std::sync::Arc;
use test_helpers::{create_test_db, write_csv};
use trade_import::config::{config_keys, ConfigManager};
use trade_import::importer::parse_import_text;
use trade_import::notify::NotificationLevel;
use trade_import::{EntityType, ImportApi, MemoryNotifier, RecordStore, SqliteRecordStore};

#[tokio::test]
async fn test_import_then_export_roundtrip() {
    trade_import::logging::init_test();
    let (_temp_file, db_path) = create_test_db().unwrap();

    let config = ConfigManager::new(&db_path).unwrap();
    config
        .set_global_config_value(
            &format!("{}suppliers", config_keys::IMPORT_COLLECTION_PREFIX),
            "vendor_master",
        )
        .unwrap();
    config
        .set_global_config_value(config_keys::IMPORT_ACTOR, "ops_admin")
        .unwrap();

    let notifier = Arc::new(MemoryNotifier::new());
    let api = ImportApi::open(&db_path, notifier.clone()).unwrap();

    let file = write_csv(&[
        "name,email,phone,country,contact_person,address,tax_id,status",
        "Acme,sales@acme.com,+31 10 555-0100,Netherlands,Jan,Waalhaven 12,NL1,active",
        "\"Bolt Metals\",info@bolt.io,555-0101,Germany,Uwe,Hafenstrasse 3,DE2,inactive",
        "Broken,not-an-email,555-0102,France,Luc,Quai 1,FR3,active",
    ])
    .unwrap();

    let report = api.import_file(EntityType::Suppliers, file.path()).await.unwrap();
    assert_eq!(report.summary.successful, 2);
    assert_eq!(report.summary.warnings, 0);
    assert_eq!(report.summary.failed, 1);
    assert_eq!(notifier.drain()[0].level, NotificationLevel::Success);

    // 记录写入配置指定的集合，并带上操作人
    let store = SqliteRecordStore::new(&db_path).unwrap();
    let stored = store.list("vendor_master").await.unwrap();
    assert_eq!(stored.len(), 2);
    assert!(stored.iter().all(|r| r.created_by == "ops_admin"));
    assert!(store.list("suppliers").await.unwrap().is_empty());

    // 导出内容可按导入格式重新解析
    let csv = api.export_csv(EntityType::Suppliers).await.unwrap();
    let rows = parse_import_text(&csv);
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0][0], "name");
    assert_eq!(rows[1][0], "Acme");
    assert_eq!(rows[2][0], "Bolt Metals");
    assert_eq!(rows[2][7], "inactive");
}

#[tokio::test]
async fn test_import_bytes_rejects_non_utf8() {
    let (_temp_file, db_path) = create_test_db().unwrap();
    let notifier = Arc::new(MemoryNotifier::new());
    let api = ImportApi::open(&db_path, notifier.clone()).unwrap();

    let result = api
        .import_bytes(EntityType::Buyers, &[0x6e, 0x61, 0xff, 0xfe])
        .await;

    assert!(result.is_err());
    let notes = notifier.drain();
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0].level, NotificationLevel::Error);
    assert_eq!(notes[0].message, "Failed to import file");
}

#[tokio::test]
async fn test_download_template_needs_no_data() {
    let (_temp_file, db_path) = create_test_db().unwrap();
    let api = ImportApi::open(&db_path, Arc::new(MemoryNotifier::new())).unwrap();

    let template = api.download_template(EntityType::Contracts);
    assert_eq!(template.file_name, "contracts_import_template.csv");
    assert_eq!(template.content.lines().count(), 2);
}
