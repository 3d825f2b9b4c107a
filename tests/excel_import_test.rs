// ==========================================
// Excel 导入集成测试
// ==========================================
// 夹具: tests/fixtures/contracts_import.xlsx
// - 第 1 行表头（合同模板全部字段）
// - 第 2、4 行为合法合同，日期列为日期格式单元格
// - 第 3 行为空行
// ==========================================


use std::path::PathBuf;
use std::sync::Arc;
use test_helpers::RecordingSink;
use trade_import::importer::{schema_for, ExcelParser, FileParser};
use trade_import::{BatchImporter, EntityType, MemoryNotifier};

fn fixture() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/contracts_import.xlsx")
}

#[test]
fn test_excel_date_cells_read_as_calendar_dates() {
    let rows = ExcelParser.parse_rows(&fixture()).unwrap();

    assert_eq!(rows.len(), 4);
    assert_eq!(rows[0][0], "contract_number");
    assert_eq!(rows[1][4], "500");
    assert_eq!(rows[1][6], "1250.5");
    assert_eq!(rows[1][8], "2024-03-15");
    assert_eq!(rows[1][9], "2024-05-01");
    // 空行保留位置，但没有单元格
    assert!(rows[2].is_empty());
    assert_eq!(rows[3][8], "2024-03-16");
}

#[tokio::test]
async fn test_excel_import_keeps_file_row_numbers() {
    trade_import::logging::init_test();
    let notifier = Arc::new(MemoryNotifier::new());
    let importer = BatchImporter::new(notifier.clone()).unwrap();
    let sink = RecordingSink::new();

    let report = importer
        .import_file(fixture(), &schema_for(EntityType::Contracts), &sink)
        .await
        .unwrap();

    let rows: Vec<usize> = report.outcomes.iter().map(|o| o.row_index).collect();
    assert_eq!(rows, vec![2, 4]);
    assert!(report.outcomes.iter().all(|o| o.result.success && o.result.warnings.is_empty()));
    assert_eq!(report.progress.total, 3);
    assert_eq!(report.progress.current, 2);

    let saved = sink.saved();
    assert_eq!(saved.len(), 2);
    assert_eq!(saved[0]["contract_date"], "2024-03-15");
    assert_eq!(saved[1]["delivery_date"], "2024-05-02");

    assert_eq!(
        notifier.drain()[0].message,
        "Import complete: 2 successful, 0 with warnings, 0 failed"
    );
}
