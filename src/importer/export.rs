// ==========================================
// 贸易物流管理后台 - CSV 导出
// ==========================================
// 1. 已存储记录 → CSV（列顺序同导入模板，可直接回导）
// 2. 导入逐行结果 → CSV 报告
// 工具: csv::Writer（负责引号转义）
// ==========================================

use crate::domain::import::RowOutcome;
use crate::domain::record::StoredRecord;
use crate::importer::error::{ImportError, ImportOutcome};
use crate::importer::field_rule::ImportSchema;
use csv::Writer;

/// 导出已存储记录
///
/// 列: 模板字段（必填 + 选填）；缺失字段输出空单元格
pub fn export_records(schema: &ImportSchema, records: &[StoredRecord]) -> ImportOutcome<String> {
    let mut writer = Writer::from_writer(Vec::new());

    let header: Vec<&str> = schema.field_names().collect();
    writer.write_record(&header)?;

    for record in records {
        let row: Vec<String> = header
            .iter()
            .map(|field| record.field_str(field).unwrap_or_default())
            .collect();
        writer.write_record(&row)?;
    }

    finish(writer)
}

/// 导出导入报告（每行一条: 行号, 状态, 错误, 警告）
pub fn export_outcomes(outcomes: &[RowOutcome]) -> ImportOutcome<String> {
    let mut writer = Writer::from_writer(Vec::new());
    writer.write_record(["row", "status", "errors", "warnings"])?;

    for outcome in outcomes {
        let status = match (outcome.result.success, outcome.result.has_warnings()) {
            (true, false) => "success",
            (true, true) => "warning",
            (false, _) => "failed",
        };
        writer.write_record([
            outcome.row_index.to_string(),
            status.to_string(),
            outcome.result.errors.join("; "),
            outcome.result.warnings.join("; "),
        ])?;
    }

    finish(writer)
}

fn finish(writer: Writer<Vec<u8>>) -> ImportOutcome<String> {
    let bytes = writer
        .into_inner()
        .map_err(|e| ImportError::CsvWriteError(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| ImportError::CsvWriteError(e.to_string()))
}
