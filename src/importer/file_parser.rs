// ==========================================
// 贸易物流管理后台 - 文件解析器实现
// ==========================================
// 阶段 0: 文件读取与解析
// 支持: CSV (.csv) / Excel (.xlsx/.xls)
// ==========================================
// CSV 采用朴素切分：按行、按逗号拆分，不支持引号内的逗号与换行
// ==========================================

use crate::importer::error::{ImportError, ImportOutcome};
use crate::importer::importer_trait::FileParser;
use calamine::{open_workbook_auto, Data, DataType, Reader};
use std::path::Path;

/// 字段分隔符
pub const DELIMITER: char = ',';

/// 将分隔文本解析为单元格行
///
/// - 每个单元格去除首尾空白，并剥离一层包裹的双引号
/// - 空行保留为 `[""]`，保证行号与原文件行位置一致
/// - 末尾换行不产生额外的行
pub fn parse_import_text(content: &str) -> Vec<Vec<String>> {
    content
        .lines()
        .map(|line| line.split(DELIMITER).map(clean_cell).collect())
        .collect()
}

/// 清洗单元格: TRIM + 去掉一层外层引号
fn clean_cell(cell: &str) -> String {
    let trimmed = cell.trim();
    match trimmed
        .strip_prefix('"')
        .and_then(|inner| inner.strip_suffix('"'))
    {
        Some(inner) => inner.to_string(),
        None => trimmed.to_string(),
    }
}

/// 检查文件存在性与扩展名
fn check_file(path: &Path, allowed: &[&str]) -> ImportOutcome<()> {
    if !path.exists() {
        return Err(ImportError::FileNotFound(path.display().to_string()));
    }

    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();
    if !allowed.contains(&ext.as_str()) {
        return Err(ImportError::UnsupportedFormat(ext));
    }
    Ok(())
}

// ==========================================
// CSV Parser 实现
// ==========================================
pub struct CsvParser;

impl FileParser for CsvParser {
    fn parse_rows(&self, file_path: &Path) -> ImportOutcome<Vec<Vec<String>>> {
        check_file(file_path, &["csv"])?;

        let bytes = std::fs::read(file_path)?;
        let content = String::from_utf8(bytes)
            .map_err(|e| ImportError::FileReadError(e.to_string()))?;

        Ok(parse_import_text(&content))
    }
}

// ==========================================
// Excel Parser 实现
// ==========================================
// 读取第一个工作表，单元格按显示文本转为字符串
// 全空行输出为空行（不丢弃），保持行号对齐
pub struct ExcelParser;

impl FileParser for ExcelParser {
    fn parse_rows(&self, file_path: &Path) -> ImportOutcome<Vec<Vec<String>>> {
        check_file(file_path, &["xlsx", "xls"])?;

        let mut workbook = open_workbook_auto(file_path)?;

        let sheet_name = workbook
            .sheet_names()
            .first()
            .cloned()
            .ok_or_else(|| ImportError::ExcelParseError("工作簿中没有工作表".to_string()))?;

        let range = workbook.worksheet_range(&sheet_name)?;

        let rows = range
            .rows()
            .map(|row| {
                let cells: Vec<String> = row.iter().map(cell_text).collect();
                if cells.iter().all(String::is_empty) {
                    Vec::new()
                } else {
                    cells
                }
            })
            .collect();

        Ok(rows)
    }
}

/// 单元格转文本；日期单元格输出 %Y-%m-%d（避免输出 Excel 序列号）
fn cell_text(cell: &Data) -> String {
    match cell {
        Data::DateTime(_) | Data::DateTimeIso(_) => match cell.as_date() {
            Some(date) => date.format("%Y-%m-%d").to_string(),
            None => cell.to_string().trim().to_string(),
        },
        _ => cell.to_string().trim().to_string(),
    }
}

// ==========================================
// 通用文件解析器（根据扩展名自动选择）
// ==========================================
pub struct UniversalFileParser;

impl FileParser for UniversalFileParser {
    fn parse_rows(&self, file_path: &Path) -> ImportOutcome<Vec<Vec<String>>> {
        let ext = file_path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();

        match ext.as_str() {
            "csv" => CsvParser.parse_rows(file_path),
            "xlsx" | "xls" => ExcelParser.parse_rows(file_path),
            _ => Err(ImportError::UnsupportedFormat(ext)),
        }
    }
}
