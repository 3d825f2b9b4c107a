// ==========================================
// 贸易物流管理后台 - 导入模板生成器
// ==========================================
// 输出两行: 表头（必填在前、选填在后）+ 样例行
// 样例值按字段名取值，与表头列一一对齐
// ==========================================

use crate::importer::field_rule::ImportSchema;
use crate::importer::file_parser::DELIMITER;
use serde::{Deserialize, Serialize};

pub const TEMPLATE_MIME_TYPE: &str = "text/csv";

/// 可下载的模板文件
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateFile {
    pub file_name: String,
    pub mime_type: String,
    pub content: String,
}

/// 生成模板文本
pub fn generate_template(schema: &ImportSchema) -> String {
    let delimiter = DELIMITER.to_string();

    let header: Vec<&str> = schema.field_names().collect();
    let sample: Vec<&str> = header
        .iter()
        .map(|field| schema.sample().get(*field).map(String::as_str).unwrap_or(""))
        .collect();

    format!("{}\n{}", header.join(&delimiter), sample.join(&delimiter))
}

/// 生成模板文件（文件名: {schema}_import_template.csv）
pub fn template_file(schema: &ImportSchema) -> TemplateFile {
    TemplateFile {
        file_name: format!("{}_import_template.csv", schema.name()),
        mime_type: TEMPLATE_MIME_TYPE.to_string(),
        content: generate_template(schema),
    }
}
