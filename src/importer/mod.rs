// ==========================================
// 贸易物流管理后台 - 导入层
// ==========================================
// 职责: 外部文件导入 → 校验 → 落库；模板生成；CSV 导出
// 支持: CSV, Excel
// ==========================================

// 模块声明
pub mod batch_importer;
pub mod builtin_schemas;
pub mod collection_sink;
pub mod error;
pub mod export;
pub mod field_rule;
pub mod file_parser;
pub mod importer_trait;
pub mod row_validator;
pub mod template;

// 重导出核心类型
pub use batch_importer::{BatchImporter, IMPORT_FAILED_MESSAGE, PERSIST_FAILED_MESSAGE};
pub use builtin_schemas::schema_for;
pub use collection_sink::CollectionSink;
pub use error::{ImportError, ImportOutcome, SinkError};
pub use export::{export_outcomes, export_records};
pub use field_rule::{FieldRule, ImportSchema, RuleKind, SchemaBuilder};
pub use file_parser::{parse_import_text, CsvParser, ExcelParser, UniversalFileParser};
pub use row_validator::RowValidator;
pub use template::{generate_template, template_file, TemplateFile};

// 重导出 Trait 接口
pub use importer_trait::{FileParser, PersistFn, RecordSink};
