// ==========================================
// 贸易物流管理后台 - 领域模型层
// ==========================================
// 职责: 定义导入结果、进度、存储记录与实体类型
// 红线: 不含数据访问逻辑,不含导入流程逻辑
// ==========================================

pub mod import;
pub mod record;
pub mod types;

// 重导出核心类型
pub use import::{ImportProgress, ImportReport, ImportResult, ImportSummary, Record, RowOutcome};
pub use record::StoredRecord;
pub use types::EntityType;
