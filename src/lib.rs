// ==========================================
// 贸易物流管理后台 - 数据导入核心库
// ==========================================
// 覆盖: 合同 / 供应商 / 采购商 的 CSV/Excel 导入
// 流程: 模板 → 解析 → 逐行校验 → 落库 → 汇总通知
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 导入结果与记录
pub mod domain;

// 导入层 - 解析/校验/编排/模板/导出
pub mod importer;

// 数据仓储层 - 记录存储
pub mod repository;

// 配置层 - 系统配置
pub mod config;

// 数据库基础设施（连接初始化/PRAGMA 统一/建表）
pub mod db;

// 通知出口
pub mod notify;

// 日志系统
pub mod logging;

// API 层 - 业务接口
pub mod api;

// ==========================================
// 重导出核心类型
// ==========================================

pub use domain::{
    EntityType, ImportProgress, ImportReport, ImportResult, ImportSummary, Record, RowOutcome,
    StoredRecord,
};
pub use importer::{BatchImporter, FieldRule, ImportError, ImportSchema, RecordSink, RuleKind};
pub use notify::{MemoryNotifier, Notifier, TracingNotifier};
pub use repository::{RecordStore, SqliteRecordStore};
pub use api::ImportApi;

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "贸易物流管理后台 - 数据导入";
