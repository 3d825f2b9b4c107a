// ==========================================
// 贸易物流管理后台 - 导入模块错误类型
// ==========================================
// 工具: thiserror 派生宏
// 说明: 行级校验问题不走错误类型，写入 ImportResult.errors / warnings
// ==========================================

use thiserror::Error;

/// 导入模块错误类型
#[derive(Error, Debug)]
pub enum ImportError {
    // ===== 文件相关错误 =====
    #[error("文件不存在: {0}")]
    FileNotFound(String),

    #[error("文件格式不支持: {0}（仅支持 .csv/.xlsx/.xls）")]
    UnsupportedFormat(String),

    /// 文件读取/解析失败（不携带行列位置）
    #[error("文件读取失败: {0}")]
    FileReadError(String),

    #[error("Excel 解析失败: {0}")]
    ExcelParseError(String),

    // ===== 校验规则错误 =====
    #[error("校验规则编译失败: {0}")]
    InvalidPattern(#[from] regex::Error),

    // ===== 导出错误 =====
    #[error("CSV 写出失败: {0}")]
    CsvWriteError(String),

    // ===== 配置错误 =====
    #[error("配置读取失败 (key: {key}): {message}")]
    ConfigReadError { key: String, message: String },

    // ===== 通用错误 =====
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<std::io::Error> for ImportError {
    fn from(err: std::io::Error) -> Self {
        ImportError::FileReadError(err.to_string())
    }
}

impl From<csv::Error> for ImportError {
    fn from(err: csv::Error) -> Self {
        ImportError::CsvWriteError(err.to_string())
    }
}

impl From<calamine::Error> for ImportError {
    fn from(err: calamine::Error) -> Self {
        ImportError::ExcelParseError(err.to_string())
    }
}

/// Result 类型别名
pub type ImportOutcome<T> = Result<T, ImportError>;

// ==========================================
// SinkError - 持久化回调错误
// ==========================================
// 由 RecordSink 实现返回；导入流程将其折算为行级错误
#[derive(Error, Debug)]
#[error("{0}")]
pub struct SinkError(pub String);

impl SinkError {
    pub fn new(message: impl Into<String>) -> Self {
        SinkError(message.into())
    }
}

impl From<crate::repository::RepositoryError> for SinkError {
    fn from(err: crate::repository::RepositoryError) -> Self {
        SinkError(err.to_string())
    }
}

impl From<anyhow::Error> for SinkError {
    fn from(err: anyhow::Error) -> Self {
        SinkError(err.to_string())
    }
}
