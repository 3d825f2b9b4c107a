// ==========================================
// 贸易物流管理后台 - API层错误类型
// ==========================================
// 职责: 汇总导入层/仓储层错误，供界面层统一处理
// ==========================================

use crate::importer::error::ImportError;
use crate::repository::error::RepositoryError;
use thiserror::Error;

/// API层错误类型
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("导入失败: {0}")]
    ImportError(#[from] ImportError),

    #[error("数据访问失败: {0}")]
    RepositoryError(#[from] RepositoryError),

    #[error("无效输入: {0}")]
    InvalidInput(String),
}

/// Result 类型别名
pub type ApiResult<T> = Result<T, ApiError>;
