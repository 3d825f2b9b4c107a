// ==========================================
// 贸易物流管理后台 - 领域类型定义
// ==========================================
// 职责: 可导入实体类型枚举
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ==========================================
// 实体类型 (Entity Type)
// ==========================================
// 序列化格式: snake_case (与集合名、模板文件名一致)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityType {
    Contracts, // 合同
    Suppliers, // 供应商
    Buyers,    // 采购商
}

impl EntityType {
    /// 全部内置实体类型（按菜单顺序）
    pub const ALL: [EntityType; 3] = [
        EntityType::Contracts,
        EntityType::Suppliers,
        EntityType::Buyers,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EntityType::Contracts => "contracts",
            EntityType::Suppliers => "suppliers",
            EntityType::Buyers => "buyers",
        }
    }
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for EntityType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "contracts" | "contract" => Ok(EntityType::Contracts),
            "suppliers" | "supplier" => Ok(EntityType::Suppliers),
            "buyers" | "buyer" => Ok(EntityType::Buyers),
            other => Err(format!("unknown entity type: {}", other)),
        }
    }
}
