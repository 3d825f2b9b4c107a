// ==========================================
// 贸易物流管理后台 - 导入配置读取 Trait
// ==========================================
// 职责: 定义导入模块所需的配置读取接口（不包含实现）
// 红线: 不包含配置写入、不包含业务逻辑
// ==========================================

use crate::domain::types::EntityType;
use crate::importer::error::ImportOutcome;
use async_trait::async_trait;

// ==========================================
// ImportConfigReader Trait
// ==========================================
// 实现者: ConfigManager（从 config_kv 表读取）
#[async_trait]
pub trait ImportConfigReader: Send + Sync {
    /// 获取实体类型对应的目标集合
    ///
    /// # 默认值
    /// - 实体名本身（contracts / suppliers / buyers）
    async fn get_collection(&self, entity: EntityType) -> ImportOutcome<String>;

    /// 获取导入操作人（写入记录的 created_by）
    ///
    /// # 默认值
    /// - system
    async fn get_actor(&self) -> ImportOutcome<String>;
}
