// ==========================================
// 贸易物流管理后台 - 记录存储 Trait
// ==========================================
// 职责: 按集合划分的通用记录 CRUD（UUID 主键）
// 红线: 不含业务规则；无乐观锁（后写覆盖先写）
// ==========================================

use crate::domain::record::StoredRecord;
use crate::repository::error::RepositoryResult;
use async_trait::async_trait;
use serde_json::{Map, Value};
use uuid::Uuid;

// ==========================================
// RecordStore Trait
// ==========================================
// 实现者: SqliteRecordStore
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// 按 ID 查询记录
    ///
    /// # 返回
    /// - Ok(Some): 记录存在
    /// - Ok(None): 记录不存在（或属于其他集合）
    async fn get(&self, collection: &str, id: Uuid) -> RepositoryResult<Option<StoredRecord>>;

    /// 列出集合内全部记录（按创建时间升序）
    async fn list(&self, collection: &str) -> RepositoryResult<Vec<StoredRecord>>;

    /// 创建记录
    ///
    /// # 参数
    /// - collection: 集合名
    /// - fields: 业务字段
    /// - actor: 创建人
    async fn create(
        &self,
        collection: &str,
        fields: Map<String, Value>,
        actor: &str,
    ) -> RepositoryResult<StoredRecord>;

    /// 合并更新字段（未出现的字段保持不变）
    ///
    /// # 返回
    /// - Err(NotFound): 记录不存在
    async fn update(
        &self,
        collection: &str,
        id: Uuid,
        fields: Map<String, Value>,
    ) -> RepositoryResult<StoredRecord>;

    /// 删除记录
    ///
    /// # 返回
    /// - Ok(true): 已删除
    /// - Ok(false): 记录不存在
    async fn delete(&self, collection: &str, id: Uuid) -> RepositoryResult<bool>;
}
