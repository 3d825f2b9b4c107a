// ==========================================
// 贸易物流管理后台 - 存储记录模型
// ==========================================
// 用途: 记录存储（按集合划分，UUID 主键）中的一条记录
// 对齐: records 表
// ==========================================

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredRecord {
    pub id: Uuid,                      // 记录 ID（UUID v4）
    pub collection: String,            // 所属集合（contracts / suppliers / ...）
    pub fields: Map<String, Value>,    // 业务字段（JSON 对象）
    pub created_by: String,            // 创建人
    pub created_at: DateTime<Utc>,     // 创建时间
    pub updated_at: DateTime<Utc>,     // 最后修改时间
}

impl StoredRecord {
    /// 读取字符串字段（非字符串值按 JSON 文本返回）
    pub fn field_str(&self, name: &str) -> Option<String> {
        self.fields.get(name).map(|v| match v {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        })
    }
}
