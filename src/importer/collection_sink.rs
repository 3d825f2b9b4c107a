// ==========================================
// 贸易物流管理后台 - 集合写入适配器
// ==========================================
// 职责: 将 RecordStore 的某个集合适配为导入流程的 RecordSink
// ==========================================

use crate::domain::import::Record;
use crate::importer::error::SinkError;
use crate::importer::importer_trait::RecordSink;
use crate::repository::RecordStore;
use async_trait::async_trait;
use serde_json::{Map, Value};
use std::sync::Arc;
use tracing::debug;

pub struct CollectionSink {
    store: Arc<dyn RecordStore>,
    collection: String,
    actor: String,
}

impl CollectionSink {
    /// # 参数
    /// - store: 记录存储
    /// - collection: 目标集合
    /// - actor: 创建人（写入 created_by）
    pub fn new(
        store: Arc<dyn RecordStore>,
        collection: impl Into<String>,
        actor: impl Into<String>,
    ) -> Self {
        Self {
            store,
            collection: collection.into(),
            actor: actor.into(),
        }
    }

    pub fn collection(&self) -> &str {
        &self.collection
    }
}

#[async_trait]
impl RecordSink for CollectionSink {
    async fn persist(&self, record: &Record) -> Result<(), SinkError> {
        let fields: Map<String, Value> = record
            .iter()
            .map(|(k, v)| (k.clone(), Value::String(v.clone())))
            .collect();

        let stored = self
            .store
            .create(&self.collection, fields, &self.actor)
            .await?;
        debug!(collection = %self.collection, id = %stored.id, "记录已创建");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::open_in_memory;
    use crate::repository::SqliteRecordStore;
    use std::sync::Mutex;

    #[tokio::test]
    async fn test_persist_creates_record_in_collection() {
        let store: Arc<dyn RecordStore> = Arc::new(SqliteRecordStore::from_connection(Arc::new(
            Mutex::new(open_in_memory().unwrap()),
        )));
        let sink = CollectionSink::new(store.clone(), "suppliers", "importer");

        let mut record = Record::new();
        record.insert("name".to_string(), "Acme".to_string());
        sink.persist(&record).await.unwrap();

        let listed = store.list("suppliers").await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].field_str("name").as_deref(), Some("Acme"));
        assert_eq!(listed[0].created_by, "importer");
    }
}
