// ==========================================
// 贸易物流管理后台 - 记录存储 SQLite 实现
// ==========================================
// 职责: 实现 RecordStore（使用 rusqlite）
// 存储: records 表，字段以 JSON 文本保存
// ==========================================

use crate::db::open_sqlite_connection;
use crate::domain::record::StoredRecord;
use crate::repository::error::{RepositoryError, RepositoryResult};
use crate::repository::record_store::RecordStore;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension, Row};
use serde_json::{Map, Value};
use std::sync::{Arc, Mutex, MutexGuard};
use uuid::Uuid;

const SELECT_COLUMNS: &str =
    "id, collection, fields_json, created_by, created_at, updated_at";

// ==========================================
// SqliteRecordStore
// ==========================================
pub struct SqliteRecordStore {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteRecordStore {
    /// 创建新的存储实例
    ///
    /// # 参数
    /// - db_path: 数据库文件路径
    pub fn new(db_path: &str) -> RepositoryResult<Self> {
        let conn = open_sqlite_connection(db_path)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// 从已有连接创建（表结构需已初始化）
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    fn lock(&self) -> RepositoryResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    fn fetch(
        conn: &Connection,
        collection: &str,
        id: Uuid,
    ) -> RepositoryResult<Option<StoredRecord>> {
        let sql = format!(
            "SELECT {} FROM records WHERE collection = ?1 AND id = ?2",
            SELECT_COLUMNS
        );
        let raw = conn
            .query_row(&sql, params![collection, id.to_string()], RawRow::from_row)
            .optional()?;
        raw.map(RawRow::into_record).transpose()
    }
}

/// 数据库原始行（解码前）
struct RawRow {
    id: String,
    collection: String,
    fields_json: String,
    created_by: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl RawRow {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            collection: row.get(1)?,
            fields_json: row.get(2)?,
            created_by: row.get(3)?,
            created_at: row.get(4)?,
            updated_at: row.get(5)?,
        })
    }

    fn into_record(self) -> RepositoryResult<StoredRecord> {
        let id = Uuid::parse_str(&self.id).map_err(|e| RepositoryError::FieldValueError {
            field: "id".to_string(),
            message: e.to_string(),
        })?;
        let fields: Map<String, Value> = serde_json::from_str(&self.fields_json)?;

        Ok(StoredRecord {
            id,
            collection: self.collection,
            fields,
            created_by: self.created_by,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

#[async_trait]
impl RecordStore for SqliteRecordStore {
    async fn get(&self, collection: &str, id: Uuid) -> RepositoryResult<Option<StoredRecord>> {
        let conn = self.lock()?;
        Self::fetch(&conn, collection, id)
    }

    async fn list(&self, collection: &str) -> RepositoryResult<Vec<StoredRecord>> {
        let conn = self.lock()?;
        let sql = format!(
            "SELECT {} FROM records WHERE collection = ?1 ORDER BY created_at, rowid",
            SELECT_COLUMNS
        );
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
            .query_map(params![collection], RawRow::from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        rows.into_iter().map(RawRow::into_record).collect()
    }

    async fn create(
        &self,
        collection: &str,
        fields: Map<String, Value>,
        actor: &str,
    ) -> RepositoryResult<StoredRecord> {
        let now = Utc::now();
        let record = StoredRecord {
            id: Uuid::new_v4(),
            collection: collection.to_string(),
            fields,
            created_by: actor.to_string(),
            created_at: now,
            updated_at: now,
        };

        let conn = self.lock()?;
        conn.execute(
            r#"
            INSERT INTO records (id, collection, fields_json, created_by, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
            params![
                record.id.to_string(),
                record.collection,
                serde_json::to_string(&record.fields)?,
                record.created_by,
                record.created_at,
                record.updated_at,
            ],
        )?;

        Ok(record)
    }

    async fn update(
        &self,
        collection: &str,
        id: Uuid,
        fields: Map<String, Value>,
    ) -> RepositoryResult<StoredRecord> {
        let conn = self.lock()?;
        let mut record =
            Self::fetch(&conn, collection, id)?.ok_or_else(|| RepositoryError::NotFound {
                collection: collection.to_string(),
                id: id.to_string(),
            })?;

        record.fields.extend(fields);
        record.updated_at = Utc::now();

        conn.execute(
            "UPDATE records SET fields_json = ?1, updated_at = ?2 WHERE collection = ?3 AND id = ?4",
            params![
                serde_json::to_string(&record.fields)?,
                record.updated_at,
                collection,
                id.to_string(),
            ],
        )?;

        Ok(record)
    }

    async fn delete(&self, collection: &str, id: Uuid) -> RepositoryResult<bool> {
        let conn = self.lock()?;
        let affected = conn.execute(
            "DELETE FROM records WHERE collection = ?1 AND id = ?2",
            params![collection, id.to_string()],
        )?;
        Ok(affected > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::open_in_memory;
    use serde_json::json;

    fn store() -> SqliteRecordStore {
        SqliteRecordStore::from_connection(Arc::new(Mutex::new(open_in_memory().unwrap())))
    }

    fn fields(value: Value) -> Map<String, Value> {
        serde_json::from_value(value).unwrap()
    }

    #[tokio::test]
    async fn test_create_then_get() {
        let store = store();
        let created = store
            .create("suppliers", fields(json!({"name": "Acme"})), "alice")
            .await
            .unwrap();

        let fetched = store.get("suppliers", created.id).await.unwrap().unwrap();
        assert_eq!(fetched.field_str("name").as_deref(), Some("Acme"));
        assert_eq!(fetched.created_by, "alice");

        // 集合隔离
        assert!(store.get("buyers", created.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_update_merges_fields() {
        let store = store();
        let created = store
            .create("buyers", fields(json!({"name": "Globex", "country": "US"})), "system")
            .await
            .unwrap();

        let updated = store
            .update("buyers", created.id, fields(json!({"country": "CA"})))
            .await
            .unwrap();

        assert_eq!(updated.field_str("name").as_deref(), Some("Globex"));
        assert_eq!(updated.field_str("country").as_deref(), Some("CA"));
        assert!(updated.updated_at >= created.updated_at);
    }

    #[tokio::test]
    async fn test_update_missing_record() {
        let store = store();
        let result = store
            .update("buyers", Uuid::new_v4(), fields(json!({"name": "x"})))
            .await;
        assert!(matches!(result, Err(RepositoryError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_list_and_delete() {
        let store = store();
        let a = store
            .create("contracts", fields(json!({"contract_number": "A"})), "system")
            .await
            .unwrap();
        store
            .create("contracts", fields(json!({"contract_number": "B"})), "system")
            .await
            .unwrap();

        let listed = store.list("contracts").await.unwrap();
        let numbers: Vec<String> = listed
            .iter()
            .filter_map(|r| r.field_str("contract_number"))
            .collect();
        assert_eq!(numbers, vec!["A", "B"]);

        assert!(store.delete("contracts", a.id).await.unwrap());
        assert!(!store.delete("contracts", a.id).await.unwrap());
        assert_eq!(store.list("contracts").await.unwrap().len(), 1);
    }
}
