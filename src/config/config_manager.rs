// ==========================================
// 贸易物流管理后台 - 配置管理器
// ==========================================
// 职责: 配置加载、查询、覆写管理
// 存储: config_kv 表 (key-value + scope)
// ==========================================

use crate::config::import_config_trait::ImportConfigReader;
use crate::db::{configure_sqlite_connection, open_sqlite_connection};
use crate::domain::types::EntityType;
use crate::importer::error::{ImportError, ImportOutcome};
use async_trait::async_trait;
use rusqlite::{params, Connection, OptionalExtension};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

/// 允许通过环境变量显式指定 DB 路径（便于调试/测试/CI）
pub const DB_PATH_ENV: &str = "TRADE_IMPORT_DB_PATH";

pub const DEFAULT_ACTOR: &str = "system";

pub mod config_keys {
    /// 导入操作人
    pub const IMPORT_ACTOR: &str = "import.actor";

    /// 实体 → 集合映射前缀（完整 key: import.collection.{entity}）
    pub const IMPORT_COLLECTION_PREFIX: &str = "import.collection.";
}

// ==========================================
// ConfigManager - 配置管理器
// ==========================================
pub struct ConfigManager {
    conn: Arc<Mutex<Connection>>,
}

impl ConfigManager {
    /// 创建新的 ConfigManager 实例
    ///
    /// # 参数
    /// - db_path: 数据库文件路径
    pub fn new(db_path: &str) -> ImportOutcome<Self> {
        let conn = open_sqlite_connection(db_path).map_err(|e| ImportError::ConfigReadError {
            key: "<open>".to_string(),
            message: e.to_string(),
        })?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// 从已有连接创建 ConfigManager
    ///
    /// 说明：会对传入连接再次应用统一 PRAGMA（幂等）
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> ImportOutcome<Self> {
        {
            let guard = conn.lock().map_err(|e| lock_error(e.to_string()))?;
            configure_sqlite_connection(&guard).map_err(|e| ImportError::ConfigReadError {
                key: "<pragma>".to_string(),
                message: e.to_string(),
            })?;
        }

        Ok(Self { conn })
    }

    /// 读取 global scope 的配置值
    ///
    /// # 返回
    /// - Some(String): 配置值
    /// - None: 配置不存在
    pub fn get_global_config_value(&self, key: &str) -> ImportOutcome<Option<String>> {
        let conn = self.conn.lock().map_err(|e| lock_error(e.to_string()))?;

        conn.query_row(
            "SELECT value FROM config_kv WHERE scope_id = 'global' AND key = ?1",
            params![key],
            |row| row.get::<_, String>(0),
        )
        .optional()
        .map_err(|e| ImportError::ConfigReadError {
            key: key.to_string(),
            message: e.to_string(),
        })
    }

    /// 写入 global scope 的配置值（存在则覆盖）
    pub fn set_global_config_value(&self, key: &str, value: &str) -> ImportOutcome<()> {
        let conn = self.conn.lock().map_err(|e| lock_error(e.to_string()))?;

        conn.execute(
            r#"
            INSERT INTO config_kv (scope_id, key, value, updated_at)
            VALUES ('global', ?1, ?2, datetime('now'))
            ON CONFLICT(scope_id, key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at
            "#,
            params![key, value],
        )
        .map_err(|e| ImportError::ConfigReadError {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        Ok(())
    }

    /// 读取非空配置值，缺失或空白时返回默认值
    fn get_or_default(&self, key: &str, default: &str) -> ImportOutcome<String> {
        Ok(self
            .get_global_config_value(key)?
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| default.to_string()))
    }
}

fn lock_error(message: String) -> ImportError {
    ImportError::ConfigReadError {
        key: "<lock>".to_string(),
        message,
    }
}

#[async_trait]
impl ImportConfigReader for ConfigManager {
    async fn get_collection(&self, entity: EntityType) -> ImportOutcome<String> {
        let key = format!("{}{}", config_keys::IMPORT_COLLECTION_PREFIX, entity.as_str());
        self.get_or_default(&key, entity.as_str())
    }

    async fn get_actor(&self) -> ImportOutcome<String> {
        self.get_or_default(config_keys::IMPORT_ACTOR, DEFAULT_ACTOR)
    }
}

/// 默认数据库路径
///
/// 优先级: 环境变量 TRADE_IMPORT_DB_PATH > 用户数据目录 > 当前目录
pub fn get_default_db_path() -> String {
    if let Ok(path) = std::env::var(DB_PATH_ENV) {
        let trimmed = path.trim();
        if !trimmed.is_empty() {
            return trimmed.to_string();
        }
    }

    let mut path = PathBuf::from("./trade_import.db");
    if let Some(data_dir) = dirs::data_dir() {
        let dir = data_dir.join("trade-import");
        if std::fs::create_dir_all(&dir).is_ok() {
            path = dir.join("trade_import.db");
        }
    }

    path.to_string_lossy().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::open_in_memory;

    fn manager() -> ConfigManager {
        ConfigManager::from_connection(Arc::new(Mutex::new(open_in_memory().unwrap()))).unwrap()
    }

    #[tokio::test]
    async fn test_defaults_when_unset() {
        let config = manager();
        assert_eq!(config.get_collection(EntityType::Buyers).await.unwrap(), "buyers");
        assert_eq!(config.get_actor().await.unwrap(), DEFAULT_ACTOR);
    }

    #[tokio::test]
    async fn test_overrides_from_config_kv() {
        let config = manager();
        config
            .set_global_config_value("import.collection.contracts", "trade_contracts")
            .unwrap();
        config.set_global_config_value(config_keys::IMPORT_ACTOR, "ops@example.com").unwrap();

        assert_eq!(
            config.get_collection(EntityType::Contracts).await.unwrap(),
            "trade_contracts"
        );
        assert_eq!(config.get_actor().await.unwrap(), "ops@example.com");
    }

    #[tokio::test]
    async fn test_blank_value_falls_back_to_default() {
        let config = manager();
        config.set_global_config_value(config_keys::IMPORT_ACTOR, "   ").unwrap();
        assert_eq!(config.get_actor().await.unwrap(), DEFAULT_ACTOR);
    }

    #[test]
    fn test_get_default_db_path() {
        let path = get_default_db_path();
        assert!(!path.is_empty());
    }
}
