// ==========================================
// 贸易物流管理后台 - 导入API
// ==========================================
// 职责: 组合 配置 + 记录存储 + 导入器，按实体类型提供
//       导入 / 模板下载 / 导出
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use crate::config::{ConfigManager, ImportConfigReader};
use crate::db::open_sqlite_connection;
use crate::domain::import::{ImportProgress, ImportReport};
use crate::domain::types::EntityType;
use crate::importer::{
    export_records, schema_for, template_file, BatchImporter, CollectionSink, TemplateFile,
};
use crate::notify::Notifier;
use crate::repository::{RecordStore, RepositoryError, SqliteRecordStore};
use std::path::Path;
use std::sync::{Arc, Mutex};
use tokio::sync::watch;
use tracing::info;

/// 导入API
pub struct ImportApi {
    store: Arc<dyn RecordStore>,
    config: Arc<dyn ImportConfigReader>,
    importer: BatchImporter,
}

impl ImportApi {
    /// 以组件创建（测试或自定义存储）
    pub fn new(
        store: Arc<dyn RecordStore>,
        config: Arc<dyn ImportConfigReader>,
        notifier: Arc<dyn Notifier>,
    ) -> ApiResult<Self> {
        Ok(Self {
            store,
            config,
            importer: BatchImporter::new(notifier)?,
        })
    }

    /// 基于 SQLite 数据库文件创建（存储与配置共享同一连接）
    pub fn open(db_path: &str, notifier: Arc<dyn Notifier>) -> ApiResult<Self> {
        let conn = open_sqlite_connection(db_path).map_err(RepositoryError::from)?;
        let conn = Arc::new(Mutex::new(conn));

        let store = Arc::new(SqliteRecordStore::from_connection(conn.clone()));
        let config = Arc::new(ConfigManager::from_connection(conn)?);

        info!(db_path = %db_path, "导入API已就绪");
        Self::new(store, config, notifier)
    }

    /// 订阅导入进度
    pub fn subscribe_progress(&self) -> watch::Receiver<Option<ImportProgress>> {
        self.importer.subscribe()
    }

    /// 导入文件到实体对应的集合
    pub async fn import_file<P: AsRef<Path>>(
        &self,
        entity: EntityType,
        file_path: P,
    ) -> ApiResult<ImportReport> {
        let sink = self.sink_for(entity).await?;
        let schema = schema_for(entity);
        Ok(self.importer.import_file(file_path, &schema, &sink).await?)
    }

    /// 导入上传的文件内容
    pub async fn import_bytes(&self, entity: EntityType, bytes: &[u8]) -> ApiResult<ImportReport> {
        let sink = self.sink_for(entity).await?;
        let schema = schema_for(entity);
        Ok(self.importer.import_bytes(bytes, &schema, &sink).await?)
    }

    /// 下载导入模板
    pub fn download_template(&self, entity: EntityType) -> TemplateFile {
        template_file(&schema_for(entity))
    }

    /// 导出实体集合为 CSV（列顺序同导入模板）
    pub async fn export_csv(&self, entity: EntityType) -> ApiResult<String> {
        let collection = self.config.get_collection(entity).await?;
        let records = self.store.list(&collection).await?;
        Ok(export_records(&schema_for(entity), &records)?)
    }

    async fn sink_for(&self, entity: EntityType) -> ApiResult<CollectionSink> {
        let collection = self.config.get_collection(entity).await?;
        if collection.trim().is_empty() {
            return Err(ApiError::InvalidInput(format!(
                "实体 {} 未配置目标集合",
                entity
            )));
        }
        let actor = self.config.get_actor().await?;
        Ok(CollectionSink::new(self.store.clone(), collection, actor))
    }
}
