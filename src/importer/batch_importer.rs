// ==========================================
// 贸易物流管理后台 - 批量导入编排器
// ==========================================
// 流程: 解析 → 逐行校验 → 持久化回调 → 进度 → 汇总通知
// 并发: 严格串行，每行 await 持久化回调后再处理下一行
// ==========================================

use crate::domain::import::{ImportProgress, ImportReport, ImportSummary, RowOutcome};
use crate::importer::error::{ImportError, ImportOutcome};
use crate::importer::field_rule::ImportSchema;
use crate::importer::file_parser::{parse_import_text, UniversalFileParser};
use crate::importer::importer_trait::{FileParser, RecordSink};
use crate::importer::row_validator::RowValidator;
use crate::notify::Notifier;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::watch;
use tracing::{debug, error, info, instrument, warn};
use uuid::Uuid;

/// 持久化失败时追加的行级错误
pub const PERSIST_FAILED_MESSAGE: &str = "Failed to create/save data";

/// 文件级失败时的用户提示
pub const IMPORT_FAILED_MESSAGE: &str = "Failed to import file";

// ==========================================
// BatchImporter - 批量导入编排器
// ==========================================
pub struct BatchImporter {
    // 行校验器
    validator: RowValidator,

    // 文件解析器
    file_parser: Arc<dyn FileParser>,

    // 通知出口
    notifier: Arc<dyn Notifier>,

    // 实时进度（None 表示当前无导入运行）
    progress: watch::Sender<Option<ImportProgress>>,
}

impl BatchImporter {
    /// 使用通用文件解析器创建导入器
    pub fn new(notifier: Arc<dyn Notifier>) -> ImportOutcome<Self> {
        Self::with_parser(Arc::new(UniversalFileParser), notifier)
    }

    pub fn with_parser(
        file_parser: Arc<dyn FileParser>,
        notifier: Arc<dyn Notifier>,
    ) -> ImportOutcome<Self> {
        let (progress, _) = watch::channel(None);
        Ok(Self {
            validator: RowValidator::new()?,
            file_parser,
            notifier,
            progress,
        })
    }

    /// 订阅实时进度（用于进度条）
    pub fn subscribe(&self) -> watch::Receiver<Option<ImportProgress>> {
        self.progress.subscribe()
    }

    /// 当前进度快照
    pub fn progress(&self) -> Option<ImportProgress> {
        *self.progress.borrow()
    }

    /// 从文件导入
    ///
    /// # 返回
    /// - Ok(ImportReport): 逐行结果 + 汇总
    /// - Err: 文件读取/解析失败（整次运行中止，不处理任何行）
    pub async fn import_file<P: AsRef<Path>>(
        &self,
        file_path: P,
        schema: &ImportSchema,
        sink: &dyn RecordSink,
    ) -> ImportOutcome<ImportReport> {
        let path = file_path.as_ref().to_path_buf();
        info!(file_path = %path.display(), schema = %schema.name(), "开始导入文件");

        let parser = Arc::clone(&self.file_parser);
        let parsed = tokio::task::spawn_blocking(move || parser.parse_rows(&path))
            .await
            .map_err(|e| ImportError::FileReadError(e.to_string()))
            .and_then(|rows| rows);

        match parsed {
            Ok(rows) => self.import_rows(rows, schema, sink).await,
            Err(e) => Err(self.abort(e)),
        }
    }

    /// 从已读入内存的文本导入
    pub async fn import_text(
        &self,
        content: &str,
        schema: &ImportSchema,
        sink: &dyn RecordSink,
    ) -> ImportOutcome<ImportReport> {
        self.import_rows(parse_import_text(content), schema, sink)
            .await
    }

    /// 从字节导入（浏览器上传等场景）；非 UTF-8 内容视为文件级失败
    pub async fn import_bytes(
        &self,
        bytes: &[u8],
        schema: &ImportSchema,
        sink: &dyn RecordSink,
    ) -> ImportOutcome<ImportReport> {
        match std::str::from_utf8(bytes) {
            Ok(content) => self.import_text(content, schema, sink).await,
            Err(e) => Err(self.abort(ImportError::FileReadError(e.to_string()))),
        }
    }

    /// 导入已解析的行（第一行为表头）
    #[instrument(skip(self, rows, schema, sink), fields(schema = %schema.name(), batch_id = tracing::field::Empty))]
    pub async fn import_rows(
        &self,
        rows: Vec<Vec<String>>,
        schema: &ImportSchema,
        sink: &dyn RecordSink,
    ) -> ImportOutcome<ImportReport> {
        let start_time = Instant::now();
        let batch_id = Uuid::new_v4().to_string();
        tracing::Span::current().record("batch_id", batch_id.as_str());

        let mut rows = rows.into_iter();
        let headers = rows.next().unwrap_or_default();
        let data_rows: Vec<Vec<String>> = rows.collect();

        let mut progress = ImportProgress::start(data_rows.len());
        self.progress.send_replace(Some(progress));
        info!(total_rows = data_rows.len(), columns = headers.len(), "文件解析完成");

        let mut outcomes = Vec::with_capacity(data_rows.len());
        for (idx, row) in data_rows.iter().enumerate() {
            let row_index = idx + 2;

            // 短行直接丢弃：不计入进度，也不产生结果
            if row.len() < headers.len() {
                debug!(row_index, cells = row.len(), "行长度不足，已跳过");
                continue;
            }

            let mut result = self.validator.validate(row, &headers, schema);

            // 校验通过即落库；全部选填字段缺失时 data 为空映射，仍视为一条记录
            if result.success {
                match sink.persist(&result.data).await {
                    Ok(()) => {
                        progress.record_success(result.has_warnings());
                    }
                    Err(e) => {
                        warn!(row_index, error = %e, "记录保存失败");
                        result.success = false;
                        result.errors.push(PERSIST_FAILED_MESSAGE.to_string());
                        progress.record_failure();
                    }
                }
            } else {
                debug!(row_index, errors = result.errors.len(), "行校验失败");
                progress.record_failure();
            }

            outcomes.push(RowOutcome { row_index, result });
            self.progress.send_replace(Some(progress));
        }

        let summary = ImportSummary::from_outcomes(&outcomes);
        self.notifier.success(&summary.to_string());
        self.progress.send_replace(None);

        let elapsed_ms = start_time.elapsed().as_millis() as u64;
        info!(
            batch_id = %batch_id,
            successful = summary.successful,
            warnings = summary.warnings,
            failed = summary.failed,
            skipped = data_rows.len() - progress.current,
            elapsed_ms,
            "导入完成"
        );

        Ok(ImportReport {
            batch_id,
            outcomes,
            summary,
            progress,
            elapsed_ms,
        })
    }

    /// 文件级失败：通知、清空进度、返回错误
    fn abort(&self, err: ImportError) -> ImportError {
        error!(error = %err, "文件解析失败，导入中止");
        self.notifier.error(IMPORT_FAILED_MESSAGE);
        self.progress.send_replace(None);
        err
    }
}
