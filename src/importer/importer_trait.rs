// ==========================================
// 贸易物流管理后台 - 导入管道 Trait
// ==========================================
// 职责: 定义导入管道的接缝（不包含实现）
// - FileParser: 文件 → 单元格行
// - RecordSink: 校验通过的记录 → 外部记录存储
// ==========================================

use crate::domain::import::Record;
use crate::importer::error::{ImportOutcome, SinkError};
use async_trait::async_trait;
use std::future::Future;
use std::path::Path;

// ==========================================
// FileParser Trait
// ==========================================
// 实现者: CsvParser, ExcelParser
pub trait FileParser: Send + Sync {
    /// 解析文件为单元格行（第一行为表头）
    ///
    /// # 返回
    /// - Ok(Vec<Vec<String>>): 全部行（已物化）
    /// - Err: 读取失败或格式不支持
    fn parse_rows(&self, file_path: &Path) -> ImportOutcome<Vec<Vec<String>>>;
}

// ==========================================
// RecordSink Trait
// ==========================================
// 用途: 持久化回调（导入流程与记录存储之间唯一的接缝）
// 实现者: CollectionSink, PersistFn
#[async_trait]
pub trait RecordSink: Send + Sync {
    /// 保存一条已通过校验的记录
    ///
    /// 导入流程逐行 await，不会并发调用
    async fn persist(&self, record: &Record) -> Result<(), SinkError>;
}

/// 将异步闭包适配为 RecordSink
///
/// # 示例
/// ```no_run
/// use trade_import::importer::{PersistFn, SinkError};
/// let sink = PersistFn(|record: trade_import::domain::Record| async move {
///     println!("{:?}", record);
///     Ok::<(), SinkError>(())
/// });
/// ```
pub struct PersistFn<F>(pub F);

#[async_trait]
impl<F, Fut> RecordSink for PersistFn<F>
where
    F: Fn(Record) -> Fut + Send + Sync,
    Fut: Future<Output = Result<(), SinkError>> + Send,
{
    async fn persist(&self, record: &Record) -> Result<(), SinkError> {
        (self.0)(record.clone()).await
    }
}
