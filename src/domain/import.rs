// ==========================================
// 贸易物流管理后台 - 导入领域模型
// ==========================================
// 职责: 单行校验结果 / 导入进度 / 导入汇总
// 生命周期: 仅存活于一次导入调用内
// ==========================================

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// 映射后的记录（字段名 → 标准化字符串值）
pub type Record = BTreeMap<String, String>;

// ==========================================
// ImportResult - 单行校验结果
// ==========================================
// success = false 当且仅当至少一个必填字段校验失败
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImportResult {
    pub success: bool,
    pub data: Record,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl ImportResult {
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

// ==========================================
// RowOutcome - 带行号的导入结果
// ==========================================
// row_index: 原始文件行号（表头为第 1 行，数据行从第 2 行开始）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RowOutcome {
    pub row_index: usize,
    #[serde(flatten)]
    pub result: ImportResult,
}

// ==========================================
// ImportProgress - 导入进度（实时）
// ==========================================
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportProgress {
    pub total: usize,
    pub current: usize,
    pub successful: usize,
    pub warnings: usize,
    pub failed: usize,
}

impl ImportProgress {
    pub fn start(total: usize) -> Self {
        Self {
            total,
            ..Self::default()
        }
    }

    pub fn record_success(&mut self, with_warnings: bool) {
        self.current += 1;
        self.successful += 1;
        if with_warnings {
            self.warnings += 1;
        }
    }

    pub fn record_failure(&mut self) {
        self.current += 1;
        self.failed += 1;
    }
}

// ==========================================
// ImportSummary - 导入汇总
// ==========================================
// 从最终结果列表重新统计，不复用实时进度计数
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportSummary {
    pub successful: usize,
    pub warnings: usize,
    pub failed: usize,
}

impl ImportSummary {
    pub fn from_outcomes(outcomes: &[RowOutcome]) -> Self {
        Self {
            successful: outcomes.iter().filter(|o| o.result.success).count(),
            warnings: outcomes.iter().filter(|o| o.result.has_warnings()).count(),
            failed: outcomes.iter().filter(|o| !o.result.success).count(),
        }
    }
}

impl fmt::Display for ImportSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Import complete: {} successful, {} with warnings, {} failed",
            self.successful, self.warnings, self.failed
        )
    }
}

// ==========================================
// ImportReport - 一次导入运行的返回值
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImportReport {
    pub batch_id: String,          // 运行 ID（UUID）
    pub outcomes: Vec<RowOutcome>, // 逐行结果（按文件行序）
    pub summary: ImportSummary,    // 汇总统计
    pub progress: ImportProgress,  // 运行结束时的实时计数（短行不计入）
    pub elapsed_ms: u64,           // 耗时（毫秒）
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outcome(row_index: usize, success: bool, warnings: usize) -> RowOutcome {
        RowOutcome {
            row_index,
            result: ImportResult {
                success,
                data: Record::new(),
                errors: Vec::new(),
                warnings: (0..warnings).map(|i| format!("w{}", i)).collect(),
            },
        }
    }

    #[test]
    fn test_progress_counts_warning_rows_once() {
        let mut progress = ImportProgress::start(3);
        progress.record_success(true);
        progress.record_success(false);
        progress.record_failure();

        assert_eq!(
            progress,
            ImportProgress {
                total: 3,
                current: 3,
                successful: 2,
                warnings: 1,
                failed: 1,
            }
        );
    }

    #[test]
    fn test_summary_rederived_from_outcomes() {
        let outcomes = vec![outcome(2, true, 2), outcome(3, false, 1), outcome(4, true, 0)];
        let summary = ImportSummary::from_outcomes(&outcomes);

        assert_eq!(summary.successful, 2);
        // 失败行上的警告同样计入
        assert_eq!(summary.warnings, 2);
        assert_eq!(summary.failed, 1);
        assert_eq!(
            summary.to_string(),
            "Import complete: 2 successful, 2 with warnings, 1 failed"
        );
    }

    #[test]
    fn test_row_outcome_serializes_flat() {
        let value = serde_json::to_value(outcome(2, true, 0)).unwrap();
        assert_eq!(value["row_index"], 2);
        assert_eq!(value["success"], true);
    }
}
