// ==========================================
// 贸易物流管理后台 - 通知出口
// ==========================================
// 职责: 面向用户的提示消息（toast）
// 导入流程通过注入的 Notifier 发送，不依赖任何 UI 框架
// ==========================================

use serde::{Deserialize, Serialize};
use std::sync::Mutex;
use tracing::{error, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationLevel {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub level: NotificationLevel,
    pub message: String,
}

pub trait Notifier: Send + Sync {
    fn notify(&self, level: NotificationLevel, message: &str);

    fn success(&self, message: &str) {
        self.notify(NotificationLevel::Success, message);
    }

    fn error(&self, message: &str) {
        self.notify(NotificationLevel::Error, message);
    }
}

/// 将通知写入日志
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, level: NotificationLevel, message: &str) {
        match level {
            NotificationLevel::Success => info!(target: "notification", "{}", message),
            NotificationLevel::Error => error!(target: "notification", "{}", message),
        }
    }
}

/// 内存通知收集器（供界面层轮询或测试断言）
#[derive(Default)]
pub struct MemoryNotifier {
    entries: Mutex<Vec<Notification>>,
}

impl MemoryNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// 取出并清空已收集的通知
    pub fn drain(&self) -> Vec<Notification> {
        match self.entries.lock() {
            Ok(mut guard) => std::mem::take(&mut *guard),
            Err(poisoned) => std::mem::take(&mut *poisoned.into_inner()),
        }
    }
}

impl Notifier for MemoryNotifier {
    fn notify(&self, level: NotificationLevel, message: &str) {
        let entry = Notification {
            level,
            message: message.to_string(),
        };
        match self.entries.lock() {
            Ok(mut guard) => guard.push(entry),
            Err(poisoned) => poisoned.into_inner().push(entry),
        }
    }
}
