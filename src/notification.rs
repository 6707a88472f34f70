//! 临时通知（toast）
//!
//! 所有失败路径都在调用处转换为一条通知，界面层从这里取出并显示。

use std::collections::VecDeque;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

/// 队列中最多保留的通知数量，超出时丢弃最旧的
const MAX_PENDING: usize = 50;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToastVariant {
    #[default]
    Default,
    Destructive,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub title: String,
    pub description: String,
    pub variant: ToastVariant,
    pub created_at: DateTime<Utc>,
}

impl Notification {
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        variant: ToastVariant,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            variant,
            created_at: Utc::now(),
        }
    }

    pub fn is_destructive(&self) -> bool {
        self.variant == ToastVariant::Destructive
    }
}

/// 通知中心，可廉价克隆并在各组件之间共享
#[derive(Clone, Debug, Default)]
pub struct NotificationCenter {
    queue: Arc<Mutex<VecDeque<Notification>>>,
}

impl NotificationCenter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, notification: Notification) {
        match notification.variant {
            ToastVariant::Default => {
                log::info!("[toast] {}: {}", notification.title, notification.description)
            }
            ToastVariant::Destructive => {
                log::warn!("[toast] {}: {}", notification.title, notification.description)
            }
        }

        let mut queue = self.queue.lock();
        if queue.len() >= MAX_PENDING {
            queue.pop_front();
        }
        queue.push_back(notification);
    }

    /// 普通通知
    pub fn info(&self, title: impl Into<String>, description: impl Into<String>) {
        self.push(Notification::new(title, description, ToastVariant::Default));
    }

    /// 错误通知
    pub fn error(&self, title: impl Into<String>, description: impl Into<String>) {
        self.push(Notification::new(
            title,
            description,
            ToastVariant::Destructive,
        ));
    }

    /// 取出所有待显示的通知
    pub fn drain(&self) -> Vec<Notification> {
        self.queue.lock().drain(..).collect()
    }

    pub fn latest(&self) -> Option<Notification> {
        self.queue.lock().back().cloned()
    }

    pub fn snapshot(&self) -> Vec<Notification> {
        self.queue.lock().iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.queue.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.lock().is_empty()
    }
}
