//! 会话事件
//!
//! 会话只在状态变化时产生事件，由界面层或日志层消费

use crate::error::DataError;
use crate::models::{DetectionResult, MatchResult};
use crate::utils::logging::truncate_text;
use std::fmt::Display;

/// 会话事件
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// 识别到游戏页面
    Detected(DetectionResult),
    /// 新题目找到答案
    Answer {
        profile_id: String,
        question: String,
        result: MatchResult,
    },
    /// 新题目在题库中没有答案
    NoAnswer { profile_id: String, question: String },
    /// 新题目出现，但题库不可用
    DataUnavailable {
        profile_id: String,
        question: String,
        error: DataError,
    },
}

impl Display for SessionEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SessionEvent::Detected(detection) => write!(f, "识别到游戏: {}", detection),
            SessionEvent::Answer {
                question, result, ..
            } => write!(f, "「{}」→ {}", truncate_text(question, 60), result),
            SessionEvent::NoAnswer { question, .. } => {
                write!(f, "「{}」→ 题库中没有答案", truncate_text(question, 60))
            }
            SessionEvent::DataUnavailable {
                question, error, ..
            } => write!(f, "「{}」→ {}", truncate_text(question, 60), error),
        }
    }
}

/// 事件消费者（界面层的替身）
pub trait ResultSink {
    fn on_event(&mut self, event: &SessionEvent);
}

/// 把事件写入日志
#[derive(Debug, Default)]
pub struct LogSink;

impl ResultSink for LogSink {
    fn on_event(&mut self, event: &SessionEvent) {
        match event {
            SessionEvent::Detected(_) => tracing::info!("🎮 {}", event),
            SessionEvent::Answer { .. } => tracing::info!("✅ {}", event),
            SessionEvent::NoAnswer { .. } => tracing::warn!("❓ {}", event),
            SessionEvent::DataUnavailable { .. } => tracing::error!("⚠️ {}", event),
        }
    }
}

/// 收集全部事件，便于测试和批量处理
#[derive(Debug, Default)]
pub struct CollectSink {
    pub events: Vec<SessionEvent>,
}

impl ResultSink for CollectSink {
    fn on_event(&mut self, event: &SessionEvent) {
        self.events.push(event.clone());
    }
}
