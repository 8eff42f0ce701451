//! # Trivia Overlay
//!
//! 派对游戏答题助手：识别浏览器中的游戏页面，读取题干，在题库中查找答案
//!
//! ## 架构设计
//!
//! ### ① 基础设施层（Infrastructure）
//! - `infrastructure/` - 持有稀缺资源（Page），只暴露能力
//! - `JsExecutor` - 唯一的 page owner，提供 eval() 和页面快照
//! - `PageAccessor` - 检测与匹配读取页面的唯一接口
//!
//! ### ② 业务能力层（Services）
//! - `detector` - 按档案识别游戏页面、提取题干
//! - `matcher` - 归一化题干并在题库中查找答案
//! - `MissWriter` - 记录题库中没有的题目
//!
//! ### ③ 流程层（Workflow）
//! - `Session` - 持有当前游戏和上一道题，执行 检测 → 提取 → 匹配
//! - `SessionEvent` / `ResultSink` - 事件与消费者
//!
//! ### ④ 编排层（Orchestration）
//! - `orchestrator/watcher` - 定时轮询、事件分发、统计

pub mod browser;
pub mod config;
pub mod error;
pub mod infrastructure;

pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use browser::connect_to_browser_and_page;
pub use config::Config;
pub use error::{AppError, AppResult, DataError};
pub use infrastructure::{JsExecutor, PageAccessor, PageSnapshot};
pub use models::{DetectionResult, MatchResult, Profile, ProfileSet, QaEntry, QaSource, QaTable};
pub use orchestrator::{App, WatchStats};
pub use services::{detect, extract_question, find_answer, normalize};
pub use workflow::{ResultSink, Session, SessionEvent};
