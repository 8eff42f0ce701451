//! 编排层（Orchestration Layer）
//!
//! ## 层次关系
//!
//! ```text
//! orchestrator::watcher (定时轮询、资源与统计)
//!     ↓
//! workflow::Session (检测 → 提取 → 匹配)
//!     ↓
//! services (能力层：detector / matcher / miss_writer)
//!     ↓
//! infrastructure (基础设施：JsExecutor / PageSnapshot)
//! ```
//!
//! 只有编排层持有 Browser 和 JsExecutor，下层只通过 `PageAccessor` 读取页面

pub mod watcher;

pub use watcher::{App, Dispatcher, WatchStats};
