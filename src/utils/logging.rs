//! 日志工具模块
//!
//! 提供日志初始化、格式化和输出的辅助函数
use crate::config::Config;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// 初始化日志
///
/// `RUST_LOG` 优先，否则按 `verbose` 选择 debug 或 info
pub fn init(verbose: bool) {
    let default_filter = if verbose {
        "trivia_overlay=debug,info"
    } else {
        "trivia_overlay=info,warn"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    // 测试中可能重复初始化，忽略已设置的错误
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .compact(),
        )
        .try_init();
}

/// 记录程序启动信息
pub fn log_startup(config: &Config) {
    info!("{}", "=".repeat(60));
    info!("🚀 程序启动 - 派对游戏答题助手");
    info!("🌐 浏览器调试端口: {}", config.browser_debug_port);
    info!("⏱️ 轮询间隔: {} ms", config.poll_interval_ms);
    info!("📚 题库文件: {}", config.qa_table_path);
    info!("{}", "=".repeat(60));
}

/// 打印最终统计信息
pub fn print_final_stats(ticks: u64, answered: usize, missed: usize, miss_log_file: &str) {
    info!("\n{}", "=".repeat(60));
    info!("📊 运行结束统计");
    info!(
        "结束时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("{}", "=".repeat(60));
    info!("🔁 轮询次数: {}", ticks);
    info!("✅ 找到答案: {}", answered);
    info!("❓ 未命中: {}", missed);
    info!("{}", "=".repeat(60));
    if missed > 0 {
        info!("\n未命中题目已保存至: {}", miss_log_file);
    }
}

/// 截断长文本用于日志显示
///
/// # 参数
/// - `text`: 原始文本
/// - `max_len`: 最大长度（字符数）
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        text.chars().take(max_len).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}
