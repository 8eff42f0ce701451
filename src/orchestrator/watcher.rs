//! 页面监视器 - 编排层
//!
//! ## 职责
//!
//! 1. **应用初始化**：校验配置、加载档案和题库、连接浏览器
//! 2. **定时轮询**：按固定间隔采集页面快照并推进会话
//! 3. **事件分发**：把会话事件交给日志和未命中记录
//! 4. **全局统计**：退出时输出轮询和命中情况
//!
//! 只有本模块持有 Browser 和 JsExecutor

use crate::browser;
use crate::config::Config;
use crate::infrastructure::JsExecutor;
use crate::models::{load_profiles, load_qa_table, ProfileSet, QaStore};
use crate::services::MissWriter;
use crate::utils::logging::{log_startup, print_final_stats};
use crate::workflow::{LogSink, ResultSink, Session, SessionEvent};
use anyhow::{Context, Result};
use chromiumoxide::Browser;
use std::path::Path;
use std::time::Duration;
use tokio::time::MissedTickBehavior;
use tracing::{info, warn};

/// 运行统计
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct WatchStats {
    pub ticks: u64,
    pub detections: usize,
    pub answered: usize,
    pub missed: usize,
    pub unavailable: usize,
}

/// 事件分发器：日志 + 未命中记录 + 统计
pub struct Dispatcher {
    log: LogSink,
    miss_writer: MissWriter,
    pub stats: WatchStats,
}

impl Dispatcher {
    pub fn new(miss_writer: MissWriter) -> Self {
        Self {
            log: LogSink,
            miss_writer,
            stats: WatchStats::default(),
        }
    }
}

impl ResultSink for Dispatcher {
    fn on_event(&mut self, event: &SessionEvent) {
        self.log.on_event(event);

        match event {
            SessionEvent::Detected(_) => self.stats.detections += 1,
            SessionEvent::Answer { .. } => self.stats.answered += 1,
            SessionEvent::NoAnswer {
                profile_id,
                question,
            } => {
                self.stats.missed += 1;
                if let Err(e) = self.miss_writer.write(profile_id, question) {
                    warn!("写入未命中记录失败: {:#}", e);
                }
            }
            SessionEvent::DataUnavailable { .. } => self.stats.unavailable += 1,
        }
    }
}

/// 应用主结构
pub struct App {
    config: Config,
    _browser: Browser,
    executor: JsExecutor,
    session: Session,
    qa: QaStore,
    selectors: Vec<String>,
    dispatcher: Dispatcher,
}

impl App {
    /// 初始化应用
    pub async fn initialize(config: Config) -> Result<Self> {
        config.validate()?;
        log_startup(&config);

        let profiles = load_profile_set(&config).await?;
        let qa = load_qa_store(&config).await;

        let miss_writer = MissWriter::with_path(&config.miss_log_file);
        miss_writer.init()?;

        // 连接浏览器
        let (browser, page) = browser::connect_to_browser_and_page(
            config.browser_debug_port,
            Some(&config.target_url),
            Some(&config.target_title),
        )
        .await
        .context("无法连接到游戏页面")?;

        // 创建 JsExecutor（持有 page）
        let executor = JsExecutor::new(page);
        let selectors = profiles.all_selectors();

        Ok(Self {
            config,
            _browser: browser,
            executor,
            session: Session::new(profiles),
            qa,
            selectors,
            dispatcher: Dispatcher::new(miss_writer),
        })
    }

    /// 运行轮询循环，直到 Ctrl-C 或达到最大轮询次数
    pub async fn run(mut self) -> Result<WatchStats> {
        let mut ticker = tokio::time::interval(Duration::from_millis(self.config.poll_interval_ms));
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        let ctrl_c = tokio::signal::ctrl_c();
        tokio::pin!(ctrl_c);

        info!("👀 开始监视页面，按 Ctrl-C 退出");

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    self.poll_once().await;
                    if self
                        .config
                        .max_ticks
                        .is_some_and(|max| self.dispatcher.stats.ticks >= max)
                    {
                        info!("已达到最大轮询次数 {}", self.dispatcher.stats.ticks);
                        break;
                    }
                }
                _ = &mut ctrl_c => {
                    info!("收到退出信号");
                    break;
                }
            }
        }

        let stats = self.dispatcher.stats.clone();
        print_final_stats(
            stats.ticks,
            stats.answered,
            stats.missed,
            &self.config.miss_log_file,
        );
        Ok(stats)
    }

    /// 采集一次快照并推进会话，快照失败时等下一次轮询重试
    async fn poll_once(&mut self) {
        self.dispatcher.stats.ticks += 1;

        let snapshot = match self.executor.snapshot(&self.selectors).await {
            Ok(snapshot) => snapshot,
            Err(e) => {
                warn!("页面快照失败，下次轮询重试: {}", e);
                return;
            }
        };

        for event in self.session.tick(&snapshot, &self.qa) {
            self.dispatcher.on_event(&event);
        }
    }
}

/// 加载档案：配置了文件就用文件，否则用内置档案
async fn load_profile_set(config: &Config) -> Result<ProfileSet> {
    match &config.profiles_path {
        Some(path) => {
            info!("\n📁 正在加载页面档案: {}", path);
            let set = load_profiles(Path::new(path)).await?;
            Ok(set)
        }
        None => {
            let set = ProfileSet::builtin();
            info!("使用内置页面档案 ({} 个)", set.len());
            Ok(set)
        }
    }
}

/// 加载题库：失败时继续运行，每道新题报告数据源不可用
async fn load_qa_store(config: &Config) -> QaStore {
    info!("\n📚 正在加载题库: {}", config.qa_table_path);
    let result = load_qa_table(Path::new(&config.qa_table_path)).await;
    if let Err(e) = &result {
        warn!("⚠️ 题库加载失败，将无法给出答案: {}", e);
    }
    QaStore::from(result)
}
