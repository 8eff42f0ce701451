use crate::error::ConfigError;

/// 程序配置
#[derive(Clone, Debug)]
pub struct Config {
    /// 浏览器调试端口
    pub browser_debug_port: u16,
    /// 找不到游戏标签页时打开的地址
    pub target_url: String,
    /// 游戏标签页标题中包含的关键字
    pub target_title: String,
    /// 题库 TOML 文件
    pub qa_table_path: String,
    /// 页面档案 TOML 文件，未设置时使用内置档案
    pub profiles_path: Option<String>,
    /// 轮询间隔（毫秒）
    pub poll_interval_ms: u64,
    /// 最多轮询次数，未设置时一直运行到 Ctrl-C
    pub max_ticks: Option<u64>,
    /// 未命中题目的记录文件
    pub miss_log_file: String,
    /// 是否显示详细日志
    pub verbose_logging: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            browser_debug_port: 9222,
            target_url: "https://jackbox.tv/".to_string(),
            target_title: "Jackbox".to_string(),
            qa_table_path: "data/qa_table.toml".to_string(),
            profiles_path: None,
            poll_interval_ms: 2000,
            max_ticks: None,
            miss_log_file: "missed_questions.txt".to_string(),
            verbose_logging: false,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// 从任意键值来源读取配置，解析失败的值回退到默认值
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let default = Self::default();
        Self {
            browser_debug_port: lookup("BROWSER_DEBUG_PORT").and_then(|v| v.parse().ok()).unwrap_or(default.browser_debug_port),
            target_url: lookup("TARGET_URL").unwrap_or(default.target_url),
            target_title: lookup("TARGET_TITLE").unwrap_or(default.target_title),
            qa_table_path: lookup("QA_TABLE_PATH").unwrap_or(default.qa_table_path),
            profiles_path: lookup("PROFILES_PATH").filter(|v| !v.trim().is_empty()).or(default.profiles_path),
            poll_interval_ms: lookup("POLL_INTERVAL_MS").and_then(|v| v.parse().ok()).unwrap_or(default.poll_interval_ms),
            max_ticks: lookup("MAX_TICKS").and_then(|v| v.parse().ok()).or(default.max_ticks),
            miss_log_file: lookup("MISS_LOG_FILE").unwrap_or(default.miss_log_file),
            verbose_logging: lookup("VERBOSE_LOGGING").and_then(|v| v.parse().ok()).unwrap_or(default.verbose_logging),
        }
    }

    /// 检查配置是否可用
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.poll_interval_ms == 0 {
            return Err(ConfigError::InvalidValue {
                name: "POLL_INTERVAL_MS".to_string(),
                value: self.poll_interval_ms.to_string(),
                reason: "轮询间隔必须大于 0".to_string(),
            });
        }
        Ok(())
    }
}
