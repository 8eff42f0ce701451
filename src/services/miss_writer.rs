//! 未命中记录服务 - 业务能力层
//!
//! 只负责把题库中找不到答案的题干写入文件，方便之后补充题库

use anyhow::{Context, Result};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;
use tracing::debug;

/// 未命中记录服务
pub struct MissWriter {
    miss_file_path: String,
}

impl MissWriter {
    /// 使用自定义文件路径创建
    pub fn with_path(path: impl Into<String>) -> Self {
        Self {
            miss_file_path: path.into(),
        }
    }

    /// 文件不存在时写入带时间戳的文件头
    pub fn init(&self) -> Result<()> {
        if Path::new(&self.miss_file_path).exists() {
            return Ok(());
        }
        let header = format!(
            "{}\n未命中题目记录 - {}\n{}\n\n",
            "=".repeat(60),
            chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
            "=".repeat(60)
        );
        std::fs::write(&self.miss_file_path, header)
            .with_context(|| format!("无法创建记录文件: {}", self.miss_file_path))?;
        Ok(())
    }

    /// 追加一条未命中记录
    pub fn write(&self, profile_id: &str, question: &str) -> Result<()> {
        debug!(
            "写入未命中: 档案 {} | 题干长度: {}",
            profile_id,
            question.chars().count()
        );

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.miss_file_path)
            .with_context(|| format!("无法打开记录文件: {}", self.miss_file_path))?;

        // 题干中的换行会破坏一行一条的格式
        let line = format!("{} | {}\n", profile_id, question.replace('\n', " "));
        file.write_all(line.as_bytes())?;

        Ok(())
    }
}
