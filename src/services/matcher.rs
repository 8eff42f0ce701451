//! 答案匹配服务 - 业务能力层
//!
//! 把页面题干与题库中的题目做归一化比较，返回答案和置信度

use crate::error::DataError;
use crate::models::{MatchResult, QaEntry, QaSource};
use regex::Regex;
use std::sync::LazyLock;
use tracing::debug;

/// 部分匹配时比较的前缀长度（字符数）
pub const PREFIX_LEN: usize = 50;

/// 非单词字符、非空白、非西里尔字母的字符
static STRIP_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[^a-z0-9_\sа-яё]").expect("归一化正则应当合法")
});

static SPACES_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("空白正则应当合法"));

/// 归一化：小写、去标点、合并空白、去首尾空白
pub fn normalize(text: &str) -> String {
    let lower = text.to_lowercase();
    let stripped = STRIP_RE.replace_all(&lower, "");
    SPACES_RE.replace_all(&stripped, " ").trim().to_string()
}

/// 在档案题库中查找答案
///
/// - 题干为空、档案没有题库：`Ok(None)`
/// - 数据源不可用：`Err(DataError)`
pub fn find_answer(
    question: &str,
    profile_id: &str,
    source: &impl QaSource,
) -> Result<Option<MatchResult>, DataError> {
    if question.trim().is_empty() {
        return Ok(None);
    }
    let entries = source.entries(profile_id)?;
    Ok(find_in_entries(question, entries))
}

/// 按顺序比较，第一个精确或部分匹配的条目胜出
pub fn find_in_entries(question: &str, entries: &[QaEntry]) -> Option<MatchResult> {
    let input = normalize(question);
    if input.is_empty() || entries.is_empty() {
        return None;
    }
    let input_prefix = prefix(&input);

    for entry in entries {
        let stored = normalize(&entry.question);
        // 归一化后为空的条目会让空前缀匹配一切，直接跳过
        if stored.is_empty() {
            continue;
        }

        if stored == input {
            debug!("精确匹配: {}", entry.answer);
            return Some(MatchResult::exact(&entry.answer));
        }

        if stored.contains(input_prefix) || input.contains(prefix(&stored)) {
            debug!("前缀匹配: {}", entry.answer);
            return Some(MatchResult::partial(&entry.answer));
        }
    }

    None
}

/// 前 PREFIX_LEN 个字符
fn prefix(text: &str) -> &str {
    match text.char_indices().nth(PREFIX_LEN) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
