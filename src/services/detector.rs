//! 页面检测服务 - 业务能力层
//!
//! 根据档案列表判断当前页面是哪个游戏，并读取题干

use crate::infrastructure::PageAccessor;
use crate::models::{DetectionResult, Profile, ProfileSet};
use tracing::debug;

/// 题干选择器加分所需的最小长度（字符数，严格大于）
pub const DETECT_QUESTION_MIN_LEN: usize = 20;
/// 提取题干所需的最小长度（字符数，严格大于）
pub const EXTRACT_QUESTION_MIN_LEN: usize = 15;

/// 按声明顺序检测，返回第一个达到阈值的档案
pub fn detect(profiles: &ProfileSet, page: &impl PageAccessor) -> Option<DetectionResult> {
    for profile in profiles {
        let result = score_profile(profile, page);
        debug!(
            "档案 {} 得分 {}/{}",
            profile.id, result.confidence, profile.min_confidence
        );

        if reaches_threshold(profile, &result) {
            return Some(result);
        }
    }
    None
}

/// 页面是否仍满足该档案
pub fn qualifies(profile: &Profile, page: &impl PageAccessor) -> bool {
    reaches_threshold(profile, &score_profile(profile, page))
}

// 得分为 0 的档案不算命中，即使阈值配置为 0
fn reaches_threshold(profile: &Profile, result: &DetectionResult) -> bool {
    result.confidence > 0 && result.confidence >= profile.min_confidence
}

/// 计算单个档案在当前页面上的得分
pub fn score_profile(profile: &Profile, page: &impl PageAccessor) -> DetectionResult {
    let mut matched_selectors = Vec::new();

    for selector in &profile.indicators {
        if page.first_text(selector).is_some_and(|t| !t.trim().is_empty()) {
            matched_selectors.push(selector.clone());
        }
    }
    let mut confidence = matched_selectors.len() as u32;

    let question_hit = profile.question_selectors.iter().find(|selector| {
        page.first_text(selector)
            .is_some_and(|t| t.trim().chars().count() > DETECT_QUESTION_MIN_LEN)
    });
    if let Some(selector) = question_hit {
        matched_selectors.push(selector.clone());
        confidence += 1;
    }

    DetectionResult {
        profile_id: profile.id.clone(),
        name: profile.name.clone(),
        confidence,
        matched_selectors,
    }
}

/// 读取题干：按选择器顺序，返回第一个长度超过阈值的元素文本
///
/// 每个选择器只看第一个匹配元素
pub fn extract_question(profile: &Profile, page: &impl PageAccessor) -> Option<String> {
    profile.question_selectors.iter().find_map(|selector| {
        page.first_text(selector)
            .map(|t| t.trim().to_string())
            .filter(|t| t.chars().count() > EXTRACT_QUESTION_MIN_LEN)
    })
}

/// 按档案 ID 读取题干，未知 ID 返回 None
pub fn extract_question_by_id(
    profiles: &ProfileSet,
    profile_id: &str,
    page: &impl PageAccessor,
) -> Option<String> {
    profiles
        .get(profile_id)
        .and_then(|profile| extract_question(profile, page))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::PageSnapshot;

    const LONG_QUESTION: &str = "A kickstarter campaign met its goal for shoes designed for _______.";

    fn profile(id: &str, indicators: &[&str], questions: &[&str], min: u32) -> Profile {
        Profile {
            id: id.to_string(),
            name: id.to_uppercase(),
            indicators: indicators.iter().map(|s| s.to_string()).collect(),
            question_selectors: questions.iter().map(|s| s.to_string()).collect(),
            min_confidence: min,
            color: String::new(),
        }
    }

    #[test]
    fn test_empty_page_matches_nothing() {
        assert!(detect(&ProfileSet::builtin(), &PageSnapshot::new()).is_none());
    }

    #[test]
    fn test_indicators_plus_question_bonus() {
        let set = ProfileSet::new(vec![profile("a", &["#logo", "#board"], &["#q1", "#q2"], 3)]);
        let page = PageSnapshot::new()
            .with("#logo", "Logo")
            .with("#board", "Board")
            .with("#q2", LONG_QUESTION);

        let result = detect(&set, &page).expect("应该检测到档案");
        assert_eq!(result.profile_id, "a");
        assert_eq!(result.confidence, 3);
        assert_eq!(result.matched_selectors, ["#logo", "#board", "#q2"]);
    }

    #[test]
    fn test_blank_indicator_not_counted() {
        let set = ProfileSet::new(vec![profile("a", &["#logo", "#board"], &[], 2)]);
        let page = PageSnapshot::new().with("#logo", "Logo").with("#board", "   ");
        assert!(detect(&set, &page).is_none());
        assert_eq!(score_profile(&set.profiles[0], &page).confidence, 1);
    }

    #[test]
    fn test_question_bonus_awarded_once() {
        let p = profile("a", &[], &["#q1", "#q2"], 1);
        let page = PageSnapshot::new()
            .with("#q1", LONG_QUESTION)
            .with("#q2", LONG_QUESTION);
        let result = score_profile(&p, &page);
        assert_eq!(result.confidence, 1);
        assert_eq!(result.matched_selectors, ["#q1"]);
    }

    #[test]
    fn test_short_question_gives_no_bonus() {
        let p = profile("a", &[], &["#q"], 1);
        // 恰好 20 个字符，不满足"超过"
        let page = PageSnapshot::new().with("#q", "12345678901234567890");
        assert_eq!(score_profile(&p, &page).confidence, 0);
    }

    #[test]
    fn test_first_qualifying_profile_wins() {
        let set = ProfileSet::new(vec![
            profile("first", &["#shared"], &[], 1),
            profile("second", &["#shared", "#extra"], &[], 1),
        ]);
        let page = PageSnapshot::new().with("#shared", "x").with("#extra", "y");
        assert_eq!(detect(&set, &page).unwrap().profile_id, "first");
    }

    #[test]
    fn test_empty_profile_never_matches() {
        let set = ProfileSet::new(vec![profile("empty", &[], &[], 0)]);
        let page = PageSnapshot::new().with("#anything", "text");
        assert!(detect(&set, &page).is_none());
    }

    #[test]
    fn test_extract_question_skips_short_text() {
        let p = profile("a", &[], &["#short", "#long"], 1);
        let page = PageSnapshot::new()
            .with("#short", "too short")
            .with("#long", "  exactly sixteen!  ");
        assert_eq!(extract_question(&p, &page).as_deref(), Some("exactly sixteen!"));
    }

    #[test]
    fn test_extract_question_never_returns_short_text() {
        let p = profile("a", &[], &["#q"], 1);
        let page = PageSnapshot::new().with("#q", "fifteen chars!!");
        assert!(extract_question(&p, &page).is_none());
    }

    #[test]
    fn test_extract_question_unknown_profile() {
        let page = PageSnapshot::new().with(".prompt", LONG_QUESTION);
        assert!(extract_question_by_id(&ProfileSet::builtin(), "quiplash", &page).is_none());
        assert_eq!(
            extract_question_by_id(&ProfileSet::builtin(), "fibbage", &page).as_deref(),
            Some(LONG_QUESTION)
        );
    }

    #[test]
    fn test_extract_question_reads_first_element_only() {
        let p = profile("a", &[], &[".prompt"], 1);
        let page = PageSnapshot::new()
            .with(".prompt", "Round 2")
            .with(".prompt", "Some unrelated footer banner text here");
        assert!(extract_question(&p, &page).is_none());
    }

    #[test]
    fn test_detection_reads_first_element_only() {
        let p = profile("a", &["#logo"], &["#q"], 2);
        let page = PageSnapshot::new()
            .with("#logo", "")
            .with("#logo", "Logo")
            .with("#q", "short")
            .with("#q", LONG_QUESTION);
        let result = score_profile(&p, &page);
        assert_eq!(result.confidence, 0);
        assert!(result.matched_selectors.is_empty());
    }

    #[test]
    fn test_cyrillic_length_counts_chars() {
        let p = profile("a", &[], &["#q"], 1);
        // 16 个西里尔字母，字节数远大于 16
        let page = PageSnapshot::new().with("#q", "абвгдеёжзийклмно");
        assert_eq!(extract_question(&p, &page).map(|q| q.chars().count()), Some(16));
    }
}
