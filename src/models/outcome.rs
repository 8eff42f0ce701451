use serde::Serialize;
use std::fmt::Display;

/// 精确匹配的置信度
pub const EXACT_CONFIDENCE: u32 = 100;
/// 前缀包含匹配的置信度
pub const PARTIAL_CONFIDENCE: u32 = 75;

/// 页面检测结果，每次检测重新生成
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DetectionResult {
    pub profile_id: String,
    /// 档案显示名称
    pub name: String,
    /// 满足的条件数
    pub confidence: u32,
    /// 命中的选择器：先标志元素，再题干选择器
    pub matched_selectors: Vec<String>,
}

impl Display for DetectionResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} [置信度: {}, 命中: {}]",
            self.name,
            self.confidence,
            self.matched_selectors.join(", ")
        )
    }
}

/// 答案匹配结果
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchResult {
    pub answer: String,
    /// 100 = 精确匹配，75 = 部分匹配
    pub confidence: u32,
}

impl MatchResult {
    pub fn exact(answer: impl Into<String>) -> Self {
        Self {
            answer: answer.into(),
            confidence: EXACT_CONFIDENCE,
        }
    }

    pub fn partial(answer: impl Into<String>) -> Self {
        Self {
            answer: answer.into(),
            confidence: PARTIAL_CONFIDENCE,
        }
    }

    pub fn is_exact(&self) -> bool {
        self.confidence == EXACT_CONFIDENCE
    }
}

impl Display for MatchResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let tier = if self.is_exact() { "精确" } else { "部分" };
        write!(f, "{} [{}匹配 {}%]", self.answer, tier, self.confidence)
    }
}
