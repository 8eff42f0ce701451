//! 页面访问能力
//!
//! 检测和匹配只通过 `PageAccessor` 读取页面，不直接接触浏览器

use serde::Deserialize;
use std::collections::HashMap;

/// 页面访问接口
pub trait PageAccessor {
    /// 第一个匹配 `selector` 的元素的可见文本（已去除首尾空白）
    ///
    /// 选择器非法或没有匹配元素时返回 None
    fn first_text(&self, selector: &str) -> Option<String>;
}

/// 页面快照：选择器 → 第一个匹配元素的文本
///
/// 一次 JS 调用采集全部选择器，之后的检测与提取都在快照上同步完成
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct PageSnapshot {
    elements: HashMap<String, Option<String>>,
}

impl PageSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// 为选择器添加一个元素文本（用于构造内存页面），同一选择器只有第一个元素生效
    pub fn with(mut self, selector: impl Into<String>, text: impl Into<String>) -> Self {
        let slot = self.elements.entry(selector.into()).or_insert(None);
        if slot.is_none() {
            *slot = Some(text.into());
        }
        self
    }

    /// 快照中有元素的选择器数量
    pub fn len(&self) -> usize {
        self.elements.values().filter(|v| v.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// 生成采集脚本：对每个选择器执行 querySelector 读取可见文本，非法选择器返回 null
    pub fn capture_script(selectors: &[String]) -> Result<String, serde_json::Error> {
        Ok(format!(
            r#"
            (() => {{
                const selectors = {};
                const out = {{}};
                for (const sel of selectors) {{
                    try {{
                        const el = document.querySelector(sel);
                        out[sel] = el ? (el.innerText || "").trim() : null;
                    }} catch (error) {{
                        out[sel] = null;
                    }}
                }}
                return out;
            }})()
            "#,
            serde_json::to_string(selectors)?
        ))
    }
}

impl PageAccessor for PageSnapshot {
    fn first_text(&self, selector: &str) -> Option<String> {
        self.elements
            .get(selector)
            .and_then(|text| text.as_deref())
            .map(|t| t.trim().to_string())
    }
}
