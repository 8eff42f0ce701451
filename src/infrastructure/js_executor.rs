//! JS 执行器 - 基础设施层
//!
//! 持有唯一的 page 资源，只暴露"执行 JS"和"采集页面快照"的能力

use crate::error::AppResult;
use crate::infrastructure::page::PageSnapshot;
use chromiumoxide::Page;
use serde::de::DeserializeOwned;
use serde_json::Value as JsonValue;
use tracing::debug;

/// JS 执行器
///
/// 职责：
/// - 持有唯一的 Page 资源
/// - 暴露 eval() 能力
/// - 不认识档案和题库
pub struct JsExecutor {
    page: Page,
}

impl JsExecutor {
    /// 创建新的 JS 执行器
    pub fn new(page: Page) -> Self {
        Self { page }
    }

    /// 执行 JS 代码并返回 JSON 结果
    pub async fn eval(&self, js_code: impl Into<String>) -> AppResult<JsonValue> {
        let result = self.page.evaluate(js_code.into()).await?;
        let json_value = result.into_value()?;
        Ok(json_value)
    }

    /// 执行 JS 代码并反序列化为指定类型
    pub async fn eval_as<T: DeserializeOwned>(&self, js_code: impl Into<String>) -> AppResult<T> {
        let json_value = self.eval(js_code).await?;
        let typed_value = serde_json::from_value(json_value)?;
        Ok(typed_value)
    }

    /// 一次性采集所有选择器的元素文本
    pub async fn snapshot(&self, selectors: &[String]) -> AppResult<PageSnapshot> {
        let script = PageSnapshot::capture_script(selectors)?;
        let snapshot: PageSnapshot = self.eval_as(script).await?;
        debug!(
            "页面快照: {} 个选择器中有 {} 个命中元素",
            selectors.len(),
            snapshot.len()
        );
        Ok(snapshot)
    }
}
