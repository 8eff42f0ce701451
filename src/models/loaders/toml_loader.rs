use crate::error::DataError;
use crate::models::profile::ProfileSet;
use crate::models::qa::QaTable;
use serde::de::DeserializeOwned;
use std::path::Path;
use tokio::fs;

/// 读取并解析 TOML 文件，任何失败都视为数据源不可用
async fn load_toml<T: DeserializeOwned>(path: &Path) -> Result<T, DataError> {
    let display = path.display().to_string();

    if !path.exists() {
        return Err(DataError::unavailable(display, "文件不存在"));
    }

    let content = fs::read_to_string(path)
        .await
        .map_err(|e| DataError::unavailable(&display, format!("无法读取TOML文件: {}", e)))?;

    toml::from_str(&content)
        .map_err(|e| DataError::unavailable(&display, format!("无法解析TOML文件: {}", e)))
}

/// 从 TOML 文件加载题库
///
/// 文件格式：每个档案一个 `[[档案ID]]` 数组，元素为 `{ question, answer }`
pub async fn load_qa_table(path: &Path) -> Result<QaTable, DataError> {
    let table: QaTable = load_toml(path).await?;

    tracing::info!(
        "成功加载题库 {}：{} 个档案，{} 条问答",
        path.display(),
        table.profile_ids().count(),
        table.total_entries()
    );

    Ok(table)
}

/// 从 TOML 文件加载页面档案（`[[profile]]` 数组，顺序即检测顺序）
pub async fn load_profiles(path: &Path) -> Result<ProfileSet, DataError> {
    let set: ProfileSet = load_toml(path).await?;

    if set.is_empty() {
        tracing::warn!("档案文件 {} 中没有任何档案", path.display());
    } else {
        tracing::info!("成功加载 {} 个页面档案", set.len());
    }

    Ok(set)
}
