use crate::error::DataError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// 题库中的一条问答
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QaEntry {
    pub question: String,
    pub answer: String,
}

impl QaEntry {
    pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
        }
    }
}

/// 题库：档案 ID → 有序问答列表
///
/// 列表顺序决定匹配优先级，加载后不再修改
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QaTable {
    tables: BTreeMap<String, Vec<QaEntry>>,
}

impl QaTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entries(mut self, profile_id: impl Into<String>, entries: Vec<QaEntry>) -> Self {
        self.tables.insert(profile_id.into(), entries);
        self
    }

    /// 某个档案的问答列表，未知档案返回空切片
    pub fn get(&self, profile_id: &str) -> &[QaEntry] {
        self.tables
            .get(profile_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn profile_ids(&self) -> impl Iterator<Item = &str> {
        self.tables.keys().map(String::as_str)
    }

    /// 全部问答条数
    pub fn total_entries(&self) -> usize {
        self.tables.values().map(Vec::len).sum()
    }
}

/// 问答数据源
///
/// 区分两种情况：数据源可用但没有该档案的数据（返回空切片），
/// 以及数据源本身不可用（返回 `DataError`）
pub trait QaSource {
    fn entries(&self, profile_id: &str) -> Result<&[QaEntry], DataError>;
}

impl QaSource for QaTable {
    fn entries(&self, profile_id: &str) -> Result<&[QaEntry], DataError> {
        Ok(self.get(profile_id))
    }
}

/// 加载失败的题库，每次查询都报告数据源不可用
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnavailableQa {
    error: DataError,
}

impl UnavailableQa {
    pub fn new(error: DataError) -> Self {
        Self { error }
    }
}

impl QaSource for UnavailableQa {
    fn entries(&self, _profile_id: &str) -> Result<&[QaEntry], DataError> {
        Err(self.error.clone())
    }
}

/// 运行时持有的题库：加载成功或失败
#[derive(Debug, Clone)]
pub enum QaStore {
    Loaded(QaTable),
    Unavailable(UnavailableQa),
}

impl From<Result<QaTable, DataError>> for QaStore {
    fn from(result: Result<QaTable, DataError>) -> Self {
        match result {
            Ok(table) => QaStore::Loaded(table),
            Err(e) => QaStore::Unavailable(UnavailableQa::new(e)),
        }
    }
}

impl QaSource for QaStore {
    fn entries(&self, profile_id: &str) -> Result<&[QaEntry], DataError> {
        match self {
            QaStore::Loaded(table) => table.entries(profile_id),
            QaStore::Unavailable(missing) => missing.entries(profile_id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_profile_is_empty_not_error() {
        let table = QaTable::new().with_entries("fibbage", vec![QaEntry::new("q", "a")]);
        assert_eq!(table.entries("fibbage").unwrap().len(), 1);
        assert!(table.entries("quiplash").unwrap().is_empty());
        assert_eq!(table.total_entries(), 1);
    }

    #[test]
    fn test_unavailable_store_reports_error() {
        let store = QaStore::from(Err(DataError::unavailable("x.toml", "missing")));
        assert!(matches!(
            store.entries("fibbage"),
            Err(DataError::Unavailable { .. })
        ));
    }
}
