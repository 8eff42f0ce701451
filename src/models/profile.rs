use serde::{Deserialize, Serialize};

/// 页面档案：描述如何识别某个游戏页面以及从哪里读取题干
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub id: String,
    /// 显示名称
    pub name: String,
    /// 必须出现的标志元素选择器
    #[serde(default)]
    pub indicators: Vec<String>,
    /// 题干元素选择器，按优先级排列
    #[serde(default)]
    pub question_selectors: Vec<String>,
    /// 判定为该游戏所需的最低分数
    pub min_confidence: u32,
    /// 显示颜色，仅供界面层使用
    #[serde(default)]
    pub color: String,
}

impl Profile {
    /// 该档案涉及的全部选择器（标志元素在前）
    pub fn selectors(&self) -> impl Iterator<Item = &str> {
        self.indicators
            .iter()
            .chain(self.question_selectors.iter())
            .map(String::as_str)
    }
}

/// 有序的档案集合
///
/// 检测按声明顺序进行，先达到阈值的档案胜出，所以这里用 Vec 而不是 map
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileSet {
    #[serde(rename = "profile", default)]
    pub profiles: Vec<Profile>,
}

impl ProfileSet {
    pub fn new(profiles: Vec<Profile>) -> Self {
        Self { profiles }
    }

    /// 内置的三种游戏页面
    pub fn builtin() -> Self {
        Self::new(vec![
            Profile {
                id: "fibbage".to_string(),
                name: "Fibbage".to_string(),
                indicators: strings(&["#fibbage-lie-form", ".fibbage-logo", "#state-lie"]),
                question_selectors: strings(&["#question-text", ".question-text", ".prompt"]),
                min_confidence: 2,
                color: "#f5a623".to_string(),
            },
            Profile {
                id: "guesspionage".to_string(),
                name: "Guesspionage".to_string(),
                indicators: strings(&["#guesspionage-slider", ".percentage-display", "#state-guess"]),
                question_selectors: strings(&["#question-prompt", ".question-prompt", ".prompt"]),
                min_confidence: 2,
                color: "#4a90e2".to_string(),
            },
            Profile {
                id: "trivia_murder_party".to_string(),
                name: "Trivia Murder Party".to_string(),
                indicators: strings(&[".tmp-logo", "#choices", "#state-trivia"]),
                question_selectors: strings(&["#trivia-question", ".trivia-question", ".prompt"]),
                min_confidence: 2,
                color: "#d0021b".to_string(),
            },
        ])
    }

    pub fn get(&self, id: &str) -> Option<&Profile> {
        self.profiles.iter().find(|p| p.id == id)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Profile> {
        self.profiles.iter()
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }

    /// 所有档案用到的选择器，去重后保持首次出现的顺序
    pub fn all_selectors(&self) -> Vec<String> {
        let mut out: Vec<String> = Vec::new();
        for selector in self.profiles.iter().flat_map(|p| p.selectors()) {
            if !out.iter().any(|s| s == selector) {
                out.push(selector.to_string());
            }
        }
        out
    }
}

impl<'a> IntoIterator for &'a ProfileSet {
    type Item = &'a Profile;
    type IntoIter = std::slice::Iter<'a, Profile>;

    fn into_iter(self) -> Self::IntoIter {
        self.profiles.iter()
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}
