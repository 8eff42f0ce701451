//! 检测会话 - 流程层
//!
//! 持有"当前游戏"和"上一道题"，每次轮询执行 检测 → 提取 → 匹配

use crate::infrastructure::PageAccessor;
use crate::models::{DetectionResult, ProfileSet, QaSource};
use crate::services::{detect, extract_question, find_answer, qualifies};
use crate::workflow::event::SessionEvent;
use tracing::debug;

/// 上一道题及其所属档案
#[derive(Debug, Clone, PartialEq, Eq)]
struct SeenQuestion {
    profile_id: String,
    question: String,
}

/// 检测会话
///
/// 同一道题只匹配一次，轮询频率不影响结果
#[derive(Debug, Clone)]
pub struct Session {
    profiles: ProfileSet,
    current: Option<DetectionResult>,
    last_seen: Option<SeenQuestion>,
}

impl Session {
    pub fn new(profiles: ProfileSet) -> Self {
        Self {
            profiles,
            current: None,
            last_seen: None,
        }
    }

    /// 当前识别到的游戏
    pub fn current(&self) -> Option<&DetectionResult> {
        self.current.as_ref()
    }

    pub fn last_question(&self) -> Option<&str> {
        self.last_seen.as_ref().map(|seen| seen.question.as_str())
    }

    /// 强制重新检测页面，并清空上一道题
    pub fn scan(&mut self, page: &impl PageAccessor) -> Option<&DetectionResult> {
        self.current = detect(&self.profiles, page);
        self.last_seen = None;
        self.current.as_ref()
    }

    /// 清空会话状态
    pub fn reset(&mut self) {
        self.current = None;
        self.last_seen = None;
    }

    /// 执行一次轮询
    ///
    /// 页面与上次相比没有变化时不产生任何事件；页面短暂不满足档案后恢复时，
    /// 同一道题不会再次匹配
    pub fn tick(&mut self, page: &impl PageAccessor, source: &impl QaSource) -> Vec<SessionEvent> {
        let mut events = Vec::new();

        // 当前档案不再满足时丢弃，下面重新检测；上一道题保留
        if let Some(current) = &self.current {
            let still_there = self
                .profiles
                .get(&current.profile_id)
                .is_some_and(|profile| qualifies(profile, page));
            if !still_there {
                debug!("页面不再满足档案 {}，重新检测", current.profile_id);
                self.current = None;
            }
        }

        if self.current.is_none() {
            let Some(detection) = detect(&self.profiles, page) else {
                debug!("未识别到任何游戏页面");
                return events;
            };
            // 换成了另一个游戏，上一道题不再有意义
            if self
                .last_seen
                .as_ref()
                .is_some_and(|seen| seen.profile_id != detection.profile_id)
            {
                self.last_seen = None;
            }
            events.push(SessionEvent::Detected(detection.clone()));
            self.current = Some(detection);
        }

        let Some(profile_id) = self.current.as_ref().map(|d| d.profile_id.clone()) else {
            return events;
        };
        let Some(profile) = self.profiles.get(&profile_id) else {
            return events;
        };

        let Some(question) = extract_question(profile, page) else {
            return events;
        };
        let seen = SeenQuestion {
            profile_id: profile_id.clone(),
            question: question.clone(),
        };
        if self.last_seen.as_ref() == Some(&seen) {
            return events;
        }

        // 先记录题干，数据源不可用时同一道题只报告一次
        self.last_seen = Some(seen);

        match find_answer(&question, &profile_id, source) {
            Ok(Some(result)) => events.push(SessionEvent::Answer {
                profile_id,
                question,
                result,
            }),
            Ok(None) => events.push(SessionEvent::NoAnswer {
                profile_id,
                question,
            }),
            Err(error) => events.push(SessionEvent::DataUnavailable {
                profile_id,
                question,
                error,
            }),
        }

        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DataError;
    use crate::infrastructure::PageSnapshot;
    use crate::models::{QaEntry, QaTable, UnavailableQa, EXACT_CONFIDENCE};

    const QUESTION: &str = "In 1999, a man in Ohio was arrested for stealing 500 pounds of _______.";

    fn fibbage_page(question: &str) -> PageSnapshot {
        PageSnapshot::new()
            .with("#fibbage-lie-form", "Enter a lie")
            .with(".fibbage-logo", "FIBBAGE")
            .with("#question-text", question)
    }

    fn table() -> QaTable {
        QaTable::new().with_entries("fibbage", vec![QaEntry::new(QUESTION, "cheese")])
    }

    #[test]
    fn test_tick_detects_then_answers() {
        let mut session = Session::new(ProfileSet::builtin());
        let events = session.tick(&fibbage_page(QUESTION), &table());

        assert_eq!(events.len(), 2);
        match &events[0] {
            SessionEvent::Detected(d) => {
                assert_eq!(d.profile_id, "fibbage");
                assert_eq!(d.confidence, 3);
            }
            other => panic!("期望检测事件，实际: {:?}", other),
        }
        match &events[1] {
            SessionEvent::Answer { result, .. } => {
                assert_eq!(result.answer, "cheese");
                assert_eq!(result.confidence, EXACT_CONFIDENCE);
            }
            other => panic!("期望答案事件，实际: {:?}", other),
        }
        assert_eq!(session.last_question(), Some(QUESTION));
    }

    #[test]
    fn test_repeated_tick_is_silent() {
        let mut session = Session::new(ProfileSet::builtin());
        let page = fibbage_page(QUESTION);
        session.tick(&page, &table());
        assert!(session.tick(&page, &table()).is_empty());
        assert!(session.tick(&page, &table()).is_empty());
    }

    #[test]
    fn test_new_question_triggers_match() {
        let mut session = Session::new(ProfileSet::builtin());
        session.tick(&fibbage_page(QUESTION), &table());

        let events = session
            .tick(&fibbage_page("A brand new question nobody has stored yet"), &table());
        assert!(matches!(events.as_slice(), [SessionEvent::NoAnswer { .. }]));
    }

    #[test]
    fn test_unknown_page_yields_nothing() {
        let mut session = Session::new(ProfileSet::builtin());
        let page = PageSnapshot::new().with("#something-else", "hello");
        assert!(session.tick(&page, &table()).is_empty());
        assert!(session.current().is_none());
    }

    #[test]
    fn test_unavailable_data_reported_once() {
        let mut session = Session::new(ProfileSet::builtin());
        let source = UnavailableQa::new(DataError::unavailable("qa.toml", "文件不存在"));
        let page = fibbage_page(QUESTION);

        let events = session.tick(&page, &source);
        assert!(matches!(
            events.as_slice(),
            [SessionEvent::Detected(_), SessionEvent::DataUnavailable { .. }]
        ));
        assert!(session.tick(&page, &source).is_empty());
    }

    #[test]
    fn test_scan_clears_last_question() {
        let mut session = Session::new(ProfileSet::builtin());
        let page = fibbage_page(QUESTION);
        session.tick(&page, &table());

        assert!(session.scan(&page).is_some());
        assert!(session.last_question().is_none());
        let events = session.tick(&page, &table());
        assert!(matches!(events.as_slice(), [SessionEvent::Answer { .. }]));

        session.reset();
        assert!(session.current().is_none());
    }

    #[test]
    fn test_flicker_does_not_rematch_same_question() {
        let mut session = Session::new(ProfileSet::builtin());
        session.tick(&fibbage_page(QUESTION), &table());

        // 只剩一个标志元素，低于阈值
        let partial = PageSnapshot::new().with(".fibbage-logo", "FIBBAGE");
        assert!(session.tick(&partial, &table()).is_empty());
        assert!(session.current().is_none());
        assert_eq!(session.last_question(), Some(QUESTION));

        let events = session.tick(&fibbage_page(QUESTION), &table());
        assert!(matches!(events.as_slice(), [SessionEvent::Detected(_)]));
    }

    #[test]
    fn test_leaving_game_then_new_question() {
        let mut session = Session::new(ProfileSet::builtin());
        session.tick(&fibbage_page(QUESTION), &table());

        let lobby = PageSnapshot::new().with("#lobby", "Waiting for players");
        assert!(session.tick(&lobby, &table()).is_empty());
        assert!(session.current().is_none());

        let events = session.tick(&fibbage_page("A brand new question nobody has stored yet"), &table());
        assert!(matches!(
            events.as_slice(),
            [SessionEvent::Detected(_), SessionEvent::NoAnswer { .. }]
        ));
    }

    #[test]
    fn test_switching_game_clears_last_question() {
        let mut session = Session::new(ProfileSet::builtin());
        let shared = "Which of these is the same prompt text on both games?";
        let fibbage = PageSnapshot::new()
            .with("#fibbage-lie-form", "Enter a lie")
            .with(".fibbage-logo", "FIBBAGE")
            .with(".prompt", shared);
        session.tick(&fibbage, &table());

        let tmp = PageSnapshot::new()
            .with(".tmp-logo", "TRIVIA MURDER PARTY")
            .with("#choices", "A B C D")
            .with(".prompt", shared);
        let events = session.tick(&tmp, &table());
        match events.as_slice() {
            [SessionEvent::Detected(d), SessionEvent::NoAnswer { profile_id, .. }] => {
                assert_eq!(d.profile_id, "trivia_murder_party");
                assert_eq!(profile_id, "trivia_murder_party");
            }
            other => panic!("期望检测和未命中事件，实际: {:?}", other),
        }
    }
}
