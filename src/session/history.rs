//! Bounded prompt/response history.

use chrono::NaiveDateTime;
use serde::Serialize;

/// One completed exchange. Never modified after it is recorded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HistoryEvent {
    /// The prompt as the user typed it.
    pub prompt: String,
    /// The full response text.
    pub response: String,
    /// Tokens billed for the prompt.
    pub prompt_token_count: u64,
    /// Tokens billed for the response.
    pub candidates_token_count: u64,
    /// Local time the exchange was recorded.
    pub timestamp: NaiveDateTime,
}

/// Exchanges in the order they happened, oldest first.
#[derive(Debug, Clone, Default)]
pub struct History {
    entries: Vec<HistoryEvent>,
}

impl History {
    /// An empty history.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an exchange.
    pub fn add(&mut self, event: HistoryEvent) {
        self.entries.push(event);
    }

    /// The newest exchange.
    #[must_use]
    pub fn last(&self) -> Option<&HistoryEvent> {
        self.entries.last()
    }

    /// The exchange at `index`, oldest first.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&HistoryEvent> {
        self.entries.get(index)
    }

    /// Drops the oldest exchanges so at most `max` remain.
    pub fn truncate(&mut self, max: usize) {
        if self.entries.len() > max {
            let excess = self.entries.len() - max;
            self.entries.drain(..excess);
        }
    }

    /// Number of exchanges kept.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// `true` before the first exchange.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All exchanges, oldest first.
    #[must_use]
    pub fn entries(&self) -> &[HistoryEvent] {
        &self.entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn event(prompt: &str) -> HistoryEvent {
        HistoryEvent {
            prompt: prompt.into(),
            response: format!("re: {prompt}"),
            prompt_token_count: 1,
            candidates_token_count: 2,
            timestamp: NaiveDate::from_ymd_opt(2025, 3, 15)
                .unwrap()
                .and_hms_opt(14, 30, 0)
                .unwrap(),
        }
    }

    #[test]
    fn last_is_newest() {
        let mut history = History::new();
        assert!(history.last().is_none());
        history.add(event("a"));
        history.add(event("b"));
        assert_eq!(history.last().unwrap().prompt, "b");
        assert_eq!(history.get(0).unwrap().prompt, "a");
    }

    #[test]
    fn truncate_keeps_newest() {
        let mut history = History::new();
        for p in ["a", "b", "c", "d"] {
            history.add(event(p));
        }
        history.truncate(2);
        let prompts: Vec<&str> = history.entries().iter().map(|e| e.prompt.as_str()).collect();
        assert_eq!(prompts, vec!["c", "d"]);

        history.truncate(5);
        assert_eq!(history.len(), 2);
        history.truncate(0);
        assert!(history.is_empty());
    }
}
