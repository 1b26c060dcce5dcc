use chrono::{DateTime, Local};
use ringbuffer::{AllocRingBuffer, RingBuffer};
use std::collections::BTreeMap;

use crate::constants::CHAT_BUFFER_SIZE;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub id: u64,
    pub level: NoticeLevel,
    pub text: String,
}

/// Transient messages shown over the board until their timer dismisses them.
#[derive(Debug, Default)]
pub struct NoticeBoard {
    next_id: u64,
    notices: Vec<Notice>,
}

impl NoticeBoard {
    pub fn push(&mut self, level: NoticeLevel, text: String) -> u64 {
        self.next_id += 1;
        self.notices.push(Notice {
            id: self.next_id,
            level,
            text,
        });
        self.next_id
    }

    pub fn dismiss(&mut self, id: u64) -> bool {
        let before = self.notices.len();
        self.notices.retain(|notice| notice.id != id);
        self.notices.len() != before
    }

    pub fn clear(&mut self) {
        self.notices.clear();
    }

    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChatEntry {
    pub sender: String,
    pub message: String,
    pub is_sticker: bool,
    pub received_at: DateTime<Local>,
}

impl ChatEntry {
    pub fn new(sender: String, message: String, is_sticker: bool) -> Self {
        Self {
            sender,
            message,
            is_sticker,
            received_at: Local::now(),
        }
    }

    pub fn time_label(&self) -> String {
        self.received_at.format("%H:%M").to_string()
    }
}

/// Bounded chat history plus the latest bubble per sender.
pub struct ChatLog {
    history: AllocRingBuffer<ChatEntry>,
    bubbles: BTreeMap<String, ChatEntry>,
}

impl ChatLog {
    pub fn new() -> Self {
        Self {
            history: AllocRingBuffer::new(CHAT_BUFFER_SIZE),
            bubbles: BTreeMap::new(),
        }
    }

    pub fn push(&mut self, entry: ChatEntry) {
        self.bubbles.insert(entry.sender.clone(), entry.clone());
        self.history.enqueue(entry);
    }

    pub fn clear_bubble(&mut self, sender: &str) {
        self.bubbles.remove(sender);
    }

    pub fn history(&self) -> Vec<ChatEntry> {
        self.history.iter().cloned().collect()
    }

    #[cfg(test)]
    pub fn bubble_for(&self, sender: &str) -> Option<&ChatEntry> {
        self.bubbles.get(sender)
    }

    pub fn bubbles(&self) -> impl Iterator<Item = &ChatEntry> {
        self.bubbles.values()
    }
}

impl Default for ChatLog {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notice_dismissal() {
        let mut board = NoticeBoard::default();
        let first = board.push(NoticeLevel::Info, "one".to_string());
        let second = board.push(NoticeLevel::Warning, "two".to_string());
        assert!(board.dismiss(first));
        assert!(!board.dismiss(first));
        assert_eq!(board.notices().len(), 1);
        assert_eq!(board.notices()[0].id, second);
    }

    #[test]
    fn test_chat_history_is_bounded() {
        let mut chat = ChatLog::new();
        for i in 0..CHAT_BUFFER_SIZE + 5 {
            chat.push(ChatEntry::new("Ann".to_string(), format!("msg {}", i), false));
        }
        let history = chat.history();
        assert_eq!(history.len(), CHAT_BUFFER_SIZE);
        assert_eq!(history[0].message, "msg 5");
        assert_eq!(chat.bubble_for("Ann").unwrap().message, format!("msg {}", CHAT_BUFFER_SIZE + 4));
    }

    #[test]
    fn test_bubble_is_per_sender() {
        let mut chat = ChatLog::new();
        chat.push(ChatEntry::new("Ann".to_string(), "hi".to_string(), false));
        chat.push(ChatEntry::new("Bo".to_string(), "🎲".to_string(), true));
        chat.clear_bubble("Ann");
        assert!(chat.bubble_for("Ann").is_none());
        assert!(chat.bubble_for("Bo").unwrap().is_sticker);
        assert_eq!(chat.bubbles().count(), 1);
    }
}
