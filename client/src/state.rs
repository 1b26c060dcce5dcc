use common::board::Topology;
use common::protocol::{GameVariant, Seat};
use eframe::egui;
use std::sync::{Arc, Mutex};

use crate::notices::{ChatEntry, ChatLog, Notice, NoticeBoard, NoticeLevel};
use crate::reconcile::ViewEntity;

/// Something the user asked the server to do.
#[derive(Debug, Clone, PartialEq)]
pub enum Intent {
    RollDice,
    MakeMove { index: u32 },
    SendChat { message: String, is_sticker: bool },
    ResetGame,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ClientCommand {
    Intent(Intent),
    Disconnect,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ConnectionStatus {
    Disconnected,
    Connecting,
    Connected,
    Reconnecting { delay_ms: u64 },
    Expired,
    Closed,
}

impl ConnectionStatus {
    pub fn label(&self) -> String {
        match self {
            ConnectionStatus::Disconnected => "Disconnected".to_string(),
            ConnectionStatus::Connecting => "Connecting...".to_string(),
            ConnectionStatus::Connected => "Connected".to_string(),
            ConnectionStatus::Reconnecting { delay_ms } => {
                format!("Reconnecting in {}s", delay_ms.div_ceil(1000))
            }
            ConnectionStatus::Expired => "Room expired".to_string(),
            ConnectionStatus::Closed => "Closed".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlayerRow {
    pub seat: Seat,
    pub name: String,
    pub score: u32,
    pub is_acting: bool,
    pub is_local: bool,
}

/// Everything the window needs for one frame, rebuilt after each snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct BoardView {
    pub room: String,
    pub variant: GameVariant,
    pub topology: Topology,
    pub local_seat: Option<Seat>,
    pub entities: Vec<ViewEntity>,
    pub open_cells: Vec<u32>,
    pub players: Vec<PlayerRow>,
    pub status_text: String,
    pub can_roll: bool,
    pub dice_face: Option<u8>,
    pub dice_rolling: bool,
    pub is_finished: bool,
    pub inline_error: Option<String>,
    pub track_length: u32,
    pub has_snapshot: bool,
}

impl BoardView {
    pub fn new(room: String, variant: GameVariant) -> Self {
        Self {
            room,
            variant,
            topology: Topology::Cross4,
            local_seat: None,
            entities: Vec::new(),
            open_cells: Vec::new(),
            players: Vec::new(),
            status_text: "Waiting for game to start...".to_string(),
            can_roll: false,
            dice_face: None,
            dice_rolling: false,
            is_finished: false,
            inline_error: None,
            track_length: common::board::track::DEFAULT_TRACK_LENGTH,
            has_snapshot: false,
        }
    }
}

pub struct SharedState {
    board: Arc<Mutex<BoardView>>,
    status: Arc<Mutex<ConnectionStatus>>,
    notices: Arc<Mutex<NoticeBoard>>,
    chat: Arc<Mutex<ChatLog>>,
    context: Arc<Mutex<Option<egui::Context>>>,
    should_close: Arc<Mutex<bool>>,
}

impl SharedState {
    pub fn new(board: BoardView) -> Self {
        Self {
            board: Arc::new(Mutex::new(board)),
            status: Arc::new(Mutex::new(ConnectionStatus::Disconnected)),
            notices: Arc::new(Mutex::new(NoticeBoard::default())),
            chat: Arc::new(Mutex::new(ChatLog::new())),
            context: Arc::new(Mutex::new(None)),
            should_close: Arc::new(Mutex::new(false)),
        }
    }

    pub fn set_board(&self, board: BoardView) {
        *self.board.lock().unwrap() = board;
        self.request_repaint();
    }

    pub fn get_board(&self) -> BoardView {
        self.board.lock().unwrap().clone()
    }

    pub fn update_board<F>(&self, update: F)
    where
        F: FnOnce(&mut BoardView),
    {
        update(&mut self.board.lock().unwrap());
        self.request_repaint();
    }

    pub fn set_status(&self, status: ConnectionStatus) {
        *self.status.lock().unwrap() = status;
        self.request_repaint();
    }

    pub fn get_status(&self) -> ConnectionStatus {
        self.status.lock().unwrap().clone()
    }

    pub fn push_notice(&self, level: NoticeLevel, text: String) -> u64 {
        let id = self.notices.lock().unwrap().push(level, text);
        self.request_repaint();
        id
    }

    pub fn dismiss_notice(&self, id: u64) {
        if self.notices.lock().unwrap().dismiss(id) {
            self.request_repaint();
        }
    }

    pub fn clear_notices(&self) {
        self.notices.lock().unwrap().clear();
        self.request_repaint();
    }

    pub fn get_notices(&self) -> Vec<Notice> {
        self.notices.lock().unwrap().notices().to_vec()
    }

    pub fn push_chat(&self, entry: ChatEntry) {
        self.chat.lock().unwrap().push(entry);
        self.request_repaint();
    }

    pub fn clear_chat_bubble(&self, sender: &str) {
        self.chat.lock().unwrap().clear_bubble(sender);
        self.request_repaint();
    }

    pub fn get_chat_history(&self) -> Vec<ChatEntry> {
        self.chat.lock().unwrap().history()
    }

    pub fn get_chat_bubbles(&self) -> Vec<ChatEntry> {
        self.chat.lock().unwrap().bubbles().cloned().collect()
    }

    pub fn set_context(&self, ctx: egui::Context) {
        *self.context.lock().unwrap() = Some(ctx);
    }

    pub fn has_context(&self) -> bool {
        self.context.lock().unwrap().is_some()
    }

    pub fn request_repaint(&self) {
        if let Some(ctx) = self.context.lock().unwrap().as_ref() {
            ctx.request_repaint();
        }
    }

    pub fn set_should_close(&self) {
        *self.should_close.lock().unwrap() = true;
        self.request_repaint();
    }

    pub fn should_close(&self) -> bool {
        *self.should_close.lock().unwrap()
    }
}

impl Clone for SharedState {
    fn clone(&self) -> Self {
        Self {
            board: Arc::clone(&self.board),
            status: Arc::clone(&self.status),
            notices: Arc::clone(&self.notices),
            chat: Arc::clone(&self.chat),
            context: Arc::clone(&self.context),
            should_close: Arc::clone(&self.should_close),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_labels() {
        assert_eq!(ConnectionStatus::Reconnecting { delay_ms: 4500 }.label(), "Reconnecting in 5s");
        assert_eq!(ConnectionStatus::Expired.label(), "Room expired");
    }

    #[test]
    fn test_clones_share_state() {
        let state = SharedState::new(BoardView::new("ROOM1".to_string(), GameVariant::Ludo));
        let other = state.clone();
        other.update_board(|board| board.status_text = "Turn: RED".to_string());
        assert_eq!(state.get_board().status_text, "Turn: RED");

        let id = other.push_notice(NoticeLevel::Info, "hello".to_string());
        assert_eq!(state.get_notices().len(), 1);
        state.dismiss_notice(id);
        assert!(other.get_notices().is_empty());
    }
}
