use common::movability::MAX_ROLL;
use common::protocol::{ClientMessage, GameVariant, Phase, Seat, Snapshot};
use common::{log, log_warn};
use url::Url;

use crate::config::UiConfig;
use crate::connection::{CloseOutcome, CloseReason, ConnectionManager, ConnectionState, TransportHandle};
use crate::dispatcher::{Dispatch, SnapshotDispatcher};
use crate::errors::IntentError;
use crate::notices::{ChatEntry, NoticeLevel};
use crate::reconcile::{ReconcileContext, ReconciliationEngine};
use crate::scheduler::{Scheduler, TimerOwner};
use crate::session::Session;
use crate::state::{BoardView, ConnectionStatus, Intent, PlayerRow, SharedState};
use crate::tracker::TurnTracker;

/// The client core: one value owning every piece of per-room state. All
/// transport events and user intents for the room pass through it on the
/// network task.
pub struct GameClient {
    session: Session,
    connection: ConnectionManager,
    dispatcher: SnapshotDispatcher,
    tracker: TurnTracker,
    engine: ReconciliationEngine,
    scheduler: Scheduler,
    shared_state: SharedState,
    ui: UiConfig,
    inline_error: Option<String>,
}

impl GameClient {
    pub fn new(session: Session, connection: ConnectionManager, shared_state: SharedState, ui: UiConfig) -> Self {
        let variant = session.variant();
        Self {
            session,
            connection,
            dispatcher: SnapshotDispatcher::new(variant),
            tracker: TurnTracker::new(variant),
            engine: ReconciliationEngine::new(),
            scheduler: Scheduler::new(),
            shared_state,
            ui,
            inline_error: None,
        }
    }

    #[cfg(test)]
    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn connection_state(&self) -> ConnectionState {
        self.connection.state()
    }

    #[cfg(test)]
    pub fn engine(&self) -> &ReconciliationEngine {
        &self.engine
    }

    pub fn begin_connect(&mut self) -> Option<Url> {
        let url = self.connection.begin_connect()?;
        self.shared_state.set_status(ConnectionStatus::Connecting);
        Some(url)
    }

    pub fn on_open(&mut self, transport: TransportHandle) {
        self.discard_timers();
        match self.connection.on_open(transport) {
            Ok(()) => {
                self.shared_state.set_status(ConnectionStatus::Connected);
                if self.session.last_snapshot().is_some() {
                    self.notify(NoticeLevel::Info, "Reconnected, waiting for the latest board".to_string());
                }
            }
            Err(e) => log_warn!("Failed to send join request: {}", e),
        }
    }

    pub fn on_close(&mut self, reason: CloseReason) -> CloseOutcome {
        self.discard_timers();
        let outcome = self.connection.on_close(reason);
        match outcome {
            CloseOutcome::Reconnect { delay } => {
                let delay_ms = delay.as_millis() as u64;
                self.shared_state.set_status(ConnectionStatus::Reconnecting { delay_ms });
                self.notify(
                    NoticeLevel::Warning,
                    format!("Connection lost, retrying in {}s", delay_ms.div_ceil(1000)),
                );
            }
            CloseOutcome::Expired => {
                self.shared_state.set_status(ConnectionStatus::Expired);
                self.shared_state
                    .push_notice(NoticeLevel::Error, "This room has expired. Create a new game to keep playing.".to_string());
            }
            CloseOutcome::Stopped => self.shared_state.set_status(ConnectionStatus::Closed),
        }
        outcome
    }

    /// Timers belong to the transport that started them.
    fn discard_timers(&mut self) {
        self.scheduler.cancel_all();
        self.shared_state.clear_notices();
        let settled = self.tracker.roll();
        self.shared_state.update_board(|board| {
            if board.dice_rolling {
                board.dice_face = settled;
                board.dice_rolling = false;
            }
        });
    }

    pub fn handle_frame(&mut self, raw: &str) {
        match self.dispatcher.dispatch(raw) {
            Dispatch::Snapshot {
                snapshot,
                assigned_seat,
            } => self.apply_snapshot(snapshot, assigned_seat),
            Dispatch::Chat {
                sender,
                message,
                is_sticker,
            } => self.receive_chat(sender, message, is_sticker),
            Dispatch::ServerError(message) => self.notify(NoticeLevel::Error, message),
            Dispatch::Ignored => {}
            Dispatch::Rejected(e) => {
                if e.affects_snapshot() {
                    let text = format!("Skipped a broken update: {}", e);
                    self.inline_error = Some(text.clone());
                    self.shared_state.update_board(|board| board.inline_error = Some(text));
                }
            }
        }
    }

    pub fn apply_snapshot(&mut self, snapshot: Snapshot, assigned_seat: Option<Seat>) {
        if let Some(seat) = assigned_seat {
            self.session.assign_seat(seat);
        }

        let fresh_roll = snapshot.roll().filter(|roll| {
            self.session.last_snapshot().is_none_or(|previous| {
                previous.roll() != Some(*roll)
                    || previous.turn != snapshot.turn
                    || (follows_roll(snapshot.phase) && !follows_roll(previous.phase))
            })
        });

        self.tracker.observe(&snapshot);
        self.session.accept_snapshot(snapshot);
        self.inline_error = None;

        if let Some(snapshot) = self.session.last_snapshot() {
            let context = ReconcileContext {
                variant: self.session.variant(),
                topology: self.session.topology(),
                local_seat: self.session.playing_seat(),
                tracker: &self.tracker,
            };
            let report = self.engine.apply(snapshot, &context);
            if !report.is_noop() {
                log!(
                    "Board updated: {} created, {} updated, {} removed",
                    report.created.len(),
                    report.updated.len(),
                    report.removed.len()
                );
            }
        }

        self.publish();
        if let Some(roll) = fresh_roll
            && self.session.variant().uses_dice()
        {
            self.start_dice_cycle(roll);
        }
    }

    fn publish(&self) {
        let mut view = self.build_view();
        if self.scheduler.is_pending(&TimerOwner::DiceCycle) {
            let current = self.shared_state.get_board();
            view.dice_face = current.dice_face;
            view.dice_rolling = current.dice_rolling;
        }
        self.shared_state.set_board(view);
    }

    pub fn build_view(&self) -> BoardView {
        let local = self.session.playing_seat();
        let mut view = BoardView::new(self.session.room().to_string(), self.session.variant());
        view.topology = self.session.topology();
        view.local_seat = self.session.local_seat();
        view.entities = self.engine.entities().iter().cloned().collect();
        view.status_text = self.tracker.status_text(local);
        view.can_roll = self.tracker.can_roll(local);
        view.dice_face = self.tracker.roll();
        view.is_finished = self.tracker.is_finished();
        view.inline_error = self.inline_error.clone();

        let Some(snapshot) = self.session.last_snapshot() else {
            return view;
        };
        view.has_snapshot = true;
        if let Some(length) = snapshot.track_length {
            view.track_length = length;
        }
        if self.tracker.can_place(local)
            && let Some(board) = &snapshot.board
        {
            view.open_cells = board
                .iter()
                .enumerate()
                .filter(|(_, mark)| mark.is_none())
                .map(|(index, _)| index as u32)
                .collect();
        }

        let mut players: Vec<PlayerRow> = snapshot
            .seated_players()
            .map(|(seat, player)| PlayerRow {
                seat,
                name: if seat.is_observer() {
                    format!("{} (Spec)", player.display_name())
                } else {
                    player.display_name().to_string()
                },
                score: match self.session.variant() {
                    GameVariant::Ludo => player.finished,
                    GameVariant::TicTacToe => player.score,
                    GameVariant::RaceTrack => player.track_position(),
                },
                is_acting: self.tracker.acting_seat() == Some(seat),
                is_local: local == Some(seat),
            })
            .collect();
        players.sort_by(|a, b| a.seat.cmp(&b.seat).then_with(|| a.name.cmp(&b.name)));
        view.players = players;
        view
    }

    fn start_dice_cycle(&mut self, face: u8) {
        let frames = self.ui.dice_cycle_frames;
        self.shared_state.update_board(|board| {
            board.dice_face = Some(face);
            board.dice_rolling = frames > 0;
        });
        if frames == 0 {
            return;
        }

        let shared_state = self.shared_state.clone();
        let interval = self.ui.dice_cycle_interval();
        self.scheduler.schedule(TimerOwner::DiceCycle, async move {
            for _ in 0..frames {
                let shown: u8 = rand::random_range(1..=MAX_ROLL);
                shared_state.update_board(|board| board.dice_face = Some(shown));
                tokio::time::sleep(interval).await;
            }
            shared_state.update_board(|board| {
                board.dice_face = Some(face);
                board.dice_rolling = false;
            });
        });
    }

    fn receive_chat(&mut self, sender: String, message: String, is_sticker: bool) {
        let sender = if sender.trim().is_empty() { "Anonymous".to_string() } else { sender };
        self.shared_state.push_chat(ChatEntry::new(sender.clone(), message, is_sticker));

        let shared_state = self.shared_state.clone();
        let owner = TimerOwner::ChatBubble(sender.clone());
        self.scheduler.schedule_after(owner, self.ui.chat_bubble_duration(), move || {
            shared_state.clear_chat_bubble(&sender);
        });
    }

    fn notify(&mut self, level: NoticeLevel, text: String) {
        let id = self.shared_state.push_notice(level, text);
        let shared_state = self.shared_state.clone();
        self.scheduler.schedule_after(TimerOwner::Notice(id), self.ui.notice_duration(), move || {
            shared_state.dismiss_notice(id);
        });
    }

    /// Sends the intent now or drops it with a notice; nothing is queued.
    pub fn submit(&mut self, intent: Intent) -> Result<(), IntentError> {
        let result = self
            .intent_message(intent)
            .and_then(|message| self.connection.send(&message));
        if let Err(e) = &result {
            log_warn!("Dropped intent: {}", e);
            self.notify(NoticeLevel::Warning, format!("Not sent: {}", e));
        }
        result
    }

    fn intent_message(&self, intent: Intent) -> Result<ClientMessage, IntentError> {
        match intent {
            Intent::RollDice => Ok(ClientMessage::RollDice {
                player: self.acting_local_seat()?,
            }),
            Intent::MakeMove { index } => Ok(ClientMessage::MakeMove {
                index,
                player: self.acting_local_seat()?,
            }),
            Intent::SendChat { message, is_sticker } => Ok(ClientMessage::ChatMessage {
                message,
                sender: self.session.player_name().to_string(),
                is_sticker: is_sticker.then_some(true),
            }),
            Intent::ResetGame => Ok(ClientMessage::ResetGame),
        }
    }

    fn acting_local_seat(&self) -> Result<Seat, IntentError> {
        let seat = self.session.playing_seat().ok_or(IntentError::NoSeat)?;
        if self.tracker.is_finished() {
            return Err(IntentError::GameFinished);
        }
        if !self.tracker.is_local_turn(Some(seat)) {
            return Err(IntentError::NotLocalTurn);
        }
        Ok(seat)
    }
}

/// Phases the server only enters right after a die was thrown.
fn follows_roll(phase: Option<Phase>) -> bool {
    matches!(phase, Some(Phase::AwaitingMove | Phase::AutoPass))
}
