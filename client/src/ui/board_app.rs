use common::protocol::GameVariant;
use eframe::egui;
use egui::{Align, Layout};
use std::time::{Duration, Instant};

use super::board_painter::BoardPainter;
use super::colors::{generate_color_from_name, seat_color};
use crate::command_sender::CommandSender;
use crate::notices::{ChatEntry, NoticeLevel};
use crate::state::{BoardView, ClientCommand, ConnectionStatus, Intent, SharedState};

const STICKERS: [&str; 4] = ["🎲", "👍", "🎉", "😅"];

pub struct BoardApp {
    shared_state: SharedState,
    command_sender: CommandSender,
    board_painter: BoardPainter,
    chat_input: String,
    disconnect_timeout: Duration,
    disconnecting: Option<Instant>,
}

impl BoardApp {
    const SIDE_PANEL_WIDTH: f32 = 240.0;

    pub fn new(shared_state: SharedState, command_sender: CommandSender, disconnect_timeout: Duration) -> Self {
        Self {
            shared_state,
            command_sender,
            board_painter: BoardPainter::new(),
            chat_input: String::new(),
            disconnect_timeout,
            disconnecting: None,
        }
    }

    fn render_status_bar(&self, ui: &mut egui::Ui, view: &BoardView, status: &ConnectionStatus) {
        ui.horizontal(|ui| {
            ui.strong(format!("Room {}", view.room));
            ui.label(view.variant.label());
            ui.separator();
            let color = match status {
                ConnectionStatus::Connected => egui::Color32::from_rgb(39, 174, 96),
                ConnectionStatus::Connecting | ConnectionStatus::Reconnecting { .. } => egui::Color32::from_rgb(230, 126, 34),
                ConnectionStatus::Expired | ConnectionStatus::Disconnected | ConnectionStatus::Closed => egui::Color32::from_rgb(214, 48, 49),
            };
            ui.colored_label(color, format!("● {}", status.label()));
            ui.separator();
            ui.label(&view.status_text);
        });
    }

    fn render_players(&self, ui: &mut egui::Ui, view: &BoardView) {
        ui.heading("Players");
        if view.players.is_empty() {
            ui.label(egui::RichText::new("Nobody here yet...").italics().color(egui::Color32::GRAY));
        }
        for player in &view.players {
            ui.horizontal(|ui| {
                let marker = if player.is_acting { "▶" } else { " " };
                ui.label(marker);
                ui.colored_label(seat_color(player.seat), player.seat.as_str());
                let name = if player.is_local { format!("{} (you)", player.name) } else { player.name.clone() };
                if player.is_acting {
                    ui.strong(name);
                } else {
                    ui.label(name);
                }
                ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                    ui.label(player.score.to_string());
                });
            });
        }
    }

    fn render_controls(&mut self, ui: &mut egui::Ui, view: &BoardView, connected: bool) {
        if view.variant.uses_dice() {
            ui.horizontal(|ui| {
                BoardPainter::paint_die(ui, view.dice_face, view.dice_rolling);
                let roll = ui.add_enabled(view.can_roll && connected && !view.dice_rolling, egui::Button::new("Roll dice"));
                if roll.clicked() {
                    self.command_sender.intent(Intent::RollDice);
                }
            });
        }
        let reset_label = if view.is_finished { "Play again" } else { "Reset game" };
        if ui.add_enabled(connected, egui::Button::new(reset_label)).clicked() {
            self.command_sender.intent(Intent::ResetGame);
        }
    }

    fn render_chat_widget(&mut self, ui: &mut egui::Ui, history: &[ChatEntry], bubbles: &[ChatEntry]) {
        ui.separator();
        ui.heading("Chat");

        for bubble in bubbles {
            egui::Frame::NONE
                .fill(egui::Color32::from_rgb(255, 250, 205))
                .corner_radius(6.0)
                .inner_margin(4.0)
                .show(ui, |ui| {
                    ui.colored_label(generate_color_from_name(&bubble.sender), format!("{}: {}", bubble.sender, bubble.message));
                });
        }

        let input_height = 30.0;
        let available_width = ui.available_width();
        let mut response_opt: Option<egui::Response> = None;

        ui.with_layout(Layout::bottom_up(Align::LEFT), |ui| {
            ui.horizontal(|ui| {
                for sticker in STICKERS {
                    if ui.button(sticker).clicked() {
                        self.command_sender.intent(Intent::SendChat {
                            message: sticker.to_string(),
                            is_sticker: true,
                        });
                    }
                }
            });

            response_opt = Some(ui.add_sized(
                egui::vec2(available_width, input_height),
                egui::TextEdit::singleline(&mut self.chat_input).hint_text("Type message and press Enter..."),
            ));

            ui.add_space(5.0);

            ui.with_layout(Layout::top_down(Align::LEFT), |ui| {
                egui::ScrollArea::vertical()
                    .id_salt("room_chat_scroll")
                    .stick_to_bottom(true)
                    .show(ui, |ui| {
                        ui.set_min_width(available_width - 15.0);
                        if history.is_empty() {
                            ui.label(egui::RichText::new("No messages yet...").italics().color(egui::Color32::GRAY));
                        } else {
                            for entry in history {
                                ui.horizontal_wrapped(|ui| {
                                    ui.label(egui::RichText::new(entry.time_label()).small().color(egui::Color32::GRAY));
                                    ui.colored_label(generate_color_from_name(&entry.sender), format!("{}:", entry.sender));
                                    ui.label(&entry.message);
                                });
                            }
                        }
                    });
            });
        });

        if let Some(response) = response_opt
            && response.lost_focus()
            && ui.input(|i| i.key_pressed(egui::Key::Enter))
        {
            let message = self.chat_input.trim();
            if !message.is_empty() {
                self.command_sender.intent(Intent::SendChat {
                    message: message.to_string(),
                    is_sticker: false,
                });
                self.chat_input.clear();
                response.request_focus();
            }
        }
    }

    fn render_notices(&self, ui: &mut egui::Ui, view: &BoardView) {
        for notice in self.shared_state.get_notices() {
            let color = match notice.level {
                NoticeLevel::Info => egui::Color32::from_rgb(41, 128, 185),
                NoticeLevel::Warning => egui::Color32::from_rgb(230, 126, 34),
                NoticeLevel::Error => egui::Color32::from_rgb(214, 48, 49),
            };
            ui.colored_label(color, notice.text);
        }
        if let Some(error) = &view.inline_error {
            ui.colored_label(egui::Color32::from_rgb(214, 48, 49), error);
        }
    }
}

impl eframe::App for BoardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if !self.shared_state.has_context() {
            self.shared_state.set_context(ctx.clone());
        }

        if ctx.input(|i| i.viewport().close_requested()) {
            if let Some(disconnect_time) = self.disconnecting {
                if disconnect_time.elapsed() < self.disconnect_timeout {
                    ctx.send_viewport_cmd(egui::ViewportCommand::CancelClose);
                }
            } else {
                ctx.send_viewport_cmd(egui::ViewportCommand::CancelClose);
                self.command_sender.send(ClientCommand::Disconnect);
                self.disconnecting = Some(Instant::now());
            }
        }

        if self.shared_state.should_close()
            || self.disconnecting.is_some_and(|t| t.elapsed() >= self.disconnect_timeout)
        {
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
        }

        let view = self.shared_state.get_board();
        let status = self.shared_state.get_status();
        let connected = status == ConnectionStatus::Connected;

        egui::TopBottomPanel::top("status_bar").show(ctx, |ui| {
            self.render_status_bar(ui, &view, &status);
        });

        egui::SidePanel::right("side_panel")
            .min_width(Self::SIDE_PANEL_WIDTH)
            .show(ctx, |ui| {
                self.render_players(ui, &view);
                ui.add_space(8.0);
                self.render_controls(ui, &view, connected);
                let history = self.shared_state.get_chat_history();
                let bubbles = self.shared_state.get_chat_bubbles();
                self.render_chat_widget(ui, &history, &bubbles);
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            self.render_notices(ui, &view);

            if !view.has_snapshot {
                ui.centered_and_justified(|ui| {
                    ui.vertical_centered(|ui| {
                        ui.heading("Waiting for game to start...");
                        ui.spinner();
                    });
                });
                return;
            }

            if view.variant == GameVariant::TicTacToe && view.is_finished {
                ui.heading(&view.status_text);
            }

            ui.centered_and_justified(|ui| {
                self.board_painter.render(ui, &view, &self.command_sender);
            });
        });

        if self.disconnecting.is_some() || view.dice_rolling {
            ctx.request_repaint();
        }
    }
}
