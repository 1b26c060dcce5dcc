use common::board::track::{TRACK_COLUMNS, track_rows, track_to_grid};
use common::board::{GridCoord, Topology, cross, map_to_grid};
use common::protocol::{GameVariant, Seat};
use eframe::egui;
use std::collections::HashMap;

use super::colors::{seat_color, seat_tint};
use crate::command_sender::CommandSender;
use crate::reconcile::{EntityKey, ViewEntity};
use crate::state::{BoardView, Intent};

const GRID_GAME_SIZE: u32 = 3;

pub struct BoardPainter {
    last_hover: Option<u32>,
}

impl BoardPainter {
    const BOARD_PADDING: f32 = 16.0;
    const MIN_CELL_SIZE: f32 = 12.0;
    const MAX_CELL_SIZE: f32 = 120.0;
    const LINE_WIDTH: f32 = 1.0;
    const MOVE_SECONDS: f32 = 0.3;

    pub fn new() -> Self {
        Self { last_hover: None }
    }

    fn dimensions(view: &BoardView) -> (u32, u32) {
        match view.variant {
            GameVariant::TicTacToe => (GRID_GAME_SIZE, GRID_GAME_SIZE),
            GameVariant::Ludo => {
                let size = view.topology.grid_size() as u32;
                (size, size)
            }
            GameVariant::RaceTrack => (track_rows(view.track_length), TRACK_COLUMNS),
        }
    }

    fn calculate_cell_size(available_width: f32, available_height: f32, rows: u32, cols: u32) -> f32 {
        let cell_width = (available_width - Self::BOARD_PADDING * 2.0) / cols as f32;
        let cell_height = (available_height - Self::BOARD_PADDING * 2.0) / rows as f32;
        cell_width.min(cell_height).clamp(Self::MIN_CELL_SIZE, Self::MAX_CELL_SIZE)
    }

    fn cell_rect(origin: egui::Rect, cell_size: f32, coord: GridCoord) -> egui::Rect {
        egui::Rect::from_min_size(
            egui::pos2(
                origin.left() + coord.col as f32 * cell_size,
                origin.top() + coord.row as f32 * cell_size,
            ),
            egui::vec2(cell_size, cell_size),
        )
    }

    pub fn render(&mut self, ui: &mut egui::Ui, view: &BoardView, command_sender: &CommandSender) {
        let (rows, cols) = Self::dimensions(view);
        let cell_size = Self::calculate_cell_size(ui.available_width(), ui.available_height(), rows, cols);

        let (rect, response) = ui.allocate_exact_size(
            egui::vec2(cols as f32 * cell_size, rows as f32 * cell_size),
            egui::Sense::click(),
        );

        match view.variant {
            GameVariant::TicTacToe => self.paint_grid_game(ui.painter(), rect, cell_size, view, &response, command_sender),
            GameVariant::Ludo => Self::paint_racing_board(ui.painter(), rect, cell_size, view.topology),
            GameVariant::RaceTrack => Self::paint_track(ui.painter(), rect, cell_size, view.track_length),
        }

        self.paint_entities(ui, rect, cell_size, view, command_sender);
    }

    fn paint_grid_game(
        &mut self,
        painter: &egui::Painter,
        rect: egui::Rect,
        cell_size: f32,
        view: &BoardView,
        response: &egui::Response,
        command_sender: &CommandSender,
    ) {
        painter.rect_filled(rect, 0.0, egui::Color32::from_rgb(240, 240, 240));
        let stroke = egui::Stroke::new(Self::LINE_WIDTH * 2.0, egui::Color32::BLACK);
        for i in 0..=GRID_GAME_SIZE {
            let offset = i as f32 * cell_size;
            painter.line_segment(
                [egui::pos2(rect.left() + offset, rect.top()), egui::pos2(rect.left() + offset, rect.bottom())],
                stroke,
            );
            painter.line_segment(
                [egui::pos2(rect.left(), rect.top() + offset), egui::pos2(rect.right(), rect.top() + offset)],
                stroke,
            );
        }

        self.last_hover = response.hover_pos().and_then(|pos| {
            let col = ((pos.x - rect.left()) / cell_size) as u32;
            let row = ((pos.y - rect.top()) / cell_size) as u32;
            let index = row * GRID_GAME_SIZE + col;
            (col < GRID_GAME_SIZE && row < GRID_GAME_SIZE && view.open_cells.contains(&index)).then_some(index)
        });

        if let Some(index) = self.last_hover {
            let coord = GridCoord::new((index / GRID_GAME_SIZE) as u8, (index % GRID_GAME_SIZE) as u8);
            painter.rect_filled(
                Self::cell_rect(rect, cell_size, coord),
                0.0,
                egui::Color32::from_rgba_unmultiplied(100, 150, 255, 50),
            );
            if response.clicked() {
                command_sender.intent(Intent::MakeMove { index });
            }
        }
    }

    fn paint_path_cell(painter: &egui::Painter, cell: egui::Rect, fill: egui::Color32) {
        painter.rect_filled(cell.shrink(0.5), 2.0, fill);
        painter.rect_stroke(
            cell.shrink(0.5),
            2.0,
            egui::Stroke::new(Self::LINE_WIDTH, egui::Color32::from_gray(150)),
            egui::StrokeKind::Inside,
        );
    }

    fn paint_racing_board(painter: &egui::Painter, rect: egui::Rect, cell_size: f32, topology: Topology) {
        painter.rect_filled(rect, 4.0, egui::Color32::from_rgb(250, 247, 240));

        for coord in topology.loop_cells() {
            Self::paint_path_cell(painter, Self::cell_rect(rect, cell_size, coord), egui::Color32::WHITE);
        }

        for (seat_index, seat) in topology.seats().iter().enumerate() {
            for coord in topology.home_cells(seat_index) {
                Self::paint_path_cell(painter, Self::cell_rect(rect, cell_size, coord), seat_tint(*seat));
            }
            for coord in topology.base_cells(seat_index) {
                let slot = Self::cell_rect(rect, cell_size, coord);
                painter.circle_filled(slot.center(), cell_size * 0.45, seat_tint(*seat));
                painter.circle_stroke(slot.center(), cell_size * 0.45, egui::Stroke::new(Self::LINE_WIDTH, seat_color(*seat)));
            }
            if let Some(entry) = map_to_grid(0, *seat, 0, topology) {
                Self::paint_path_cell(painter, Self::cell_rect(rect, cell_size, entry), seat_tint(*seat));
            }
            if let Some(finish) = map_to_grid(topology.finish_position(), *seat, 0, topology)
                && finish != topology.center()
            {
                painter.rect_filled(Self::cell_rect(rect, cell_size, finish).shrink(1.0), 2.0, seat_color(*seat));
            }
        }

        if topology == Topology::Cross4 {
            for coord in cross::SAFE_CELLS {
                let cell = Self::cell_rect(rect, cell_size, coord);
                painter.circle_stroke(cell.center(), cell_size * 0.3, egui::Stroke::new(Self::LINE_WIDTH, egui::Color32::from_gray(120)));
            }
        }

        let center = Self::cell_rect(rect, cell_size, topology.center());
        painter.rect_filled(center.expand(cell_size * 0.5), 4.0, egui::Color32::from_rgb(212, 175, 55));
    }

    fn paint_track(painter: &egui::Painter, rect: egui::Rect, cell_size: f32, length: u32) {
        for square in 1..=length.max(1) {
            let cell = Self::cell_rect(rect, cell_size, track_to_grid(square, length));
            let fill = if square % 2 == 0 {
                egui::Color32::from_rgb(236, 240, 241)
            } else {
                egui::Color32::from_rgb(255, 250, 230)
            };
            Self::paint_path_cell(painter, cell, fill);
            painter.text(
                cell.left_top() + egui::vec2(3.0, 2.0),
                egui::Align2::LEFT_TOP,
                square.to_string(),
                egui::FontId::proportional((cell_size * 0.22).max(8.0)),
                egui::Color32::from_gray(110),
            );
        }
    }

    fn paint_entities(&mut self, ui: &mut egui::Ui, rect: egui::Rect, cell_size: f32, view: &BoardView, command_sender: &CommandSender) {
        let mut stacks: HashMap<GridCoord, usize> = HashMap::new();

        for entity in &view.entities {
            let cell = Self::cell_rect(rect, cell_size, entity.coord);
            let stacked = stacks.entry(entity.coord).or_insert(0);
            let nudge = *stacked as f32 * cell_size * 0.12;
            *stacked += 1;

            let target = cell.center() + egui::vec2(nudge, -nudge);
            let ctx = ui.ctx().clone();
            let x = ctx.animate_value_with_time(egui::Id::new(("entity_x", entity.instance.value())), target.x, Self::MOVE_SECONDS);
            let y = ctx.animate_value_with_time(egui::Id::new(("entity_y", entity.instance.value())), target.y, Self::MOVE_SECONDS);
            let center = egui::pos2(x, y);

            match entity.key {
                EntityKey::Cell { .. } => Self::draw_mark(ui.painter(), cell, entity.owner),
                EntityKey::Piece { index, .. } => {
                    self.draw_piece(ui, center, cell_size, entity, index, command_sender);
                }
                EntityKey::Token { seat } => Self::draw_token(ui.painter(), center, cell_size, seat),
            }
        }
    }

    fn draw_piece(
        &self,
        ui: &mut egui::Ui,
        center: egui::Pos2,
        cell_size: f32,
        entity: &ViewEntity,
        index: u8,
        command_sender: &CommandSender,
    ) {
        let radius = cell_size * 0.36;
        let painter = ui.painter();
        painter.circle_filled(center, radius, seat_color(entity.owner));
        painter.circle_stroke(center, radius, egui::Stroke::new(1.5, egui::Color32::from_gray(40)));

        if !entity.interactive {
            return;
        }

        let pulse = (ui.input(|i| i.time) * 4.0).sin() as f32 * 0.5 + 0.5;
        ui.painter().circle_stroke(
            center,
            radius + 2.0 + pulse * 2.0,
            egui::Stroke::new(2.5, egui::Color32::from_rgb(255, 215, 0)),
        );
        ui.ctx().request_repaint();

        let hit = egui::Rect::from_center_size(center, egui::vec2(radius * 2.0, radius * 2.0));
        let response = ui
            .interact(hit, egui::Id::new(("piece", entity.instance.value())), egui::Sense::click())
            .on_hover_cursor(egui::CursorIcon::PointingHand);
        if response.clicked() {
            command_sender.intent(Intent::MakeMove { index: index as u32 });
        }
    }

    fn draw_token(painter: &egui::Painter, center: egui::Pos2, cell_size: f32, seat: Seat) {
        let radius = cell_size * 0.3;
        painter.circle_filled(center, radius, seat_color(seat));
        painter.circle_stroke(center, radius, egui::Stroke::new(1.5, egui::Color32::WHITE));
        painter.text(
            center,
            egui::Align2::CENTER_CENTER,
            &seat.as_str()[..1],
            egui::FontId::proportional(radius),
            egui::Color32::WHITE,
        );
    }

    fn draw_mark(painter: &egui::Painter, rect: egui::Rect, owner: Seat) {
        let padding = rect.width() * 0.2;
        let stroke = egui::Stroke::new(4.0, seat_color(owner));
        match owner {
            Seat::O => {
                painter.circle_stroke(rect.center(), rect.width() / 2.0 - padding, stroke);
            }
            _ => {
                painter.line_segment(
                    [
                        egui::pos2(rect.left() + padding, rect.top() + padding),
                        egui::pos2(rect.right() - padding, rect.bottom() - padding),
                    ],
                    stroke,
                );
                painter.line_segment(
                    [
                        egui::pos2(rect.right() - padding, rect.top() + padding),
                        egui::pos2(rect.left() + padding, rect.bottom() - padding),
                    ],
                    stroke,
                );
            }
        }
    }

    pub fn paint_die(ui: &mut egui::Ui, face: Option<u8>, rolling: bool) {
        let size = 48.0;
        let (rect, _response) = ui.allocate_exact_size(egui::vec2(size, size), egui::Sense::hover());
        let painter = ui.painter();
        let fill = if rolling { egui::Color32::from_rgb(255, 248, 220) } else { egui::Color32::WHITE };
        painter.rect_filled(rect, 6.0, fill);
        painter.rect_stroke(rect, 6.0, egui::Stroke::new(1.5, egui::Color32::from_gray(60)), egui::StrokeKind::Inside);

        let Some(face) = face else {
            painter.text(rect.center(), egui::Align2::CENTER_CENTER, "?", egui::FontId::proportional(22.0), egui::Color32::GRAY);
            return;
        };

        let quarter = size / 4.0;
        let pips: &[(f32, f32)] = match face {
            1 => &[(0.0, 0.0)],
            2 => &[(-1.0, -1.0), (1.0, 1.0)],
            3 => &[(-1.0, -1.0), (0.0, 0.0), (1.0, 1.0)],
            4 => &[(-1.0, -1.0), (1.0, -1.0), (-1.0, 1.0), (1.0, 1.0)],
            5 => &[(-1.0, -1.0), (1.0, -1.0), (0.0, 0.0), (-1.0, 1.0), (1.0, 1.0)],
            _ => &[(-1.0, -1.0), (1.0, -1.0), (-1.0, 0.0), (1.0, 0.0), (-1.0, 1.0), (1.0, 1.0)],
        };
        for (dx, dy) in pips {
            painter.circle_filled(rect.center() + egui::vec2(dx * quarter, dy * quarter), size * 0.08, egui::Color32::BLACK);
        }
    }
}
