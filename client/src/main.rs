mod command_sender;
mod config;
mod connection;
mod constants;
mod dispatcher;
mod errors;
mod game_client;
mod notices;
mod reconcile;
mod scheduler;
mod session;
mod state;
mod tracker;
mod ui;

use clap::Parser;
use common::id_generator::generate_player_name;
use common::logger::init_logger;
use common::protocol::GameVariant;
use common::{RoomCode, log, log_error};
use eframe::egui;
use std::time::Duration;
use tokio::sync::mpsc;

use command_sender::CommandSender;
use config::{Config, get_config_manager};
use connection::{Backoff, ConnectionManager, ConnectionState, room_endpoint};
use connection::transport::{drain_commands, run_room_connection};
use constants::{DEFAULT_GAME, DISCONNECT_TIMEOUT_MS, HEADLESS_POLL_INTERVAL_MS, WINDOW_TITLE};
use game_client::GameClient;
use session::Session;
use state::{BoardView, ConnectionStatus, SharedState};
use ui::BoardApp;

#[derive(Parser)]
#[command(name = "board_games_client")]
struct Args {
    /// Room code printed on the room page
    #[arg(long, value_parser = RoomCode::parse)]
    room: RoomCode,

    #[arg(long, default_value = DEFAULT_GAME)]
    game: GameVariant,

    /// Overrides `server.base_url` from the config file
    #[arg(long)]
    server: Option<String>,

    #[arg(long)]
    name: Option<String>,

    /// Run without a window and only log state changes
    #[arg(long)]
    headless: bool,

    #[arg(long)]
    use_log_prefix: bool,
}

fn load_config() -> Config {
    match get_config_manager().get_config() {
        Ok(config) => config,
        Err(e) => {
            log_error!("Failed to load config, using defaults: {}", e);
            Config::default()
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let prefix = if args.use_log_prefix { Some("Client".to_string()) } else { None };
    init_logger(prefix);

    let config = load_config();
    let base_url = args.server.clone().unwrap_or_else(|| config.server.base_url.clone());
    let player_name = args
        .name
        .clone()
        .or_else(|| config.player_name.clone())
        .unwrap_or_else(generate_player_name);

    let endpoint = room_endpoint(&base_url, &config.server.socket_path, &args.room)?;
    log!("Joining room {} ({}) as {} via {}", args.room, args.game, player_name, endpoint);

    let connection = ConnectionManager::new(endpoint, Backoff::from_config(&config.reconnect))
        .with_expired_close_code(config.reconnect.expired_close_code);
    let session = Session::new(args.room.clone(), args.game, player_name);

    let shared_state = SharedState::new(BoardView::new(args.room.to_string(), args.game));
    let (command_tx, mut command_rx) = mpsc::unbounded_channel();

    let shared_state_clone = shared_state.clone();
    let ui_config = config.ui;
    let network_thread = std::thread::spawn(move || {
        let rt = match tokio::runtime::Builder::new_current_thread().enable_all().build() {
            Ok(rt) => rt,
            Err(e) => {
                log_error!("Failed to start network runtime: {}", e);
                shared_state_clone.set_should_close();
                return;
            }
        };
        rt.block_on(async {
            let mut client = GameClient::new(session, connection, shared_state_clone.clone(), ui_config);
            let final_state = run_room_connection(&mut client, &mut command_rx).await;
            if final_state == ConnectionState::ClosedExpired {
                drain_commands(&mut client, &mut command_rx).await;
            }
        });
        shared_state_clone.set_should_close();
    });

    if args.headless {
        run_headless(&shared_state);
        drop(command_tx);
        if network_thread.join().is_err() {
            log_error!("Network thread panicked");
        }
        return Ok(());
    }

    let command_sender = CommandSender::new(command_tx);
    let title = format!("{} - {} - {}", WINDOW_TITLE, args.game.label(), args.room);
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1000.0, 760.0])
            .with_title(title),
        ..Default::default()
    };

    eframe::run_native(
        "Board Games Client",
        options,
        Box::new(move |_cc| {
            Ok(Box::new(BoardApp::new(
                shared_state,
                command_sender,
                Duration::from_millis(DISCONNECT_TIMEOUT_MS),
            )))
        }),
    )?;

    Ok(())
}

/// Polls the shared state and logs every status or turn change until the room is closed.
fn run_headless(shared_state: &SharedState) {
    let mut last_status = None;
    let mut last_text = String::new();
    while !shared_state.should_close() {
        let status = shared_state.get_status();
        let closed = matches!(status, ConnectionStatus::Expired | ConnectionStatus::Closed);
        if last_status.as_ref() != Some(&status) {
            log!("Status: {}", status.label());
            last_status = Some(status);
        }
        if closed {
            break;
        }
        let board = shared_state.get_board();
        if board.status_text != last_text {
            log!("{}", board.status_text);
            last_text = board.status_text;
        }
        std::thread::sleep(Duration::from_millis(HEADLESS_POLL_INTERVAL_MS));
    }
}
