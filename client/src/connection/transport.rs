use common::log;
use futures_util::{SinkExt, StreamExt};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio_tungstenite::tungstenite::Message;
use url::Url;

use super::{CloseOutcome, CloseReason, ConnectionState, TransportHandle};
use crate::game_client::GameClient;
use crate::state::ClientCommand;

/// Drives the room connection until it is closed for good: dials, serves the
/// socket, and waits out the backoff between attempts.
pub async fn run_room_connection(
    client: &mut GameClient,
    command_rx: &mut mpsc::UnboundedReceiver<ClientCommand>,
) -> ConnectionState {
    while let Some(url) = client.begin_connect() {
        match serve_connection(client, &url, command_rx).await {
            CloseOutcome::Reconnect { delay } => {
                if !wait_for_retry(client, delay, command_rx).await {
                    client.on_close(CloseReason::Requested);
                }
            }
            CloseOutcome::Expired | CloseOutcome::Stopped => break,
        }
    }
    log!("Room connection finished: {}", client.connection_state());
    client.connection_state()
}

/// After a terminal close the window may still send intents; each one is
/// answered with a notice until the user disconnects.
pub async fn drain_commands(client: &mut GameClient, command_rx: &mut mpsc::UnboundedReceiver<ClientCommand>) {
    while let Some(command) = command_rx.recv().await {
        match command {
            ClientCommand::Intent(intent) => {
                let _ = client.submit(intent);
            }
            ClientCommand::Disconnect => break,
        }
    }
}

async fn serve_connection(
    client: &mut GameClient,
    url: &Url,
    command_rx: &mut mpsc::UnboundedReceiver<ClientCommand>,
) -> CloseOutcome {
    let connect = tokio_tungstenite::connect_async(url.as_str());
    tokio::pin!(connect);

    let ws = loop {
        tokio::select! {
            result = &mut connect => match result {
                Ok((ws, _response)) => break ws,
                Err(e) => return client.on_close(CloseReason::TransportError(e.to_string())),
            },
            command = command_rx.recv() => match command {
                Some(ClientCommand::Intent(intent)) => {
                    let _ = client.submit(intent);
                }
                Some(ClientCommand::Disconnect) | None => return client.on_close(CloseReason::Requested),
            },
        }
    };

    let (mut write, mut read) = ws.split();
    let (outbound_tx, mut outbound_rx) = mpsc::unbounded_channel::<String>();
    client.on_open(TransportHandle::new(outbound_tx));

    loop {
        tokio::select! {
            Some(text) = outbound_rx.recv() => {
                if let Err(e) = write.send(Message::Text(text.into())).await {
                    return client.on_close(CloseReason::TransportError(e.to_string()));
                }
            }
            message = read.next() => match message {
                Some(Ok(Message::Text(text))) => client.handle_frame(text.as_str()),
                Some(Ok(Message::Close(frame))) => {
                    let (code, reason) = match frame {
                        Some(frame) => (Some(u16::from(frame.code)), frame.reason.as_str().to_string()),
                        None => (None, String::new()),
                    };
                    return client.on_close(CloseReason::Remote { code, reason });
                }
                Some(Ok(_)) => {}
                Some(Err(e)) => return client.on_close(CloseReason::TransportError(e.to_string())),
                None => {
                    return client.on_close(CloseReason::Remote {
                        code: None,
                        reason: "stream ended".to_string(),
                    });
                }
            },
            command = command_rx.recv() => match command {
                Some(ClientCommand::Intent(intent)) => {
                    let _ = client.submit(intent);
                }
                Some(ClientCommand::Disconnect) | None => {
                    let _ = write.send(Message::Close(None)).await;
                    return client.on_close(CloseReason::Requested);
                }
            },
        }
    }
}

/// Returns `false` when the user disconnected while waiting.
async fn wait_for_retry(
    client: &mut GameClient,
    delay: Duration,
    command_rx: &mut mpsc::UnboundedReceiver<ClientCommand>,
) -> bool {
    let sleep = tokio::time::sleep(delay);
    tokio::pin!(sleep);

    loop {
        tokio::select! {
            _ = &mut sleep => return true,
            command = command_rx.recv() => match command {
                Some(ClientCommand::Intent(intent)) => {
                    let _ = client.submit(intent);
                }
                Some(ClientCommand::Disconnect) | None => return false,
            },
        }
    }
}
