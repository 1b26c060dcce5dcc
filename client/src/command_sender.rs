use common::log_warn;
use tokio::sync::mpsc;

use crate::state::{ClientCommand, Intent};

#[derive(Clone)]
pub struct CommandSender {
    tx: mpsc::UnboundedSender<ClientCommand>,
}

impl CommandSender {
    pub fn new(tx: mpsc::UnboundedSender<ClientCommand>) -> Self {
        Self { tx }
    }

    pub fn send(&self, cmd: ClientCommand) {
        if let Err(e) = self.tx.send(cmd) {
            log_warn!("Network task is gone, dropping {:?}", e.0);
        }
    }

    pub fn intent(&self, intent: Intent) {
        self.send(ClientCommand::Intent(intent));
    }
}
