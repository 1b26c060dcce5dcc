mod main_config;
mod reconnect_config;
mod server_config;
mod ui_config;

pub use main_config::{get_config_manager, Config};
pub use reconnect_config::ReconnectConfig;
pub use server_config::ServerConfig;
pub use ui_config::UiConfig;
