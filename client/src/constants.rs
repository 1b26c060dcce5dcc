pub const CHAT_BUFFER_SIZE: usize = 64;
pub const DEFAULT_GAME: &str = "ludo";
pub const WINDOW_TITLE: &str = "Board Games";
pub const HEADLESS_POLL_INTERVAL_MS: u64 = 250;
pub const DISCONNECT_TIMEOUT_MS: u64 = 1500;
