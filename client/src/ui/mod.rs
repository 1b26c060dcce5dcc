mod board_app;
mod board_painter;
mod colors;

pub use board_app::BoardApp;
