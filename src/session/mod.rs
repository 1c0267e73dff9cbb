pub mod game_manager;

pub use game_manager::*;
