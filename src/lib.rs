//! Gessのルールエンジン
//! 盤面表現、3x3の駒（フットプリント）の扱い、着手の合法性判定、
//! 盤面更新、手番と勝敗の管理を提供する。

pub mod game;
pub mod session;
pub mod error;
pub mod config;

pub use error::{GessError, IllegalMoveReason, Result};
pub use config::{Config, RulesConfig, StampPolicy, SystemLimits};
pub use game::{Board, Cell, Coordinate, Direction, Footprint, Game, GameStatus, GessRules, MoveRecord, Player};
pub use session::GameSessionManager;
