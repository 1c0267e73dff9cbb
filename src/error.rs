//! アプリケーション全体のエラー定義モジュール
//! ラベル解析、着手の合法性、ゲームセッション管理のエラーを統一管理。

use thiserror::Error;
use uuid::Uuid;

use crate::game::{Coordinate, Direction, GameStatus};

/// 着手が不正と判定された理由
/// 合法性チェックの各段階に1対1で対応する
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum IllegalMoveReason {
    #[error("center or destination is outside the playable area")]
    OutOfBounds,

    #[error("piece contains an opponent stone")]
    ForeignStone,

    #[error("destination is not on a straight or diagonal line from the center")]
    NoDirection,

    #[error("piece has no stone pointing {0}")]
    NoStoneInDirection(Direction),

    #[error("piece may move at most {max} squares, requested {distance}")]
    TooFar { distance: usize, max: usize },

    #[error("path is obstructed at {at}")]
    Obstructed { at: Coordinate },

    #[error("move would leave the mover without a ring")]
    BreaksOwnRing,
}

/// ゲームロジックに関連するエラー
#[derive(Debug, Error)]
pub enum GessError {
    #[error("Invalid label: {label:?}")]
    InvalidLabel { label: String },

    #[error("Illegal move: {reason}")]
    IllegalMove { reason: IllegalMoveReason },

    #[error("Game already decided: {status:?}")]
    GameAlreadyDecided { status: GameStatus },

    #[error("Game not found: {game_id}")]
    GameNotFound { game_id: Uuid },

    #[error("Session limit exceeded: {max}")]
    SessionLimitExceeded { max: usize },
}

impl From<IllegalMoveReason> for GessError {
    fn from(reason: IllegalMoveReason) -> Self {
        GessError::IllegalMove { reason }
    }
}

/// ゲームエラーをベースとした結果型
pub type Result<T> = std::result::Result<T, GessError>;
