//! ゲーム状態管理モジュール
//! Gessの1対局分の状態（盤面、手番、投了、手の履歴）を管理し、
//! 着手の受付から盤面更新、手番交代までを行う。

use chrono::{DateTime, Utc};
use tracing::{debug, info, instrument};
use uuid::Uuid;

use super::board::Board;
use super::rules::GessRules;
use super::types::{Coordinate, GameStatus, MoveRecord, Player};
use crate::config::RulesConfig;
use crate::error::{GessError, Result};

/// Gessの1対局を表す構造体
///
/// 勝敗は保持せず、投了の有無と盤面上のリングから毎回導出する。
#[derive(Debug, Clone)]
pub struct Game {
    id: Uuid,
    board: Board,
    current_player: Player,
    resigned: Option<Player>,
    rules: RulesConfig,
    move_history: Vec<MoveRecord>,
    created_at: DateTime<Utc>,
    last_updated: DateTime<Utc>,
}

impl Game {
    /// 初期配置、黒番で新しいゲームを作成する
    pub fn new() -> Self {
        Self::with_rules(RulesConfig::default())
    }

    /// ルール設定を指定してゲームを作成する
    pub fn with_rules(rules: RulesConfig) -> Self {
        Self::from_board(Board::new(), Player::Black, rules)
    }

    /// 任意の盤面と手番からゲームを作成する
    pub fn from_board(board: Board, current_player: Player, rules: RulesConfig) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            board,
            current_player,
            resigned: None,
            rules,
            move_history: Vec::new(),
            created_at: now,
            last_updated: now,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn current_player(&self) -> Player {
        self.current_player
    }

    pub fn rules(&self) -> RulesConfig {
        self.rules
    }

    pub fn move_history(&self) -> &[MoveRecord] {
        &self.move_history
    }

    pub fn move_count(&self) -> usize {
        self.move_history.len()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn last_updated(&self) -> DateTime<Utc> {
        self.last_updated
    }

    /// 現在の勝敗状態
    ///
    /// 投了があればその相手の勝ち。そうでなければリングを失った側の負け。
    /// 両者ともリングがない場合は直前に指した側（手番でない側）の負けとする。
    pub fn status(&self) -> GameStatus {
        if let Some(loser) = self.resigned {
            return GameStatus::won_by(loser.opposite());
        }

        let black = GessRules::has_ring(&self.board, Player::Black);
        let white = GessRules::has_ring(&self.board, Player::White);
        match (black, white) {
            (true, true) => GameStatus::Unfinished,
            (true, false) => GameStatus::BlackWon,
            (false, true) => GameStatus::WhiteWon,
            (false, false) => GameStatus::won_by(self.current_player),
        }
    }

    /// ラベル指定で着手する
    pub fn make_move(&mut self, center: &str, destination: &str) -> Result<GameStatus> {
        let center = Coordinate::parse_label(center)?;
        let destination = Coordinate::parse_label(destination)?;
        self.make_move_at(center, destination)
    }

    /// 座標指定で着手する
    ///
    /// 不正な手では盤面も手番も変わらない。
    #[instrument(skip(self), fields(game_id = %self.id, player = ?self.current_player))]
    pub fn make_move_at(&mut self, center: Coordinate, destination: Coordinate) -> Result<GameStatus> {
        let status = self.status();
        if status.is_decided() {
            debug!(?status, "move rejected: game already decided");
            return Err(GessError::GameAlreadyDecided { status });
        }

        let player = self.current_player;
        let footprint = GessRules::check_move(
            &self.board,
            player,
            center,
            destination,
            self.rules.stamp_policy,
        )
        .map_err(|reason| {
            debug!(%reason, "move rejected");
            GessError::from(reason)
        })?;

        let opponent_before = self.board.count_stones(player.opposite());
        self.board
            .apply_move_with_policy(&footprint, destination, self.rules.stamp_policy);
        let captured = opponent_before - self.board.count_stones(player.opposite());

        self.move_history
            .push(MoveRecord::new(player, center, destination, captured));
        self.current_player = player.opposite();
        self.last_updated = Utc::now();

        let status = self.status();
        info!(%center, %destination, captured, ?status, "move applied");
        Ok(status)
    }

    /// 手番のプレイヤーが投了する。勝者を返す
    #[instrument(skip(self), fields(game_id = %self.id))]
    pub fn resign(&mut self) -> Result<Player> {
        let status = self.status();
        if status.is_decided() {
            return Err(GessError::GameAlreadyDecided { status });
        }

        let loser = self.current_player;
        self.resigned = Some(loser);
        self.last_updated = Utc::now();

        let winner = loser.opposite();
        info!(?loser, ?winner, "player resigned");
        Ok(winner)
    }

    /// 手番のプレイヤーの合法手
    pub fn legal_moves(&self) -> Vec<(Coordinate, Coordinate)> {
        if self.status().is_decided() {
            return Vec::new();
        }
        GessRules::legal_moves(&self.board, self.current_player, self.rules.stamp_policy)
    }

    /// 表示用のシンボルグリッド
    pub fn render_board(&self) -> Vec<Vec<char>> {
        self.board.render()
    }

    /// 盤面を標準出力に表示する
    pub fn print_board(&self) {
        print!("{}", self.board.display());
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}
