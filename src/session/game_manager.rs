//! 対局セッション管理モジュール
//! 同時進行する複数の対局を保持し、対局数制限、
//! 着手の直列化、放置された対局のクリーンアップを担当する。

use std::sync::{Arc, Mutex};
use std::time::Duration;

use chrono::Utc;
use dashmap::DashMap;
use tracing::{debug, info};
use uuid::Uuid;

use crate::config::{Config, RulesConfig};
use crate::error::{GessError, Result};
use crate::game::{Game, GameStatus, Player};

/// 対局の管理を行うメイン構造体
/// 1対局への着手はDashMapのエントリロックの下で1つずつ適用される
#[derive(Debug, Clone)]
pub struct GameSessionManager {
    games: Arc<DashMap<Uuid, Game>>,
    /// 対局数の確認と追加を一続きにするためのロック
    creation_lock: Arc<Mutex<()>>,
    max_games: usize,
    rules: RulesConfig,
    /// 最後の更新からこの時間を過ぎた対局はクリーンアップで削除される
    session_timeout: Duration,
}

impl GameSessionManager {
    /// デフォルトタイムアウト（1時間）でマネージャーを作成
    pub fn new(max_games: usize) -> Self {
        Self::with_timeout(max_games, Duration::from_secs(3600))
    }

    /// カスタムタイムアウトでマネージャーを作成
    pub fn with_timeout(max_games: usize, session_timeout: Duration) -> Self {
        Self {
            games: Arc::new(DashMap::new()),
            creation_lock: Arc::new(Mutex::new(())),
            max_games,
            rules: RulesConfig::default(),
            session_timeout,
        }
    }

    /// 設定からマネージャーを作成
    pub fn from_config(config: &Config) -> Self {
        Self {
            rules: config.rules,
            ..Self::with_timeout(
                config.limits.max_concurrent_games,
                config.limits.session_timeout,
            )
        }
    }

    /// 新しい対局を作成する
    /// 最大対局数に達している場合はエラーを返す
    pub fn create_game(&self) -> Result<Uuid> {
        let _guard = self
            .creation_lock
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        if self.games.len() >= self.max_games {
            return Err(GessError::SessionLimitExceeded { max: self.max_games });
        }

        let game = Game::with_rules(self.rules);
        let game_id = game.id();
        self.games.insert(game_id, game);

        info!(%game_id, "game created");
        Ok(game_id)
    }

    /// 指定したIDの対局のコピーを取得する
    pub fn get_game(&self, game_id: &Uuid) -> Result<Game> {
        self.games
            .get(game_id)
            .map(|game| game.clone())
            .ok_or(GessError::GameNotFound { game_id: *game_id })
    }

    /// 指定した対局に着手する
    pub fn make_move(&self, game_id: &Uuid, center: &str, destination: &str) -> Result<GameStatus> {
        let mut game = self
            .games
            .get_mut(game_id)
            .ok_or(GessError::GameNotFound { game_id: *game_id })?;
        game.make_move(center, destination)
    }

    /// 指定した対局で手番のプレイヤーが投了する。勝者を返す
    pub fn resign(&self, game_id: &Uuid) -> Result<Player> {
        let mut game = self
            .games
            .get_mut(game_id)
            .ok_or(GessError::GameNotFound { game_id: *game_id })?;
        game.resign()
    }

    pub fn remove_game(&self, game_id: &Uuid) -> Result<Game> {
        self.games
            .remove(game_id)
            .map(|(_, game)| game)
            .ok_or(GessError::GameNotFound { game_id: *game_id })
    }

    pub fn game_exists(&self, game_id: &Uuid) -> bool {
        self.games.contains_key(game_id)
    }

    pub fn game_count(&self) -> usize {
        self.games.len()
    }

    /// 一定時間更新のない対局を削除し、削除した数を返す
    pub fn cleanup_inactive_games(&self) -> usize {
        let Ok(timeout) = chrono::Duration::from_std(self.session_timeout) else {
            return 0;
        };
        let Some(cutoff_time) = Utc::now().checked_sub_signed(timeout) else {
            return 0;
        };

        // 判定と削除をシャードのロックの下で行い、直前に着手された対局は残す
        let mut removed_count = 0;
        self.games.retain(|_, game| {
            let active = game.last_updated() >= cutoff_time;
            if !active {
                removed_count += 1;
            }
            active
        });

        debug!(removed_count, "inactive games cleaned up");
        removed_count
    }
}

impl Default for GameSessionManager {
    fn default() -> Self {
        Self::new(100)
    }
}
