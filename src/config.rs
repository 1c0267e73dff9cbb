//! アプリケーション設定管理モジュール
//! ルールの細部とシステムの制限値を
//! 設定ファイルと環境変数から読み込んで管理する。

use serde::{Deserialize, Serialize};
use std::{env, fs, io, path::Path, time::Duration};

/// Duration型をJSONでシリアライズするためのモジュール
mod duration_serde {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::Duration;

    /// Durationを(secs, nanos)のタプルとしてシリアライズ
    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        (duration.as_secs(), duration.subsec_nanos()).serialize(serializer)
    }

    /// (secs, nanos)のタプルからDurationをデシリアライズ
    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let (secs, nanos) = <(u64, u32)>::deserialize(deserializer)?;
        Ok(Duration::new(secs, nanos))
    }
}

/// 移動先に駒を写すときの上書き方針
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum StampPolicy {
    /// 石のある周囲マスだけを書き込み、空の周囲マスは移動先の石を残す
    #[default]
    OccupiedOnly,
    /// 移動先の3x3をすべて空にしてから書き込む
    FullFootprint,
}

/// ゲームルールの設定
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RulesConfig {
    pub stamp_policy: StampPolicy,
}

/// システムの制限値を定義する構造体
/// 同時ゲーム数、放置ゲームのタイムアウトを管理
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemLimits {
    /// 同時に保持できるゲーム数の上限
    pub max_concurrent_games: usize,
    /// 最後の着手からこの時間が経過したゲームは掃除の対象になる
    #[serde(with = "duration_serde")]
    pub session_timeout: Duration,
}

impl Default for SystemLimits {
    fn default() -> Self {
        Self {
            max_concurrent_games: 100,
            session_timeout: Duration::from_secs(3600), // 1時間
        }
    }
}

/// アプリケーションの全設定を統合するメイン設定構造体
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    pub rules: RulesConfig,
    pub limits: SystemLimits,
}

/// 設定関連のエラーを表すenum
/// ファイル読み込み、パース、検証エラーなどを含む
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("設定ファイル読み込みエラー: {0}")]
    FileReadError(#[from] std::io::Error),

    #[error("設定ファイル解析エラー: {0}")]
    ParseError(#[from] serde_json::Error),

    #[error("環境変数エラー: {name} = {value}")]
    EnvVarError { name: String, value: String },

    #[error("設定値が無効です: {field} = {value}")]
    InvalidValue { field: String, value: String },
}

impl Config {
    /// 指定したファイルパスから設定を読み込む
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// 環境変数から設定を読み込む
    /// デフォルト値をベースに環境変数で上書きする
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Config::default();
        config.apply_env()?;
        Ok(config)
    }

    fn apply_env(&mut self) -> Result<(), ConfigError> {
        if let Ok(policy) = env::var("GESS_STAMP_POLICY") {
            self.rules.stamp_policy = match policy.to_lowercase().as_str() {
                "occupied_only" | "occupied-only" => StampPolicy::OccupiedOnly,
                "full_footprint" | "full-footprint" => StampPolicy::FullFootprint,
                _ => {
                    return Err(ConfigError::EnvVarError {
                        name: "GESS_STAMP_POLICY".to_string(),
                        value: policy,
                    })
                }
            };
        }

        if let Ok(max_games) = env::var("GESS_MAX_CONCURRENT_GAMES") {
            self.limits.max_concurrent_games =
                max_games.parse().map_err(|_| ConfigError::EnvVarError {
                    name: "GESS_MAX_CONCURRENT_GAMES".to_string(),
                    value: max_games,
                })?;
        }

        if let Ok(timeout) = env::var("GESS_SESSION_TIMEOUT_SECS") {
            let secs: u64 = timeout.parse().map_err(|_| ConfigError::EnvVarError {
                name: "GESS_SESSION_TIMEOUT_SECS".to_string(),
                value: timeout,
            })?;
            self.limits.session_timeout = Duration::from_secs(secs);
        }

        Ok(())
    }

    /// 設定ファイルと環境変数を結合して設定を読み込む
    /// gess.json、config/gess.jsonの順に探し、どちらもなければデフォルト値で動作する
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from_paths(&["gess.json", "config/gess.json"])
    }

    /// 候補のパスを順に探して最初に見つかった設定ファイルを使う
    /// ファイルが存在しない場合だけ次の候補へ進み、壊れたファイルはエラーにする
    pub fn load_from_paths<P: AsRef<Path>>(paths: &[P]) -> Result<Self, ConfigError> {
        let mut config = None;
        for path in paths {
            if let Some(found) = Self::read_if_exists(path.as_ref())? {
                config = Some(found);
                break;
            }
        }
        let mut config = config.unwrap_or_default();

        config.apply_env()?;
        config.validate()?;

        tracing::debug!(?config, "configuration loaded");
        Ok(config)
    }

    fn read_if_exists(path: &Path) -> Result<Option<Self>, ConfigError> {
        match Self::from_file(path) {
            Ok(config) => Ok(Some(config)),
            Err(ConfigError::FileReadError(e)) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// 現在の設定を指定したファイルに保存する
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// 設定値の妥当性をチェックする
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.limits.max_concurrent_games == 0 {
            return Err(ConfigError::InvalidValue {
                field: "limits.max_concurrent_games".to_string(),
                value: self.limits.max_concurrent_games.to_string(),
            });
        }

        if self.limits.session_timeout.is_zero() {
            return Err(ConfigError::InvalidValue {
                field: "limits.session_timeout".to_string(),
                value: format!("{:?}", self.limits.session_timeout),
            });
        }

        Ok(())
    }
}
