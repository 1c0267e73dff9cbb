//! 設定システム統合テスト

use std::{env, fs, time::Duration};
use tempfile::TempDir;

use gess::{
    config::{Config, ConfigError, RulesConfig, StampPolicy, SystemLimits},
    session::GameSessionManager,
};

fn create_test_config() -> Config {
    Config {
        rules: RulesConfig {
            stamp_policy: StampPolicy::FullFootprint,
        },
        limits: SystemLimits {
            max_concurrent_games: 8,
            session_timeout: Duration::from_secs(90),
        },
    }
}

#[test]
fn test_config_serialization_deserialization() {
    let config = create_test_config();

    let json_str = serde_json::to_string_pretty(&config).unwrap();
    assert!(json_str.contains("FullFootprint"));
    assert!(json_str.contains("max_concurrent_games"));

    let deserialized: Config = serde_json::from_str(&json_str).unwrap();
    assert_eq!(deserialized.rules.stamp_policy, StampPolicy::FullFootprint);
    assert_eq!(deserialized.limits.max_concurrent_games, 8);
    assert_eq!(deserialized.limits.session_timeout, Duration::from_secs(90));
}

#[test]
fn test_config_file_operations() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("gess.json");

    let original_config = create_test_config();

    // ファイルに保存
    original_config.save_to_file(&config_path).unwrap();
    assert!(config_path.exists());

    // ファイルから読み込み
    let loaded_config = Config::from_file(&config_path).unwrap();
    assert_eq!(loaded_config.rules, original_config.rules);
    assert_eq!(
        loaded_config.limits.session_timeout,
        original_config.limits.session_timeout
    );
}

#[test]
fn test_config_file_errors() {
    let temp_dir = TempDir::new().unwrap();

    let missing = Config::from_file(temp_dir.path().join("missing.json"));
    assert!(matches!(missing, Err(ConfigError::FileReadError(_))));

    let broken_path = temp_dir.path().join("broken.json");
    fs::write(&broken_path, "{ not json").unwrap();
    let broken = Config::from_file(&broken_path);
    assert!(matches!(broken, Err(ConfigError::ParseError(_))));
}

#[test]
fn test_config_validation() {
    let mut config = Config::default();

    // 有効な設定
    assert!(config.validate().is_ok());

    // 無効な対局数
    config.limits.max_concurrent_games = 0;
    assert!(config.validate().is_err());

    // 無効なタイムアウト
    config.limits.max_concurrent_games = 10;
    config.limits.session_timeout = Duration::ZERO;
    assert!(config.validate().is_err());
}

/// 環境変数はプロセス全体で共有されるため、1つのテストにまとめる
#[test]
fn test_env_var_config_loading() {
    env::set_var("GESS_STAMP_POLICY", "full_footprint");
    env::set_var("GESS_MAX_CONCURRENT_GAMES", "25");
    env::set_var("GESS_SESSION_TIMEOUT_SECS", "120");

    let config = Config::from_env().unwrap();
    assert_eq!(config.rules.stamp_policy, StampPolicy::FullFootprint);
    assert_eq!(config.limits.max_concurrent_games, 25);
    assert_eq!(config.limits.session_timeout, Duration::from_secs(120));

    env::set_var("GESS_MAX_CONCURRENT_GAMES", "many");
    let result = Config::from_env();
    assert!(matches!(result, Err(ConfigError::EnvVarError { name, .. }) if name == "GESS_MAX_CONCURRENT_GAMES"));
    env::remove_var("GESS_MAX_CONCURRENT_GAMES");

    env::set_var("GESS_STAMP_POLICY", "sideways");
    assert!(matches!(Config::from_env(), Err(ConfigError::EnvVarError { .. })));

    env::remove_var("GESS_STAMP_POLICY");
    env::remove_var("GESS_SESSION_TIMEOUT_SECS");

    let config = Config::from_env().unwrap();
    assert_eq!(config.rules.stamp_policy, StampPolicy::OccupiedOnly);
}

#[test]
fn test_session_manager_from_loaded_config() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("gess.json");
    create_test_config().save_to_file(&config_path).unwrap();

    let config = Config::from_file(&config_path).unwrap();
    let manager = GameSessionManager::from_config(&config);

    let game_id = manager.create_game().unwrap();
    let game = manager.get_game(&game_id).unwrap();
    assert_eq!(game.rules().stamp_policy, StampPolicy::FullFootprint);
}
