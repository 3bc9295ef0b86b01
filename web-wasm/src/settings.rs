//! 埋め込み設定の読み込み

use batch_ocr_common::AppConfig;

const APP_CONFIG_JSON: &str = include_str!("../config/app-config.json");

/// `config/app-config.json` を読む。壊れていればデフォルト。
pub fn load() -> AppConfig {
    match AppConfig::from_json(APP_CONFIG_JSON) {
        Ok(config) => config,
        Err(e) => {
            tracing::warn!(error = %e, "invalid app config, using defaults");
            AppConfig::default()
        }
    }
}
