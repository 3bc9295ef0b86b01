//! アプリ設定
//!
//! Web版は `config/app-config.json` を埋め込み、ここでパースする。
//! 欠けたキーはデフォルト値で補う。

use crate::error::{Error, Result};
use crate::engine::LanguageCode;
use serde::{Deserialize, Serialize};

/// 言語セレクタの選択肢
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageOption {
    pub code: String,
    pub label: String,
}

impl LanguageOption {
    fn new(code: &str, label: &str) -> Self {
        Self {
            code: code.to_string(),
            label: label.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AppConfig {
    pub default_language: String,
    pub languages: Vec<LanguageOption>,
    /// サムネイル拡大までのホバー時間
    pub hover_delay_ms: u32,
    pub export_file_name: String,
    pub theme_storage_key: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            default_language: "eng".into(),
            languages: vec![
                LanguageOption::new("eng", "English"),
                LanguageOption::new("spa", "Spanish"),
                LanguageOption::new("fra", "French"),
                LanguageOption::new("deu", "German"),
                LanguageOption::new("ita", "Italian"),
                LanguageOption::new("por", "Portuguese"),
                LanguageOption::new("rus", "Russian"),
                LanguageOption::new("ara", "Arabic"),
                LanguageOption::new("hin", "Hindi"),
                LanguageOption::new("jpn", "Japanese"),
                LanguageOption::new("chi_sim", "Chinese (Simplified)"),
                LanguageOption::new("kor", "Korean"),
            ],
            hover_delay_ms: 1000,
            export_file_name: "extracted_text.txt".into(),
            theme_storage_key: "theme".into(),
        }
    }
}

impl AppConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        let config: AppConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.languages.is_empty() {
            return Err(Error::Config("languages must not be empty".into()));
        }
        if !self.languages.iter().any(|l| l.code == self.default_language) {
            return Err(Error::Config(format!(
                "default language '{}' is not in the language list",
                self.default_language
            )));
        }
        if self.export_file_name.trim().is_empty() {
            return Err(Error::Config("exportFileName must not be empty".into()));
        }
        Ok(())
    }

    pub fn default_language_code(&self) -> LanguageCode {
        LanguageCode::new(self.default_language.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.hover_delay_ms, 1000);
        assert_eq!(config.export_file_name, "extracted_text.txt");
        assert_eq!(config.theme_storage_key, "theme");
        assert_eq!(config.default_language_code().as_str(), "eng");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_json_partial_uses_defaults() {
        let config = AppConfig::from_json(r#"{ "hoverDelayMs": 750 }"#).expect("パース失敗");
        assert_eq!(config.hover_delay_ms, 750);
        assert_eq!(config.export_file_name, "extracted_text.txt");
        assert!(config.languages.iter().any(|l| l.code == "eng"));
    }

    #[test]
    fn test_from_json_custom_languages() {
        let json = r#"{
            "defaultLanguage": "jpn",
            "languages": [
                { "code": "jpn", "label": "Japanese" },
                { "code": "eng", "label": "English" }
            ]
        }"#;
        let config = AppConfig::from_json(json).expect("パース失敗");
        assert_eq!(config.languages.len(), 2);
        assert_eq!(config.default_language_code().as_str(), "jpn");
    }

    #[test]
    fn test_from_json_unknown_default_language() {
        let json = r#"{
            "defaultLanguage": "xyz",
            "languages": [{ "code": "eng", "label": "English" }]
        }"#;
        let err = AppConfig::from_json(json).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_from_json_invalid() {
        let err = AppConfig::from_json("{ not json").unwrap_err();
        assert!(matches!(err, Error::Json(_)));
    }
}
