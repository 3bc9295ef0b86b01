//! エラー型定義

use thiserror::Error;

/// 共通エラー型
///
/// ユーザー入力系（`NoImages` / `NothingToDownload` / `NothingToCopy`）の
/// Display はそのままアラート文言として使う。
#[derive(Error, Debug)]
pub enum Error {
    #[error("Please upload at least one image.")]
    NoImages,

    #[error("No text to download!")]
    NothingToDownload,

    #[error("No text to copy!")]
    NothingToCopy,

    #[error("Extraction is already running")]
    RunInProgress,

    #[error("Recognition engine error: {0}")]
    Engine(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Storage error: {0}")]
    Storage(String),
}

impl Error {
    /// ユーザー操作の前提条件違反か（アラート表示のみで終わるもの）
    pub fn is_user_input(&self) -> bool {
        matches!(
            self,
            Error::NoImages | Error::NothingToDownload | Error::NothingToCopy | Error::RunInProgress
        )
    }
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_user_input() {
        assert_eq!(Error::NoImages.to_string(), "Please upload at least one image.");
        assert_eq!(Error::NothingToDownload.to_string(), "No text to download!");
        assert_eq!(Error::NothingToCopy.to_string(), "No text to copy!");
    }

    #[test]
    fn test_error_display_engine() {
        let error = Error::Engine("worker crashed".to_string());
        assert_eq!(format!("{}", error), "Recognition engine error: worker crashed");
    }

    #[test]
    fn test_error_display_json() {
        let json_error = serde_json::from_str::<serde_json::Value>("invalid json").unwrap_err();
        let error = Error::Json(json_error);
        assert!(format!("{}", error).contains("JSON error"));
    }

    #[test]
    fn test_error_from_json() {
        let json_error = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let error: Error = json_error.into();
        assert!(matches!(error, Error::Json(_)));
    }

    #[test]
    fn test_is_user_input() {
        assert!(Error::NoImages.is_user_input());
        assert!(Error::NothingToCopy.is_user_input());
        assert!(!Error::Engine("x".into()).is_user_input());
        assert!(!Error::Storage("x".into()).is_user_input());
    }

    #[test]
    fn test_error_debug() {
        let error = Error::Config("missing languages".to_string());
        let debug = format!("{:?}", error);
        assert!(debug.contains("Config"));
        assert!(debug.contains("missing languages"));
    }
}
