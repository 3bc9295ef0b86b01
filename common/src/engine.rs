//! 認識エンジン境界
//!
//! OCRエンジン本体（Web版ではTesseract.js）は外部。ここではオーケストレータが
//! 依存する契約だけを定義する:
//! - ファクトリは進捗イベントの受け口（[`EventSink`]）を受け取って生成
//! - 言語ロード → 初期化 → 1ファイルずつ認識 → 終了

use crate::error::Result;
use crate::intake::ImageFile;
use async_trait::async_trait;
use std::fmt;
use std::rc::Rc;

/// 言語コード（"eng", "jpn" など）。語彙はエンジン側が決めるので中身は見ない。
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LanguageCode(String);

impl LanguageCode {
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LanguageCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// エンジンが報告するステータス
#[derive(Debug, Clone, PartialEq)]
pub enum EngineStatus {
    Loading,
    Initializing,
    Recognizing,
    Other(String),
}

impl EngineStatus {
    /// エンジンのステータスタグを分類する
    ///
    /// Tesseract.jsは "loading tesseract core" / "initializing api" /
    /// "recognizing text" のような文を送ってくるので先頭語で判定する。
    pub fn from_tag(tag: &str) -> Self {
        let tag = tag.trim().to_ascii_lowercase();
        if tag.starts_with("recognizing") {
            EngineStatus::Recognizing
        } else if tag.starts_with("loading") {
            EngineStatus::Loading
        } else if tag.starts_with("initializ") {
            EngineStatus::Initializing
        } else {
            EngineStatus::Other(tag)
        }
    }

    pub fn label(&self) -> &str {
        match self {
            EngineStatus::Loading => "Loading",
            EngineStatus::Initializing => "Initializing",
            EngineStatus::Recognizing => "Recognizing",
            EngineStatus::Other(tag) => tag.as_str(),
        }
    }
}

/// 進捗イベント。`progress` は認識中のファイル単体の進捗 [0, 1]。
#[derive(Debug, Clone, PartialEq)]
pub struct EngineEvent {
    pub status: EngineStatus,
    pub progress: f32,
}

impl EngineEvent {
    pub fn new(status: EngineStatus, progress: f32) -> Self {
        Self { status, progress }
    }

    pub fn from_tag(tag: &str, progress: f64) -> Self {
        let progress = if progress.is_finite() {
            progress.clamp(0.0, 1.0) as f32
        } else {
            0.0
        };
        Self::new(EngineStatus::from_tag(tag), progress)
    }
}

/// エンジン → オーケストレータの進捗通知先
pub type EventSink = Rc<dyn Fn(EngineEvent)>;

/// 生成済みエンジンインスタンス
#[async_trait(?Send)]
pub trait RecognitionEngine {
    /// 認識対象のBlob型
    type Handle: 'static;

    async fn load_language(&mut self, language: &LanguageCode) -> Result<()>;

    async fn initialize(&mut self, language: &LanguageCode) -> Result<()>;

    /// 1ファイルを認識してテキストを返す
    async fn recognize(&mut self, image: &ImageFile<Self::Handle>) -> Result<String>;

    /// リソースを解放する。以後このインスタンスは使わない。
    async fn terminate(&mut self) -> Result<()>;
}

/// エンジン生成
#[async_trait(?Send)]
pub trait EngineFactory {
    type Engine: RecognitionEngine;

    async fn create(&self, events: EventSink) -> Result<Self::Engine>;
}

/// ファクトリが扱うBlob型
pub type HandleOf<F> = <<F as EngineFactory>::Engine as RecognitionEngine>::Handle;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_from_tesseract_tags() {
        assert_eq!(EngineStatus::from_tag("recognizing text"), EngineStatus::Recognizing);
        assert_eq!(EngineStatus::from_tag("loading tesseract core"), EngineStatus::Loading);
        assert_eq!(EngineStatus::from_tag("loading language traineddata"), EngineStatus::Loading);
        assert_eq!(EngineStatus::from_tag("initializing api"), EngineStatus::Initializing);
        assert_eq!(EngineStatus::from_tag("initialized tesseract"), EngineStatus::Initializing);
    }

    #[test]
    fn test_status_plain_tags() {
        assert_eq!(EngineStatus::from_tag("loading"), EngineStatus::Loading);
        assert_eq!(EngineStatus::from_tag("Initializing"), EngineStatus::Initializing);
        assert_eq!(
            EngineStatus::from_tag("terminated"),
            EngineStatus::Other("terminated".into())
        );
    }

    #[test]
    fn test_event_progress_clamped() {
        assert_eq!(EngineEvent::from_tag("recognizing text", 1.7).progress, 1.0);
        assert_eq!(EngineEvent::from_tag("recognizing text", -0.2).progress, 0.0);
        assert_eq!(EngineEvent::from_tag("recognizing text", f64::NAN).progress, 0.0);
    }

    #[test]
    fn test_language_code_is_opaque() {
        let code = LanguageCode::new("chi_sim");
        assert_eq!(code.as_str(), "chi_sim");
        assert_eq!(code.to_string(), "chi_sim");
    }
}
