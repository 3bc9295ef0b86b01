//! Batch OCR Common Library
//!
//! Web(WASM)版から使う、プラットフォーム非依存の状態管理と認識の段取り。
//! OCRエンジン本体は [`engine::RecognitionEngine`] の向こう側にある。

pub mod config;
pub mod engine;
pub mod error;
pub mod intake;
pub mod orchestrator;
pub mod preview;
pub mod progress;
pub mod result;
pub mod session;
pub mod theme;

pub use config::{AppConfig, LanguageOption};
pub use engine::{EngineEvent, EngineFactory, EngineStatus, EventSink, LanguageCode, RecognitionEngine};
pub use error::{Error, Result};
pub use intake::{filter_images, ImageFile, UploadMode};
pub use orchestrator::{run_recognition, RunEvent, RunObserver};
pub use preview::{HoverTicket, ThumbnailSet, ZoomOverlay};
pub use progress::{ProgressState, ProgressTracker};
pub use result::{Page, RecognitionResult, TextExport};
pub use session::{Affordances, RunState, Session, ThumbnailJob};
pub use theme::{MemoryStore, PreferenceStore, ThemePreference, ThemeState};
