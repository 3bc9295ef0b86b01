//! 認識オーケストレータ
//!
//! エンジンを1つ生成し、ファイルを入力順に1枚ずつ認識する。
//! 同時に走る認識呼び出しは常に1つ。中断・タイムアウトはない。
//!
//! 進捗・完了・失敗は [`RunEvent`] としてオブザーバに流す。
//! エンジン呼び出しの失敗は `Failed` として通知し、エンジンは必ず終了させる。

use crate::engine::{EngineFactory, EventSink, HandleOf, LanguageCode, RecognitionEngine};
use crate::error::{Error, Result};
use crate::intake::ImageFile;
use crate::progress::{ProgressState, ProgressTracker};
use crate::result::RecognitionResult;
use std::cell::RefCell;
use std::rc::Rc;
use tracing::{debug, info, warn};

/// 実行中にUIへ流すイベント
#[derive(Debug, Clone, PartialEq)]
pub enum RunEvent {
    Started { total: usize },
    Progress(ProgressState),
    Completed { result: RecognitionResult, total: usize },
    Failed { message: String },
}

pub type RunObserver = Rc<dyn Fn(RunEvent)>;

/// 完了時のステータス文言
pub fn completion_message(total: usize) -> String {
    format!("Extraction complete! Extracted text from {} images.", total)
}

/// 失敗時のステータス文言
pub fn failure_message(error: &Error) -> String {
    format!("Extraction failed: {}", error)
}

/// 全ファイルを認識して結果を返す
///
/// `files` が空なら何も生成せず `Error::NoImages` を返す（イベントも流さない）。
pub async fn run_recognition<F>(
    factory: &F,
    files: &[ImageFile<HandleOf<F>>],
    language: &LanguageCode,
    observer: RunObserver,
) -> Result<RecognitionResult>
where
    F: EngineFactory,
{
    if files.is_empty() {
        return Err(Error::NoImages);
    }

    let total = files.len();
    info!(total, language = %language, "recognition started");
    observer(RunEvent::Started { total });

    let tracker = Rc::new(RefCell::new(ProgressTracker::new(total)));
    let sink: EventSink = {
        let tracker = Rc::clone(&tracker);
        let observer = Rc::clone(&observer);
        Rc::new(move |event| {
            let update = tracker.borrow_mut().on_event(&event);
            if let Some(progress) = update {
                observer(RunEvent::Progress(progress));
            }
        })
    };

    let mut engine = match factory.create(sink).await {
        Ok(engine) => engine,
        Err(e) => {
            warn!(error = %e, "engine creation failed");
            observer(RunEvent::Failed {
                message: failure_message(&e),
            });
            return Err(e);
        }
    };

    let outcome = recognize_all(&mut engine, files, language, &tracker, &observer).await;

    // 成否に関わらずエンジンは解放する
    if let Err(e) = engine.terminate().await {
        warn!(error = %e, "engine termination failed");
    }

    match outcome {
        Ok(result) => {
            info!(pages = result.len(), "recognition completed");
            observer(RunEvent::Completed {
                result: result.clone(),
                total,
            });
            Ok(result)
        }
        Err(e) => {
            warn!(error = %e, "recognition failed");
            observer(RunEvent::Failed {
                message: failure_message(&e),
            });
            Err(e)
        }
    }
}

async fn recognize_all<E>(
    engine: &mut E,
    files: &[ImageFile<E::Handle>],
    language: &LanguageCode,
    tracker: &Rc<RefCell<ProgressTracker>>,
    observer: &RunObserver,
) -> Result<RecognitionResult>
where
    E: RecognitionEngine,
{
    engine.load_language(language).await?;
    engine.initialize(language).await?;

    let mut result = RecognitionResult::new();
    for (index, file) in files.iter().enumerate() {
        debug!(index, name = %file.name, "recognizing");
        tracker.borrow_mut().begin_file(index);
        let text = engine.recognize(file).await?;
        result.push(text);
        let progress = tracker.borrow_mut().finish_file();
        observer(RunEvent::Progress(progress));
    }
    Ok(result)
}
