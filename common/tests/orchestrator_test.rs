//! 認識オーケストレータのテスト
//!
//! 台本どおりに進捗を流す偽エンジンで、実行順序・進捗・失敗時の扱いを検証

use async_trait::async_trait;
use batch_ocr_common::{
    run_recognition, EngineEvent, EngineFactory, EngineStatus, Error, EventSink, ImageFile,
    LanguageCode, RecognitionEngine, Result, RunEvent, RunObserver, RunState, Session,
};
use futures::executor::block_on;
use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// 偽エンジンの呼び出し記録
#[derive(Default)]
struct CallLog {
    calls: RefCell<Vec<String>>,
    created: Cell<usize>,
}

impl CallLog {
    fn push(&self, call: impl Into<String>) {
        self.calls.borrow_mut().push(call.into());
    }

    fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }
}

#[derive(Clone, Copy, PartialEq)]
enum FailAt {
    Nowhere,
    Create,
    Initialize,
    Recognize(usize),
}

struct FakeFactory {
    log: Rc<CallLog>,
    fail_at: FailAt,
}

impl FakeFactory {
    fn new(fail_at: FailAt) -> Self {
        Self {
            log: Rc::new(CallLog::default()),
            fail_at,
        }
    }
}

struct FakeEngine {
    log: Rc<CallLog>,
    events: EventSink,
    fail_at: FailAt,
    recognized: usize,
}

#[async_trait(?Send)]
impl EngineFactory for FakeFactory {
    type Engine = FakeEngine;

    async fn create(&self, events: EventSink) -> Result<FakeEngine> {
        if self.fail_at == FailAt::Create {
            return Err(Error::Engine("worker script failed to load".into()));
        }
        self.log.created.set(self.log.created.get() + 1);
        self.log.push("create");
        Ok(FakeEngine {
            log: Rc::clone(&self.log),
            events,
            fail_at: self.fail_at,
            recognized: 0,
        })
    }
}

#[async_trait(?Send)]
impl RecognitionEngine for FakeEngine {
    type Handle = String;

    async fn load_language(&mut self, language: &LanguageCode) -> Result<()> {
        self.log.push(format!("load_language:{}", language));
        (self.events)(EngineEvent::from_tag("loading language traineddata", 0.0));
        (self.events)(EngineEvent::from_tag("loading language traineddata", 1.0));
        Ok(())
    }

    async fn initialize(&mut self, language: &LanguageCode) -> Result<()> {
        self.log.push(format!("initialize:{}", language));
        (self.events)(EngineEvent::from_tag("initializing api", 0.0));
        if self.fail_at == FailAt::Initialize {
            return Err(Error::Engine(format!("unsupported language: {}", language)));
        }
        Ok(())
    }

    async fn recognize(&mut self, image: &ImageFile<String>) -> Result<String> {
        self.log.push(format!("recognize:{}", image.name));
        for p in [0.0, 0.25, 0.5, 1.0] {
            (self.events)(EngineEvent::new(EngineStatus::Recognizing, p));
        }
        if self.fail_at == FailAt::Recognize(self.recognized) {
            return Err(Error::Engine("recognition failed".into()));
        }
        self.recognized += 1;
        Ok(image.handle.clone())
    }

    async fn terminate(&mut self) -> Result<()> {
        self.log.push("terminate");
        Ok(())
    }
}

fn image(name: &str, text: &str) -> ImageFile<String> {
    ImageFile::new(name, "image/png", text.to_string())
}

fn recording_observer() -> (RunObserver, Rc<RefCell<Vec<RunEvent>>>) {
    let events = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&events);
    let observer: RunObserver = Rc::new(move |event| sink.borrow_mut().push(event));
    (observer, events)
}

fn progress_fractions(events: &[RunEvent]) -> Vec<f32> {
    events
        .iter()
        .filter_map(|e| match e {
            RunEvent::Progress(p) => Some(p.fraction),
            _ => None,
        })
        .collect()
}

/// 2枚・英語の通し実行
#[test]
fn test_two_images_end_to_end() {
    let factory = FakeFactory::new(FailAt::Nowhere);
    let (observer, events) = recording_observer();
    let files = vec![image("scan1.png", "Hello world\n"), image("scan2.jpg", "Second page")];

    let result = block_on(run_recognition(
        &factory,
        &files,
        &LanguageCode::new("eng"),
        observer,
    ))
    .expect("認識失敗");

    assert_eq!(
        result.to_text(),
        "--- Page 1 ---\n\nHello world\n\n\n--- Page 2 ---\n\nSecond page"
    );

    let events = events.borrow();
    assert!(matches!(events.first(), Some(RunEvent::Started { total: 2 })));
    assert!(matches!(events.last(), Some(RunEvent::Completed { total: 2, .. })));

    let fractions = progress_fractions(&events);
    assert!(fractions.windows(2).all(|w| w[0] <= w[1]), "進捗が減少: {:?}", fractions);
    assert_eq!(*fractions.last().expect("進捗なし"), 1.0);
    // 1.0は最後のファイル完了時の1回だけ
    assert_eq!(fractions.iter().filter(|f| **f >= 1.0).count(), 1);
}

/// 呼び出し順序: 言語ロード → 初期化 → 入力順に認識 → 終了
#[test]
fn test_call_order() {
    let factory = FakeFactory::new(FailAt::Nowhere);
    let (observer, _) = recording_observer();
    let files = vec![image("b.png", "b"), image("a.png", "a"), image("b.png", "b")];

    block_on(run_recognition(&factory, &files, &LanguageCode::new("deu"), observer))
        .expect("認識失敗");

    assert_eq!(
        factory.log.calls(),
        vec![
            "create",
            "load_language:deu",
            "initialize:deu",
            "recognize:b.png",
            "recognize:a.png",
            "recognize:b.png",
            "terminate",
        ]
    );
    assert_eq!(factory.log.created.get(), 1);
}

/// 0枚ならエンジンを生成しない
#[test]
fn test_no_files_creates_no_engine() {
    let factory = FakeFactory::new(FailAt::Nowhere);
    let (observer, events) = recording_observer();

    let err = block_on(run_recognition(&factory, &[], &LanguageCode::new("eng"), observer))
        .unwrap_err();

    assert!(matches!(err, Error::NoImages));
    assert_eq!(factory.log.created.get(), 0);
    assert!(events.borrow().is_empty());
}

/// 認識失敗で残りを打ち切り、エンジンは終了させる
#[test]
fn test_recognition_failure_terminates_engine() {
    let factory = FakeFactory::new(FailAt::Recognize(1));
    let (observer, events) = recording_observer();
    let files = vec![image("1.png", "one"), image("2.png", "two"), image("3.png", "three")];

    let err = block_on(run_recognition(&factory, &files, &LanguageCode::new("eng"), observer))
        .unwrap_err();

    assert!(matches!(err, Error::Engine(_)));
    let calls = factory.log.calls();
    assert!(!calls.contains(&"recognize:3.png".to_string()));
    assert_eq!(calls.last().map(String::as_str), Some("terminate"));

    match events.borrow().last() {
        Some(RunEvent::Failed { message }) => {
            assert_eq!(message, "Extraction failed: Recognition engine error: recognition failed");
        }
        other => panic!("Failedイベントが来ていない: {:?}", other),
    };
}

/// 未対応言語（初期化失敗）
#[test]
fn test_initialize_failure() {
    let factory = FakeFactory::new(FailAt::Initialize);
    let (observer, events) = recording_observer();
    let files = vec![image("1.png", "one")];

    let err = block_on(run_recognition(&factory, &files, &LanguageCode::new("xxx"), observer))
        .unwrap_err();

    assert!(err.to_string().contains("unsupported language: xxx"));
    assert!(!factory.log.calls().iter().any(|c| c.starts_with("recognize")));
    assert_eq!(factory.log.calls().last().map(String::as_str), Some("terminate"));
    assert!(matches!(events.borrow().last(), Some(RunEvent::Failed { .. })));
}

/// 生成失敗時は終了処理するインスタンスがない
#[test]
fn test_create_failure() {
    let factory = FakeFactory::new(FailAt::Create);
    let (observer, events) = recording_observer();
    let files = vec![image("1.png", "one")];

    let result = block_on(run_recognition(&factory, &files, &LanguageCode::new("eng"), observer));

    assert!(result.is_err());
    assert!(factory.log.calls().is_empty());
    let events = events.borrow();
    assert_eq!(events.len(), 2);
    assert!(matches!(events[1], RunEvent::Failed { .. }));
}

/// ステータス行: ロード中・初期化中・認識中
#[test]
fn test_status_lines() {
    let factory = FakeFactory::new(FailAt::Nowhere);
    let (observer, events) = recording_observer();
    let files = vec![image("1.png", "one"), image("2.png", "two")];

    block_on(run_recognition(&factory, &files, &LanguageCode::new("eng"), observer))
        .expect("認識失敗");

    let statuses: Vec<String> = events
        .borrow()
        .iter()
        .filter_map(|e| match e {
            RunEvent::Progress(p) => Some(p.status.clone()),
            _ => None,
        })
        .collect();
    assert!(statuses.contains(&"Status: Loading...".to_string()));
    assert!(statuses.contains(&"Status: Initializing...".to_string()));
    assert!(statuses.contains(&"Processing Image 1 of 2... 25.00% done".to_string()));
    assert!(statuses.contains(&"Processing Image 2 of 2... 75.00% done".to_string()));
}

/// セッションに流し込んだ結果: 出力・ボタン状態・ダウンロード内容
#[test]
fn test_session_receives_run_events() {
    let factory = FakeFactory::new(FailAt::Nowhere);
    let session = Rc::new(RefCell::new(Session::new()));
    session
        .borrow_mut()
        .select_files(vec![image("p1.png", "alpha"), image("p2.png", "beta")])
        .expect("選択失敗");
    let files = session.borrow_mut().begin_run().expect("開始失敗");

    let observer: RunObserver = {
        let session = Rc::clone(&session);
        Rc::new(move |event| session.borrow_mut().apply(event))
    };
    block_on(run_recognition(&factory, &files, &LanguageCode::new("eng"), observer))
        .expect("認識失敗");

    let session = session.borrow();
    assert_eq!(session.run_state(), RunState::Completed);
    assert_eq!(session.progress().fraction, 1.0);
    assert_eq!(session.output(), "--- Page 1 ---\n\nalpha\n\n--- Page 2 ---\n\nbeta");

    let affordances = session.affordances();
    assert!(affordances.start_enabled && affordances.copy_enabled && affordances.download_enabled);
    assert!(!affordances.progress_visible);

    let export = session.prepare_download("extracted_text.txt").expect("出力失敗");
    assert_eq!(export.file_name, "extracted_text.txt");
    assert_eq!(export.contents, session.output());
}

/// 失敗後もボタンが戻る
#[test]
fn test_session_after_failure() {
    let factory = FakeFactory::new(FailAt::Recognize(0));
    let session = Rc::new(RefCell::new(Session::new()));
    session
        .borrow_mut()
        .select_files(vec![image("p1.png", "alpha")])
        .expect("選択失敗");
    let files = session.borrow_mut().begin_run().expect("開始失敗");

    let observer: RunObserver = {
        let session = Rc::clone(&session);
        Rc::new(move |event| session.borrow_mut().apply(event))
    };
    let _ = block_on(run_recognition(&factory, &files, &LanguageCode::new("eng"), observer));

    let session = session.borrow();
    assert_eq!(session.run_state(), RunState::Failed);
    let affordances = session.affordances();
    assert!(affordances.start_enabled);
    assert!(!affordances.progress_visible);
    assert!(session.progress().status.starts_with("Extraction failed"));
}
