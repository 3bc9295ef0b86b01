//! Tesseract.js による認識エンジン
//!
//! ワーカー1つ = エンジンインスタンス1つ。進捗は logger コールバックから
//! [`EventSink`] に流す。

use super::js_bindings::{
    create_worker_js, engine_error, initialize_js, load_language_js, recognize_js, terminate_js,
    LoggerMessage,
};
use async_trait::async_trait;
use batch_ocr_common::{
    EngineEvent, EngineFactory, Error, EventSink, ImageFile, LanguageCode, RecognitionEngine,
    Result,
};
use tracing::{debug, info};
use wasm_bindgen::prelude::*;
use web_sys::File;

/// ワーカー生成
#[derive(Debug, Clone, Copy, Default)]
pub struct TesseractFactory;

pub struct TesseractEngine {
    worker: JsValue,
    // ワーカーが生きている間は logger を保持する
    logger: Option<Closure<dyn Fn(JsValue)>>,
}

#[async_trait(?Send)]
impl EngineFactory for TesseractFactory {
    type Engine = TesseractEngine;

    async fn create(&self, events: EventSink) -> Result<TesseractEngine> {
        let logger = Closure::<dyn Fn(JsValue)>::new(move |message: JsValue| {
            match serde_wasm_bindgen::from_value::<LoggerMessage>(message) {
                Ok(message) => events(EngineEvent::from(message)),
                Err(e) => debug!(error = %e, "unrecognized logger message"),
            }
        });

        let worker = create_worker_js(logger.as_ref().unchecked_ref())
            .await
            .map_err(engine_error)?;
        info!("tesseract worker created");

        Ok(TesseractEngine {
            worker,
            logger: Some(logger),
        })
    }
}

#[async_trait(?Send)]
impl RecognitionEngine for TesseractEngine {
    type Handle = File;

    async fn load_language(&mut self, language: &LanguageCode) -> Result<()> {
        load_language_js(&self.worker, language.as_str())
            .await
            .map_err(engine_error)?;
        Ok(())
    }

    async fn initialize(&mut self, language: &LanguageCode) -> Result<()> {
        initialize_js(&self.worker, language.as_str())
            .await
            .map_err(engine_error)?;
        Ok(())
    }

    async fn recognize(&mut self, image: &ImageFile<File>) -> Result<String> {
        let text = recognize_js(&self.worker, &image.handle)
            .await
            .map_err(engine_error)?;
        text.as_string()
            .ok_or_else(|| Error::Engine(format!("no text returned for {}", image.name)))
    }

    async fn terminate(&mut self) -> Result<()> {
        let result = terminate_js(&self.worker).await.map_err(engine_error);
        self.logger = None;
        info!("tesseract worker terminated");
        result.map(|_| ())
    }
}
