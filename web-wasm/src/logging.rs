//! ログ出力（tracing → ブラウザコンソール）

use std::io::{self, Write};
use tracing::{Level, Metadata};
use tracing_subscriber::fmt::MakeWriter;

/// 1イベント分をバッファし、drop時にレベルに応じたconsole関数へ出す
pub struct ConsoleWriter {
    level: Level,
    buffer: Vec<u8>,
    #[cfg(test)]
    emitted: std::rc::Rc<std::cell::RefCell<Vec<String>>>,
}

impl ConsoleWriter {
    fn new(level: Level) -> Self {
        Self {
            level,
            buffer: Vec::new(),
            #[cfg(test)]
            emitted: Default::default(),
        }
    }
}

impl Write for ConsoleWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buffer.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        if self.buffer.is_empty() {
            return Ok(());
        }
        let line = String::from_utf8_lossy(&self.buffer);
        let line = line.trim_end();
        #[cfg(test)]
        self.emitted.borrow_mut().push(line.to_string());
        emit(self.level, line);
        self.buffer.clear();
        Ok(())
    }
}

impl Drop for ConsoleWriter {
    fn drop(&mut self) {
        let _ = self.flush();
    }
}

#[cfg(target_arch = "wasm32")]
fn emit(level: Level, line: &str) {
    let value = wasm_bindgen::JsValue::from_str(line);
    match level {
        Level::ERROR => web_sys::console::error_1(&value),
        Level::WARN => web_sys::console::warn_1(&value),
        Level::INFO => web_sys::console::info_1(&value),
        _ => web_sys::console::debug_1(&value),
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn emit(_level: Level, line: &str) {
    eprintln!("{}", line);
}

#[derive(Debug, Clone, Copy, Default)]
pub struct MakeConsoleWriter;

impl<'a> MakeWriter<'a> for MakeConsoleWriter {
    type Writer = ConsoleWriter;

    fn make_writer(&'a self) -> Self::Writer {
        ConsoleWriter::new(Level::INFO)
    }

    fn make_writer_for(&'a self, meta: &Metadata<'_>) -> Self::Writer {
        ConsoleWriter::new(*meta.level())
    }
}

/// 起動時に1回だけ呼ぶ
pub fn init() {
    let result = tracing_subscriber::fmt()
        .with_writer(MakeConsoleWriter)
        .without_time()
        .with_target(false)
        .with_max_level(Level::DEBUG)
        .try_init();
    if result.is_err() {
        web_sys::console::warn_1(&"tracing subscriber already installed".into());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flush_emits_one_trimmed_line() {
        let mut writer = ConsoleWriter::new(Level::WARN);
        let emitted = writer.emitted.clone();
        write!(writer, "WARN thumbnail not loaded index=2").expect("書き込み失敗");
        writer.write_all(b"\n").expect("書き込み失敗");
        writer.flush().expect("flush失敗");

        assert_eq!(*emitted.borrow(), vec!["WARN thumbnail not loaded index=2".to_string()]);
    }

    #[test]
    fn test_flush_then_drop_emits_once() {
        let writer = ConsoleWriter::new(Level::INFO);
        let emitted = writer.emitted.clone();
        {
            let mut writer = writer;
            writer.write_all(b"INFO extraction finished\n").expect("書き込み失敗");
            writer.flush().expect("flush失敗");
        }

        assert_eq!(emitted.borrow().len(), 1);
        assert_eq!(emitted.borrow()[0], "INFO extraction finished");
    }

    #[test]
    fn test_drop_flushes_unflushed_buffer() {
        let mut writer = ConsoleWriter::new(Level::DEBUG);
        let emitted = writer.emitted.clone();
        writer.write_all(b"DEBUG selection applied count=3\n").expect("書き込み失敗");
        drop(writer);

        assert_eq!(*emitted.borrow(), vec!["DEBUG selection applied count=3".to_string()]);
    }

    #[test]
    fn test_empty_buffer_emits_nothing() {
        let mut writer = ConsoleWriter::new(Level::ERROR);
        let emitted = writer.emitted.clone();
        writer.flush().expect("flush失敗");
        drop(writer);

        assert!(emitted.borrow().is_empty());
    }

    #[test]
    fn test_default_writer_level_is_info() {
        let make = MakeConsoleWriter;
        assert_eq!(make.make_writer().level, Level::INFO);
    }
}
