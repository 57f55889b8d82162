//! テスト用ユーティリティ関数
//!
//! 複数のテストモジュールで使用される共通のヘルパー関数を提供します。
#![cfg(test)]
#![allow(clippy::unwrap_used)]

use std::io::Write;
use std::sync::{
    Arc,
    Mutex,
};

use crate::document::Element;
use crate::input::TranslationTable;

/// en / uk の二言語テーブル（uk には "goodbye" が無い）
pub(crate) fn greetings_table() -> TranslationTable {
    TranslationTable::new()
        .with_language("en", [("hello", "Hello"), ("goodbye", "Goodbye")])
        .with_language("uk", [("hello", "Привіт")])
}

/// `data-translate` 属性を持つ要素を作成する
pub(crate) fn marked_element(key: &str, content: &str) -> Element {
    Element::new("span").with_attribute("data-translate", key).with_content(content)
}

/// WARN 以上の tracing 出力を捕捉しながら `f` を実行する
pub(crate) fn capture_logs<R>(f: impl FnOnce() -> R) -> (R, String) {
    let buffer = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&buffer);
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || LogSink(Arc::clone(&sink)))
        .with_ansi(false)
        .without_time()
        .with_target(false)
        .with_max_level(tracing::Level::WARN)
        .finish();

    let result = tracing::subscriber::with_default(subscriber, f);
    let logs = String::from_utf8(buffer.lock().unwrap().clone()).unwrap();
    (result, logs)
}

struct LogSink(Arc<Mutex<Vec<u8>>>);

impl Write for LogSink {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}
