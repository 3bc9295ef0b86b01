//! 認識結果とテキスト出力

use crate::error::{Error, Result};

/// 1ページ分（= 画像1枚分）の認識テキスト
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    /// 1始まり
    pub number: usize,
    pub text: String,
}

impl Page {
    pub fn header(&self) -> String {
        format!("--- Page {} ---", self.number)
    }
}

/// 1回の実行の結果。入力ファイル順。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecognitionResult {
    pages: Vec<Page>,
}

impl RecognitionResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// 次のページとして追加
    pub fn push(&mut self, text: impl Into<String>) {
        let number = self.pages.len() + 1;
        self.pages.push(Page {
            number,
            text: text.into(),
        });
    }

    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// 出力欄に表示するテキスト
    ///
    /// 各ページを `--- Page N ---\n\n<text>\n\n` で連結し、最後に一度だけtrimする。
    /// ページ単位のtrimはしない。
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        for page in &self.pages {
            out.push_str(&page.header());
            out.push_str("\n\n");
            out.push_str(&page.text);
            out.push_str("\n\n");
        }
        out.trim().to_string()
    }
}

/// ダウンロード用のテキストファイル
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextExport {
    pub file_name: String,
    pub mime_type: &'static str,
    pub contents: String,
}

impl TextExport {
    pub const MIME_TYPE: &'static str = "text/plain";

    /// 空白のみのテキストは出力しない
    pub fn new(file_name: impl Into<String>, contents: &str) -> Result<Self> {
        if contents.trim().is_empty() {
            return Err(Error::NothingToDownload);
        }
        Ok(Self {
            file_name: file_name.into(),
            mime_type: Self::MIME_TYPE,
            contents: contents.to_string(),
        })
    }
}
