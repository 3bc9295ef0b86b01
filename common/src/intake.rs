//! ファイル取り込み
//!
//! ファイル選択・フォルダ選択・ドロップのいずれから来た候補も、
//! `image/` で始まるMIMEタイプだけを入力順のまま残す。

/// 取り込んだ画像1枚
///
/// `handle` はプラットフォーム側のBlob（Web版では `web_sys::File`）。
/// 中身には触れない。
#[derive(Debug, Clone, PartialEq)]
pub struct ImageFile<H> {
    pub name: String,
    pub media_type: String,
    pub handle: H,
}

impl<H> ImageFile<H> {
    pub fn new(name: impl Into<String>, media_type: impl Into<String>, handle: H) -> Self {
        Self {
            name: name.into(),
            media_type: media_type.into(),
            handle,
        }
    }

    pub fn is_image(&self) -> bool {
        self.media_type.starts_with("image/")
    }
}

/// アップロード方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UploadMode {
    #[default]
    Images,
    Folder,
}

impl UploadMode {
    /// 未選択時のピッカーボタン表記
    pub fn picker_label(&self) -> &'static str {
        match self {
            UploadMode::Images => "Select Images",
            UploadMode::Folder => "Select Folder",
        }
    }

    /// ピッカーにディレクトリ選択（webkitdirectory）を許可するか
    pub fn accepts_directory(&self) -> bool {
        matches!(self, UploadMode::Folder)
    }

    /// 複数選択はどちらのモードでも可
    pub fn allows_multiple(&self) -> bool {
        true
    }
}

/// 画像以外を落とす。順序は入力順のまま、重複も残す。
pub fn filter_images<H, I>(candidates: I) -> Vec<ImageFile<H>>
where
    I: IntoIterator<Item = ImageFile<H>>,
{
    let mut dropped = 0usize;
    let kept: Vec<ImageFile<H>> = candidates
        .into_iter()
        .filter(|f| {
            let keep = f.is_image();
            if !keep {
                dropped += 1;
            }
            keep
        })
        .collect();
    if dropped > 0 {
        tracing::debug!(kept = kept.len(), dropped, "non-image files dropped");
    }
    kept
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(name: &str, media_type: &str) -> ImageFile<()> {
        ImageFile::new(name, media_type, ())
    }

    #[test]
    fn test_filter_images_keeps_order() {
        let kept = filter_images(vec![
            file("b.png", "image/png"),
            file("notes.txt", "text/plain"),
            file("a.jpg", "image/jpeg"),
            file("doc.pdf", "application/pdf"),
            file("c.webp", "image/webp"),
        ]);
        let names: Vec<&str> = kept.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["b.png", "a.jpg", "c.webp"]);
    }

    #[test]
    fn test_filter_images_allows_duplicates() {
        let kept = filter_images(vec![file("a.png", "image/png"), file("a.png", "image/png")]);
        assert_eq!(kept.len(), 2);
    }

    #[test]
    fn test_filter_images_empty_media_type_dropped() {
        // フォルダ選択では拡張子不明ファイルのtypeが空文字になる
        let kept = filter_images(vec![file("README", ""), file("imagefile", "imagex/png")]);
        assert!(kept.is_empty());
    }

    #[test]
    fn test_upload_mode_labels() {
        assert_eq!(UploadMode::Images.picker_label(), "Select Images");
        assert_eq!(UploadMode::Folder.picker_label(), "Select Folder");
        assert!(UploadMode::Folder.accepts_directory());
        assert!(!UploadMode::Images.accepts_directory());
        assert!(UploadMode::Images.allows_multiple() && UploadMode::Folder.allows_multiple());
    }
}
