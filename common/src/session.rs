//! セッション状態
//!
//! 取り込んだファイル列・プレビュー・出力・実行状態をひとまとめに持つ。
//! ボタンの有効/無効や表示切り替えはすべて [`Session::affordances`] から導出し、
//! 個別のフラグとしては持たない。

use crate::error::{Error, Result};
use crate::intake::{filter_images, ImageFile, UploadMode};
use crate::orchestrator::{completion_message, RunEvent};
use crate::preview::ThumbnailSet;
use crate::progress::ProgressState;
use crate::result::TextExport;

/// 選択直後に出力欄へ出す案内
pub const UPLOADED_PLACEHOLDER: &str = "Images uploaded. Click 'Extract Text' to begin.";

/// 実行状態
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunState {
    #[default]
    Idle,
    Running,
    Completed,
    Failed,
}

impl RunState {
    pub fn is_running(&self) -> bool {
        matches!(self, RunState::Running)
    }
}

/// 画面に反映する派生状態
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Affordances {
    pub start_enabled: bool,
    pub copy_enabled: bool,
    pub download_enabled: bool,
    pub drop_zone_visible: bool,
    pub progress_visible: bool,
    pub status_visible: bool,
    pub previews_visible: bool,
    pub picker_label: String,
    pub preview_toggle_label: &'static str,
    pub start_label: &'static str,
}

/// サムネイル読み込み要求
#[derive(Debug, Clone)]
pub struct ThumbnailJob<H> {
    pub epoch: u64,
    pub index: usize,
    pub handle: H,
}

#[derive(Debug, Clone)]
pub struct Session<H> {
    files: Vec<ImageFile<H>>,
    mode: UploadMode,
    preview_enabled: bool,
    thumbnails: ThumbnailSet,
    output: String,
    placeholder: Option<&'static str>,
    run_state: RunState,
    progress: ProgressState,
    status_visible: bool,
}

impl<H> Default for Session<H> {
    fn default() -> Self {
        Self {
            files: Vec::new(),
            mode: UploadMode::default(),
            preview_enabled: false,
            thumbnails: ThumbnailSet::new(),
            output: String::new(),
            placeholder: None,
            run_state: RunState::Idle,
            progress: ProgressState::idle(),
            status_visible: false,
        }
    }
}

impl<H> Session<H> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn files(&self) -> &[ImageFile<H>] {
        &self.files
    }

    pub fn mode(&self) -> UploadMode {
        self.mode
    }

    pub fn thumbnails(&self) -> &ThumbnailSet {
        &self.thumbnails
    }

    pub fn run_state(&self) -> RunState {
        self.run_state
    }

    pub fn progress(&self) -> &ProgressState {
        &self.progress
    }

    /// 認識結果そのもの（コピー・ダウンロード対象）
    pub fn output(&self) -> &str {
        &self.output
    }

    /// 出力欄に表示する文字列
    pub fn display_text(&self) -> &str {
        match self.placeholder {
            Some(text) if self.output.is_empty() => text,
            _ => &self.output,
        }
    }

    /// ファイル選択・ドロップ。保持中の列は丸ごと置き換える。
    ///
    /// 画像が1枚も残らなければ初期状態に戻す。保持した枚数を返す。
    pub fn select_files<I>(&mut self, candidates: I) -> Result<usize>
    where
        I: IntoIterator<Item = ImageFile<H>>,
    {
        self.ensure_idle()?;
        self.files = filter_images(candidates);
        if self.files.is_empty() {
            self.reset();
            return Ok(0);
        }
        self.output.clear();
        self.placeholder = Some(UPLOADED_PLACEHOLDER);
        self.run_state = RunState::Idle;
        self.thumbnails.restart();
        tracing::info!(count = self.files.len(), "images selected");
        Ok(self.files.len())
    }

    /// 個別画像/フォルダの切り替え。保持中のファイルは破棄する。
    pub fn set_upload_mode(&mut self, mode: UploadMode) -> Result<()> {
        self.ensure_idle()?;
        self.mode = mode;
        self.files.clear();
        self.reset();
        Ok(())
    }

    /// プレビューの有効/無効を反転し、新しい値を返す
    pub fn toggle_preview(&mut self) -> bool {
        self.preview_enabled = !self.preview_enabled;
        self.thumbnails.restart();
        self.preview_enabled
    }

    /// 初期表示に戻す（保持ファイルには触れない）
    pub fn reset(&mut self) {
        self.output.clear();
        self.placeholder = None;
        self.run_state = RunState::Idle;
        self.progress = ProgressState::idle();
        self.status_visible = false;
        self.thumbnails.restart();
    }

    /// 読み込み結果の反映。古い世代やプレビュー無効時は捨てる。
    pub fn insert_thumbnail(&mut self, epoch: u64, index: usize, data_url: String) -> bool {
        self.preview_enabled && self.thumbnails.insert(epoch, index, data_url)
    }

    /// 実行開始。ファイルが無ければ状態を変えずにエラー。
    ///
    /// 認識対象のスナップショットを返す。
    pub fn begin_run(&mut self) -> Result<Vec<ImageFile<H>>>
    where
        H: Clone,
    {
        self.ensure_idle()?;
        if self.files.is_empty() {
            return Err(Error::NoImages);
        }
        self.run_state = RunState::Running;
        self.output.clear();
        self.placeholder = None;
        self.progress = ProgressState::idle();
        self.status_visible = true;
        Ok(self.files.clone())
    }

    /// オーケストレータからのイベントを反映する
    pub fn apply(&mut self, event: RunEvent) {
        match event {
            RunEvent::Started { total } => {
                self.run_state = RunState::Running;
                self.status_visible = true;
                self.progress = ProgressState {
                    fraction: 0.0,
                    status: format!("Preparing {} image(s)...", total),
                };
            }
            RunEvent::Progress(progress) => {
                if !self.run_state.is_running() {
                    return;
                }
                let fraction = progress.fraction.max(self.progress.fraction);
                self.progress = ProgressState {
                    fraction,
                    status: progress.status,
                };
            }
            RunEvent::Completed { result, total } => {
                self.output = result.to_text();
                self.run_state = RunState::Completed;
                self.progress = ProgressState {
                    fraction: 1.0,
                    status: completion_message(total),
                };
            }
            RunEvent::Failed { message } => {
                self.run_state = RunState::Failed;
                self.progress = ProgressState {
                    fraction: self.progress.fraction,
                    status: message,
                };
            }
        }
    }

    /// ダウンロード内容を用意する
    pub fn prepare_download(&self, file_name: &str) -> Result<TextExport> {
        self.ensure_idle()?;
        TextExport::new(file_name, &self.output)
    }

    /// コピー対象のテキスト
    pub fn prepare_copy(&self) -> Result<&str> {
        self.ensure_idle()?;
        if self.output.trim().is_empty() {
            return Err(Error::NothingToCopy);
        }
        Ok(&self.output)
    }

    pub fn affordances(&self) -> Affordances {
        let running = self.run_state.is_running();
        let has_files = !self.files.is_empty();
        let has_output = !self.output.trim().is_empty();
        let picker_label = if has_files {
            format!("Selected {} image(s)", self.files.len())
        } else {
            self.mode.picker_label().to_string()
        };
        Affordances {
            start_enabled: has_files && !running,
            copy_enabled: has_output && !running,
            download_enabled: has_output && !running,
            drop_zone_visible: !has_files,
            progress_visible: running,
            status_visible: self.status_visible,
            previews_visible: self.preview_enabled && has_files,
            picker_label,
            preview_toggle_label: if self.preview_enabled {
                "Disable Previews"
            } else {
                "Enable Previews"
            },
            start_label: if running { "Extracting..." } else { "Extract Text" },
        }
    }

    fn ensure_idle(&self) -> Result<()> {
        if self.run_state.is_running() {
            return Err(Error::RunInProgress);
        }
        Ok(())
    }
}

impl<H: Clone> Session<H> {
    /// プレビュー有効時、まだ読み込んでいないサムネイルの要求を返す
    pub fn thumbnail_jobs(&self) -> Vec<ThumbnailJob<H>> {
        if !self.preview_enabled {
            return Vec::new();
        }
        let epoch = self.thumbnails.epoch();
        self.files
            .iter()
            .enumerate()
            .filter(|(index, _)| self.thumbnails.get(*index).is_none())
            .map(|(index, file)| ThumbnailJob {
                epoch,
                index,
                handle: file.handle.clone(),
            })
            .collect()
    }
}
