//! 全体進捗の計算
//!
//! 全体進捗 = (完了ファイル数 + 認識中ファイルの進捗) / 総ファイル数。
//! 「完了ファイル数」は認識呼び出しを始めた時点の値で、トラッカーに
//! 開始・完了を明示的に伝える。

use crate::engine::{EngineEvent, EngineStatus};

/// 認識中イベントで報告できる全体進捗の上限
const IN_FLIGHT_CEILING: f32 = 1.0 - f32::EPSILON;

/// UIに出す進捗
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressState {
    /// 0.0〜1.0
    pub fraction: f32,
    pub status: String,
}

impl ProgressState {
    pub fn idle() -> Self {
        Self {
            fraction: 0.0,
            status: String::new(),
        }
    }
}

impl Default for ProgressState {
    fn default() -> Self {
        Self::idle()
    }
}

#[derive(Debug, Clone)]
pub struct ProgressTracker {
    total: usize,
    completed: usize,
    current: Option<usize>,
    last_fraction: f32,
}

impl ProgressTracker {
    pub fn new(total: usize) -> Self {
        Self {
            total,
            completed: 0,
            current: None,
            last_fraction: 0.0,
        }
    }

    pub fn fraction(&self) -> f32 {
        self.last_fraction
    }

    /// `index` 番目（0始まり）の認識を開始
    pub fn begin_file(&mut self, index: usize) {
        self.current = Some(index);
    }

    /// 認識中ファイルの完了。ファイル境界の進捗を返す。
    pub fn finish_file(&mut self) -> ProgressState {
        self.current = None;
        self.completed = (self.completed + 1).min(self.total);
        let fraction = self.completed as f32 / self.total.max(1) as f32;
        self.advance(fraction);
        ProgressState {
            fraction: self.last_fraction,
            status: self.processing_line(self.completed.min(self.total.saturating_sub(1))),
        }
    }

    /// エンジンイベントを進捗に変換する。UI更新不要なら `None`。
    ///
    /// 認識中イベントのファイル内進捗1.0はそのファイルの完了扱いにしない。
    /// 境界値は [`finish_file`](Self::finish_file) でだけ報告する。
    pub fn on_event(&mut self, event: &EngineEvent) -> Option<ProgressState> {
        match &event.status {
            EngineStatus::Recognizing => {
                let index = self.current?;
                if self.total == 0 || event.progress >= 1.0 {
                    return None;
                }
                let overall = (self.completed as f64 + f64::from(event.progress.max(0.0)))
                    / self.total as f64;
                // 最終ファイルの完了前に1.0へ丸められないよう上限を設ける
                self.advance((overall as f32).min(IN_FLIGHT_CEILING));
                Some(ProgressState {
                    fraction: self.last_fraction,
                    status: self.processing_line(index),
                })
            }
            EngineStatus::Loading | EngineStatus::Initializing => Some(ProgressState {
                fraction: self.last_fraction,
                status: format!("Status: {}...", event.status.label()),
            }),
            EngineStatus::Other(_) => None,
        }
    }

    fn advance(&mut self, fraction: f32) {
        // 単調非減少
        if fraction > self.last_fraction {
            self.last_fraction = fraction.min(1.0);
        }
    }

    fn processing_line(&self, index: usize) -> String {
        format!(
            "Processing Image {} of {}... {:.2}% done",
            index + 1,
            self.total,
            self.last_fraction * 100.0
        )
    }
}
