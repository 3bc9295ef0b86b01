//! プレビュー（サムネイル・ホバー拡大）

use std::collections::BTreeMap;

/// 読み込み済みサムネイル
///
/// デコードは非同期で完了順が入力順と一致しないため、インデックスをキーに
/// 個別に挿入する。選択し直すと `epoch` が進み、古い読み込み結果は捨てられる。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ThumbnailSet {
    epoch: u64,
    items: BTreeMap<usize, String>,
}

impl ThumbnailSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// 全消去して新しい世代を始める
    pub fn restart(&mut self) -> u64 {
        self.items.clear();
        self.epoch += 1;
        self.epoch
    }

    /// 世代が一致するときだけ挿入する
    pub fn insert(&mut self, epoch: u64, index: usize, data_url: String) -> bool {
        if epoch != self.epoch {
            return false;
        }
        self.items.insert(index, data_url);
        true
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.items.get(&index).map(String::as_str)
    }

    /// インデックス順
    pub fn iter(&self) -> impl Iterator<Item = (usize, &str)> {
        self.items.iter().map(|(i, url)| (*i, url.as_str()))
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// ホバー拡大のチケット。タイマー発火時に照合する。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HoverTicket(u64);

/// ホバー拡大オーバーレイの状態
///
/// ポインタが乗るとチケットを発行し、呼び出し側が遅延タイマーを張る。
/// タイマー発火時にチケットがまだ有効ならオーバーレイを開く。
/// 途中で離れたらチケットは無効になる。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ZoomOverlay {
    next_ticket: u64,
    pending: Option<(HoverTicket, usize)>,
    open: Option<usize>,
}

impl ZoomOverlay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pointer_enter(&mut self, index: usize) -> HoverTicket {
        self.next_ticket += 1;
        let ticket = HoverTicket(self.next_ticket);
        self.pending = Some((ticket, index));
        ticket
    }

    pub fn pointer_leave(&mut self, index: usize) {
        if matches!(self.pending, Some((_, i)) if i == index) {
            self.pending = None;
        }
    }

    /// 遅延タイマー発火。開いたらそのインデックスを返す。
    pub fn timer_fired(&mut self, ticket: HoverTicket) -> Option<usize> {
        match self.pending {
            Some((current, index)) if current == ticket => {
                self.pending = None;
                self.open = Some(index);
                Some(index)
            }
            _ => None,
        }
    }

    /// 閉じるボタン・Escape・背景クリック
    pub fn close(&mut self) {
        self.open = None;
    }

    pub fn open_index(&self) -> Option<usize> {
        self.open
    }

    pub fn is_open(&self) -> bool {
        self.open.is_some()
    }

    /// 選択し直し・プレビュー無効化時
    pub fn reset(&mut self) {
        self.pending = None;
        self.open = None;
    }
}
