//! テーマ設定（ライト/ダーク）
//!
//! キー1つに "light" / "dark" を保存する。未保存ならダーク。

use crate::error::Result;
use std::cell::RefCell;
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThemePreference {
    Light,
    #[default]
    Dark,
}

impl ThemePreference {
    /// 保存値から復元。"light" 以外はすべてダーク扱い。
    pub fn from_stored(value: Option<&str>) -> Self {
        match value {
            Some("light") => ThemePreference::Light,
            _ => ThemePreference::Dark,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ThemePreference::Light => "light",
            ThemePreference::Dark => "dark",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            ThemePreference::Light => ThemePreference::Dark,
            ThemePreference::Dark => ThemePreference::Light,
        }
    }

    pub fn is_light(&self) -> bool {
        matches!(self, ThemePreference::Light)
    }

    /// トグルボタンの表示（切り替え先を示す）
    pub fn glyph(&self) -> &'static str {
        match self {
            ThemePreference::Light => "🌙",
            ThemePreference::Dark => "☀️",
        }
    }
}

/// 永続キーバリューストア（Web版はlocalStorage）
pub trait PreferenceStore {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
}

/// メモリ上のストア。テストとlocalStorageが使えない環境向け。
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RefCell<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PreferenceStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThemeState {
    key: String,
    preference: ThemePreference,
}

impl ThemeState {
    /// 起動時の読み込み。読めなければダーク。
    pub fn load(store: &dyn PreferenceStore, key: &str) -> Self {
        let stored = match store.get(key) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!(error = %e, "theme preference could not be read");
                None
            }
        };
        Self {
            key: key.to_string(),
            preference: ThemePreference::from_stored(stored.as_deref()),
        }
    }

    pub fn preference(&self) -> ThemePreference {
        self.preference
    }

    /// 切り替えて即保存する。保存に失敗しても表示上は切り替わる。
    pub fn toggle(&mut self, store: &dyn PreferenceStore) -> Result<ThemePreference> {
        self.preference = self.preference.toggled();
        tracing::debug!(theme = self.preference.as_str(), "theme toggled");
        store.set(&self.key, self.preference.as_str())?;
        Ok(self.preference)
    }
}
