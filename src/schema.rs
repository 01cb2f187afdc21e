//! アノテーションスキーマ（短縮名 ↔ 正式名）
//!
//! スキーマはJSONオブジェクトで与える: `{"s": "Sedentary", "l": "Light"}`
//! 構築時に一度だけ検証し、以降は不変。

use crate::error::{PhotoLabelError, Result};
use std::collections::{HashMap, HashSet};
use std::path::Path;

/// コマンドとして予約されている語彙。スキーマの短縮名・正式名には使えない
pub const RESERVED_COMMANDS: &[&str] = &[
    "next", ".", "prev", ",", "copy", "c", "quit", "q", "help", "h",
];

#[derive(Debug, Clone)]
pub struct LabelEntry {
    pub short: String,
    pub long: String,
}

#[derive(Debug, Clone)]
pub struct LabelSet {
    entries: Vec<LabelEntry>,
}

impl LabelSet {
    /// スキーマJSONファイルを読み込む
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(PhotoLabelError::FileNotFound(path.display().to_string()));
        }

        let content = std::fs::read_to_string(path)?;
        let map: HashMap<String, String> = serde_json::from_str(&content)
            .map_err(|e| PhotoLabelError::InvalidSchema(format!("JSONパースエラー: {}", e)))?;

        Self::from_map(map)
    }

    pub fn from_map(map: HashMap<String, String>) -> Result<Self> {
        if map.is_empty() {
            return Err(PhotoLabelError::InvalidSchema(
                "ラベルがひとつもありません".into(),
            ));
        }

        // 正式名の重複チェック（短縮名はマップのキーなので重複しえない）
        let mut seen = HashSet::new();
        for long in map.values() {
            if !seen.insert(long.as_str()) {
                return Err(PhotoLabelError::InvalidSchema(format!(
                    "正式名が重複しています: {}",
                    long
                )));
            }
        }

        // 予約コマンドとの衝突チェック
        for (short, long) in &map {
            if RESERVED_COMMANDS.contains(&short.as_str()) {
                return Err(PhotoLabelError::InvalidSchema(format!(
                    "短縮名 '{}' はコマンドです",
                    short
                )));
            }
            if RESERVED_COMMANDS.contains(&long.as_str()) {
                return Err(PhotoLabelError::InvalidSchema(format!(
                    "正式名 '{}' はコマンドです",
                    long
                )));
            }
        }

        let mut entries: Vec<LabelEntry> = map
            .into_iter()
            .map(|(short, long)| LabelEntry { short, long })
            .collect();
        // 表示順を安定させる
        entries.sort_by(|a, b| a.short.cmp(&b.short));

        Ok(Self { entries })
    }

    /// 短縮名または正式名の完全一致を正式名に解決（短縮名を優先）
    pub fn resolve(&self, input: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|e| e.short == input)
            .or_else(|| self.entries.iter().find(|e| e.long == input))
            .map(|e| e.long.as_str())
    }

    pub fn entries(&self) -> &[LabelEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
