//! ラベルと進捗の永続化
//!
//! 保存先ディレクトリには2つのファイルを置く:
//! - `labels.json`: 正準順のラベル配列（未設定スロットはnull）
//! - `summary.txt`: 人間可読の進捗サマリ（2行固定フォーマット）
//!
//! 2つのファイルは同一の保存で書かれるとは限らないため、
//! 読み込みは片方だけ存在する状態を許容する。

use crate::error::{PhotoLabelError, Result};
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

const LABELS_FILE: &str = "labels.json";
const SUMMARY_FILE: &str = "summary.txt";

/// summary.txt の進捗レコード
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressRecord {
    pub cursor: usize,
    pub annotated: usize,
}

/// ディスク上の状態。どちらのファイルも欠けていてよい
#[derive(Debug, Clone, Default)]
pub struct StoreSnapshot {
    pub labels: Option<Vec<Option<String>>>,
    pub progress: Option<ProgressRecord>,
}

/// 復元後のセッション状態
#[derive(Debug, Clone)]
pub struct SessionState {
    pub labels: Vec<Option<String>>,
    pub cursor: usize,
    pub annotated: usize,
}

pub struct LabelStore {
    dir: PathBuf,
}

impl LabelStore {
    /// 保存先ディレクトリを開く。なければ作る
    pub fn open(dir: &Path) -> Result<Self> {
        std::fs::create_dir_all(dir)?;
        Ok(Self {
            dir: dir.to_path_buf(),
        })
    }

    pub fn labels_path(&self) -> PathBuf {
        self.dir.join(LABELS_FILE)
    }

    pub fn summary_path(&self) -> PathBuf {
        self.dir.join(SUMMARY_FILE)
    }

    /// ディスク上の状態を読む。欠損・破損ファイルは未保存として扱う
    pub fn snapshot(&self) -> StoreSnapshot {
        StoreSnapshot {
            labels: self.load_labels(),
            progress: self.load_summary(),
        }
    }

    fn load_labels(&self) -> Option<Vec<Option<String>>> {
        let file = File::open(self.labels_path()).ok()?;
        serde_json::from_reader(BufReader::new(file)).ok()
    }

    fn load_summary(&self) -> Option<ProgressRecord> {
        let content = std::fs::read_to_string(self.summary_path()).ok()?;
        parse_summary(&content)
    }

    /// ラベル配列と進捗サマリを書き出す
    ///
    /// アノテーション済み枚数はメモリ上のカウンタではなく、
    /// 書き出すラベル配列から数え直す。
    pub fn save(&self, labels: &[Option<String>], cursor: usize) -> Result<()> {
        let annotated = labels.iter().flatten().count();

        let file = File::create(self.labels_path())?;
        serde_json::to_writer_pretty(BufWriter::new(file), labels)?;

        std::fs::write(
            self.summary_path(),
            format!(
                "Current image index: {}\nNumber of annotated images: {}\n",
                cursor, annotated
            ),
        )?;

        Ok(())
    }
}

fn parse_summary(content: &str) -> Option<ProgressRecord> {
    let mut lines = content.lines();
    let cursor = lines
        .next()?
        .strip_prefix("Current image index:")?
        .trim()
        .parse()
        .ok()?;
    let annotated = lines
        .next()?
        .strip_prefix("Number of annotated images:")?
        .trim()
        .parse()
        .ok()?;
    Some(ProgressRecord { cursor, annotated })
}

/// ディスク状態からセッション状態を組み立てる純粋関数
///
/// - ラベル配列がなければ全スロット未設定で始める
/// - ラベル配列の長さが画像数と違う場合は別の画像集合に対する保存なので致命エラー
/// - カーソルは `[0, item_count-1]` にクランプ
/// - アノテーション済み枚数は必ずラベル配列から数え直す（保存値は信用しない）
pub fn reconcile(snapshot: StoreSnapshot, item_count: usize) -> Result<SessionState> {
    if item_count == 0 {
        return Err(PhotoLabelError::EmptyItems);
    }

    let labels = match snapshot.labels {
        Some(labels) => {
            if labels.len() != item_count {
                return Err(PhotoLabelError::StoreMismatch {
                    expected: item_count,
                    found: labels.len(),
                });
            }
            labels
        }
        None => vec![None; item_count],
    };

    let annotated = labels.iter().flatten().count();
    let cursor = snapshot
        .progress
        .map(|p| p.cursor.min(item_count - 1))
        .unwrap_or(0);

    Ok(SessionState {
        labels,
        cursor,
        annotated,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_summary() {
        let record =
            parse_summary("Current image index: 5\nNumber of annotated images: 3\n").unwrap();
        assert_eq!(record.cursor, 5);
        assert_eq!(record.annotated, 3);
    }

    #[test]
    fn test_parse_summary_malformed() {
        assert!(parse_summary("").is_none());
        assert!(parse_summary("Current image index: five\n").is_none());
        assert!(parse_summary("Current image index: 5\n").is_none());
        assert!(parse_summary("garbage\nmore garbage\n").is_none());
    }

    #[test]
    fn test_reconcile_fresh() {
        let state = reconcile(StoreSnapshot::default(), 4).unwrap();
        assert_eq!(state.labels, vec![None; 4]);
        assert_eq!(state.cursor, 0);
        assert_eq!(state.annotated, 0);
    }

    #[test]
    fn test_reconcile_labels_without_summary() {
        let snapshot = StoreSnapshot {
            labels: Some(vec![Some("Light".into()), None, None]),
            progress: None,
        };
        let state = reconcile(snapshot, 3).unwrap();
        assert_eq!(state.cursor, 0);
        assert_eq!(state.annotated, 1);
    }

    #[test]
    fn test_reconcile_summary_without_labels() {
        let snapshot = StoreSnapshot {
            labels: None,
            progress: Some(ProgressRecord {
                cursor: 2,
                annotated: 2,
            }),
        };
        let state = reconcile(snapshot, 5).unwrap();
        assert_eq!(state.cursor, 2);
        // ラベル配列がないので保存値に関わらず0に戻る
        assert_eq!(state.annotated, 0);
    }

    #[test]
    fn test_reconcile_recomputes_annotated() {
        let snapshot = StoreSnapshot {
            labels: Some(vec![Some("Light".into()), Some("MVPA".into()), None]),
            progress: Some(ProgressRecord {
                cursor: 1,
                annotated: 99, // 嘘の保存値
            }),
        };
        let state = reconcile(snapshot, 3).unwrap();
        assert_eq!(state.annotated, 2);
    }

    #[test]
    fn test_reconcile_clamps_cursor() {
        let snapshot = StoreSnapshot {
            labels: None,
            progress: Some(ProgressRecord {
                cursor: 100,
                annotated: 0,
            }),
        };
        let state = reconcile(snapshot, 3).unwrap();
        assert_eq!(state.cursor, 2);
    }

    #[test]
    fn test_reconcile_length_mismatch_is_fatal() {
        let snapshot = StoreSnapshot {
            labels: Some(vec![None; 7]),
            progress: None,
        };
        assert!(matches!(
            reconcile(snapshot, 3),
            Err(PhotoLabelError::StoreMismatch {
                expected: 3,
                found: 7
            })
        ));
    }
}
