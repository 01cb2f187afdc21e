//! 表示窓の計算
//!
//! カーソルの前後に表示する画像の範囲を決める。可能な限り
//! カーソルの前に1枚出し、残りを後ろに割り当てる。端では
//! 表示枚数が減るが、それは正常な縮退表示。

use super::Item;
use std::path::PathBuf;

/// 表示窓の1枚分。描画側へ渡すタプル
#[derive(Debug, Clone)]
pub struct DisplayItem {
    pub path: PathBuf,
    pub file_name: String,
    /// カーソルからの符号付きオフセット（カーソル位置で0）
    pub offset: i64,
    /// 撮影時刻の短い表記（HH:MM:SS）
    pub time_label: String,
    pub label: Option<String>,
    pub is_cursor: bool,
    /// 窓内の最後の1枚にだけ付く `済/全` の進捗
    pub progress: Option<(usize, usize)>,
}

/// 窓の範囲 `[lo, hi)` を返す
pub fn window_bounds(cursor: usize, display_count: usize, total: usize) -> (usize, usize) {
    let left = (display_count - 1).min(1); // 可能なら前に1枚
    let right = display_count - left;

    let lo = cursor.saturating_sub(left);
    let hi = (cursor + right).min(total);
    (lo, hi)
}

pub fn build_window(
    items: &[Item],
    labels: &[Option<String>],
    cursor: usize,
    display_count: usize,
    annotated: usize,
) -> Vec<DisplayItem> {
    let (lo, hi) = window_bounds(cursor, display_count, items.len());

    (lo..hi)
        .map(|i| DisplayItem {
            path: items[i].path.clone(),
            file_name: items[i].file_name.clone(),
            offset: i as i64 - cursor as i64,
            time_label: items[i].taken_at.format("%H:%M:%S").to_string(),
            label: labels[i].clone(),
            is_cursor: i == cursor,
            progress: (i == hi - 1).then_some((annotated, items.len())),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveDateTime};

    fn items(n: usize) -> Vec<Item> {
        (0..n)
            .map(|i| Item {
                path: PathBuf::from(format!("img_{}.jpg", i)),
                file_name: format!("img_{}.jpg", i),
                taken_at: time(i),
            })
            .collect()
    }

    fn time(i: usize) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2023, 11, 14)
            .unwrap()
            .and_hms_opt(18, 0, i as u32)
            .unwrap()
    }

    #[test]
    fn test_window_bounds_mid_sequence() {
        // カーソルの前に1枚、後ろに4枚
        assert_eq!(window_bounds(5, 5, 20), (4, 9));
    }

    #[test]
    fn test_window_bounds_at_start() {
        // 前に出せないので後ろだけの縮退表示
        assert_eq!(window_bounds(0, 5, 20), (0, 4));
    }

    #[test]
    fn test_window_bounds_at_end() {
        assert_eq!(window_bounds(19, 5, 20), (18, 20));
    }

    #[test]
    fn test_window_bounds_single_display() {
        assert_eq!(window_bounds(3, 1, 20), (3, 4));
    }

    #[test]
    fn test_window_bounds_small_sequence() {
        assert_eq!(window_bounds(0, 5, 2), (0, 2));
    }

    #[test]
    fn test_build_window_offsets_and_cursor() {
        let items = items(20);
        let labels = vec![None; 20];
        let window = build_window(&items, &labels, 5, 5, 0);

        let offsets: Vec<i64> = window.iter().map(|w| w.offset).collect();
        assert_eq!(offsets, vec![-1, 0, 1, 2, 3]);

        let cursors: Vec<bool> = window.iter().map(|w| w.is_cursor).collect();
        assert_eq!(cursors, vec![false, true, false, false, false]);
    }

    #[test]
    fn test_build_window_progress_on_last_only() {
        let items = items(20);
        let labels = vec![None; 20];
        let window = build_window(&items, &labels, 5, 5, 7);

        for item in &window[..window.len() - 1] {
            assert!(item.progress.is_none());
        }
        assert_eq!(window.last().unwrap().progress, Some((7, 20)));
    }

    #[test]
    fn test_build_window_time_labels() {
        let items = items(3);
        let labels = vec![None; 3];
        let window = build_window(&items, &labels, 0, 5, 0);
        assert_eq!(window[0].time_label, "18:00:00");
        assert_eq!(window[2].time_label, "18:00:02");
    }
}
