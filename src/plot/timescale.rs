//! 時間軸の正規化（datetime ↔ [0,1]）

use crate::error::{PhotoLabelError, Result};
use chrono::{Duration, NaiveDateTime};

#[derive(Debug, Clone, Copy)]
pub struct TimeScale {
    min: NaiveDateTime,
    max: NaiveDateTime,
}

impl TimeScale {
    /// 与えられた全時刻を[0,1]に収めるスケールを作る
    ///
    /// データ点が2個未満、または全点が同時刻の場合は作れない。
    pub fn fit(times: &[NaiveDateTime]) -> Result<Self> {
        if times.len() < 2 {
            return Err(PhotoLabelError::PlotWindow(format!(
                "選択範囲のデータ点が{}個しかありません（2個以上必要）",
                times.len()
            )));
        }

        let mut min = times[0];
        let mut max = times[0];
        for &t in times {
            if t < min {
                min = t;
            }
            if t > max {
                max = t;
            }
        }

        if min == max {
            return Err(PhotoLabelError::PlotWindow(
                "選択範囲の時刻がすべて同一です".into(),
            ));
        }

        Ok(Self { min, max })
    }

    /// datetime → [0,1]
    pub fn to_unit(&self, t: NaiveDateTime) -> f64 {
        (t - self.min).num_milliseconds() as f64 / self.span_ms()
    }

    /// [0,1] → datetime
    pub fn to_scale(&self, x: f64) -> NaiveDateTime {
        self.min + Duration::milliseconds((x * self.span_ms()).round() as i64)
    }

    /// [0,1] → 短い時刻表記（HH:MM:SS）
    pub fn label(&self, x: f64) -> String {
        self.to_scale(x).format("%H:%M:%S").to_string()
    }

    fn span_ms(&self) -> f64 {
        (self.max - self.min).num_milliseconds() as f64
    }
}
