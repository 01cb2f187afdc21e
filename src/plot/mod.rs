//! 時系列センサーデータの窓プロット
//!
//! 種類の異なる時系列（画像・スカラー・固定幅ベクトル）を時間窓で
//! 切り出し、全系列の時刻の和集合に合わせた共有[0,1]スケール上の
//! `Figure`（系列ごとに1パネル）へ変換する。実際の描画は表示系の
//! 関心事なのでここでは持たない。状態も永続化もない。

mod timescale;

pub use timescale::TimeScale;

use crate::error::{PhotoLabelError, Result};
use chrono::{Duration, NaiveDateTime};
use std::fmt;
use std::path::PathBuf;

/// X軸目盛りの出し方
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickMode {
    /// 目盛りなし
    Hidden,
    /// 実際にサンプルされた時刻に目盛り
    Sampled,
    /// [0,1]を等分したN本の目盛り
    Even(usize),
}

/// 系列の種類ごとのデータ本体
#[derive(Debug, Clone)]
pub enum SeriesValues {
    /// 画像参照（撮影時刻の位置に置く）
    Images(Vec<PathBuf>),
    /// スカラー値の折れ線
    Scalars(Vec<f64>),
    /// 固定幅ベクトル。次元ごとに折れ線を引く
    Vectors {
        width: usize,
        dim_names: Option<Vec<String>>,
        rows: Vec<Vec<f64>>,
    },
}

impl SeriesValues {
    fn len(&self) -> usize {
        match self {
            SeriesValues::Images(paths) => paths.len(),
            SeriesValues::Scalars(values) => values.len(),
            SeriesValues::Vectors { rows, .. } => rows.len(),
        }
    }

    fn select(&self, keep: &[bool]) -> SeriesValues {
        fn filter<T: Clone>(items: &[T], keep: &[bool]) -> Vec<T> {
            items
                .iter()
                .zip(keep)
                .filter(|(_, &k)| k)
                .map(|(v, _)| v.clone())
                .collect()
        }

        match self {
            SeriesValues::Images(paths) => SeriesValues::Images(filter(paths, keep)),
            SeriesValues::Scalars(values) => SeriesValues::Scalars(filter(values, keep)),
            SeriesValues::Vectors {
                width,
                dim_names,
                rows,
            } => SeriesValues::Vectors {
                width: *width,
                dim_names: dim_names.clone(),
                rows: filter(rows, keep),
            },
        }
    }

    fn kind_name(&self) -> &'static str {
        match self {
            SeriesValues::Images(_) => "Images",
            SeriesValues::Scalars(_) => "Scalars",
            SeriesValues::Vectors { .. } => "Vectors",
        }
    }
}

/// 名前付きの時系列1本
#[derive(Debug, Clone)]
pub struct SensorSeries {
    name: String,
    times: Vec<NaiveDateTime>,
    values: SeriesValues,
    ticks: TickMode,
}

impl SensorSeries {
    pub fn images(
        name: impl Into<String>,
        times: Vec<NaiveDateTime>,
        paths: Vec<PathBuf>,
        ticks: TickMode,
    ) -> Result<Self> {
        Self::new(name.into(), times, SeriesValues::Images(paths), ticks)
    }

    pub fn scalars(
        name: impl Into<String>,
        times: Vec<NaiveDateTime>,
        values: Vec<f64>,
        ticks: TickMode,
    ) -> Result<Self> {
        Self::new(name.into(), times, SeriesValues::Scalars(values), ticks)
    }

    /// 固定幅ベクトル系列。全行の幅が一致しないと作れない
    pub fn vectors(
        name: impl Into<String>,
        times: Vec<NaiveDateTime>,
        rows: Vec<Vec<f64>>,
        dim_names: Option<Vec<String>>,
        ticks: TickMode,
    ) -> Result<Self> {
        let name = name.into();
        let width = rows.first().map(|r| r.len()).unwrap_or(0);

        if let Some(bad) = rows.iter().find(|r| r.len() != width) {
            return Err(PhotoLabelError::InvalidSeries(format!(
                "系列 '{}' のベクトル幅が揃っていません（{} vs {}）",
                name,
                width,
                bad.len()
            )));
        }
        if let Some(names) = &dim_names {
            if names.len() != width {
                return Err(PhotoLabelError::InvalidSeries(format!(
                    "系列 '{}' の次元名の数がベクトル幅と合いません（{} vs {}）",
                    name,
                    names.len(),
                    width
                )));
            }
        }

        Self::new(
            name,
            times,
            SeriesValues::Vectors {
                width,
                dim_names,
                rows,
            },
            ticks,
        )
    }

    fn new(
        name: String,
        times: Vec<NaiveDateTime>,
        values: SeriesValues,
        ticks: TickMode,
    ) -> Result<Self> {
        if times.len() != values.len() {
            return Err(PhotoLabelError::InvalidSeries(format!(
                "系列 '{}' の時刻数とデータ数が合いません（{} vs {}）",
                name,
                times.len(),
                values.len()
            )));
        }
        Ok(Self {
            name,
            times,
            values,
            ticks,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn len(&self) -> usize {
        self.times.len()
    }

    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    /// 窓 `[start, start+duration)` に入る点だけ残した系列を返す
    pub fn select(&self, start: NaiveDateTime, duration: Duration) -> SensorSeries {
        let stop = start + duration;
        let keep: Vec<bool> = self.times.iter().map(|&t| t >= start && t < stop).collect();

        SensorSeries {
            name: self.name.clone(),
            times: self
                .times
                .iter()
                .zip(&keep)
                .filter(|(_, &k)| k)
                .map(|(&t, _)| t)
                .collect(),
            values: self.values.select(&keep),
            ticks: self.ticks,
        }
    }

    /// 共有スケール上のパネルへ変換する
    fn panel(&self, ts: &TimeScale) -> Panel {
        let unit_times: Vec<f64> = self.times.iter().map(|&t| ts.to_unit(t)).collect();

        let marks = match &self.values {
            SeriesValues::Images(paths) => paths
                .iter()
                .zip(&unit_times)
                .map(|(path, &x)| Mark::Image {
                    x,
                    path: path.clone(),
                })
                .collect(),
            SeriesValues::Scalars(values) => vec![Mark::Curve {
                label: self.name.clone(),
                points: unit_times
                    .iter()
                    .copied()
                    .zip(values.iter().copied())
                    .collect(),
            }],
            SeriesValues::Vectors {
                width,
                dim_names,
                rows,
            } => (0..*width)
                .map(|dim| Mark::Curve {
                    label: dim_names
                        .as_ref()
                        .map(|names| names[dim].clone())
                        .unwrap_or_else(|| format!("{}_{}", self.name, dim)),
                    points: unit_times
                        .iter()
                        .copied()
                        .zip(rows.iter().map(|row| row[dim]))
                        .collect(),
                })
                .collect(),
        };

        let ticks = match self.ticks {
            TickMode::Hidden => Vec::new(),
            TickMode::Sampled => unit_times
                .iter()
                .map(|&x| Tick {
                    x,
                    label: ts.label(x),
                })
                .collect(),
            TickMode::Even(n) => even_ticks(n)
                .into_iter()
                .map(|x| Tick {
                    x,
                    label: ts.label(x),
                })
                .collect(),
        };

        Panel {
            name: self.name.clone(),
            marks,
            ticks,
        }
    }
}

fn even_ticks(n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![0.0],
        _ => (0..n).map(|i| i as f64 / (n - 1) as f64).collect(),
    }
}

/// 複数系列をまとめて窓プロットする
pub struct SensorPlot {
    series: Vec<SensorSeries>,
}

impl SensorPlot {
    pub fn new(series: Vec<SensorSeries>) -> Self {
        Self { series }
    }

    /// 全系列を窓で切り出し、共有スケールのFigureを組み立てる
    ///
    /// 切り出し後の全系列合計で2点以上残らなければエラー。
    pub fn plot_window(&self, start: NaiveDateTime, duration: Duration) -> Result<Figure> {
        let selected: Vec<SensorSeries> = self
            .series
            .iter()
            .map(|s| s.select(start, duration))
            .collect();

        // スケールは全系列の時刻の和集合に合わせる
        let all_times: Vec<NaiveDateTime> = selected
            .iter()
            .flat_map(|s| s.times.iter().copied())
            .collect();
        let ts = TimeScale::fit(&all_times)?;

        Ok(Figure {
            panels: selected.iter().map(|s| s.panel(&ts)).collect(),
        })
    }
}

impl fmt::Display for SensorPlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "SensorPlot:")?;
        for series in &self.series {
            writeln!(f, "- {} ({})", series.name, series.values.kind_name())?;
            writeln!(f, "    {}点", series.len())?;
            if let (Some(first), Some(last)) = (series.times.first(), series.times.last()) {
                writeln!(f, "    {} -> {}", first, last)?;
            }
        }
        Ok(())
    }
}

/// 描画側へ渡すプロットのモデル。系列ごとに1パネル
#[derive(Debug, Clone)]
pub struct Figure {
    pub panels: Vec<Panel>,
}

#[derive(Debug, Clone)]
pub struct Panel {
    pub name: String,
    pub marks: Vec<Mark>,
    pub ticks: Vec<Tick>,
}

/// パネル内の描画要素。座標は共有スケールの[0,1]
#[derive(Debug, Clone)]
pub enum Mark {
    Image { x: f64, path: PathBuf },
    Curve { label: String, points: Vec<(f64, f64)> },
}

#[derive(Debug, Clone)]
pub struct Tick {
    pub x: f64,
    pub label: String,
}

impl fmt::Display for Figure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Figure（{}パネル）:", self.panels.len())?;
        for panel in &self.panels {
            writeln!(f, "- {}", panel.name)?;
            for mark in &panel.marks {
                match mark {
                    Mark::Image { x, path } => {
                        writeln!(f, "    画像 x={:.3} {}", x, path.display())?;
                    }
                    Mark::Curve { label, points } => {
                        writeln!(f, "    折れ線 {}（{}点）", label, points.len())?;
                    }
                }
            }
            if !panel.ticks.is_empty() {
                let labels: Vec<&str> = panel.ticks.iter().map(|t| t.label.as_str()).collect();
                writeln!(f, "    目盛り: {}", labels.join(", "))?;
            }
        }
        Ok(())
    }
}
