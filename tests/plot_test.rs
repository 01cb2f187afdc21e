//! 窓プロットの統合テスト
//!
//! 複数系列の共有スケールと、点が足りない窓の拒否を検証

use chrono::{Duration, NaiveDate, NaiveDateTime};
use photo_label_rust::error::PhotoLabelError;
use photo_label_rust::plot::{Mark, SensorPlot, SensorSeries, TickMode};
use std::path::PathBuf;

fn time(secs: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2023, 11, 14)
        .unwrap()
        .and_hms_opt(18, 0, 0)
        .unwrap()
        + Duration::seconds(secs as i64)
}

fn camera_series(secs: &[u32]) -> SensorSeries {
    let times: Vec<NaiveDateTime> = secs.iter().map(|&s| time(s)).collect();
    let paths: Vec<PathBuf> = secs
        .iter()
        .map(|&s| PathBuf::from(format!("img_{}.jpg", s)))
        .collect();
    SensorSeries::images("Camera", times, paths, TickMode::Sampled).unwrap()
}

/// 窓に1点しか残らない場合は空プロットではなくエラー
#[test]
fn test_single_point_window_rejected() {
    let plot = SensorPlot::new(vec![camera_series(&[0, 60])]);

    let result = plot.plot_window(time(0), Duration::seconds(30));
    assert!(matches!(result, Err(PhotoLabelError::PlotWindow(_))));
}

#[test]
fn test_empty_window_rejected() {
    let plot = SensorPlot::new(vec![camera_series(&[0, 10])]);

    let result = plot.plot_window(time(40), Duration::seconds(30));
    assert!(matches!(result, Err(PhotoLabelError::PlotWindow(_))));
}

/// 1系列1点ずつでも合計2点あればスケールは作れる
#[test]
fn test_points_counted_across_series() {
    let camera = camera_series(&[0]);
    let temperature =
        SensorSeries::scalars("Temperature", vec![time(10)], vec![21.5], TickMode::Hidden)
            .unwrap();

    let plot = SensorPlot::new(vec![camera, temperature]);
    let figure = plot.plot_window(time(0), Duration::seconds(30)).unwrap();
    assert_eq!(figure.panels.len(), 2);
}

/// スケールは全系列の時刻の和集合に合わせて共有される
#[test]
fn test_shared_scale_across_series() {
    let camera = camera_series(&[0, 30]);
    let temperature = SensorSeries::scalars(
        "Temperature",
        vec![time(10), time(20)],
        vec![21.0, 22.0],
        TickMode::Hidden,
    )
    .unwrap();

    let plot = SensorPlot::new(vec![camera, temperature]);
    let figure = plot.plot_window(time(0), Duration::seconds(60)).unwrap();

    // 画像は両端（0と1）
    match (&figure.panels[0].marks[0], &figure.panels[0].marks[1]) {
        (Mark::Image { x: x0, .. }, Mark::Image { x: x1, .. }) => {
            assert!((x0 - 0.0).abs() < 1e-9);
            assert!((x1 - 1.0).abs() < 1e-9);
        }
        _ => panic!("期待したのは画像マーク"),
    }

    // 温度は同じスケール上の1/3と2/3
    match &figure.panels[1].marks[0] {
        Mark::Curve { points, .. } => {
            assert!((points[0].0 - 1.0 / 3.0).abs() < 1e-9);
            assert!((points[1].0 - 2.0 / 3.0).abs() < 1e-9);
        }
        Mark::Image { .. } => panic!("期待したのは折れ線"),
    }
}

/// 窓は半開区間。終端ちょうどの点は含まれない
#[test]
fn test_window_end_exclusive() {
    let plot = SensorPlot::new(vec![camera_series(&[0, 15, 30])]);

    let figure = plot.plot_window(time(0), Duration::seconds(30)).unwrap();
    assert_eq!(figure.panels[0].marks.len(), 2);
}

#[test]
fn test_even_tick_labels() {
    let temperature = SensorSeries::scalars(
        "Temperature",
        vec![time(0), time(30)],
        vec![21.0, 22.0],
        TickMode::Even(3),
    )
    .unwrap();

    let plot = SensorPlot::new(vec![temperature]);
    let figure = plot.plot_window(time(0), Duration::seconds(60)).unwrap();

    let labels: Vec<&str> = figure.panels[0]
        .ticks
        .iter()
        .map(|t| t.label.as_str())
        .collect();
    assert_eq!(labels, vec!["18:00:00", "18:00:15", "18:00:30"]);
}

/// ベクトル系列は次元ごとに折れ線になり、全パネルが同じ窓を共有する
#[test]
fn test_mixed_kinds_in_one_figure() {
    let camera = camera_series(&[0, 30]);
    let accelerometer = SensorSeries::vectors(
        "Accelerometer",
        vec![time(5), time(10), time(15)],
        vec![
            vec![0.1, 0.2, 0.9],
            vec![0.1, 0.3, 0.9],
            vec![0.2, 0.3, 0.8],
        ],
        Some(vec!["x".into(), "y".into(), "z".into()]),
        TickMode::Even(5),
    )
    .unwrap();

    let plot = SensorPlot::new(vec![camera, accelerometer]);
    let figure = plot.plot_window(time(0), Duration::seconds(60)).unwrap();

    assert_eq!(figure.panels.len(), 2);
    assert_eq!(figure.panels[0].marks.len(), 2); // 画像2枚
    assert_eq!(figure.panels[1].marks.len(), 3); // x, y, z
    assert_eq!(figure.panels[1].ticks.len(), 5);
}
