use clap::Parser;
use photo_label_rust::{cli, config, error, plot, scanner, schema, session, viewer};

use cli::{Cli, Commands};
use config::Config;
use error::Result;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load()?;

    match cli.command {
        Commands::Annotate {
            folder,
            schema: schema_path,
            labels,
            display_count,
            save_freq,
        } => {
            println!("📸 photo-label - 対話式アノテーション\n");

            println!("[1/3] スキーマを読み込み中...");
            let label_set = schema::LabelSet::load(&schema_path)?;
            println!("✔ {}種類のラベルを読み込み\n", label_set.len());

            println!("[2/3] 画像をスキャン中...");
            let scanned = scanner::scan_folder(&folder, &config.time_format)?;
            println!("✔ {}枚の画像を検出\n", scanned.len());

            if scanned.is_empty() {
                return Err(error::PhotoLabelError::NoImagesFound(
                    folder.display().to_string(),
                ));
            }

            let (items, skipped) = session::into_items(scanned);
            if skipped > 0 {
                println!("⚠ 撮影時刻が取得できない画像を{}枚スキップ\n", skipped);
            }

            println!("[3/3] セッションを開始\n");
            let mut session = session::AnnotationSession::open(
                &labels,
                label_set,
                items,
                display_count.unwrap_or(config.display_count),
                save_freq.unwrap_or(config.save_freq),
            )?;

            session.run(&viewer::TextView)?;

            println!("\n✅ アノテーション終了");
        }

        Commands::Status { labels } => {
            println!("📋 photo-label - 進捗\n");

            if !labels.exists() {
                println!("ラベルディレクトリが存在しません: {}", labels.display());
                return Ok(());
            }

            let store = session::LabelStore::open(&labels)?;
            let snapshot = store.snapshot();

            match &snapshot.progress {
                Some(progress) => {
                    println!("summary.txt:");
                    println!("  Current image index: {}", progress.cursor);
                    println!("  Number of annotated images: {}", progress.annotated);
                }
                None => println!("summary.txt がありません"),
            }

            match &snapshot.labels {
                Some(labels) => {
                    // 保存値は信用せず配列から数え直して表示する
                    let annotated = labels.iter().flatten().count();
                    println!("labels.json:");
                    println!("  スロット数: {}", labels.len());
                    println!("  アノテーション済み（再計算）: {}", annotated);
                }
                None => println!("labels.json がありません"),
            }
        }

        Commands::Plot {
            folder,
            start,
            duration,
            ticks,
        } => {
            println!("📊 photo-label - 窓プロット\n");

            let start = chrono::NaiveDateTime::parse_from_str(&start, "%Y-%m-%d %H:%M:%S")
                .map_err(|e| {
                    error::PhotoLabelError::Config(format!("開始時刻のパースに失敗: {}", e))
                })?;

            let scanned = scanner::scan_folder(&folder, &config.time_format)?;
            let (items, skipped) = session::into_items(scanned);
            if skipped > 0 {
                println!("⚠ 撮影時刻が取得できない画像を{}枚スキップ\n", skipped);
            }
            if items.is_empty() {
                return Err(error::PhotoLabelError::NoImagesFound(
                    folder.display().to_string(),
                ));
            }

            let times: Vec<_> = items.iter().map(|i| i.taken_at).collect();
            let paths: Vec<_> = items.iter().map(|i| i.path.clone()).collect();
            let tick_mode = match ticks {
                Some(n) => plot::TickMode::Even(n),
                None => plot::TickMode::Sampled,
            };

            let camera = plot::SensorSeries::images("Camera", times, paths, tick_mode)?;
            let sensor_plot = plot::SensorPlot::new(vec![camera]);
            if cli.verbose {
                println!("{}", sensor_plot);
            }

            let figure =
                sensor_plot.plot_window(start, chrono::Duration::seconds(duration))?;
            println!("{}", figure);
        }

        Commands::Config {
            set_display_count,
            set_save_freq,
            show,
        } => {
            let mut config = config;

            if let Some(n) = set_display_count {
                config.display_count = n;
                config.save()?;
                println!("✔ 表示枚数を設定しました");
            }

            if let Some(n) = set_save_freq {
                config.save_freq = n;
                config.save()?;
                println!("✔ 保存頻度を設定しました");
            }

            if show {
                println!("設定:");
                println!("  表示枚数: {}", config.display_count);
                println!("  保存頻度: {}", config.save_freq);
                println!("  時刻フォーマット: {}", config.time_format);
            }
        }
    }

    Ok(())
}
