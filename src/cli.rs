use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "photo-label")]
#[command(about = "装着カメラ画像の対話式アノテーションツール", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 画像フォルダを対話式にアノテーション
    Annotate {
        /// 画像フォルダのパス
        #[arg(required = true)]
        folder: PathBuf,

        /// スキーマJSONファイル（短縮名→正式名、例: {"s": "Sedentary"}）
        #[arg(short, long)]
        schema: PathBuf,

        /// ラベル保存先ディレクトリ
        #[arg(short, long)]
        labels: PathBuf,

        /// 一度に表示する枚数（省略時は設定値）
        #[arg(short, long)]
        display_count: Option<usize>,

        /// 保存頻度（Nアノテーションごとに保存、省略時は設定値）
        #[arg(long)]
        save_freq: Option<usize>,
    },

    /// 保存済みアノテーションの進捗を表示
    Status {
        /// ラベル保存先ディレクトリ
        #[arg(required = true)]
        labels: PathBuf,
    },

    /// 画像系列を時間窓で切り出してプロットモデルを表示
    Plot {
        /// 画像フォルダのパス
        #[arg(required = true)]
        folder: PathBuf,

        /// 窓の開始時刻（YYYY-MM-DD HH:MM:SS）
        #[arg(short, long)]
        start: String,

        /// 窓の長さ（秒）
        #[arg(short, long, default_value = "30")]
        duration: i64,

        /// X軸目盛りの本数（省略時は実サンプル位置に目盛り）
        #[arg(long)]
        ticks: Option<usize>,
    },

    /// 設定を表示/編集
    Config {
        /// 一度に表示する枚数を設定
        #[arg(long)]
        set_display_count: Option<usize>,

        /// 保存頻度を設定
        #[arg(long)]
        set_save_freq: Option<usize>,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },
}
