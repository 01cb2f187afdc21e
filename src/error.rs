use thiserror::Error;

#[derive(Error, Debug)]
pub enum PhotoLabelError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("ファイルが見つかりません: {0}")]
    FileNotFound(String),

    #[error("フォルダが見つかりません: {0}")]
    FolderNotFound(String),

    #[error("スキーマが不正: {0}")]
    InvalidSchema(String),

    #[error("画像が見つかりません: {0}")]
    NoImagesFound(String),

    #[error("アノテーション対象が空です")]
    EmptyItems,

    #[error("保存済みラベル配列の長さが一致しません（期待: {expected}, 実際: {found}）")]
    StoreMismatch { expected: usize, found: usize },

    #[error("系列データが不正: {0}")]
    InvalidSeries(String),

    #[error("プロット範囲エラー: {0}")]
    PlotWindow(String),

    #[error("入力エラー: {0}")]
    Input(String),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, PhotoLabelError>;
