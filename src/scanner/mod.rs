mod exif;

use crate::error::{PhotoLabelError, Result};
use chrono::NaiveDateTime;
use indicatif::ProgressBar;
use rayon::prelude::*;
use regex::Regex;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

#[derive(Debug, Clone)]
pub struct ImageInfo {
    pub path: PathBuf,
    pub file_name: String,
    pub taken_at: Option<NaiveDateTime>,
}

const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "JPG", "JPEG", "PNG"];

/// フォルダ直下の画像を列挙し、撮影時刻を取り出す
///
/// 撮影時刻はEXIF（DateTimeOriginal → DateTime）を優先し、
/// なければファイル名の `time_format` パターンから読む。
pub fn scan_folder(folder: &Path, time_format: &str) -> Result<Vec<ImageInfo>> {
    if !folder.exists() {
        return Err(PhotoLabelError::FolderNotFound(folder.display().to_string()));
    }

    let mut files: Vec<PathBuf> = Vec::new();

    for entry in WalkDir::new(folder)
        .max_depth(1) // 直下のみ（再帰しない）
        .into_iter()
        .filter_map(|e| e.ok())
    {
        let path = entry.path();

        if !path.is_file() {
            continue;
        }

        if let Some(ext) = path.extension() {
            let ext_str = ext.to_string_lossy();
            if IMAGE_EXTENSIONS.iter().any(|&e| e == ext_str) {
                files.push(path.to_path_buf());
            }
        }
    }

    // ファイル名でソート
    files.sort();

    // EXIF読み出しはファイルごとに独立なので並列化
    let pb = ProgressBar::new(files.len() as u64);
    let images: Vec<ImageInfo> = files
        .par_iter()
        .map(|path| {
            let file_name = path
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_default();

            let taken_at = exif::extract_datetime(path)
                .ok()
                .or_else(|| filename_datetime(&file_name, time_format));

            pb.inc(1);

            ImageInfo {
                path: path.clone(),
                file_name,
                taken_at,
            }
        })
        .collect();
    pb.finish_and_clear();

    Ok(images)
}

/// ファイル名からタイムスタンプを読む（例: `IMG_0001_20231114_182809.JPG`）
pub fn filename_datetime(file_name: &str, time_format: &str) -> Option<NaiveDateTime> {
    lazy_static::lazy_static! {
        static ref TIMESTAMP_RE: Regex = Regex::new(r"\d{8}_\d{6}").unwrap();
    }

    let candidate = TIMESTAMP_RE.find(file_name)?;
    NaiveDateTime::parse_from_str(candidate.as_str(), time_format).ok()
}
