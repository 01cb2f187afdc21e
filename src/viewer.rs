//! 表示窓の描画
//!
//! 描画の仕組み自体はセッションの関心外なのでトレイトで切り離す。
//! 同梱の`TextView`は窓をテキスト1行ずつで出すだけの最小実装。
//! 画像そのものの表示は外部の表示系に任せる。

use crate::error::Result;
use crate::session::DisplayItem;

pub trait WindowView {
    fn show(&self, window: &[DisplayItem]) -> Result<()>;
}

/// コンソールへのテキスト表示
pub struct TextView;

impl WindowView for TextView {
    fn show(&self, window: &[DisplayItem]) -> Result<()> {
        println!();
        for item in window {
            // カーソル位置はマーカーで強調する
            let marker = if item.is_cursor { "▶" } else { " " };
            let label = item.label.as_deref().unwrap_or("（未設定）");

            let mut line = format!(
                "{} [{}] {} {}  {}",
                marker,
                fmt_offset(item.offset),
                item.time_label,
                item.file_name,
                label
            );
            if let Some((annotated, total)) = item.progress {
                line.push_str(&format!("  {}/{}", annotated, total));
            }
            println!("{}", line);
        }
        Ok(())
    }
}

fn fmt_offset(offset: i64) -> String {
    if offset == 0 {
        " 0".to_string()
    } else {
        format!("{:+}", offset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fmt_offset() {
        assert_eq!(fmt_offset(-2), "-2");
        assert_eq!(fmt_offset(0), " 0");
        assert_eq!(fmt_offset(3), "+3");
    }
}
