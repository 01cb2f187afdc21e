//! コマンド解釈
//!
//! 1行の入力テキストをコマンドに変換する。優先順位:
//! ラベル完全一致 → next/. → prev/, → copy/c → help → quit → 無視。
//! 打ち間違いはエラーにせず `Noop` として読み捨てる。

use crate::schema::LabelSet;
use regex::Regex;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// カーソル位置にラベルを付けて1枚進む（正式名に解決済み）
    Label(String),
    /// N枚先へ進む（末尾でクランプ）
    Next(usize),
    /// N枚前へ戻る（先頭でクランプ）
    Prev(usize),
    /// 直前のラベルを次のN枚へコピー
    Copy(usize),
    /// コマンド一覧を表示
    Help,
    /// 保存して終了
    Quit,
    /// 解釈できない入力。何もしない
    Noop,
}

pub fn parse(input: &str, schema: &LabelSet) -> Command {
    let cmd = input.trim();

    if let Some(long) = schema.resolve(cmd) {
        return Command::Label(long.to_string());
    }
    if cmd.starts_with("next") || cmd.starts_with('.') {
        return Command::Next(repeat_count(cmd));
    }
    if cmd.starts_with("prev") || cmd.starts_with(',') {
        return Command::Prev(repeat_count(cmd));
    }
    if cmd.starts_with("copy") || cmd.starts_with('c') {
        return Command::Copy(repeat_count(cmd));
    }
    if cmd == "help" || cmd == "h" {
        return Command::Help;
    }
    if cmd == "quit" || cmd == "q" {
        return Command::Quit;
    }

    Command::Noop
}

/// `<コマンド><数字>` 形式の数字部分を取り出す
///
/// 文字列中の最初の連続した数字列をNとする。数字がなければ1。
fn repeat_count(cmd: &str) -> usize {
    lazy_static::lazy_static! {
        static ref REPEAT_RE: Regex = Regex::new(r"\d+").unwrap();
    }

    REPEAT_RE
        .find(cmd)
        .and_then(|m| m.as_str().parse().ok())
        .unwrap_or(1)
}
