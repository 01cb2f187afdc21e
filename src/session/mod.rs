//! 対話式アノテーションセッション
//!
//! 画像列・ラベル配列・カーソル・進捗カウンタを持ち、
//! 表示 → コマンド入力 → 適用 → 条件付き保存 のループを回す。
//! 途中で中断しても保存先ディレクトリから再開できる。

mod command;
mod store;
mod window;

pub use command::{parse, Command};
pub use store::{reconcile, LabelStore, ProgressRecord, SessionState, StoreSnapshot};
pub use window::{build_window, window_bounds, DisplayItem};

use crate::error::{PhotoLabelError, Result};
use crate::scanner::ImageInfo;
use crate::schema::LabelSet;
use crate::viewer::WindowView;
use chrono::NaiveDateTime;
use dialoguer::Input;
use std::path::{Path, PathBuf};

/// アノテーション対象の1枚。撮影時刻は必須
#[derive(Debug, Clone)]
pub struct Item {
    pub path: PathBuf,
    pub file_name: String,
    pub taken_at: NaiveDateTime,
}

/// スキャン結果から撮影時刻のある画像だけを取り出す
///
/// 戻り値は (対象画像, スキップ枚数)。
pub fn into_items(scanned: Vec<ImageInfo>) -> (Vec<Item>, usize) {
    let total = scanned.len();
    let items: Vec<Item> = scanned
        .into_iter()
        .filter_map(|info| {
            info.taken_at.map(|taken_at| Item {
                path: info.path,
                file_name: info.file_name,
                taken_at,
            })
        })
        .collect();
    let skipped = total - items.len();
    (items, skipped)
}

/// コマンド適用後のループ継続判定
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopAction {
    Continue,
    ShowHelp,
    Quit,
}

pub struct AnnotationSession {
    items: Vec<Item>,
    schema: LabelSet,
    store: LabelStore,
    labels: Vec<Option<String>>,
    cursor: usize,
    annotated: usize,
    display_count: usize,
    save_freq: usize,
}

impl AnnotationSession {
    /// セッションを開く。保存先に前回の状態があれば復元する
    ///
    /// 画像列はここで一度だけ撮影時刻順に安定ソートされ、以降の
    /// インデックスと保存されるラベル配列はすべてこの正準順を指す。
    pub fn open(
        store_dir: &Path,
        schema: LabelSet,
        mut items: Vec<Item>,
        display_count: usize,
        save_freq: usize,
    ) -> Result<Self> {
        if items.is_empty() {
            return Err(PhotoLabelError::EmptyItems);
        }
        if display_count == 0 {
            return Err(PhotoLabelError::Config("表示枚数は1以上にしてください".into()));
        }
        if save_freq == 0 {
            return Err(PhotoLabelError::Config("保存頻度は1以上にしてください".into()));
        }

        // 正準順の確定。復元より先でなければならない
        items.sort_by_key(|item| item.taken_at);

        let store = LabelStore::open(store_dir)?;
        let state = store::reconcile(store.snapshot(), items.len())?;

        Ok(Self {
            items,
            schema,
            store,
            labels: state.labels,
            cursor: state.cursor,
            annotated: state.annotated,
            display_count,
            save_freq,
        })
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn annotated(&self) -> usize {
        self.annotated
    }

    pub fn labels(&self) -> &[Option<String>] {
        &self.labels
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// 現在のカーソル位置を中心とした表示窓
    pub fn window(&self) -> Vec<DisplayItem> {
        window::build_window(
            &self.items,
            &self.labels,
            self.cursor,
            self.display_count,
            self.annotated,
        )
    }

    /// 1コマンドを適用する
    ///
    /// 範囲外への移動やコピーはエラーにせずクランプまたは読み捨てる。
    /// 返すエラーは保存失敗のみ。
    pub fn apply(&mut self, input: &str) -> Result<LoopAction> {
        match command::parse(input, &self.schema) {
            Command::Label(name) => {
                self.labels[self.cursor] = Some(name);
                self.cursor = (self.cursor + 1).min(self.last_index());
                self.annotated += 1;
                self.persist_if_due()?;
            }
            Command::Next(n) => {
                self.cursor = self.cursor.saturating_add(n).min(self.last_index());
            }
            Command::Prev(n) => {
                self.cursor = self.cursor.saturating_sub(n);
            }
            Command::Copy(n) => {
                // コピー範囲が収まらない場合は黙って何もしない（末尾を
                // 越えるコピーを防ぐガード。部分コピーはしない）
                let fits = self
                    .cursor
                    .checked_add(n)
                    .map(|end| end < self.items.len())
                    .unwrap_or(false);
                if n > 0 && self.cursor > 0 && fits {
                    let source = self.labels[self.cursor - 1].clone();
                    for slot in &mut self.labels[self.cursor..self.cursor + n] {
                        *slot = source.clone();
                    }
                    self.cursor += n;
                    self.annotated += n;
                    self.persist_if_due()?;
                }
            }
            Command::Help => return Ok(LoopAction::ShowHelp),
            Command::Quit => {
                // 終了時は保存頻度に関わらず必ず保存する
                self.persist()?;
                return Ok(LoopAction::Quit);
            }
            Command::Noop => {}
        }

        Ok(LoopAction::Continue)
    }

    /// ラベル配列と進捗をディスクへ書き出す
    pub fn persist(&self) -> Result<()> {
        self.store.save(&self.labels, self.cursor)
    }

    fn persist_if_due(&self) -> Result<()> {
        if self.annotated % self.save_freq == 0 {
            self.persist()?;
        }
        Ok(())
    }

    fn last_index(&self) -> usize {
        self.items.len() - 1
    }

    /// 表示 → 入力 → 適用 のループ。quitまたは入力の中断で抜ける
    pub fn run<V: WindowView>(&mut self, view: &V) -> Result<()> {
        loop {
            view.show(&self.window())?;

            let input = match read_command() {
                Ok(line) => line,
                Err(err) => {
                    // Ctrl-C等で入力が途切れてもベストエフォートで保存する
                    eprintln!("\n⚠ 入力が中断されました: {}", err);
                    match self.persist() {
                        Ok(()) => println!("✔ 進捗を保存しました"),
                        Err(save_err) => eprintln!("⚠ 保存に失敗しました: {}", save_err),
                    }
                    break;
                }
            };

            match self.apply(&input) {
                Ok(LoopAction::Quit) => {
                    println!("✔ 保存して終了しました");
                    break;
                }
                Ok(LoopAction::ShowHelp) => self.print_help(),
                Ok(LoopAction::Continue) => {}
                // 保存失敗はこの回の保存だけの失敗として報告し、ループは続ける
                Err(err) => eprintln!("⚠ 保存に失敗しました: {}", err),
            }
        }

        Ok(())
    }

    fn print_help(&self) {
        println!("コマンド:");
        println!("- next/. [N] - N枚先へ進む");
        println!("- prev/, [N] - N枚前へ戻る");
        println!("- copy/c [N] - 直前のラベルを次のN枚へコピー");
        println!("- help/h - この一覧を表示");
        println!("- quit/q - 保存して終了");
        println!("ラベル:");
        for entry in self.schema.entries() {
            println!("- {} → {}", entry.short, entry.long);
        }
    }
}

fn read_command() -> Result<String> {
    Input::<String>::new()
        .with_prompt("ラベル/コマンド")
        .allow_empty(true)
        .interact_text()
        .map_err(|e| PhotoLabelError::Input(e.to_string()))
}
