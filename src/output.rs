//! 進捗メッセージの出力先
//!
//! 各処理は [`Reporter`] を受け取り、詳細度に応じて行を出力する。
//! 出力は助言的なもので、処理の流れには影響しない。

use std::io::{self, Write};

/// リンク作成と完了行
pub const LEVEL_ACTION: u8 = 1;
/// スキップ通知と続行通知
pub const LEVEL_DETAIL: u8 = 2;
/// 削除されるファイルごとの通知
pub const LEVEL_TRACE: u8 = 3;

/// 進捗・状態メッセージの出力先
pub trait Reporter {
    /// 詳細度 (大きいほど多く出力する)
    fn verbosity(&self) -> u8;

    /// 1行出力する
    fn emit(&mut self, text: &str);

    /// 改行なしで出力する (確認プロンプト用)
    fn emit_prompt(&mut self, text: &str);

    /// エラーを出力する (詳細度に関係なく常に出力)
    fn emit_error(&mut self, text: &str);

    /// `level` が詳細度以下のときだけ出力する
    fn line(&mut self, level: u8, text: &str) {
        if level <= self.verbosity() {
            self.emit(text);
        }
    }
}

/// 標準出力/標準エラー出力に書き出す
#[derive(Debug, Clone, Copy)]
pub struct ConsoleReporter {
    verbosity: u8,
}

impl ConsoleReporter {
    pub fn new(verbosity: u8) -> Self {
        Self { verbosity }
    }
}

impl Reporter for ConsoleReporter {
    fn verbosity(&self) -> u8 {
        self.verbosity
    }

    fn emit(&mut self, text: &str) {
        println!("{}", text);
    }

    fn emit_prompt(&mut self, text: &str) {
        let mut stdout = io::stdout().lock();
        let _ = write!(stdout, "{}", text);
        let _ = stdout.flush();
    }

    fn emit_error(&mut self, text: &str) {
        eprintln!("{}", text);
    }
}

/// 出力をメモリに保持する
#[derive(Debug, Default, Clone)]
pub struct MemoryReporter {
    verbosity: u8,
    pub lines: Vec<String>,
    pub errors: Vec<String>,
}

impl MemoryReporter {
    pub fn new(verbosity: u8) -> Self {
        Self {
            verbosity,
            ..Self::default()
        }
    }

    /// `needle` を含む行があるか
    pub fn contains(&self, needle: &str) -> bool {
        self.lines.iter().any(|l| l.contains(needle))
    }
}

impl Reporter for MemoryReporter {
    fn verbosity(&self) -> u8 {
        self.verbosity
    }

    fn emit(&mut self, text: &str) {
        self.lines.push(text.to_string());
    }

    fn emit_prompt(&mut self, text: &str) {
        self.lines.push(text.to_string());
    }

    fn emit_error(&mut self, text: &str) {
        self.errors.push(text.to_string());
    }
}
