//! 削除前の確認プロンプト

use std::io::BufRead;

use crate::error::{CloneError, Result};
use crate::i18n::{msg, Msg};
use crate::output::Reporter;

/// 確認の状態
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirmation {
    /// y/n の回答待ち
    AwaitingAnswer,
    /// 回答済み (true なら続行)
    Resolved(bool),
}

impl Confirmation {
    /// 1行の入力で状態を遷移させる
    ///
    /// 最初の1文字を小文字にして判定する (先頭の空白も1文字として扱う)。
    /// `y`/`n` 以外は回答待ちのまま。回答済みなら何もしない。
    pub fn feed(self, answer: &str) -> Self {
        if let Confirmation::Resolved(_) = self {
            return self;
        }
        match answer.chars().next().map(|c| c.to_ascii_lowercase()) {
            Some('y') => Confirmation::Resolved(true),
            Some('n') => Confirmation::Resolved(false),
            _ => Confirmation::AwaitingAnswer,
        }
    }
}

/// y/n の回答が得られるまで入力を読む
///
/// Args:
///     input: 回答を読む入力 (通常は標準入力)
///     reporter: プロンプトの出力先
///
/// Returns:
///     `y` で始まる回答なら true、`n` なら false
pub fn confirm<R: BufRead>(mut input: R, reporter: &mut dyn Reporter) -> Result<bool> {
    reporter.emit_prompt(msg(Msg::ConfirmPrompt));

    let mut state = Confirmation::AwaitingAnswer;
    let mut buf = String::new();
    loop {
        if let Confirmation::Resolved(answer) = state {
            tracing::debug!(answer, "confirmation resolved");
            return Ok(answer);
        }

        buf.clear();
        let read = input.read_line(&mut buf).map_err(CloneError::Prompt)?;
        if read == 0 {
            return Err(CloneError::PromptClosed);
        }
        state = state.feed(&buf);
    }
}
