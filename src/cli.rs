//! コマンドライン引数のパースと設定

use std::io::{self, Write};
use std::path::PathBuf;

use clap::{CommandFactory, Parser};

use crate::i18n::{msg, Msg};

/// ディレクトリツリーをハードリンクで複製するツール
#[derive(Parser, Debug)]
#[command(name = "hardlink-clone")]
#[command(version, about, long_about = None)]
pub struct Args {
    /// 複製元のディレクトリ
    #[arg(short, long, value_name = "DIR")]
    pub source: Option<PathBuf>,

    /// 複製先のディレクトリ
    #[arg(short, long, value_name = "DIR")]
    pub target: Option<PathBuf>,

    /// 複製先を削除する前の確認を省略する (cron向け、マージ時は無関係)
    #[arg(long = "skip", visible_alias = "skip-warning")]
    pub skip_warning: bool,

    /// 複製先を削除せずに上書きマージする (非推奨)
    #[arg(short, long)]
    pub merge: bool,

    /// シンボリックリンクをたどって複製する (循環リンクがあると終了しない場合がある)
    #[arg(short, long = "follow-links", alias = "follow_links")]
    pub follow_links: bool,

    /// 詳細出力 (繰り返すほど詳細)
    #[arg(short, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Args {
    /// 引数をパースして返す
    pub fn parse_args() -> Self {
        Args::parse()
    }

    /// 使い方を書き出す
    pub fn write_usage<W: Write>(out: &mut W) -> io::Result<()> {
        write!(out, "{}", Args::command().render_help())?;
        writeln!(out)
    }

    /// 使い方を標準出力に表示する
    pub fn print_usage() {
        if let Err(e) = Args::write_usage(&mut io::stdout().lock()) {
            eprintln!("{}: {}", msg(Msg::ErrorOccurred), e);
        }
    }
}
