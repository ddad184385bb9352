//! ディレクトリツリーをハードリンクで複製するライブラリ

pub mod app;
pub mod cli;
pub mod config;
pub mod error;
pub mod hardlink;
pub mod i18n;
pub mod logging;
pub mod output;
pub mod prepare;
pub mod prompt;
pub mod replicator;
