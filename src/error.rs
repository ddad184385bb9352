//! エラー定義

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// 前提条件違反の終了コード
pub const EXIT_PRECONDITION: i32 = 1;
/// 使い方の誤り (source/target 未指定) の終了コード
pub const EXIT_USAGE: i32 = 2;
/// ユーザーが中止した場合の終了コード
pub const EXIT_DECLINED: i32 = 3;
/// ファイルシステム操作失敗の終了コード
pub const EXIT_FILESYSTEM: i32 = 4;

/// 複製処理のエラー
#[derive(Error, Debug)]
pub enum CloneError {
    /// source が存在しない、またはディレクトリではない
    #[error("source does not exist or is not a directory: {}", .0.display())]
    SourceNotDirectory(PathBuf),

    /// target が通常ファイル
    #[error("target cannot be a file: {}", .0.display())]
    TargetIsFile(PathBuf),

    /// source と target が重なっている
    #[error("source and target overlap: {} / {}", .source_root.display(), .target_root.display())]
    OverlappingPaths {
        source_root: PathBuf,
        target_root: PathBuf,
    },

    /// 確認プロンプトで中止された
    #[error("stopped by user")]
    Declined,

    /// 回答を得る前に入力が閉じられた
    #[error("confirmation input closed before an answer was given")]
    PromptClosed,

    /// 確認プロンプトの読み込み失敗
    #[error("failed to read confirmation: {0}")]
    Prompt(#[source] io::Error),

    /// ディレクトリ走査の失敗
    #[error("directory traversal failed: {0}")]
    Walk(#[from] walkdir::Error),

    /// ファイルシステム操作の失敗
    #[error("{action} failed: {}: {source}", .path.display())]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl CloneError {
    /// `Io` バリアントを作る
    pub fn io(action: &'static str, path: impl Into<PathBuf>, source: io::Error) -> Self {
        CloneError::Io {
            action,
            path: path.into(),
            source,
        }
    }

    /// 副作用なしに終了したエラーかどうか
    pub fn is_precondition(&self) -> bool {
        matches!(
            self,
            CloneError::SourceNotDirectory(_)
                | CloneError::TargetIsFile(_)
                | CloneError::OverlappingPaths { .. }
        )
    }

    /// プロセスの終了コード
    pub fn exit_code(&self) -> i32 {
        match self {
            CloneError::SourceNotDirectory(_)
            | CloneError::TargetIsFile(_)
            | CloneError::OverlappingPaths { .. } => EXIT_PRECONDITION,
            CloneError::Declined | CloneError::PromptClosed => EXIT_DECLINED,
            CloneError::Prompt(_) | CloneError::Walk(_) | CloneError::Io { .. } => {
                EXIT_FILESYSTEM
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, CloneError>;
