//! 解決済みの実行設定

use std::fs;
use std::path::{Component, Path, PathBuf};

use anyhow::Context;

use crate::cli::Args;
use crate::error::{CloneError, Result};

/// 複製しないファイル名 (大文字小文字を区別)
pub const IGNORED_FILE_NAME: &str = ".DS_Store";

/// 実行設定
///
/// 走査の前に一度だけ作られ、以後は変更されない。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// 複製元 (絶対パス)
    pub source: PathBuf,
    /// 複製先 (絶対パス)
    pub target: PathBuf,
    /// 複製先を削除せずに重ねる
    pub merge: bool,
    /// ディレクトリへのシンボリックリンクをたどる
    pub follow_links: bool,
    /// 削除前に確認する
    pub warn_before_destroy: bool,
    /// 詳細度
    pub verbosity: u8,
}

impl Config {
    /// コマンドライン引数から設定を作る
    ///
    /// Returns:
    ///     source か target が指定されていなければ None
    pub fn resolve(args: &Args) -> anyhow::Result<Option<Self>> {
        let (Some(source), Some(target)) = (&args.source, &args.target) else {
            return Ok(None);
        };

        let cwd = std::env::current_dir().context("failed to determine the current directory")?;
        Ok(Some(Config {
            source: absolutize(&cwd, source),
            target: absolutize(&cwd, target),
            merge: args.merge,
            follow_links: args.follow_links,
            warn_before_destroy: !args.skip_warning,
            verbosity: args.verbose,
        }))
    }

    /// 副作用を起こす前に前提条件を確認する
    pub fn validate(&self) -> Result<()> {
        if !self.source.is_dir() {
            return Err(CloneError::SourceNotDirectory(self.source.clone()));
        }

        // ディレクトリを指すシンボリックリンクはマージ時のみ複製先にできる
        if let Ok(meta) = fs::symlink_metadata(&self.target) {
            let accepted = if meta.file_type().is_symlink() {
                self.merge && self.target.is_dir()
            } else {
                meta.is_dir()
            };
            if !accepted {
                return Err(CloneError::TargetIsFile(self.target.clone()));
            }
        }

        if self.target.starts_with(&self.source) || self.source.starts_with(&self.target) {
            return Err(CloneError::OverlappingPaths {
                source_root: self.source.clone(),
                target_root: self.target.clone(),
            });
        }

        Ok(())
    }
}

/// `base` を基準に絶対パスにし、`.` と `..` を字句的に取り除く
///
/// シンボリックリンクは解決しない。
pub fn absolutize(base: &Path, path: &Path) -> PathBuf {
    let joined = if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    };

    let mut normalized = PathBuf::new();
    for component in joined.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                normalized.pop();
            }
            other => normalized.push(other.as_os_str()),
        }
    }
    normalized
}
