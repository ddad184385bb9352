//! 複製先の準備 (マージしない場合は中身を全削除する)

use std::fs;
use std::io::BufRead;
use std::path::Path;

use walkdir::WalkDir;

use crate::config::Config;
use crate::error::{CloneError, Result};
use crate::i18n::{msg, Msg};
use crate::output::{Reporter, LEVEL_DETAIL, LEVEL_TRACE};
use crate::prompt::confirm;

/// 削除処理の統計
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CleanStats {
    /// 削除したファイル (シンボリックリンクを含む)
    pub files_removed: usize,
    /// 削除したディレクトリ (複製先のルートを含む)
    pub directories_removed: usize,
}

/// 複製先を準備する
///
/// マージ時は複製先がなければ作るだけで、既存の中身には触れない。
/// マージしない場合は必要に応じて確認したうえで、複製先を空のディレクトリにする。
///
/// Args:
///     config: 実行設定 (前提条件は確認済みであること)
///     input: 確認プロンプトの入力
///     reporter: 進捗の出力先
///
/// Returns:
///     削除処理の統計。確認で中止された場合は `CloneError::Declined`
pub fn prepare_target<R: BufRead>(
    config: &Config,
    input: R,
    reporter: &mut dyn Reporter,
) -> Result<CleanStats> {
    let target = config.target.as_path();

    if config.merge {
        tracing::debug!(path = %target.display(), "merge mode, keeping existing target");
        create_target_root(target)?;
        return Ok(CleanStats::default());
    }

    if config.warn_before_destroy {
        reporter.emit(&format!("{}: {}", msg(Msg::DestroyWarning), target.display()));
        if !confirm(input, reporter)? {
            return Err(CloneError::Declined);
        }
        reporter.line(LEVEL_DETAIL, msg(Msg::Continuing));
    }

    let stats = if target.is_dir() {
        clean_tree(target, reporter)?
    } else {
        CleanStats::default()
    };
    create_target_root(target)?;

    tracing::debug!(
        files = stats.files_removed,
        directories = stats.directories_removed,
        "target cleaned"
    );
    Ok(stats)
}

/// ディレクトリツリーを深い方から順に削除する
///
/// 各ディレクトリの直下のファイルを消してから、空になったディレクトリを消す。
/// シンボリックリンクはたどらず、リンク自体を削除する。`root` 自身も削除される。
pub fn clean_tree(root: &Path, reporter: &mut dyn Reporter) -> Result<CleanStats> {
    let mut stats = CleanStats::default();

    for entry in WalkDir::new(root).follow_links(false).contents_first(true) {
        let entry = entry?;
        let path = entry.path();

        if entry.file_type().is_dir() {
            fs::remove_dir(path).map_err(|e| CloneError::io("remove directory", path, e))?;
            stats.directories_removed += 1;
        } else {
            reporter.line(LEVEL_TRACE, &format!("{} {}", msg(Msg::Removing), path.display()));
            fs::remove_file(path).map_err(|e| CloneError::io("remove file", path, e))?;
            stats.files_removed += 1;
        }
    }

    Ok(stats)
}

fn create_target_root(target: &Path) -> Result<()> {
    fs::create_dir_all(target).map_err(|e| CloneError::io("create directory", target, e))
}
