//! ハードリンク処理

use std::fs;
use std::io;
use std::path::Path;

#[cfg(unix)]
use std::os::unix::fs::MetadataExt;

/// リンク先に既にあったもの
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Occupant {
    /// 事前確認でエントリが見つかった
    Present,
    /// 事前確認で壊れたシンボリックリンクが見つかった
    BrokenSymlink,
    /// 事前確認の後、リンク作成までの間に作られた
    AppearedDuringLink,
}

/// ハードリンク作成の結果
#[derive(Debug)]
pub enum LinkOutcome {
    /// リンク作成成功
    Linked,
    /// リンク先が既に存在するためスキップ
    SkippedAlreadyExists(Occupant),
    /// リンク作成失敗
    Failed(io::Error),
}

impl PartialEq for LinkOutcome {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (LinkOutcome::Linked, LinkOutcome::Linked) => true,
            (LinkOutcome::SkippedAlreadyExists(a), LinkOutcome::SkippedAlreadyExists(b)) => a == b,
            (LinkOutcome::Failed(a), LinkOutcome::Failed(b)) => a.kind() == b.kind(),
            _ => false,
        }
    }
}

/// 2つのファイルが同一inode (ハードリンク済み) か確認する
///
/// Args:
///     path1: 比較対象のパス1
///     path2: 比較対象のパス2
///
/// Returns:
///     同一inodeならtrue
#[cfg(unix)]
pub fn is_same_inode(path1: &Path, path2: &Path) -> io::Result<bool> {
    let meta1 = fs::metadata(path1)?;
    let meta2 = fs::metadata(path2)?;
    Ok(meta1.dev() == meta2.dev() && meta1.ino() == meta2.ino())
}

#[cfg(not(unix))]
pub fn is_same_inode(_path1: &Path, _path2: &Path) -> io::Result<bool> {
    Ok(false)
}

/// リンク先に既にあるものを調べる (シンボリックリンクはたどらない)
fn occupant(target: &Path) -> Option<Occupant> {
    let meta = fs::symlink_metadata(target).ok()?;
    if meta.file_type().is_symlink() && fs::metadata(target).is_err() {
        Some(Occupant::BrokenSymlink)
    } else {
        Some(Occupant::Present)
    }
}

/// `source` のデータを共有するハードリンクを `target` に作る
///
/// `target` に既に何かあれば上書きせずにスキップする。
/// `source` がシンボリックリンクの場合はリンク先のファイルを共有する。
///
/// Args:
///     source: リンク元ファイル
///     target: 作成するパス (親ディレクトリは作成済みであること)
///
/// Returns:
///     リンク結果
pub fn link_file(source: &Path, target: &Path) -> LinkOutcome {
    if let Some(found) = occupant(target) {
        return LinkOutcome::SkippedAlreadyExists(found);
    }

    let resolved = match fs::symlink_metadata(source) {
        Ok(meta) if meta.file_type().is_symlink() => match fs::canonicalize(source) {
            Ok(real) => real,
            Err(e) => return LinkOutcome::Failed(e),
        },
        Ok(_) => source.to_path_buf(),
        Err(e) => return LinkOutcome::Failed(e),
    };

    create_link(&resolved, target)
}

/// 事前確認の後にハードリンクを作る
///
/// 作成時点で `target` が存在していれば、その間に作られたものとしてスキップする。
fn create_link(source: &Path, target: &Path) -> LinkOutcome {
    match fs::hard_link(source, target) {
        Ok(()) => LinkOutcome::Linked,
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
            LinkOutcome::SkippedAlreadyExists(Occupant::AppearedDuringLink)
        }
        Err(e) => LinkOutcome::Failed(e),
    }
}
