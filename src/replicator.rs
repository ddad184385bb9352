//! ディレクトリツリーの複製
//!
//! 複製元を上から順に走査し、ディレクトリは複製先に作成し、
//! ファイルはハードリンクで複製先に配置する。

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use walkdir::{DirEntry, WalkDir};

use crate::config::{Config, IGNORED_FILE_NAME};
use crate::error::{CloneError, Result};
use crate::hardlink::{link_file, LinkOutcome, Occupant};
use crate::i18n::{msg, Msg};
use crate::output::{Reporter, LEVEL_ACTION, LEVEL_DETAIL};

/// 複製処理の統計
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CloneStats {
    pub directories_created: usize,
    pub files_linked: usize,
    pub files_skipped: usize,
    pub files_ignored: usize,
}

/// 複製元のツリーを複製先に再現する
///
/// 複製先は準備済み (存在するディレクトリ) であること。
/// `follow_links` が true の場合、循環するシンボリックリンクは walkdir のループ検出に
/// かかり、走査エラーとして返る。循環の回避は行わず、検出された時点で処理を打ち切る。
///
/// Args:
///     config: 実行設定
///     reporter: 進捗の出力先
///
/// Returns:
///     複製処理の統計
pub fn replicate(config: &Config, reporter: &mut dyn Reporter) -> Result<CloneStats> {
    let source = config.source.as_path();
    let target = config.target.as_path();
    let mut stats = CloneStats::default();

    let walker = WalkDir::new(source)
        .follow_links(config.follow_links)
        .min_depth(1)
        .sort_by_file_name();

    for entry in walker {
        let entry = entry?;
        let dest = target_path(source, target, entry.path())?;

        if is_directory(&entry) {
            if ensure_directory(&dest)? {
                stats.directories_created += 1;
            }
            continue;
        }

        if entry.file_name() == IGNORED_FILE_NAME {
            stats.files_ignored += 1;
            continue;
        }

        match link_file(entry.path(), &dest) {
            LinkOutcome::Linked => {
                stats.files_linked += 1;
                reporter.line(
                    LEVEL_ACTION,
                    &format!("{}: {} => {}", msg(Msg::Linking), dest.display(), entry.path().display()),
                );
            }
            LinkOutcome::SkippedAlreadyExists(Occupant::Present) => {
                stats.files_skipped += 1;
                reporter.line(LEVEL_DETAIL, &format!("{}: {}", msg(Msg::Skipping), dest.display()));
            }
            LinkOutcome::SkippedAlreadyExists(Occupant::BrokenSymlink) => {
                stats.files_skipped += 1;
                tracing::warn!(path = %dest.display(), "target path occupied by a broken symlink");
                reporter.line(
                    LEVEL_ACTION,
                    &format!("{}: {}", msg(Msg::BrokenSymlinkOccupant), dest.display()),
                );
            }
            LinkOutcome::SkippedAlreadyExists(Occupant::AppearedDuringLink) => {
                stats.files_skipped += 1;
                tracing::debug!(path = %dest.display(), "target appeared while linking");
            }
            LinkOutcome::Failed(e) => return Err(CloneError::io("hard link", dest, e)),
        }
    }

    Ok(stats)
}

/// 複製元のパスを複製先のパスに置き換える
fn target_path(source: &Path, target: &Path, path: &Path) -> Result<PathBuf> {
    let relative = path.strip_prefix(source).map_err(|_| {
        CloneError::io(
            "map path",
            path,
            io::Error::new(io::ErrorKind::InvalidInput, "path is outside the source tree"),
        )
    })?;
    Ok(target.join(relative))
}

/// ディレクトリとして扱うエントリか
///
/// リンクをたどらない場合でも、ディレクトリを指すシンボリックリンクは
/// 空のディレクトリとして複製する (中身は走査しない)。
fn is_directory(entry: &DirEntry) -> bool {
    if entry.file_type().is_dir() {
        return true;
    }
    entry.path_is_symlink()
        && fs::metadata(entry.path())
            .map(|meta| meta.is_dir())
            .unwrap_or(false)
}

/// ディレクトリがなければ作る
///
/// Returns:
///     新しく作成した場合はtrue
fn ensure_directory(path: &Path) -> Result<bool> {
    if path.is_dir() {
        return Ok(false);
    }
    fs::create_dir_all(path).map_err(|e| CloneError::io("create directory", path, e))?;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hardlink::is_same_inode;
    use crate::output::MemoryReporter;
    use std::fs::File;
    use std::io::Write;
    use tempfile::TempDir;

    struct Fixture {
        _temp_dir: TempDir,
        source: PathBuf,
        target: PathBuf,
    }

    impl Fixture {
        fn new() -> Self {
            let temp_dir = TempDir::new().unwrap();
            let source = temp_dir.path().join("source");
            let target = temp_dir.path().join("target");
            fs::create_dir_all(source.join("sub/deeper")).unwrap();
            fs::create_dir_all(source.join("empty")).unwrap();
            fs::create_dir_all(&target).unwrap();
            write(&source.join("top.txt"), "top");
            write(&source.join("sub/x.txt"), "x");
            write(&source.join("sub/deeper/y.txt"), "y");
            Self {
                _temp_dir: temp_dir,
                source,
                target,
            }
        }

        fn config(&self, follow_links: bool) -> Config {
            Config {
                source: self.source.clone(),
                target: self.target.clone(),
                merge: true,
                follow_links,
                warn_before_destroy: false,
                verbosity: 2,
            }
        }
    }

    fn write(path: &Path, content: &str) {
        File::create(path).unwrap().write_all(content.as_bytes()).unwrap();
    }

    fn listing(root: &Path) -> Vec<PathBuf> {
        let mut paths: Vec<_> = WalkDir::new(root)
            .min_depth(1)
            .into_iter()
            .map(|e| e.unwrap().path().strip_prefix(root).unwrap().to_path_buf())
            .collect();
        paths.sort();
        paths
    }

    #[test]
    fn test_replicate_links_every_file() {
        let fx = Fixture::new();
        let mut reporter = MemoryReporter::new(1);
        let stats = replicate(&fx.config(false), &mut reporter).unwrap();

        assert_eq!(stats.files_linked, 3);
        assert_eq!(stats.directories_created, 3);
        assert!(fx.target.join("empty").is_dir());
        for file in ["top.txt", "sub/x.txt", "sub/deeper/y.txt"] {
            assert!(is_same_inode(&fx.source.join(file), &fx.target.join(file)).unwrap());
        }
        assert!(reporter.contains("y.txt"));
    }

    #[test]
    fn test_replicate_twice_is_idempotent() {
        let fx = Fixture::new();
        let mut reporter = MemoryReporter::new(2);
        replicate(&fx.config(false), &mut reporter).unwrap();
        let first = listing(&fx.target);

        let stats = replicate(&fx.config(false), &mut reporter).unwrap();
        let second = listing(&fx.target);

        assert_eq!(first, second);
        assert_eq!(stats.files_linked, 0);
        assert_eq!(stats.files_skipped, 3);
        assert_eq!(stats.directories_created, 0);
    }

    #[test]
    fn test_replicate_skips_ignored_file_name() {
        let fx = Fixture::new();
        write(&fx.source.join(IGNORED_FILE_NAME), "meta");
        write(&fx.source.join("sub").join(IGNORED_FILE_NAME), "meta");
        // 大文字小文字は区別する
        write(&fx.source.join(".ds_store"), "kept");

        let mut reporter = MemoryReporter::new(0);
        let stats = replicate(&fx.config(false), &mut reporter).unwrap();

        assert_eq!(stats.files_ignored, 2);
        let names: Vec<_> = listing(&fx.target)
            .into_iter()
            .filter_map(|p| p.file_name().map(|n| n.to_string_lossy().to_string()))
            .collect();
        assert!(!names.iter().any(|n| n == IGNORED_FILE_NAME));
        assert!(names.iter().any(|n| n == ".ds_store"));
    }

    #[test]
    fn test_replicate_keeps_existing_target_file() {
        let fx = Fixture::new();
        fs::create_dir_all(fx.target.join("sub")).unwrap();
        write(&fx.target.join("sub/x.txt"), "already here");

        let mut reporter = MemoryReporter::new(2);
        let stats = replicate(&fx.config(false), &mut reporter).unwrap();

        assert_eq!(stats.files_skipped, 1);
        assert_eq!(fs::read_to_string(fx.target.join("sub/x.txt")).unwrap(), "already here");
        assert!(reporter.contains(msg(Msg::Skipping)));
    }

    #[test]
    fn test_skip_notice_needs_detail_level() {
        let fx = Fixture::new();
        fs::create_dir_all(fx.target.join("sub")).unwrap();
        write(&fx.target.join("sub/x.txt"), "already here");

        let mut reporter = MemoryReporter::new(1);
        replicate(&fx.config(false), &mut reporter).unwrap();

        assert!(!reporter.contains(msg(Msg::Skipping)));
        assert!(reporter.contains(msg(Msg::Linking)));
    }

    #[test]
    fn test_directory_blocked_by_file_fails() {
        let fx = Fixture::new();
        write(&fx.target.join("sub"), "not a directory");

        let mut reporter = MemoryReporter::new(0);
        let err = replicate(&fx.config(false), &mut reporter).unwrap_err();
        assert!(matches!(err, CloneError::Io { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn test_symlinked_directory_not_followed_by_default() {
        let fx = Fixture::new();
        fs::create_dir(fx.source.join("realdir")).unwrap();
        write(&fx.source.join("realdir/a.txt"), "a");
        std::os::unix::fs::symlink("realdir", fx.source.join("linkdir")).unwrap();

        let mut reporter = MemoryReporter::new(0);
        replicate(&fx.config(false), &mut reporter).unwrap();

        assert!(fx.target.join("realdir/a.txt").exists());
        assert!(fx.target.join("linkdir").is_dir());
        assert!(!fs::symlink_metadata(fx.target.join("linkdir")).unwrap().file_type().is_symlink());
        assert!(!fx.target.join("linkdir/a.txt").exists());
    }

    #[cfg(unix)]
    #[test]
    fn test_symlinked_directory_followed_when_enabled() {
        let fx = Fixture::new();
        fs::create_dir(fx.source.join("realdir")).unwrap();
        write(&fx.source.join("realdir/a.txt"), "a");
        std::os::unix::fs::symlink("realdir", fx.source.join("linkdir")).unwrap();

        let mut reporter = MemoryReporter::new(0);
        replicate(&fx.config(true), &mut reporter).unwrap();

        let linked = fx.target.join("linkdir/a.txt");
        assert!(linked.is_file());
        assert!(is_same_inode(&fx.source.join("realdir/a.txt"), &linked).unwrap());
    }

    #[cfg(unix)]
    #[test]
    fn test_symlink_cycle_is_reported_when_following() {
        let fx = Fixture::new();
        std::os::unix::fs::symlink("..", fx.source.join("sub/loop")).unwrap();

        let mut reporter = MemoryReporter::new(0);
        let err = replicate(&fx.config(true), &mut reporter).unwrap_err();
        assert!(matches!(err, CloneError::Walk(_)));
    }

    #[cfg(unix)]
    #[test]
    fn test_broken_symlink_occupant_is_reported() {
        let fx = Fixture::new();
        std::os::unix::fs::symlink("nowhere", fx.target.join("top.txt")).unwrap();

        let mut reporter = MemoryReporter::new(1);
        let stats = replicate(&fx.config(false), &mut reporter).unwrap();

        assert_eq!(stats.files_skipped, 1);
        assert!(reporter.contains(msg(Msg::BrokenSymlinkOccupant)));
    }

    #[test]
    fn test_target_path_substitutes_prefix() {
        let mapped = target_path(
            Path::new("/data/src"),
            Path::new("/backup/dst"),
            Path::new("/data/src/a/b.txt"),
        )
        .unwrap();
        assert_eq!(mapped, PathBuf::from("/backup/dst/a/b.txt"));
    }
}
