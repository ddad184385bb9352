use std::io::{self, BufRead};

use crate::cli::Args;
use crate::config::Config;
use crate::error::{CloneError, Result, EXIT_PRECONDITION, EXIT_USAGE};
use crate::i18n::{msg, Msg};
use crate::output::{ConsoleReporter, Reporter, LEVEL_ACTION};
use crate::prepare::{prepare_target, CleanStats};
use crate::replicator::{replicate, CloneStats};

/// 実行結果
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub cleaned: CleanStats,
    pub cloned: CloneStats,
}

pub fn run(args: Args) -> i32 {
    let config = match Config::resolve(&args) {
        Ok(Some(config)) => config,
        Ok(None) => {
            Args::print_usage();
            return EXIT_USAGE;
        }
        Err(e) => {
            eprintln!("{}: {:#}", msg(Msg::ErrorOccurred), e);
            return EXIT_PRECONDITION;
        }
    };

    let mut reporter = ConsoleReporter::new(config.verbosity);
    let stdin = io::stdin();
    match execute(&config, stdin.lock(), &mut reporter) {
        Ok(_) => 0,
        Err(e) => e.exit_code(),
    }
}

/// 前提条件の確認、複製先の準備、ツリーの複製を順に行う
///
/// エラーは出力先に報告したうえで返す。途中で失敗した場合、
/// それまでに作られた複製先はそのまま残る。
pub fn execute<R: BufRead>(
    config: &Config,
    input: R,
    reporter: &mut dyn Reporter,
) -> Result<RunSummary> {
    let result = clone_tree(config, input, reporter);
    if let Err(e) = &result {
        tracing::debug!(error = %e, "clone aborted");
        report_error(e, reporter);
    }
    result
}

fn clone_tree<R: BufRead>(
    config: &Config,
    input: R,
    reporter: &mut dyn Reporter,
) -> Result<RunSummary> {
    config.validate()?;
    tracing::info!(
        source_root = %config.source.display(),
        target_root = %config.target.display(),
        merge = config.merge,
        follow_links = config.follow_links,
        "starting clone"
    );

    let cleaned = prepare_target(config, input, reporter)?;
    let cloned = replicate(config, reporter)?;

    let summary = RunSummary { cleaned, cloned };
    print_summary(&summary, reporter);
    Ok(summary)
}

fn report_error(err: &CloneError, reporter: &mut dyn Reporter) {
    match err {
        CloneError::SourceNotDirectory(path) => {
            reporter.emit_error(&format!("{}: {}", msg(Msg::SourceNotDirectory), path.display()));
        }
        CloneError::TargetIsFile(path) => {
            reporter.emit_error(&format!("{}: {}", msg(Msg::TargetIsFile), path.display()));
        }
        CloneError::OverlappingPaths {
            source_root,
            target_root,
        } => {
            reporter.emit_error(&format!(
                "{}: {} / {}",
                msg(Msg::OverlappingPaths),
                source_root.display(),
                target_root.display()
            ));
        }
        CloneError::Declined => reporter.emit_error(msg(Msg::Stopping)),
        CloneError::PromptClosed => {
            reporter.emit_error(msg(Msg::PromptClosed));
            reporter.emit_error(msg(Msg::Stopping));
        }
        other => reporter.emit_error(&format!("{}: {}", msg(Msg::ErrorOccurred), other)),
    }
}

fn print_summary(summary: &RunSummary, reporter: &mut dyn Reporter) {
    let cloned = &summary.cloned;
    reporter.line(LEVEL_ACTION, msg(Msg::Done));
    reporter.line(
        LEVEL_ACTION,
        &format!("  {}: {}", msg(Msg::DirectoriesCreated), cloned.directories_created),
    );
    reporter.line(LEVEL_ACTION, &format!("  {}: {}", msg(Msg::FilesLinked), cloned.files_linked));
    reporter.line(LEVEL_ACTION, &format!("  {}: {}", msg(Msg::FilesSkipped), cloned.files_skipped));
    if cloned.files_ignored > 0 {
        reporter.line(LEVEL_ACTION, &format!("  {}: {}", msg(Msg::FilesIgnored), cloned.files_ignored));
    }
}
