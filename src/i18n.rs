//! 国際化 (i18n) サポート

use sys_locale::get_locale;

/// 現在のロケールが日本語かどうかを判定する
pub fn is_japanese() -> bool {
    get_locale()
        .map(|l| l.starts_with("ja"))
        .unwrap_or(false)
}

/// メッセージキー
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Msg {
    // 前提条件
    SourceNotDirectory,
    TargetIsFile,
    OverlappingPaths,

    // 確認プロンプト
    DestroyWarning,
    ConfirmPrompt,
    Continuing,
    Stopping,
    PromptClosed,

    // 処理中メッセージ
    Removing,
    Linking,
    Skipping,
    BrokenSymlinkOccupant,
    ErrorOccurred,

    // サマリー
    Done,
    DirectoriesCreated,
    FilesLinked,
    FilesSkipped,
    FilesIgnored,
}

/// ローカライズされたメッセージを取得する
pub fn msg(key: Msg) -> &'static str {
    if is_japanese() {
        msg_ja(key)
    } else {
        msg_en(key)
    }
}

fn msg_ja(key: Msg) -> &'static str {
    match key {
        // 前提条件
        Msg::SourceNotDirectory => "コピー元が存在しないか、ディレクトリではありません",
        Msg::TargetIsFile => "コピー先にファイルは指定できません",
        Msg::OverlappingPaths => "コピー元とコピー先が重なっています",

        // 確認プロンプト
        Msg::DestroyWarning => "コピー先の内容はすべて削除されます",
        Msg::ConfirmPrompt => "続行しますか? (y/n) ",
        Msg::Continuing => "続行します",
        Msg::Stopping => "中止しました",
        Msg::PromptClosed => "回答が得られないまま入力が終了しました",

        // 処理中メッセージ
        Msg::Removing => "削除",
        Msg::Linking => "リンク作成",
        Msg::Skipping => "スキップ (既に存在)",
        Msg::BrokenSymlinkOccupant => "スキップ (壊れたシンボリックリンクが存在)",
        Msg::ErrorOccurred => "エラー",

        // サマリー
        Msg::Done => "=== 処理完了 ===",
        Msg::DirectoriesCreated => "作成したディレクトリ",
        Msg::FilesLinked => "リンクしたファイル",
        Msg::FilesSkipped => "スキップしたファイル",
        Msg::FilesIgnored => "除外したファイル",
    }
}

fn msg_en(key: Msg) -> &'static str {
    match key {
        // Preconditions
        Msg::SourceNotDirectory => "Source does not exist or is not a directory",
        Msg::TargetIsFile => "Target cannot be a file",
        Msg::OverlappingPaths => "Source and target overlap",

        // Confirmation
        Msg::DestroyWarning => "Everything under the target will be removed",
        Msg::ConfirmPrompt => "Continue? (y/n) ",
        Msg::Continuing => "Continuing",
        Msg::Stopping => "Stopping",
        Msg::PromptClosed => "Input closed before an answer was given",

        // Processing
        Msg::Removing => "Removing",
        Msg::Linking => "Linking",
        Msg::Skipping => "Skipping (already exists)",
        Msg::BrokenSymlinkOccupant => "Skipping (occupied by a broken symlink)",
        Msg::ErrorOccurred => "Error",

        // Summary
        Msg::Done => "=== Done ===",
        Msg::DirectoriesCreated => "Directories created",
        Msg::FilesLinked => "Files linked",
        Msg::FilesSkipped => "Files skipped",
        Msg::FilesIgnored => "Files ignored",
    }
}
