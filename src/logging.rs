//! 診断ログの初期化
//!
//! 利用者向けの進捗表示は [`crate::output`] が担当し、ここで設定するのは
//! 内部の診断ログのみ。

use tracing_subscriber::EnvFilter;

/// ログレベルを指定する環境変数
pub const LOG_ENV: &str = "HARDLINK_CLONE_LOG";

/// 既定のログレベル
const DEFAULT_FILTER: &str = "warn";

/// 環境変数から診断ログのフィルタを作る
pub fn env_filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// 標準エラー出力に書き出すサブスクライバを設定する
///
/// 既に設定済みの場合は何もしない。
pub fn init() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
