//! Logging setup utilities for the Kaiwa binaries.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize the tracing subscriber with the specified default log level.
///
/// Both the calling package (`package_name`, e.g. `env!("CARGO_PKG_NAME")`)
/// and the binary are filtered at `default_log_level`. The level can be
/// overridden using the `RUST_LOG` environment variable.
///
/// # Examples
///
/// ```no_run
/// use kaiwa_shared::logger::setup_logger;
///
/// setup_logger("kaiwa-server", "kaiwa-server", "debug");
/// ```
pub fn setup_logger(package_name: &str, binary_name: &str, default_log_level: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                default_filter(package_name, binary_name, default_log_level).into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Build the default `EnvFilter` directive string.
fn default_filter(package_name: &str, binary_name: &str, default_log_level: &str) -> String {
    format!(
        "{}={},{}={},kaiwa_shared={}",
        package_name.replace('-', "_"),
        default_log_level,
        binary_name.replace('-', "_"),
        default_log_level,
        default_log_level
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filter_uses_crate_style_names() {
        // テスト項目: パッケージ名・バイナリ名のハイフンがアンダースコアに変換される
        // given (前提条件):
        let package = "kaiwa-server";
        let binary = "kaiwa-server";

        // when (操作):
        let filter = default_filter(package, binary, "debug");

        // then (期待する結果):
        assert_eq!(
            filter,
            "kaiwa_server=debug,kaiwa_server=debug,kaiwa_shared=debug"
        );
    }
}
