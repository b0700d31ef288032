use crate::config::Verbosity;
use tracing_subscriber::fmt::time::SystemTime;

/// Installs the global fmt subscriber. Logs go to stderr so stdout stays
/// reserved for the run banner.
pub fn init(verbosity: Verbosity) {
    let installed = tracing_subscriber::fmt()
        .with_target(false)
        .with_timer(SystemTime)
        .with_max_level(verbosity.level())
        .with_writer(std::io::stderr)
        .compact()
        .try_init();

    if installed.is_err() {
        tracing::debug!("tracing subscriber already installed");
    }
}
