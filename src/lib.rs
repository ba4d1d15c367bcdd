pub mod classifier;
pub mod config;
pub mod models;
pub mod report;
pub mod rules;

pub use classifier::{classify, ClassifyInput};
pub use config::RenderConfig;
pub use report::{build_render_payload, RenderOptions, RenderPayload, ReportError};
pub use rules::ReportRules;

use tracing_subscriber::EnvFilter;

/// Install the global `tracing` subscriber. Safe to call more than once.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .with_writer(std::io::stderr)
        .try_init();
}
