use clap::Parser;
use unit_canvas::constants::DEFAULT_API_BASE_URL;
use unit_canvas::{AppError, CanvasConfig};

/// Interactive canvas for linking units by shared traits
#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// Base URL of the unit search/filter service
    #[arg(long, env = "UNIT_CANVAS_API_URL", default_value = DEFAULT_API_BASE_URL)]
    api_url: String,

    /// Use the built-in demo roster instead of the service
    #[arg(long, env = "UNIT_CANVAS_OFFLINE")]
    offline: bool,

    /// Wait this long after the last keystroke before searching
    #[arg(long, default_value_t = 0)]
    search_debounce_ms: u64,
}

fn main() -> Result<(), AppError> {
    // Logging defaults to info; RUST_LOG overrides
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let config = CanvasConfig {
        api_base_url: args.api_url,
        offline: args.offline,
        search_debounce_ms: args.search_debounce_ms,
        ..Default::default()
    };

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    let _guard = runtime.enter();

    unit_canvas::run_app(config, runtime.handle().clone())
}
