use gossamer::{Backdrop, BackdropConfig};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let mut backdrop = Backdrop::new();
    if let Ok(path) = std::env::var("GOSSAMER_CONFIG") {
        match BackdropConfig::from_path(&path) {
            Ok(config) => backdrop = backdrop.with_config(config),
            Err(e) => {
                tracing::error!("could not load {path}: {e}");
                std::process::exit(1);
            }
        }
    }

    if let Err(e) = backdrop.run() {
        tracing::error!("backdrop failed: {e}");
        std::process::exit(1);
    }
}
