use prospera::config::{self, ClientConfig};

#[cfg(not(target_arch = "wasm32"))]
fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("prospera=info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

#[cfg(target_arch = "wasm32")]
fn init_tracing() {}

fn main() -> anyhow::Result<()> {
    config::load_dotenv();
    init_tracing();

    let client_config = ClientConfig::load()?;
    tracing::info!(api_base = %client_config.api_base(), "starting Prospera");
    config::install(client_config)?;

    dioxus::launch(prospera::ui::App);
    Ok(())
}
