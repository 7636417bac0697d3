use anyhow::Result;
use backend::axum_http::http_serve;
use backend::config::config_loader;
use chanolja::infra::supabase::rest_client::SupabaseRestClient;
use std::sync::Arc;
use tracing::{error, info};

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        error!("Backend exited with error: {}", error);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    dotenvy::dotenv().ok();
    chanolja::observability::init_observability()?;

    let dotenvy_env = config_loader::load()?;
    info!("ENV has been loaded");

    let supabase_client = SupabaseRestClient::new(
        &dotenvy_env.supabase.project_url,
        dotenvy_env.supabase.service_role_key.clone(),
    )?;
    info!("Supabase REST client has been initialized");

    http_serve::start(Arc::new(dotenvy_env), Arc::new(supabase_client)).await?;

    Ok(())
}
