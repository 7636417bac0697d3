use crate::{axum_http::{default_routers, routers}, config::config_model::DotEnvyConfig};
use anyhow::Result;
use axum::{
    Router,
    http::{
        Method, StatusCode,
        header::{AUTHORIZATION, CONTENT_TYPE},
    },
    routing::get,
};
use chanolja::infra::supabase::rest_client::SupabaseRestClient;
use std::{net::SocketAddr, sync::Arc, time::Duration};
use tokio::net::TcpListener;
use tower_http::{
    cors::{Any, CorsLayer},
    limit::RequestBodyLimitLayer,
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::info;

pub async fn start(config: Arc<DotEnvyConfig>, supabase: Arc<SupabaseRestClient>) -> Result<()> {
    let app = Router::new()
        .fallback(default_routers::not_found)
        .nest(
            "/api/payments",
            routers::payments::routes(Arc::clone(&supabase), Arc::clone(&config)),
        )
        .nest(
            "/api/vehicles",
            routers::vehicles::routes(Arc::clone(&supabase)),
        )
        .nest(
            "/api/reservations",
            routers::reservations::routes(Arc::clone(&supabase)),
        )
        .nest(
            "/api/insurances",
            routers::insurances::routes(Arc::clone(&supabase)),
        )
        .nest(
            "/api/branches",
            routers::branches::routes(Arc::clone(&supabase)),
        )
        .nest(
            "/api/branch",
            routers::branch_portal::routes(Arc::clone(&supabase)),
        )
        .route("/api/health-check", get(default_routers::health_check))
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(config.server.timeout),
        ))
        .layer(RequestBodyLimitLayer::new(
            (config.server.body_limit * 1024 * 1024).try_into()?,
        ))
        .layer(
            CorsLayer::new()
                .allow_methods([
                    Method::GET,
                    Method::POST,
                    Method::PATCH,
                    Method::PUT,
                    Method::DELETE,
                ])
                .allow_headers([AUTHORIZATION, CONTENT_TYPE])
                .allow_origin(Any), // TODO restrict to the site domains once fixed
        )
        .layer(TraceLayer::new_for_http());

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    let listener = TcpListener::bind(addr).await?;

    info!("Server is running on port {}", config.server.port);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install CTRL+C signal handler");
    };

    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received ctrl+C signal"),
        _ = terminate => info!("Received terminate signal"),
    }
}
