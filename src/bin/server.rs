use std::net::SocketAddr;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::{Json, Router, routing::post};
use clap::Parser;
use serde::Serialize;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use lifegrid::api::{EvolveRequest, handle_evolve};

#[derive(Parser, Debug)]
#[command(name = "server")]
#[command(about = "Serve Game of Life evolution over HTTP")]
struct Cli {
    /// Address to listen on
    #[arg(long, default_value = "127.0.0.1:3000")]
    addr: SocketAddr,
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

fn error_response(status: StatusCode, message: String) -> Response {
    (status, Json(ErrorBody { error: message })).into_response()
}

async fn evolve_handler(Json(req): Json<EvolveRequest>) -> Response {
    let generations = req.generations;
    match tokio::task::spawn_blocking(move || handle_evolve(req)).await {
        Ok(Ok(resp)) => {
            info!(rows = resp.rows, cols = resp.cols, generations, "evolve request served");
            Json(resp).into_response()
        }
        Ok(Err(e)) => {
            warn!("rejected evolve request: {}", e);
            error_response(StatusCode::BAD_REQUEST, e.to_string())
        }
        Err(e) => error_response(
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("evolution task failed: {}", e),
        ),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "server=info,lifegrid=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    let app = Router::new()
        .route("/api/evolve", post(evolve_handler))
        .layer(CorsLayer::permissive());

    info!("lifegrid server at http://{}", cli.addr);

    let listener = tokio::net::TcpListener::bind(cli.addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
