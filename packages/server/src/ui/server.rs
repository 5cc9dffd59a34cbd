//! Server execution logic.

use std::{future::Future, io, sync::Arc};

use axum::{Router, http::HeaderValue, routing::get};
use thiserror::Error;
use tokio::net::TcpListener;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};

use super::{
    handler::{get_leaderboard, get_plaza_state, health_check, websocket_handler},
    signal::shutdown_signal,
    state::AppState,
};

/// Fatal startup or serve failure.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("invalid CORS origin '{0}'")]
    InvalidCorsOrigin(String),

    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: io::Error,
    },

    #[error("server error: {0}")]
    Serve(#[from] io::Error),
}

/// Realtime presence relay
///
/// # Example
///
/// ```ignore
/// let state = AppState::in_memory(&config, Arc::new(SystemClock));
/// let server = Server::new(state, config.cors_origin.clone());
/// server.run(config.host.clone(), config.port).await?;
/// ```
pub struct Server {
    state: Arc<AppState>,
    cors_origin: Option<String>,
}

impl Server {
    pub fn new(state: AppState, cors_origin: Option<String>) -> Self {
        Self {
            state: Arc::new(state),
            cors_origin,
        }
    }

    /// Bind to `host:port` and serve until Ctrl+C or SIGTERM.
    pub async fn run(self, host: String, port: u16) -> Result<(), ServerError> {
        let bind_addr = format!("{}:{}", host, port);
        let listener = TcpListener::bind(&bind_addr)
            .await
            .map_err(|source| ServerError::Bind {
                addr: bind_addr.clone(),
                source,
            })?;

        tracing::info!("Plaza relay listening on {}", listener.local_addr()?);
        tracing::info!("Connect to: ws://{}/ws", bind_addr);
        tracing::info!("Press Ctrl+C to shutdown gracefully");

        self.serve(listener, shutdown_signal()).await?;

        tracing::info!("Server shutdown complete");
        Ok(())
    }

    /// Serve on an already bound listener until `shutdown` resolves.
    pub async fn serve<F>(self, listener: TcpListener, shutdown: F) -> Result<(), ServerError>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let app = self.router()?;
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown)
            .await?;
        Ok(())
    }

    fn router(self) -> Result<Router, ServerError> {
        let cors = cors_layer(self.cors_origin.as_deref())?;

        let app = Router::new()
            // WebSocket エンドポイント
            .route("/ws", get(websocket_handler))
            // HTTP エンドポイント
            .route("/api/health", get(health_check))
            .route("/api/state", get(get_plaza_state))
            .route("/api/leaderboard", get(get_leaderboard))
            .layer(cors)
            .layer(TraceLayer::new_for_http())
            .with_state(self.state);
        Ok(app)
    }
}

fn cors_layer(origin: Option<&str>) -> Result<CorsLayer, ServerError> {
    let allow_origin = match origin {
        Some(origin) => {
            let value = HeaderValue::from_str(origin)
                .map_err(|_| ServerError::InvalidCorsOrigin(origin.to_string()))?;
            AllowOrigin::exact(value)
        }
        None => AllowOrigin::from(Any),
    };
    Ok(CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods(Any)
        .allow_headers(Any))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cors_layer_accepts_valid_origin() {
        // テスト項目: 正しいオリジンと未指定の場合は CORS レイヤーを作成できる
        assert!(cors_layer(Some("http://localhost:5173")).is_ok());
        assert!(cors_layer(None).is_ok());
    }

    #[test]
    fn test_cors_layer_rejects_invalid_origin() {
        // テスト項目: ヘッダー値として不正なオリジンはエラーになる
        let result = cors_layer(Some("http://bad\norigin"));

        assert!(matches!(result, Err(ServerError::InvalidCorsOrigin(_))));
    }
}
