//! HTTP 服务
//!
//! Owns the axum router and its middleware stack. The router is built once
//! after [`ServerState`] exists and cached behind an `RwLock`, so both the
//! real listener and the in-process test dispatch serve the same app.

use crate::auth::require_auth;
use crate::core::{Config, ServerState};
use axum::{Router, middleware};
use std::net::SocketAddr;
use std::sync::{Arc, RwLock};
use std::time::Instant;
use tower::Service;
use tower_http::{compression::CompressionLayer, cors::CorsLayer};

/// 进程内分发的返回类型 (集成测试直接驱动 tower Service)
pub type OneshotResult =
    Result<http::Response<axum::body::Body>, Box<dyn std::error::Error + Send + Sync>>;

/// Access log middleware (target "http_access", routed to the app log file)
async fn log_request(
    request: http::Request<axum::body::Body>,
    next: middleware::Next,
) -> http::Response<axum::body::Body> {
    let started = Instant::now();
    let (method, uri) = (request.method().clone(), request.uri().clone());

    let response = next.run(request).await;

    tracing::info!(
        target: "http_access",
        elapsed_ms = started.elapsed().as_millis() as u64,
        "{} {} {}",
        method,
        uri,
        response.status()
    );

    response
}

/// Merge the per-resource routers into the application router (without state)
pub fn build_app() -> Router<ServerState> {
    Router::<ServerState>::new()
        // 基础端点
        .merge(crate::api::health::router())
        .merge(crate::api::auth::router())
        .merge(crate::api::upload::router())
        // 业务端点
        .merge(crate::api::food_items::router())
        .merge(crate::api::feedback::router())
        .merge(crate::api::analytics::router())
        .merge(crate::api::reports::router())
        .merge(crate::api::accounts::router())
}

#[derive(Clone, Debug)]
pub struct HttpService {
    config: Config,
    app: Arc<RwLock<Option<Router>>>,
}

impl HttpService {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            app: Arc::new(RwLock::new(None)),
        }
    }

    /// Build and cache the router once the full [`ServerState`] exists
    ///
    /// 认证中间件挂在 Router 层，require_auth 自己放行公共路由；
    /// CORS / 压缩 / 访问日志在其外层。
    pub fn initialize(&self, state: ServerState) {
        let app = build_app()
            .layer(middleware::from_fn_with_state(state.clone(), require_auth))
            .with_state(state)
            .layer(CorsLayer::permissive())
            .layer(CompressionLayer::new())
            .layer(middleware::from_fn(log_request));

        *self.app.write().expect("Failed to lock router") = Some(app);
    }

    fn cached_app(&self) -> Option<Router> {
        self.app.read().expect("Failed to lock router").clone()
    }

    /// In-process request dispatch, used by the integration tests
    ///
    /// The cached router is already bound with state, so it can be driven
    /// directly as a tower `Service` without opening a socket.
    pub async fn oneshot(&self, request: http::Request<axum::body::Body>) -> OneshotResult {
        let mut service = self
            .cached_app()
            .ok_or_else(|| crate::utils::AppError::internal("HTTP router not initialized"))?;

        match service.call(request).await {
            Ok(response) => Ok(response),
            Err(e) => Err(crate::utils::AppError::internal(format!(
                "In-process dispatch failed: {}",
                e
            ))
            .into()),
        }
    }

    /// Bind the listener and serve until the shutdown signal fires
    pub async fn start_server<F>(&self, shutdown_signal: F) -> Result<(), crate::utils::AppError>
    where
        F: std::future::Future<Output = ()> + Send + 'static,
    {
        let app = self
            .cached_app()
            .ok_or_else(|| crate::utils::AppError::internal("HTTP router not initialized"))?;

        let addr = SocketAddr::from(([0, 0, 0, 0], self.config.http_port));
        let handle = axum_server::Handle::new();

        // 优雅停机：收到信号后最多再等 10 秒让在途请求完成
        let watcher = handle.clone();
        tokio::spawn(async move {
            shutdown_signal.await;
            watcher.graceful_shutdown(Some(std::time::Duration::from_secs(10)));
        });

        tracing::info!("🚀 HTTP server listening on {}", addr);

        axum_server::bind(addr)
            .handle(handle)
            .serve(app.into_make_service())
            .await
            .map_err(|e| crate::utils::AppError::internal(format!("HTTP listener failed: {}", e)))?;

        Ok(())
    }
}
