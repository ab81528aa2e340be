//! HTTP host for the server: owns the listener, the global middleware stack,
//! `/health` and `/openapi.json`. Domain modules contribute routes through
//! `modkit::RestfulModule` during the REST phase.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use arc_swap::ArcSwap;
use async_trait::async_trait;
use axum::{middleware::from_fn, routing::get, Extension, Router};
use parking_lot::Mutex;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tower_http::{
    cors::CorsLayer,
    limit::RequestBodyLimitLayer,
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
};

mod config;
pub mod request_id;
mod web;

pub use config::ApiIngressConfig;

const STOP_TIMEOUT: Duration = Duration::from_secs(30);

pub struct ApiIngress {
    config: ArcSwap<ApiIngressConfig>,
    /// Used when the module section leaves `bind_addr` empty.
    default_bind_addr: String,
    final_router: Mutex<Option<Router>>,
    server: Mutex<Option<JoinHandle<Result<()>>>>,
    bound_addr: Mutex<Option<SocketAddr>>,
}

impl Default for ApiIngress {
    fn default() -> Self {
        Self::new("127.0.0.1:8080")
    }
}

impl ApiIngress {
    pub fn new(default_bind_addr: impl Into<String>) -> Self {
        Self {
            config: ArcSwap::from_pointee(ApiIngressConfig::default()),
            default_bind_addr: default_bind_addr.into(),
            final_router: Mutex::new(None),
            server: Mutex::new(None),
            bound_addr: Mutex::new(None),
        }
    }

    pub fn get_config(&self) -> ApiIngressConfig {
        (**self.config.load()).clone()
    }

    /// Address the listener is bound to, once started.
    pub fn local_addr(&self) -> Option<SocketAddr> {
        *self.bound_addr.lock()
    }

    fn bind_addr(&self) -> String {
        let cfg = self.config.load();
        if cfg.bind_addr.trim().is_empty() {
            self.default_bind_addr.clone()
        } else {
            cfg.bind_addr.clone()
        }
    }

    /// Router the server will run, if the REST phase finished.
    pub fn router(&self) -> Option<Router> {
        self.final_router.lock().clone()
    }
}

/// Base routes served by the host itself.
pub fn base_router() -> Router {
    Router::new().route("/health", get(web::health_check))
}

/// Attach `/openapi.json`, the fallback and the global middleware.
///
/// Order, outermost first: PropagateRequestId → SetRequestId → request id to
/// extensions → Trace → Timeout → CORS → BodyLimit.
pub fn finalize_router(
    router: Router,
    openapi: utoipa::openapi::OpenApi,
    cfg: &ApiIngressConfig,
) -> Router {
    let x_request_id = request_id::header();

    let mut router = router
        .route("/openapi.json", get(web::openapi_json))
        .fallback(web::not_found)
        .layer(Extension(Arc::new(openapi)))
        .layer(RequestBodyLimitLayer::new(cfg.body_limit_bytes));

    if cfg.cors_enabled {
        router = router.layer(CorsLayer::permissive());
    }

    router
        .layer(TimeoutLayer::new(Duration::from_secs(cfg.request_timeout_secs.max(1))))
        .layer(request_id::create_trace_layer())
        .layer(from_fn(request_id::push_req_id_to_extensions))
        .layer(SetRequestIdLayer::new(x_request_id.clone(), request_id::MakeReqId))
        .layer(PropagateRequestIdLayer::new(x_request_id))
}

#[async_trait]
impl modkit::Module for ApiIngress {
    async fn init(&self, ctx: &modkit::ModuleCtx) -> Result<()> {
        let cfg: ApiIngressConfig = ctx.module_config()?;
        tracing::debug!(module = "api_ingress", ?cfg, "module initialized");
        self.config.store(Arc::new(cfg));
        Ok(())
    }
}

impl modkit::RestHostModule for ApiIngress {
    fn rest_prepare(&self, _ctx: &modkit::ModuleCtx, router: Router) -> Result<Router> {
        Ok(router.merge(base_router()))
    }

    fn rest_finalize(
        &self,
        _ctx: &modkit::ModuleCtx,
        router: Router,
        openapi: utoipa::openapi::OpenApi,
    ) -> Result<Router> {
        let router = finalize_router(router, openapi, &self.get_config());
        *self.final_router.lock() = Some(router.clone());
        Ok(router)
    }
}

#[async_trait]
impl modkit::StatefulModule for ApiIngress {
    /// Bind the socket, then serve in the background until `cancel` fires.
    async fn start(&self, cancel: CancellationToken) -> Result<()> {
        let addr = self.bind_addr();
        let router = self
            .router()
            .unwrap_or_else(|| finalize_router(base_router(), Default::default(), &self.get_config()));

        let listener = tokio::net::TcpListener::bind(&addr)
            .await
            .with_context(|| format!("failed to bind {addr}"))?;
        let local = listener.local_addr()?;
        *self.bound_addr.lock() = Some(local);
        tracing::info!(addr = %local, "HTTP server bound");

        let handle = tokio::spawn(async move {
            axum::serve(listener, router)
                .with_graceful_shutdown(async move {
                    cancel.cancelled().await;
                    tracing::info!("HTTP server shutting down gracefully");
                })
                .await
                .context("HTTP server failed")
        });
        *self.server.lock() = Some(handle);
        Ok(())
    }

    async fn stop(&self, _cancel: CancellationToken) -> Result<()> {
        let handle = self.server.lock().take();
        let Some(handle) = handle else {
            return Ok(());
        };
        match tokio::time::timeout(STOP_TIMEOUT, handle).await {
            Ok(joined) => joined.context("HTTP server task panicked")?,
            Err(_) => {
                tracing::warn!("HTTP server did not stop within {:?}", STOP_TIMEOUT);
                Ok(())
            }
        }
    }
}
