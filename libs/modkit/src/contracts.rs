use async_trait::async_trait;
use axum::Router;
use tokio_util::sync::CancellationToken;

use crate::context::ModuleCtx;

/// Core module: DI/wiring; do not rely on migrated schema here.
#[async_trait]
pub trait Module: Send + Sync + 'static {
    async fn init(&self, ctx: &ModuleCtx) -> anyhow::Result<()>;
}

#[async_trait]
pub trait DbModule: Send + Sync {
    /// Runs AFTER init, BEFORE REST/start.
    async fn migrate(&self, db: &modkit_db::DbHandle) -> anyhow::Result<()>;
}

/// Pure wiring; must be sync. Runs AFTER DB migrations.
pub trait RestfulModule: Send + Sync {
    /// Attach routes to `router` and merge the module's paths and schemas into `openapi`.
    fn register_rest(
        &self,
        ctx: &ModuleCtx,
        router: Router,
        openapi: &mut utoipa::openapi::OpenApi,
    ) -> anyhow::Result<Router>;
}

/// REST host module: owns the listener and the global middleware stack.
/// Must be sync; does not start the server.
pub trait RestHostModule: Send + Sync + 'static {
    /// Base router (e.g. /health) before modules register.
    fn rest_prepare(&self, ctx: &ModuleCtx, router: Router) -> anyhow::Result<Router>;

    /// Attach /openapi.json and global layers, keep the router for serving.
    fn rest_finalize(
        &self,
        ctx: &ModuleCtx,
        router: Router,
        openapi: utoipa::openapi::OpenApi,
    ) -> anyhow::Result<Router>;
}

#[async_trait]
pub trait StatefulModule: Send + Sync {
    async fn start(&self, cancel: CancellationToken) -> anyhow::Result<()>;
    async fn stop(&self, cancel: CancellationToken) -> anyhow::Result<()>;
}
