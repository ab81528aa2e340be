use serde::de::DeserializeOwned;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// Provider of module-specific configuration (raw JSON sections only).
pub trait ConfigProvider: Send + Sync {
    /// Returns raw JSON section for the module, if any.
    fn get_module_config(&self, module_name: &str) -> Option<&serde_json::Value>;
}

impl ConfigProvider for ::runtime::AppConfig {
    fn get_module_config(&self, module_name: &str) -> Option<&serde_json::Value> {
        self.modules.get(module_name)
    }
}

/// Per-phase view handed to modules: shared DB, config and the process-wide
/// cancellation token, scoped to one module name.
#[derive(Clone)]
pub struct ModuleCtx {
    pub(crate) db: Option<Arc<modkit_db::DbHandle>>,
    pub(crate) config_provider: Option<Arc<dyn ConfigProvider>>,
    pub(crate) cancellation_token: CancellationToken,
    pub(crate) module_name: Option<Arc<str>>,
}

pub struct ModuleCtxBuilder {
    inner: ModuleCtx,
}

impl ModuleCtxBuilder {
    pub fn new(token: CancellationToken) -> Self {
        Self {
            inner: ModuleCtx {
                db: None,
                config_provider: None,
                cancellation_token: token,
                module_name: None,
            },
        }
    }

    pub fn with_db(mut self, db: Arc<modkit_db::DbHandle>) -> Self {
        self.inner.db = Some(db);
        self
    }

    pub fn with_config_provider(mut self, p: Arc<dyn ConfigProvider>) -> Self {
        self.inner.config_provider = Some(p);
        self
    }

    pub fn with_module_name(mut self, name: &str) -> Self {
        self.inner.module_name = Some(Arc::<str>::from(name));
        self
    }

    pub fn build(self) -> ModuleCtx {
        self.inner
    }
}

impl ModuleCtx {
    /// Scope context to a specific module name (used by the registry).
    pub(crate) fn for_module(mut self, name: &str) -> Self {
        self.module_name = Some(Arc::<str>::from(name));
        self
    }

    pub fn db(&self) -> Option<Arc<modkit_db::DbHandle>> {
        self.db.clone()
    }

    pub fn db_required(&self) -> anyhow::Result<Arc<modkit_db::DbHandle>> {
        self.db.clone().ok_or_else(|| {
            anyhow::anyhow!(
                "module '{}' requires a database but none is configured",
                self.current_module().unwrap_or("?")
            )
        })
    }

    pub fn cancellation_token(&self) -> &CancellationToken {
        &self.cancellation_token
    }

    pub fn current_module(&self) -> Option<&str> {
        self.module_name.as_deref()
    }

    /// Deserialize the module's config section into `T`.
    /// A missing section yields `T::default()`; a malformed one is an error.
    pub fn module_config<T: DeserializeOwned + Default>(&self) -> anyhow::Result<T> {
        let (Some(name), Some(p)) = (&self.module_name, &self.config_provider) else {
            return Ok(T::default());
        };
        match p.get_module_config(name) {
            None => Ok(T::default()),
            Some(v) => serde_json::from_value::<T>(v.clone())
                .map_err(|e| anyhow::anyhow!("invalid {name} config: {e}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use std::collections::HashMap;

    #[derive(Debug, Default, Deserialize, PartialEq)]
    struct Cfg {
        #[serde(default)]
        secret: String,
    }

    struct MapProvider(HashMap<String, serde_json::Value>);

    impl ConfigProvider for MapProvider {
        fn get_module_config(&self, module_name: &str) -> Option<&serde_json::Value> {
            self.0.get(module_name)
        }
    }

    fn ctx_with(section: Option<serde_json::Value>) -> ModuleCtx {
        let mut map = HashMap::new();
        if let Some(v) = section {
            map.insert("workout_tracker".to_string(), v);
        }
        ModuleCtxBuilder::new(CancellationToken::new())
            .with_config_provider(Arc::new(MapProvider(map)))
            .build()
            .for_module("workout_tracker")
    }

    #[test]
    fn module_config_reads_section() {
        let ctx = ctx_with(Some(serde_json::json!({ "secret": "abc" })));
        let cfg: Cfg = ctx.module_config().unwrap();
        assert_eq!(cfg.secret, "abc");
    }

    #[test]
    fn missing_section_falls_back_to_default() {
        let cfg: Cfg = ctx_with(None).module_config().unwrap();
        assert_eq!(cfg, Cfg::default());
    }

    #[test]
    fn malformed_section_is_an_error() {
        let ctx = ctx_with(Some(serde_json::json!({ "secret": 42 })));
        let err = ctx.module_config::<Cfg>().unwrap_err();
        assert!(err.to_string().contains("workout_tracker"));
    }

    #[test]
    fn db_required_names_the_module() {
        let err = ctx_with(None).db_required().unwrap_err();
        assert!(err.to_string().contains("workout_tracker"));
    }

    #[test]
    fn app_config_is_a_provider() {
        let mut app = ::runtime::AppConfig::default();
        app.modules
            .insert("api_ingress".into(), serde_json::json!({ "bind_addr": "x" }));
        assert!(app.get_module_config("api_ingress").is_some());
        assert!(app.get_module_config("other").is_none());
    }
}
