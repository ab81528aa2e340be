use axum::Router;
use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

use thiserror::Error;

use crate::context;
use crate::contracts;

pub struct ModuleEntry {
    pub name: &'static str,
    pub deps: &'static [&'static str],
    pub core: Arc<dyn contracts::Module>,
    pub rest: Option<Arc<dyn contracts::RestfulModule>>,
    pub rest_host: Option<Arc<dyn contracts::RestHostModule>>,
    pub db: Option<Arc<dyn contracts::DbModule>>,
    pub stateful: Option<Arc<dyn contracts::StatefulModule>>,
}

impl std::fmt::Debug for ModuleEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModuleEntry")
            .field("name", &self.name)
            .field("deps", &self.deps)
            .field("has_rest", &self.rest.is_some())
            .field("is_rest_host", &self.rest_host.is_some())
            .field("has_db", &self.db.is_some())
            .field("has_stateful", &self.stateful.is_some())
            .finish()
    }
}

/// Modules in dependency order; phases walk it front to back (stop: back to front).
pub struct ModuleRegistry {
    modules: Vec<ModuleEntry>,
}

impl std::fmt::Debug for ModuleRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<&'static str> = self.modules.iter().map(|m| m.name).collect();
        f.debug_struct("ModuleRegistry")
            .field("modules", &names)
            .finish()
    }
}

impl ModuleRegistry {
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::default()
    }

    pub fn modules(&self) -> &[ModuleEntry] {
        &self.modules
    }

    pub async fn run_init_phase(&self, base_ctx: &context::ModuleCtx) -> Result<(), RegistryError> {
        for e in &self.modules {
            let ctx = base_ctx.clone().for_module(e.name);
            e.core
                .init(&ctx)
                .await
                .map_err(|source| RegistryError::Init {
                    module: e.name,
                    source,
                })?;
            tracing::debug!(module = e.name, "module initialized");
        }
        Ok(())
    }

    pub async fn run_db_phase(&self, db: &modkit_db::DbHandle) -> Result<(), RegistryError> {
        for e in &self.modules {
            if let Some(dbm) = &e.db {
                dbm.migrate(db)
                    .await
                    .map_err(|source| RegistryError::DbMigrate {
                        module: e.name,
                        source,
                    })?;
                tracing::debug!(module = e.name, "module migrated");
            }
        }
        Ok(())
    }

    /// prepare (host) → register_rest (each module) → finalize (host).
    pub fn run_rest_phase(
        &self,
        base_ctx: &context::ModuleCtx,
        mut router: Router,
    ) -> Result<Router, RegistryError> {
        let Some(host_entry) = self.modules.iter().find(|e| e.rest_host.is_some()) else {
            return if self.modules.iter().any(|e| e.rest.is_some()) {
                Err(RegistryError::RestRequiresHost)
            } else {
                Ok(router)
            };
        };
        let Some(host) = host_entry.rest_host.as_ref() else {
            return Err(RegistryError::RestRequiresHost);
        };
        let host_ctx = base_ctx.clone().for_module(host_entry.name);

        router = host
            .rest_prepare(&host_ctx, router)
            .map_err(|source| RegistryError::RestPrepare {
                module: host_entry.name,
                source,
            })?;

        let mut openapi = utoipa::openapi::OpenApiBuilder::new()
            .info(
                utoipa::openapi::InfoBuilder::new()
                    .title("Workout Tracker API")
                    .version(env!("CARGO_PKG_VERSION"))
                    .build(),
            )
            .build();

        for e in &self.modules {
            if let Some(rest) = &e.rest {
                let ctx = base_ctx.clone().for_module(e.name);
                router = rest
                    .register_rest(&ctx, router, &mut openapi)
                    .map_err(|source| RegistryError::RestRegister {
                        module: e.name,
                        source,
                    })?;
            }
        }

        router = host
            .rest_finalize(&host_ctx, router, openapi)
            .map_err(|source| RegistryError::RestFinalize {
                module: host_entry.name,
                source,
            })?;

        Ok(router)
    }

    pub async fn run_start_phase(&self, cancel: CancellationToken) -> Result<(), RegistryError> {
        for e in &self.modules {
            if let Some(s) = &e.stateful {
                s.start(cancel.clone())
                    .await
                    .map_err(|source| RegistryError::Start {
                        module: e.name,
                        source,
                    })?;
            }
        }
        Ok(())
    }

    pub async fn run_stop_phase(&self, cancel: CancellationToken) -> Result<(), RegistryError> {
        for e in self.modules.iter().rev() {
            if let Some(s) = &e.stateful {
                if let Err(err) = s.stop(cancel.clone()).await {
                    tracing::warn!(module = e.name, error = %err, "Failed to stop module");
                }
            }
        }
        Ok(())
    }
}

/// Explicit registration of modules and their capabilities.
#[derive(Default)]
pub struct RegistryBuilder {
    order: Vec<&'static str>,
    core: HashMap<&'static str, Arc<dyn contracts::Module>>,
    deps: HashMap<&'static str, &'static [&'static str]>,
    rest: HashMap<&'static str, Arc<dyn contracts::RestfulModule>>,
    rest_host: Option<(&'static str, Arc<dyn contracts::RestHostModule>)>,
    db: HashMap<&'static str, Arc<dyn contracts::DbModule>>,
    stateful: HashMap<&'static str, Arc<dyn contracts::StatefulModule>>,
    errors: Vec<String>,
}

impl RegistryBuilder {
    pub fn register_core(
        mut self,
        name: &'static str,
        deps: &'static [&'static str],
        m: Arc<dyn contracts::Module>,
    ) -> Self {
        if self.core.contains_key(name) {
            self.errors
                .push(format!("Module '{name}' is already registered"));
            return self;
        }
        self.order.push(name);
        self.core.insert(name, m);
        self.deps.insert(name, deps);
        self
    }

    pub fn register_rest(mut self, name: &'static str, m: Arc<dyn contracts::RestfulModule>) -> Self {
        self.rest.insert(name, m);
        self
    }

    pub fn register_rest_host(
        mut self,
        name: &'static str,
        m: Arc<dyn contracts::RestHostModule>,
    ) -> Self {
        if let Some((existing, _)) = &self.rest_host {
            self.errors.push(format!(
                "Multiple REST host modules detected: '{existing}' and '{name}'"
            ));
            return self;
        }
        self.rest_host = Some((name, m));
        self
    }

    pub fn register_db(mut self, name: &'static str, m: Arc<dyn contracts::DbModule>) -> Self {
        self.db.insert(name, m);
        self
    }

    pub fn register_stateful(
        mut self,
        name: &'static str,
        m: Arc<dyn contracts::StatefulModule>,
    ) -> Self {
        self.stateful.insert(name, m);
        self
    }

    /// Validate capabilities against core registrations and order modules so
    /// every dependency comes first. Ties keep registration order.
    pub fn build(mut self) -> Result<ModuleRegistry, RegistryError> {
        if !self.errors.is_empty() {
            return Err(RegistryError::InvalidRegistryConfiguration {
                errors: self.errors,
            });
        }

        let capability_names = self
            .rest
            .keys()
            .chain(self.db.keys())
            .chain(self.stateful.keys())
            .chain(self.rest_host.iter().map(|(n, _)| n));
        for n in capability_names {
            if !self.core.contains_key(n) {
                return Err(RegistryError::UnknownModule((*n).to_string()));
            }
        }

        let idx: HashMap<&'static str, usize> = self
            .order
            .iter()
            .enumerate()
            .map(|(i, n)| (*n, i))
            .collect();
        let mut indegree = vec![0usize; self.order.len()];
        let mut dependents = vec![Vec::<usize>::new(); self.order.len()];
        for (i, name) in self.order.iter().enumerate() {
            for dep in self.deps.get(name).copied().unwrap_or(&[]) {
                let d = *idx.get(dep).ok_or_else(|| RegistryError::UnknownDependency {
                    module: (*name).to_string(),
                    depends_on: (*dep).to_string(),
                })?;
                dependents[d].push(i);
                indegree[i] += 1;
            }
        }

        let mut ready: VecDeque<usize> = (0..self.order.len())
            .filter(|&i| indegree[i] == 0)
            .collect();
        let mut sorted = Vec::with_capacity(self.order.len());
        while let Some(i) = ready.pop_front() {
            sorted.push(i);
            for &j in &dependents[i] {
                indegree[j] -= 1;
                if indegree[j] == 0 {
                    ready.push_back(j);
                }
            }
        }
        if sorted.len() != self.order.len() {
            let stuck = (0..self.order.len())
                .filter(|i| indegree[*i] > 0)
                .map(|i| self.order[i].to_string())
                .collect();
            return Err(RegistryError::CycleDetected { modules: stuck });
        }

        let host = self.rest_host.take();
        let mut modules = Vec::with_capacity(sorted.len());
        for i in sorted {
            let name = self.order[i];
            let core = self
                .core
                .remove(name)
                .ok_or_else(|| RegistryError::UnknownModule(name.to_string()))?;
            modules.push(ModuleEntry {
                name,
                deps: self.deps.get(name).copied().unwrap_or(&[]),
                core,
                rest: self.rest.remove(name),
                rest_host: host
                    .as_ref()
                    .filter(|(n, _)| *n == name)
                    .map(|(_, h)| h.clone()),
                db: self.db.remove(name),
                stateful: self.stateful.remove(name),
            });
        }

        Ok(ModuleRegistry { modules })
    }
}

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("module '{module}' init failed: {source}")]
    Init {
        module: &'static str,
        #[source]
        source: anyhow::Error,
    },
    #[error("module '{module}' migration failed: {source}")]
    DbMigrate {
        module: &'static str,
        #[source]
        source: anyhow::Error,
    },
    #[error("REST host '{module}' prepare failed: {source}")]
    RestPrepare {
        module: &'static str,
        #[source]
        source: anyhow::Error,
    },
    #[error("module '{module}' REST registration failed: {source}")]
    RestRegister {
        module: &'static str,
        #[source]
        source: anyhow::Error,
    },
    #[error("REST host '{module}' finalize failed: {source}")]
    RestFinalize {
        module: &'static str,
        #[source]
        source: anyhow::Error,
    },
    #[error("module '{module}' start failed: {source}")]
    Start {
        module: &'static str,
        #[source]
        source: anyhow::Error,
    },
    #[error("REST modules are registered but no REST host module is present")]
    RestRequiresHost,
    #[error("capability registered for unknown module '{0}'")]
    UnknownModule(String),
    #[error("module '{module}' depends on unknown module '{depends_on}'")]
    UnknownDependency { module: String, depends_on: String },
    #[error("dependency cycle between modules: {modules:?}")]
    CycleDetected { modules: Vec<String> },
    #[error("invalid registry configuration: {errors:?}")]
    InvalidRegistryConfiguration { errors: Vec<String> },
}
