//! # ModKit - module plumbing for the workout tracker server
//!
//! Modules implement a small set of capability traits (`Module`, `DbModule`,
//! `RestfulModule`, `RestHostModule`, `StatefulModule`), get registered
//! explicitly with a [`ModuleRegistry`] and are driven through the phases
//! init → db → rest → start → wait → stop by [`runtime::run`].
//!
//! ## Example
//!
//! ```rust,ignore
//! let registry = ModuleRegistry::builder()
//!     .register_core("api_ingress", &[], ingress.clone())
//!     .register_rest_host("api_ingress", ingress.clone())
//!     .register_stateful("api_ingress", ingress)
//!     .register_core("workout_tracker", &["api_ingress"], tracker.clone())
//!     .register_db("workout_tracker", tracker.clone())
//!     .register_rest("workout_tracker", tracker)
//!     .build()?;
//! ```

pub use anyhow::Result;
pub use async_trait::async_trait;

pub mod api;
pub mod context;
pub mod contracts;
pub mod registry;
pub mod runtime;

pub use api::problem::{
    bad_request, conflict, forbidden, internal_error, not_found, unauthorized, Problem,
    ProblemResponse, ValidationError,
};
pub use api::response::{created_json, no_content, ok_json};
pub use context::{ConfigProvider, ModuleCtx, ModuleCtxBuilder};
pub use contracts::*;
pub use registry::{ModuleRegistry, RegistryError};
pub use crate::runtime::{run, RunOptions, ShutdownOptions};
