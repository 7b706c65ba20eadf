use std::sync::Arc;

use anyhow::{Context, Result};

use taskdeck_core::api::{AppConfig, Dialect, PathFilter, TaskProvider, TaskRegistry, WorkspaceHost};

use crate::dialect::{
    AntDialect, GradleDialect, GruntDialect, GulpDialect, MakeDialect, NpmDialect, ScriptDialect,
    WorkspaceTasksDialect,
};

/// Every built-in dialect, in registration order.
pub fn build_dialects() -> Vec<Arc<dyn Dialect>> {
    vec![
        Arc::new(NpmDialect),
        Arc::new(WorkspaceTasksDialect),
        Arc::new(MakeDialect),
        Arc::new(AntDialect),
        Arc::new(GradleDialect),
        Arc::new(GruntDialect),
        Arc::new(GulpDialect),
        Arc::new(ScriptDialect),
    ]
}

pub fn build_dialect(id: &str) -> Option<Arc<dyn Dialect>> {
    build_dialects().into_iter().find(|d| d.id() == id)
}

pub fn build_filter(cfg: &AppConfig) -> Result<Arc<PathFilter>> {
    let filter = PathFilter::new(&cfg.discovery.exclude).context("invalid discovery.exclude")?;
    Ok(Arc::new(filter))
}

/// Registry with one provider per built-in dialect, configured from `cfg`.
pub fn build_registry(cfg: &AppConfig, host: Arc<dyn WorkspaceHost>) -> Result<TaskRegistry> {
    let filter = build_filter(cfg)?;
    let dialects = build_dialects();

    for id in cfg.dialects.keys() {
        if !dialects.iter().any(|d| d.id() == id) {
            tracing::warn!(dialect = %id, "configuration for unknown dialect ignored");
        }
    }

    let mut registry = TaskRegistry::new();
    for dialect in dialects {
        let id = dialect.id().to_string();
        let provider = TaskProvider::configure(dialect, cfg, filter.clone(), host.clone())
            .with_context(|| format!("invalid configuration for dialect '{id}'"))?;
        tracing::debug!(dialect = %id, enabled = provider.is_enabled(), "provider registered");
        registry.register(provider);
    }
    Ok(registry)
}
