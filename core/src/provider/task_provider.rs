use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::cache::{Invalidation, TaskCache};
use crate::config::AppConfig;
use crate::dialect::Dialect;
use crate::discovery::{DiscoveryEngine, DiscoverySettings, PathFilter, WorkspaceHost};
use crate::error::DiscoveryError;
use crate::task::{GroupRules, Materializer, TaskDescriptor};

/// One dialect's discovery engine plus its private cache.
#[derive(Debug)]
pub struct TaskProvider {
    engine: DiscoveryEngine,
    cache: TaskCache,
    enabled: AtomicBool,
}

impl TaskProvider {
    pub fn new(engine: DiscoveryEngine) -> Self {
        Self {
            engine,
            cache: TaskCache::new(),
            enabled: AtomicBool::new(true),
        }
    }

    /// Provider for `dialect` with the `[dialects.<id>]` table of `cfg`
    /// applied over the dialect's defaults.
    pub fn configure(
        dialect: Arc<dyn Dialect>,
        cfg: &AppConfig,
        filter: Arc<PathFilter>,
        host: Arc<dyn WorkspaceHost>,
    ) -> Result<Self, DiscoveryError> {
        let dcfg = cfg.dialect(dialect.id());

        let runner = dcfg.runner.clone().unwrap_or_else(|| dialect.default_runner());
        let rules = match &dcfg.group_rules {
            Some(rules) => GroupRules::compile(rules).map_err(|e| {
                let pattern = rules
                    .iter()
                    .find(|r| glob::Pattern::new(&r.pattern).is_err())
                    .map(|r| r.pattern.clone())
                    .unwrap_or_default();
                DiscoveryError::pattern(pattern, e)
            })?,
            None => dialect.default_group_rules(),
        };

        for pattern in &dcfg.include {
            glob::Pattern::new(pattern).map_err(|e| DiscoveryError::pattern(pattern, e))?;
        }

        let settings = DiscoverySettings {
            include: dcfg.include.clone(),
            skip_root: dcfg.skip_root.unwrap_or_else(|| dialect.shadowed_at_root()),
            max_concurrent_reads: cfg.discovery.max_concurrent_reads,
        };

        let materializer = Materializer::new(dialect.clone(), runner, rules);
        let engine = DiscoveryEngine::new(dialect, materializer, filter, settings, host);

        let provider = Self::new(engine);
        provider.enabled.store(dcfg.enabled, Ordering::SeqCst);
        Ok(provider)
    }

    pub fn id(&self) -> &str {
        self.engine.dialect().id()
    }

    pub fn engine(&self) -> &DiscoveryEngine {
        &self.engine
    }

    pub fn cache(&self) -> &TaskCache {
        &self.cache
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::SeqCst)
    }

    /// Disabling drops the cache so a later re-enable rediscovers.
    pub async fn set_enabled(&self, enabled: bool) {
        let was = self.enabled.swap(enabled, Ordering::SeqCst);
        if was && !enabled {
            self.cache.clear().await;
        }
    }

    /// All tasks for this dialect, discovering on first use.
    pub async fn provide_tasks(&self) -> Result<Vec<TaskDescriptor>, DiscoveryError> {
        if !self.is_enabled() {
            return Ok(Vec::new());
        }

        self.cache
            .get_or_populate(|| async {
                tracing::info!(dialect = self.id(), "running full discovery");
                self.engine.discover().await
            })
            .await
    }

    /// Drops the whole cache (`None`) or refreshes a single file.
    pub async fn invalidate(&self, file: Option<&Path>) -> Result<Invalidation, DiscoveryError> {
        let Some(path) = file else {
            tracing::debug!(dialect = self.id(), "cache cleared");
            self.cache.clear().await;
            return Ok(Invalidation::Reset);
        };

        let identity = self.engine.identity(path).await;
        let outcome = self
            .cache
            .refresh(path, &identity, |target| async move {
                self.engine.refresh_file(&target).await
            })
            .await?;
        tracing::debug!(
            dialect = self.id(),
            path = %path.display(),
            outcome = ?outcome,
            "point invalidation"
        );
        Ok(outcome)
    }

    pub fn handles(&self, path: &Path) -> bool {
        self.engine.matches(path)
    }
}
