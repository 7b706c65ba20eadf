use std::path::Path;
use std::sync::Arc;

use futures::future::join_all;
use tokio::sync::mpsc;

use crate::cache::Invalidation;
use crate::error::DiscoveryError;
use crate::task::TaskDescriptor;

use super::change::{ChangeKind, SourceChange};
use super::task_provider::TaskProvider;

/// Registered providers, in registration order.
#[derive(Debug, Default)]
pub struct TaskRegistry {
    providers: Vec<Arc<TaskProvider>>,
}

impl TaskRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a provider; a later provider with the same id replaces the
    /// earlier one.
    pub fn register(&mut self, provider: TaskProvider) {
        let provider = Arc::new(provider);
        match self.providers.iter_mut().find(|p| p.id() == provider.id()) {
            Some(slot) => *slot = provider,
            None => self.providers.push(provider),
        }
    }

    pub fn get(&self, dialect: &str) -> Option<&Arc<TaskProvider>> {
        self.providers.iter().find(|p| p.id() == dialect)
    }

    pub fn providers(&self) -> impl Iterator<Item = &Arc<TaskProvider>> {
        self.providers.iter()
    }

    pub fn ids(&self) -> Vec<&str> {
        self.providers.iter().map(|p| p.id()).collect()
    }

    fn require(&self, dialect: &str) -> Result<&Arc<TaskProvider>, DiscoveryError> {
        self.get(dialect)
            .ok_or_else(|| DiscoveryError::UnknownDialect(dialect.to_string()))
    }

    pub async fn provide_tasks(&self, dialect: &str) -> Result<Vec<TaskDescriptor>, DiscoveryError> {
        self.require(dialect)?.provide_tasks().await
    }

    /// Tasks of every enabled provider, in registration order.
    ///
    /// A failing provider contributes nothing and does not hold up the rest.
    pub async fn provide_all(&self) -> Vec<TaskDescriptor> {
        let results = join_all(self.providers.iter().map(|p| async move {
            (p.id(), p.provide_tasks().await)
        }))
        .await;

        let mut tasks = Vec::new();
        for (id, res) in results {
            match res {
                Ok(found) => tasks.extend(found),
                Err(e) => tracing::warn!(dialect = id, error = %e, "task discovery failed"),
            }
        }
        tasks
    }

    pub async fn invalidate(
        &self,
        dialect: &str,
        file: Option<&Path>,
    ) -> Result<Invalidation, DiscoveryError> {
        self.require(dialect)?.invalidate(file).await
    }

    pub async fn set_enabled(&self, dialect: &str, enabled: bool) -> Result<(), DiscoveryError> {
        self.require(dialect)?.set_enabled(enabled).await;
        Ok(())
    }

    /// Routes a change to every provider whose files it could affect.
    /// Returns the ids of the providers that were invalidated.
    pub async fn on_source_changed(&self, path: &Path, kind: ChangeKind) -> Vec<String> {
        let mut touched = Vec::new();
        for provider in self.providers.iter().filter(|p| p.handles(path)) {
            tracing::trace!(dialect = provider.id(), path = %path.display(), ?kind, "source changed");
            match provider.invalidate(Some(path)).await {
                Ok(_) => touched.push(provider.id().to_string()),
                Err(e) => tracing::warn!(
                    dialect = provider.id(),
                    path = %path.display(),
                    error = %e,
                    "point invalidation failed"
                ),
            }
        }
        touched
    }

    /// Consumes change notifications until the sender side closes.
    pub async fn listen(self: Arc<Self>, mut rx: mpsc::Receiver<SourceChange>) {
        while let Some(change) = rx.recv().await {
            self.on_source_changed(&change.path, change.kind).await;
        }
        tracing::debug!("change listener stopped");
    }
}
