//! Client-side cache of the signed-in user's tasks.
//!
//! The cache is never patched locally: every successful mutation is followed
//! by a full `GET /tasks` whose result replaces the collection wholesale.

use tracing::{debug, warn};

use crate::api::{ApiClient, ApiError};
use crate::session::{self, Branch};
use crate::types::{Task, TaskFields};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncState {
    Uninitialized,
    Loading,
    Ready,
    Unauthenticated,
}

#[derive(Debug, Clone)]
pub struct TaskStore {
    tasks: Vec<Task>,
    state: SyncState,
}

impl Default for TaskStore {
    fn default() -> Self {
        Self::new()
    }
}

impl TaskStore {
    pub fn new() -> Self {
        Self {
            tasks: Vec::new(),
            state: SyncState::Uninitialized,
        }
    }

    #[cfg(test)]
    pub(crate) fn from_tasks(tasks: Vec<Task>) -> Self {
        Self {
            tasks,
            state: SyncState::Ready,
        }
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn state(&self) -> SyncState {
        self.state
    }

    pub fn is_loading(&self) -> bool {
        self.state == SyncState::Loading
    }

    pub fn get(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    /// Drop everything derived from the previous session.
    pub fn reset(&mut self) {
        self.tasks.clear();
        self.state = SyncState::Uninitialized;
    }

    /// First load for a session: fetch when a credential exists, otherwise
    /// settle straight into `Unauthenticated` without touching the network.
    pub async fn mount(&mut self, client: &ApiClient) -> Result<(), ApiError> {
        match session::guard(client.session()) {
            Branch::Authenticated => self.refresh(client).await,
            Branch::Unauthenticated => {
                self.tasks.clear();
                self.state = SyncState::Unauthenticated;
                Ok(())
            }
        }
    }

    /// Re-fetch the collection. Only a 401 is returned to the caller; any other
    /// failure is logged and leaves the cached collection as it was.
    pub async fn refresh(&mut self, client: &ApiClient) -> Result<(), ApiError> {
        self.state = SyncState::Loading;
        match client.list_tasks().await {
            Ok(tasks) => {
                debug!(count = tasks.len(), "task list refreshed");
                self.tasks = tasks;
                self.state = SyncState::Ready;
                Ok(())
            }
            Err(ApiError::Unauthorized) => {
                self.tasks.clear();
                self.state = SyncState::Unauthenticated;
                Err(ApiError::Unauthorized)
            }
            Err(e) => {
                warn!(error = %e, "failed to fetch tasks, keeping cached list");
                self.state = SyncState::Ready;
                Ok(())
            }
        }
    }

    pub async fn create(&mut self, client: &ApiClient, fields: &TaskFields) -> Result<(), ApiError> {
        self.state = SyncState::Loading;
        let result = client.create_task(fields).await;
        self.after_mutation(client, result).await
    }

    pub async fn update(
        &mut self,
        client: &ApiClient,
        id: &str,
        fields: &TaskFields,
    ) -> Result<(), ApiError> {
        self.state = SyncState::Loading;
        let result = client.update_task(id, fields).await;
        self.after_mutation(client, result).await
    }

    pub async fn delete(&mut self, client: &ApiClient, id: &str) -> Result<(), ApiError> {
        self.state = SyncState::Loading;
        let result = client.delete_task(id).await;
        self.after_mutation(client, result).await
    }

    async fn after_mutation(
        &mut self,
        client: &ApiClient,
        result: Result<(), ApiError>,
    ) -> Result<(), ApiError> {
        match result {
            Ok(()) => self.refresh(client).await,
            Err(e) => {
                self.state = if e.is_unauthorized() {
                    SyncState::Unauthenticated
                } else {
                    SyncState::Ready
                };
                Err(e)
            }
        }
    }
}
