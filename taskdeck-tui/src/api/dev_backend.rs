use crate::api::error::ApiError;
use crate::types::{Credentials, Task, TaskFields, TaskStatus};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use time::{Duration, OffsetDateTime, UtcOffset};

pub const DEV_EMAIL: &str = "dev@localhost";
pub const DEV_PASSWORD: &str = "dev";

/// In-memory stand-in for the remote task API: issues tokens, keeps one task
/// collection per user and answers 401 for unknown tokens.
#[derive(Debug, Clone)]
pub struct DevBackend {
    store: Arc<Mutex<DevStore>>,
}

#[derive(Debug, Default)]
struct DevStore {
    users: HashMap<String, String>,
    sessions: HashMap<String, String>,
    tasks: Vec<DevTask>,
    next_task_id: u64,
    next_token: u64,
    pending_failure: Option<(u16, String)>,
}

#[derive(Debug, Clone)]
struct DevTask {
    owner: String,
    task: Task,
}

impl DevBackend {
    /// Backend seeded with the dev user and a few tasks.
    pub fn new() -> Self {
        let backend = Self::empty();
        {
            let mut store = backend.lock();
            store
                .users
                .insert(DEV_EMAIL.to_string(), DEV_PASSWORD.to_string());
            for fields in seed_dev_tasks() {
                store.insert_task(DEV_EMAIL, &fields);
            }
        }
        backend
    }

    pub fn empty() -> Self {
        Self {
            store: Arc::new(Mutex::new(DevStore::default())),
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, DevStore> {
        self.store.lock().expect("dev store lock poisoned")
    }

    pub fn login(&self, credentials: &Credentials) -> Result<String, ApiError> {
        let mut store = self.lock();
        store.take_failure()?;
        match store.users.get(&credentials.email) {
            Some(password) if *password == credentials.password => {
                Ok(store.issue_token(&credentials.email))
            }
            _ => Err(ApiError::rejected(400, "Invalid credentials")),
        }
    }

    pub fn register(&self, credentials: &Credentials) -> Result<String, ApiError> {
        let mut store = self.lock();
        store.take_failure()?;
        if credentials.email.trim().is_empty() || credentials.password.is_empty() {
            return Err(ApiError::rejected(400, "Email and password are required"));
        }
        if store.users.contains_key(&credentials.email) {
            return Err(ApiError::rejected(400, "User already exists"));
        }
        store
            .users
            .insert(credentials.email.clone(), credentials.password.clone());
        Ok(store.issue_token(&credentials.email))
    }

    pub fn list_tasks(&self, token: Option<&str>) -> Result<Vec<Task>, ApiError> {
        let mut store = self.lock();
        store.take_failure()?;
        let owner = store.authorize(token)?;
        Ok(store
            .tasks
            .iter()
            .filter(|t| t.owner == owner)
            .map(|t| t.task.clone())
            .collect())
    }

    pub fn create_task(&self, token: Option<&str>, fields: &TaskFields) -> Result<Task, ApiError> {
        let mut store = self.lock();
        store.take_failure()?;
        let owner = store.authorize(token)?;
        validate(fields)?;
        Ok(store.insert_task(&owner, fields))
    }

    pub fn update_task(
        &self,
        token: Option<&str>,
        id: &str,
        fields: &TaskFields,
    ) -> Result<Task, ApiError> {
        let mut store = self.lock();
        store.take_failure()?;
        let owner = store.authorize(token)?;
        validate(fields)?;
        let entry = store
            .tasks
            .iter_mut()
            .find(|t| t.owner == owner && t.task.id == id)
            .ok_or_else(|| ApiError::rejected(404, "Task not found"))?;
        entry.task.title = fields.title.clone();
        entry.task.description = fields.description.clone();
        entry.task.status = fields.status;
        entry.task.due_date = fields.due_date;
        Ok(entry.task.clone())
    }

    pub fn delete_task(&self, token: Option<&str>, id: &str) -> Result<(), ApiError> {
        let mut store = self.lock();
        store.take_failure()?;
        let owner = store.authorize(token)?;
        let before = store.tasks.len();
        store
            .tasks
            .retain(|t| !(t.owner == owner && t.task.id == id));
        if store.tasks.len() == before {
            return Err(ApiError::rejected(404, "Task not found"));
        }
        Ok(())
    }

    /// Invalidate every issued token, as a server-side expiry would.
    #[cfg(test)]
    pub fn revoke_sessions(&self) {
        self.lock().sessions.clear();
    }

    /// Make the next call fail with the given status (401 maps to `Unauthorized`).
    #[cfg(test)]
    pub fn fail_next(&self, status: u16, message: &str) {
        self.lock().pending_failure = Some((status, message.to_string()));
    }
}

impl Default for DevBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl DevStore {
    fn take_failure(&mut self) -> Result<(), ApiError> {
        match self.pending_failure.take() {
            Some((401, _)) => Err(ApiError::Unauthorized),
            Some((status, message)) => Err(ApiError::rejected(status, message)),
            None => Ok(()),
        }
    }

    fn authorize(&self, token: Option<&str>) -> Result<String, ApiError> {
        token
            .and_then(|t| self.sessions.get(t))
            .cloned()
            .ok_or(ApiError::Unauthorized)
    }

    fn issue_token(&mut self, email: &str) -> String {
        self.next_token += 1;
        let token = format!("dev-token-{}", self.next_token);
        self.sessions.insert(token.clone(), email.to_string());
        token
    }

    fn insert_task(&mut self, owner: &str, fields: &TaskFields) -> Task {
        self.next_task_id += 1;
        let task = Task {
            id: format!("dev-{}", self.next_task_id),
            title: fields.title.clone(),
            description: fields.description.clone(),
            status: fields.status,
            due_date: fields.due_date,
        };
        self.tasks.push(DevTask {
            owner: owner.to_string(),
            task: task.clone(),
        });
        task
    }
}

fn validate(fields: &TaskFields) -> Result<(), ApiError> {
    if fields.title.trim().is_empty() {
        return Err(ApiError::rejected(400, "Title is required"));
    }
    Ok(())
}

fn seed_dev_tasks() -> Vec<TaskFields> {
    let today = OffsetDateTime::now_utc()
        .to_offset(UtcOffset::current_local_offset().unwrap_or(UtcOffset::UTC))
        .date();
    vec![
        TaskFields {
            title: "Plan sprint".to_string(),
            description: "Pick the stories for next week".to_string(),
            status: TaskStatus::InProgress,
            due_date: today + Duration::days(2),
        },
        TaskFields {
            title: "Renew certificates".to_string(),
            description: "Staging and production load balancers".to_string(),
            status: TaskStatus::Pending,
            due_date: today + Duration::days(7),
        },
        TaskFields {
            title: "Write release notes".to_string(),
            description: "Cover the session handling changes".to_string(),
            status: TaskStatus::Completed,
            due_date: today - Duration::days(1),
        },
    ]
}
