use crate::api::{ApiClient, ApiError};
use crate::app::{App, AuthMode, View};
use crate::session;
use crate::types::{Credentials, TaskFields};
use tracing::{error, info};

use super::action_queue::Action;

pub(super) async fn run_action(
    action: Action,
    app: &mut App,
    client: &mut ApiClient,
) {
    match action {
        Action::SubmitAuth { mode, credentials } => {
            handle_submit_auth(mode, credentials, app, client).await;
        }
        Action::LoadTasks => {
            load_tasks(app, client).await;
        }
        Action::CreateTask { fields } => {
            handle_create_task(fields, app, client).await;
        }
        Action::SaveEdit { id, fields } => {
            handle_save_edit(id, fields, app, client).await;
        }
        Action::DeleteTask { id } => {
            handle_delete_task(id, app, client).await;
        }
        Action::Logout => {
            handle_logout(app, client);
        }
    }
}

/// Mount the task store for the current session and keep row focus valid.
pub(crate) async fn load_tasks(app: &mut App, client: &mut ApiClient) {
    match app.store.mount(client).await {
        Ok(()) => app.clamp_focus(),
        Err(e) => handle_api_failure(app, client, e, |_| String::new()),
    }
}

/// Drop the credential after a 401 and send the user back to sign in.
pub(crate) fn expire_session(app: &mut App, client: &mut ApiClient) {
    if let Err(e) = client.session_mut().clear() {
        error!(error = %e, "failed to remove stored session");
    }
    app.apply_guard(session::guard(client.session()));
    app.set_status(ApiError::Unauthorized.to_string());
}

fn handle_api_failure(
    app: &mut App,
    client: &mut ApiClient,
    err: ApiError,
    describe: impl FnOnce(&ApiError) -> String,
) {
    if err.is_unauthorized() {
        expire_session(app, client);
    } else {
        let message = describe(&err);
        if !message.is_empty() {
            app.set_status(message);
        }
    }
}

async fn handle_submit_auth(
    mode: AuthMode,
    credentials: Credentials,
    app: &mut App,
    client: &mut ApiClient,
) {
    let result = match mode {
        AuthMode::SignIn => client.login(&credentials).await,
        AuthMode::SignUp => client.register(&credentials).await,
    };

    let token = match result {
        Ok(token) => token,
        Err(e) => {
            app.auth_set_error(e.to_string());
            return;
        }
    };

    if let Err(e) = client.session_mut().establish(token) {
        error!(error = %e, "failed to persist session");
        app.auth_set_error(format!("Could not save session: {e:#}"));
        return;
    }
    info!(email = %credentials.email, ?mode, "signed in");

    // Fresh start for the new session, as a page reload would give.
    app.reset_session_state();
    app.navigate_to(View::TaskList);
    load_tasks(app, client).await;
}

async fn handle_create_task(fields: TaskFields, app: &mut App, client: &mut ApiClient) {
    match app.store.create(client, &fields).await {
        Ok(()) => {
            app.reset_draft();
            app.clamp_focus();
            app.set_status("Task added successfully!");
        }
        Err(e) => handle_api_failure(app, client, e, |e| {
            format!("Failed to add the task: {e}. Please try again.")
        }),
    }
}

async fn handle_save_edit(id: String, fields: TaskFields, app: &mut App, client: &mut ApiClient) {
    let result = app.store.update(client, &id, &fields).await;
    app.exit_edit_mode();
    match result {
        Ok(()) => {
            app.clamp_focus();
            app.set_status("Task updated successfully!");
        }
        Err(e) => handle_api_failure(app, client, e, |e| format!("Error updating task: {e}")),
    }
}

async fn handle_delete_task(id: String, app: &mut App, client: &mut ApiClient) {
    match app.store.delete(client, &id).await {
        Ok(()) => {
            if app.is_editing(&id) {
                app.exit_edit_mode();
            }
            app.clamp_focus();
            app.set_status("Task deleted successfully!");
        }
        Err(e) => handle_api_failure(app, client, e, |e| format!("Error deleting task: {e}")),
    }
}

fn handle_logout(app: &mut App, client: &mut ApiClient) {
    if let Err(e) = client.session_mut().clear() {
        error!(error = %e, "failed to remove stored session");
    }
    app.reset_session_state();
    app.navigate_to(View::Auth);
    app.set_status("Signed out");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::DevBackend;
    use crate::app::TextInput;
    use crate::session::Session;
    use crate::store::SyncState;
    use crate::types::TaskStatus;
    use time::macros::date;

    fn fields(title: &str) -> TaskFields {
        TaskFields {
            title: title.to_string(),
            description: "d".to_string(),
            status: TaskStatus::Pending,
            due_date: date!(2024 - 03 - 05),
        }
    }

    async fn signed_in_app(backend: &DevBackend) -> (App, ApiClient) {
        let mut app = App::new();
        let mut client = ApiClient::dev(Session::default(), backend.clone()).unwrap();
        run_action(
            Action::SubmitAuth {
                mode: AuthMode::SignUp,
                credentials: Credentials::new("me@example.com", "pw"),
            },
            &mut app,
            &mut client,
        )
        .await;
        (app, client)
    }

    #[tokio::test]
    async fn sign_up_routes_to_list_and_loads_tasks() {
        let backend = DevBackend::empty();
        let (app, client) = signed_in_app(&backend).await;

        assert!(client.session().token().is_some());
        assert_eq!(app.current_view, View::TaskList);
        assert_eq!(app.store.state(), SyncState::Ready);
        assert!(app.auth.error.is_none());
    }

    #[tokio::test]
    async fn failed_sign_in_keeps_form_and_shows_error() {
        let backend = DevBackend::empty();
        let mut app = App::new();
        app.auth.email = TextInput::from_str("nobody@example.com");
        let mut client = ApiClient::dev(Session::default(), backend).unwrap();

        run_action(
            Action::SubmitAuth {
                mode: AuthMode::SignIn,
                credentials: Credentials::new("nobody@example.com", "pw"),
            },
            &mut app,
            &mut client,
        )
        .await;

        assert_eq!(app.current_view, View::Auth);
        assert!(app.auth.error.is_some());
        assert_eq!(app.auth.email.value, "nobody@example.com");
        assert!(client.session().token().is_none());
    }

    #[tokio::test]
    async fn create_clears_draft_on_success_and_keeps_it_on_failure() {
        let backend = DevBackend::empty();
        let (mut app, mut client) = signed_in_app(&backend).await;
        app.navigate_to(View::CreateTask);
        app.draft.title = TextInput::from_str("A");

        run_action(Action::CreateTask { fields: fields("A") }, &mut app, &mut client)
            .await;
        assert_eq!(app.status_message.as_deref(), Some("Task added successfully!"));
        assert!(app.draft.title.value.is_empty());
        assert_eq!(app.tasks().len(), 1);

        app.draft.title = TextInput::from_str("B");
        backend.fail_next(500, "boom");
        run_action(Action::CreateTask { fields: fields("B") }, &mut app, &mut client)
            .await;
        assert_eq!(
            app.status_message.as_deref(),
            Some("Failed to add the task: boom. Please try again.")
        );
        assert_eq!(app.draft.title.value, "B");
        assert_eq!(app.tasks().len(), 1);
    }

    #[tokio::test]
    async fn save_edit_exits_edit_mode_either_way() {
        let backend = DevBackend::empty();
        let (mut app, mut client) = signed_in_app(&backend).await;
        run_action(Action::CreateTask { fields: fields("A") }, &mut app, &mut client)
            .await;
        let id = app.tasks()[0].id.clone();

        app.begin_edit(&id);
        let mut done = fields("A");
        done.status = TaskStatus::Completed;
        run_action(
            Action::SaveEdit {
                id: id.clone(),
                fields: done,
            },
            &mut app,
            &mut client,
        )
        .await;
        assert!(!app.is_in_edit_mode());
        assert_eq!(app.status_message.as_deref(), Some("Task updated successfully!"));
        assert_eq!(app.tasks()[0].status, TaskStatus::Completed);

        app.begin_edit(&id);
        run_action(
            Action::SaveEdit {
                id: "missing".to_string(),
                fields: fields("A"),
            },
            &mut app,
            &mut client,
        )
        .await;
        assert!(!app.is_in_edit_mode());
        assert_eq!(
            app.status_message.as_deref(),
            Some("Error updating task: Task not found")
        );
    }

    #[tokio::test]
    async fn delete_reports_outcome() {
        let backend = DevBackend::empty();
        let (mut app, mut client) = signed_in_app(&backend).await;
        run_action(Action::CreateTask { fields: fields("A") }, &mut app, &mut client)
            .await;
        let id = app.tasks()[0].id.clone();

        run_action(Action::DeleteTask { id: id.clone() }, &mut app, &mut client)
            .await;
        assert_eq!(app.status_message.as_deref(), Some("Task deleted successfully!"));
        assert!(app.tasks().is_empty());
        assert_eq!(app.focused_task_index, None);

        run_action(Action::DeleteTask { id }, &mut app, &mut client)
            .await;
        assert_eq!(
            app.status_message.as_deref(),
            Some("Error deleting task: Task not found")
        );
    }

    #[tokio::test]
    async fn unauthorized_mutation_expires_session() {
        let backend = DevBackend::empty();
        let (mut app, mut client) = signed_in_app(&backend).await;
        app.navigate_to(View::CreateTask);
        app.draft.title = TextInput::from_str("half typed");

        backend.revoke_sessions();
        run_action(Action::CreateTask { fields: fields("A") }, &mut app, &mut client)
            .await;

        assert!(client.session().token().is_none());
        assert_eq!(app.current_view, View::Auth);
        assert!(app.draft.title.value.is_empty());
        assert_eq!(
            app.status_message.as_deref(),
            Some("Session expired or invalid. Please sign in again.")
        );
    }

    #[tokio::test]
    async fn failed_reload_keeps_cache_and_session() {
        let backend = DevBackend::empty();
        let (mut app, mut client) = signed_in_app(&backend).await;
        run_action(Action::CreateTask { fields: fields("A") }, &mut app, &mut client).await;

        backend.fail_next(503, "down");
        run_action(Action::LoadTasks, &mut app, &mut client).await;

        assert_eq!(app.store.state(), SyncState::Ready);
        assert_eq!(app.tasks().len(), 1);
        assert_eq!(app.current_view, View::TaskList);
        assert!(client.session().token().is_some());
    }

    #[tokio::test]
    async fn logout_clears_credential_and_cache() {
        let backend = DevBackend::empty();
        let (mut app, mut client) = signed_in_app(&backend).await;
        run_action(Action::CreateTask { fields: fields("A") }, &mut app, &mut client)
            .await;

        run_action(Action::Logout, &mut app, &mut client).await;

        assert!(client.session().token().is_none());
        assert_eq!(app.current_view, View::Auth);
        assert!(app.tasks().is_empty());
        assert_eq!(app.store.state(), SyncState::Uninitialized);
    }
}
