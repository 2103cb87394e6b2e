use crate::api::ApiClient;
use crate::app::App;
use crate::runtime::load_tasks;
use crate::session;

/// Route by the stored credential and, when signed in, mount the task store
/// before the first frame.
pub async fn initialize_app_state(app: &mut App, client: &mut ApiClient) {
    app.apply_guard(session::guard(client.session()));

    app.is_loading = true;
    load_tasks(app, client).await;
    app.is_loading = false;
}
