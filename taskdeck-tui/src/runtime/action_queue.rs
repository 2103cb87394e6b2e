use crate::app::AuthMode;
use crate::types::{Credentials, TaskFields};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

/// Work that needs the API client. Key handlers queue these; the event loop
/// runs them one at a time, so no two requests are ever in flight together.
#[derive(Debug, Clone)]
pub(super) enum Action {
    SubmitAuth {
        mode: AuthMode,
        credentials: Credentials,
    },
    LoadTasks,
    CreateTask {
        fields: TaskFields,
    },
    SaveEdit {
        id: String,
        fields: TaskFields,
    },
    DeleteTask {
        id: String,
    },
    Logout,
}

pub(super) type ActionTx = UnboundedSender<Action>;
pub(super) type ActionRx = UnboundedReceiver<Action>;

pub(super) fn channel() -> (ActionTx, ActionRx) {
    mpsc::unbounded_channel()
}
