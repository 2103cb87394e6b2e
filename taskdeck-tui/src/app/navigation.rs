use super::*;

impl App {
    /// Move focus down in the task list (vim-style j or down)
    pub fn focus_next_task(&mut self) {
        let len = self.tasks().len();
        if len == 0 {
            self.focused_task_index = None;
            return;
        }
        self.focused_task_index = Some(match self.focused_task_index {
            Some(idx) if idx + 1 < len => idx + 1,
            Some(idx) => idx,
            None => 0,
        });
    }

    /// Move focus up in the task list (vim-style k or up)
    pub fn focus_previous_task(&mut self) {
        let len = self.tasks().len();
        if len == 0 {
            self.focused_task_index = None;
            return;
        }
        self.focused_task_index = Some(match self.focused_task_index {
            Some(idx) => idx.saturating_sub(1),
            None => len - 1,
        });
    }

    /// Jump one screen of rows, using the height from the last render.
    pub fn focus_page(&mut self, down: bool) {
        let len = self.tasks().len();
        if len == 0 {
            self.focused_task_index = None;
            return;
        }
        let step = self.list_view_height.max(1);
        let current = self.focused_task_index.unwrap_or(0);
        self.focused_task_index = Some(if down {
            (current + step).min(len - 1)
        } else {
            current.saturating_sub(step)
        });
    }

    /// Keep focus on a valid row after the collection was replaced.
    pub fn clamp_focus(&mut self) {
        let len = self.tasks().len();
        self.focused_task_index = match (self.focused_task_index, len) {
            (_, 0) => None,
            (Some(idx), len) => Some(idx.min(len - 1)),
            (None, _) => Some(0),
        };
        if self.focused_task_index.is_none() {
            self.list_scroll = 0;
        }
    }

    pub fn focused_task(&self) -> Option<&Task> {
        self.focused_task_index.and_then(|idx| self.tasks().get(idx))
    }

    /// Flip between the two authenticated tabs.
    pub fn toggle_tab(&mut self) {
        match self.current_view {
            View::TaskList => self.navigate_to(View::CreateTask),
            View::CreateTask => self.navigate_to(View::TaskList),
            View::Auth => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::TaskStore;
    use crate::types::TaskStatus;
    use time::macros::date;

    fn task(id: &str) -> Task {
        Task {
            id: id.to_string(),
            title: id.to_string(),
            description: String::new(),
            status: TaskStatus::Pending,
            due_date: date!(2024 - 01 - 01),
        }
    }

    #[test]
    fn focus_moves_within_bounds() {
        let mut app = App::new();
        app.store = TaskStore::from_tasks(vec![task("a"), task("b")]);

        app.focus_next_task();
        assert_eq!(app.focused_task().map(|t| t.id.as_str()), Some("a"));
        app.focus_next_task();
        app.focus_next_task();
        assert_eq!(app.focused_task_index, Some(1));
        app.focus_previous_task();
        app.focus_previous_task();
        assert_eq!(app.focused_task_index, Some(0));
    }

    #[test]
    fn page_jumps_by_rendered_height() {
        let mut app = App::new();
        app.store = TaskStore::from_tasks((0..10).map(|i| task(&i.to_string())).collect());
        app.list_view_height = 4;

        app.focus_page(true);
        assert_eq!(app.focused_task_index, Some(4));
        app.focus_page(true);
        app.focus_page(true);
        assert_eq!(app.focused_task_index, Some(9));
        app.focus_page(false);
        assert_eq!(app.focused_task_index, Some(5));
    }

    #[test]
    fn clamp_after_collection_shrinks() {
        let mut app = App::new();
        app.store = TaskStore::from_tasks(vec![task("a"), task("b"), task("c")]);
        app.focused_task_index = Some(2);

        app.store = TaskStore::from_tasks(vec![task("a")]);
        app.clamp_focus();
        assert_eq!(app.focused_task_index, Some(0));

        app.store = TaskStore::from_tasks(vec![]);
        app.clamp_focus();
        assert_eq!(app.focused_task_index, None);
    }

    #[test]
    fn tab_switches_between_list_and_create() {
        let mut app = App::new();
        app.current_view = View::TaskList;
        app.toggle_tab();
        assert_eq!(app.current_view, View::CreateTask);
        app.toggle_tab();
        assert_eq!(app.current_view, View::TaskList);
    }
}
