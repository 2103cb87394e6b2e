use super::*;

impl App {
    pub fn auth_next_field(&mut self) {
        self.auth.focused_field = match self.auth.focused_field {
            AuthField::Email => AuthField::Password,
            AuthField::Password => AuthField::Email,
        };
    }

    pub fn auth_input_char(&mut self, c: char) {
        self.auth.focused_input_mut().insert(c);
    }

    pub fn auth_backspace(&mut self) {
        self.auth.focused_input_mut().backspace();
    }

    pub fn auth_move_cursor(&mut self, left: bool) {
        let input = self.auth.focused_input_mut();
        if left {
            input.move_left();
        } else {
            input.move_right();
        }
    }

    /// Switch between signing in and creating an account.
    pub fn toggle_auth_mode(&mut self) {
        self.auth.mode = match self.auth.mode {
            AuthMode::SignIn => AuthMode::SignUp,
            AuthMode::SignUp => AuthMode::SignIn,
        };
        self.auth.error = None;
    }

    pub fn auth_set_error(&mut self, err: String) {
        self.auth.error = Some(err);
    }
}
