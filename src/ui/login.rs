use crossterm::event::{Event, KeyCode, KeyEvent};
use tui_input::backend::crossterm::EventHandler;
use tui_input::Input;

/// Username/password pair entered on the login screen.
pub struct Credentials {
    pub username: String,
    pub password: String,
}

/// State of the login screen shown while no session is open.
pub struct LoginForm {
    pub username: Input,
    pub password: Input,
    /// 0 = username, 1 = password.
    pub focus: usize,
    pub error: Option<String>,
}

impl LoginForm {
    pub fn new() -> Self {
        LoginForm {
            username: Input::default(),
            password: Input::default(),
            focus: 0,
            error: None,
        }
    }

    /// Feeds a key into the form. Returns the credentials when the user
    /// submits; Esc is left for the caller.
    pub fn handle_key(&mut self, key: KeyEvent) -> Option<Credentials> {
        match key.code {
            KeyCode::Enter => Some(Credentials {
                username: self.username.value().to_string(),
                password: self.password.value().to_string(),
            }),
            KeyCode::Tab | KeyCode::Down | KeyCode::Up | KeyCode::BackTab => {
                self.focus = 1 - self.focus;
                None
            }
            _ => {
                let field = if self.focus == 0 {
                    &mut self.username
                } else {
                    &mut self.password
                };
                field.handle_event(&Event::Key(key));
                None
            }
        }
    }

    /// The password rendered as asterisks.
    pub fn masked_password(&self) -> String {
        "*".repeat(self.password.value().chars().count())
    }
}

impl Default for LoginForm {
    fn default() -> Self {
        Self::new()
    }
}
