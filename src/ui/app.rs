//! Terminal host: owns the terminal, the router, and the key map, and
//! relays commands to whichever screen is active.

use std::io;
use std::rc::Rc;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::{Backend, CrosstermBackend};
use ratatui::Terminal;
use tracing::info;
use tui_input::backend::crossterm::EventHandler;
use tui_input::Input;

use crate::app_context::AppContext;
use crate::auth::AuthService;
use crate::config::Config;
use crate::i18n::Lang;
use crate::router::{Fragment, Router};
use crate::views::{build_router, RowAction, ViewBody, ViewCommand, ViewEffect};

use super::debounce::SearchDebounce;
use super::draw;
use super::login::{Credentials, LoginForm};

const TICK: Duration = Duration::from_millis(100);
const STATUS_TTL: Duration = Duration::from_secs(4);
const SEARCH_DEBOUNCE_MS: u64 = 250;

/// Where plain keys land while no modal is open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Focus {
    Content,
    Search,
}

pub(super) struct StatusLine {
    pub text: String,
    pub error: bool,
    at: Instant,
}

pub struct App {
    pub(super) ctx: Rc<AppContext>,
    pub(super) auth: AuthService,
    pub(super) router: Router,
    /// `Some` while the login screen is up.
    pub(super) login: Option<LoginForm>,
    pub(super) focus: Focus,
    pub(super) search: Input,
    pub(super) status: Option<StatusLine>,
    pub(super) show_help: bool,
    pub(super) show_hints: bool,
    pub(super) use_glyphs: bool,
    search_debounce: SearchDebounce,
    /// Route to open once a session exists.
    pending_route: String,
    should_quit: bool,
}

impl App {
    pub fn new(ctx: Rc<AppContext>, config: &Config, initial_route: &str) -> Self {
        let auth = AuthService::new(Arc::clone(&ctx.backend), config);
        let router = build_router(&ctx);
        let login = if auth.is_authenticated() {
            None
        } else {
            Some(LoginForm::new())
        };
        let mut app = App {
            ctx,
            auth,
            router,
            login,
            focus: Focus::Content,
            search: Input::default(),
            status: None,
            show_help: false,
            show_hints: config.display.show_key_hints,
            use_glyphs: config.display.use_glyphs,
            search_debounce: SearchDebounce::new(SEARCH_DEBOUNCE_MS),
            pending_route: initial_route.to_string(),
            should_quit: false,
        };
        if app.login.is_none() {
            let target = app.pending_route.clone();
            app.navigate(&target);
        }
        app
    }

    pub fn run_loop<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        loop {
            if self.login.is_none() {
                if let Some(view) = self.router.current_view_mut() {
                    view.poll();
                }
                if self.search_debounce.ready() {
                    let term = self.search.value().to_string();
                    self.dispatch(ViewCommand::Filter(term));
                }
            }
            self.expire_status();

            terminal.draw(|f| draw::draw(f, self))?;

            if event::poll(TICK)? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key);
                    }
                }
            }
            if self.should_quit {
                return Ok(());
            }
        }
    }

    fn handle_key(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }

        if self.login.is_some() {
            self.handle_login_key(key);
            return;
        }

        if self.show_help {
            self.show_help = false;
            return;
        }

        let modal_open = self
            .router
            .current_view()
            .map(|view| view.modal().is_some())
            .unwrap_or(false);
        if modal_open {
            self.dispatch(ViewCommand::ModalKey(key));
            return;
        }

        match self.focus {
            Focus::Search => self.handle_search_key(key),
            Focus::Content => self.handle_content_key(key),
        }
    }

    fn handle_login_key(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Esc {
            self.should_quit = true;
            return;
        }
        let submitted = self
            .login
            .as_mut()
            .and_then(|form| form.handle_key(key));
        if let Some(credentials) = submitted {
            self.attempt_login(credentials);
        }
    }

    fn handle_search_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc | KeyCode::Enter => {
                self.focus = Focus::Content;
            }
            _ => {
                self.search.handle_event(&Event::Key(key));
                self.search_debounce.mark();
            }
        }
    }

    fn handle_content_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('/') => self.focus = Focus::Search,
            KeyCode::F(1) | KeyCode::Char('?') => self.show_help = true,
            KeyCode::F(2) => self.toggle_language(),
            KeyCode::F(10) => self.logout(),
            KeyCode::Tab => self.cycle_route(1),
            KeyCode::BackTab => self.cycle_route(-1),
            KeyCode::Char('r') => self.dispatch(ViewCommand::Reload),
            KeyCode::Char('a') => self.dispatch(ViewCommand::Add),
            KeyCode::Char('e') => self.dispatch(ViewCommand::Activate(RowAction::Edit)),
            KeyCode::Char('d') => self.dispatch(ViewCommand::Activate(RowAction::Delete)),
            KeyCode::Char('v') | KeyCode::Enter => {
                self.dispatch(ViewCommand::Activate(RowAction::View))
            }
            KeyCode::Char('x') => self.dispatch(ViewCommand::ExportCsv),
            KeyCode::Char('X') => self.dispatch(ViewCommand::ExportJson),
            KeyCode::Char('y') => self.yank_selected_row(),
            KeyCode::Up => self.dispatch(ViewCommand::SelectUp),
            KeyCode::Down => self.dispatch(ViewCommand::SelectDown),
            KeyCode::Left | KeyCode::PageUp => self.dispatch(ViewCommand::PrevPage),
            KeyCode::Right | KeyCode::PageDown => self.dispatch(ViewCommand::NextPage),
            KeyCode::Char(digit @ '1'..='9') => {
                self.dispatch(ViewCommand::SortColumn(digit as usize - '1' as usize))
            }
            _ => {}
        }
    }

    fn dispatch(&mut self, command: ViewCommand) {
        let Some(view) = self.router.current_view_mut() else {
            return;
        };
        match view.handle(command) {
            ViewEffect::None => {}
            ViewEffect::Status(text) => self.set_status(text),
            ViewEffect::Error(text) => self.set_error(text),
        }
    }

    /// Navigates and resets the search box, seeding it from a `q` param
    /// when the target route actually resolves.
    fn navigate(&mut self, raw: &str) {
        let fragment = Fragment::parse(raw);
        self.router.navigate(raw);
        let term = if self.router.active_path() == fragment.path {
            fragment.params.get("q").cloned().unwrap_or_default()
        } else {
            String::new()
        };
        self.search = Input::new(term.clone()).with_cursor(term.len());
        self.search_debounce.cancel();
        self.focus = Focus::Content;
    }

    fn cycle_route(&mut self, step: isize) {
        let paths: Vec<&'static str> =
            self.router.routes().iter().map(|entry| entry.path).collect();
        if paths.is_empty() {
            return;
        }
        let current = paths
            .iter()
            .position(|path| *path == self.router.active_path())
            .unwrap_or(0);
        let next = (current as isize + step).rem_euclid(paths.len() as isize) as usize;
        self.navigate(paths[next]);
    }

    /// Swaps the interface language and rebuilds the active screen so
    /// every label picks up the new table.
    fn toggle_language(&mut self) {
        self.ctx.i18n.borrow_mut().toggle();
        let active = self.router.active_path().to_string();
        if !active.is_empty() {
            self.navigate(&active);
        }
        let lang = self.ctx.i18n.borrow().lang();
        let name = match lang {
            Lang::En => "English",
            Lang::Fr => "Français",
        };
        let label = self.ctx.i18n.borrow().t("common.language");
        self.set_status(format!("{label}: {name}"));
    }

    fn attempt_login(&mut self, credentials: Credentials) {
        match self.auth.login(&credentials.username, &credentials.password) {
            Ok(true) => {
                self.login = None;
                let target = self.pending_route.clone();
                self.navigate(&target);
            }
            Ok(false) => {
                let message = self.ctx.i18n.borrow().t("login.error").to_string();
                if let Some(form) = &mut self.login {
                    form.error = Some(message);
                }
            }
            Err(err) => {
                if let Some(form) = &mut self.login {
                    form.error = Some(err.to_string());
                }
            }
        }
    }

    fn logout(&mut self) {
        if let Err(err) = self.auth.logout() {
            self.set_error(format!("Logout failed: {err}"));
            return;
        }
        info!(target: "auth", "logged out");
        self.login = Some(LoginForm::new());
        self.pending_route = self.ctx.default_route.clone();
    }

    /// Copies the selected row's cells to the system clipboard as
    /// tab-separated text.
    fn yank_selected_row(&mut self) {
        let line = match self.router.current_view().map(|view| view.body()) {
            Some(ViewBody::Table { snapshot, selected }) => {
                snapshot.rows.get(selected).map(|row| {
                    row.cells
                        .iter()
                        .map(|cell| cell.text.as_str())
                        .collect::<Vec<_>>()
                        .join("\t")
                })
            }
            _ => None,
        };
        let Some(line) = line else {
            return;
        };
        match arboard::Clipboard::new() {
            Ok(mut clipboard) => match clipboard.set_text(&line) {
                Ok(()) => self.set_status("Yanked row to clipboard".to_string()),
                Err(err) => self.set_error(format!("Clipboard error: {err}")),
            },
            Err(err) => self.set_error(format!("Clipboard error: {err}")),
        }
    }

    fn set_status(&mut self, text: String) {
        self.status = Some(StatusLine {
            text,
            error: false,
            at: Instant::now(),
        });
    }

    fn set_error(&mut self, text: String) {
        self.status = Some(StatusLine {
            text,
            error: true,
            at: Instant::now(),
        });
    }

    fn expire_status(&mut self) {
        if let Some(status) = &self.status {
            if status.at.elapsed() > STATUS_TTL {
                self.status = None;
            }
        }
    }
}

/// Sets up the terminal, runs the app, and restores the terminal even
/// when the loop errors out.
pub fn run(ctx: Rc<AppContext>, config: &Config, initial_route: &str) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(ctx, config, initial_route);
    let result = app.run_loop(&mut terminal);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}
