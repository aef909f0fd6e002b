//! Generic controller shared by the five entity screens.
//!
//! The per-entity parts live behind [`EntityScreen`]: column layout,
//! detail lines, form fields, and whatever option lists the form needs
//! loaded alongside the records. Everything else (table commands,
//! selection, modals, save and delete flows, reload-after-write) is
//! identical across entities and lives here once.

use std::collections::HashMap;

use crossterm::event::{KeyCode, KeyEvent};
use tracing::{debug, warn};

use crate::app_context::SharedI18n;
use crate::data_exporter::RecordExporter;
use crate::i18n::I18n;
use crate::models::Entity;
use crate::repository::{Load, Repository};
use crate::table::{ColumnSpec, TableEngine};

use super::form::{FieldError, FormEvent, FormField, FormState};
use super::{ModalState, RowAction, View, ViewBody, ViewCommand, ViewEffect};

/// Progress of the screen's option-list loads.
pub enum ContextState {
    Pending,
    Ready,
    Failed(String),
}

pub trait EntityScreen {
    type Record: Entity;

    fn title_key(&self) -> &'static str;
    fn add_key(&self) -> &'static str;
    /// File-name stem for exports, e.g. `games`.
    fn export_name(&self) -> &'static str;
    fn columns(&self, i18n: &I18n) -> Vec<ColumnSpec<Self::Record>>;

    /// Kick off loads for the option lists the form needs.
    fn start_context(&mut self) {}
    fn poll_context(&mut self) -> ContextState {
        ContextState::Ready
    }

    fn detail_title(&self, record: &Self::Record) -> String;
    fn detail_lines(&self, record: &Self::Record, i18n: &I18n) -> Vec<(String, String)>;

    fn form_fields(&self, record: Option<&Self::Record>, i18n: &I18n) -> Vec<FormField>;
    /// Parses the form into a record, or per-field message keys. The
    /// record's id is ignored on create and forced on update.
    fn build_record(&self, form: &FormState) -> Result<Self::Record, Vec<FieldError>>;
    /// Called after a field edit, for cross-field behavior like the
    /// orders form filling the amount from the chosen game.
    fn field_changed(&self, _form: &mut FormState, _name: &'static str) {}
}

pub struct EntityView<S: EntityScreen> {
    screen: S,
    repo: Repository<S::Record>,
    i18n: SharedI18n,
    page_size: usize,
    /// `?q=` from the fragment, applied once the table first builds.
    initial_query: Option<String>,
    records_load: Option<Load<Vec<S::Record>>>,
    /// Records that arrived while the context was still loading.
    staged: Option<Vec<S::Record>>,
    engine: Option<TableEngine<S::Record>>,
    selected: usize,
    modal: Option<ModalState>,
    load_error: Option<String>,
    alive: bool,
}

impl<S: EntityScreen> EntityView<S> {
    pub fn new(
        screen: S,
        repo: Repository<S::Record>,
        i18n: SharedI18n,
        page_size: usize,
        params: &HashMap<String, String>,
    ) -> Self {
        EntityView {
            screen,
            repo,
            i18n,
            page_size,
            initial_query: params.get("q").cloned(),
            records_load: None,
            staged: None,
            engine: None,
            selected: 0,
            modal: None,
            load_error: None,
            alive: true,
        }
    }

    fn reload(&mut self) {
        self.records_load = Some(self.repo.load_all());
    }

    fn page_len(&self) -> usize {
        self.engine
            .as_ref()
            .map(|engine| engine.page_records().len())
            .unwrap_or(0)
    }

    fn clamp_selection(&mut self) {
        let len = self.page_len();
        self.selected = if len == 0 {
            0
        } else {
            self.selected.min(len - 1)
        };
    }

    fn selected_id(&self) -> Option<crate::models::RecordId> {
        self.engine
            .as_ref()
            .and_then(|engine| engine.page_record(self.selected))
            .map(Entity::id)
    }

    fn open_detail(&mut self, id: crate::models::RecordId) -> ViewEffect {
        match self.repo.get_by_id(id) {
            Ok(Some(record)) => {
                let i18n = self.i18n.borrow();
                self.modal = Some(ModalState::Detail {
                    title: self.screen.detail_title(&record),
                    lines: self.screen.detail_lines(&record, &i18n),
                });
                ViewEffect::None
            }
            Ok(None) => ViewEffect::None,
            Err(err) => ViewEffect::Error(err.to_string()),
        }
    }

    fn open_form(&mut self, id: Option<crate::models::RecordId>) -> ViewEffect {
        let record = match id {
            Some(id) => match self.repo.get_by_id(id) {
                Ok(Some(record)) => Some(record),
                Ok(None) => return ViewEffect::None,
                Err(err) => return ViewEffect::Error(err.to_string()),
            },
            None => None,
        };
        let i18n = self.i18n.borrow();
        let title = match record {
            Some(_) => i18n.t("common.edit").to_string(),
            None => i18n.t(self.screen.add_key()).to_string(),
        };
        let fields = self.screen.form_fields(record.as_ref(), &i18n);
        drop(i18n);
        self.modal = Some(ModalState::Form(FormState::new(
            title,
            record.as_ref().map(Entity::id),
            fields,
        )));
        ViewEffect::None
    }

    fn submit_form(&mut self, mut form: FormState) -> ViewEffect {
        match self.screen.build_record(&form) {
            Err(errors) => {
                let i18n = self.i18n.borrow();
                form.apply_errors(&errors, |key| i18n.t(key));
                drop(i18n);
                self.modal = Some(ModalState::Form(form));
                ViewEffect::None
            }
            Ok(record) => {
                let result = match form.record_id {
                    Some(id) => self.repo.update(id, record),
                    None => self.repo.create(record),
                };
                match result {
                    Ok(_) => {
                        self.reload();
                        ViewEffect::None
                    }
                    Err(err) => {
                        // Stale edit or storage failure: keep the form
                        // open with the message under the fields.
                        let message = err.to_string();
                        form.error = Some(message.clone());
                        self.modal = Some(ModalState::Form(form));
                        ViewEffect::Error(message)
                    }
                }
            }
        }
    }

    fn handle_modal_key(&mut self, key: KeyEvent) -> ViewEffect {
        let Some(modal) = self.modal.take() else {
            return ViewEffect::None;
        };
        match modal {
            ModalState::Detail { title, lines } => {
                if matches!(key.code, KeyCode::Esc | KeyCode::Enter) {
                    ViewEffect::None
                } else {
                    self.modal = Some(ModalState::Detail { title, lines });
                    ViewEffect::None
                }
            }
            ModalState::Confirm { message, id } => match key.code {
                KeyCode::Enter | KeyCode::Char('y') => match self.repo.delete(id) {
                    Ok(()) => {
                        self.reload();
                        ViewEffect::None
                    }
                    Err(err) => ViewEffect::Error(err.to_string()),
                },
                KeyCode::Esc | KeyCode::Char('n') => ViewEffect::None,
                _ => {
                    self.modal = Some(ModalState::Confirm { message, id });
                    ViewEffect::None
                }
            },
            ModalState::Form(mut form) => match key.code {
                KeyCode::Esc => ViewEffect::None,
                KeyCode::Enter => self.submit_form(form),
                _ => {
                    if let FormEvent::Edited(index) = form.handle_key(key) {
                        let name = form.fields[index].name;
                        self.screen.field_changed(&mut form, name);
                    }
                    self.modal = Some(ModalState::Form(form));
                    ViewEffect::None
                }
            },
        }
    }

    fn export(&self, json: bool) -> ViewEffect {
        let Some(engine) = &self.engine else {
            return ViewEffect::None;
        };
        let records = engine.visible_records();
        let result = if json {
            RecordExporter::export_json(self.screen.export_name(), &records)
        } else {
            RecordExporter::export_csv(self.screen.export_name(), &records)
        };
        match result {
            Ok(message) => ViewEffect::Status(message),
            Err(err) => ViewEffect::Error(format!("{err:#}")),
        }
    }
}

impl<S: EntityScreen> View for EntityView<S> {
    fn title(&self) -> String {
        self.i18n.borrow().t(self.screen.title_key()).to_string()
    }

    fn render(&mut self) {
        debug!(target: "views", "loading {} screen", self.screen.export_name());
        self.reload();
        self.screen.start_context();
    }

    fn poll(&mut self) -> bool {
        if !self.alive {
            return false;
        }
        let mut changed = false;

        if let Some(load) = &self.records_load {
            if let Some(result) = load.take() {
                self.records_load = None;
                changed = true;
                match result {
                    Ok(records) => {
                        self.load_error = None;
                        self.staged = Some(records);
                    }
                    Err(err) => {
                        warn!(target: "views", "load failed: {err}");
                        self.load_error = Some(err.to_string());
                    }
                }
            }
        }

        match self.screen.poll_context() {
            ContextState::Failed(message) => {
                if self.load_error.is_none() {
                    warn!(target: "views", "context load failed: {message}");
                    self.load_error = Some(message);
                    changed = true;
                }
            }
            ContextState::Ready => {
                if let Some(records) = self.staged.take() {
                    changed = true;
                    match &mut self.engine {
                        Some(engine) => engine.set_data(records),
                        None => {
                            let columns = self.screen.columns(&self.i18n.borrow());
                            let mut engine =
                                TableEngine::new(columns, records, self.page_size);
                            if let Some(term) = self.initial_query.take() {
                                engine.filter(&term);
                            }
                            self.engine = Some(engine);
                        }
                    }
                    self.clamp_selection();
                }
            }
            ContextState::Pending => {}
        }

        changed
    }

    fn handle(&mut self, command: ViewCommand) -> ViewEffect {
        match command {
            ViewCommand::Filter(term) => {
                if let Some(engine) = &mut self.engine {
                    engine.filter(&term);
                    self.selected = 0;
                }
                ViewEffect::None
            }
            ViewCommand::SortColumn(index) => {
                if let Some(engine) = &mut self.engine {
                    let key = engine.columns().get(index).map(|column| column.key);
                    if let Some(key) = key {
                        engine.sort(key);
                    }
                }
                ViewEffect::None
            }
            ViewCommand::NextPage => {
                if let Some(engine) = &mut self.engine {
                    engine.next_page();
                    self.selected = 0;
                }
                ViewEffect::None
            }
            ViewCommand::PrevPage => {
                if let Some(engine) = &mut self.engine {
                    engine.prev_page();
                    self.selected = 0;
                }
                ViewEffect::None
            }
            ViewCommand::SelectDown => {
                let len = self.page_len();
                if len > 0 {
                    self.selected = (self.selected + 1).min(len - 1);
                }
                ViewEffect::None
            }
            ViewCommand::SelectUp => {
                self.selected = self.selected.saturating_sub(1);
                ViewEffect::None
            }
            ViewCommand::Activate(action) => {
                let Some(id) = self.selected_id() else {
                    return ViewEffect::None;
                };
                match action {
                    RowAction::View => self.open_detail(id),
                    RowAction::Edit => self.open_form(Some(id)),
                    RowAction::Delete => {
                        let message = self
                            .i18n
                            .borrow()
                            .t("common.confirmDelete")
                            .to_string();
                        self.modal = Some(ModalState::Confirm { message, id });
                        ViewEffect::None
                    }
                }
            }
            ViewCommand::Add => self.open_form(None),
            ViewCommand::Reload => {
                self.reload();
                ViewEffect::None
            }
            ViewCommand::ExportCsv => self.export(false),
            ViewCommand::ExportJson => self.export(true),
            ViewCommand::ModalKey(key) => self.handle_modal_key(key),
        }
    }

    fn body(&self) -> ViewBody<'_> {
        if let Some(error) = &self.load_error {
            ViewBody::Error(error)
        } else if let Some(engine) = &self.engine {
            ViewBody::Table {
                snapshot: engine.snapshot(),
                selected: self.selected,
            }
        } else {
            ViewBody::Loading
        }
    }

    fn modal(&self) -> Option<&ModalState> {
        self.modal.as_ref()
    }

    fn destroy(&mut self) {
        self.alive = false;
        self.modal = None;
        self.engine = None;
        self.records_load = None;
        self.staged = None;
    }
}
