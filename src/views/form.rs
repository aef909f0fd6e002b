//! Editable form state for the add/edit modals.
//!
//! A form is an ordered list of fields with one focused at a time. Text
//! fields wrap a `tui_input::Input` so editing keys behave like every
//! other input in the app; select fields cycle a fixed option list.
//! Validation happens at submit time, never per keystroke.

use crossterm::event::{Event, KeyCode, KeyEvent};
use tui_input::backend::crossterm::EventHandler;
use tui_input::Input;

use crate::models::RecordId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Number,
    Date,
    Select,
}

#[derive(Debug, Clone)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

impl SelectOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        SelectOption {
            value: value.into(),
            label: label.into(),
        }
    }
}

pub struct FormField {
    pub name: &'static str,
    pub label: String,
    pub kind: FieldKind,
    pub required: bool,
    pub input: Input,
    pub options: Vec<SelectOption>,
    pub selected: usize,
    pub error: Option<String>,
}

impl FormField {
    pub fn text(name: &'static str, label: impl Into<String>, value: &str) -> Self {
        Self::input_field(name, label, FieldKind::Text, value)
    }

    pub fn number(name: &'static str, label: impl Into<String>, value: &str) -> Self {
        Self::input_field(name, label, FieldKind::Number, value)
    }

    pub fn date(name: &'static str, label: impl Into<String>, value: &str) -> Self {
        Self::input_field(name, label, FieldKind::Date, value)
    }

    /// A select starts on the option whose value equals `current`, or
    /// the first option when nothing matches.
    pub fn select(
        name: &'static str,
        label: impl Into<String>,
        options: Vec<SelectOption>,
        current: &str,
    ) -> Self {
        let selected = options
            .iter()
            .position(|option| option.value == current)
            .unwrap_or(0);
        FormField {
            name,
            label: label.into(),
            kind: FieldKind::Select,
            required: true,
            input: Input::default(),
            options,
            selected,
            error: None,
        }
    }

    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    /// The submit-time value: option value for selects, raw text for
    /// everything else.
    pub fn value(&self) -> String {
        match self.kind {
            FieldKind::Select => self
                .options
                .get(self.selected)
                .map(|option| option.value.clone())
                .unwrap_or_default(),
            _ => self.input.value().to_string(),
        }
    }

    /// What to draw in the field body.
    pub fn display(&self) -> String {
        match self.kind {
            FieldKind::Select => self
                .options
                .get(self.selected)
                .map(|option| option.label.clone())
                .unwrap_or_default(),
            _ => self.input.value().to_string(),
        }
    }

    fn input_field(
        name: &'static str,
        label: impl Into<String>,
        kind: FieldKind,
        value: &str,
    ) -> Self {
        FormField {
            name,
            label: label.into(),
            kind,
            required: true,
            input: Input::new(value.to_string()).with_cursor(value.len()),
            options: Vec::new(),
            selected: 0,
            error: None,
        }
    }
}

/// What a key did to the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormEvent {
    Moved,
    Edited(usize),
    Ignored,
}

pub struct FormState {
    pub title: String,
    /// `Some` when editing an existing record.
    pub record_id: Option<RecordId>,
    pub fields: Vec<FormField>,
    pub focus: usize,
    /// Save-time failure from the repository, shown under the fields.
    pub error: Option<String>,
}

impl FormState {
    pub fn new(title: impl Into<String>, record_id: Option<RecordId>, fields: Vec<FormField>) -> Self {
        FormState {
            title: title.into(),
            record_id,
            fields,
            focus: 0,
            error: None,
        }
    }

    /// Editing and focus keys. Enter and Esc are not handled here; the
    /// controller decides what submit and cancel mean.
    pub fn handle_key(&mut self, key: KeyEvent) -> FormEvent {
        if self.fields.is_empty() {
            return FormEvent::Ignored;
        }
        match key.code {
            KeyCode::Tab | KeyCode::Down => {
                self.focus = (self.focus + 1) % self.fields.len();
                FormEvent::Moved
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.focus = (self.focus + self.fields.len() - 1) % self.fields.len();
                FormEvent::Moved
            }
            KeyCode::Left | KeyCode::Right
                if self.fields[self.focus].kind == FieldKind::Select =>
            {
                let field = &mut self.fields[self.focus];
                if field.options.is_empty() {
                    return FormEvent::Ignored;
                }
                field.selected = match key.code {
                    KeyCode::Right => (field.selected + 1) % field.options.len(),
                    _ => (field.selected + field.options.len() - 1) % field.options.len(),
                };
                FormEvent::Edited(self.focus)
            }
            _ => {
                let index = self.focus;
                let field = &mut self.fields[index];
                if field.kind == FieldKind::Select {
                    return FormEvent::Ignored;
                }
                field.input.handle_event(&Event::Key(key));
                FormEvent::Edited(index)
            }
        }
    }

    pub fn focused(&self) -> Option<&FormField> {
        self.fields.get(self.focus)
    }

    pub fn field(&self, name: &str) -> Option<&FormField> {
        self.fields.iter().find(|field| field.name == name)
    }

    pub fn value(&self, name: &str) -> String {
        self.field(name).map(FormField::value).unwrap_or_default()
    }

    /// Overwrites a text-like field, as the orders form does when the
    /// selected game fills in the amount.
    pub fn set_value(&mut self, name: &str, value: &str) {
        if let Some(field) = self.fields.iter_mut().find(|field| field.name == name) {
            if field.kind != FieldKind::Select {
                field.input = Input::new(value.to_string()).with_cursor(value.len());
            }
        }
    }

    pub fn clear_errors(&mut self) {
        self.error = None;
        for field in &mut self.fields {
            field.error = None;
        }
    }

    pub fn apply_errors(&mut self, errors: &[FieldError], translate: impl Fn(&'static str) -> &'static str) {
        self.clear_errors();
        for (name, key) in errors {
            if let Some(field) = self.fields.iter_mut().find(|field| field.name == *name) {
                field.error = Some(translate(key).to_string());
            }
        }
    }

    // Submit-time parsing helpers. Each records an error and returns a
    // placeholder; callers only use the value when no errors were
    // collected.

    pub fn require_text(&self, name: &'static str, errors: &mut FieldErrors) -> String {
        let value = self.value(name);
        if value.trim().is_empty() {
            errors.push(name, "form.required");
        }
        value
    }

    pub fn require_f64(&self, name: &'static str, errors: &mut FieldErrors) -> f64 {
        let value = self.value(name);
        if value.trim().is_empty() {
            errors.push(name, "form.required");
            return 0.0;
        }
        match value.trim().parse() {
            Ok(parsed) => parsed,
            Err(_) => {
                errors.push(name, "form.number");
                0.0
            }
        }
    }

    pub fn require_u32(&self, name: &'static str, errors: &mut FieldErrors) -> u32 {
        let value = self.value(name);
        if value.trim().is_empty() {
            errors.push(name, "form.required");
            return 0;
        }
        match value.trim().parse() {
            Ok(parsed) => parsed,
            Err(_) => {
                errors.push(name, "form.number");
                0
            }
        }
    }

    pub fn require_i32(&self, name: &'static str, errors: &mut FieldErrors) -> i32 {
        let value = self.value(name);
        if value.trim().is_empty() {
            errors.push(name, "form.required");
            return 0;
        }
        match value.trim().parse() {
            Ok(parsed) => parsed,
            Err(_) => {
                errors.push(name, "form.number");
                0
            }
        }
    }

    pub fn require_date(
        &self,
        name: &'static str,
        errors: &mut FieldErrors,
    ) -> chrono::NaiveDate {
        let value = self.value(name);
        if value.trim().is_empty() {
            errors.push(name, "form.required");
            return chrono::NaiveDate::default();
        }
        match chrono::NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d") {
            Ok(parsed) => parsed,
            Err(_) => {
                errors.push(name, "form.date");
                chrono::NaiveDate::default()
            }
        }
    }

    pub fn require_select(&self, name: &'static str, errors: &mut FieldErrors) -> String {
        let value = self.value(name);
        if value.is_empty() {
            errors.push(name, "form.required");
        }
        value
    }
}

pub type FieldError = (&'static str, &'static str);

/// Field name to message-key pairs collected during submit parsing.
#[derive(Debug, Default)]
pub struct FieldErrors {
    items: Vec<FieldError>,
}

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, name: &'static str, key: &'static str) {
        self.items.push((name, key));
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn into_items(self) -> Vec<FieldError> {
        self.items
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn sample_form() -> FormState {
        FormState::new(
            "Add Game",
            None,
            vec![
                FormField::text("name", "Name", ""),
                FormField::number("price", "Price", "29.99"),
                FormField::select(
                    "genre",
                    "Genre",
                    vec![
                        SelectOption::new("RPG", "RPG"),
                        SelectOption::new("Action", "Action"),
                    ],
                    "Action",
                ),
            ],
        )
    }

    #[test]
    fn test_focus_wraps_both_directions() {
        let mut form = sample_form();
        assert_eq!(form.focus, 0);
        form.handle_key(key(KeyCode::Tab));
        form.handle_key(key(KeyCode::Tab));
        form.handle_key(key(KeyCode::Tab));
        assert_eq!(form.focus, 0);
        form.handle_key(key(KeyCode::BackTab));
        assert_eq!(form.focus, 2);
    }

    #[test]
    fn test_typing_edits_the_focused_text_field() {
        let mut form = sample_form();
        form.handle_key(key(KeyCode::Char('H')));
        form.handle_key(key(KeyCode::Char('i')));
        assert_eq!(form.value("name"), "Hi");
    }

    #[test]
    fn test_select_cycles_with_arrows_and_wraps() {
        let mut form = sample_form();
        form.focus = 2;
        assert_eq!(form.value("genre"), "Action");
        form.handle_key(key(KeyCode::Right));
        assert_eq!(form.value("genre"), "RPG");
        form.handle_key(key(KeyCode::Left));
        assert_eq!(form.value("genre"), "Action");
    }

    #[test]
    fn test_select_ignores_typed_characters() {
        let mut form = sample_form();
        form.focus = 2;
        assert_eq!(form.handle_key(key(KeyCode::Char('x'))), FormEvent::Ignored);
        assert_eq!(form.value("genre"), "Action");
    }

    #[test]
    fn test_select_starts_on_matching_value() {
        let field = FormField::select(
            "status",
            "Status",
            vec![
                SelectOption::new("Pending", "Pending"),
                SelectOption::new("Completed", "Completed"),
            ],
            "Completed",
        );
        assert_eq!(field.selected, 1);
    }

    #[test]
    fn test_require_helpers_collect_errors() {
        let form = sample_form();
        let mut errors = FieldErrors::new();
        let name = form.require_text("name", &mut errors);
        let price = form.require_f64("price", &mut errors);
        assert_eq!(name, "");
        assert!((price - 29.99).abs() < f64::EPSILON);
        let items = errors.into_items();
        assert_eq!(items, vec![("name", "form.required")]);
    }

    #[test]
    fn test_require_date_flags_bad_format() {
        let mut form = sample_form();
        form.fields.push(FormField::date("date", "Date", "19/05/2015"));
        let mut errors = FieldErrors::new();
        form.require_date("date", &mut errors);
        assert_eq!(errors.into_items(), vec![("date", "form.date")]);
    }

    #[test]
    fn test_apply_errors_marks_fields() {
        let mut form = sample_form();
        form.apply_errors(&[("name", "form.required")], |key| key);
        assert_eq!(form.fields[0].error.as_deref(), Some("form.required"));
        assert!(form.fields[1].error.is_none());
    }

    #[test]
    fn test_set_value_overwrites_text_input() {
        let mut form = sample_form();
        form.set_value("price", "59.99");
        assert_eq!(form.value("price"), "59.99");
    }
}
