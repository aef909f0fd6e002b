//! Genres screen, the smallest of the five.

use crate::i18n::I18n;
use crate::models::Genre;
use crate::table::{CellValue, ColumnSpec};

use super::entity::EntityScreen;
use super::form::{FieldError, FieldErrors, FormField, FormState};

pub struct GenresScreen;

impl GenresScreen {
    pub fn new() -> Self {
        GenresScreen
    }
}

impl Default for GenresScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl EntityScreen for GenresScreen {
    type Record = Genre;

    fn title_key(&self) -> &'static str {
        "genres.title"
    }

    fn add_key(&self) -> &'static str {
        "genres.add"
    }

    fn export_name(&self) -> &'static str {
        "genres"
    }

    fn columns(&self, i18n: &I18n) -> Vec<ColumnSpec<Genre>> {
        vec![
            ColumnSpec::new("name", i18n.t("genres.name"), |genre| {
                CellValue::text(&genre.name)
            }),
            ColumnSpec::new("description", i18n.t("genres.description"), |genre| {
                CellValue::text(&genre.description)
            }),
        ]
    }

    fn detail_title(&self, genre: &Genre) -> String {
        genre.name.clone()
    }

    fn detail_lines(&self, genre: &Genre, i18n: &I18n) -> Vec<(String, String)> {
        vec![(
            i18n.t("genres.description").to_string(),
            genre.description.clone(),
        )]
    }

    fn form_fields(&self, genre: Option<&Genre>, i18n: &I18n) -> Vec<FormField> {
        vec![
            FormField::text(
                "name",
                i18n.t("genres.name"),
                genre.map(|g| g.name.as_str()).unwrap_or(""),
            ),
            FormField::text(
                "description",
                i18n.t("genres.description"),
                genre.map(|g| g.description.as_str()).unwrap_or(""),
            )
            .optional(),
        ]
    }

    fn build_record(&self, form: &FormState) -> Result<Genre, Vec<FieldError>> {
        let mut errors = FieldErrors::new();
        let name = form.require_text("name", &mut errors);
        if !errors.is_empty() {
            return Err(errors.into_items());
        }
        Ok(Genre {
            id: 0,
            name,
            description: form.value("description"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::Lang;
    use crate::storage::{MemoryStore, StorageBackend};
    use std::sync::Arc;

    fn i18n() -> I18n {
        I18n::load(Arc::new(MemoryStore::new()) as Arc<dyn StorageBackend>, Lang::En)
    }

    #[test]
    fn test_description_is_optional() {
        let screen = GenresScreen::new();
        let i18n = i18n();
        let mut form = FormState::new("Add Genre", None, screen.form_fields(None, &i18n));
        form.set_value("name", "Roguelike");
        let genre = screen.build_record(&form).unwrap();
        assert_eq!(genre.name, "Roguelike");
        assert_eq!(genre.description, "");
    }

    #[test]
    fn test_name_is_required() {
        let screen = GenresScreen::new();
        let i18n = i18n();
        let form = FormState::new("Add Genre", None, screen.form_fields(None, &i18n));
        let errors = screen.build_record(&form).unwrap_err();
        assert_eq!(errors, vec![("name", "form.required")]);
    }
}
