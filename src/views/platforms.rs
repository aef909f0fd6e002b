//! Platforms screen. No option lists to load, so the default context
//! hooks apply.

use crate::i18n::I18n;
use crate::models::Platform;
use crate::table::{CellValue, ColumnSpec};

use super::entity::EntityScreen;
use super::form::{FieldError, FieldErrors, FormField, FormState};

pub struct PlatformsScreen;

impl PlatformsScreen {
    pub fn new() -> Self {
        PlatformsScreen
    }
}

impl Default for PlatformsScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl EntityScreen for PlatformsScreen {
    type Record = Platform;

    fn title_key(&self) -> &'static str {
        "platforms.title"
    }

    fn add_key(&self) -> &'static str {
        "platforms.add"
    }

    fn export_name(&self) -> &'static str {
        "platforms"
    }

    fn columns(&self, i18n: &I18n) -> Vec<ColumnSpec<Platform>> {
        vec![
            ColumnSpec::new("name", i18n.t("platforms.name"), |platform| {
                CellValue::text(&platform.name)
            }),
            ColumnSpec::new("company", i18n.t("platforms.company"), |platform| {
                CellValue::text(&platform.company)
            }),
            ColumnSpec::new("releaseYear", i18n.t("platforms.releaseYear"), |platform| {
                CellValue::Integer(platform.release_year as i64)
            }),
        ]
    }

    fn detail_title(&self, platform: &Platform) -> String {
        platform.name.clone()
    }

    fn detail_lines(&self, platform: &Platform, i18n: &I18n) -> Vec<(String, String)> {
        vec![
            (
                i18n.t("platforms.company").to_string(),
                platform.company.clone(),
            ),
            (
                i18n.t("platforms.releaseYear").to_string(),
                platform.release_year.to_string(),
            ),
        ]
    }

    fn form_fields(&self, platform: Option<&Platform>, i18n: &I18n) -> Vec<FormField> {
        vec![
            FormField::text(
                "name",
                i18n.t("platforms.name"),
                platform.map(|p| p.name.as_str()).unwrap_or(""),
            ),
            FormField::text(
                "company",
                i18n.t("platforms.company"),
                platform.map(|p| p.company.as_str()).unwrap_or(""),
            ),
            FormField::number(
                "releaseYear",
                i18n.t("platforms.releaseYear"),
                &platform
                    .map(|p| p.release_year.to_string())
                    .unwrap_or_default(),
            ),
        ]
    }

    fn build_record(&self, form: &FormState) -> Result<Platform, Vec<FieldError>> {
        let mut errors = FieldErrors::new();
        let name = form.require_text("name", &mut errors);
        let company = form.require_text("company", &mut errors);
        let release_year = form.require_i32("releaseYear", &mut errors);
        if !errors.is_empty() {
            return Err(errors.into_items());
        }
        Ok(Platform {
            id: 0,
            name,
            company,
            release_year,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::Lang;
    use crate::models::Entity;
    use crate::storage::{MemoryStore, StorageBackend};
    use std::sync::Arc;

    fn i18n() -> I18n {
        I18n::load(Arc::new(MemoryStore::new()) as Arc<dyn StorageBackend>, Lang::En)
    }

    #[test]
    fn test_build_record_round_trips_the_form() {
        let screen = PlatformsScreen::new();
        let i18n = i18n();
        let source = Platform::seed().remove(0);
        let form = FormState::new(
            "Edit",
            Some(source.id),
            screen.form_fields(Some(&source), &i18n),
        );
        let rebuilt = screen.build_record(&form).unwrap();
        assert_eq!(rebuilt.name, source.name);
        assert_eq!(rebuilt.release_year, source.release_year);
    }

    #[test]
    fn test_empty_form_reports_every_field() {
        let screen = PlatformsScreen::new();
        let i18n = i18n();
        let form = FormState::new("Add Platform", None, screen.form_fields(None, &i18n));
        let errors = screen.build_record(&form).unwrap_err();
        assert_eq!(
            errors,
            vec![
                ("name", "form.required"),
                ("company", "form.required"),
                ("releaseYear", "form.required"),
            ]
        );
    }
}
