//! Players screen. Loads the genre list alongside the players to feed
//! the favorite-genre select.

use std::rc::Rc;

use crate::app_context::AppContext;
use crate::i18n::I18n;
use crate::models::{Genre, Player};
use crate::repository::{Load, Repository};
use crate::table::{CellValue, ColumnSpec};

use super::entity::{ContextState, EntityScreen};
use super::form::{FieldError, FieldErrors, FormField, FormState, SelectOption};
use super::select_placeholder;

pub struct PlayersScreen {
    genres_repo: Repository<Genre>,
    genres_load: Option<Load<Vec<Genre>>>,
    genres: Option<Vec<Genre>>,
    failure: Option<String>,
}

impl PlayersScreen {
    pub fn new(ctx: &Rc<AppContext>) -> Self {
        PlayersScreen {
            genres_repo: ctx.genres.clone(),
            genres_load: None,
            genres: None,
            failure: None,
        }
    }

    fn genre_options(&self, i18n: &I18n) -> Vec<SelectOption> {
        let mut options = vec![select_placeholder(i18n)];
        options.extend(
            self.genres
                .as_deref()
                .unwrap_or_default()
                .iter()
                .map(|genre| SelectOption::new(genre.name.clone(), genre.name.clone())),
        );
        options
    }
}

impl EntityScreen for PlayersScreen {
    type Record = Player;

    fn title_key(&self) -> &'static str {
        "players.title"
    }

    fn add_key(&self) -> &'static str {
        "players.add"
    }

    fn export_name(&self) -> &'static str {
        "players"
    }

    fn columns(&self, i18n: &I18n) -> Vec<ColumnSpec<Player>> {
        vec![
            ColumnSpec::new("name", i18n.t("players.name"), |player| {
                CellValue::text(&player.name)
            }),
            ColumnSpec::new("email", i18n.t("players.email"), |player| {
                CellValue::text(&player.email)
            }),
            ColumnSpec::new("age", i18n.t("players.age"), |player| {
                CellValue::Integer(player.age as i64)
            }),
            ColumnSpec::new("country", i18n.t("players.country"), |player| {
                CellValue::text(&player.country)
            }),
            ColumnSpec::new("favoriteGenre", i18n.t("players.favoriteGenre"), |player| {
                CellValue::text(&player.favorite_genre)
            }),
        ]
    }

    fn start_context(&mut self) {
        self.genres_load = Some(self.genres_repo.load_all());
    }

    fn poll_context(&mut self) -> ContextState {
        if let Some(load) = &self.genres_load {
            if let Some(result) = load.take() {
                self.genres_load = None;
                match result {
                    Ok(list) => self.genres = Some(list),
                    Err(err) => self.failure = Some(err.to_string()),
                }
            }
        }
        if let Some(message) = &self.failure {
            ContextState::Failed(message.clone())
        } else if self.genres.is_some() {
            ContextState::Ready
        } else {
            ContextState::Pending
        }
    }

    fn detail_title(&self, player: &Player) -> String {
        player.name.clone()
    }

    fn detail_lines(&self, player: &Player, i18n: &I18n) -> Vec<(String, String)> {
        vec![
            (i18n.t("players.email").to_string(), player.email.clone()),
            (i18n.t("players.age").to_string(), player.age.to_string()),
            (i18n.t("players.country").to_string(), player.country.clone()),
            (
                i18n.t("players.favoriteGenre").to_string(),
                player.favorite_genre.clone(),
            ),
        ]
    }

    fn form_fields(&self, player: Option<&Player>, i18n: &I18n) -> Vec<FormField> {
        vec![
            FormField::text(
                "name",
                i18n.t("players.name"),
                player.map(|p| p.name.as_str()).unwrap_or(""),
            ),
            FormField::text(
                "email",
                i18n.t("players.email"),
                player.map(|p| p.email.as_str()).unwrap_or(""),
            ),
            FormField::number(
                "age",
                i18n.t("players.age"),
                &player.map(|p| p.age.to_string()).unwrap_or_default(),
            ),
            FormField::text(
                "country",
                i18n.t("players.country"),
                player.map(|p| p.country.as_str()).unwrap_or(""),
            ),
            FormField::select(
                "favoriteGenre",
                i18n.t("players.favoriteGenre"),
                self.genre_options(i18n),
                player.map(|p| p.favorite_genre.as_str()).unwrap_or(""),
            ),
        ]
    }

    fn build_record(&self, form: &FormState) -> Result<Player, Vec<FieldError>> {
        let mut errors = FieldErrors::new();
        let name = form.require_text("name", &mut errors);
        let email = form.require_text("email", &mut errors);
        let age = form.require_u32("age", &mut errors);
        let country = form.require_text("country", &mut errors);
        let favorite_genre = form.require_select("favoriteGenre", &mut errors);
        if !errors.is_empty() {
            return Err(errors.into_items());
        }
        Ok(Player {
            id: 0,
            name,
            email,
            age,
            country,
            favorite_genre,
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

    fn screen_with_options() -> PlayersScreen {
        let ctx = crate::app_context::AppContext::new(
            Arc::new(MemoryStore::new()),
            &crate::config::Config::default(),
        );
        let mut screen = PlayersScreen::new(&ctx);
        screen.genres = Some(Genre::seed());
        screen
    }

    #[test]
    fn test_age_sorts_numerically() {
        let screen = screen_with_options();
        let columns = screen.columns(&i18n());
        let age = columns.iter().find(|c| c.key == "age").unwrap();
        let player = Player::seed().remove(0);
        assert!(matches!(age.value(&player), CellValue::Integer(_)));
    }

    fn choose(form: &mut FormState, name: &str, index: usize) {
        let position = form.fields.iter().position(|f| f.name == name).unwrap();
        form.fields[position].selected = index;
    }

    #[test]
    fn test_build_record_rejects_fractional_age() {
        let screen = screen_with_options();
        let i18n = i18n();
        let mut form = FormState::new("Add Player", None, screen.form_fields(None, &i18n));
        form.set_value("name", "Sam");
        form.set_value("email", "sam@example.com");
        form.set_value("age", "27.5");
        form.set_value("country", "Canada");
        choose(&mut form, "favoriteGenre", 1);
        let errors = screen.build_record(&form).unwrap_err();
        assert_eq!(errors, vec![("age", "form.number")]);
    }

    #[test]
    fn test_build_record_accepts_a_complete_form() {
        let screen = screen_with_options();
        let i18n = i18n();
        let mut form = FormState::new("Add Player", None, screen.form_fields(None, &i18n));
        form.set_value("name", "Sam");
        form.set_value("email", "sam@example.com");
        form.set_value("age", "27");
        form.set_value("country", "Canada");
        choose(&mut form, "favoriteGenre", 1);
        let player = screen.build_record(&form).unwrap();
        assert_eq!(player.age, 27);
        assert_eq!(player.favorite_genre, Genre::seed()[0].name);
    }
}
