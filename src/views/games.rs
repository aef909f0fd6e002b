//! Games screen: the catalog table plus its add/edit form.
//!
//! The form's genre and platform selects are fed from those two
//! collections, loaded alongside the games themselves.

use std::rc::Rc;

use crate::app_context::AppContext;
use crate::i18n::I18n;
use crate::models::{Game, Genre, Platform};
use crate::repository::{Load, Repository};
use crate::table::{CellValue, ColumnSpec, RenderKind};

use super::entity::{ContextState, EntityScreen};
use super::form::{FieldError, FieldErrors, FormField, FormState, SelectOption};
use super::select_placeholder;

pub struct GamesScreen {
    genres_repo: Repository<Genre>,
    platforms_repo: Repository<Platform>,
    genres_load: Option<Load<Vec<Genre>>>,
    platforms_load: Option<Load<Vec<Platform>>>,
    genres: Option<Vec<Genre>>,
    platforms: Option<Vec<Platform>>,
    failure: Option<String>,
}

impl GamesScreen {
    pub fn new(ctx: &Rc<AppContext>) -> Self {
        GamesScreen {
            genres_repo: ctx.genres.clone(),
            platforms_repo: ctx.platforms.clone(),
            genres_load: None,
            platforms_load: None,
            genres: None,
            platforms: None,
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

    fn platform_options(&self, i18n: &I18n) -> Vec<SelectOption> {
        let mut options = vec![select_placeholder(i18n)];
        options.extend(
            self.platforms
                .as_deref()
                .unwrap_or_default()
                .iter()
                .map(|platform| SelectOption::new(platform.name.clone(), platform.name.clone())),
        );
        options
    }
}

impl EntityScreen for GamesScreen {
    type Record = Game;

    fn title_key(&self) -> &'static str {
        "games.title"
    }

    fn add_key(&self) -> &'static str {
        "games.add"
    }

    fn export_name(&self) -> &'static str {
        "games"
    }

    fn columns(&self, i18n: &I18n) -> Vec<ColumnSpec<Game>> {
        vec![
            ColumnSpec::new("name", i18n.t("games.name"), |game| {
                CellValue::text(&game.name)
            }),
            ColumnSpec::new("genre", i18n.t("games.genre"), |game| {
                CellValue::text(&game.genre)
            }),
            ColumnSpec::new("platform", i18n.t("games.platform"), |game| {
                CellValue::text(&game.platform)
            }),
            ColumnSpec::new("price", i18n.t("games.price"), |game: &Game| {
                CellValue::Float(game.price)
            })
            .with_kind(RenderKind::Currency),
            ColumnSpec::new("releaseDate", i18n.t("games.releaseDate"), |game: &Game| {
                CellValue::Date(game.release_date)
            })
            .with_kind(RenderKind::Date),
            ColumnSpec::new("rating", i18n.t("games.rating"), |game| {
                CellValue::Float(game.rating)
            }),
        ]
    }

    fn start_context(&mut self) {
        self.genres_load = Some(self.genres_repo.load_all());
        self.platforms_load = Some(self.platforms_repo.load_all());
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
        if let Some(load) = &self.platforms_load {
            if let Some(result) = load.take() {
                self.platforms_load = None;
                match result {
                    Ok(list) => self.platforms = Some(list),
                    Err(err) => self.failure = Some(err.to_string()),
                }
            }
        }
        if let Some(message) = &self.failure {
            ContextState::Failed(message.clone())
        } else if self.genres.is_some() && self.platforms.is_some() {
            ContextState::Ready
        } else {
            ContextState::Pending
        }
    }

    fn detail_title(&self, game: &Game) -> String {
        game.name.clone()
    }

    fn detail_lines(&self, game: &Game, i18n: &I18n) -> Vec<(String, String)> {
        vec![
            (i18n.t("games.genre").to_string(), game.genre.clone()),
            (i18n.t("games.platform").to_string(), game.platform.clone()),
            (
                i18n.t("games.price").to_string(),
                format!("${:.2}", game.price),
            ),
            (
                i18n.t("games.releaseDate").to_string(),
                game.release_date.format("%Y-%m-%d").to_string(),
            ),
            (
                i18n.t("games.rating").to_string(),
                format!("{}/10", game.rating),
            ),
            (
                i18n.t("games.description").to_string(),
                game.description.clone(),
            ),
        ]
    }

    fn form_fields(&self, game: Option<&Game>, i18n: &I18n) -> Vec<FormField> {
        vec![
            FormField::text(
                "name",
                i18n.t("games.name"),
                game.map(|g| g.name.as_str()).unwrap_or(""),
            ),
            FormField::select(
                "genre",
                i18n.t("games.genre"),
                self.genre_options(i18n),
                game.map(|g| g.genre.as_str()).unwrap_or(""),
            ),
            FormField::select(
                "platform",
                i18n.t("games.platform"),
                self.platform_options(i18n),
                game.map(|g| g.platform.as_str()).unwrap_or(""),
            ),
            FormField::number(
                "price",
                i18n.t("games.price"),
                &game.map(|g| g.price.to_string()).unwrap_or_default(),
            ),
            FormField::date(
                "releaseDate",
                i18n.t("games.releaseDate"),
                &game
                    .map(|g| g.release_date.format("%Y-%m-%d").to_string())
                    .unwrap_or_default(),
            ),
            FormField::number(
                "rating",
                i18n.t("games.rating"),
                &game.map(|g| g.rating.to_string()).unwrap_or_default(),
            ),
            FormField::text(
                "description",
                i18n.t("games.description"),
                game.map(|g| g.description.as_str()).unwrap_or(""),
            )
            .optional(),
        ]
    }

    fn build_record(&self, form: &FormState) -> Result<Game, Vec<FieldError>> {
        let mut errors = FieldErrors::new();
        let name = form.require_text("name", &mut errors);
        let genre = form.require_select("genre", &mut errors);
        let platform = form.require_select("platform", &mut errors);
        let price = form.require_f64("price", &mut errors);
        let release_date = form.require_date("releaseDate", &mut errors);
        let rating = form.require_f64("rating", &mut errors);
        if !errors.is_empty() {
            return Err(errors.into_items());
        }
        Ok(Game {
            id: 0,
            name,
            genre,
            platform,
            price,
            release_date,
            rating,
            description: form.value("description"),
        })
    }
}
