//! Orders screen.
//!
//! The form's player and game selects carry record ids as values; on
//! save the chosen names are copied onto the order, so order rows keep
//! reading the same after the player or game is renamed. Picking a game
//! also fills the amount field with that game's price.

use std::rc::Rc;

use chrono::Local;

use crate::app_context::AppContext;
use crate::i18n::I18n;
use crate::models::{Game, Order, OrderStatus, Player};
use crate::repository::{Load, Repository};
use crate::table::{CellValue, ColumnSpec, RenderKind};

use super::entity::{ContextState, EntityScreen};
use super::form::{FieldError, FieldErrors, FormField, FormState, SelectOption};
use super::select_placeholder;

pub struct OrdersScreen {
    players_repo: Repository<Player>,
    games_repo: Repository<Game>,
    players_load: Option<Load<Vec<Player>>>,
    games_load: Option<Load<Vec<Game>>>,
    players: Option<Vec<Player>>,
    games: Option<Vec<Game>>,
    failure: Option<String>,
}

impl OrdersScreen {
    pub fn new(ctx: &Rc<AppContext>) -> Self {
        OrdersScreen {
            players_repo: ctx.players.clone(),
            games_repo: ctx.games.clone(),
            players_load: None,
            games_load: None,
            players: None,
            games: None,
            failure: None,
        }
    }

    fn find_player(&self, value: &str) -> Option<&Player> {
        self.players
            .as_deref()
            .unwrap_or_default()
            .iter()
            .find(|player| player.id.to_string() == value)
    }

    fn find_game(&self, value: &str) -> Option<&Game> {
        self.games
            .as_deref()
            .unwrap_or_default()
            .iter()
            .find(|game| game.id.to_string() == value)
    }

    fn player_options(&self, i18n: &I18n) -> Vec<SelectOption> {
        let mut options = vec![select_placeholder(i18n)];
        options.extend(
            self.players
                .as_deref()
                .unwrap_or_default()
                .iter()
                .map(|player| SelectOption::new(player.id.to_string(), player.name.clone())),
        );
        options
    }

    fn game_options(&self, i18n: &I18n) -> Vec<SelectOption> {
        let mut options = vec![select_placeholder(i18n)];
        options.extend(self.games.as_deref().unwrap_or_default().iter().map(|game| {
            SelectOption::new(
                game.id.to_string(),
                format!("{} - ${}", game.name, game.price),
            )
        }));
        options
    }
}

impl EntityScreen for OrdersScreen {
    type Record = Order;

    fn title_key(&self) -> &'static str {
        "orders.title"
    }

    fn add_key(&self) -> &'static str {
        "orders.add"
    }

    fn export_name(&self) -> &'static str {
        "orders"
    }

    fn columns(&self, i18n: &I18n) -> Vec<ColumnSpec<Order>> {
        vec![
            ColumnSpec::new("playerName", i18n.t("orders.player"), |order| {
                CellValue::text(&order.player_name)
            }),
            ColumnSpec::new("gameName", i18n.t("orders.game"), |order| {
                CellValue::text(&order.game_name)
            }),
            ColumnSpec::new("date", i18n.t("orders.date"), |order: &Order| {
                CellValue::Date(order.date)
            })
            .with_kind(RenderKind::Date),
            ColumnSpec::new("amount", i18n.t("orders.amount"), |order: &Order| {
                CellValue::Float(order.amount)
            })
            .with_kind(RenderKind::Currency),
            ColumnSpec::new("status", i18n.t("orders.status"), |order: &Order| {
                CellValue::Text(order.status.to_string())
            })
            .with_kind(RenderKind::Badge),
        ]
    }

    fn start_context(&mut self) {
        self.players_load = Some(self.players_repo.load_all());
        self.games_load = Some(self.games_repo.load_all());
    }

    fn poll_context(&mut self) -> ContextState {
        if let Some(load) = &self.players_load {
            if let Some(result) = load.take() {
                self.players_load = None;
                match result {
                    Ok(list) => self.players = Some(list),
                    Err(err) => self.failure = Some(err.to_string()),
                }
            }
        }
        if let Some(load) = &self.games_load {
            if let Some(result) = load.take() {
                self.games_load = None;
                match result {
                    Ok(list) => self.games = Some(list),
                    Err(err) => self.failure = Some(err.to_string()),
                }
            }
        }
        if let Some(message) = &self.failure {
            ContextState::Failed(message.clone())
        } else if self.players.is_some() && self.games.is_some() {
            ContextState::Ready
        } else {
            ContextState::Pending
        }
    }

    fn detail_title(&self, order: &Order) -> String {
        format!("Order #{}", order.id)
    }

    fn detail_lines(&self, order: &Order, i18n: &I18n) -> Vec<(String, String)> {
        vec![
            (i18n.t("orders.player").to_string(), order.player_name.clone()),
            (i18n.t("orders.game").to_string(), order.game_name.clone()),
            (
                i18n.t("orders.date").to_string(),
                order.date.format("%Y-%m-%d").to_string(),
            ),
            (
                i18n.t("orders.amount").to_string(),
                format!("${:.2}", order.amount),
            ),
            (i18n.t("orders.status").to_string(), order.status.to_string()),
        ]
    }

    fn form_fields(&self, order: Option<&Order>, i18n: &I18n) -> Vec<FormField> {
        let status_options: Vec<SelectOption> = OrderStatus::ALL
            .iter()
            .map(|status| SelectOption::new(status.to_string(), status.to_string()))
            .collect();
        let date = order
            .map(|o| o.date)
            .unwrap_or_else(|| Local::now().date_naive());
        vec![
            FormField::select(
                "playerId",
                i18n.t("orders.player"),
                self.player_options(i18n),
                &order.map(|o| o.player_id.to_string()).unwrap_or_default(),
            ),
            FormField::select(
                "gameId",
                i18n.t("orders.game"),
                self.game_options(i18n),
                &order.map(|o| o.game_id.to_string()).unwrap_or_default(),
            ),
            FormField::date(
                "date",
                i18n.t("orders.date"),
                &date.format("%Y-%m-%d").to_string(),
            ),
            FormField::number(
                "amount",
                i18n.t("orders.amount"),
                &order.map(|o| o.amount.to_string()).unwrap_or_default(),
            ),
            FormField::select(
                "status",
                i18n.t("orders.status"),
                status_options,
                &order
                    .map(|o| o.status.to_string())
                    .unwrap_or_else(|| OrderStatus::Pending.to_string()),
            ),
        ]
    }

    fn build_record(&self, form: &FormState) -> Result<Order, Vec<FieldError>> {
        let mut errors = FieldErrors::new();
        let player_value = form.require_select("playerId", &mut errors);
        let game_value = form.require_select("gameId", &mut errors);
        let date = form.require_date("date", &mut errors);
        let amount = form.require_f64("amount", &mut errors);
        let status =
            OrderStatus::parse(&form.value("status")).unwrap_or(OrderStatus::Pending);

        // The option lists were loaded with the screen; a miss here
        // means the selection went stale, so report it like a blank.
        let player = self.find_player(&player_value);
        if !player_value.is_empty() && player.is_none() {
            errors.push("playerId", "form.required");
        }
        let game = self.find_game(&game_value);
        if !game_value.is_empty() && game.is_none() {
            errors.push("gameId", "form.required");
        }

        match (player, game) {
            (Some(player), Some(game)) if errors.is_empty() => Ok(Order {
                id: 0,
                player_id: player.id,
                player_name: player.name.clone(),
                game_id: game.id,
                game_name: game.name.clone(),
                date,
                amount,
                status,
            }),
            _ => Err(errors.into_items()),
        }
    }

    fn field_changed(&self, form: &mut FormState, name: &'static str) {
        if name == "gameId" {
            if let Some(game) = self.find_game(&form.value("gameId")) {
                form.set_value("amount", &game.price.to_string());
            }
        }
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

    fn screen_with_options() -> OrdersScreen {
        let ctx = crate::app_context::AppContext::new(
            Arc::new(MemoryStore::new()),
            &crate::config::Config::default(),
        );
        let mut screen = OrdersScreen::new(&ctx);
        screen.players = Some(Player::seed());
        screen.games = Some(Game::seed());
        screen
    }

    fn choose_value(form: &mut FormState, name: &str, value: &str) {
        let position = form.fields.iter().position(|f| f.name == name).unwrap();
        let field = &mut form.fields[position];
        field.selected = field
            .options
            .iter()
            .position(|option| option.value == value)
            .unwrap();
    }

    #[test]
    fn test_save_copies_player_and_game_names() {
        let screen = screen_with_options();
        let i18n = i18n();
        let mut form = FormState::new("Add Order", None, screen.form_fields(None, &i18n));
        choose_value(&mut form, "playerId", "2");
        choose_value(&mut form, "gameId", "3");
        form.set_value("amount", "39.99");
        let order = screen.build_record(&form).unwrap();
        assert_eq!(order.player_id, 2);
        assert_eq!(order.player_name, Player::seed()[1].name);
        assert_eq!(order.game_id, 3);
        assert_eq!(order.game_name, Game::seed()[2].name);
        assert_eq!(order.status, OrderStatus::Pending);
    }

    #[test]
    fn test_placeholder_selection_is_rejected() {
        let screen = screen_with_options();
        let i18n = i18n();
        let mut form = FormState::new("Add Order", None, screen.form_fields(None, &i18n));
        form.set_value("amount", "10");
        let errors = screen.build_record(&form).unwrap_err();
        assert!(errors.contains(&("playerId", "form.required")));
        assert!(errors.contains(&("gameId", "form.required")));
    }

    #[test]
    fn test_choosing_a_game_fills_the_amount() {
        let screen = screen_with_options();
        let i18n = i18n();
        let mut form = FormState::new("Add Order", None, screen.form_fields(None, &i18n));
        choose_value(&mut form, "gameId", "1");
        screen.field_changed(&mut form, "gameId");
        assert_eq!(form.value("amount"), Game::seed()[0].price.to_string());
    }

    #[test]
    fn test_add_form_defaults_to_today_and_pending() {
        let screen = screen_with_options();
        let i18n = i18n();
        let form = FormState::new("Add Order", None, screen.form_fields(None, &i18n));
        let today = Local::now().date_naive().format("%Y-%m-%d").to_string();
        assert_eq!(form.value("date"), today);
        assert_eq!(form.value("status"), "Pending");
    }

    #[test]
    fn test_status_renders_as_badge() {
        let screen = screen_with_options();
        let columns = screen.columns(&i18n());
        let status = columns.iter().find(|c| c.key == "status").unwrap();
        assert_eq!(status.kind, RenderKind::Badge);
    }
}
