//! Dashboard: store-wide counters and charts.
//!
//! All four collections load concurrently; the figures are computed
//! once, when the last load lands, and recomputed only on reload.

use std::collections::BTreeMap;
use std::rc::Rc;

use chrono::NaiveDate;
use tracing::{debug, warn};

use crate::app_context::{AppContext, SharedI18n};
use crate::models::{Game, Order, OrderStatus, Platform, Player};
use crate::repository::{Load, Repository};

use super::{ModalState, View, ViewBody, ViewCommand, ViewEffect};

/// Figures for the dashboard body, ready to draw.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardData {
    pub total_games: usize,
    pub total_players: usize,
    pub total_platforms: usize,
    pub total_orders: usize,
    /// Sum over completed orders only.
    pub total_revenue: f64,
    /// Genre to game count, in first-appearance order.
    pub games_per_genre: Vec<(String, u64)>,
    /// Game name to completed-order count, highest first, at most five.
    pub top_games: Vec<(String, u64)>,
    /// Order count per day, ascending by date.
    pub orders_by_date: Vec<(NaiveDate, u64)>,
}

impl DashboardData {
    pub fn compute(
        games: &[Game],
        players: &[Player],
        platforms: &[Platform],
        orders: &[Order],
    ) -> Self {
        let total_revenue = orders
            .iter()
            .filter(|order| order.status == OrderStatus::Completed)
            .map(|order| order.amount)
            .sum();

        let mut games_per_genre: Vec<(String, u64)> = Vec::new();
        for game in games {
            match games_per_genre.iter_mut().find(|(genre, _)| *genre == game.genre) {
                Some((_, count)) => *count += 1,
                None => games_per_genre.push((game.genre.clone(), 1)),
            }
        }

        let mut top_games: Vec<(String, u64)> = Vec::new();
        for order in orders {
            if order.status != OrderStatus::Completed {
                continue;
            }
            match top_games.iter_mut().find(|(name, _)| *name == order.game_name) {
                Some((_, count)) => *count += 1,
                None => top_games.push((order.game_name.clone(), 1)),
            }
        }
        top_games.sort_by(|a, b| b.1.cmp(&a.1));
        top_games.truncate(5);

        let mut by_date: BTreeMap<NaiveDate, u64> = BTreeMap::new();
        for order in orders {
            *by_date.entry(order.date).or_insert(0) += 1;
        }

        DashboardData {
            total_games: games.len(),
            total_players: players.len(),
            total_platforms: platforms.len(),
            total_orders: orders.len(),
            total_revenue,
            games_per_genre,
            top_games,
            orders_by_date: by_date.into_iter().collect(),
        }
    }
}

pub struct DashboardView {
    i18n: SharedI18n,
    games_repo: Repository<Game>,
    players_repo: Repository<Player>,
    platforms_repo: Repository<Platform>,
    orders_repo: Repository<Order>,
    games_load: Option<Load<Vec<Game>>>,
    players_load: Option<Load<Vec<Player>>>,
    platforms_load: Option<Load<Vec<Platform>>>,
    orders_load: Option<Load<Vec<Order>>>,
    games: Option<Vec<Game>>,
    players: Option<Vec<Player>>,
    platforms: Option<Vec<Platform>>,
    orders: Option<Vec<Order>>,
    data: Option<DashboardData>,
    load_error: Option<String>,
    alive: bool,
}

impl DashboardView {
    pub fn new(ctx: &Rc<AppContext>) -> Self {
        DashboardView {
            i18n: Rc::clone(&ctx.i18n),
            games_repo: ctx.games.clone(),
            players_repo: ctx.players.clone(),
            platforms_repo: ctx.platforms.clone(),
            orders_repo: ctx.orders.clone(),
            games_load: None,
            players_load: None,
            platforms_load: None,
            orders_load: None,
            games: None,
            players: None,
            platforms: None,
            orders: None,
            data: None,
            load_error: None,
            alive: true,
        }
    }

    fn reload(&mut self) {
        self.games = None;
        self.players = None;
        self.platforms = None;
        self.orders = None;
        self.games_load = Some(self.games_repo.load_all());
        self.players_load = Some(self.players_repo.load_all());
        self.platforms_load = Some(self.platforms_repo.load_all());
        self.orders_load = Some(self.orders_repo.load_all());
    }
}

/// Drains one pending load into its staging slot. Returns true when a
/// result (either way) was applied.
fn drain<T>(
    load: &mut Option<Load<Vec<T>>>,
    slot: &mut Option<Vec<T>>,
    error: &mut Option<String>,
) -> bool {
    let Some(pending) = load else {
        return false;
    };
    let Some(result) = pending.take() else {
        return false;
    };
    *load = None;
    match result {
        Ok(list) => *slot = Some(list),
        Err(err) => {
            warn!(target: "views", "dashboard load failed: {err}");
            if error.is_none() {
                *error = Some(err.to_string());
            }
        }
    }
    true
}

impl View for DashboardView {
    fn title(&self) -> String {
        self.i18n.borrow().t("dashboard.title").to_string()
    }

    fn render(&mut self) {
        debug!(target: "views", "loading dashboard");
        self.reload();
    }

    fn poll(&mut self) -> bool {
        if !self.alive {
            return false;
        }
        let mut changed = false;
        changed |= drain(&mut self.games_load, &mut self.games, &mut self.load_error);
        changed |= drain(&mut self.players_load, &mut self.players, &mut self.load_error);
        changed |= drain(
            &mut self.platforms_load,
            &mut self.platforms,
            &mut self.load_error,
        );
        changed |= drain(&mut self.orders_load, &mut self.orders, &mut self.load_error);

        if self.data.is_none() && self.load_error.is_none() {
            if let (Some(games), Some(players), Some(platforms), Some(orders)) = (
                self.games.as_deref(),
                self.players.as_deref(),
                self.platforms.as_deref(),
                self.orders.as_deref(),
            ) {
                self.data = Some(DashboardData::compute(games, players, platforms, orders));
                changed = true;
            }
        }
        changed
    }

    fn handle(&mut self, command: ViewCommand) -> ViewEffect {
        if let ViewCommand::Reload = command {
            self.data = None;
            self.load_error = None;
            self.reload();
        }
        ViewEffect::None
    }

    fn body(&self) -> ViewBody<'_> {
        if let Some(error) = &self.load_error {
            ViewBody::Error(error)
        } else if let Some(data) = &self.data {
            ViewBody::Dashboard(data)
        } else {
            ViewBody::Loading
        }
    }

    fn modal(&self) -> Option<&ModalState> {
        None
    }

    fn destroy(&mut self) {
        self.alive = false;
        self.games_load = None;
        self.players_load = None;
        self.platforms_load = None;
        self.orders_load = None;
        self.games = None;
        self.players = None;
        self.platforms = None;
        self.orders = None;
        self.data = None;
    }
}
