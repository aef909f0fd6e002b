//! Screen controllers.
//!
//! Each route owns one controller implementing [`View`]. Controllers
//! hold no drawing code: the host reads [`View::body`] and the open
//! modal each frame and sends [`ViewCommand`]s back. The five entity
//! screens share one generic controller ([`EntityView`]) parameterized
//! by a small per-entity descriptor; the dashboard is its own thing.

pub mod dashboard;
pub mod entity;
pub mod form;
pub mod games;
pub mod genres;
pub mod orders;
pub mod platforms;
pub mod players;

use std::rc::Rc;

use crossterm::event::KeyEvent;

use crate::app_context::AppContext;
use crate::i18n::I18n;
use crate::models::RecordId;
use crate::router::Router;
use crate::table::TableSnapshot;

pub use dashboard::{DashboardData, DashboardView};
pub use entity::{ContextState, EntityScreen, EntityView};
pub use form::{FieldErrors, FieldKind, FormField, FormState, SelectOption};
pub use games::GamesScreen;
pub use genres::GenresScreen;
pub use orders::OrdersScreen;
pub use platforms::PlatformsScreen;
pub use players::PlayersScreen;

/// Empty-valued first option for form selects; submitting it trips the
/// required check.
fn select_placeholder(i18n: &I18n) -> SelectOption {
    SelectOption::new("", format!("{}...", i18n.t("common.select")))
}

/// Row-level actions on the selected record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowAction {
    View,
    Edit,
    Delete,
}

/// Commands the host sends to the active controller.
#[derive(Debug, Clone)]
pub enum ViewCommand {
    /// Replace the search term with the full current input.
    Filter(String),
    /// Sort by the n-th displayed column.
    SortColumn(usize),
    NextPage,
    PrevPage,
    SelectUp,
    SelectDown,
    Activate(RowAction),
    Add,
    Reload,
    ExportCsv,
    ExportJson,
    /// Raw key for the open modal (form editing, confirm choice).
    ModalKey(KeyEvent),
}

/// What a command did, for the host message bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewEffect {
    None,
    Status(String),
    Error(String),
}

/// Overlay owned by the controller, drawn above the body.
pub enum ModalState {
    Detail {
        title: String,
        lines: Vec<(String, String)>,
    },
    Confirm {
        message: String,
        id: RecordId,
    },
    Form(FormState),
}

/// What the content pane should draw this frame.
pub enum ViewBody<'a> {
    Loading,
    Error(&'a str),
    Table {
        snapshot: TableSnapshot,
        selected: usize,
    },
    Dashboard(&'a DashboardData),
}

pub trait View {
    fn title(&self) -> String;
    /// Kicks off the controller's data loads.
    fn render(&mut self);
    /// Applies any loads that resolved since the last call. Returns
    /// true when state changed. A destroyed controller applies nothing.
    fn poll(&mut self) -> bool;
    fn handle(&mut self, command: ViewCommand) -> ViewEffect;
    fn body(&self) -> ViewBody<'_>;
    fn modal(&self) -> Option<&ModalState>;
    /// Idempotent teardown; late load results are discarded afterwards.
    fn destroy(&mut self);
}

/// The route table: six screens, dashboard first.
pub fn build_router(ctx: &Rc<AppContext>) -> Router {
    let mut router = Router::new(ctx.default_route.clone());
    {
        let ctx = Rc::clone(ctx);
        router.register(
            "/dashboard",
            "nav.dashboard",
            Box::new(move |_params| Box::new(DashboardView::new(&ctx))),
        );
    }
    {
        let ctx = Rc::clone(ctx);
        router.register(
            "/games",
            "nav.games",
            Box::new(move |params| {
                Box::new(EntityView::new(
                    GamesScreen::new(&ctx),
                    ctx.games.clone(),
                    Rc::clone(&ctx.i18n),
                    ctx.page_size,
                    params,
                ))
            }),
        );
    }
    {
        let ctx = Rc::clone(ctx);
        router.register(
            "/players",
            "nav.players",
            Box::new(move |params| {
                Box::new(EntityView::new(
                    PlayersScreen::new(&ctx),
                    ctx.players.clone(),
                    Rc::clone(&ctx.i18n),
                    ctx.page_size,
                    params,
                ))
            }),
        );
    }
    {
        let ctx = Rc::clone(ctx);
        router.register(
            "/platforms",
            "nav.platforms",
            Box::new(move |params| {
                Box::new(EntityView::new(
                    PlatformsScreen::new(),
                    ctx.platforms.clone(),
                    Rc::clone(&ctx.i18n),
                    ctx.page_size,
                    params,
                ))
            }),
        );
    }
    {
        let ctx = Rc::clone(ctx);
        router.register(
            "/genres",
            "nav.genres",
            Box::new(move |params| {
                Box::new(EntityView::new(
                    GenresScreen::new(),
                    ctx.genres.clone(),
                    Rc::clone(&ctx.i18n),
                    ctx.page_size,
                    params,
                ))
            }),
        );
    }
    {
        let ctx = Rc::clone(ctx);
        router.register(
            "/orders",
            "nav.orders",
            Box::new(move |params| {
                Box::new(EntityView::new(
                    OrdersScreen::new(&ctx),
                    ctx.orders.clone(),
                    Rc::clone(&ctx.i18n),
                    ctx.page_size,
                    params,
                ))
            }),
        );
    }
    router
}
