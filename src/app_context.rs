//! Shared application wiring: one storage backend, one repository per
//! collection, and the translation service, bundled so view factories
//! can capture a single handle.

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

use crate::config::Config;
use crate::i18n::{I18n, Lang};
use crate::models::{Game, Genre, Order, Platform, Player};
use crate::repository::Repository;
use crate::storage::StorageBackend;

pub type SharedI18n = Rc<RefCell<I18n>>;

pub struct AppContext {
    pub backend: Arc<dyn StorageBackend>,
    pub games: Repository<Game>,
    pub players: Repository<Player>,
    pub platforms: Repository<Platform>,
    pub genres: Repository<Genre>,
    pub orders: Repository<Order>,
    pub i18n: SharedI18n,
    pub page_size: usize,
    pub default_route: String,
}

impl AppContext {
    pub fn new(backend: Arc<dyn StorageBackend>, config: &Config) -> Rc<Self> {
        let default_lang =
            Lang::parse(&config.behavior.default_language).unwrap_or_default();
        let i18n = I18n::load(Arc::clone(&backend), default_lang);
        Rc::new(AppContext {
            games: Repository::new(Arc::clone(&backend)),
            players: Repository::new(Arc::clone(&backend)),
            platforms: Repository::new(Arc::clone(&backend)),
            genres: Repository::new(Arc::clone(&backend)),
            orders: Repository::new(Arc::clone(&backend)),
            backend,
            i18n: Rc::new(RefCell::new(i18n)),
            page_size: config.display.page_size,
            default_route: config.behavior.default_route.clone(),
        })
    }
}
