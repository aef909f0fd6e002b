#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::collections::HashMap;
    use std::rc::Rc;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;
    use std::thread;
    use std::time::Duration;

    use mymanager::app_context::AppContext;
    use mymanager::config::Config;
    use mymanager::models::{Entity, Game};
    use mymanager::router::Router;
    use mymanager::storage::{MemoryStore, StorageBackend, StoreError};
    use mymanager::views::{
        EntityView, GamesScreen, ModalState, View, ViewBody, ViewCommand, ViewEffect,
    };

    #[derive(Clone)]
    struct EventLog(Rc<RefCell<Vec<String>>>);

    impl EventLog {
        fn new() -> Self {
            EventLog(Rc::new(RefCell::new(Vec::new())))
        }

        fn push(&self, event: impl Into<String>) {
            self.0.borrow_mut().push(event.into());
        }

        fn events(&self) -> Vec<String> {
            self.0.borrow().clone()
        }
    }

    /// Minimal controller that records its lifecycle calls.
    struct ProbeView {
        name: &'static str,
        log: EventLog,
        destroy_count: usize,
    }

    impl View for ProbeView {
        fn title(&self) -> String {
            self.name.to_string()
        }

        fn render(&mut self) {
            self.log.push(format!("render {}", self.name));
        }

        fn poll(&mut self) -> bool {
            false
        }

        fn handle(&mut self, _command: ViewCommand) -> ViewEffect {
            ViewEffect::None
        }

        fn body(&self) -> ViewBody<'_> {
            ViewBody::Loading
        }

        fn modal(&self) -> Option<&ModalState> {
            None
        }

        fn destroy(&mut self) {
            self.destroy_count += 1;
            self.log
                .push(format!("destroy {} #{}", self.name, self.destroy_count));
        }
    }

    fn probe_router(log: &EventLog) -> Router {
        let mut router = Router::new("/dashboard");
        let registrations: [(&'static str, &'static str, &'static str); 2] = [
            ("/dashboard", "nav.dashboard", "dashboard"),
            ("/games", "nav.games", "games"),
        ];
        for (path, label_key, name) in registrations {
            let log = log.clone();
            router.register(
                path,
                label_key,
                Box::new(move |params| {
                    if let Some(q) = params.get("q") {
                        log.push(format!("params {name} q={q}"));
                    }
                    Box::new(ProbeView {
                        name,
                        log: log.clone(),
                        destroy_count: 0,
                    })
                }),
            );
        }
        router
    }

    #[test]
    fn test_navigation_tears_down_before_building() {
        let log = EventLog::new();
        let mut router = probe_router(&log);

        router.navigate("#/games");
        assert_eq!(router.active_path(), "/games");
        assert_eq!(log.events(), vec!["render games"]);

        router.navigate("#/dashboard");
        assert_eq!(
            log.events(),
            vec!["render games", "destroy games #1", "render dashboard"]
        );
    }

    #[test]
    fn test_unknown_route_redirects_and_drops_params() {
        let log = EventLog::new();
        let mut router = probe_router(&log);
        router.navigate("#/games");

        router.navigate("#/unknown?q=ignored");
        assert_eq!(router.active_path(), "/dashboard");
        // The old screen went down exactly once and the redirect did not
        // smuggle the unknown route's params along.
        assert_eq!(
            log.events(),
            vec!["render games", "destroy games #1", "render dashboard"]
        );
    }

    #[test]
    fn test_same_path_navigation_rebuilds_the_screen() {
        let log = EventLog::new();
        let mut router = probe_router(&log);

        router.navigate("#/games");
        router.navigate("#/games");
        assert_eq!(
            log.events(),
            vec!["render games", "destroy games #1", "render games"]
        );
    }

    #[test]
    fn test_factory_receives_decoded_params() {
        let log = EventLog::new();
        let mut router = probe_router(&log);

        router.navigate("#/games?q=halo%20infinite");
        assert!(log
            .events()
            .contains(&"params games q=halo infinite".to_string()));
    }

    #[test]
    fn test_empty_fragment_opens_the_default_route() {
        let log = EventLog::new();
        let mut router = probe_router(&log);

        router.navigate("");
        assert_eq!(router.active_path(), "/dashboard");
        assert_eq!(log.events(), vec!["render dashboard"]);
    }

    fn games_view(ctx: &Rc<AppContext>, params: HashMap<String, String>) -> EntityView<GamesScreen> {
        EntityView::new(
            GamesScreen::new(ctx),
            ctx.games.clone(),
            Rc::clone(&ctx.i18n),
            10,
            &params,
        )
    }

    #[test]
    fn test_initial_query_prefilters_the_table() {
        let ctx = AppContext::new(Arc::new(MemoryStore::new()), &Config::default());
        let params = HashMap::from([("q".to_string(), "witcher".to_string())]);
        let mut view = games_view(&ctx, params);
        view.render();

        let mut ready = false;
        for _ in 0..400 {
            view.poll();
            if matches!(view.body(), ViewBody::Table { .. }) {
                ready = true;
                break;
            }
            thread::sleep(Duration::from_millis(5));
        }
        assert!(ready, "records never arrived");

        match view.body() {
            ViewBody::Table { snapshot, .. } => {
                assert_eq!(snapshot.search_term, "witcher");
                assert_eq!(snapshot.visible_total, 1);
                assert_eq!(snapshot.source_total, 8);
                assert_eq!(snapshot.rows[0].cells[0].text, "The Witcher 3");
            }
            _ => panic!("expected a table body"),
        }
    }

    /// Blocks reads of the games collection until released, so a test
    /// can hold a load in flight across a destroy.
    struct GateStore {
        inner: MemoryStore,
        release: AtomicBool,
        served: AtomicBool,
    }

    impl GateStore {
        fn new() -> Self {
            GateStore {
                inner: MemoryStore::new(),
                release: AtomicBool::new(false),
                served: AtomicBool::new(false),
            }
        }
    }

    impl StorageBackend for GateStore {
        fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
            if key == Game::STORE_KEY {
                while !self.release.load(Ordering::SeqCst) {
                    thread::sleep(Duration::from_millis(2));
                }
                self.served.store(true, Ordering::SeqCst);
            }
            self.inner.get(key)
        }

        fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
            self.inner.set(key, value)
        }

        fn remove(&self, key: &str) -> Result<(), StoreError> {
            self.inner.remove(key)
        }
    }

    #[test]
    fn test_late_load_after_destroy_is_discarded() {
        let store = Arc::new(GateStore::new());
        let ctx = AppContext::new(Arc::clone(&store) as Arc<dyn StorageBackend>, &Config::default());
        let mut view = games_view(&ctx, HashMap::new());

        view.render();
        assert!(matches!(view.body(), ViewBody::Loading));

        // Tear the screen down while its records load is still stuck.
        view.destroy();
        store.release.store(true, Ordering::SeqCst);

        let mut served = false;
        for _ in 0..1000 {
            if store.served.load(Ordering::SeqCst) {
                served = true;
                break;
            }
            thread::sleep(Duration::from_millis(2));
        }
        assert!(served, "gated load never completed");
        thread::sleep(Duration::from_millis(50));

        // The resolved load lands nowhere: polling reports no change and
        // the body never becomes a table.
        assert!(!view.poll());
        assert!(matches!(view.body(), ViewBody::Loading));
    }
}
