#[cfg(test)]
mod tests {
    use std::rc::Rc;
    use std::sync::Arc;

    use mymanager::app_context::AppContext;
    use mymanager::config::Config;
    use mymanager::models::Game;
    use mymanager::storage::MemoryStore;
    use mymanager::table::TableEngine;
    use mymanager::views::{EntityScreen, GamesScreen, OrdersScreen};

    fn context() -> Rc<AppContext> {
        AppContext::new(Arc::new(MemoryStore::new()), &Config::default())
    }

    /// Engine over the real games columns and the seeded collection.
    fn games_engine(ctx: &Rc<AppContext>, page_size: usize) -> TableEngine<Game> {
        let columns = GamesScreen::new(ctx).columns(&ctx.i18n.borrow());
        let records = ctx.games.get_all().expect("seeded games load");
        TableEngine::new(columns, records, page_size)
    }

    fn visible_names(engine: &TableEngine<Game>) -> Vec<String> {
        engine
            .visible_records()
            .iter()
            .map(|game| game.name.clone())
            .collect()
    }

    #[test]
    fn test_seeded_games_paginate() {
        let ctx = context();
        let mut engine = games_engine(&ctx, 3);

        assert_eq!(engine.source_len(), 8);
        assert_eq!(engine.page_count(), 3);
        assert_eq!(engine.page_records().len(), 3);

        engine.next_page();
        engine.next_page();
        assert_eq!(engine.current_page(), 3);
        assert_eq!(engine.page_records().len(), 2);

        // Past the last page: stays put.
        engine.next_page();
        assert_eq!(engine.current_page(), 3);

        engine.prev_page();
        engine.prev_page();
        engine.prev_page();
        assert_eq!(engine.current_page(), 1);
    }

    #[test]
    fn test_filter_searches_rendered_values() {
        let ctx = context();
        let mut engine = games_engine(&ctx, 10);

        // Genre text, case-insensitive.
        engine.filter("rpg");
        assert_eq!(
            visible_names(&engine),
            vec!["The Witcher 3", "Cyberpunk 2077", "Elden Ring"]
        );

        // Prices are matched as rendered, dollar sign included.
        engine.filter("$29.99");
        assert_eq!(visible_names(&engine), vec!["The Witcher 3"]);

        engine.filter("");
        assert_eq!(engine.visible_len(), 8);
    }

    #[test]
    fn test_date_sort_is_chronological_not_textual() {
        let ctx = context();
        let mut engine = games_engine(&ctx, 10);

        engine.sort("releaseDate");
        // "Feb 28, 2017" would sort before "May 19, 2015" textually; the
        // typed comparison keeps release order.
        assert_eq!(
            visible_names(&engine),
            vec![
                "The Witcher 3",
                "Horizon Zero Dawn",
                "Mario Odyssey",
                "God of War",
                "Cyberpunk 2077",
                "Forza Horizon 5",
                "Halo Infinite",
                "Elden Ring",
            ]
        );
    }

    #[test]
    fn test_price_sort_keeps_tied_rows_in_order() {
        let ctx = context();
        let mut engine = games_engine(&ctx, 10);

        engine.sort("price");
        // Four games share $59.99 and keep their seed order at the tail.
        assert_eq!(
            visible_names(&engine),
            vec![
                "Horizon Zero Dawn",
                "The Witcher 3",
                "God of War",
                "Cyberpunk 2077",
                "Halo Infinite",
                "Mario Odyssey",
                "Elden Ring",
                "Forza Horizon 5",
            ]
        );

        // Toggling reverses the comparison; the tied block stays stable.
        engine.sort("price");
        assert_eq!(
            visible_names(&engine)[..4],
            [
                "Halo Infinite",
                "Mario Odyssey",
                "Elden Ring",
                "Forza Horizon 5"
            ]
        );
    }

    #[test]
    fn test_pages_concatenate_to_the_visible_set() {
        let ctx = context();
        let mut engine = games_engine(&ctx, 3);
        engine.sort("name");

        let expected = visible_names(&engine);
        let mut collected: Vec<String> = Vec::new();
        for page in 1..=engine.page_count() {
            engine.set_page(page);
            collected.extend(engine.page_records().iter().map(|game| game.name.clone()));
        }
        assert_eq!(collected, expected);
    }

    #[test]
    fn test_filter_sort_and_page_compose() {
        let ctx = context();
        let mut engine = games_engine(&ctx, 2);

        engine.filter("action");
        assert_eq!(engine.visible_len(), 2);
        engine.sort("price");

        assert_eq!(engine.page_count(), 1);
        assert_eq!(
            engine.page_record(0).map(|game| game.name.as_str()),
            Some("Horizon Zero Dawn")
        );
        assert_eq!(
            engine.page_record(1).map(|game| game.name.as_str()),
            Some("God of War")
        );
        assert_eq!(engine.page_record(2).map(|game| game.name.as_str()), None);
    }

    #[test]
    fn test_order_status_snapshots_as_badge() {
        let ctx = context();
        let columns = OrdersScreen::new(&ctx).columns(&ctx.i18n.borrow());
        let records = ctx.orders.get_all().expect("seeded orders load");
        let engine = TableEngine::new(columns, records, 10);

        let snapshot = engine.snapshot();
        assert_eq!(snapshot.source_total, 10);

        let first = &snapshot.rows[0];
        assert_eq!(first.cells[0].text, "John Doe");
        assert_eq!(first.cells[3].text, "$29.99");
        assert_eq!(first.cells[4].text, "Completed");
        assert_eq!(first.cells[4].tag.as_deref(), Some("completed"));

        // Pending rows tag accordingly for the host's badge styling.
        let pending = &snapshot.rows[2];
        assert_eq!(pending.cells[4].tag.as_deref(), Some("pending"));
    }
}
