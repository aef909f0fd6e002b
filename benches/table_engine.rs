use chrono::NaiveDate;
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use mymanager::models::Game;
use mymanager::table::{CellValue, ColumnSpec, RenderKind, TableEngine};

fn create_games(rows: usize) -> Vec<Game> {
    let names = [
        "The Witcher 3",
        "Cyberpunk 2077",
        "God of War",
        "Halo Infinite",
        "Mario Odyssey",
        "Elden Ring",
        "Horizon Zero Dawn",
        "Forza Horizon 5",
    ];
    let genres = ["RPG", "Action", "FPS", "Racing", "Platform"];
    let platforms = ["PC", "PlayStation", "Xbox", "Nintendo Switch"];

    (0..rows)
        .map(|i| Game {
            id: i as u32 + 1,
            name: format!("{} {}", names[i % names.len()], i),
            genre: genres[i % genres.len()].to_string(),
            platform: platforms[i % platforms.len()].to_string(),
            price: 9.99 + (i % 60) as f64,
            release_date: NaiveDate::from_ymd_opt(
                2000 + (i % 24) as i32,
                1 + (i % 12) as u32,
                1 + (i % 28) as u32,
            )
            .unwrap(),
            rating: (i % 100) as f64 / 10.0,
            description: format!("Entry {i}"),
        })
        .collect()
}

fn columns() -> Vec<ColumnSpec<Game>> {
    vec![
        ColumnSpec::new("name", "Name", |g: &Game| CellValue::text(g.name.clone())),
        ColumnSpec::new("genre", "Genre", |g: &Game| CellValue::text(g.genre.clone())),
        ColumnSpec::new("price", "Price", |g: &Game| CellValue::Float(g.price))
            .with_kind(RenderKind::Currency),
        ColumnSpec::new("releaseDate", "Release Date", |g: &Game| {
            CellValue::Date(g.release_date)
        })
        .with_kind(RenderKind::Date),
    ]
}

fn benchmark_filter(c: &mut Criterion) {
    let mut group = c.benchmark_group("table_filter");

    for rows in [1_000usize, 10_000, 50_000] {
        group.bench_function(format!("{rows}_rows"), |b| {
            let mut engine = TableEngine::new(columns(), create_games(rows), 10);
            b.iter(|| {
                engine.filter(black_box("rpg"));
            });
        });
    }

    group.finish();
}

fn benchmark_sort(c: &mut Criterion) {
    let mut group = c.benchmark_group("table_sort");

    // Each call toggles direction, so this measures re-sorting a sorted
    // index both ways.
    group.bench_function("50k_rows_by_price", |b| {
        let mut engine = TableEngine::new(columns(), create_games(50_000), 10);
        b.iter(|| engine.sort(black_box("price")));
    });

    group.bench_function("50k_rows_by_date", |b| {
        let mut engine = TableEngine::new(columns(), create_games(50_000), 10);
        b.iter(|| engine.sort(black_box("releaseDate")));
    });

    group.finish();
}

fn benchmark_snapshot(c: &mut Criterion) {
    let mut group = c.benchmark_group("table_snapshot");

    group.bench_function("page_of_10_from_50k", |b| {
        let engine = TableEngine::new(columns(), create_games(50_000), 10);
        b.iter(|| black_box(engine.snapshot()));
    });

    group.finish();
}

criterion_group!(benches, benchmark_filter, benchmark_sort, benchmark_snapshot);
criterion_main!(benches);
