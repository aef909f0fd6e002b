use std::path::Path;
use std::rc::Rc;
use std::sync::Arc;

use crossterm::style::Stylize;

use mymanager::app_context::AppContext;
use mymanager::config::Config;
use mymanager::models::Entity;
use mymanager::record_loader::RecordLoader;
use mymanager::repository::Repository;
use mymanager::storage::{JsonFileStore, RemoteStore, StorageBackend};
use mymanager::table_display::display_records;
use mymanager::utils::app_paths::AppPaths;
use mymanager::views::{
    EntityScreen, GamesScreen, GenresScreen, OrdersScreen, PlatformsScreen, PlayersScreen,
};

fn print_help() {
    println!("{}", "mymanager - Game store admin console".blue().bold());
    println!();
    println!("{}", "Usage:".yellow());
    println!("  mymanager [OPTIONS] [ROUTE]");
    println!();
    println!("{}", "Routes:".yellow());
    println!("  dashboard, games, players, platforms, genres, orders");
    println!("  A route may carry a search term: games?q=witcher");
    println!();
    println!("{}", "Options:".yellow());
    println!(
        "  {}         - Write a commented default config file",
        "--generate-config".green()
    );
    println!(
        "  {}             - Use a remote snapshot store instead of local files",
        "--store <url>".green()
    );
    println!(
        "  {}          - Print a collection to stdout and exit",
        "--dump <entity>".green()
    );
    println!(
        "  {} - Replace a collection from a CSV export",
        "--import <entity> <file>".green()
    );
    println!("  {}                - Show this help", "-h, --help".green());
    println!();
    println!("{}", "Keys (inside the console):".yellow());
    println!("  {}   - Switch screen", "Tab".green());
    println!("  {}     - Search the table", "/".green());
    println!("  {} - Add / edit / delete / view", "a e d v".green());
    println!("  {}   - Export CSV / JSON", "x X".green());
    println!("  {}    - Help popup", "F1".green());
    println!();
}

fn dump_collection(ctx: &Rc<AppContext>, entity: &str) -> anyhow::Result<()> {
    let i18n = ctx.i18n.borrow();
    match entity {
        "games" => {
            display_records(&ctx.games.get_all()?, &GamesScreen::new(ctx).columns(&i18n))
        }
        "players" => display_records(
            &ctx.players.get_all()?,
            &PlayersScreen::new(ctx).columns(&i18n),
        ),
        "platforms" => display_records(
            &ctx.platforms.get_all()?,
            &PlatformsScreen::new().columns(&i18n),
        ),
        "genres" => {
            display_records(&ctx.genres.get_all()?, &GenresScreen::new().columns(&i18n))
        }
        "orders" => display_records(
            &ctx.orders.get_all()?,
            &OrdersScreen::new(ctx).columns(&i18n),
        ),
        other => anyhow::bail!("unknown entity '{other}' (expected games, players, platforms, genres or orders)"),
    }
    Ok(())
}

fn import_into<T: Entity>(repo: &Repository<T>, path: &Path) -> anyhow::Result<usize> {
    let records: Vec<T> = RecordLoader::load_csv(path)?;
    let stored = repo.replace_all(records)?;
    Ok(stored.len())
}

fn import_collection(ctx: &Rc<AppContext>, entity: &str, path: &Path) -> anyhow::Result<()> {
    let count = match entity {
        "games" => import_into(&ctx.games, path)?,
        "players" => import_into(&ctx.players, path)?,
        "platforms" => import_into(&ctx.platforms, path)?,
        "genres" => import_into(&ctx.genres, path)?,
        "orders" => import_into(&ctx.orders, path)?,
        other => anyhow::bail!("unknown entity '{other}' (expected games, players, platforms, genres or orders)"),
    };
    println!(
        "{}",
        format!("Imported {count} {entity} records from {}", path.display()).green()
    );
    Ok(())
}

fn normalize_route(raw: &str) -> String {
    let trimmed = raw.trim_start_matches('#');
    if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{trimmed}")
    }
}

fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().collect();

    if args.contains(&"--help".to_string()) || args.contains(&"-h".to_string()) {
        print_help();
        return Ok(());
    }

    if args.contains(&"--generate-config".to_string()) {
        match AppPaths::config_file() {
            Ok(path) => {
                if let Some(parent) = path.parent() {
                    if let Err(e) = std::fs::create_dir_all(parent) {
                        eprintln!("Error creating config directory: {e}");
                        std::process::exit(1);
                    }
                }
                if let Err(e) = std::fs::write(&path, Config::create_default_with_comments()) {
                    eprintln!("Error writing config file: {e}");
                    std::process::exit(1);
                }
                println!("Configuration file created at: {path:?}");
                println!("Edit this file to change credentials, page size and language.");
                return Ok(());
            }
            Err(e) => {
                eprintln!("Error determining config path: {e}");
                std::process::exit(1);
            }
        }
    }

    let config = Config::load()?;
    let log_path = mymanager::utils::logging::init_tracing()?;

    let store_url = args
        .iter()
        .position(|arg| arg == "--store")
        .and_then(|pos| args.get(pos + 1))
        .cloned();
    let dump_entity = args
        .iter()
        .position(|arg| arg == "--dump")
        .and_then(|pos| args.get(pos + 1))
        .cloned();
    let import_args = args.iter().position(|arg| arg == "--import").and_then(|pos| {
        match (args.get(pos + 1), args.get(pos + 2)) {
            (Some(entity), Some(file)) => Some((entity.clone(), file.clone())),
            _ => None,
        }
    });

    // First free argument that is not a flag or a flag operand.
    let mut route_arg: Option<String> = None;
    let mut operands = 0usize;
    for arg in args.iter().skip(1) {
        if operands > 0 {
            operands -= 1;
            continue;
        }
        match arg.as_str() {
            "--store" | "--dump" => operands = 1,
            "--import" => operands = 2,
            flag if flag.starts_with("--") => {}
            positional => route_arg = Some(positional.to_string()),
        }
    }

    let backend: Arc<dyn StorageBackend> = match &store_url {
        Some(url) => Arc::new(RemoteStore::new(url)),
        None => {
            let dir = match &config.behavior.data_dir {
                Some(dir) => {
                    std::fs::create_dir_all(dir)?;
                    dir.clone()
                }
                None => AppPaths::store_dir()?,
            };
            Arc::new(JsonFileStore::new(dir))
        }
    };
    let ctx = AppContext::new(backend, &config);

    if let Some(entity) = dump_entity {
        return dump_collection(&ctx, &entity);
    }
    if let Some((entity, file)) = import_args {
        return import_collection(&ctx, &entity, Path::new(&file));
    }

    let initial_route = route_arg
        .map(|raw| normalize_route(&raw))
        .unwrap_or_else(|| config.behavior.default_route.clone());

    eprintln!("Logs are written to {}", log_path.display());
    if let Err(e) = mymanager::ui::run(ctx, &config, &initial_route) {
        eprintln!("TUI Error: {e:#}");
        std::process::exit(1);
    }
    Ok(())
}
