//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `soberpath_core` linkage and storage bootstrap from a shell.
//! - Print the navigation and activity feed the configured role would see.

use log::info;
use soberpath_core::db::open_location;
use soberpath_core::{
    default_nav_items, init_logging, load_collection, visible_nav_items, ActivityFeed,
    Application, ConsoleConfig, NavItem, SqliteActivityRepository, SqliteCollectionStore,
};
use std::error::Error;
use std::process::ExitCode;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), Box<dyn Error>> {
    println!("soberpath_core ping={}", soberpath_core::ping());
    println!("soberpath_core version={}", soberpath_core::core_version());

    let config = ConsoleConfig::from_env()?;
    if let Some(log_dir) = &config.log_dir {
        init_logging(config.log_level, log_dir)?;
    }

    let conn = open_location(&config.db_location())?;
    info!(
        "event=cli_start module=cli status=ok role={} persistent={}",
        config.role.as_str(),
        config.db_path.is_some()
    );

    println!("role={}", config.role.display_name());

    println!("navigation:");
    print_nav(&visible_nav_items(config.role, &default_nav_items()), 1);

    let store = SqliteCollectionStore::new(&conn);
    let applications = load_collection::<Application>(&store);
    let pending = applications
        .iter()
        .filter(|app| app.status.is_pending())
        .count();
    println!("applications total={} pending={pending}", applications.len());

    let feed = ActivityFeed::new(SqliteActivityRepository::new(&conn));
    println!("recent activity:");
    for activity in feed.visible_to(config.role)? {
        println!(
            "  {} [{}] {}: {}",
            activity.timestamp.format("%Y-%m-%d %H:%M"),
            activity.kind.as_str(),
            activity.user,
            activity.details
        );
    }

    Ok(())
}

fn print_nav(items: &[NavItem], depth: usize) {
    for item in items {
        println!("{}{} ({})", "  ".repeat(depth), item.title, item.path);
        print_nav(&item.sublist, depth + 1);
    }
}
