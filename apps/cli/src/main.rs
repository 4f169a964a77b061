mod config;
mod main_lib;

use config::Config;
use main_lib::{build_manager, init_tracing, parse_command, render_state, Command};
use tokio::io::{AsyncBufReadExt, BufReader};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;
    init_tracing();

    let manager = build_manager(&config)?;
    tracing::info!(
        "Using {} lookup with {:?} debounce",
        manager.lookup_id(),
        manager.debounce_delay()
    );

    let subscription = manager.subscribe(|state| println!("{}", render_state(state)));

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        match parse_command(&line) {
            Command::Search(text) => manager.update_search_input(text),
            Command::State => println!("{}", serde_json::to_string_pretty(&manager.get_state())?),
            Command::Details(place_id) => match manager.get_place_details(place_id).await {
                Ok(details) => println!("{}", serde_json::to_string_pretty(&details)?),
                Err(err) => tracing::warn!("Details lookup failed: {}", err),
            },
            Command::Quit => break,
        }
    }

    subscription.unsubscribe();
    manager.destroy();
    Ok(())
}
