use anyhow::Result;
use tracing::info;

use rondo_console::{Game, GameConfig};

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();
    info!("rondo starting");
    Game::new(GameConfig::default()).run()?;
    Ok(())
}
