mod config;
mod food;
mod game;
mod input;
mod render;
mod session;
mod snake;
mod term;

use anyhow::Result;
use clap::Parser;
use log::info;

use config::{Cli, GameConfig};

pub type TermInt = u16;
pub type Coords = (u16, u16);

fn main() -> Result<()> {
    pretty_env_logger::init();

    let cli = Cli::parse();
    let config = GameConfig::from_cli(&cli)?;
    info!("starting with {:?}", config);

    let mut game = game::SnakeGame::new(config)?;
    // The game loop hands the terminal back before returning, error or not
    game.run()
}
