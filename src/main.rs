mod config;
mod game;
mod minimax;
mod render;
mod session;
mod tic_tac_toe;
mod tui;

use clap::Parser;
use log::info;

use config::Config;
use render::BoardLayout;
use session::GameSession;
use tui::Screen;

fn main() -> anyhow::Result<()> {
    let config = Config::parse();
    config.init_logging()?;

    let mut session = GameSession::new(config.difficulty, config.ai_delay());
    let mut screen = Screen::enter()?;
    tui::run(
        &mut screen,
        &mut session,
        BoardLayout::default(),
        config.frame_interval(),
    )?;

    info!(
        "window closed at {} difficulty, last board:\n{}",
        session.difficulty(),
        session.board()
    );
    Ok(())
}
