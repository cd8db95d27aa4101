use anyhow::Context;
use trivia_board::cli::parse_cli;
use trivia_board::fetcher::Fetcher;
use trivia_board::tui::{App, BoardTui};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = parse_cli();
    let config = cli.game_config();
    log::info!(
        "starting board: {} categories x {} clues (pool of {})",
        config.num_categories,
        config.clues_per_category,
        config.category_pool_size
    );

    let fetcher = Fetcher::new(config).context("failed to build the API client")?;
    let mut app = App::new();
    // terminal state is restored by BoardTui's Drop impl
    let mut tui = BoardTui::new().context("failed to initialize the terminal")?;
    tui.run(&mut app, fetcher).await.context("event loop failed")
}
