mod change;
mod filter;
mod plot;
mod prices;
mod search;
mod selection;

use anyhow::Result;

use crate::{cli::Command, config::AppConfig, web};

pub(crate) async fn run(command: Command, config: AppConfig) -> Result<()> {
    match command {
        Command::Serve => web::start_web(web::WebState::new(config)).await,
        Command::Plot {
            selection,
            start,
            end,
            normalize,
            output,
            title,
        } => {
            let window = config.window(start, end);
            plot::run(&config, &selection, window, normalize, &output, title).await
        }
        Command::Change { selection, days } => change::run(&config, &selection, days).await,
        Command::Search { keyword } => search::run(&config, &keyword).await,
        Command::Filter { above, below } => filter::run(&config, above, below).await,
        Command::Prices { code, raw } => prices::run(&config, &code, raw).await,
    }
}
