use super::emit;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::feed::StoryFeed;
use crate::errors::AppResult;
use crate::render::View;
use crate::ui::messages::warning;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Highlights { html, out } = cmd {
        let feed = StoryFeed::from_config(cfg);

        if !feed.wait_for_primary() {
            warning("Backend not ready, skipping latest stories.");
            return Ok(());
        }

        let content = if *html {
            feed.render(View::Highlights).html
        } else {
            feed.render_text(View::Highlights)
        };

        emit(&content, out.as_ref())?;
    }
    Ok(())
}
