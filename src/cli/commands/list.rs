use super::emit;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::feed::StoryFeed;
use crate::errors::AppResult;
use crate::render::{RenderSettings, View};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::List { limit, html, out } = cmd {
        let mut settings = RenderSettings::from(cfg);
        if let Some(n) = limit {
            settings.full_limit = (*n).min(settings.full_limit);
        }

        let feed = StoryFeed::from_config(cfg).with_settings(settings);

        let content = if *html {
            feed.render(View::Full).html
        } else {
            feed.render_text(View::Full)
        };

        emit(&content, out.as_ref())?;
    }
    Ok(())
}
