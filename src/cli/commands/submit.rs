use super::emit;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::feed::StoryFeed;
use crate::core::submit::StoryForm;
use crate::errors::AppResult;
use crate::models::ClientMeta;
use crate::render::View;
use crate::ui::messages::{success, warning};

/// Share a story, then print the refreshed feed.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Submit {
        text,
        feeling,
        timezone,
        language,
        screen,
        platform,
        html,
    } = cmd
    {
        // explicit flags win over what the environment suggests
        let detected = ClientMeta::detect();
        let meta = ClientMeta::new(
            timezone.as_deref().unwrap_or(&detected.timezone),
            language.as_deref().unwrap_or(&detected.language),
            screen.as_deref().unwrap_or(&detected.screen),
            platform.as_deref().unwrap_or(&detected.platform),
        );

        let mut form = StoryForm::new(text.clone(), feeling.clone());
        let mut feed = StoryFeed::from_config(cfg);
        let outcome = feed.submit(&mut form, &meta)?;

        if outcome.source.is_offline() {
            warning("Backend unavailable: story saved on this device (offline).");
        } else {
            success("Thank you for sharing your story.");
        }

        if *html {
            emit(&outcome.listing.html, None)?;
        } else {
            emit(&feed.render_text(View::Full), None)?;
        }
    }

    Ok(())
}
