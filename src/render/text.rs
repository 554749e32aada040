//! Plain terminal rendering of a listing.

use super::{RenderSettings, View, placeholder};
use crate::models::{Source, Story};
use crate::utils::colors::{GREY, RESET, color_for_source};
use crate::utils::date::{format_date, format_date_time};
use crate::utils::formatting::{bold, snippet_with_ellipsis};

const WRAP_WIDTH: usize = 76;

pub fn render(stories: &[Story], view: View, source: Source, settings: &RenderSettings) -> String {
    let offline = source.is_offline();
    let shown = &stories[..stories.len().min(settings.limit(view))];

    let title = match view {
        View::Full => "Stories",
        View::Highlights => "Latest stories",
    };

    let mut out = String::new();
    out.push_str(&bold(title));
    if offline {
        out.push_str(&format!(" {GREY}(offline){RESET}"));
    }
    out.push('\n');

    if shown.is_empty() {
        out.push_str(&format!("{GREY}{}{RESET}\n", placeholder(view, source)));
        return out;
    }

    let wrap = textwrap::Options::new(WRAP_WIDTH)
        .initial_indent("  ")
        .subsequent_indent("  ");

    for story in shown {
        let (body, when) = match view {
            View::Full => (story.text.clone(), format_date_time(&story.created_at)),
            View::Highlights => (
                snippet_with_ellipsis(&story.text, settings.snippet_chars),
                format_date(&story.created_at),
            ),
        };

        out.push_str(&format!(
            "\n{}• {} | Feeling: {}{}\n",
            color_for_source(offline),
            when,
            story.feeling.label(),
            RESET
        ));
        for line in textwrap::wrap(&body, &wrap) {
            out.push_str(&line);
            out.push('\n');
        }
    }

    out
}
