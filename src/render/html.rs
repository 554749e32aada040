use super::{RenderSettings, Rendered, View, placeholder};
use crate::models::{Source, Story};
use crate::utils::date::{format_date, format_date_time};
use crate::utils::formatting::snippet_with_ellipsis;

/// Escape the five HTML-significant characters.
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#039;"),
            other => out.push(other),
        }
    }
    out
}

fn render_item(story: &Story, view: View, settings: &RenderSettings, offline: bool) -> String {
    let source_attr = if offline {
        r#" data-source="offline""#
    } else {
        ""
    };
    let feeling = escape_html(story.feeling.label());

    match view {
        View::Full => format!(
            r#"<div class="story"{source_attr}><p>{}</p><div class="meta">Feeling: {feeling} • {}</div></div>"#,
            escape_html(&story.text),
            format_date_time(&story.created_at),
        ),
        View::Highlights => {
            // escape after cutting so that entities are never split
            let snippet = snippet_with_ellipsis(&story.text, settings.snippet_chars);
            format!(
                r#"<div class="story-item"{source_attr}><p>{}</p><div class="meta">Feeling: {feeling} • {}</div></div>"#,
                escape_html(&snippet),
                format_date(&story.created_at),
            )
        }
    }
}

/// Render at most `settings.limit(view)` stories, in the order given.
pub fn render(stories: &[Story], view: View, source: Source, settings: &RenderSettings) -> Rendered {
    let offline = source.is_offline();
    let shown = &stories[..stories.len().min(settings.limit(view))];

    if shown.is_empty() {
        return Rendered {
            html: format!(r#"<p class="muted">{}</p>"#, placeholder(view, source)),
            count: 0,
            offline,
        };
    }

    let html = shown
        .iter()
        .map(|s| render_item(s, view, settings, offline))
        .collect::<Vec<_>>()
        .join("\n");

    Rendered {
        html,
        count: shown.len(),
        offline,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ClientMeta, Feeling};
    use chrono::{Duration, TimeZone, Utc};

    fn story(text: &str, feeling: Feeling, minutes_ago: i64) -> Story {
        let base = Utc.with_ymd_and_hms(2025, 3, 10, 12, 0, 0).unwrap();
        Story {
            id: None,
            text: text.to_string(),
            feeling,
            created_at: base - Duration::minutes(minutes_ago),
            meta: ClientMeta::default(),
        }
    }

    #[test]
    fn escapes_all_special_characters() {
        assert_eq!(
            escape_html(r#"<b>"Tom" & 'Jerry'</b>"#),
            "&lt;b&gt;&quot;Tom&quot; &amp; &#039;Jerry&#039;&lt;/b&gt;"
        );
    }

    #[test]
    fn user_text_never_leaks_markup() {
        let s = story(
            "<script>alert('x')</script>",
            Feeling::Named("<i>\"sad\"</i>".into()),
            0,
        );
        let out = render(&[s], View::Full, Source::Primary, &RenderSettings::default());
        assert!(!out.html.contains("<script>"));
        assert!(!out.html.contains("<i>"));
        assert!(out.html.contains("&lt;script&gt;alert(&#039;x&#039;)&lt;/script&gt;"));
        assert!(out.html.contains("Feeling: &lt;i&gt;&quot;sad&quot;&lt;/i&gt;"));
    }

    #[test]
    fn unknown_feeling_is_labelled() {
        let out = render(
            &[story("hello", Feeling::Unknown, 0)],
            View::Highlights,
            Source::Primary,
            &RenderSettings::default(),
        );
        assert!(out.html.contains("Feeling: Unknown"));
    }

    #[test]
    fn highlights_are_capped_and_snipped() {
        let long = "x".repeat(200);
        let stories: Vec<Story> = (0..8)
            .map(|i| story(&long, Feeling::Unknown, i))
            .collect();
        let out = render(
            &stories,
            View::Highlights,
            Source::Primary,
            &RenderSettings::default(),
        );
        assert_eq!(out.count, 5);
        assert_eq!(out.html.matches("story-item").count(), 5);
        assert!(out.html.contains(&format!("{}…</p>", "x".repeat(160))));
        assert!(!out.html.contains(&"x".repeat(161)));
    }

    #[test]
    fn full_feed_is_capped_at_fifty() {
        let stories: Vec<Story> = (0..60)
            .map(|i| story(&format!("story {i}"), Feeling::Unknown, i))
            .collect();
        let out = render(&stories, View::Full, Source::Primary, &RenderSettings::default());
        assert_eq!(out.count, 50);
        assert!(out.html.contains("story 49"));
        assert!(!out.html.contains("story 50"));
    }

    #[test]
    fn empty_listing_uses_placeholder() {
        let settings = RenderSettings::default();
        let online = render(&[], View::Full, Source::Primary, &settings);
        assert_eq!(
            online.html,
            r#"<p class="muted">No stories yet. Be the first to share.</p>"#
        );

        let offline = render(&[], View::Highlights, Source::Fallback, &settings);
        assert!(offline.offline);
        assert_eq!(offline.html, r#"<p class="muted">No stories yet (offline).</p>"#);
    }

    #[test]
    fn offline_items_are_marked() {
        let out = render(
            &[story("hi", Feeling::Named("Calm".into()), 0)],
            View::Full,
            Source::Fallback,
            &RenderSettings::default(),
        );
        assert!(out.html.contains(r#"data-source="offline""#));
    }
}
