//! Bare URL autolinking.
//!
//! CommonMark only links `<https://...>` autolinks. This pass turns bare
//! `http://`, `https://` and `www.` URLs found in text into link events.

use std::sync::LazyLock;

use pulldown_cmark::{CowStr, Event, LinkType, Tag, TagEnd};
use regex::Regex;

static BARE_URL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)\b(?:https?://|www\.)[^\s<>]*[^\s<>.,:;"'!?)\]]"#).unwrap()
});

/// Split text events around bare URLs and wrap each URL in a link.
///
/// Text inside links, images and code blocks is left untouched.
pub(crate) fn link_bare_urls(events: Vec<Event<'_>>) -> Vec<Event<'_>> {
    let mut out = Vec::with_capacity(events.len());
    let mut link_depth = 0usize;
    let mut in_code_block = false;

    for event in events {
        match &event {
            Event::Start(Tag::Link { .. } | Tag::Image { .. }) => link_depth += 1,
            Event::End(TagEnd::Link | TagEnd::Image) => link_depth = link_depth.saturating_sub(1),
            Event::Start(Tag::CodeBlock(_)) => in_code_block = true,
            Event::End(TagEnd::CodeBlock) => in_code_block = false,
            Event::Text(text) if link_depth == 0 && !in_code_block => {
                if BARE_URL_RE.is_match(text) {
                    split_text(text, &mut out);
                    continue;
                }
            }
            _ => {}
        }
        out.push(event);
    }

    out
}

fn split_text(text: &str, out: &mut Vec<Event<'_>>) {
    let mut last = 0;
    for found in BARE_URL_RE.find_iter(text) {
        if found.start() > last {
            out.push(Event::Text(CowStr::from(text[last..found.start()].to_owned())));
        }
        let url = found.as_str();
        let dest_url = if url.len() >= 4 && url[..4].eq_ignore_ascii_case("www.") {
            format!("http://{url}")
        } else {
            url.to_owned()
        };
        out.push(Event::Start(Tag::Link {
            link_type: LinkType::Autolink,
            dest_url: CowStr::from(dest_url),
            title: CowStr::Borrowed(""),
            id: CowStr::Borrowed(""),
        }));
        out.push(Event::Text(CowStr::from(url.to_owned())));
        out.push(Event::End(TagEnd::Link));
        last = found.end();
    }
    if last < text.len() {
        out.push(Event::Text(CowStr::from(text[last..].to_owned())));
    }
}
