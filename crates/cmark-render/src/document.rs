//! Parsed Markdown documents.

use pulldown_cmark::{CodeBlockKind, Event, Options, Parser, Tag, TagEnd, TextMergeStream};

use crate::autolink::link_bare_urls;
use crate::flags::Extensions;

/// A parsed Markdown document: the event stream produced by the parser
/// together with the extensions it was parsed with.
///
/// Adjacent text events are merged, so renderers see each run of text once.
#[derive(Clone, Debug)]
pub struct Document<'a> {
    events: Vec<Event<'a>>,
    extensions: Extensions,
}

impl<'a> Document<'a> {
    /// Wrap an already produced event sequence.
    #[must_use]
    pub fn from_events(events: Vec<Event<'a>>, extensions: Extensions) -> Self {
        Self { events, extensions }
    }

    /// Events in document order.
    #[must_use]
    pub fn events(&self) -> &[Event<'a>] {
        &self.events
    }

    /// Iterate over events in document order.
    pub fn iter(&self) -> std::slice::Iter<'_, Event<'a>> {
        self.events.iter()
    }

    /// Extensions the document was parsed with.
    #[must_use]
    pub fn extensions(&self) -> Extensions {
        self.extensions
    }

    /// Consume the document and return its events.
    #[must_use]
    pub fn into_events(self) -> Vec<Event<'a>> {
        self.events
    }
}

impl<'a, 'd> IntoIterator for &'d Document<'a> {
    type Item = &'d Event<'a>;
    type IntoIter = std::slice::Iter<'d, Event<'a>>;

    fn into_iter(self) -> Self::IntoIter {
        self.events.iter()
    }
}

/// Parse Markdown text with the given extensions.
///
/// # Example
///
/// ```
/// use cmark_render::{Extensions, parse};
///
/// let document = parse("Visit www.example.com", Extensions::AUTOLINK);
/// assert!(document.events().len() > 3);
/// ```
#[must_use]
pub fn parse(text: &str, extensions: Extensions) -> Document<'_> {
    let options = extensions.parser_options();
    let mut events: Vec<Event<'_>> = TextMergeStream::new(Parser::new_ext(text, options)).collect();

    if extensions.contains(Extensions::DISABLE_INDENTED_CODE) {
        events = indented_code_as_markdown(events, options);
    }
    if extensions.contains(Extensions::NO_INTRA_EMPHASIS) {
        events = TextMergeStream::new(literal_intra_word_emphasis(events).into_iter()).collect();
    }
    if extensions.contains(Extensions::AUTOLINK) {
        events = link_bare_urls(events);
    }

    Document::from_events(events, extensions)
}

/// Parse the contents of indented code blocks as ordinary Markdown.
///
/// Fenced code blocks are left alone. Contents indented twice are unwrapped
/// again on the nested pass.
fn indented_code_as_markdown<'a>(events: Vec<Event<'a>>, options: Options) -> Vec<Event<'a>> {
    let mut block: Option<String> = None;
    let mut out = Vec::with_capacity(events.len());

    for event in events {
        match event {
            Event::Start(Tag::CodeBlock(CodeBlockKind::Indented)) => block = Some(String::new()),
            Event::End(TagEnd::CodeBlock) if block.is_some() => {
                let source = block.take().unwrap_or_default();
                let nested: Vec<Event<'a>> = TextMergeStream::new(Parser::new_ext(&source, options))
                    .map(|event| -> Event<'a> { event.into_static() })
                    .collect();
                out.extend(indented_code_as_markdown(nested, options));
            }
            Event::Text(text) if block.is_some() => {
                if let Some(source) = block.as_mut() {
                    source.push_str(&text);
                }
            }
            other => out.push(other),
        }
    }

    out
}

/// Turn emphasis opened right after a letter or digit back into literal `*`.
///
/// `_` never opens emphasis inside a word, so the delimiter is always `*`.
fn literal_intra_word_emphasis(events: Vec<Event<'_>>) -> Vec<Event<'_>> {
    // One entry per open emphasis span: whether it was made literal.
    let mut open: Vec<bool> = Vec::new();
    let mut after_word = false;
    let mut out = Vec::with_capacity(events.len());

    for event in events {
        match event {
            Event::Start(tag @ (Tag::Emphasis | Tag::Strong)) => {
                open.push(after_word);
                if after_word {
                    out.push(Event::Text(emphasis_delimiter(&tag).into()));
                } else {
                    out.push(Event::Start(tag));
                }
            }
            Event::End(end @ (TagEnd::Emphasis | TagEnd::Strong)) => {
                after_word = false;
                if open.pop().unwrap_or(false) {
                    let delimiter = if end == TagEnd::Strong { "**" } else { "*" };
                    out.push(Event::Text(delimiter.into()));
                } else {
                    out.push(Event::End(end));
                }
            }
            Event::Text(text) => {
                after_word = text.chars().next_back().is_some_and(char::is_alphanumeric);
                out.push(Event::Text(text));
            }
            other => {
                after_word = false;
                out.push(other);
            }
        }
    }

    out
}

fn emphasis_delimiter(tag: &Tag<'_>) -> &'static str {
    if matches!(tag, Tag::Strong) { "**" } else { "*" }
}
