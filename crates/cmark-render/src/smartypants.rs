//! Typographic post-processing of rendered HTML.
//!
//! Straight quotes become curly quotes, dashes and ellipses become their
//! typographic forms, and a few ASCII symbols become entities. Markup and the
//! contents of code-like elements are copied unchanged.

/// Elements whose contents are never rewritten.
const SKIPPED_ELEMENTS: &[&str] = &["pre", "code", "kbd", "script", "style", "math"];

/// Elements that start a new run of text, so a following quote opens.
const BLOCK_ELEMENTS: &[&str] = &[
    "p", "li", "h1", "h2", "h3", "h4", "h5", "h6", "td", "th", "dt", "dd", "div", "blockquote",
    "br",
];

const LITERALS: &[(&str, &str)] = &[
    ("---", "&mdash;"),
    ("--", "&ndash;"),
    ("...", "&hellip;"),
    ("(c)", "&copy;"),
    ("(r)", "&reg;"),
    ("(tm)", "&trade;"),
];

const FRACTIONS: &[(&str, &str)] = &[("1/2", "&frac12;"), ("1/4", "&frac14;"), ("3/4", "&frac34;")];

const LDQUO: (&str, char) = ("&ldquo;", '\u{201C}');
const RDQUO: (&str, char) = ("&rdquo;", '\u{201D}');
const LSQUO: (&str, char) = ("&lsquo;", '\u{2018}');
const RSQUO: (&str, char) = ("&rsquo;", '\u{2019}');

#[derive(Clone, Copy)]
enum Quote {
    Single,
    Double,
}

/// Apply typographic substitutions to an HTML fragment.
///
/// # Example
///
/// ```
/// use cmark_render::smartypants;
///
/// assert_eq!(
///     smartypants("<p>Don't call me Shirley</p>\n"),
///     "<p>Don&rsquo;t call me Shirley</p>\n"
/// );
/// ```
#[must_use]
pub fn smartypants(html: &str) -> String {
    let mut out = String::with_capacity(html.len() + html.len() / 8);
    let mut rest = html;
    let mut prev: Option<char> = None;
    let mut skipped: Option<&'static str> = None;

    while let Some(c) = rest.chars().next() {
        if c == '<' {
            let end = rest.find('>').map_or(rest.len(), |i| i + 1);
            let tag = &rest[..end];
            let (name, closing) = tag_name(tag);

            match skipped {
                Some(element) => {
                    if closing && name.eq_ignore_ascii_case(element) {
                        skipped = None;
                    }
                }
                None if !closing && !tag.ends_with("/>") => {
                    skipped = SKIPPED_ELEMENTS
                        .iter()
                        .copied()
                        .find(|element| name.eq_ignore_ascii_case(element));
                }
                None => {}
            }
            if skipped.is_none()
                && !closing
                && BLOCK_ELEMENTS.iter().any(|element| name.eq_ignore_ascii_case(element))
            {
                prev = None;
            }

            out.push_str(tag);
            rest = &rest[end..];
            continue;
        }

        if skipped.is_some() {
            let end = rest.find('<').unwrap_or(rest.len());
            let text = &rest[..end];
            out.push_str(text);
            prev = text.chars().next_back().or(prev);
            rest = &rest[end..];
            continue;
        }

        let (replacement, len, last) = next_token(rest, prev);
        out.push_str(replacement.unwrap_or(&rest[..len]));
        prev = Some(last);
        rest = &rest[len..];
    }

    out
}

/// Returns the element name of a tag and whether it is a closing tag.
fn tag_name(tag: &str) -> (&str, bool) {
    let inner = &tag[1..];
    let (closing, inner) = match inner.strip_prefix('/') {
        Some(stripped) => (true, stripped),
        None => (false, inner),
    };
    let end = inner
        .find(|c: char| !c.is_ascii_alphanumeric())
        .unwrap_or(inner.len());
    (&inner[..end], closing)
}

/// Returns the replacement (`None` to copy verbatim), the number of input
/// bytes consumed and the character to treat as the previous one.
fn next_token(rest: &str, prev: Option<char>) -> (Option<&'static str>, usize, char) {
    for &(pattern, entity) in LITERALS {
        if starts_with_ignore_ascii_case(rest, pattern) {
            let last = pattern.chars().next_back().unwrap_or('-');
            return (Some(entity), pattern.len(), last);
        }
    }

    if !prev.is_some_and(char::is_alphanumeric) {
        for &(pattern, entity) in FRACTIONS {
            if rest.starts_with(pattern)
                && !rest[pattern.len()..].starts_with(|c: char| c.is_ascii_digit() || c == '/')
            {
                return (Some(entity), pattern.len(), '4');
            }
        }
    }

    if let Some((quote, len)) = quote_at(rest) {
        let (entity, last) = match quote {
            Quote::Double if opens_quote(prev) => LDQUO,
            Quote::Double => RDQUO,
            Quote::Single => single_quote(&rest[len..], prev),
        };
        return (Some(entity), len, last);
    }

    if rest.starts_with('&') {
        // Other entities pass through whole.
        if let Some(end) = rest[1..].find(';').map(|i| i + 2)
            && end <= 12
            && rest[1..end - 1]
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '#')
        {
            return (None, end, '&');
        }
    }

    let c = rest.chars().next().unwrap_or(' ');
    (None, c.len_utf8(), c)
}

/// Recognise a straight quote or its entity form at the start of `rest`.
fn quote_at(rest: &str) -> Option<(Quote, usize)> {
    const QUOTES: &[(&str, Quote)] = &[
        ("\"", Quote::Double),
        ("'", Quote::Single),
        ("&quot;", Quote::Double),
        ("&#34;", Quote::Double),
        ("&#39;", Quote::Single),
        ("&#x27;", Quote::Single),
    ];

    QUOTES
        .iter()
        .find(|(pattern, _)| starts_with_ignore_ascii_case(rest, pattern))
        .map(|&(pattern, quote)| (quote, pattern.len()))
}

fn single_quote(after: &str, prev: Option<char>) -> (&'static str, char) {
    // Contractions and possessives: don't, dogs'
    if prev.is_some_and(char::is_alphanumeric) {
        return RSQUO;
    }
    if opens_quote(prev) {
        if is_decade(after) { RSQUO } else { LSQUO }
    } else {
        RSQUO
    }
}

/// `'90s` style abbreviations.
fn is_decade(after: &str) -> bool {
    let bytes = after.as_bytes();
    bytes.len() >= 2
        && bytes[0].is_ascii_digit()
        && bytes[1].is_ascii_digit()
        && !bytes.get(2).is_some_and(u8::is_ascii_digit)
}

fn opens_quote(prev: Option<char>) -> bool {
    prev.is_none_or(|c| {
        c.is_whitespace()
            || matches!(
                c,
                '(' | '[' | '{' | '-' | '\u{2013}' | '\u{2014}' | '\u{201C}' | '\u{2018}'
            )
    })
}

fn starts_with_ignore_ascii_case(text: &str, pattern: &str) -> bool {
    text.len() >= pattern.len()
        && text.as_bytes()[..pattern.len()].eq_ignore_ascii_case(pattern.as_bytes())
}
