//! State tracked by the HTML renderer while walking events.

use std::collections::HashMap;

use pulldown_cmark::Alignment;

/// State for tracking code block rendering.
#[derive(Default)]
pub(crate) struct CodeBlockState {
    /// Whether we're inside a code block.
    active: bool,
    /// Language of current code block (e.g., "rust", "python").
    language: Option<String>,
    /// Buffer for code block content.
    buffer: String,
}

impl CodeBlockState {
    /// Start a new code block with optional language.
    pub fn start(&mut self, language: Option<String>) {
        self.active = true;
        self.language = language;
        self.buffer.clear();
    }

    /// End the current code block and return (language, content).
    pub fn end(&mut self) -> (Option<String>, String) {
        self.active = false;
        (self.language.take(), std::mem::take(&mut self.buffer))
    }

    /// Check if we're inside a code block.
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Append text to the code block buffer.
    pub fn push_str(&mut self, text: &str) {
        self.buffer.push_str(text);
    }
}

/// State for tracking table rendering.
#[derive(Default)]
pub(crate) struct TableState {
    /// Whether we're inside the table header row.
    in_head: bool,
    /// Column alignments for current table.
    alignments: Vec<Alignment>,
    /// Current column index in table row.
    cell_index: usize,
}

impl TableState {
    /// Start a new table with column alignments.
    pub fn start(&mut self, alignments: Vec<Alignment>) {
        self.alignments = alignments;
        self.in_head = false;
        self.cell_index = 0;
    }

    /// Start the table header row.
    pub fn start_head(&mut self) {
        self.in_head = true;
        self.cell_index = 0;
    }

    /// End the table header row.
    pub fn end_head(&mut self) {
        self.in_head = false;
    }

    /// Start a new body row.
    pub fn start_row(&mut self) {
        self.cell_index = 0;
    }

    /// Move to the next cell.
    pub fn next_cell(&mut self) {
        self.cell_index += 1;
    }

    /// Check if we're in the table header.
    pub fn is_in_head(&self) -> bool {
        self.in_head
    }

    /// Get the alignment style for the current cell.
    pub fn current_alignment_style(&self) -> &'static str {
        match self.alignments.get(self.cell_index) {
            Some(Alignment::Left) => r#" style="text-align: left""#,
            Some(Alignment::Center) => r#" style="text-align: center""#,
            Some(Alignment::Right) => r#" style="text-align: right""#,
            Some(Alignment::None) | None => "",
        }
    }
}

/// State for tracking image alt text capture.
///
/// While active, inline markup inside the image description is flattened
/// to plain text.
#[derive(Default)]
pub(crate) struct ImageState {
    /// Whether we're inside an image.
    active: bool,
    /// Buffer for alt text.
    alt_text: String,
    /// Source and title of the image being captured.
    pending: Option<(String, String)>,
}

impl ImageState {
    /// Start capturing alt text for an image.
    pub fn start(&mut self, src: String, title: String) {
        self.active = true;
        self.alt_text.clear();
        self.pending = Some((src, title));
    }

    /// End image capture and return (src, title, alt).
    pub fn end(&mut self) -> Option<(String, String, String)> {
        self.active = false;
        let alt = std::mem::take(&mut self.alt_text);
        self.pending.take().map(|(src, title)| (src, title, alt))
    }

    /// Check if we're capturing alt text.
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Append text to the alt text buffer.
    pub fn push_str(&mut self, text: &str) {
        self.alt_text.push_str(text);
    }
}

/// State for buffering headings until their id is known.
#[derive(Default)]
pub(crate) struct HeadingState {
    /// Current heading level being processed (None if not in a heading).
    current_level: Option<u8>,
    /// Buffer for heading plain text (for the slug).
    text: String,
    /// Buffer for heading HTML (with inline formatting).
    html: String,
    /// Counter for generating unique heading IDs.
    id_counts: HashMap<String, usize>,
}

impl HeadingState {
    /// Check if we're inside a heading.
    pub fn is_active(&self) -> bool {
        self.current_level.is_some()
    }

    /// Start buffering a heading of the given level.
    pub fn start_heading(&mut self, level: u8) {
        self.current_level = Some(level);
        self.text.clear();
        self.html.clear();
    }

    /// Complete heading and return (level, id, html).
    pub fn complete_heading(&mut self) -> Option<(u8, String, String)> {
        let level = self.current_level.take()?;
        let text = std::mem::take(&mut self.text);
        let html = std::mem::take(&mut self.html);
        let id = self.generate_id(&text);
        Some((level, id, html))
    }

    /// Generate a unique ID for a heading.
    fn generate_id(&mut self, text: &str) -> String {
        let base_id = slugify(text);
        let count = self.id_counts.entry(base_id.clone()).or_default();
        let id = match *count {
            0 => base_id,
            n => format!("{base_id}-{n}"),
        };
        *count += 1;
        id
    }

    /// Append plain text used for the heading id.
    pub fn push_text(&mut self, text: &str) {
        self.text.push_str(text);
    }

    /// Buffer receiving the heading's rendered HTML.
    pub fn html_buffer(&mut self) -> &mut String {
        &mut self.html
    }
}

/// Convert text to URL-safe slug.
///
/// Converts to lowercase, replaces whitespace/dashes/underscores with single dashes,
/// and removes other non-alphanumeric characters.
#[must_use]
pub fn slugify(text: &str) -> String {
    let mut result = String::new();
    let mut last_was_dash = true; // Prevents leading dash

    for c in text.trim().chars() {
        if c.is_ascii_alphanumeric() {
            result.push(c.to_ascii_lowercase());
            last_was_dash = false;
        } else if !last_was_dash && (c.is_whitespace() || c == '-' || c == '_') {
            result.push('-');
            last_was_dash = true;
        }
    }

    if result.ends_with('-') {
        result.pop();
    }

    result
}

/// Escape HTML special characters.
///
/// Apostrophes are left as-is so typographic post-processing can still
/// see them.
#[must_use]
pub fn escape_html(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            _ => result.push(c),
        }
    }
    result
}
