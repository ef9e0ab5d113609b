//! Default HTML renderer.
//!
//! Walks the event stream of a [`Document`] and produces conventional
//! CommonMark HTML (`"<p>text</p>\n"`), adjusted by [`RenderFlags`].

use std::collections::HashMap;
use std::fmt::Write;

use pulldown_cmark::{CodeBlockKind, CowStr, Event, HeadingLevel, Tag, TagEnd};

use crate::document::Document;
use crate::error::RenderError;
use crate::flags::RenderFlags;
use crate::renderer::Renderer;
use crate::state::{CodeBlockState, HeadingState, ImageState, TableState, escape_html};

/// HTML renderer honouring [`RenderFlags`].
///
/// # Example
///
/// ```
/// use cmark_render::{Extensions, HtmlRenderer, RenderFlags, Renderer, parse};
///
/// let document = parse("a\nb", Extensions::empty());
/// let html = HtmlRenderer::new(RenderFlags::HARD_WRAP).render(&document).unwrap();
/// assert_eq!(html, "<p>a<br>\nb</p>\n");
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct HtmlRenderer {
    flags: RenderFlags,
}

impl HtmlRenderer {
    #[must_use]
    pub fn new(flags: RenderFlags) -> Self {
        Self { flags }
    }

    #[must_use]
    pub fn flags(&self) -> RenderFlags {
        self.flags
    }
}

impl Renderer for HtmlRenderer {
    fn render(&self, document: &Document<'_>) -> Result<String, RenderError> {
        let mut writer = HtmlWriter::new(self.flags);
        for event in document {
            writer.process_event(event)?;
        }
        Ok(writer.output)
    }
}

/// Per-document rendering state.
struct HtmlWriter {
    flags: RenderFlags,
    output: String,
    code: CodeBlockState,
    table: TableState,
    image: ImageState,
    /// Images nested inside the alt text of the image being captured.
    image_nesting: usize,
    heading: HeadingState,
    /// One entry per open link: whether its anchor tag was written.
    link_stack: Vec<bool>,
    footnotes: HashMap<String, usize>,
    in_style: bool,
}

impl HtmlWriter {
    fn new(flags: RenderFlags) -> Self {
        Self {
            flags,
            output: String::with_capacity(4096),
            code: CodeBlockState::default(),
            table: TableState::default(),
            image: ImageState::default(),
            image_nesting: 0,
            heading: HeadingState::default(),
            link_stack: Vec::new(),
            footnotes: HashMap::new(),
            in_style: false,
        }
    }

    /// Buffer receiving inline content: the pending heading, or the output.
    fn sink(&mut self) -> &mut String {
        if self.heading.is_active() {
            self.heading.html_buffer()
        } else {
            &mut self.output
        }
    }

    /// Start block content on its own line.
    fn fresh_line(&mut self) {
        if !self.output.is_empty() && !self.output.ends_with('\n') {
            self.output.push('\n');
        }
    }

    fn void_close(&self) -> &'static str {
        if self.flags.contains(RenderFlags::USE_XHTML) {
            " />"
        } else {
            ">"
        }
    }

    fn process_event(&mut self, event: &Event<'_>) -> Result<(), RenderError> {
        if self.image.is_active() {
            self.image_alt_event(event)?;
            return Ok(());
        }

        match event {
            Event::Start(tag) => self.start_tag(tag)?,
            Event::End(tag) => self.end_tag(*tag)?,
            Event::Text(text) => self.text(text),
            Event::Code(code) => self.inline_code(code),
            Event::Html(html) | Event::InlineHtml(html) => self.raw_html(html),
            Event::SoftBreak => self.soft_break(),
            Event::HardBreak => self.line_break(),
            Event::Rule => {
                self.fresh_line();
                let close = self.void_close();
                writeln!(self.output, "<hr{close}")?;
            }
            Event::TaskListMarker(checked) => {
                let checked = if *checked { " checked" } else { "" };
                let close = self.void_close();
                write!(
                    self.sink(),
                    r#"<input type="checkbox"{checked} disabled{close} "#
                )?;
            }
            Event::FootnoteReference(name) => {
                let number = self.footnote_number(name);
                write!(
                    self.sink(),
                    r##"<sup class="footnote-reference"><a href="#{}">{number}</a></sup>"##,
                    escape_html(name)
                )?;
            }
            Event::InlineMath(math) => {
                write!(
                    self.sink(),
                    r#"<span class="math math-inline">{}</span>"#,
                    escape_html(math)
                )?;
            }
            Event::DisplayMath(math) => {
                write!(
                    self.sink(),
                    r#"<span class="math math-display">{}</span>"#,
                    escape_html(math)
                )?;
            }
        }
        Ok(())
    }

    /// Collect alt text: only the text of nested events is kept.
    fn image_alt_event(&mut self, event: &Event<'_>) -> Result<(), RenderError> {
        match event {
            Event::Start(Tag::Image { .. }) => self.image_nesting += 1,
            Event::End(TagEnd::Image) if self.image_nesting > 0 => self.image_nesting -= 1,
            Event::End(TagEnd::Image) => self.end_image()?,
            Event::Text(text)
            | Event::Code(text)
            | Event::InlineMath(text)
            | Event::DisplayMath(text) => self.image.push_str(text),
            Event::SoftBreak | Event::HardBreak => self.image.push_str(" "),
            _ => {}
        }
        Ok(())
    }

    fn start_tag(&mut self, tag: &Tag<'_>) -> Result<(), RenderError> {
        match tag {
            Tag::Paragraph => {
                self.fresh_line();
                self.output.push_str("<p>");
            }
            Tag::Heading { level, .. } => {
                // Opening tag is written in end_tag once the id is known.
                self.fresh_line();
                self.heading.start_heading(heading_level_to_num(*level));
            }
            Tag::BlockQuote(_) => {
                self.fresh_line();
                self.output.push_str("<blockquote>\n");
            }
            Tag::CodeBlock(kind) => {
                let lang = match kind {
                    CodeBlockKind::Fenced(info) => info.split_whitespace().next().map(str::to_owned),
                    CodeBlockKind::Indented => None,
                };
                self.code.start(lang);
            }
            Tag::HtmlBlock => self.fresh_line(),
            Tag::List(start) => {
                self.fresh_line();
                match start {
                    Some(1) => self.output.push_str("<ol>\n"),
                    Some(n) => writeln!(self.output, "<ol start=\"{n}\">")?,
                    None => self.output.push_str("<ul>\n"),
                }
            }
            Tag::Item => {
                self.fresh_line();
                self.output.push_str("<li>");
            }
            Tag::FootnoteDefinition(name) => {
                self.fresh_line();
                let number = self.footnote_number(name);
                write!(
                    self.output,
                    r#"<div class="footnote-definition" id="{}"><sup class="footnote-definition-label">{number}</sup>"#,
                    escape_html(name)
                )?;
            }
            Tag::DefinitionList => {
                self.fresh_line();
                self.output.push_str("<dl>\n");
            }
            Tag::DefinitionListTitle => {
                self.fresh_line();
                self.output.push_str("<dt>");
            }
            Tag::DefinitionListDefinition => {
                self.fresh_line();
                self.output.push_str("<dd>");
            }
            Tag::Table(alignments) => {
                self.table.start(alignments.clone());
                self.fresh_line();
                self.output.push_str("<table>");
            }
            Tag::TableHead => {
                self.table.start_head();
                self.output.push_str("<thead><tr>");
            }
            Tag::TableRow => {
                self.table.start_row();
                self.output.push_str("<tr>");
            }
            Tag::TableCell => {
                let align = self.table.current_alignment_style();
                let tag = if self.table.is_in_head() { "th" } else { "td" };
                write!(self.output, "<{tag}{align}>")?;
            }
            Tag::Emphasis => self.sink().push_str("<em>"),
            Tag::Strong => self.sink().push_str("<strong>"),
            Tag::Strikethrough => self.sink().push_str("<del>"),
            Tag::Superscript => self.sink().push_str("<sup>"),
            Tag::Subscript => self.sink().push_str("<sub>"),
            Tag::Link {
                dest_url, title, ..
            } => self.start_link(dest_url, title)?,
            Tag::Image {
                dest_url, title, ..
            } => {
                // Alt text is collected until the matching end tag.
                self.image.start(dest_url.to_string(), title.to_string());
            }
            Tag::MetadataBlock(_) => {}
        }
        Ok(())
    }

    fn end_tag(&mut self, tag: TagEnd) -> Result<(), RenderError> {
        match tag {
            TagEnd::Paragraph => self.output.push_str("</p>\n"),
            TagEnd::Heading(_) => {
                if let Some((level, id, html)) = self.heading.complete_heading() {
                    if self.flags.contains(RenderFlags::TOC) {
                        writeln!(self.output, "<h{level} id=\"{id}\">{html}</h{level}>")?;
                    } else {
                        writeln!(self.output, "<h{level}>{html}</h{level}>")?;
                    }
                }
            }
            TagEnd::BlockQuote(_) => {
                self.fresh_line();
                self.output.push_str("</blockquote>\n");
            }
            TagEnd::CodeBlock => {
                let (lang, content) = self.code.end();
                self.fresh_line();
                match lang {
                    Some(lang) => write!(
                        self.output,
                        "<pre><code class=\"language-{}\">",
                        escape_html(&lang)
                    )?,
                    None => self.output.push_str("<pre><code>"),
                }
                self.output.push_str(&escape_html(&content));
                self.output.push_str("</code></pre>\n");
            }
            TagEnd::List(ordered) => {
                self.fresh_line();
                self.output
                    .push_str(if ordered { "</ol>\n" } else { "</ul>\n" });
            }
            TagEnd::Item => self.output.push_str("</li>\n"),
            TagEnd::FootnoteDefinition => {
                self.fresh_line();
                self.output.push_str("</div>\n");
            }
            TagEnd::DefinitionList => {
                self.fresh_line();
                self.output.push_str("</dl>\n");
            }
            TagEnd::DefinitionListTitle => self.output.push_str("</dt>\n"),
            TagEnd::DefinitionListDefinition => self.output.push_str("</dd>\n"),
            TagEnd::Table => self.output.push_str("</tbody></table>\n"),
            TagEnd::TableHead => {
                self.output.push_str("</tr></thead><tbody>\n");
                self.table.end_head();
            }
            TagEnd::TableRow => self.output.push_str("</tr>\n"),
            TagEnd::TableCell => {
                self.output.push_str(if self.table.is_in_head() {
                    "</th>"
                } else {
                    "</td>"
                });
                self.table.next_cell();
            }
            TagEnd::Emphasis => self.sink().push_str("</em>"),
            TagEnd::Strong => self.sink().push_str("</strong>"),
            TagEnd::Strikethrough => self.sink().push_str("</del>"),
            TagEnd::Superscript => self.sink().push_str("</sup>"),
            TagEnd::Subscript => self.sink().push_str("</sub>"),
            TagEnd::Link => {
                if self.link_stack.pop().unwrap_or(false) {
                    self.sink().push_str("</a>");
                }
            }
            TagEnd::Image => self.end_image()?,
            TagEnd::HtmlBlock | TagEnd::MetadataBlock(_) => {}
        }
        Ok(())
    }

    fn start_link(&mut self, dest_url: &CowStr<'_>, title: &CowStr<'_>) -> Result<(), RenderError> {
        let render = !self.flags.contains(RenderFlags::SKIP_LINKS)
            && (!self.flags.contains(RenderFlags::SAFELINK) || is_safe_link(dest_url));
        self.link_stack.push(render);
        if !render {
            return Ok(());
        }

        let sink = self.sink();
        write!(sink, r#"<a href="{}""#, escape_html(dest_url))?;
        if !title.is_empty() {
            write!(sink, r#" title="{}""#, escape_html(title))?;
        }
        sink.push('>');
        Ok(())
    }

    fn end_image(&mut self) -> Result<(), RenderError> {
        let Some((src, title, alt)) = self.image.end() else {
            return Ok(());
        };
        if self.flags.contains(RenderFlags::SKIP_IMAGES) {
            return Ok(());
        }

        let close = self.void_close();
        let sink = self.sink();
        write!(
            sink,
            r#"<img src="{}" alt="{}""#,
            escape_html(&src),
            escape_html(&alt)
        )?;
        if !title.is_empty() {
            write!(sink, r#" title="{}""#, escape_html(&title))?;
        }
        sink.push_str(close);
        Ok(())
    }

    fn text(&mut self, text: &str) {
        if self.code.is_active() {
            self.code.push_str(text);
            return;
        }
        if self.heading.is_active() {
            self.heading.push_text(text);
        }
        let escaped = escape_html(text);
        self.sink().push_str(&escaped);
    }

    fn inline_code(&mut self, code: &str) {
        if self.heading.is_active() {
            self.heading.push_text(code);
        }
        let escaped = escape_html(code);
        let sink = self.sink();
        sink.push_str("<code>");
        sink.push_str(&escaped);
        sink.push_str("</code>");
    }

    fn raw_html(&mut self, html: &str) {
        // Escaping wins over skipping.
        if self.flags.contains(RenderFlags::ESCAPE) {
            let escaped = escape_html(html);
            self.sink().push_str(&escaped);
            return;
        }
        if self.flags.contains(RenderFlags::SKIP_HTML) {
            return;
        }
        if self.flags.contains(RenderFlags::SKIP_STYLE) && self.is_style_html(html) {
            return;
        }
        self.sink().push_str(html);
    }

    /// Track `<style>` elements across raw HTML events.
    ///
    /// Returns `true` while the event belongs to a style element.
    fn is_style_html(&mut self, html: &str) -> bool {
        let lower = html.to_ascii_lowercase();
        if self.in_style {
            if lower.contains("</style") {
                self.in_style = false;
            }
            return true;
        }
        if lower.trim_start().starts_with("<style") {
            self.in_style = !lower.contains("</style");
            return true;
        }
        false
    }

    fn soft_break(&mut self) {
        if self.flags.contains(RenderFlags::HARD_WRAP) {
            self.line_break();
        } else {
            self.sink().push('\n');
        }
    }

    fn line_break(&mut self) {
        let close = self.void_close();
        let sink = self.sink();
        sink.push_str("<br");
        sink.push_str(close);
        sink.push('\n');
    }

    fn footnote_number(&mut self, name: &str) -> usize {
        let next = self.footnotes.len() + 1;
        *self.footnotes.entry(name.to_owned()).or_insert(next)
    }
}

/// Whether a link target uses a scheme safe to emit as an anchor.
///
/// Relative and fragment links carry no scheme and are always safe.
fn is_safe_link(url: &str) -> bool {
    const SAFE_SCHEMES: &[&str] = &["http:", "https:", "ftp:", "mailto:"];

    let lower = url.trim().to_ascii_lowercase();
    match lower.find([':', '/', '?', '#']) {
        Some(pos) if lower.as_bytes()[pos] == b':' => {
            SAFE_SCHEMES.iter().any(|scheme| lower.starts_with(scheme))
        }
        _ => true,
    }
}

/// Convert heading level enum to number (1-6).
fn heading_level_to_num(level: HeadingLevel) -> u8 {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        HeadingLevel::H4 => 4,
        HeadingLevel::H5 => 5,
        HeadingLevel::H6 => 6,
    }
}
