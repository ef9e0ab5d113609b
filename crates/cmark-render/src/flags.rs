//! Extension and render flag bitmasks.
//!
//! [`Extensions`] select Markdown dialect features at parse time,
//! [`RenderFlags`] select HTML output behaviour. Both are plain `u32`
//! bitmasks so callers can combine them with `|` and pass them around by value.

use bitflags::bitflags;
use pulldown_cmark::Options;

bitflags! {
    /// Markdown dialect features applied while parsing.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Extensions: u32 {
        /// Bare `http://`, `https://` and `www.` URLs become links.
        const AUTOLINK = 1 << 0;
        /// Fenced code blocks.
        const FENCED_CODE = 1 << 1;
        /// `*` emphasis opened right after a letter or digit stays literal.
        const NO_INTRA_EMPHASIS = 1 << 2;
        /// Headings require a space after the `#` markers.
        const SPACE_HEADERS = 1 << 3;
        /// `~~deleted~~` text.
        const STRIKETHROUGH = 1 << 4;
        /// `^superscript^` text.
        const SUPERSCRIPT = 1 << 5;
        /// Pipe tables.
        const TABLES = 1 << 6;
        /// `$inline$` and `$$display$$` math.
        const MATH = 1 << 7;
        /// `[^note]` footnotes.
        const FOOTNOTES = 1 << 8;
        /// `_underline_` text. Not rendered by [`HtmlRenderer`](crate::HtmlRenderer).
        const UNDERLINE = 1 << 9;
        /// Math only with explicit delimiters. Parsed like [`MATH`](Self::MATH).
        const MATH_EXPLICIT = 1 << 10;
        /// Indented blocks are parsed as ordinary Markdown instead of code.
        const DISABLE_INDENTED_CODE = 1 << 11;
        /// `==highlighted==` text. Not rendered by [`HtmlRenderer`](crate::HtmlRenderer).
        const HIGHLIGHT = 1 << 12;
        /// `"quoted"` text as `<q>`. Not rendered by [`HtmlRenderer`](crate::HtmlRenderer).
        const QUOTE = 1 << 13;
    }
}

bitflags! {
    /// HTML output behaviour of the default renderer.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct RenderFlags: u32 {
        /// Raw HTML is escaped and shown as text.
        const ESCAPE = 1 << 0;
        /// Soft line breaks become `<br>`.
        const HARD_WRAP = 1 << 1;
        /// Raw HTML is dropped.
        const SKIP_HTML = 1 << 2;
        /// Void elements are self-closing (`<br />`).
        const USE_XHTML = 1 << 3;
        /// Links with unsafe schemes are rendered as plain text.
        const SAFELINK = 1 << 4;
        /// Links are rendered as plain text.
        const SKIP_LINKS = 1 << 5;
        /// Images are dropped.
        const SKIP_IMAGES = 1 << 6;
        /// Raw `<style>` elements are dropped.
        const SKIP_STYLE = 1 << 7;
        /// Headings get unique anchor ids.
        const TOC = 1 << 8;
    }
}

impl Extensions {
    /// Parser options for the extensions `pulldown-cmark` implements natively.
    ///
    /// The remaining extensions are either CommonMark behaviour that is always
    /// on (`FENCED_CODE`, `SPACE_HEADERS`), event transforms applied in
    /// [`parse`](crate::parse), or carried through unchanged for custom
    /// renderers.
    #[must_use]
    pub fn parser_options(self) -> Options {
        let mut options = Options::empty();
        options.set(Options::ENABLE_TABLES, self.contains(Self::TABLES));
        options.set(
            Options::ENABLE_STRIKETHROUGH,
            self.contains(Self::STRIKETHROUGH),
        );
        options.set(Options::ENABLE_SUPERSCRIPT, self.contains(Self::SUPERSCRIPT));
        options.set(Options::ENABLE_FOOTNOTES, self.contains(Self::FOOTNOTES));
        options.set(
            Options::ENABLE_MATH,
            self.intersects(Self::MATH | Self::MATH_EXPLICIT),
        );
        options
    }
}
