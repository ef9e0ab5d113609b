//! Renderer capability and the parser-bound [`Markdown`] driver.

use std::sync::Arc;

use crate::document::{Document, parse};
use crate::error::RenderError;
use crate::flags::{Extensions, RenderFlags};
use crate::html::HtmlRenderer;

/// Turns a parsed document into output text.
///
/// [`HtmlRenderer`] is the built-in implementation. Custom renderers receive
/// the same event stream and decide the output format themselves.
///
/// # Example
///
/// ```
/// use cmark_render::{Document, Extensions, Markdown, RenderError, Renderer};
///
/// struct EventCount;
///
/// impl Renderer for EventCount {
///     fn render(&self, document: &Document<'_>) -> Result<String, RenderError> {
///         Ok(document.events().len().to_string())
///     }
/// }
///
/// let output = Markdown::new(EventCount, Extensions::empty())
///     .render("*a*")
///     .unwrap();
/// assert_eq!(output, "5");
/// ```
pub trait Renderer: Send + Sync {
    /// Render a document.
    ///
    /// # Errors
    ///
    /// Returns an error if the renderer cannot produce output for the document.
    fn render(&self, document: &Document<'_>) -> Result<String, RenderError>;
}

impl<R: Renderer + ?Sized> Renderer for &R {
    fn render(&self, document: &Document<'_>) -> Result<String, RenderError> {
        (**self).render(document)
    }
}

impl<R: Renderer + ?Sized> Renderer for Box<R> {
    fn render(&self, document: &Document<'_>) -> Result<String, RenderError> {
        (**self).render(document)
    }
}

impl<R: Renderer + ?Sized> Renderer for Arc<R> {
    fn render(&self, document: &Document<'_>) -> Result<String, RenderError> {
        (**self).render(document)
    }
}

/// A parser bound to a renderer and a set of extensions.
#[derive(Clone, Debug)]
pub struct Markdown<R> {
    renderer: R,
    extensions: Extensions,
}

impl<R: Renderer> Markdown<R> {
    #[must_use]
    pub fn new(renderer: R, extensions: Extensions) -> Self {
        Self {
            renderer,
            extensions,
        }
    }

    #[must_use]
    pub fn extensions(&self) -> Extensions {
        self.extensions
    }

    /// Parse `text` with the bound extensions and render it.
    ///
    /// # Errors
    ///
    /// Propagates the renderer's error.
    pub fn render(&self, text: &str) -> Result<String, RenderError> {
        let document = parse(text, self.extensions);
        self.renderer.render(&document)
    }
}

/// Render Markdown to HTML with the built-in renderer.
///
/// # Example
///
/// ```
/// use cmark_render::{Extensions, RenderFlags, html};
///
/// let output = html("This is *markdown*", Extensions::empty(), RenderFlags::empty()).unwrap();
/// assert_eq!(output, "<p>This is <em>markdown</em></p>\n");
/// ```
///
/// # Errors
///
/// Returns an error if writing the output fails.
pub fn html(text: &str, extensions: Extensions, flags: RenderFlags) -> Result<String, RenderError> {
    Markdown::new(HtmlRenderer::new(flags), extensions).render(text)
}
