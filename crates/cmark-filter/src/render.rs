//! Function form of the Markdown filter.

use cmark_render::{Markdown, RenderError, Renderer, html, smartypants};
use serde::{Deserialize, Serialize};

use crate::flags::make_flags;
use crate::markup::Markup;
use crate::options::OptionSet;

/// Which render paths the `smartypants` option applies to.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SmartypantsScope {
    /// Post-process output of the built-in and custom renderers.
    #[default]
    #[serde(rename = "all")]
    AllRenderers,
    /// Post-process output of the built-in renderer only.
    #[serde(rename = "default-renderer")]
    DefaultRendererOnly,
}

/// Render Markdown text to safe HTML markup.
///
/// Options are translated with [`make_flags`]. With a custom `renderer` the
/// text is parsed with the extension mask and handed to it; render flags only
/// apply to the built-in renderer. When `smartypants` is `true` the output is
/// passed through [`smartypants`].
///
/// # Example
///
/// ```
/// use cmark_filter::{OptionSet, markdown};
///
/// let options = OptionSet::new().with("smartypants", true);
/// let markup = markdown("Don't call me Shirley", None, &options).unwrap();
/// assert_eq!(markup, "<p>Don&rsquo;t call me Shirley</p>\n");
/// ```
///
/// # Errors
///
/// Returns the renderer's error unchanged.
pub fn markdown(
    text: &str,
    renderer: Option<&dyn Renderer>,
    options: &OptionSet,
) -> Result<Markup, RenderError> {
    render_with_scope(text, renderer, options, SmartypantsScope::default())
}

/// [`markdown`] with an explicit smartypants scope.
///
/// # Errors
///
/// Returns the renderer's error unchanged.
pub fn render_with_scope(
    text: &str,
    renderer: Option<&dyn Renderer>,
    options: &OptionSet,
    scope: SmartypantsScope,
) -> Result<Markup, RenderError> {
    let (extensions, flags) = make_flags(options);
    tracing::debug!(
        extensions = extensions.bits(),
        render_flags = flags.bits(),
        custom_renderer = renderer.is_some(),
        "Rendering markdown"
    );

    let output = match renderer {
        Some(renderer) => Markdown::new(renderer, extensions).render(text)?,
        None => html(text, extensions, flags)?,
    };

    let post_process = match scope {
        SmartypantsScope::AllRenderers => true,
        SmartypantsScope::DefaultRendererOnly => renderer.is_none(),
    };
    if post_process && options.is_true("smartypants") {
        return Ok(Markup::new(smartypants(&output)));
    }
    Ok(Markup::new(output))
}

#[cfg(test)]
mod tests {
    use super::*;
    use cmark_render::{Document, Extensions};
    use pretty_assertions::assert_eq;

    /// Emits fixed text containing quotes and dashes.
    struct Fixed;

    impl Renderer for Fixed {
        fn render(&self, _document: &Document<'_>) -> Result<String, RenderError> {
            Ok("\"quoted\" -- text".to_owned())
        }
    }

    /// Reports the extension mask it was given.
    struct ExtensionBits;

    impl Renderer for ExtensionBits {
        fn render(&self, document: &Document<'_>) -> Result<String, RenderError> {
            Ok(document.extensions().bits().to_string())
        }
    }

    struct Failing;

    impl Renderer for Failing {
        fn render(&self, _document: &Document<'_>) -> Result<String, RenderError> {
            Err(RenderError::Renderer("boom".to_owned()))
        }
    }

    #[test]
    fn test_render_defaults() {
        let markup = markdown("This is *markdown*", None, &OptionSet::new()).unwrap();
        assert_eq!(markup, "<p>This is <em>markdown</em></p>\n");
    }

    #[test]
    fn test_render_strikethrough() {
        let options = OptionSet::new().with("strikethrough", true);
        let markup = markdown("That's ~~wrong~~ right!", None, &options).unwrap();
        assert!(markup.contains("<del>wrong</del>"));
    }

    #[test]
    fn test_render_without_strikethrough() {
        let markup = markdown("That's ~~wrong~~ right!", None, &OptionSet::new()).unwrap();
        assert!(!markup.contains("<del>"));
    }

    #[test]
    fn test_render_no_intra_emphasis() {
        let options = OptionSet::new().with("intra_emphasis", false);
        let markup = markdown("foo_bar_baz", None, &options).unwrap();
        assert_eq!(markup, "<p>foo_bar_baz</p>\n");

        for options in [
            OptionSet::new().with("intra_emphasis", false),
            OptionSet::new().with("no_intra_emphasis", true),
        ] {
            let markup = markdown("foo*bar*baz", None, &options).unwrap();
            assert_eq!(markup, "<p>foo*bar*baz</p>\n");
        }
        let markup = markdown("foo*bar*baz", None, &OptionSet::new()).unwrap();
        assert_eq!(markup, "<p>foo<em>bar</em>baz</p>\n");
    }

    #[test]
    fn test_render_without_indented_code() {
        let options = OptionSet::new().with("indented_code", false);
        let markup = markdown("    *a* and text", None, &options).unwrap();
        assert_eq!(markup, "<p><em>a</em> and text</p>\n");
    }

    #[test]
    fn test_render_smartypants() {
        let options = OptionSet::new().with("smartypants", true);
        let markup = markdown("Don't call me Shirley", None, &options).unwrap();
        assert_eq!(markup, "<p>Don&rsquo;t call me Shirley</p>\n");
    }

    #[test]
    fn test_render_smartypants_false() {
        let options = OptionSet::new().with("smartypants", false);
        let markup = markdown("Don't call me Shirley", None, &options).unwrap();
        assert_eq!(markup, "<p>Don't call me Shirley</p>\n");
    }

    #[test]
    fn test_render_flags_applied() {
        let options = OptionSet::new().with("wrap", true).with("html", false);
        let markup = markdown("a <b>x</b>\nb", None, &options).unwrap();
        assert_eq!(markup, "<p>a x<br>\nb</p>\n");
    }

    #[test]
    fn test_custom_renderer_gets_extensions_only() {
        let options = OptionSet::new().with("tables", true).with("escape", true);
        let markup = markdown("text", Some(&ExtensionBits), &options).unwrap();
        assert_eq!(markup, Extensions::TABLES.bits().to_string().as_str());
    }

    #[test]
    fn test_custom_renderer_smartypants_all_renderers() {
        let options = OptionSet::new().with("smartypants", true);
        let markup = markdown("ignored", Some(&Fixed), &options).unwrap();
        assert_eq!(markup, "&ldquo;quoted&rdquo; &ndash; text");
    }

    #[test]
    fn test_custom_renderer_smartypants_default_renderer_only() {
        let options = OptionSet::new().with("smartypants", true);
        let markup = render_with_scope(
            "ignored",
            Some(&Fixed),
            &options,
            SmartypantsScope::DefaultRendererOnly,
        )
        .unwrap();
        assert_eq!(markup, "\"quoted\" -- text");

        // the built-in renderer is still post-processed
        let markup = render_with_scope(
            "Don't",
            None,
            &options,
            SmartypantsScope::DefaultRendererOnly,
        )
        .unwrap();
        assert_eq!(markup, "<p>Don&rsquo;t</p>\n");
    }

    #[test]
    fn test_renderer_error_propagates() {
        let err = markdown("text", Some(&Failing), &OptionSet::new()).unwrap_err();
        assert!(matches!(err, RenderError::Renderer(msg) if msg == "boom"));
    }

    #[test]
    fn test_scope_from_toml() {
        #[derive(Deserialize)]
        struct Wrapper {
            scope: SmartypantsScope,
        }

        let all: Wrapper = toml::from_str(r#"scope = "all""#).unwrap();
        assert_eq!(all.scope, SmartypantsScope::AllRenderers);
        let default_only: Wrapper = toml::from_str(r#"scope = "default-renderer""#).unwrap();
        assert_eq!(default_only.scope, SmartypantsScope::DefaultRendererOnly);
        assert!(toml::from_str::<Wrapper>(r#"scope = "custom""#).is_err());
    }
}
