//! Translation of named options into renderer bitmasks.

use cmark_render::{Extensions, RenderFlags};

use crate::options::OptionSet;

/// Option names selecting parser extensions.
///
/// `no_indented_code` is a synonym of `disable_indented_code`.
pub const EXTENSION_ALIASES: &[(&str, Extensions)] = &[
    ("autolink", Extensions::AUTOLINK),
    ("fenced_code", Extensions::FENCED_CODE),
    ("no_intra_emphasis", Extensions::NO_INTRA_EMPHASIS),
    ("space_headers", Extensions::SPACE_HEADERS),
    ("strikethrough", Extensions::STRIKETHROUGH),
    ("superscript", Extensions::SUPERSCRIPT),
    ("tables", Extensions::TABLES),
    ("math", Extensions::MATH),
    ("footnotes", Extensions::FOOTNOTES),
    ("underline", Extensions::UNDERLINE),
    ("math_explicit", Extensions::MATH_EXPLICIT),
    ("disable_indented_code", Extensions::DISABLE_INDENTED_CODE),
    ("no_indented_code", Extensions::DISABLE_INDENTED_CODE),
    ("highlight", Extensions::HIGHLIGHT),
    ("quote", Extensions::QUOTE),
];

/// Option names selecting HTML render flags.
///
/// Synonyms share a bit: `wrap`, `no_html`, `xhtml`, `no_links`, `no_images`
/// and `no_style`.
pub const RENDER_FLAG_ALIASES: &[(&str, RenderFlags)] = &[
    ("escape", RenderFlags::ESCAPE),
    ("hard_wrap", RenderFlags::HARD_WRAP),
    ("wrap", RenderFlags::HARD_WRAP),
    ("skip_html", RenderFlags::SKIP_HTML),
    ("no_html", RenderFlags::SKIP_HTML),
    ("use_xhtml", RenderFlags::USE_XHTML),
    ("xhtml", RenderFlags::USE_XHTML),
    ("safelink", RenderFlags::SAFELINK),
    ("skip_links", RenderFlags::SKIP_LINKS),
    ("no_links", RenderFlags::SKIP_LINKS),
    ("skip_images", RenderFlags::SKIP_IMAGES),
    ("no_images", RenderFlags::SKIP_IMAGES),
    ("skip_style", RenderFlags::SKIP_STYLE),
    ("no_style", RenderFlags::SKIP_STYLE),
    ("toc", RenderFlags::TOC),
];

/// Options read by the render facade rather than the alias tables.
const FACADE_OPTIONS: &[&str] = &["smartypants"];

/// Compute the extension and render-flag masks for a set of options.
///
/// An entry's bit is set when its name is `true`, or, for a `no_X` entry,
/// when `X` is explicitly `false`. Names found in neither table are ignored.
///
/// # Example
///
/// ```
/// use cmark_filter::{OptionSet, make_flags};
/// use cmark_render::{Extensions, RenderFlags};
///
/// let options = OptionSet::new().with("tables", true).with("html", false);
/// assert_eq!(
///     make_flags(&options),
///     (Extensions::TABLES, RenderFlags::SKIP_HTML)
/// );
/// ```
#[must_use]
pub fn make_flags(options: &OptionSet) -> (Extensions, RenderFlags) {
    (
        translate(EXTENSION_ALIASES, options),
        translate(RENDER_FLAG_ALIASES, options),
    )
}

/// OR together the bits of every table entry selected by `options`.
#[must_use]
pub fn translate<F>(table: &[(&str, F)], options: &OptionSet) -> F
where
    F: bitflags::Flags + Copy,
{
    let mut mask = F::empty();
    for &(name, bit) in table {
        if options.is_true(name) {
            mask.insert(bit);
        }
        if let Some(base) = name.strip_prefix("no_")
            && options.is_false(base)
        {
            mask.insert(bit);
        }
    }
    mask
}

/// Whether an option name has any effect.
///
/// True for alias table names, for the base `X` of a `no_X` entry and for
/// options read by the render facade such as `smartypants`.
#[must_use]
pub fn is_recognized(name: &str) -> bool {
    FACADE_OPTIONS.contains(&name)
        || table_recognizes(EXTENSION_ALIASES, name)
        || table_recognizes(RENDER_FLAG_ALIASES, name)
}

fn table_recognizes<F>(table: &[(&str, F)], name: &str) -> bool {
    table
        .iter()
        .any(|&(entry, _)| entry == name || entry.strip_prefix("no_") == Some(name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn options(pairs: &[(&str, bool)]) -> OptionSet {
        pairs.iter().copied().collect()
    }

    #[test]
    fn test_empty_options() {
        assert_eq!(
            make_flags(&OptionSet::new()),
            (Extensions::empty(), RenderFlags::empty())
        );
    }

    #[test]
    fn test_one_extension() {
        assert_eq!(
            make_flags(&options(&[("autolink", true)])),
            (Extensions::AUTOLINK, RenderFlags::empty())
        );
    }

    #[test]
    fn test_two_extensions() {
        assert_eq!(
            make_flags(&options(&[("fenced_code", true), ("tables", true)])),
            (
                Extensions::FENCED_CODE | Extensions::TABLES,
                RenderFlags::empty()
            )
        );
    }

    #[test]
    fn test_one_render_flag() {
        assert_eq!(
            make_flags(&options(&[("escape", true)])),
            (Extensions::empty(), RenderFlags::ESCAPE)
        );
    }

    #[test]
    fn test_two_render_flags() {
        assert_eq!(
            make_flags(&options(&[("wrap", true), ("safelink", true)])),
            (
                Extensions::empty(),
                RenderFlags::HARD_WRAP | RenderFlags::SAFELINK
            )
        );
    }

    #[test]
    fn test_extension_and_render_flag() {
        assert_eq!(
            make_flags(&options(&[("no_intra_emphasis", true), ("no_html", true)])),
            (Extensions::NO_INTRA_EMPHASIS, RenderFlags::SKIP_HTML)
        );
    }

    #[test]
    fn test_two_extensions_two_render_flags() {
        let opts = options(&[
            ("autolink", true),
            ("strikethrough", true),
            ("no_links", true),
            ("no_style", true),
        ]);
        assert_eq!(
            make_flags(&opts),
            (
                Extensions::AUTOLINK | Extensions::STRIKETHROUGH,
                RenderFlags::SKIP_LINKS | RenderFlags::SKIP_STYLE
            )
        );
    }

    #[test]
    fn test_inverse_extension() {
        assert_eq!(
            make_flags(&options(&[("intra_emphasis", false)])),
            (Extensions::NO_INTRA_EMPHASIS, RenderFlags::empty())
        );
        assert_eq!(
            make_flags(&options(&[("indented_code", false)])),
            (Extensions::DISABLE_INDENTED_CODE, RenderFlags::empty())
        );
    }

    #[test]
    fn test_inverse_render_flag() {
        assert_eq!(
            make_flags(&options(&[("style", false)])),
            (Extensions::empty(), RenderFlags::SKIP_STYLE)
        );
        assert_eq!(
            make_flags(&options(&[("html", false)])),
            (Extensions::empty(), RenderFlags::SKIP_HTML)
        );
    }

    #[test]
    fn test_negation_requires_explicit_false() {
        // true or unset base names never negate
        let mut opts = options(&[("intra_emphasis", true)]);
        opts.insert("html", None);
        assert_eq!(
            make_flags(&opts),
            (Extensions::empty(), RenderFlags::empty())
        );
    }

    #[test]
    fn test_unset_value_is_inert() {
        let mut opts = OptionSet::new();
        opts.insert("tables", None);
        opts.insert("escape", None);
        assert_eq!(
            make_flags(&opts),
            (Extensions::empty(), RenderFlags::empty())
        );
    }

    #[test]
    fn test_false_value_sets_nothing() {
        assert_eq!(
            make_flags(&options(&[("tables", false), ("escape", false)])),
            (Extensions::empty(), RenderFlags::empty())
        );
    }

    #[test]
    fn test_undefined_option() {
        assert_eq!(
            make_flags(&options(&[("stupid_option", true)])),
            (Extensions::empty(), RenderFlags::empty())
        );
    }

    #[test]
    fn test_defined_and_undefined_options() {
        assert_eq!(
            make_flags(&options(&[("stupid_option", true), ("wrap", true)])),
            (Extensions::empty(), RenderFlags::HARD_WRAP)
        );
    }

    #[test]
    fn test_synonym_conflict_or_dominates() {
        assert_eq!(
            make_flags(&options(&[("hard_wrap", true), ("wrap", false)])),
            (Extensions::empty(), RenderFlags::HARD_WRAP)
        );
        assert_eq!(
            make_flags(&options(&[("skip_html", false), ("html", false)])),
            (Extensions::empty(), RenderFlags::SKIP_HTML)
        );
    }

    #[test]
    fn test_every_alias_sets_its_bit() {
        for &(name, bit) in EXTENSION_ALIASES {
            assert_eq!(
                make_flags(&options(&[(name, true)])),
                (bit, RenderFlags::empty()),
                "extension alias {name}"
            );
        }
        for &(name, bit) in RENDER_FLAG_ALIASES {
            assert_eq!(
                make_flags(&options(&[(name, true)])),
                (Extensions::empty(), bit),
                "render flag alias {name}"
            );
        }
    }

    #[test]
    fn test_every_negation_sets_its_bit() {
        for &(name, bit) in EXTENSION_ALIASES {
            if let Some(base) = name.strip_prefix("no_") {
                assert_eq!(make_flags(&options(&[(base, false)])).0, bit, "{base}");
            }
        }
        for &(name, bit) in RENDER_FLAG_ALIASES {
            if let Some(base) = name.strip_prefix("no_") {
                assert_eq!(make_flags(&options(&[(base, false)])).1, bit, "{base}");
            }
        }
    }

    #[test]
    fn test_distinct_names_have_distinct_bits() {
        fn check<F: bitflags::Flags + Copy + PartialEq>(table: &[(&str, F)], synonyms: &[(&str, &str)]) {
            for (i, &(a, bit_a)) in table.iter().enumerate() {
                for &(b, bit_b) in &table[i + 1..] {
                    let synonym = synonyms
                        .iter()
                        .any(|&(x, y)| (x, y) == (a, b) || (x, y) == (b, a));
                    assert_eq!(bit_a == bit_b, synonym, "{a} vs {b}");
                }
            }
        }

        check(
            EXTENSION_ALIASES,
            &[("disable_indented_code", "no_indented_code")],
        );
        check(
            RENDER_FLAG_ALIASES,
            &[
                ("hard_wrap", "wrap"),
                ("skip_html", "no_html"),
                ("use_xhtml", "xhtml"),
                ("skip_links", "no_links"),
                ("skip_images", "no_images"),
                ("skip_style", "no_style"),
            ],
        );
    }

    #[test]
    fn test_table_order_does_not_change_masks() {
        fn orderings<F: Copy>(table: &[(&'static str, F)]) -> Vec<Vec<(&'static str, F)>> {
            let mut reversed = table.to_vec();
            reversed.reverse();
            let mut all = vec![reversed];
            for shift in [1, table.len() / 2, table.len() - 1] {
                let mut rotated = table.to_vec();
                rotated.rotate_left(shift);
                all.push(rotated);
            }
            all
        }

        let mut with_unset = options(&[("tables", true)]);
        with_unset.insert("html", None);
        let option_sets = [
            OptionSet::new(),
            options(&[("autolink", true), ("tables", true), ("wrap", true)]),
            options(&[("intra_emphasis", false), ("html", false), ("style", false)]),
            options(&[("hard_wrap", true), ("wrap", false)]),
            options(&[("skip_html", false), ("html", false), ("no_links", true)]),
            options(&[("indented_code", false), ("no_indented_code", false)]),
            options(&[("stupid_option", true), ("images", false), ("xhtml", true)]),
            with_unset,
        ];

        for opts in &option_sets {
            let extensions = translate(EXTENSION_ALIASES, opts);
            for table in orderings(EXTENSION_ALIASES) {
                assert_eq!(translate(&table, opts), extensions, "{opts:?}");
            }
            let flags = translate(RENDER_FLAG_ALIASES, opts);
            for table in orderings(RENDER_FLAG_ALIASES) {
                assert_eq!(translate(&table, opts), flags, "{opts:?}");
            }
        }
    }

    #[test]
    fn test_is_recognized() {
        assert!(is_recognized("tables"));
        assert!(is_recognized("no_html"));
        assert!(is_recognized("html"));
        assert!(is_recognized("intra_emphasis"));
        assert!(is_recognized("smartypants"));
        assert!(!is_recognized("stupid_option"));
        assert!(!is_recognized("no_tables"));
    }
}
