//! Media-query breakpoint rewriting over minified CSS text.
//!
//! No CSS parser is involved. Every `@media` clause (the text between `@media` and the
//! following `{`) is scanned for `width:<ws*><N>px` and `N` is swapped when it is one of
//! the built-in boundaries of a customized tier. Everything outside those clauses is
//! copied byte for byte.

use rebreak_domain::breakpoints::{ResolvedBreakpoints, Tier};
use regex::{Captures, Regex};
use std::borrow::Cow;
use std::sync::LazyLock;
use tracing::debug;

const MEDIA: &str = "@media";

static MEDIA_WIDTH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"width:\s*(\d+)px").expect("media width pattern is valid"));

/// Replaces the `@media tablet` / `@media mobile` placeholders with the canonical queries.
///
/// The expansion always uses the built-in widths; [`adjust`] retargets them afterwards.
pub fn expand_shortcuts(css: &str) -> Cow<'_, str> {
    let mut css = Cow::Borrowed(css);
    for tier in Tier::ALL {
        if css.contains(tier.shortcut()) {
            css = Cow::Owned(css.replace(tier.shortcut(), tier.expansion()));
        }
    }
    css
}

/// Rewrites built-in breakpoint boundaries inside `@media` clauses to the resolved values.
///
/// Returns [`Cow::Borrowed`] whenever nothing changed, which is always the case when no
/// tier is customized or both values literally equal the built-in `1024` / `768`.
/// Tiers that are not customized are never touched.
///
/// For a customized tier two boundaries move:
/// - the exact boundary (`1024px`) becomes the configured value, written verbatim;
/// - the lower boundary (`1023px`) becomes the configured value minus one.
///
/// Each boundary is only considered if the text contains it as `width: Npx)` or
/// `width:Npx)`. All boundaries are rewritten in one pass, so a new tablet value that
/// happens to equal a built-in mobile width is never rewritten again. A customized tier
/// whose value equals its built-in width still goes through the pass, which drops the
/// space after the colon (`min-width: 1024px` becomes `min-width:1024px`).
///
/// # Example
/// ```rust
/// use rebreak_breakpoints::engine::adjust;
/// use rebreak_domain::breakpoints::{Breakpoints, ResolvedBreakpoints, Tiers};
///
/// let resolved = ResolvedBreakpoints::new(Breakpoints::new("1200", "768"), Tiers::TABLET);
/// let css = ".a{width:1024px}@media (min-width: 1024px){.a{color:red}}";
///
/// assert_eq!(
///     adjust(css, &resolved),
///     ".a{width:1024px}@media (min-width:1200px){.a{color:red}}"
/// );
/// ```
pub fn adjust<'a>(css: &'a str, breakpoints: &ResolvedBreakpoints) -> Cow<'a, str> {
    if !breakpoints.has_custom_breakpoints() || breakpoints.matches_builtin() {
        return Cow::Borrowed(css);
    }

    let boundaries = active_boundaries(css, breakpoints);
    if boundaries.is_empty() {
        return Cow::Borrowed(css);
    }

    debug!(?boundaries, "Rewriting media query breakpoints");
    rewrite_media_clauses(css, &boundaries)
}

/// One `from -> to` pixel substitution.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Boundary {
    from: String,
    to: String,
}

fn active_boundaries(css: &str, breakpoints: &ResolvedBreakpoints) -> Vec<Boundary> {
    let mut boundaries = Vec::with_capacity(4);

    for tier in Tier::ALL {
        let value = breakpoints.get(tier);
        let builtin = tier.builtin();

        if !breakpoints.custom_tiers().contains(tier.flag()) || value.is_empty() {
            continue;
        }

        if probe(css, builtin) {
            boundaries.push(Boundary { from: builtin.to_string(), to: value.to_owned() });
        }

        let lower = builtin - 1;
        if probe(css, lower) {
            match leading_integer(value) {
                Some(number) => {
                    boundaries.push(Boundary { from: lower.to_string(), to: (number - 1).to_string() });
                },
                None => {
                    debug!(%tier, value, "Breakpoint is not numeric, lower boundary left as is");
                },
            }
        }
    }

    boundaries
}

/// Cheap containment check for both minified spellings of a boundary.
fn probe(css: &str, width: u32) -> bool {
    css.contains(&format!("width: {width}px)")) || css.contains(&format!("width:{width}px)"))
}

/// Leading decimal integer of `value`, ignoring surrounding whitespace (`"1200.5"` -> 1200).
fn leading_integer(value: &str) -> Option<i64> {
    let value = value.trim();
    let digits = value.bytes().take_while(u8::is_ascii_digit).count();
    value[..digits].parse().ok()
}

fn rewrite_media_clauses<'a>(css: &'a str, boundaries: &[Boundary]) -> Cow<'a, str> {
    let mut output = String::new();
    let mut copied = 0;
    let mut changed = false;

    for (start, _) in css.match_indices(MEDIA) {
        let clause_start = start + MEDIA.len();
        if clause_start <= copied {
            continue;
        }

        let clause_end = css[clause_start..].find('{').map_or(css.len(), |offset| clause_start + offset);
        let clause = &css[clause_start..clause_end];

        let rewritten = MEDIA_WIDTH.replace_all(clause, |caps: &Captures<'_>| {
            boundaries
                .iter()
                .find(|boundary| boundary.from == caps[1])
                .map_or_else(|| caps[0].to_owned(), |boundary| format!("width:{}px", boundary.to))
        });

        if rewritten != clause {
            output.push_str(&css[copied..clause_start]);
            output.push_str(&rewritten);
            copied = clause_end;
            changed = true;
        }
    }

    if !changed {
        return Cow::Borrowed(css);
    }

    output.push_str(&css[copied..]);
    Cow::Owned(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rebreak_domain::breakpoints::{Breakpoints, Tiers};

    fn custom(tablet: &str, mobile: &str) -> ResolvedBreakpoints {
        let values = Breakpoints::new(tablet, mobile);
        let mut custom = Tiers::empty();
        for tier in Tier::ALL {
            if values.get(tier) != tier.builtin().to_string() {
                custom |= tier.flag();
            }
        }
        ResolvedBreakpoints::new(values, custom)
    }

    #[test]
    fn shortcuts_expand_every_occurrence() {
        let css = "@media tablet{a{b:1}}@media mobile{c{d:2}}@media tablet{e{f:3}}";
        assert_eq!(
            expand_shortcuts(css),
            "@media only screen and (max-width: 1024px){a{b:1}}\
             @media only screen and (max-width: 768px){c{d:2}}\
             @media only screen and (max-width: 1024px){e{f:3}}"
        );
        assert!(matches!(expand_shortcuts("@media print{}"), Cow::Borrowed(_)));
    }

    #[test]
    fn uncustomized_input_is_borrowed() {
        let css = "@media (min-width:1024px){x:1}";
        assert!(matches!(adjust(css, &ResolvedBreakpoints::builtin()), Cow::Borrowed(_)));

        let literal = ResolvedBreakpoints::new(Breakpoints::builtin(), Tiers::all());
        assert!(matches!(adjust(css, &literal), Cow::Borrowed(_)));
    }

    #[test]
    fn probe_requires_closing_paren() {
        assert!(probe("@media (min-width: 1024px){", 1024));
        assert!(probe("@media (min-width:1024px) and (x)", 1024));
        assert!(!probe("@media (min-width:1024px and", 1024));
        assert!(!probe(".a{width:1024px}", 1024));
    }

    #[test]
    fn leading_integer_parsing() {
        assert_eq!(leading_integer("1200"), Some(1200));
        assert_eq!(leading_integer(" 900 "), Some(900));
        assert_eq!(leading_integer("1200.5"), Some(1200));
        assert_eq!(leading_integer("abc"), None);
        assert_eq!(leading_integer(""), None);
    }

    #[test]
    fn non_numeric_value_rewrites_exact_boundary_only() {
        let css = "@media (min-width:1024px){a:1}@media (max-width:1023px){b:2}";
        assert_eq!(
            adjust(css, &custom("wide", "768")),
            "@media (min-width:widepx){a:1}@media (max-width:1023px){b:2}"
        );
    }

    #[test]
    fn tablet_value_equal_to_mobile_default_is_not_rewritten_twice() {
        let css = "@media (min-width:1024px){a:1}@media (max-width:768px){b:2}";
        assert_eq!(
            adjust(css, &custom("768", "600")),
            "@media (min-width:768px){a:1}@media (max-width:600px){b:2}"
        );
    }

    #[test]
    fn clause_without_brace_runs_to_end_of_text() {
        assert_eq!(adjust("@media (max-width: 1024px)", &custom("1100", "768")), "@media (max-width:1100px)");
    }

    #[test]
    fn clauses_span_newlines_and_multiple_conditions() {
        let css = "@media only screen\n  and (min-width: 768px)\n  and (max-width: 1023px) {\n.a{width:768px}\n}";
        assert_eq!(
            adjust(css, &custom("1280", "640")),
            "@media only screen\n  and (min-width:640px)\n  and (max-width:1279px) {\n.a{width:768px}\n}"
        );
    }

    #[test]
    fn unrelated_widths_inside_clauses_stay() {
        let css = "@media (min-width: 1025px) and (max-width:10240px){a:1}@media (min-width:1024px){b:2}";
        assert_eq!(
            adjust(css, &custom("1200", "768")),
            "@media (min-width: 1025px) and (max-width:10240px){a:1}@media (min-width:1200px){b:2}"
        );
    }

    #[test]
    fn customized_tier_at_builtin_width_is_normalized() {
        let resolved = ResolvedBreakpoints::new(Breakpoints::new("1024", "600"), Tiers::all());
        let css = "@media (min-width: 1024px){a:1}@media (max-width: 767px){b:2}";
        assert_eq!(adjust(css, &resolved), "@media (min-width:1024px){a:1}@media (max-width:599px){b:2}");
    }

    #[test]
    fn uncustomized_tier_keeps_its_spelling() {
        let resolved = ResolvedBreakpoints::new(Breakpoints::new("1024", "600"), Tiers::MOBILE);
        let css = "@media (min-width: 1024px){a:1}@media (max-width: 767px){b:2}";
        assert_eq!(adjust(css, &resolved), "@media (min-width: 1024px){a:1}@media (max-width:599px){b:2}");
    }

    #[test]
    fn missing_probe_skips_boundary() {
        // `1024px` appears only without a closing paren, so the tier is left alone.
        let css = "@media (min-width:1024px and (x)){a:1}";
        assert!(matches!(adjust(css, &custom("1200", "768")), Cow::Borrowed(_)));
    }
}
