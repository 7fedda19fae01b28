use proptest::prelude::*;
use rebreak_breakpoints::css_filter;
use rebreak_breakpoints::engine::{adjust, expand_shortcuts};
use rebreak_domain::breakpoints::{Breakpoints, ResolvedBreakpoints, Tiers};
use std::borrow::Cow;

fn css_like() -> impl Strategy<Value = String> {
    proptest::collection::vec(
        prop_oneof![
            Just("@media ".to_owned()),
            Just("@media tablet".to_owned()),
            Just("@media mobile".to_owned()),
            Just("(min-width:1024px)".to_owned()),
            Just("(max-width: 1023px)".to_owned()),
            Just("(min-width: 768px)".to_owned()),
            Just("(max-width:767px)".to_owned()),
            Just("{".to_owned()),
            Just("}".to_owned()),
            "[a-z.:;#0-9 -]{0,12}",
        ],
        0..24,
    )
    .prop_map(|parts| parts.concat())
}

proptest! {
    #[test]
    fn builtin_breakpoints_never_rewrite(css in css_like()) {
        let builtin = ResolvedBreakpoints::builtin();
        prop_assert!(matches!(adjust(&css, &builtin), Cow::Borrowed(_)));

        let literal = ResolvedBreakpoints::new(Breakpoints::builtin(), Tiers::all());
        prop_assert!(matches!(adjust(&css, &literal), Cow::Borrowed(_)));

        let expected = expand_shortcuts(&css).into_owned();
        prop_assert_eq!(css_filter().apply(css, &literal), expected);
    }

    #[test]
    fn arbitrary_text_survives_outside_media(css in "[^@]{0,64}", tablet in 100u32..3000, mobile in 100u32..3000) {
        let resolved = ResolvedBreakpoints::new(Breakpoints::new(tablet.to_string(), mobile.to_string()), Tiers::all());
        prop_assert_eq!(adjust(&css, &resolved), css.as_str());
    }
}
