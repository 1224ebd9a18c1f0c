use proptest::prelude::*;

use typeflow::{
    Doc, LayoutOptions, PageWidth, aligned, alternative, choice, empty, grouped, hard_line,
    line_break, line_break_hint, nest, render_to_string, text, white_space,
};

fn options(width: usize, trim: bool) -> LayoutOptions {
    LayoutOptions {
        page_width: Some(PageWidth::new(width)),
        strip_trailing_whitespace: trim,
        ..LayoutOptions::default()
    }
}

fn doc_leaf() -> impl Strategy<Value = Doc> {
    prop_oneof![
        Just(empty()),
        Just(hard_line()),
        Just(line_break()),
        Just(line_break_hint()),
        (1usize..4).prop_map(white_space),
        "[a-z]{1,6}".prop_map(|word| text(word)),
    ]
}

/// Documents closed under the full algebra. Choices are generated with a
/// plain first branch; a `Flattened` first branch selects the measured
/// fast path, which resolves on width rather than lookahead and is covered
/// by the `grouped` arm instead.
fn doc_any() -> impl Strategy<Value = Doc> {
    doc_leaf().prop_recursive(4, 24, 2, |inner| {
        prop_oneof![
            (inner.clone(), inner.clone()).prop_map(|(a, b)| a + b),
            (0usize..4, inner.clone()).prop_map(|(amount, doc)| nest(amount, doc)),
            inner.clone().prop_map(aligned),
            inner.clone().prop_map(grouped),
            (inner.clone(), inner.clone()).prop_map(|(a, b)| alternative(a, b)),
            (inner.clone(), inner.clone()).prop_map(|(a, b)| choice(a, b)),
        ]
    })
}

proptest! {
    #[test]
    fn append_identity(
        doc in doc_any(),
        width in 10usize..150,
        trim in any::<bool>(),
    ) {
        let options = options(width, trim);
        let base = render_to_string(&doc, &options);
        prop_assert_eq!(render_to_string(&(empty() + doc.clone()), &options), base.clone());
        prop_assert_eq!(render_to_string(&(doc + empty()), &options), base);
    }

    #[test]
    fn append_associativity(
        a in doc_any(),
        b in doc_any(),
        c in doc_any(),
        width in 10usize..150,
        trim in any::<bool>(),
    ) {
        let options = options(width, trim);
        prop_assert_eq!(
            render_to_string(&((a.clone() + b.clone()) + c.clone()), &options),
            render_to_string(&(a + (b + c)), &options),
        );
    }

    #[test]
    fn nesting_additivity(
        doc in doc_any(),
        n in 0usize..6,
        m in 0usize..6,
        width in 10usize..150,
        trim in any::<bool>(),
    ) {
        let options = options(width, trim);
        prop_assert_eq!(
            render_to_string(&nest(n, nest(m, doc.clone())), &options),
            render_to_string(&nest(n + m, doc), &options),
        );
    }

    #[test]
    fn nesting_distributes_over_append(
        a in doc_any(),
        b in doc_any(),
        n in 0usize..6,
        width in 10usize..150,
        trim in any::<bool>(),
    ) {
        let options = options(width, trim);
        prop_assert_eq!(
            render_to_string(&nest(n, a.clone() + b.clone()), &options),
            render_to_string(&(nest(n, a) + nest(n, b)), &options),
        );
    }

    #[test]
    fn nesting_distributes_over_choice(
        a in doc_any(),
        b in doc_any(),
        n in 0usize..6,
        width in 10usize..150,
        trim in any::<bool>(),
    ) {
        let options = options(width, trim);
        prop_assert_eq!(
            render_to_string(&nest(n, choice(a.clone(), b.clone())), &options),
            render_to_string(&choice(nest(n, a), nest(n, b)), &options),
        );
    }

    #[test]
    fn nesting_by_zero_is_identity(
        doc in doc_any(),
        width in 10usize..150,
        trim in any::<bool>(),
    ) {
        let options = options(width, trim);
        prop_assert_eq!(
            render_to_string(&nest(0, doc.clone()), &options),
            render_to_string(&doc, &options),
        );
    }

    #[test]
    fn aligned_is_idempotent(
        doc in doc_any(),
        width in 10usize..150,
        trim in any::<bool>(),
    ) {
        let options = options(width, trim);
        prop_assert_eq!(
            render_to_string(&aligned(aligned(doc.clone())), &options),
            render_to_string(&aligned(doc), &options),
        );
    }

    #[test]
    fn grouped_is_idempotent(
        doc in doc_any(),
        width in 10usize..150,
        trim in any::<bool>(),
    ) {
        let options = options(width, trim);
        prop_assert_eq!(
            render_to_string(&grouped(grouped(doc.clone())), &options),
            render_to_string(&grouped(doc), &options),
        );
    }

    #[test]
    fn newline_free_strings_round_trip(
        source in "[a-zA-Z0-9 ]{0,40}",
        width in 10usize..150,
        trim in any::<bool>(),
    ) {
        let doc: Doc = text(source.as_str());
        prop_assert_eq!(render_to_string(&doc, &options(width, trim)), source);
    }

    #[test]
    fn append_respects_string_concatenation(
        s1 in "[a-zA-Z0-9]{0,20}",
        s2 in "[a-zA-Z0-9]{0,20}",
        width in 10usize..150,
        trim in any::<bool>(),
    ) {
        let options = options(width, trim);
        let joined: Doc = text(format!("{s1}{s2}"));
        let split: Doc = text(s1) + text(s2);
        prop_assert_eq!(
            render_to_string(&joined, &options),
            render_to_string(&split, &options),
        );
    }

    #[test]
    fn stripping_only_removes_line_final_whitespace(
        doc in doc_any(),
        width in 10usize..150,
    ) {
        // Stripping changes emission, never layout decisions, so the two
        // renderings line up line for line; each stripped line is its
        // unstripped counterpart minus a run of line-final spaces.
        let stripped = render_to_string(&doc, &options(width, true));
        let kept = render_to_string(&doc, &options(width, false));
        let stripped_lines: Vec<&str> = stripped.split('\n').collect();
        let kept_lines: Vec<&str> = kept.split('\n').collect();
        prop_assert_eq!(stripped_lines.len(), kept_lines.len());
        for (stripped_line, kept_line) in stripped_lines.iter().zip(&kept_lines) {
            prop_assert!(kept_line.starts_with(stripped_line));
            prop_assert!(kept_line[stripped_line.len()..].chars().all(|c| c == ' '));
        }
    }
}
