//! End-to-end conversion tests
//!
//! Markup in, word equation out, through every pipeline stage with the
//! default options.

#[cfg(test)]
mod tests {
    use chemtyper::chem::pipeline::{convert_to_word_equation, ConvertOptions, Converter};
    use rstest::rstest;

    #[rstest]
    #[case::water("H_{2}O", "H_2 O")]
    #[case::sodium("Na", "〖Na〗")]
    #[case::carbon_14("^{14}_{6}C", "(_6^14)C")]
    #[case::arrow(r"A \rightarrow B", "A → B")]
    #[case::fraction(r"\frac{1}{2}", "1⁄2")]
    #[case::half_typed_fraction(r"\frac{1}", "1⁄")]
    #[case::bare_sulfate("CuSO4", "〖Cu〗SO_4")]
    #[case::sodium_ion_bare_state("Na^{+}(aq)", "〖Na〗^(+) (aq)")]
    #[case::sodium_ion_subscript_state("Na^{+}_{(aq)}", "〖Na〗^(+) (aq)")]
    #[case::sodium_ion_text_state(r"Na^{+}\text{(aq)}", "〖Na〗^(+) (aq)")]
    fn converts(#[case] markup: &str, #[case] expected: &str) {
        assert_eq!(convert_to_word_equation(markup), expected);
    }

    #[test]
    fn labeled_arrow_carries_its_label() {
        let word = convert_to_word_equation(r"A \xrightarrow{\Delta} B");
        assert!(word.contains("□(→┴Δ"), "got {:?}", word);
        assert!(word.starts_with('A'));
        assert!(word.ends_with('B'));
    }

    #[test]
    fn labeled_arrow_is_single_spaced() {
        assert_eq!(
            convert_to_word_equation(r"2H_{2} + O_{2} \xrightarrow{\Delta} 2H_{2}O"),
            "2H_2 + O_2 □(→┴Δ) 2H_2 O"
        );
    }

    #[test]
    fn state_after_formula_is_spaced() {
        assert_eq!(convert_to_word_equation("H_{2}O(l)"), "H_2 O (l)");
        assert_eq!(convert_to_word_equation("NaCl (s)"), "〖Na〗〖Cl〗 (s)");
    }

    #[test]
    fn plus_between_species_is_single_spaced() {
        assert_eq!(convert_to_word_equation("Na^{+} + Cl^{-}"), "〖Na〗^(+) + 〖Cl〗^(-)");
    }

    #[test]
    fn whitespace_only_input_is_empty() {
        assert_eq!(convert_to_word_equation(""), "");
        assert_eq!(convert_to_word_equation("   "), "");
    }

    #[test]
    fn unbalanced_input_still_converts() {
        assert_eq!(convert_to_word_equation("H_{2"), "H_2");
        assert_eq!(convert_to_word_equation("H}_{2}O"), "H_2 O");
    }

    #[test]
    fn deep_nesting_degrades_instead_of_overflowing() {
        let open_only = "{".repeat(10_000);
        assert!(convert_to_word_equation(&open_only).starts_with('('));

        let balanced = format!("{}H{}", "{".repeat(10_000), "}".repeat(10_000));
        assert!(convert_to_word_equation(&balanced).contains('H'));

        let roots = format!("{}x{}", r"\sqrt{".repeat(3_000), "}".repeat(3_000));
        assert!(convert_to_word_equation(&roots).starts_with("√("));

        let fractions = format!("{}1{}", r"\frac{".repeat(3_000), "}{2}".repeat(3_000));
        assert!(convert_to_word_equation(&fractions).ends_with("⁄2"));
    }

    #[test]
    fn options_change_output() {
        let plain = Converter::new(ConvertOptions {
            bracket_multi_letter: false,
            ..ConvertOptions::default()
        });
        assert_eq!(plain.convert("NaCl"), "NaCl");

        let raw_ions = Converter::new(ConvertOptions {
            expand_ions: false,
            ..ConvertOptions::default()
        });
        assert_eq!(raw_ions.convert("SO4"), "SO4");
    }
}
