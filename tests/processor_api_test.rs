//! Tests for the stage inspection API behind `chemtyper inspect`

use chemtyper::chem::lexer::Token;
use chemtyper::chem::pipeline::Converter;
use chemtyper::chem::processor::{
    available_formats, process_file, process_source, OutputFormat, ProcessingError,
    ProcessingSpec, ProcessingStage,
};
use std::fs;

#[cfg(test)]
mod tests {
    use super::*;

    fn run(source: &str, spec: &str) -> String {
        let spec = ProcessingSpec::from_string(spec).unwrap();
        process_source(source, &spec, &Converter::default()).unwrap()
    }

    #[test]
    fn test_processing_spec_parsing() {
        let spec = ProcessingSpec::from_string("token-json").unwrap();
        assert_eq!(spec.stage, ProcessingStage::Token);
        assert_eq!(spec.format, OutputFormat::Json);

        let spec = ProcessingSpec::from_string("ast-yaml").unwrap();
        assert_eq!(spec.stage, ProcessingStage::Ast);
        assert_eq!(spec.format, OutputFormat::Yaml);

        assert!(ProcessingSpec::from_string("invalid").is_err());
        assert!(ProcessingSpec::from_string("token-invalid").is_err());
        assert!(ProcessingSpec::from_string("invalid-simple").is_err());
        assert!(ProcessingSpec::from_string("ast-simple").is_err());
    }

    #[test]
    fn test_every_available_format_round_trips() {
        for format in available_formats() {
            let spec = ProcessingSpec::from_string(&format).unwrap();
            assert_eq!(spec.to_string(), format);
        }
        assert_eq!(ProcessingSpec::available_specs().len(), 7);
    }

    #[test]
    fn test_token_display_format() {
        assert_eq!(format!("{}", Token::Element("Na".to_string())), "Element(Na)");
        assert_eq!(format!("{}", Token::Number("14".to_string())), "Number(14)");
        assert_eq!(format!("{}", Token::Subscript), "Subscript");
        assert_eq!(format!("{}", Token::Char('-')), "Char(-)");
    }

    #[test]
    fn test_tokens_come_from_normalized_markup() {
        // SO4 is expanded before lexing
        let output = run("SO4", "token-simple");
        assert_eq!(
            output,
            "Element(S)\nElement(O)\nSubscript\nBraceOpen\nNumber(4)\nBraceClose\n"
        );
    }

    #[test]
    fn test_token_json() {
        let output = run("H_{2}", "token-json");
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value.as_array().map(Vec::len), Some(5));
        assert!(output.contains("Element"));
    }

    #[test]
    fn test_ast_json_uses_camel_case_kinds() {
        let output = run("^{14}_{6}C", "ast-json");
        assert!(output.contains(r#""kind": "root""#));
        assert!(output.contains(r#""kind": "isotope""#));
    }

    #[test]
    fn test_ast_yaml() {
        let output = run("Na^{+}", "ast-yaml");
        assert!(output.contains("kind: element"));
        assert!(output.contains("value: Na"));
    }

    #[test]
    fn test_ast_treeviz() {
        let output = run("H_{2}O", "ast-treeviz");
        assert!(output.contains("element: H"));
        assert!(output.contains("element: O"));
    }

    #[test]
    fn test_word_stage_matches_converter() {
        assert_eq!(run("CuSO4", "word-text"), "〖Cu〗SO_4");
    }

    #[test]
    fn test_process_file() {
        let path = std::env::temp_dir().join(format!("chemtyper-{}.tex", std::process::id()));
        fs::write(&path, "H_{2}O").unwrap();

        let spec = ProcessingSpec::from_string("word-text").unwrap();
        let result = process_file(&path, &spec, &Converter::default());
        fs::remove_file(&path).unwrap();

        assert_eq!(result.unwrap(), "H_2 O");
    }

    #[test]
    fn test_process_file_missing() {
        let spec = ProcessingSpec::from_string("markup-text").unwrap();
        let result = process_file("no/such/file.tex", &spec, &Converter::default());
        assert!(matches!(result, Err(ProcessingError::FileNotFound(_))));
    }
}
