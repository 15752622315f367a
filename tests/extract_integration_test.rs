use cfmeta::config::{CfMetaConfig, ExtractSettings};
use cfmeta::{
    extract_file, extract_source, run_extract, DeclarationOutcome, Dimensionality, RunStatus,
    ValueType,
};
use indoc::indoc;
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use serde_json::{json, Value};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("data")
        .join("fixtures")
        .join(name)
}

fn run_into(dir: &TempDir, input: PathBuf, pretty: bool) -> (RunStatus, String) {
    let settings = ExtractSettings::resolve(
        input,
        Some(dir.path().join("functions.json")),
        pretty,
        &CfMetaConfig::default(),
    );
    let mut console = Vec::new();
    let status = run_extract(&settings, &mut console).unwrap();
    (status, String::from_utf8(console).unwrap())
}

fn read_json(path: &Path) -> Value {
    serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
}

#[test]
fn test_basic_file_produces_expected_manifest() {
    let dir = TempDir::new().unwrap();
    let input = fixture("basic.ts");

    let (status, console) = run_into(&dir, input.clone(), false);

    let output = dir.path().join("functions.json");
    assert_eq!(status, RunStatus::Written(output.clone()));
    assert_eq!(
        console,
        format!("functions.json created for file: {}\n", input.display())
    );
    assert_eq!(
        read_json(&output),
        json!({
            "functions": [
                {
                    "name": "add",
                    "id": "add",
                    "helpurl": "",
                    "description": "Adds two numbers.",
                    "parameters": [
                        {
                            "name": "first",
                            "description": "First number",
                            "type": "number",
                            "dimensionality": "scalar"
                        },
                        {
                            "name": "second",
                            "description": "Second number",
                            "type": "number",
                            "dimensionality": "scalar"
                        }
                    ],
                    "result": { "type": "number", "dimensionality": "scalar" },
                    "options": { "sync": false, "cancelable": false, "stream": false }
                },
                {
                    "name": "echo",
                    "id": "echo",
                    "helpurl": "",
                    "description": "Echoes whatever it receives.",
                    "parameters": [
                        { "name": "value", "type": "any", "dimensionality": "scalar" }
                    ],
                    "result": { "type": "any", "dimensionality": "scalar" },
                    "options": { "sync": false, "cancelable": false, "stream": false }
                }
            ]
        })
    );
}

#[test]
fn test_mixed_file_reports_skipped_functions() {
    let dir = TempDir::new().unwrap();
    let input = fixture("mixed.ts");

    let (status, console) = run_into(&dir, input.clone(), true);

    assert_eq!(status.exit_code(), 0);
    assert_eq!(
        console,
        format!(
            "functions.json created for file: {}\nThe following functions were skipped.\nformatCell\nhelper\n",
            input.display()
        )
    );

    let text = fs::read_to_string(dir.path().join("functions.json")).unwrap();
    assert!(text.contains("\n  \"functions\""), "expected pretty output:\n{text}");

    let manifest: Value = serde_json::from_str(&text).unwrap();
    let join = &manifest["functions"][0];
    assert_eq!(join["name"], "join");
    assert_eq!(join["helpurl"], "https://contoso.com/help/join");
    assert_eq!(join["parameters"][0]["description"], "Rows to join");
    assert_eq!(join["parameters"][0]["dimensionality"], "matrix");
    assert_eq!(join["parameters"][1]["type"], "string");
    assert_eq!(join["result"], json!({ "type": "string", "dimensionality": "scalar" }));

    let clock = &manifest["functions"][1];
    assert_eq!(clock["name"], "clock");
    assert_eq!(clock["parameters"].as_array().unwrap().len(), 1);
    assert_eq!(clock["result"]["type"], "string");
    assert_eq!(
        clock["options"],
        json!({ "sync": false, "cancelable": true, "stream": true })
    );
}

#[test]
fn test_invalid_file_writes_nothing() {
    let dir = TempDir::new().unwrap();
    let input = fixture("invalid.ts");

    let (status, console) = run_into(&dir, input.clone(), false);

    assert_eq!(status, RunStatus::Failed);
    assert_eq!(status.exit_code(), 1);
    assert!(!dir.path().join("functions.json").exists());
    assert_eq!(
        console,
        format!(
            "There was one of more errors. We couldn't parse your file: {}\nInvalid type: Date\nInvalid array type node: boolean\n",
            input.display()
        )
    );
}

#[test]
fn test_javascript_file_uses_doc_tags_only() {
    let report = extract_file(&fixture("plain.js")).unwrap();

    assert!(report.is_success());
    assert_eq!(report.function_count(), 1);
    let multiply = &report.functions[0];
    assert_eq!(multiply.name, "multiply");
    assert_eq!(multiply.description.as_deref(), Some("Multiplies two values."));

    let params: Vec<_> = multiply
        .parameters
        .iter()
        .map(|p| (p.name.as_str(), p.description.as_deref(), p.value_type))
        .collect();
    assert_eq!(
        params,
        vec![
            ("a", Some("first factor"), ValueType::Any),
            ("b", Some("second factor"), ValueType::Any),
        ]
    );
    assert_eq!(multiply.result.value_type, ValueType::Any);
}

#[test]
fn test_existing_output_untouched_on_failure() {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("functions.json");
    fs::write(&output, "{\"functions\":[]}").unwrap();

    let (status, _) = run_into(&dir, fixture("invalid.ts"), false);

    assert_eq!(status, RunStatus::Failed);
    assert_eq!(fs::read_to_string(&output).unwrap(), "{\"functions\":[]}");
}

#[test]
fn test_matrix_types_from_generic_arrays() {
    let report = extract_source(
        indoc! {"
            /** @customfunction */
            function total(values: Array<Array<number>>, flags: boolean[][]): Array<number> {
              return [];
            }
        "},
        Path::new("matrix.ts"),
    )
    .unwrap();

    let total = &report.functions[0];
    assert_eq!(total.parameters[0].value_type, ValueType::Number);
    assert_eq!(total.parameters[0].dimensionality, Dimensionality::Matrix);
    assert_eq!(total.parameters[1].value_type, ValueType::Boolean);
    assert_eq!(total.parameters[1].dimensionality, Dimensionality::Matrix);
    assert_eq!(total.result.value_type, ValueType::Number);
    assert_eq!(total.result.dimensionality, Dimensionality::Matrix);
}

#[test]
fn test_missing_input_is_fatal() {
    let dir = TempDir::new().unwrap();
    let settings = ExtractSettings::resolve(
        dir.path().join("missing.ts"),
        Some(dir.path().join("functions.json")),
        false,
        &CfMetaConfig::default(),
    );

    assert!(run_extract(&settings, Vec::new()).is_err());
    assert!(!dir.path().join("functions.json").exists());
}

fn declaration(name: &str, marked: bool) -> String {
    let tag = if marked { "\n * @customfunction" } else { "" };
    format!("/**\n * Function {name}.{tag}\n */\nfunction {name}(x: number): number {{\n  return x;\n}}\n\n")
}

proptest! {
    #[test]
    fn prop_source_order_is_preserved(decls in prop::collection::vec((any::<bool>(), "[a-z]{1,6}"), 1..12)) {
        let named: Vec<(String, bool)> = decls
            .iter()
            .enumerate()
            .map(|(i, (marked, suffix))| (format!("f_{suffix}_{i}"), *marked))
            .collect();
        let source: String = named.iter().map(|(name, marked)| declaration(name, *marked)).collect();

        let report = extract_source(&source, Path::new("generated.ts")).unwrap();

        let expected_functions: Vec<&str> = named
            .iter()
            .filter(|(_, marked)| *marked)
            .map(|(name, _)| name.as_str())
            .collect();
        let expected_skipped: Vec<&str> = named
            .iter()
            .filter(|(_, marked)| !*marked)
            .map(|(name, _)| name.as_str())
            .collect();
        let functions: Vec<&str> = report.functions.iter().map(|f| f.name.as_str()).collect();
        let skipped: Vec<&str> = report.skipped.iter().map(String::as_str).collect();

        prop_assert_eq!(functions, expected_functions);
        prop_assert_eq!(skipped, expected_skipped);
        prop_assert!(report.errors.is_empty());
    }

    #[test]
    fn prop_outcomes_partition_declarations(marks in prop::collection::vec(any::<bool>(), 0..10)) {
        let source: String = marks
            .iter()
            .enumerate()
            .map(|(i, marked)| declaration(&format!("f_{i}"), *marked))
            .collect();

        let report = extract_source(&source, Path::new("generated.ts")).unwrap();
        prop_assert_eq!(report.function_count() + report.skipped_count(), marks.len());
        prop_assert_eq!(report.function_count(), marks.iter().filter(|m| **m).count());
        prop_assert!(!report.functions.iter().any(|f| f.id != f.name));
    }
}

#[test]
fn test_outcome_collection_matches_report() {
    let outcomes = vec![
        DeclarationOutcome::Skipped("a".to_string()),
        DeclarationOutcome::Failed(vec!["Invalid type: Date".to_string()]),
    ];
    let report: cfmeta::ExtractionReport = outcomes.into_iter().collect();
    assert!(!report.is_success());
    assert!(report.manifest().is_none());
}
