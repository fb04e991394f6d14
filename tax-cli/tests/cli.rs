//! Runs parsed command lines against in-memory output.

use std::fs;

use clap::Parser;
use pretty_assertions::assert_eq;
use rust_decimal_macros::dec;
use serde_json::Value;
use tax_cli::{Cli, run};
use tax_core::ImpactResult;

fn run_args(args: &[&str]) -> anyhow::Result<String> {
    let cli = Cli::try_parse_from(args)?;
    let mut out = Vec::new();
    run(&cli, &mut out)?;
    Ok(String::from_utf8(out)?)
}

#[test]
fn impact_json_is_a_structured_result() {
    let output = run_args(&["tax-impact", "impact", "500000"]).unwrap();

    let result: ImpactResult = serde_json::from_str(&output).unwrap();
    assert_eq!(result.annual_income, dec!(6000000));
    assert_eq!(result.current.label, "2024 PITA");
    assert_eq!(result.impact.annual_relief, dec!(26000));
    assert_eq!(result.impact.percentage_change, dec!(2.90));
}

#[test]
fn impact_json_uses_documented_field_names() {
    let output = run_args(&["tax-impact", "impact", "50000"]).unwrap();

    let value: Value = serde_json::from_str(&output).unwrap();
    assert_eq!(value["annual_income"], "600000");
    assert_eq!(value["proposed"]["label"], "2026 Reform");
    assert_eq!(value["proposed"]["annual_tax"], "0");
    assert_eq!(value["impact"]["annual_relief"], "0");
}

#[test]
fn impact_text_renders_table() {
    let output = run_args(&["tax-impact", "impact", "500,000", "--format", "text"]).unwrap();

    assert!(output.starts_with("Monthly income"));
    assert!(output.contains("6,000,000.00"));
    assert!(output.contains("Annual relief"));
}

#[test]
fn negative_income_fails_with_invalid_input() {
    let err = run_args(&["tax-impact", "impact", "-100"]).unwrap_err();

    assert!(format!("{err:#}").contains("income must not be negative, got -100"));
}

#[test]
fn non_numeric_income_fails() {
    let err = run_args(&["tax-impact", "impact", "a lot"]).unwrap_err();

    assert!(format!("{err:#}").contains("income must be numeric"));
}

#[test]
fn regimes_toml_loads_back_as_config() {
    let output = run_args(&["tax-impact", "regimes", "--format", "toml"]).unwrap();

    let loaded = tax_data::config::load_from_str(&output).unwrap();
    assert_eq!(&loaded, tax_core::RegimeSet::builtin().unwrap());
}

#[test]
fn config_file_replaces_builtin_tables() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("flat.toml");
    fs::write(
        &path,
        r#"
exemption_threshold = "0"

[current]
code = "2024"
label = "Flat ten"
brackets = [{ lower_bound = "0", rate = "0.10" }]

[proposed]
code = "2026"
label = "Flat five"
brackets = [{ lower_bound = "0", rate = "0.05" }]
"#,
    )
    .unwrap();

    let output = run_args(&[
        "tax-impact",
        "--config",
        path.to_str().unwrap(),
        "impact",
        "10000",
    ])
    .unwrap();

    let result: ImpactResult = serde_json::from_str(&output).unwrap();
    assert_eq!(result.current.label, "Flat ten");
    assert_eq!(result.current.result.annual_tax, dec!(12000));
    assert_eq!(result.proposed.result.annual_tax, dec!(6000));
    assert_eq!(result.impact.percentage_change, dec!(50));
}

#[test]
fn malformed_config_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.toml");
    fs::write(
        &path,
        r#"
[current]
code = "2024"
brackets = [{ lower_bound = "100", rate = "0.10" }]

[proposed]
code = "2026"
brackets = [{ lower_bound = "0", rate = "0.05" }]
"#,
    )
    .unwrap();

    let err = run_args(&[
        "tax-impact",
        "impact",
        "10000",
        "--config",
        path.to_str().unwrap(),
    ])
    .unwrap_err();

    assert!(format!("{err:#}").contains("first band must start at 0"));
}

#[test]
fn batch_writes_csv_to_output_file() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("incomes.csv");
    let output = dir.path().join("impact.csv");
    fs::write(&input, "id,monthly_income\nlow,50000\nhigh,500000\n").unwrap();

    let stdout = run_args(&[
        "tax-impact",
        "batch",
        "--input",
        input.to_str().unwrap(),
        "--output",
        output.to_str().unwrap(),
    ])
    .unwrap();

    assert_eq!(stdout, "");
    let written = fs::read_to_string(&output).unwrap();
    let lines: Vec<&str> = written.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].starts_with("id,monthly_income,annual_income"));
    assert!(lines[1].starts_with("low,50000,600000,0,0,"));
    assert!(lines[2].starts_with("high,500000,6000000,896000"));
}

#[test]
fn batch_defaults_to_stdout() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("incomes.csv");
    fs::write(&input, "monthly_income\n50000\n").unwrap();

    let stdout = run_args(&["tax-impact", "batch", "-i", input.to_str().unwrap()]).unwrap();

    assert_eq!(stdout.lines().count(), 2);
}
