//! Load → process → save integration tests

use std::fs;
use std::path::PathBuf;

use loanfeat_core::{ContractProcessor, FeatureConfig};
use loanfeat_io::{load_applications, save_features, IoError};
use rstest::rstest;

fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("test_fixtures")
        .join(name)
}

fn run(input: &PathBuf, output: &PathBuf, config: &FeatureConfig) {
    let rows = load_applications(input).expect("load applications");
    let features = ContractProcessor::new(config).process_rows(&rows);
    save_features(output, &features, config).expect("save features");
}

#[rstest]
#[case("1", "1,2024-06-01,1,100.0,152,ABC,100.0")]
#[case("2", "2,2024-06-01,0,-1,-1,LIZ,-1")]
#[case("3", "3,2024-06-01,-3,-3,-3,NONE,-3")]
#[case("4", "4,2024-06-01,1,-1,-1,NONE,-1")]
#[case("5", "5,2024-06-01,0,-1,-1,NONE,200.0")]
#[case("6", "6,2024-06-01,0,0.0,10,XYZ,50.0")]
#[case("7", "7,2024-06-01,-3,-3,-3,NONE,-3")]
#[case("8", "8,not-a-date,ERROR,ERROR,ERROR,ERROR,ERROR")]
#[case("9", "9,2024-06-01 10:30:00,-3,-3,-3,NONE,-3")]
#[case("10", "10,2024-06-01,ERROR,ERROR,ERROR,ERROR,ERROR")]
#[case("11", "11,2024-06-01,0,-1,-1,NONE,100.0")]
fn test_fixture_rows(#[case] id: &str, #[case] expected: &str) {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("features.csv");
    run(&fixture_path("applications.csv"), &output, &FeatureConfig::default());

    let text = fs::read_to_string(&output).unwrap();
    let line = text
        .lines()
        .skip(1)
        .find(|l| l.split(',').next() == Some(id))
        .unwrap_or_else(|| panic!("no output row for id {}", id));
    assert_eq!(line, expected);
}

#[test]
fn test_output_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let first = dir.path().join("first.csv");
    let second = dir.path().join("second.csv");
    let config = FeatureConfig::default();

    run(&fixture_path("applications.csv"), &first, &config);
    run(&fixture_path("applications.csv"), &second, &config);

    assert_eq!(fs::read(&first).unwrap(), fs::read(&second).unwrap());
}

#[test]
fn test_save_creates_parents_and_overwrites() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("nested").join("deeper").join("out.csv");
    fs::create_dir_all(output.parent().unwrap()).unwrap();
    fs::write(&output, "stale contents that are much longer than the header\n".repeat(50)).unwrap();

    save_features(&output, &[], &FeatureConfig::default()).unwrap();

    let text = fs::read_to_string(&output).unwrap();
    assert_eq!(text.lines().count(), 1);
    assert!(text.starts_with("id,application_date,"));
}

#[test]
fn test_save_creates_missing_directories() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("a").join("b").join("out.csv");
    save_features(&output, &[], &FeatureConfig::default()).unwrap();
    assert!(output.exists());
}

#[test]
fn test_missing_input_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = load_applications(dir.path().join("absent.csv")).unwrap_err();
    assert!(matches!(err, IoError::FileNotFound(_)));
}

#[test]
fn test_empty_input_file() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("empty.csv");
    fs::write(&input, "").unwrap();
    let err = load_applications(&input).unwrap_err();
    assert!(matches!(err, IoError::EmptyInput(_)));
}
