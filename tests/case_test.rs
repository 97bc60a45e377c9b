use apicase::ApiCaseError;
use apicase::cli::CaseTarget;
use apicase::commands::{CaseOptions, execute_case};
use apicase::loader::load_case_groups;
use apicase::models::{BodyContent, Polarity};
use apicase::synthesis::{CaseSynthesizer, FixedClock};
use chrono::{Local, TimeZone};
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const TEMPLATES: &str = "tests/fixtures/templates";

fn synthesizer() -> CaseSynthesizer<StdRng, FixedClock> {
    let instant = Local.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap();
    CaseSynthesizer::with_sources("{{shop}}", StdRng::seed_from_u64(7), FixedClock(instant))
}

fn options(dir: &Path, output: &Path) -> CaseOptions {
    CaseOptions {
        target: CaseTarget::Postman,
        dir: dir.to_path_buf(),
        name: Some("shop".to_string()),
        extension: None,
        output: output.to_path_buf(),
    }
}

fn write(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

#[test]
fn template_tree_is_grouped_by_uri() {
    let groups = load_case_groups(Path::new(TEMPLATES), &mut synthesizer()).unwrap();

    let keys: Vec<&String> = groups.groups.keys().collect();
    assert_eq!(keys.len(), 2);
    assert!(keys[0].starts_with("/user/info@"));
    assert!(keys[1].starts_with("/user/login@"));

    let prerequest = groups.prerequest.as_ref().unwrap();
    assert_eq!(prerequest.len(), 2);
    assert_eq!(prerequest[0].event, "prerequest");

    let info = &groups.groups[0];
    assert_eq!(info.len(), 2);
    assert_eq!(info[0].name, "/user/info_true_2024-01-02-03-04-05");
    assert_eq!(info[1].name, "/user/info_false_2024-01-02-03-04-05");
    assert!(info[0].expect_result);
    assert!(!info[1].expect_result);
}

#[test]
fn urlencoded_post_with_empty_invalid_pool() {
    let groups = load_case_groups(Path::new(TEMPLATES), &mut synthesizer()).unwrap();
    let login = &groups.groups[1];

    assert_eq!(login.len(), 1);
    assert!(login[0].expect_result);
    assert!(login[0].name.contains(Polarity::Valid.as_str()));
    let body = login[0].body.as_ref().unwrap();
    assert!(matches!(body.content(), BodyContent::Text(text) if text == "a=1"));
}

#[test]
fn group_keys_ignore_formatting() {
    let temp_dir = TempDir::new().unwrap();
    let compact = temp_dir.path().join("compact");
    let spaced = temp_dir.path().join("spaced");
    write(&compact, "a.json", r#"{"method":"GET","params":{}}"#);
    write(&spaced, "a.json", "{\n  \"params\": {},\n  \"method\": \"GET\"\n}");

    let first = load_case_groups(&compact, &mut synthesizer()).unwrap();
    let second = load_case_groups(&spaced, &mut synthesizer()).unwrap();
    assert_eq!(first.groups.keys().next(), second.groups.keys().next());
}

#[test]
fn get_without_params_yields_one_valid_case() {
    let temp_dir = TempDir::new().unwrap();
    write(temp_dir.path(), "ping.json", r#"{"method": "GET", "params": {}}"#);

    let groups = load_case_groups(temp_dir.path(), &mut synthesizer()).unwrap();
    assert_eq!(groups.case_count(), 1);
    assert!(groups.groups[0][0].expect_result);
    assert!(groups.prerequest.is_none());
}

#[test]
fn malformed_template_aborts_the_run() {
    let temp_dir = TempDir::new().unwrap();
    let dir = temp_dir.path().join("cases");
    write(&dir, "a/good.json", r#"{"method": "GET", "params": {}}"#);
    write(&dir, "b/bad.json", r#"{"method": "POST"}"#);
    let out = temp_dir.path().join("out");
    fs::create_dir(&out).unwrap();

    let err = execute_case(&options(&dir, &out)).unwrap_err();
    assert!(matches!(err, ApiCaseError::MalformedTemplate { .. }));
    assert_eq!(err.exit_code(), 1);
    assert!(fs::read_dir(&out).unwrap().next().is_none());
}

#[test]
fn case_command_writes_collection() {
    let temp_dir = TempDir::new().unwrap();

    let path = execute_case(&options(Path::new(TEMPLATES), temp_dir.path())).unwrap();
    assert_eq!(path, temp_dir.path().join("shop.json"));

    let collection: Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(collection["info"]["name"], "shop");
    assert_eq!(collection["event"][0]["listen"], "prerequest");
    assert_eq!(collection["item"].as_array().unwrap().len(), 2);

    let valid = &collection["item"][0]["item"][0];
    assert_eq!(valid["request"]["method"], "GET");
    assert_eq!(valid["request"]["url"]["raw"], "{{shop}}/user/info?v=2");
    assert_eq!(valid["request"]["url"]["path"], serde_json::json!(["user", "info"]));
    let query: Vec<&str> = valid["request"]["url"]["query"]
        .as_array()
        .unwrap()
        .iter()
        .map(|q| q["key"].as_str().unwrap())
        .collect();
    assert_eq!(query, vec!["v", "id"]);
    assert_eq!(valid["request"]["auth"]["type"], "noauth");
    assert!(valid["event"][0]["script"]["exec"][2]
        .as_str()
        .unwrap()
        .contains("to.eql(1)"));

    let login = &collection["item"][1]["item"][0];
    assert_eq!(login["request"]["body"]["mode"], "urlencoded");
    assert_eq!(login["request"]["body"]["urlencoded"][0]["key"], "a");
    assert_eq!(login["request"]["body"]["urlencoded"][0]["value"], "1");
}

#[test]
fn case_command_appends_json_suffix() {
    let temp_dir = TempDir::new().unwrap();
    let target = temp_dir.path().join("nightly");

    let path = execute_case(&options(Path::new(TEMPLATES), &target)).unwrap();
    assert_eq!(path, PathBuf::from(format!("{}.json", target.display())));
    assert!(path.exists());
}

#[test]
fn missing_or_wrong_kind_inputs() {
    let temp_dir = TempDir::new().unwrap();

    let missing = load_case_groups(&temp_dir.path().join("nope"), &mut synthesizer()).unwrap_err();
    assert!(matches!(missing, ApiCaseError::InputNotFound(_)));
    assert_eq!(missing.exit_code(), 3);

    let file = temp_dir.path().join("file.json");
    fs::write(&file, "{}").unwrap();
    let not_dir = load_case_groups(&file, &mut synthesizer()).unwrap_err();
    assert!(matches!(not_dir, ApiCaseError::InputNotADirectory(_)));
    assert_eq!(not_dir.exit_code(), 4);
}
