use assert_cmd::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

const TEAMS: &str = r#"{
  "edges": [
    {"source": "ana", "target": "bo", "weight": 2},
    {"source": "bo", "target": "cy", "weight": 1},
    {"source": "cy", "target": "dee", "weight": 3},
    {"source": "dee", "target": "eli", "weight": 1},
    {"source": "eli", "target": "ana", "weight": 5}
  ],
  "nodes": {
    "ana": {"team": "red"},
    "bo": {"team": "red"},
    "cy": {"team": "blue"},
    "dee": {"team": "blue"},
    "eli": {}
  }
}"#;

fn write_fixture(dir: &Path, name: &str, text: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, text).expect("write fixture");
    path
}

fn cli() -> Command {
    Command::new(assert_cmd::cargo_bin!("combograph-cli"))
}

#[test]
fn cli_partitions_by_group_attr() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let input = write_fixture(tmp.path(), "teams.json", TEAMS);

    let out = cli()
        .args([
            "partition",
            "--weight",
            "weight",
            "--group-by",
            "team",
            "--empty-action",
            "promote",
            "--aggregate",
            "heaviest=max(weight)",
            input.to_string_lossy().as_ref(),
        ])
        .output()
        .expect("run cli");
    assert!(out.status.success(), "stderr: {}", String::from_utf8_lossy(&out.stderr));

    let doc: serde_json::Value = serde_json::from_slice(&out.stdout).expect("json output");
    let groups: Vec<&str> = doc["intra"]
        .as_object()
        .expect("intra object")
        .keys()
        .map(String::as_str)
        .collect();
    assert_eq!(groups, ["red", "blue", "__combo_empty_eli"]);
    assert!(doc["inter"]["nodes"].is_array());

    let edges = doc["inter"]["edges"].as_array().expect("inter edges");
    assert_eq!(edges.len(), 3);
    let red_blue = edges
        .iter()
        .find(|e| e["source"] == "blue" && e["target"] == "red")
        .expect("blue-red edge");
    assert_eq!(red_blue["weight"], 1.0);
    assert_eq!(red_blue["heaviest"], 1.0);
}

#[test]
fn cli_partition_requires_group_by() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let input = write_fixture(tmp.path(), "teams.json", TEAMS);

    cli()
        .args(["partition", input.to_string_lossy().as_ref()])
        .assert()
        .failure()
        .code(1);
}

#[test]
fn cli_renders_svg_to_file() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let input = write_fixture(tmp.path(), "teams.json", TEAMS);
    let out = tmp.path().join("teams.svg");

    cli()
        .args([
            "render",
            "--group-by",
            "team",
            "--title",
            "Teams",
            "--seed",
            "7",
            "--out",
            out.to_string_lossy().as_ref(),
            input.to_string_lossy().as_ref(),
        ])
        .assert()
        .success();

    let svg = fs::read_to_string(&out).expect("read svg");
    assert!(svg.starts_with("<svg"), "unexpected output: {svg}");
    assert!(svg.contains(r#"data-layer="combo_nodes""#));
    assert!(svg.contains("Teams"));
}

#[test]
fn cli_honours_precomputed_positions() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let input = write_fixture(
        tmp.path(),
        "pair.json",
        r#"{
          "edges": [{"source": "a", "target": "b"}],
          "positions": {"a": [0, 0], "b": [1, 1]}
        }"#,
    );

    let out = cli()
        .args(["render", "--width", "400", "--height", "400"])
        .arg(&input)
        .output()
        .expect("run cli");
    assert!(out.status.success(), "stderr: {}", String::from_utf8_lossy(&out.stderr));

    let svg = String::from_utf8(out.stdout).expect("utf8 svg");
    assert!(svg.contains(r#"x1="0""#), "unexpected output: {svg}");
    assert!(svg.contains(r#"x2="400""#), "unexpected output: {svg}");
}

#[test]
fn cli_renders_png_smoke() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let input = write_fixture(tmp.path(), "teams.json", TEAMS);
    let out = tmp.path().join("out.png");

    cli()
        .args([
            "render",
            "--format",
            "png",
            "--background",
            "white",
            "--out",
            out.to_string_lossy().as_ref(),
            input.to_string_lossy().as_ref(),
        ])
        .assert()
        .success();

    let bytes = fs::read(&out).expect("read png");
    assert!(
        bytes.starts_with(b"\x89PNG\r\n\x1a\n"),
        "expected PNG signature"
    );
}

#[test]
fn cli_rejects_unknown_flags_with_usage() {
    cli().arg("--nope").assert().failure().code(2);
}
