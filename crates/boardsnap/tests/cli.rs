#![cfg(feature = "cli")]

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;

const START_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

fn boardsnap() -> Command {
    let mut cmd = Command::cargo_bin("boardsnap").expect("binary");
    cmd.env_remove("BOARDSNAP_LOG");
    cmd
}

#[test]
fn fen_prints_diagram_and_canonical_fen() {
    boardsnap()
        .args(["fen", START_FEN])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("r n b q k b n r\n"))
        .stdout(predicate::str::contains(format!("fen:    {START_FEN}")))
        .stdout(predicate::str::contains("pieces: 32"))
        .stdout(predicate::str::contains("kings:  ok"));
}

#[test]
fn bare_placement_gets_defaults() {
    boardsnap()
        .args(["fen", "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "fen:    rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w - - 0 1",
        ));

    boardsnap()
        .args([
            "fen",
            "--all-castling",
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains(format!("fen:    {START_FEN}")));
}

#[test]
fn strict_mode_rejects_missing_kings() {
    boardsnap()
        .args(["fen", "8/8/8/8/8/8/8/4K3"])
        .assert()
        .success()
        .stdout(predicate::str::contains("kings:  missing black king"));

    boardsnap()
        .args(["fen", "--strict", "8/8/8/8/8/8/8/4K3"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("missing black king"));
}

#[test]
fn fen_report_is_written_to_disk() {
    let dir = tempfile::tempdir().expect("tempdir");
    let out = dir.path().join("report.json");
    boardsnap()
        .args(["fen", "--json", "--out"])
        .arg(&out)
        .arg("KK6/8/8/8/8/8/8/k7")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"white_kings\": 2"));

    let raw = fs::read_to_string(&out).expect("report");
    let report: serde_json::Value = serde_json::from_str(&raw).expect("json");
    assert_eq!(report["fen"], "KK6/8/8/8/8/8/8/k7 w - - 0 1");
    assert_eq!(report["problems"][0], "2 white kings (need exactly 1)");
}

#[test]
fn corners_payload_from_dimensions() {
    boardsnap()
        .args(["corners", "--width", "3023", "--height", "4031"])
        .assert()
        .success()
        .stdout(predicate::str::diff(
            "{\"image_width\":3023,\"image_height\":4031,\"corners\":[[302,403],[2720,403],[2720,3627],[302,3627]]}\n",
        ));
}

#[test]
fn corners_payload_from_config() {
    let dir = tempfile::tempdir().expect("tempdir");
    let cfg = dir.path().join("snap.json");
    fs::write(
        &cfg,
        r#"{
            "image": {"width": 1000, "height": 500},
            "corners": [[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]]
        }"#,
    )
    .expect("write config");

    boardsnap()
        .args(["corners", "--config"])
        .arg(&cfg)
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "\"corners\":[[0,0],[1000,0],[1000,500],[0,500]]",
        ));
}

#[test]
fn corners_without_image_size_fail() {
    boardsnap()
        .args(["corners", "--width", "100"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--height"));

    boardsnap()
        .args(["corners", "--width", "0", "--height", "10"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("InvalidImageSize"));
}

#[test]
fn view_to_norm_applies_fill_offsets() {
    // 1000x1000 photo filling a 200x400 view: scale 0.4, x offset -100
    boardsnap()
        .args([
            "view-to-norm",
            "--image-width",
            "1000",
            "--image-height",
            "1000",
            "--view-width",
            "200",
            "--view-height",
            "400",
            "--fit",
            "fill",
            "100",
            "200",
        ])
        .assert()
        .success()
        .stdout(predicate::str::diff("0.500000 0.500000\n"));
}

#[test]
fn view_to_norm_clamps_outside_points() {
    boardsnap()
        .args([
            "view-to-norm",
            "--image-width",
            "100",
            "--image-height",
            "100",
            "--view-width",
            "100",
            "--view-height",
            "100",
            "-5",
            "250",
        ])
        .assert()
        .success()
        .stdout(predicate::str::diff("0.000000 1.000000\n"));
}

#[test]
fn eval_renders_bar() {
    boardsnap()
        .args(["eval", "--score", "2"])
        .assert()
        .success()
        .stdout(predicate::str::diff("0.600 2.0\n"));

    boardsnap()
        .args(["eval", "--mate", "-3"])
        .assert()
        .success()
        .stdout(predicate::str::diff("0.050 M3\n"));

    boardsnap()
        .args(["eval", "--score", "1.0", "--error", "engine crashed"])
        .assert()
        .success()
        .stdout(predicate::str::diff("0.500 0.0\n"));

    boardsnap()
        .args(["eval", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"fraction\":0.5"));
}

#[test]
fn apply_maps_recognizer_response() {
    let dir = tempfile::tempdir().expect("tempdir");
    let cfg = dir.path().join("snap.json");
    let resp = dir.path().join("response.json");
    fs::write(&cfg, r#"{"image": {"width": 1000, "height": 1000}}"#).expect("write config");
    fs::write(
        &resp,
        r#"{"fen": "4k3/8/8/8/8/8/8/4K3", "corners": [[50, 50], [950, 50], [950, 950], [50, 950]]}"#,
    )
    .expect("write response");

    boardsnap()
        .args(["apply", "--side", "black", "--config"])
        .arg(&cfg)
        .arg("--response")
        .arg(&resp)
        .assert()
        .success()
        .stdout(predicate::str::starts_with("4k3/8/8/8/8/8/8/4K3 b - - 0 1\n"))
        .stdout(predicate::str::contains("TopLeft: 5.0% 5.0%"))
        .stdout(predicate::str::contains("BottomRight: 95.0% 95.0%"));
}
