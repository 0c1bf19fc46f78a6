use assert_cmd::prelude::*;
use predicates::prelude::*;
use predicates::str::contains;
use std::io::Write;
use std::process::Command;
use tempfile::{tempdir, NamedTempFile};

fn write_scene(xml: &str) -> NamedTempFile {
    let mut tmp = NamedTempFile::new().expect("temp scene");
    tmp.write_all(xml.as_bytes()).expect("write scene");
    tmp
}

#[test]
fn cli_writes_png_and_prints_braille_preview() {
    let dir = tempdir().expect("temp dir");
    let output = dir.path().join("fireball.png");
    let mut cmd = Command::cargo_bin("fireball").expect("binary exists");
    cmd.arg("--width")
        .arg("16")
        .arg("--height")
        .arg("8")
        .arg("--output")
        .arg(&output);
    cmd.assert()
        .success()
        .stdout(contains("(16x8)"))
        .stdout(contains("fireball.png"))
        .stdout(predicate::str::is_match("[\u{2800}-\u{28FF}]{8}\n").unwrap());

    let bytes = std::fs::read(&output).expect("png written");
    assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");
}

#[test]
fn cli_reads_scene_file_and_skips_image() {
    let scene = write_scene(
        r#"<scene>
  <sphere><amplitude>0</amplitude></sphere>
  <render><width>12</width><height>6</height></render>
</scene>
"#,
    );
    let dir = tempdir().expect("temp dir");
    let output = dir.path().join("unused.png");
    let mut cmd = Command::cargo_bin("fireball").expect("binary exists");
    cmd.arg("--scene")
        .arg(scene.path())
        .arg("--output")
        .arg(&output)
        .arg("--no-image")
        .arg("--preview")
        .arg("ascii")
        .arg("--columns")
        .arg("6");
    cmd.assert()
        .success()
        .stdout(contains("Wrote").not())
        .stdout(predicate::str::is_match("^[ .:=+*#%@-]{6}\n").unwrap());
    assert!(!output.exists());
}

#[test]
fn cli_rejects_zero_sized_image() {
    let mut cmd = Command::cargo_bin("fireball").expect("binary exists");
    cmd.arg("--width").arg("0").arg("--no-image");
    cmd.assert()
        .failure()
        .stderr(contains("non-zero area"));
}

#[test]
fn cli_reports_malformed_scene() {
    let scene = write_scene("<scene><camera><position>1 2</position></camera></scene>");
    let mut cmd = Command::cargo_bin("fireball").expect("binary exists");
    cmd.arg("--scene").arg(scene.path()).arg("--no-image");
    cmd.assert()
        .failure()
        .stderr(contains("invalid camera position"));
}

#[test]
fn cli_rejects_unknown_preview_mode() {
    let mut cmd = Command::cargo_bin("fireball").expect("binary exists");
    cmd.arg("--preview").arg("sixel").arg("--no-image");
    cmd.assert().failure().stderr(contains("unknown preview mode"));
}
