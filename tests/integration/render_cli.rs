//! End-to-end runs of the `agentcard` binary.

use crate::integration::{agentcard_command, write_solid_png};
use image::Rgb;
use std::path::Path;
use std::process::Output;
use tempfile::TempDir;

fn run(dir: &Path, args: &[&str]) -> Output {
    agentcard_command(dir)
        .arg("--workspace")
        .arg(dir)
        .args(args)
        .output()
        .expect("Failed to run agentcard binary")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

const ADA: [&str; 11] = [
    "--name",
    "Ada Lovelace",
    "--description",
    "Analyzes data",
    "--skill",
    "Search",
    "--skill",
    "Summarize",
    "--metric",
    "30 percent faster",
    "--details",
];

#[test]
fn test_render_writes_card_and_reports_flagged_fields() {
    let temp = TempDir::new().unwrap();
    let mut args = vec!["render"];
    args.extend_from_slice(&ADA);
    args.push("--execute");
    let output = run(temp.path(), &args);

    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    let text = stdout(&output);
    assert!(text.contains("Card written:"), "{}", text);
    assert!(text.contains("Actions: execute, details"), "{}", text);
    assert!(text.contains("metric #1"), "{}", text);

    let card = temp.path().join("output").join("Ada_Lovelace_card.png");
    assert!(card.exists());
    let decoded = image::open(&card).unwrap();
    assert_eq!((decoded.width(), decoded.height()), (1024, 576));
}

#[test]
fn test_render_json_summary() {
    let temp = TempDir::new().unwrap();
    let out_dir = temp.path().join("cards");
    let out_arg = out_dir.to_string_lossy().into_owned();
    let mut args = vec!["render", "--format", "json", "--output", out_arg.as_str()];
    args.extend_from_slice(&ADA);
    let output = run(temp.path(), &args);

    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(json["width"], 1024);
    assert_eq!(json["height"], 576);
    assert_eq!(json["valid"], false);
    assert_eq!(json["actions"], serde_json::json!(["details"]));
    assert_eq!(json["fingerprint"].as_str().unwrap().len(), 64);
    assert!(out_dir.join("Ada_Lovelace_card.png").exists());
}

#[test]
fn test_render_is_reproducible() {
    let temp = TempDir::new().unwrap();
    let mut args = vec!["render", "--format", "json"];
    args.extend_from_slice(&ADA);

    let first: serde_json::Value = serde_json::from_str(&stdout(&run(temp.path(), &args))).unwrap();
    let second: serde_json::Value =
        serde_json::from_str(&stdout(&run(temp.path(), &args))).unwrap();
    assert_eq!(first["fingerprint"], second["fingerprint"]);
}

#[test]
fn test_render_with_picture() {
    let temp = TempDir::new().unwrap();
    let picture = write_solid_png(temp.path(), "face.png", 64, 64, Rgb([0, 120, 200]));
    let picture_arg = picture.to_string_lossy().into_owned();
    let output = run(
        temp.path(),
        &["render", "--name", "Ada", "--image", picture_arg.as_str()],
    );
    assert!(output.status.success());

    let card = image::open(temp.path().join("output").join("Ada_card.png"))
        .unwrap()
        .to_rgb8();
    let centre = card.get_pixel(130, 150);
    assert!(centre[2] > 180 && centre[0] < 30, "{:?}", centre);
}

#[test]
fn test_render_rejects_gif_picture() {
    let temp = TempDir::new().unwrap();
    let gif = temp.path().join("face.gif");
    std::fs::write(&gif, b"GIF89a").unwrap();
    let gif_arg = gif.to_string_lossy().into_owned();
    let output = run(temp.path(), &["render", "--name", "Ada", "--image", gif_arg.as_str()]);

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Unsupported image format"));
    assert!(!temp.path().join("output").exists());
}

#[test]
fn test_render_rejects_sixth_skill() {
    let temp = TempDir::new().unwrap();
    let mut args = vec!["render", "--name", "Ada"];
    for skill in ["A", "B", "C", "D", "E", "F"] {
        args.push("--skill");
        args.push(skill);
    }
    let output = run(temp.path(), &args);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("maximum of 5"));
}

#[test]
fn test_preview_writes_nothing() {
    let temp = TempDir::new().unwrap();
    let mut args = vec!["preview"];
    args.extend_from_slice(&ADA);
    let output = run(temp.path(), &args);

    assert!(output.status.success());
    let text = stdout(&output);
    assert!(text.contains("Canvas: 1024x576"), "{}", text);
    assert!(text.contains("Validation failed"), "{}", text);
    assert!(!temp.path().join("output").exists());
}

#[test]
fn test_validate_field_reports_invalid_text_and_exits_zero() {
    let temp = TempDir::new().unwrap();
    let output = run(temp.path(), &["validate", "--field", "name", "R2D2"]);
    assert!(output.status.success());
    assert!(stdout(&output).contains("✗ Invalid name"));

    let output = run(temp.path(), &["validate", "--field", "skill", "Search"]);
    assert!(stdout(&output).contains("✓ Valid skill"));
}

#[test]
fn test_validate_unknown_field_fails() {
    let temp = TempDir::new().unwrap();
    let output = run(temp.path(), &["validate", "--field", "title", "Ada"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Unknown field"));
}

#[test]
fn test_validate_profile_file() {
    let temp = TempDir::new().unwrap();
    let profile = temp.path().join("agent.toml");
    std::fs::write(
        &profile,
        "name = \"Ada Lovelace\"\ndescription = \"Analyzes data\"\nskills = [\"Search\"]\n",
    )
    .unwrap();
    let profile_arg = profile.to_string_lossy().into_owned();
    let output = run(
        temp.path(),
        &["validate", "--profile", profile_arg.as_str(), "--format", "json"],
    );
    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(json["valid"], true);
}

#[test]
fn test_no_details_overrides_profile_file() {
    let temp = TempDir::new().unwrap();
    let profile = temp.path().join("agent.toml");
    std::fs::write(
        &profile,
        "name = \"Ada\"\nshow_details = true\nshow_execute = true\n",
    )
    .unwrap();
    let profile_arg = profile.to_string_lossy().into_owned();
    let output = run(
        temp.path(),
        &["render", "--format", "json", "--profile", profile_arg.as_str(), "--no-details"],
    );

    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    let json: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(json["actions"], serde_json::json!(["execute"]));
}

#[test]
fn test_unknown_output_format_is_rejected() {
    let temp = TempDir::new().unwrap();
    let output = run(temp.path(), &["render", "--name", "Ada", "--format", "yaml"]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("yaml"), "{}", stderr);
    assert!(!temp.path().join("output").join("Ada_card.png").exists());
}

#[test]
fn test_startup_reports_configuration_sources() {
    let temp = TempDir::new().unwrap();
    let config_dir = temp.path().join("config");
    std::fs::create_dir_all(&config_dir).unwrap();
    std::fs::write(config_dir.join("config.toml"), "[picture]\nbox_size = 160\n").unwrap();

    let output = run(
        temp.path(),
        &["--log-output", "stderr", "--log-level", "info", "preview", "--name", "Ada"],
    );

    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Configuration loaded from"), "{}", stderr);
    assert!(stderr.contains("config.toml"), "{}", stderr);
}
