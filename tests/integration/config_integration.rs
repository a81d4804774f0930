//! Integration tests for the layered configuration.

use crate::integration::with_xdg_env;
use agentcard::card::{CardRenderer, FitMode};
use agentcard::config::{global_config_path, ConfigLoader};
use agentcard::error::CardError;
use image::Rgb;
use tempfile::TempDir;

#[test]
fn test_defaults_without_any_files() {
    let test_dir = TempDir::new().unwrap();
    let workspace = TempDir::new().unwrap();
    let config = with_xdg_env(&test_dir, || ConfigLoader::load(workspace.path()).unwrap());

    assert_eq!((config.canvas.width, config.canvas.height), (1024, 576));
    assert_eq!(config.picture.box_size, 180);
    assert_eq!(config.picture.fit, FitMode::Contain);
    assert_eq!(config.output.dir, std::path::PathBuf::from("output"));
    assert_eq!(config.logging.output, "file");
}

#[test]
fn test_global_file_is_overridden_by_workspace_file() {
    let test_dir = TempDir::new().unwrap();
    let workspace = TempDir::new().unwrap();

    let config = with_xdg_env(&test_dir, || {
        let global = global_config_path().unwrap();
        assert!(global.starts_with(test_dir.path()));
        std::fs::create_dir_all(global.parent().unwrap()).unwrap();
        std::fs::write(
            &global,
            "[theme]\nbackground = \"#000000\"\n\n[picture]\nfit = \"cover\"\n",
        )
        .unwrap();

        let config_dir = workspace.path().join("config");
        std::fs::create_dir_all(&config_dir).unwrap();
        std::fs::write(
            config_dir.join("config.toml"),
            "[theme]\nbackground = \"#102030\"\n",
        )
        .unwrap();

        ConfigLoader::load(workspace.path()).unwrap()
    });

    assert_eq!(config.theme.background, "#102030");
    assert_eq!(config.picture.fit, FitMode::Cover);
}

#[test]
fn test_environment_specific_file() {
    let test_dir = TempDir::new().unwrap();
    let workspace = TempDir::new().unwrap();
    let config_dir = workspace.path().join("config");
    std::fs::create_dir_all(&config_dir).unwrap();
    std::fs::write(config_dir.join("config.toml"), "[layout]\ndescription_max_lines = 2\n").unwrap();
    std::fs::write(config_dir.join("print.toml"), "[layout]\ndescription_max_lines = 4\n").unwrap();

    let (default_env, print_env) = with_xdg_env(&test_dir, || {
        let default_env = ConfigLoader::load(workspace.path()).unwrap();
        std::env::set_var("AGENTCARD_ENV", "print");
        let print_env = ConfigLoader::load(workspace.path()).unwrap();
        (default_env, print_env)
    });

    assert_eq!(default_env.layout.description_max_lines, 2);
    assert_eq!(print_env.layout.description_max_lines, 4);
}

#[test]
fn test_environment_variables_override_files() {
    let test_dir = TempDir::new().unwrap();
    let workspace = TempDir::new().unwrap();
    let config_dir = workspace.path().join("config");
    std::fs::create_dir_all(&config_dir).unwrap();
    std::fs::write(config_dir.join("config.toml"), "[canvas]\nwidth = 1200\n").unwrap();

    let config = with_xdg_env(&test_dir, || {
        std::env::set_var("AGENTCARD_CANVAS__WIDTH", "1100");
        let result = ConfigLoader::load(workspace.path());
        std::env::remove_var("AGENTCARD_CANVAS__WIDTH");
        result.unwrap()
    });

    assert_eq!(config.canvas.width, 1100);
}

#[test]
fn test_load_from_missing_file() {
    let temp_dir = TempDir::new().unwrap();
    let result = ConfigLoader::load_from_file(&temp_dir.path().join("missing.toml"));
    assert!(matches!(result, Err(CardError::ConfigError(msg)) if msg.contains("not found")));
}

#[test]
fn test_invalid_values_are_all_reported() {
    let test_dir = TempDir::new().unwrap();
    let config_file = test_dir.path().join("card.toml");
    std::fs::write(
        &config_file,
        r##"
[canvas]
width = 400

[theme]
text = "white"
"##,
    )
    .unwrap();

    let err = with_xdg_env(&test_dir, || ConfigLoader::load_from_file(&config_file)).unwrap_err();
    let msg = err.to_string();
    assert!(msg.contains("Canvas"), "{}", msg);
    assert!(msg.contains("Theme 'text'"), "{}", msg);
}

#[test]
fn test_renderer_uses_configured_theme() {
    let test_dir = TempDir::new().unwrap();
    let config_file = test_dir.path().join("card.toml");
    std::fs::write(
        &config_file,
        "[theme]\nbackground = \"#ffffff\"\n\n[font]\npath = \"/nonexistent/font.ttf\"\n",
    )
    .unwrap();

    let config = with_xdg_env(&test_dir, || ConfigLoader::load_from_file(&config_file)).unwrap();
    let renderer = CardRenderer::from_config(&config).unwrap();
    assert_eq!(renderer.style().background, Rgb([255, 255, 255]));
    // A missing font file falls back to the built-in bitmap font.
    assert_eq!(renderer.font().description(), "built-in bitmap");
}

#[test]
fn test_huge_body_size_from_environment_is_a_config_error() {
    let test_dir = TempDir::new().unwrap();
    let workspace = TempDir::new().unwrap();

    let result = with_xdg_env(&test_dir, || {
        std::env::set_var("AGENTCARD_FONT__BODY_SIZE", "1e9");
        let result = ConfigLoader::load(workspace.path());
        std::env::remove_var("AGENTCARD_FONT__BODY_SIZE");
        result
    });

    let msg = result.unwrap_err().to_string();
    assert!(msg.contains("Font"), "{}", msg);
    assert!(msg.contains("Canvas"), "{}", msg);
}

#[test]
fn test_huge_box_size_from_file_is_a_config_error() {
    let test_dir = TempDir::new().unwrap();
    let config_file = test_dir.path().join("card.toml");
    std::fs::write(&config_file, format!("[picture]\nbox_size = {}\n", u32::MAX)).unwrap();

    let err = with_xdg_env(&test_dir, || ConfigLoader::load_from_file(&config_file)).unwrap_err();
    let msg = err.to_string();
    assert!(msg.contains("Picture"), "{}", msg);
    assert!(msg.contains("Canvas"), "{}", msg);
}

#[test]
fn test_sources_list_existing_files_in_precedence_order() {
    let test_dir = TempDir::new().unwrap();
    let workspace = TempDir::new().unwrap();

    let (defaults_only, layered, explicit) = with_xdg_env(&test_dir, || {
        let defaults_only = ConfigLoader::sources(workspace.path(), None);

        let global = global_config_path().unwrap();
        std::fs::create_dir_all(global.parent().unwrap()).unwrap();
        std::fs::write(&global, "[picture]\nfit = \"cover\"\n").unwrap();
        let config_dir = workspace.path().join("config");
        std::fs::create_dir_all(&config_dir).unwrap();
        std::fs::write(config_dir.join("config.toml"), "").unwrap();
        std::env::set_var("AGENTCARD_ENV", "print");
        std::fs::write(config_dir.join("print.toml"), "").unwrap();
        let layered = ConfigLoader::sources(workspace.path(), None);

        let single = workspace.path().join("single.toml");
        let explicit = ConfigLoader::sources(workspace.path(), Some(single.as_path()));
        (defaults_only, (global, layered), explicit)
    });

    assert!(defaults_only.is_empty());
    let (global, layered) = layered;
    let config_dir = workspace.path().join("config");
    assert_eq!(
        layered,
        vec![global, config_dir.join("config.toml"), config_dir.join("print.toml")]
    );
    assert_eq!(explicit, vec![workspace.path().join("single.toml")]);
}

#[test]
fn test_load_for_prefers_explicit_file_over_workspace() {
    let test_dir = TempDir::new().unwrap();
    let workspace = TempDir::new().unwrap();
    let config_dir = workspace.path().join("config");
    std::fs::create_dir_all(&config_dir).unwrap();
    std::fs::write(config_dir.join("config.toml"), "[picture]\nbox_size = 120\n").unwrap();
    let single = workspace.path().join("single.toml");
    std::fs::write(&single, "[picture]\nbox_size = 160\n").unwrap();

    let (layered, explicit) = with_xdg_env(&test_dir, || {
        (
            ConfigLoader::load_for(workspace.path(), None).unwrap(),
            ConfigLoader::load_for(workspace.path(), Some(single.as_path())).unwrap(),
        )
    });
    assert_eq!(layered.picture.box_size, 120);
    assert_eq!(explicit.picture.box_size, 160);
}
