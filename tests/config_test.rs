//! Configuration file handling

use money_editor::config::{
    default_config, validate_config, Config, ConfigError, ConfigLoader,
};
use money_editor::{MoneyEditor, PointerChain, TargetConfig};
use pretty_assertions::assert_eq;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_full_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("money-editor.toml");
    fs::write(
        &path,
        r#"
[target]
process_name = "RDR2.exe"
module_name = "RDR2.exe"
base_offset = 0x052A7128
offsets = [0x20, 0xE60]

[money]
max_amount = 1000000
cents_multiplier = 100

[logging]
level = "debug"
"#,
    )
    .unwrap();

    let config = ConfigLoader::new(&path).load().unwrap();
    validate_config(&config).unwrap();
    assert_eq!(config.money.max_amount, 1_000_000);
    assert_eq!(config.logging.level, "debug");

    let target = TargetConfig::from(&config);
    assert_eq!(target.chain, PointerChain::new(0x052A7128, vec![0x20, 0xE60]));
    assert_eq!(target.max_amount, 1_000_000);
}

#[test]
fn test_default_file_round_trip() {
    let temp_dir = TempDir::new().unwrap();
    let loader = ConfigLoader::new(temp_dir.path().join("money-editor.toml"));

    loader.save(&Config::default()).unwrap();
    let loaded = loader.load().unwrap();

    assert_eq!(loaded, Config::default());
    assert_eq!(loaded.target.offsets, default_config().target.offsets);
}

#[test]
fn test_empty_file_is_all_defaults() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("empty.toml");
    fs::write(&path, "").unwrap();

    let config = ConfigLoader::new(&path).load().unwrap();
    assert_eq!(config, Config::default());
}

#[test]
fn test_wrong_types_fail_to_parse() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("bad.toml");
    fs::write(&path, "[target]\noffsets = \"0x20\"\n").unwrap();

    let result = ConfigLoader::new(&path).load();
    assert!(matches!(result, Err(ConfigError::TomlParse(_))));
}

#[test]
fn test_invalid_values_are_rejected() {
    let toml_str = r#"
        [target]
        offsets = []
    "#;
    let config: Config = toml::from_str(toml_str).unwrap();
    assert!(matches!(
        validate_config(&config),
        Err(ConfigError::Invalid(_))
    ));
}

#[test]
fn test_editor_from_config() {
    let editor = MoneyEditor::from_config(&Config::default());
    assert_eq!(editor.target().process_name, "RDR2.exe");
    assert_eq!(editor.target().module_name, "RDR2.exe");
}
