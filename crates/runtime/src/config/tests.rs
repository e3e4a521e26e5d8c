use pretty_assertions::assert_eq;
use rstest::rstest;

use super::*;

#[rstest]
#[case("", DynoConfig::default())]
#[case(
	"enable_in_debug = true\nauto_show_notification = false",
	DynoConfig { enable_in_debug: true, auto_show_notification: false }
)]
#[case(
	"enable_in_debug = false",
	DynoConfig { enable_in_debug: false, auto_show_notification: true }
)]
fn parses_toml(#[case] text: &str, #[case] expected: DynoConfig) {
	assert_eq!(DynoConfig::from_toml_str(text).unwrap(), expected);
}

#[test]
fn rejects_unknown_keys_and_bad_types() {
	assert!(matches!(
		DynoConfig::from_toml_str("show = true"),
		Err(ConfigError::Parse(_))
	));
	assert!(matches!(
		DynoConfig::from_toml_str("enable_in_debug = \"yes\""),
		Err(ConfigError::Parse(_))
	));
}

#[test]
fn load_reports_missing_files() {
	let path = std::env::temp_dir().join("dyno-config-does-not-exist.toml");
	let Err(ConfigError::Io { path: reported, .. }) = DynoConfig::load(&path) else {
		panic!("expected an io error");
	};
	assert_eq!(reported, path);
}

#[test]
fn load_reads_files() {
	let path = std::env::temp_dir().join(format!("dyno-config-{}.toml", std::process::id()));
	std::fs::write(&path, "auto_show_notification = false\n").unwrap();
	let config = DynoConfig::load(&path);
	std::fs::remove_file(&path).unwrap();

	assert!(!config.unwrap().auto_show_notification);
}

#[test]
fn default_follows_build_profile() {
	assert_eq!(DynoConfig::default().enable_in_debug, cfg!(debug_assertions));
	assert_eq!(
		DynoConfig::disabled(),
		DynoConfig {
			enable_in_debug: false,
			auto_show_notification: false,
		}
	);
}
