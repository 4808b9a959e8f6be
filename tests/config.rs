// tests/config.rs
use sentiment_lens::config::{
    PipelineConfig, ENV_CONFIG_PATH, ENV_TRANSLATOR_API_KEY, ENV_TRANSLATOR_ENABLED,
};
use sentiment_lens::{AnalysisError, Runtime};
use std::{env, fs};

fn clear_env() {
    env::remove_var(ENV_CONFIG_PATH);
    env::remove_var(ENV_TRANSLATOR_ENABLED);
    env::remove_var(ENV_TRANSLATOR_API_KEY);
}

#[serial_test::serial]
#[test]
fn default_uses_env_then_fallbacks() {
    // Isolate CWD so the repo's own config/ is not read
    let old = env::current_dir().unwrap();
    let tmp = tempfile::tempdir().unwrap();
    env::set_current_dir(tmp.path()).unwrap();
    clear_env();

    // 1) Nothing on disk → defaults
    let cfg = PipelineConfig::load_default().unwrap();
    assert!(!cfg.translator.enabled);
    assert!(cfg.grammar.enabled);

    // 2) ./config/sentiment.toml
    let cfg_dir = tmp.path().join("config");
    fs::create_dir_all(&cfg_dir).unwrap();
    fs::write(cfg_dir.join("sentiment.toml"), "[grammar]\nenabled = false\n").unwrap();
    let cfg = PipelineConfig::load_default().unwrap();
    assert!(!cfg.grammar.enabled);

    // 3) env path wins
    let p_env = tmp.path().join("override.json");
    fs::write(&p_env, r#"{"detector":{"require_reliable":true}}"#).unwrap();
    env::set_var(ENV_CONFIG_PATH, p_env.display().to_string());
    let cfg = PipelineConfig::load_default().unwrap();
    assert!(cfg.grammar.enabled);
    assert!(cfg.detector.require_reliable);

    // 4) env path must exist
    env::set_var(ENV_CONFIG_PATH, tmp.path().join("missing.toml").display().to_string());
    assert!(PipelineConfig::load_default().is_err());

    clear_env();
    env::set_current_dir(&old).unwrap();
}

#[serial_test::serial]
#[test]
fn api_key_env_indirection() {
    clear_env();
    let tmp = tempfile::tempdir().unwrap();
    let p = tmp.path().join("t.toml");
    fs::write(
        &p,
        r#"
[translator]
enabled = true
api_key = "ENV"
"#,
    )
    .unwrap();

    assert!(PipelineConfig::load_from_file(&p).is_err());

    env::set_var(ENV_TRANSLATOR_API_KEY, "k-123");
    let cfg = PipelineConfig::load_from_file(&p).unwrap();
    assert_eq!(cfg.translator.api_key.as_deref(), Some("k-123"));
    clear_env();
}

#[serial_test::serial]
#[test]
fn translator_toggle_from_env() {
    let old = env::current_dir().unwrap();
    let tmp = tempfile::tempdir().unwrap();
    env::set_current_dir(tmp.path()).unwrap();
    clear_env();

    env::set_var(ENV_TRANSLATOR_ENABLED, "1");
    assert!(PipelineConfig::load_default().unwrap().translator.enabled);

    env::set_var(ENV_TRANSLATOR_ENABLED, "maybe");
    assert!(PipelineConfig::load_default().is_err());

    clear_env();
    env::set_current_dir(&old).unwrap();
}

#[test]
fn runtime_reads_lexicon_dir_overrides() {
    let tmp = tempfile::tempdir().unwrap();
    fs::write(
        tmp.path().join("rewrite_tables.json"),
        r#"{
  "negative_to_positive": {"en": {"gloomy": ["sunny"]}, "tr": {}},
  "common_expressions": {"en": {"gloomy": ["overcast", "grey"]}, "tr": {}}
}"#,
    )
    .unwrap();

    let cfg = PipelineConfig {
        lexicon_dir: Some(tmp.path().to_path_buf()),
        ..Default::default()
    };
    let rt = Runtime::from_config(cfg).unwrap();
    assert!(rt.lexicons.negative_to_positive.for_language("en").get("terrible").is_none());
    assert_eq!(
        rt.lexicons.common_expressions.for_language("en").get("gloomy"),
        Some(&["overcast".to_string(), "grey".to_string()][..])
    );
    // tables not in the directory fall back to the embedded ones
    assert!(rt.lexicons.is_stop_word("the"));
}

#[test]
fn runtime_reports_config_and_table_errors() {
    let mut cfg = PipelineConfig::default();
    cfg.translator.enabled = true;
    cfg.translator.provider = "carrier-pigeon".into();
    let err = Runtime::from_config(cfg).err().unwrap();
    assert!(matches!(err, AnalysisError::Config(_)), "{err}");
    assert!(err.to_string().contains("carrier-pigeon"));

    let tmp = tempfile::tempdir().unwrap();
    fs::write(tmp.path().join("polarity_lexicon.json"), "{ nope").unwrap();
    let cfg = PipelineConfig {
        lexicon_dir: Some(tmp.path().to_path_buf()),
        ..Default::default()
    };
    let err = Runtime::from_config(cfg).err().unwrap();
    assert!(matches!(err, AnalysisError::Lexicon(_)), "{err}");
}

#[serial_test::serial]
#[test]
fn runtime_load_maps_bad_config_path() {
    clear_env();
    env::set_var(ENV_CONFIG_PATH, "/definitely/not/here.toml");
    let err = Runtime::load().err().unwrap();
    clear_env();
    assert!(matches!(err, AnalysisError::Config(_)), "{err}");
}
