/*!
 * Tests for application configuration loading and validation
 */

use articleplay::app_config::{Config, LogLevel};
use articleplay::transcript::SchemaVariant;

#[test]
fn test_config_default_shouldMatchServiceDefaults() {
    let config = Config::default();

    assert_eq!(config.tenant_id, "local");
    assert_eq!(config.schema_variant, SchemaVariant::TitleBody);
    assert_eq!(config.interruption_notice, "(processing was interrupted)");
    assert_eq!(config.provider.model, "gemini-1.5-flash");
    assert_eq!(config.provider.max_input_tokens, 3000);
    assert_eq!(config.provider.max_output_tokens, 2000);
    assert_eq!(config.speech.voice, "en-US-Neural2-I");
    assert_eq!(config.speech.sample_rate_hertz, 24000);
    assert_eq!(config.speech.effects_profile, vec!["handset-class-device"]);
    assert_eq!(config.log_level, LogLevel::Info);
}

#[test]
fn test_config_default_shouldValidate() {
    let config = Config::default();
    assert!(config.validate().is_ok());
}

#[test]
fn test_config_fromPartialJson_shouldFillDefaults() {
    let json = r#"{
        "tenant_id": "alice",
        "provider": { "api_key": "test-key", "model": "gemini-1.5-pro" }
    }"#;

    let config: Config = serde_json::from_str(json).unwrap();

    assert_eq!(config.tenant_id, "alice");
    assert_eq!(config.provider.model, "gemini-1.5-pro");
    assert_eq!(config.provider.api_key, "test-key");
    // Everything unspecified keeps its default
    assert_eq!(config.provider.max_input_tokens, 3000);
    assert_eq!(config.speech.voice, "en-US-Neural2-I");
    assert_eq!(config.storage.root_dir, "output");
}

#[test]
fn test_config_schemaVariant_shouldDeserializeFromString() {
    let json = r#"{ "schema_variant": "pairlist" }"#;
    let config: Config = serde_json::from_str(json).unwrap();
    assert_eq!(config.schema_variant, SchemaVariant::PairList);
}

#[test]
fn test_config_validate_shouldRejectEmptyTenant() {
    let mut config = Config::default();
    config.tenant_id = "  ".to_string();

    let err = config.validate().unwrap_err();
    assert!(err.to_string().contains("tenant_id"));
}

#[test]
fn test_config_validate_shouldRejectZeroTokenBudgets() {
    let mut config = Config::default();
    config.provider.max_input_tokens = 0;
    assert!(config.validate().is_err());

    let mut config = Config::default();
    config.provider.max_output_tokens = 0;
    assert!(config.validate().is_err());
}

#[test]
fn test_config_validate_shouldRejectOutOfRangeSampling() {
    let mut config = Config::default();
    config.provider.temperature = 3.5;
    assert!(config.validate().is_err());

    let mut config = Config::default();
    config.provider.top_p = 1.5;
    assert!(config.validate().is_err());
}

#[test]
fn test_config_validate_shouldRejectOutOfRangeSpeakingRate() {
    let mut config = Config::default();
    config.speech.speaking_rate = 10.0;

    let err = config.validate().unwrap_err();
    assert!(err.to_string().contains("speaking_rate"));
}

#[test]
fn test_config_roundTrip_shouldPreserveValues() {
    let mut config = Config::default();
    config.tenant_id = "bob".to_string();
    config.interruption_notice = "（処理が途中で終了しました）".to_string();

    let json = serde_json::to_string(&config).unwrap();
    let restored: Config = serde_json::from_str(&json).unwrap();

    assert_eq!(restored.tenant_id, "bob");
    assert_eq!(restored.interruption_notice, "（処理が途中で終了しました）");
}
