use scrapbuddy_core::api::v1::{handle, ChannelRequest, ChannelResponse, CHANNEL};
use scrapbuddy_core::config::{env, Layered, Sources};
use scrapbuddy_core::credentials::put_credential;
use scrapbuddy_core::db::init_memory_db;
use scrapbuddy_core::{KeyBroker, KeyName, StaticConfig};

#[test]
fn channel_name_matches_ui() {
    assert_eq!(CHANNEL, "api_keys_channel");
}

#[test]
fn configured_vertex_key_is_returned() {
    let broker = KeyBroker::new(StaticConfig::new().with(KeyName::VertexAi, "abc123"));
    let response = handle(&broker, &ChannelRequest::new("getVertexAIKey"));
    assert_eq!(response, ChannelResponse::Success { value: "abc123".into() });
}

#[test]
fn missing_sarvam_key_is_key_error() {
    let broker = KeyBroker::new(StaticConfig::new().with(KeyName::VertexAi, "abc123"));
    match handle(&broker, &ChannelRequest::new("getSarvamAIKey")) {
        ChannelResponse::Error { code, message, .. } => {
            assert_eq!(code, "KEY_ERROR");
            assert!(message.contains("Could not get Sarvam AI key"));
        }
        other => panic!("expected error response, got {other:?}"),
    }
}

#[test]
fn unknown_method_is_not_implemented() {
    let broker = KeyBroker::new(StaticConfig::new());
    let response = handle(&broker, &ChannelRequest::new("getUnknownKey"));
    assert_eq!(
        response,
        ChannelResponse::NotImplemented { method: "getUnknownKey".into() }
    );
}

#[test]
fn every_key_round_trips_through_channel() {
    let config: StaticConfig = KeyName::ALL
        .into_iter()
        .map(|key| (key, format!("value-for-{}", key.config_key())))
        .collect();
    let broker = KeyBroker::new(config);
    for key in KeyName::ALL {
        let response = handle(&broker, &ChannelRequest::new(key.method()));
        assert_eq!(
            response,
            ChannelResponse::Success { value: format!("value-for-{}", key.config_key()) }
        );
    }
}

#[test]
fn env_layer_overrides_credential_store() {
    let pool = init_memory_db().unwrap();
    {
        let conn = pool.get().unwrap();
        put_credential(&conn, KeyName::VertexAi, "from-store").unwrap();
        put_credential(&conn, KeyName::SarvamAi, "sarvam-store").unwrap();
    }
    let store = Sources {
        env: false,
        secrets_file: None,
        store: Some(pool),
        metadata: false,
    }
    .build()
    .unwrap();
    let env_layer = env::load_with(|name| (name == "VERTEX_AI_API_KEY").then(|| "from-env".to_string()));
    let broker = KeyBroker::new(Layered::new().push("env", env_layer).push("store", store));

    assert_eq!(broker.get_key(KeyName::VertexAi).unwrap(), "from-env");
    assert_eq!(broker.get_key(KeyName::SarvamAi).unwrap(), "sarvam-store");
}

#[test]
fn broker_snapshot_ignores_later_store_writes() {
    let pool = init_memory_db().unwrap();
    let sources = Sources {
        env: false,
        secrets_file: None,
        store: Some(pool.clone()),
        metadata: false,
    };
    let broker = KeyBroker::new(sources.build().unwrap());
    {
        let conn = pool.get().unwrap();
        put_credential(&conn, KeyName::SarvamAi, "late").unwrap();
    }
    assert!(broker.get_key(KeyName::SarvamAi).is_err());
}
