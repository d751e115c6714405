//! Integration tests for building data objects from payloads
//!
//! Covers normalization, casts, nested classes resolved through the
//! descriptor cache, empty payloads and settings loaded from files.

mod test_support;

use datakit_core::{
    transform, CamelCaseMapper, DataClass, DataConfig, DataFromPayloadResolver, DataProperty,
    DataSettings, EmptyDataResolver, Error, Payload, PropertyType, Value, WrapExecutionType,
};
use serde_json::json;
use std::io::Write;
use tempfile::Builder;
use test_support::*;

fn album_payload() -> Value {
    Value::from(json!({
        "title": "Tusk",
        "status": "released",
        "released_at": "1979-10-12",
        "artist": {"name": "Fleetwood Mac"},
        "songs": [
            {"title": "Sara", "duration": 388, "lyrics": "wait a minute baby"},
            {"title": "Tusk", "duration": 216, "lyrics": "why don't you ask him"}
        ]
    }))
}

#[test]
fn test_payload_round_trips_through_the_engine() {
    init_tracing();
    let config = config();

    let album = DataFromPayloadResolver::new(&config)
        .execute(&album_class(), &album_payload())
        .unwrap();

    assert!(matches!(album.get("released_at"), Some(Value::DateTime(_))));
    assert_eq!(album.get("rating"), Some(&Value::Optional));
    assert_eq!(album.get("artist").and_then(Value::as_data).map(|a| a.class().name()), Some("Artist"));

    let payload = transform(&album, &config, true, WrapExecutionType::Disabled).unwrap();
    assert_eq!(
        Value::Map(payload).to_json().unwrap(),
        json!({
            "title": "Tusk",
            "status": "released",
            "released_at": "1979-10-12T00:00:00+00:00",
            "artist": {"name": "Fleetwood Mac", "country": null},
            "songs": [
                {"title": "Sara", "duration": 388, "lyrics": "wait a minute baby"},
                {"title": "Tusk", "duration": 216, "lyrics": "why don't you ask him"}
            ]
        })
    );
}

#[test]
fn test_invalid_nested_payload_is_rejected() {
    init_tracing();
    let config = config();

    let err = DataFromPayloadResolver::new(&config)
        .execute(
            &album_class(),
            &Value::from(json!({"title": "Tusk", "status": "released", "artist": {}, "songs": []})),
        )
        .unwrap_err();
    assert!(matches!(err, Error::CannotCreateData { ref class, .. } if class == "Artist"));

    let err = DataFromPayloadResolver::new(&config)
        .execute(
            &album_class(),
            &Value::from(json!({
                "title": "Tusk",
                "status": "released",
                "released_at": "someday",
                "artist": {"name": "Fleetwood Mac"},
                "songs": []
            })),
        )
        .unwrap_err();
    assert!(matches!(err, Error::Cast { ref property, .. } if property == "released_at"));
}

#[test]
fn test_mapped_input_and_output_names() {
    init_tracing();
    let config = DataConfig::default();
    let class = DataClass::builder("Track")
        .property(DataProperty::new("track_number", PropertyType::Int))
        .property(DataProperty::new("title", PropertyType::String).map_input_name("name"))
        .map_input_names(CamelCaseMapper)
        .map_output_names(CamelCaseMapper)
        .build()
        .unwrap();

    let track = DataFromPayloadResolver::new(&config)
        .execute(&class, &Value::from(json!({"trackNumber": 3, "name": "Never Going Back Again"})))
        .unwrap();
    assert_eq!(track.get("track_number"), Some(&Value::Int(3)));

    let payload = transform(&track, &config, true, WrapExecutionType::Disabled).unwrap();
    assert_eq!(
        Value::Map(payload).to_json().unwrap(),
        json!({"trackNumber": 3, "title": "Never Going Back Again"})
    );
}

#[test]
fn test_empty_payload_for_nested_classes() {
    let config = config();
    let overrides = Payload::from([("title".to_string(), Value::from("Untitled"))]);

    let payload = EmptyDataResolver::new(&config)
        .execute(&album_class(), overrides)
        .unwrap();

    assert_eq!(
        Value::Map(payload).to_json().unwrap(),
        json!({
            "title": "Untitled",
            "status": null,
            "released_at": null,
            "artist": {"name": null, "country": null},
            "songs": [],
            "rating": null
        })
    );
}

#[test]
fn test_settings_file_drives_wrapping_and_dates() {
    init_tracing();
    let mut file = Builder::new().suffix(".yaml").tempfile().unwrap();
    writeln!(file, "wrap: data").unwrap();
    writeln!(file, "date_format: \"%d/%m/%Y\"").unwrap();

    let settings = DataSettings::from_file(file.path()).unwrap();
    let config = DataConfig::new(settings);
    config.register_class(artist_class());
    config.register_class(song_class());

    let album = DataFromPayloadResolver::new(&config)
        .execute(
            &album_class(),
            &Value::from(json!({
                "title": "Mirage",
                "status": "released",
                "released_at": "18/06/1982",
                "artist": {"name": "Fleetwood Mac"},
                "songs": []
            })),
        )
        .unwrap();

    let payload = transform(&album, &config, true, WrapExecutionType::Enabled).unwrap();
    let output = Value::Map(payload).to_json().unwrap();
    assert_eq!(output["data"]["released_at"], json!("18/06/1982"));
    assert_eq!(output["data"]["songs"], json!({"data": []}));
    assert_eq!(output["data"]["artist"], json!({"name": "Fleetwood Mac", "country": null}));
}
