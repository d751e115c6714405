//! Shared test support utilities for integration tests
#![allow(dead_code)]

use datakit_core::{
    DataClass, DataCollection, DataConfig, DataObject, DataProperty, EnumValue, Lazy,
    PropertyType, RelationSource, Value,
};
use std::collections::HashSet;
use std::sync::Arc;

/// Route engine traces to the test output; honours `RUST_LOG`
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub fn artist_class() -> Arc<DataClass> {
    DataClass::builder("Artist")
        .property(DataProperty::new("name", PropertyType::String))
        .property(DataProperty::new("country", PropertyType::String).nullable())
        .build()
        .expect("artist class")
}

pub fn song_class() -> Arc<DataClass> {
    DataClass::builder("Song")
        .property(DataProperty::new("title", PropertyType::String))
        .property(DataProperty::new("duration", PropertyType::Int))
        .property(DataProperty::new("lyrics", PropertyType::String).lazy())
        .build()
        .expect("song class")
}

pub fn album_class() -> Arc<DataClass> {
    DataClass::builder("Album")
        .property(DataProperty::new("title", PropertyType::String))
        .property(DataProperty::new("status", PropertyType::Enum("Status".into())))
        .property(DataProperty::new("released_at", PropertyType::DateTime).nullable())
        .property(DataProperty::new("artist", PropertyType::Data("Artist".into())))
        .property(DataProperty::new("songs", PropertyType::DataCollection("Song".into())))
        .property(DataProperty::new("rating", PropertyType::Int).optional())
        .allowed_includes(["songs.lyrics"])
        .allowed_excludes(["*"])
        .build()
        .expect("album class")
}

/// Configuration with every fixture class registered
pub fn config() -> DataConfig {
    let config = DataConfig::default();
    config.register_class(artist_class());
    config.register_class(song_class());
    config.register_class(album_class());
    config
}

pub fn song(title: &str, duration: i64) -> DataObject {
    let lyrics = format!("lyrics of {title}");
    DataObject::from_values(
        song_class(),
        [
            ("title", Value::from(title)),
            ("duration", Value::from(duration)),
            ("lyrics", Value::from(Lazy::create(move || lyrics.clone()))),
        ],
    )
    .expect("song")
}

pub fn rumours() -> DataObject {
    let artist = DataObject::from_values(
        artist_class(),
        [("name", Value::from("Fleetwood Mac")), ("country", Value::Null)],
    )
    .expect("artist");
    let songs = DataCollection::new(song_class(), vec![song("Dreams", 257), song("Songbird", 200)])
        .expect("songs");

    DataObject::from_values(
        album_class(),
        [
            ("title", Value::from("Rumours")),
            ("status", Value::from(EnumValue::backed("Released", "released"))),
            ("released_at", Value::Null),
            ("artist", Value::from(artist)),
            ("songs", Value::from(songs)),
            ("rating", Value::Optional),
        ],
    )
    .expect("album")
}

/// Stand-in for an ORM model with eagerly loaded relations
pub struct Model {
    pub loaded: HashSet<&'static str>,
}

impl Model {
    pub fn with_loaded(relations: &[&'static str]) -> Self {
        Self {
            loaded: relations.iter().copied().collect(),
        }
    }
}

impl RelationSource for Model {
    fn relation_loaded(&self, relation: &str) -> bool {
        self.loaded.contains(relation)
    }
}
