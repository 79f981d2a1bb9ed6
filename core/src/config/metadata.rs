//! Build-time metadata embedded into the binary.
//!
//! Release builds can bake keys in by exporting `VERTEX_AI_API_KEY` /
//! `SARVAM_AI_API_KEY` while compiling. Nothing is read at runtime.

use super::StaticConfig;
use crate::keys::KeyName;

fn embedded(key: KeyName) -> Option<&'static str> {
    match key {
        KeyName::VertexAi => option_env!("VERTEX_AI_API_KEY"),
        KeyName::SarvamAi => option_env!("SARVAM_AI_API_KEY"),
    }
}

pub fn load() -> StaticConfig {
    KeyName::ALL
        .into_iter()
        .filter_map(|key| embedded(key).map(|value| (key, value.to_string())))
        .collect()
}
