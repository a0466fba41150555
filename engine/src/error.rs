use thiserror::Error;

pub type Result<T, E = DiceError> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum DiceError {
    #[error("tried to make a dice with a non-positive number of sides ({sides})")]
    InvalidConfiguration { sides: i32 },

    #[error("invalid dice notation '{input}': {reason}")]
    InvalidNotation { input: String, reason: String },

    #[error("unknown preset '{0}'")]
    UnknownPreset(String),

    #[error("failed to read presets file {path}")]
    PresetIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse YAML presets")]
    PresetYaml(#[from] serde_yaml::Error),

    #[error("failed to parse JSON presets")]
    PresetJson(#[from] serde_json::Error),
}

impl DiceError {
    pub(crate) fn notation(input: &str, reason: impl Into<String>) -> Self {
        Self::InvalidNotation {
            input: input.to_string(),
            reason: reason.into(),
        }
    }
}
