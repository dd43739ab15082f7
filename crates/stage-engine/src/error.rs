use std::path::PathBuf;

/// Errors raised by an [`AnimationPlayer`](crate::components::animation::AnimationPlayer).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AnimationError {
    /// The clip name was never declared on this player.
    #[error("animation clip `{0}` not found")]
    NotFound(String),

    /// A clip with this name is already declared on this player.
    #[error("animation clip `{0}` already declared")]
    AlreadyExists(String),

    /// The clip descriptor cannot be played (zero frames or zero frame rate).
    #[error("animation clip `{name}` is invalid: {reason}")]
    InvalidClip { name: String, reason: &'static str },
}

/// Errors raised while loading or looking up assets.
#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    /// I/O error reading a descriptor file.
    #[error("I/O error for {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The descriptor file is not valid JSON for the requested type.
    #[error("JSON parse error for {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// No texture registered under this name.
    #[error("texture `{0}` is not registered")]
    TextureNotFound(String),

    /// No atlas region under this key.
    #[error("no atlas region named `{0}`")]
    RegionNotFound(String),

    /// No named frame in a spritesheet.
    #[error("no spritesheet frame named `{0}`")]
    FrameNotFound(String),
}

/// Umbrella error for scene hooks and stage operations.
#[derive(Debug, thiserror::Error)]
pub enum StageError {
    #[error(transparent)]
    Animation(#[from] AnimationError),

    #[error(transparent)]
    Asset(#[from] AssetError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn animation_errors_name_the_clip() {
        let err = AnimationError::NotFound("walk".into());
        assert_eq!(err.to_string(), "animation clip `walk` not found");
    }

    #[test]
    fn stage_error_wraps_transparently() {
        let err: StageError = AssetError::RegionNotFound("hero".into()).into();
        assert_eq!(err.to_string(), "no atlas region named `hero`");
        assert!(matches!(err, StageError::Asset(AssetError::RegionNotFound(_))));
    }
}
