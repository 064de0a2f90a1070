//! Error types for recoloring operations.

use thiserror::Error;

/// Error type for recoloring operations and settings loading.
#[derive(Error, Debug)]
pub enum RecolorError {
    /// Image cannot be recolored (zero width or height).
    #[error("invalid image: {width}x{height} ({reason})")]
    InvalidImage {
        /// Image width
        width: u32,
        /// Image height
        height: u32,
        /// Why the image was rejected
        reason: String,
    },

    /// Settings violate a precondition: a range with min > max, a darken
    /// factor outside (0, 1], a malformed or duplicated rule.
    #[error("invalid config: {0}")]
    InvalidConfig(String),

    /// I/O error reading a settings file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parse error in a settings file.
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl RecolorError {
    /// Creates a [`RecolorError::InvalidImage`] error.
    #[inline]
    pub fn invalid_image(width: u32, height: u32, reason: impl Into<String>) -> Self {
        Self::InvalidImage {
            width,
            height,
            reason: reason.into(),
        }
    }

    /// Creates a [`RecolorError::InvalidConfig`] error.
    #[inline]
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }

    /// Returns `true` for [`RecolorError::InvalidImage`].
    #[inline]
    pub fn is_invalid_image(&self) -> bool {
        matches!(self, Self::InvalidImage { .. })
    }

    /// Returns `true` for [`RecolorError::InvalidConfig`].
    #[inline]
    pub fn is_invalid_config(&self) -> bool {
        matches!(self, Self::InvalidConfig(_))
    }
}

/// Result type for recoloring operations.
pub type RecolorResult<T> = Result<T, RecolorError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_image_message() {
        let err = RecolorError::invalid_image(0, 10, "zero-area image");
        assert!(err.to_string().contains("0x10"));
        assert!(err.is_invalid_image());
        assert!(!err.is_invalid_config());
    }

    #[test]
    fn test_yaml_conversion() {
        let yaml_err = serde_yaml::from_str::<u8>("[1, 2").unwrap_err();
        let err: RecolorError = yaml_err.into();
        assert!(matches!(err, RecolorError::Yaml(_)));
    }
}
