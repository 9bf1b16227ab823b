//! Error types for deck composition.
//!
//! Authoring defects never surface here; they degrade to dropped slides or
//! fallbacks. Only catalog problems that leave no fallback are errors.

use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while loading a deck or validating catalogs.
#[derive(Error, Debug)]
pub enum Error {
    /// The deck could not be parsed from JSON.
    #[error("Invalid deck JSON: {0}")]
    InvalidDeck(#[from] serde_json::Error),

    /// The layout catalog names no default layout.
    #[error("Layout catalog has no default layout key")]
    MissingDefaultLayout,

    /// The default layout key is not present among the catalog's descriptors.
    #[error("Default layout '{0}' is not defined in the layout catalog")]
    UnknownDefaultLayout(String),

    /// A layout slot names no content kind or layout intent.
    #[error("Layout catalog slot '{0}' does not name a content kind")]
    UnknownLayoutSlot(String),

    /// The icon catalog has no entries at all.
    #[error("Icon catalog is empty")]
    EmptyIconCatalog,

    /// The generic fallback icon is not present in the icon catalog.
    #[error("Generic icon '{0}' is not defined in the icon catalog")]
    MissingGenericIcon(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            Error::UnknownDefaultLayout("bullets".into()).to_string(),
            "Default layout 'bullets' is not defined in the layout catalog"
        );
        assert_eq!(Error::EmptyIconCatalog.to_string(), "Icon catalog is empty");
        assert_eq!(
            Error::UnknownLayoutSlot("bulets".into()).to_string(),
            "Layout catalog slot 'bulets' does not name a content kind"
        );
    }

    #[test]
    fn test_from_json_error() {
        let err: Error = serde_json::from_str::<u32>("nope").unwrap_err().into();
        assert!(matches!(err, Error::InvalidDeck(_)));
    }
}
