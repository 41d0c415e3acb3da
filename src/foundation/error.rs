/// Convenience result type used across the crate.
pub type ShopkeeperResult<T> = Result<T, ShopkeeperError>;

/// Error taxonomy for the generate and download flows.
///
/// The `Display` text of the flow-level variants is what ends up in the single
/// user-facing notification, so those carry the human message only.
#[derive(thiserror::Error, Debug)]
pub enum ShopkeeperError {
    /// Invalid user input or configuration.
    #[error("validation error: {0}")]
    Validation(String),

    /// Identity lookup returned not-found or a non-success status.
    #[error("{0}")]
    Lookup(String),

    /// The skin image could not be fetched or decoded.
    #[error("{0}")]
    ImageLoad(String),

    /// Resource pack assembly or byte conversion failed.
    #[error("{0}")]
    Archive(String),

    /// Texture encoding (PNG / data URI) failed.
    #[error("encode error: {0}")]
    Encode(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ShopkeeperError {
    /// Build a [`ShopkeeperError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`ShopkeeperError::Lookup`] value.
    pub fn lookup(msg: impl Into<String>) -> Self {
        Self::Lookup(msg.into())
    }

    /// Build a [`ShopkeeperError::ImageLoad`] value.
    pub fn image_load(msg: impl Into<String>) -> Self {
        Self::ImageLoad(msg.into())
    }

    /// Build a [`ShopkeeperError::Archive`] value.
    pub fn archive(msg: impl Into<String>) -> Self {
        Self::Archive(msg.into())
    }

    /// Build a [`ShopkeeperError::Encode`] value.
    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }

    /// True for identity lookup failures.
    pub fn is_lookup(&self) -> bool {
        matches!(self, Self::Lookup(_))
    }

    /// True for skin fetch/decode failures.
    pub fn is_image_load(&self) -> bool {
        matches!(self, Self::ImageLoad(_))
    }

    /// True for resource pack assembly failures.
    pub fn is_archive(&self) -> bool {
        matches!(self, Self::Archive(_))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
