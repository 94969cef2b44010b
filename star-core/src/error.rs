/// Result alias that carries [`StarError`].
pub type Result<T> = std::result::Result<T, StarError>;

/// Errors surfaced by the star core.
#[derive(Debug, thiserror::Error)]
pub enum StarError {
    /// A star needs at least two vertices to have anywhere to move to.
    #[error("a star needs at least 2 points, got {count}")]
    TooFewPoints { count: usize },
    /// The point count cannot change while the attractor is moving.
    #[error("point count is locked while the animation is running")]
    PointCountLocked,
    /// A configuration value is out of its allowed range.
    #[error("invalid config: {0}")]
    InvalidConfig(String),
    #[error("{0}")]
    Io(#[from] std::io::Error),
    #[error("{0}")]
    Json(#[from] serde_json::Error),
}

impl StarError {
    pub fn invalid_config<T: Into<String>>(msg: T) -> Self {
        Self::InvalidConfig(msg.into())
    }
}
