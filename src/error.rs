pub type GlowpulseResult<T> = Result<T, GlowpulseError>;

#[derive(thiserror::Error, Debug)]
pub enum GlowpulseError {
    #[error("image load error: {0}")]
    ImageLoad(String),

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("resource limit exceeded: {0}")]
    ResourceExhausted(String),

    #[error("encode error: {0}")]
    Encode(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl GlowpulseError {
    pub fn image_load(msg: impl Into<String>) -> Self {
        Self::ImageLoad(msg.into())
    }

    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }

    pub fn resource_exhausted(msg: impl Into<String>) -> Self {
        Self::ResourceExhausted(msg.into())
    }

    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }
}
