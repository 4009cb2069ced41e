use thiserror::Error;

/// Library errors using thiserror for structured error handling.
///
/// Each enum covers one stage or collaborator. The binary wraps them with
/// anyhow for context chaining.

/// Terminal failures of a single scoreboard pipeline run.
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Failed to decode scoreboard image")]
    Decode(#[source] image::ImageError),

    #[error("Text recognition failed")]
    Recognition(#[from] OcrError),

    #[error("Could not find clean stat lines. Make sure it's a clear scoreboard screenshot!")]
    NoStatsFound,
}

impl PipelineError {
    /// True for the failure the user can fix by supplying a better screenshot.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, PipelineError::NoStatsFound)
    }
}

#[derive(Error, Debug)]
pub enum OcrError {
    #[error("Failed to initialize OCR engine")]
    InitFailed(#[source] Box<dyn std::error::Error + Send + Sync>),

    #[error("Failed to configure OCR engine variable {name}")]
    ConfigureFailed {
        name: &'static str,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Failed to perform OCR on image")]
    RecognitionFailed(#[source] Box<dyn std::error::Error + Send + Sync>),

    #[error("Failed to hand image to OCR engine")]
    ImageTransferFailed(#[source] Box<dyn std::error::Error + Send + Sync>),
}

#[derive(Error, Debug)]
pub enum AdviceError {
    #[error("GEMINI_API_KEY is not set")]
    MissingApiKey,

    #[error("Advice request failed: {0}")]
    Network(String),

    #[error("Advice service returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Advice service returned a malformed response: {0}")]
    MalformedResponse(String),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load configuration from {path}")]
    LoadFailed {
        path: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Failed to save configuration to {path}")]
    SaveFailed {
        path: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Could not determine the platform config directory")]
    NoConfigDir,
}

/// Type alias for application Results using anyhow for context chaining
pub type AppResult<T> = anyhow::Result<T>;
