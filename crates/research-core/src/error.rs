use thiserror::Error;

#[derive(Error, Debug)]
pub enum ResearchError {
    #[error("Symbol extraction failed: {0}")]
    Extraction(String),

    #[error("Missing configuration: {0}")]
    Configuration(String),

    #[error("API error: {0}")]
    Api(String),

    #[error("Report rendering failed: {0}")]
    Render(String),

    #[error("Invalid data: {0}")]
    InvalidData(String),
}
