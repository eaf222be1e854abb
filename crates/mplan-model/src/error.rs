use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("master data is not valid JSON: {0}")]
    MasterDataJson(#[from] serde_json::Error),
    #[error("master data must be a JSON object, found {found}")]
    MasterDataShape { found: &'static str },
}

pub type Result<T> = std::result::Result<T, ModelError>;
