use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Catalog error: {0}")]
    Catalog(#[from] meal_catalog::CatalogError),

    #[error("Invalid engine configuration: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, EngineError>;
