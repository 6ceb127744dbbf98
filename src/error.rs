use thiserror::Error;

pub type ChartResult<T> = Result<T, ChartError>;

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("invalid viewport size: width={width}, height={height}")]
    InvalidViewport { width: u32, height: u32 },

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("unknown scenario key `{0}` (expected ethTransfer, swap or aiAgent)")]
    UnknownScenario(String),

    #[error("render backend failure: {0}")]
    Backend(String),
}
