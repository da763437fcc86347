use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("unknown layer `{0}` (expected stars, clouds or globe)")]
    UnknownLayer(String),
    #[error("unknown globe order `{0}` (expected two-pass or depth-sort)")]
    UnknownGlobeOrder(String),
    #[error("quality `{0}` is not a number in (0, 1]")]
    InvalidQuality(String),
    #[error("flag `{0}` is not true or false")]
    InvalidFlag(String),
}

#[derive(Debug, Error, PartialEq)]
pub enum IlluminationError {
    #[error("illumination image has zero size ({width}x{height})")]
    EmptyImage { width: u32, height: u32 },
    #[error("illumination pixel buffer holds {actual} bytes, expected {expected}")]
    BufferSize { expected: usize, actual: usize },
}
