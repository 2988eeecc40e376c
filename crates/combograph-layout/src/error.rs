#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid position range: lower bound {lo} exceeds upper bound {hi}")]
    InvalidRange { lo: f64, hi: f64 },
    #[error("only mapping-like position structures are supported, got {found}")]
    NotAMapping { found: String },
    #[error("position for node {id} must be an [x, y] pair or an {{x, y}} object")]
    InvalidCoordinate { id: String },
}

pub type Result<T> = std::result::Result<T, Error>;
