use thiserror::Error;

pub type ChartResult<T> = Result<T, ChartError>;

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("unexpected {axis} scale kind `{kind}` (expected `band` or `linear`)")]
    UnexpectedScale { axis: String, kind: String },

    #[error("length of event names ({names}) and handlers ({handlers}) should be the same")]
    InjectArity { names: usize, handlers: usize },

    #[error("invalid domain: {0}")]
    InvalidDomain(String),

    #[error("invalid dimension: {0}")]
    InvalidDimension(String),

    #[error("invalid data: {0}")]
    InvalidData(String),
}
