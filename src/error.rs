use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum UnionFindError {
    #[error("unknown element {key}, never registered with add()")]
    UnknownElement { key: String },

    #[error("element index {index} out of range for universe of {len}")]
    OutOfRange { index: usize, len: usize },
}
