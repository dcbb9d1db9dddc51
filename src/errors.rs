use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum InterpretError {
    #[error("ERROR on line {line}: {reason}")]
    Syntax { line: usize, reason: String },

    #[error("ERROR on line {line}: {reason}")]
    Semantic { line: usize, reason: String },

    #[error("missing branch target '{0}'")]
    MissingBranchTarget(String),

    #[error("segfault")]
    Segfault,

    #[error("output error: {0}")]
    Output(String),
}
