use miette::{Diagnostic, SourceSpan};
use thiserror::Error;

pub type DialogueResult<T> = Result<T, DialogueError>;

#[derive(Debug, Error, Diagnostic)]
pub enum DialogueError {
    #[error("script payload rejected: {0}")]
    #[diagnostic(code("dialogue.invalid_script"))]
    InvalidScript(String),
    #[error("interpreter failure: {0}")]
    #[diagnostic(code("dialogue.interpreter"))]
    Interpreter(String),
    #[error("choice index out of range")]
    #[diagnostic(code("dialogue.invalid_choice"))]
    InvalidChoice,
    #[error("serialization error: {message}")]
    #[diagnostic(code("dialogue.serialization"))]
    Serialization {
        message: String,
        #[source_code]
        src: String,
        #[label("here")]
        span: SourceSpan,
    },
}
