use thiserror::Error as ThisError;

/// Route table configuration errors, fatal at startup.
#[derive(Debug, Clone, PartialEq, Eq, ThisError)]
pub enum RouterError {
    #[error("duplicate route path: {path}")]
    DuplicatePath { path: String },

    #[error("redirect from {path} targets unknown path {target}")]
    DanglingRedirect { path: String, target: String },

    #[error("redirect chain starting at {path} never reaches a view")]
    RedirectCycle { path: String },
}
