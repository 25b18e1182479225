use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LibraryError {
    #[error("Failed to {context}: {source}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Rename(#[from] RenameError),

    #[error("{} is not a PDF in the library", .0.display())]
    NotManaged(PathBuf),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RenameError {
    #[error("The new name is empty once unsupported characters are removed")]
    EmptyName,

    #[error("A file named '{}' already exists", .0.display())]
    AlreadyExists(PathBuf),
}

impl LibraryError {
    pub(crate) fn io(context: impl Into<String>) -> impl FnOnce(std::io::Error) -> Self {
        let context = context.into();
        move |source| LibraryError::Io { context, source }
    }
}
