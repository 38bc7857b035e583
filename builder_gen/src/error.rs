use crate::model::ModelError;
use thiserror::Error;

/// Errors raised while synthesizing a builder or folding an extension into it.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SynthesisError {
    /// A mutation of the target type was rejected by the host.
    #[error(transparent)]
    Model(#[from] ModelError),

    /// An extension was folded before `$Builder` was installed on the type.
    #[error("type '{type_name}' has no generated builder to fold extensions into")]
    MissingBuilder { type_name: String },

    /// A required field's stage interface would be named like a generated member type.
    #[error("required field '{field}' of type '{type_name}' would name its stage '{stage}', which is reserved")]
    ReservedStageName {
        type_name: String,
        field: String,
        stage: String,
    },
}

pub type Result<T> = std::result::Result<T, SynthesisError>;
