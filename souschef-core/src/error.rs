use thiserror::Error;

use crate::llm::LlmError;

/// Error type for one handled conversation turn.
#[derive(Error, Debug)]
pub enum ChatError {
    /// The router could not obtain a usable intent from the model.
    ///
    /// This is distinct from an unrecognized-but-successful reply, which maps
    /// to `Intent::Unsupported`; a transport or quota failure here must not
    /// be downgraded to a guessed intent.
    #[error("intent classification failed: {source}")]
    Classification { source: LlmError },

    /// Required context or request field absent for the chosen intent.
    #[error("missing required parameter: {name}")]
    MissingParameter { name: &'static str },

    /// A stage's language model call failed.
    #[error("language model call failed: {0}")]
    Model(#[from] LlmError),
}
