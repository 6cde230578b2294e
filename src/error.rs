use thiserror::Error;

pub type SpecResult<T> = Result<T, SpecError>;

#[derive(Debug, Error)]
pub enum SpecError {
    /// A chart strategy failed to supply a required pipeline step.
    ///
    /// Raised immediately and never absorbed: this is a programming-contract
    /// violation, not a data problem.
    #[error("chart strategy does not override required step `{step}`")]
    MissingOverride { step: &'static str },
}
