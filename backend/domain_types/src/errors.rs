pub type CustomResult<T, E> = Result<T, error_stack::Report<E>>;

/// Failure taxonomy of the request assembly core.
///
/// Anything not listed here is a soft degradation and resolves to a default
/// (missing optional party fields, unparseable birth dates, absent VAT).
#[derive(Debug, thiserror::Error)]
pub enum ConnectorError {
    #[error("Required {resource} snapshot could not be read")]
    DataUnavailable { resource: &'static str },
    #[error("Transaction assembly invoked without a usable order")]
    InvalidTransactionContext,
    #[error("Refund has no resolvable original transaction reference")]
    MissingOriginalTransaction,
    #[error("Missing required field {field_name}")]
    MissingRequiredField { field_name: &'static str },
    #[error("Failed to encode request payload")]
    RequestEncodingFailed,
}
