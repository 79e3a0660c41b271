#[derive(Debug, thiserror::Error)]
pub enum PortalError {
    #[error("{0}")]
    InvalidInput(String),
    #[error("User with this email already exists.")]
    DuplicateIdentity,
    #[error("Invalid email or password.")]
    InvalidCredentials,
    #[error("Patient not found.")]
    NotFound,
    #[error("Patient not found.")]
    PatientNotFound,
    #[error("NAMASTE Code not found in the terminology service.")]
    CodeNotFound,

    #[error("duplicate catalog code: {0}")]
    DuplicateCatalogCode(String),
    #[error("failed to read catalog file: {0}")]
    CatalogRead(std::io::Error),
    #[error("failed to parse catalog: {0}")]
    CatalogParse(String),

    #[error("patient store is unavailable")]
    StoreUnavailable,

    #[error("FHIR error: {0}")]
    Fhir(#[from] fhir::FhirError),
}

pub type PortalResult<T> = std::result::Result<T, PortalError>;
