use crate::dto::HealthRes;

/// Simple health service shared by the REST API and any future transport.
#[derive(Clone, Default)]
pub struct HealthService;

impl HealthService {
    /// Static health check; the in-memory stores cannot be "down" independently of the process.
    ///
    /// # Returns
    /// A `HealthRes` indicating the service is healthy.
    pub fn check_health() -> HealthRes {
        HealthRes {
            ok: true,
            message: "Arogya Portal is alive".into(),
        }
    }
}
