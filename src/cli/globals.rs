use crate::ensaluti::redirect::AppDomainTable;

/// Runtime configuration shared with every handler. Injected through an axum
/// Extension so tests can substitute their own origins.
#[derive(Debug, Clone)]
pub struct GlobalArgs {
    pub auth_url: String,
    pub domains: AppDomainTable,
}

impl GlobalArgs {
    #[must_use]
    pub fn new(auth_url: String, domains: AppDomainTable) -> Self {
        Self { auth_url, domains }
    }
}
