#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// An acknowledgement timeout fired for a service with no stored alert
    /// record. The timer subsystem only arms timers for services the Pager
    /// has paged, so this indicates a collaborator bug or data loss.
    #[error("No open alert found for service {service_id}")]
    NotFound { service_id: String },

    /// An escalation policy was configured with zero levels.
    #[error("Escalation policy must contain at least one level")]
    EmptyPolicy,
}
