/// Failures that stop a report from rendering at all.
///
/// Problems inside individual rows are never errors; they degrade to
/// defaults so the rest of the report still renders.
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("Lab not found: {0}")]
    LabNotFound(String),

    #[error("Report settings not found for lab: {0}")]
    SettingsNotFound(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ReportError {
    /// Whether the caller should answer with a not-found status.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::LabNotFound(_) | Self::SettingsNotFound(_))
    }
}
