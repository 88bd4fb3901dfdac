/// Reasons a navigation request could not be handed to the list.
///
/// Never fatal: the carousel logs these and carries on.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NavigationError {
    #[error("navigation handle is not attached (requested index {0})")]
    Detached(usize),
    #[error("navigation to index {index} rejected by host: {reason}")]
    Rejected { index: usize, reason: String },
}
