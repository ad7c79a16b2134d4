/// Errors surfaced synchronously to registration callers.
///
/// Dispatch itself never fails: decode and lookup misses are folded
/// into [`Dispatch`](super::Dispatch) outcomes.
#[derive(Debug, thiserror::Error)]
pub enum RouterError {
    #[error("invalid route pattern: {reason}")]
    InvalidPattern { reason: &'static str },

    #[error("duplicate parameter name {name:?} in pattern")]
    ParamNameConflict { name: String },

    #[error("route id {id:?} is already registered")]
    RouteIdConflict { id: String },
}
