use serde::{Deserialize, Serialize};

/// Identifier of the administrative operator issuing a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OperatorId(pub i64);

/// Capability check consulted at the HTTP boundary before any workflow
/// command runs. The services themselves trust that the check passed.
pub trait AccessPolicy: Send + Sync {
    fn may_administer(&self, operator: OperatorId) -> bool;
}

/// Policy that admits every operator. Suitable for demos and tests only.
#[derive(Debug, Default, Clone, Copy)]
pub struct OpenAccess;

impl AccessPolicy for OpenAccess {
    fn may_administer(&self, _operator: OperatorId) -> bool {
        true
    }
}
