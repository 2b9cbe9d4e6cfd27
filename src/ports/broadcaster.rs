//! Broadcaster port - best-effort group fan-out.

use async_trait::async_trait;

use crate::domain::messaging::GroupName;

/// Port for delivering one payload to every current member of a group.
///
/// Delivery is best effort: a member that cannot accept the payload is
/// skipped (and logged); it never blocks or fails delivery to the others,
/// and the caller receives no per-member result. Within one group, payloads
/// sent by a single ingress invocation are delivered in call order.
#[async_trait]
pub trait Broadcaster: Send + Sync {
    /// Sends `payload` to every connection currently in `group`.
    async fn broadcast(&self, group: &GroupName, payload: &serde_json::Value);
}
