//! Request-scoped execution context.
//!
//! Tenant and acting user are never read from ambient state: every
//! repository operation takes a [`RequestContext`] so tenant scoping and
//! audit attribution are visible at the call site and testable in
//! isolation.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identity of the tenant and acting user for one request.
///
/// Cheap to clone; callers typically build one per request and pass it
/// by reference into every repository call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestContext {
    /// Tenant scoping key. Tags are partitioned by tenant; no operation
    /// ever reads or writes rows outside this tenant.
    pub tenant_id: Uuid,

    /// Acting user, recorded in tag audit fields (created_by/updated_by).
    pub user_id: Uuid,
}

impl RequestContext {
    pub fn new(tenant_id: Uuid, user_id: Uuid) -> Self {
        Self { tenant_id, user_id }
    }
}
