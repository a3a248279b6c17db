// Documented portal endpoint paths.
//
// Only STATUS is exercised by this client. The admin paths exist on the
// server and are declared for completeness; approval workflows happen in
// the portal's own UI, not through this client.

/// Aggregate status + people list. The one endpoint this client polls.
pub const STATUS: &str = "/api/ha/status";

/// Pending approval requests (admin UI surface, not called here).
pub const ADMIN_PENDING: &str = "/api/admin/pending";

/// Approve a pending request (admin UI surface, not called here).
pub const ADMIN_APPROVE: &str = "/api/admin/approve";

/// Deny a pending request (admin UI surface, not called here).
pub const ADMIN_DENY: &str = "/api/admin/deny";
