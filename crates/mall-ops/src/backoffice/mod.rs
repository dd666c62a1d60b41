//! Shop, tenant, lease, and maintenance bookkeeping with a derived
//! occupancy status.
//!
//! The occupancy engine in [`occupancy`] is the one place that writes
//! `tenant.shop_id` and `shop.status`; the service wraps it and the entity
//! registry in per-operation transactions so callers only ever observe
//! consistent state.

pub mod domain;
pub mod error;
pub mod occupancy;
pub mod registry;
pub mod router;
pub mod service;
pub mod views;

#[cfg(test)]
mod tests;

pub use domain::{
    DeletePolicy, Lease, LeaseDraft, LeaseId, LeaseStatus, MaintenanceDraft, MaintenanceId,
    MaintenancePriority, MaintenanceRequest, MaintenanceStatus, Shop, ShopDraft, ShopId,
    ShopStatus, Tenant, TenantDraft, TenantId,
};
pub use error::{BackOfficeError, EntityKind, ErrorClass};
pub use registry::Registry;
pub use router::backoffice_router;
pub use service::BackOfficeService;
pub use views::{
    DashboardSnapshot, LeaseView, MaintenanceDetails, ShopSummary, TenantLeaseView,
};
