//! Read models served by the listing endpoints, replacing the SQL views the
//! storage layer would otherwise provide.

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::Serialize;

use super::domain::{
    LeaseId, LeaseStatus, MaintenanceId, MaintenancePriority, MaintenanceStatus, ShopId,
    ShopStatus, TenantId,
};
use super::registry::Registry;

/// Shop row augmented with its occupant and open maintenance load.
#[derive(Debug, Clone, Serialize)]
pub struct ShopSummary {
    pub id: ShopId,
    pub name: String,
    pub location: Option<String>,
    pub size_sqm: Option<f64>,
    pub rent: Option<Decimal>,
    pub status: ShopStatus,
    pub status_label: &'static str,
    pub tenant_id: Option<TenantId>,
    pub tenant_name: Option<String>,
    pub open_maintenance: usize,
}

/// Tenant row joined with its shop and current active lease.
#[derive(Debug, Clone, Serialize)]
pub struct TenantLeaseView {
    pub id: TenantId,
    pub name: String,
    pub contact: Option<String>,
    pub email: Option<String>,
    pub business_type: Option<String>,
    pub shop_id: Option<ShopId>,
    pub shop_name: Option<String>,
    pub shop_status: Option<ShopStatus>,
    pub lease_id: Option<LeaseId>,
    pub lease_start: Option<NaiveDate>,
    pub lease_end: Option<NaiveDate>,
    pub lease_rent: Option<Decimal>,
    pub lease_status: Option<LeaseStatus>,
}

/// Lease row joined with tenant and shop names.
#[derive(Debug, Clone, Serialize)]
pub struct LeaseView {
    pub id: LeaseId,
    pub tenant_id: TenantId,
    pub tenant_name: String,
    pub shop_id: ShopId,
    pub shop_name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub rent_amount: Decimal,
    pub status: LeaseStatus,
    pub status_label: &'static str,
}

/// Maintenance row joined with its shop and the shop's occupant.
#[derive(Debug, Clone, Serialize)]
pub struct MaintenanceDetails {
    pub id: MaintenanceId,
    pub shop_id: ShopId,
    pub shop_name: String,
    pub shop_location: Option<String>,
    pub shop_status: ShopStatus,
    pub description: String,
    pub reported_date: NaiveDateTime,
    pub status: MaintenanceStatus,
    pub status_label: &'static str,
    pub priority: MaintenancePriority,
    pub priority_label: &'static str,
    pub resolved_date: Option<NaiveDateTime>,
    pub resolution_notes: Option<String>,
    pub tenant_name: Option<String>,
    pub tenant_contact: Option<String>,
}

/// Headline counts for the dashboard. Reads only; the expiry sweep stays a
/// separate operation.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct DashboardSnapshot {
    pub total_shops: usize,
    pub occupied_shops: usize,
    pub total_tenants: usize,
    pub open_maintenance: usize,
}

pub(crate) fn shop_summaries(registry: &Registry) -> Vec<ShopSummary> {
    registry
        .shops()
        .map(|shop| {
            let occupant = registry.occupant(shop.id);
            ShopSummary {
                id: shop.id,
                name: shop.name.clone(),
                location: shop.location.clone(),
                size_sqm: shop.size_sqm,
                rent: shop.rent,
                status: shop.status,
                status_label: shop.status.label(),
                tenant_id: occupant.map(|tenant| tenant.id),
                tenant_name: occupant.map(|tenant| tenant.name.clone()),
                open_maintenance: registry.open_maintenance_count(shop.id),
            }
        })
        .collect()
}

pub(crate) fn tenant_lease_views(registry: &Registry) -> Vec<TenantLeaseView> {
    registry
        .tenants()
        .map(|tenant| {
            let shop = tenant.shop_id.and_then(|id| registry.shop(id));
            let lease = registry.active_lease_for_tenant(tenant.id);
            TenantLeaseView {
                id: tenant.id,
                name: tenant.name.clone(),
                contact: tenant.contact.clone(),
                email: tenant.email.clone(),
                business_type: tenant.business_type.clone(),
                shop_id: tenant.shop_id,
                shop_name: shop.map(|shop| shop.name.clone()),
                shop_status: shop.map(|shop| shop.status),
                lease_id: lease.map(|lease| lease.id),
                lease_start: lease.map(|lease| lease.start_date),
                lease_end: lease.map(|lease| lease.end_date),
                lease_rent: lease.map(|lease| lease.rent_amount),
                lease_status: lease.map(|lease| lease.status),
            }
        })
        .collect()
}

pub(crate) fn lease_views(registry: &Registry) -> Vec<LeaseView> {
    registry
        .leases()
        .map(|lease| LeaseView {
            id: lease.id,
            tenant_id: lease.tenant_id,
            tenant_name: registry
                .tenant(lease.tenant_id)
                .map(|tenant| tenant.name.clone())
                .unwrap_or_default(),
            shop_id: lease.shop_id,
            shop_name: registry
                .shop(lease.shop_id)
                .map(|shop| shop.name.clone())
                .unwrap_or_default(),
            start_date: lease.start_date,
            end_date: lease.end_date,
            rent_amount: lease.rent_amount,
            status: lease.status,
            status_label: lease.status.label(),
        })
        .collect()
}

/// Newest requests first, matching how the maintenance desk reads the queue.
pub(crate) fn maintenance_details(registry: &Registry) -> Vec<MaintenanceDetails> {
    let mut rows: Vec<MaintenanceDetails> = registry
        .maintenance_requests()
        .map(|request| {
            let shop = registry.shop(request.shop_id);
            let occupant = registry.occupant(request.shop_id);
            MaintenanceDetails {
                id: request.id,
                shop_id: request.shop_id,
                shop_name: shop.map(|shop| shop.name.clone()).unwrap_or_default(),
                shop_location: shop.and_then(|shop| shop.location.clone()),
                shop_status: shop.map(|shop| shop.status).unwrap_or(ShopStatus::Vacant),
                description: request.description.clone(),
                reported_date: request.reported_date,
                status: request.status,
                status_label: request.status.label(),
                priority: request.priority,
                priority_label: request.priority.label(),
                resolved_date: request.resolved_date,
                resolution_notes: request.resolution_notes.clone(),
                tenant_name: occupant.map(|tenant| tenant.name.clone()),
                tenant_contact: occupant.and_then(|tenant| tenant.contact.clone()),
            }
        })
        .collect();
    rows.sort_by(|a, b| b.id.cmp(&a.id));
    rows
}

pub(crate) fn dashboard_snapshot(registry: &Registry) -> DashboardSnapshot {
    DashboardSnapshot {
        total_shops: registry.shops().count(),
        occupied_shops: registry
            .shops()
            .filter(|shop| shop.status == ShopStatus::Occupied)
            .count(),
        total_tenants: registry.tenants().count(),
        open_maintenance: registry
            .maintenance_requests()
            .filter(|request| request.status.is_open())
            .count(),
    }
}
