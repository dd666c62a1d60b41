use std::sync::Mutex;

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use tracing::info;

use super::domain::{
    DeletePolicy, Lease, LeaseDraft, LeaseId, LeaseStatus, MaintenanceDraft, MaintenanceId,
    MaintenanceRequest, MaintenanceStatus, Shop, ShopDraft, ShopId, Tenant, TenantDraft, TenantId,
};
use super::error::{BackOfficeError, EntityKind};
use super::occupancy;
use super::registry::Registry;
use super::views::{
    self, DashboardSnapshot, LeaseView, MaintenanceDetails, ShopSummary, TenantLeaseView,
};

/// Facade over the entity registry, the occupancy rule engine, the lease
/// lifecycle rules, and the maintenance status coupler.
///
/// Each mutating call is one unit of work: the registry is cloned under the
/// lock, every write (entity rows plus derived shop statuses) lands on the
/// clone, and the clone replaces the shared state only when the whole
/// operation succeeded. Readers lock the same mutex, so no caller ever
/// observes a shop whose status lags a committed change.
#[derive(Debug, Default)]
pub struct BackOfficeService {
    state: Mutex<Registry>,
}

impl BackOfficeService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_registry(registry: Registry) -> Self {
        Self {
            state: Mutex::new(registry),
        }
    }

    fn read<T>(&self, view: impl FnOnce(&Registry) -> T) -> T {
        let guard = self.state.lock().expect("registry mutex poisoned");
        view(&guard)
    }

    fn transact<T>(
        &self,
        apply: impl FnOnce(&mut Registry) -> Result<T, BackOfficeError>,
    ) -> Result<T, BackOfficeError> {
        let mut guard = self.state.lock().expect("registry mutex poisoned");
        let mut working = guard.clone();
        let value = apply(&mut working)?;
        *guard = working;
        Ok(value)
    }

    /// Copy of the committed registry, mainly for demos and invariant checks.
    pub fn snapshot(&self) -> Registry {
        self.read(Registry::clone)
    }

    // --- shops ---

    pub fn create_shop(&self, draft: ShopDraft) -> Result<Shop, BackOfficeError> {
        validate_shop(&draft)?;
        self.transact(|registry| {
            let id = registry.insert_shop(draft);
            info!(shop = %id, "shop created");
            fetch_shop(registry, id)
        })
    }

    pub fn shop(&self, id: ShopId) -> Result<Shop, BackOfficeError> {
        self.read(|registry| fetch_shop(registry, id))
    }

    pub fn update_shop(&self, id: ShopId, draft: ShopDraft) -> Result<Shop, BackOfficeError> {
        validate_shop(&draft)?;
        self.transact(|registry| {
            let shop = registry
                .shop_mut(id)
                .ok_or(BackOfficeError::shop_not_found(id))?;
            shop.name = draft.name;
            shop.location = draft.location;
            shop.size_sqm = draft.size_sqm;
            shop.rent = draft.rent;
            occupancy::refresh_shop(registry, id);
            fetch_shop(registry, id)
        })
    }

    pub fn delete_shop(&self, id: ShopId, policy: DeletePolicy) -> Result<(), BackOfficeError> {
        self.transact(|registry| {
            if registry.shop(id).is_none() {
                return Err(BackOfficeError::shop_not_found(id));
            }

            let occupants = registry.tenant_ids_for_shop(id);
            let lease_ids = registry.lease_ids_for_shop(id);
            let maintenance_ids = registry.maintenance_ids_for_shop(id);

            let has_dependents =
                !occupants.is_empty() || !lease_ids.is_empty() || !maintenance_ids.is_empty();
            if has_dependents && policy == DeletePolicy::Block {
                return Err(BackOfficeError::DependentsExist {
                    kind: EntityKind::Shop,
                    id: id.0,
                });
            }

            for maintenance_id in maintenance_ids {
                registry.remove_maintenance(maintenance_id);
            }

            let mut displaced = occupants;
            for lease_id in lease_ids {
                if let Some(lease) = registry.remove_lease(lease_id) {
                    if lease.status == LeaseStatus::Active && !displaced.contains(&lease.tenant_id)
                    {
                        displaced.push(lease.tenant_id);
                    }
                }
            }

            registry.remove_shop(id);

            // Displaced tenants fall back to their next active lease, if any.
            for tenant_id in displaced {
                occupancy::settle_tenant_assignment(registry, tenant_id)?;
            }

            info!(shop = %id, ?policy, "shop deleted");
            Ok(())
        })
    }

    pub fn list_shops(&self) -> Vec<ShopSummary> {
        self.read(views::shop_summaries)
    }

    // --- tenants ---

    pub fn create_tenant(&self, draft: TenantDraft) -> Result<Tenant, BackOfficeError> {
        validate_tenant(&draft)?;
        self.transact(|registry| {
            let target = draft.shop_id;
            let id = registry.insert_tenant(draft);
            if target.is_some() {
                occupancy::assign_tenant_to_shop(registry, id, target)?;
            }
            info!(tenant = %id, "tenant created");
            fetch_tenant(registry, id)
        })
    }

    pub fn tenant(&self, id: TenantId) -> Result<Tenant, BackOfficeError> {
        self.read(|registry| fetch_tenant(registry, id))
    }

    pub fn update_tenant(&self, id: TenantId, draft: TenantDraft) -> Result<Tenant, BackOfficeError> {
        validate_tenant(&draft)?;
        self.transact(|registry| {
            let current_shop = {
                let tenant = registry
                    .tenant_mut(id)
                    .ok_or(BackOfficeError::tenant_not_found(id))?;
                tenant.name = draft.name;
                tenant.contact = draft.contact;
                tenant.email = draft.email;
                tenant.business_type = draft.business_type;
                tenant.shop_id
            };
            if current_shop != draft.shop_id {
                occupancy::assign_tenant_to_shop(registry, id, draft.shop_id)?;
            }
            fetch_tenant(registry, id)
        })
    }

    pub fn delete_tenant(&self, id: TenantId, policy: DeletePolicy) -> Result<(), BackOfficeError> {
        self.transact(|registry| {
            let shop_id = registry
                .tenant(id)
                .ok_or(BackOfficeError::tenant_not_found(id))?
                .shop_id;

            let lease_ids = registry.lease_ids_for_tenant(id);
            if !lease_ids.is_empty() && policy == DeletePolicy::Block {
                return Err(BackOfficeError::DependentsExist {
                    kind: EntityKind::Tenant,
                    id: id.0,
                });
            }

            for lease_id in lease_ids {
                registry.remove_lease(lease_id);
            }
            registry.remove_tenant(id);
            if let Some(shop_id) = shop_id {
                occupancy::refresh_shop(registry, shop_id);
            }

            info!(tenant = %id, ?policy, "tenant deleted");
            Ok(())
        })
    }

    /// Explicit occupancy-engine entry point: move the tenant to a shop or
    /// clear the assignment.
    pub fn reassign_tenant(
        &self,
        id: TenantId,
        shop_id: Option<ShopId>,
    ) -> Result<Tenant, BackOfficeError> {
        self.transact(|registry| {
            occupancy::assign_tenant_to_shop(registry, id, shop_id)?;
            fetch_tenant(registry, id)
        })
    }

    pub fn list_tenants(&self) -> Vec<TenantLeaseView> {
        self.read(views::tenant_lease_views)
    }

    // --- leases ---

    pub fn create_lease(&self, draft: LeaseDraft) -> Result<Lease, BackOfficeError> {
        validate_lease(&draft)?;
        self.transact(|registry| {
            let tenant_id = draft.tenant_id;
            let shop_id = draft.shop_id;
            let status = draft.status;

            if registry.tenant(tenant_id).is_none() {
                return Err(BackOfficeError::tenant_not_found(tenant_id));
            }
            if registry.shop(shop_id).is_none() {
                return Err(BackOfficeError::shop_not_found(shop_id));
            }
            if status == LeaseStatus::Active
                && registry.active_lease_for_shop(shop_id, None).is_some()
            {
                return Err(BackOfficeError::ActiveLeaseExists { shop_id });
            }

            let id = registry.insert_lease(draft);
            if status == LeaseStatus::Active {
                occupancy::assign_tenant_to_shop(registry, tenant_id, Some(shop_id))?;
            }
            info!(lease = %id, shop = %shop_id, tenant = %tenant_id, "lease created");
            fetch_lease(registry, id)
        })
    }

    pub fn lease(&self, id: LeaseId) -> Result<Lease, BackOfficeError> {
        self.read(|registry| fetch_lease(registry, id))
    }

    pub fn update_lease(&self, id: LeaseId, draft: LeaseDraft) -> Result<Lease, BackOfficeError> {
        validate_lease(&draft)?;
        self.transact(|registry| {
            let previous = fetch_lease(registry, id)?;

            if registry.tenant(draft.tenant_id).is_none() {
                return Err(BackOfficeError::tenant_not_found(draft.tenant_id));
            }
            if registry.shop(draft.shop_id).is_none() {
                return Err(BackOfficeError::shop_not_found(draft.shop_id));
            }
            // Re-checked whenever the lease ends up active, shop change or not.
            if draft.status == LeaseStatus::Active
                && registry
                    .active_lease_for_shop(draft.shop_id, Some(id))
                    .is_some()
            {
                return Err(BackOfficeError::ActiveLeaseExists {
                    shop_id: draft.shop_id,
                });
            }

            let tenant_id = draft.tenant_id;
            let shop_id = draft.shop_id;
            let status = draft.status;
            if let Some(lease) = registry.lease_mut(id) {
                lease.tenant_id = draft.tenant_id;
                lease.shop_id = draft.shop_id;
                lease.start_date = draft.start_date;
                lease.end_date = draft.end_date;
                lease.rent_amount = draft.rent_amount;
                lease.status = draft.status;
            }

            let was_active = previous.status == LeaseStatus::Active;
            if was_active && (status != LeaseStatus::Active || previous.tenant_id != tenant_id) {
                // The lease no longer backs its previous tenant.
                occupancy::settle_tenant_assignment(registry, previous.tenant_id)?;
            }
            if status == LeaseStatus::Active {
                occupancy::assign_tenant_to_shop(registry, tenant_id, Some(shop_id))?;
            }

            fetch_lease(registry, id)
        })
    }

    pub fn delete_lease(&self, id: LeaseId) -> Result<(), BackOfficeError> {
        self.transact(|registry| {
            let lease = registry
                .remove_lease(id)
                .ok_or(BackOfficeError::lease_not_found(id))?;
            if lease.status == LeaseStatus::Active {
                occupancy::settle_tenant_assignment(registry, lease.tenant_id)?;
            }
            info!(lease = %id, "lease deleted");
            Ok(())
        })
    }

    /// Mark every active lease whose end date has passed as expired. Pure
    /// status sweep: strict less-than, no tenant or shop reassignment, safe
    /// to run repeatedly.
    pub fn expire_leases(&self, today: NaiveDate) -> usize {
        let expired = self
            .transact(|registry| {
                let due: Vec<LeaseId> = registry
                    .leases()
                    .filter(|lease| {
                        lease.status == LeaseStatus::Active && lease.end_date < today
                    })
                    .map(|lease| lease.id)
                    .collect();
                for lease_id in &due {
                    if let Some(lease) = registry.lease_mut(*lease_id) {
                        lease.status = LeaseStatus::Expired;
                    }
                }
                Ok(due.len())
            })
            .unwrap_or(0);
        if expired > 0 {
            info!(count = expired, %today, "expired overdue leases");
        }
        expired
    }

    pub fn list_leases(&self) -> Vec<LeaseView> {
        self.read(views::lease_views)
    }

    // --- maintenance ---

    pub fn create_maintenance(
        &self,
        draft: MaintenanceDraft,
        now: NaiveDateTime,
    ) -> Result<MaintenanceRequest, BackOfficeError> {
        validate_maintenance(&draft)?;
        self.transact(|registry| {
            let shop_id = draft.shop_id;
            if registry.shop(shop_id).is_none() {
                return Err(BackOfficeError::shop_not_found(shop_id));
            }
            let resolved_date = (draft.status == MaintenanceStatus::Completed).then_some(now);
            let id = registry.insert_maintenance(draft, resolved_date);
            occupancy::refresh_shop(registry, shop_id);
            info!(maintenance = %id, shop = %shop_id, "maintenance request filed");
            fetch_maintenance(registry, id)
        })
    }

    pub fn maintenance(&self, id: MaintenanceId) -> Result<MaintenanceRequest, BackOfficeError> {
        self.read(|registry| fetch_maintenance(registry, id))
    }

    pub fn update_maintenance(
        &self,
        id: MaintenanceId,
        draft: MaintenanceDraft,
        now: NaiveDateTime,
    ) -> Result<MaintenanceRequest, BackOfficeError> {
        validate_maintenance(&draft)?;
        self.transact(|registry| {
            let previous_shop = fetch_maintenance(registry, id)?.shop_id;
            if registry.shop(draft.shop_id).is_none() {
                return Err(BackOfficeError::shop_not_found(draft.shop_id));
            }

            let new_shop = draft.shop_id;
            if let Some(request) = registry.maintenance_mut(id) {
                request.shop_id = draft.shop_id;
                request.description = draft.description;
                request.reported_date = draft.reported_date;
                request.status = draft.status;
                request.priority = draft.priority;
                request.resolution_notes = draft.resolution_notes;
                // Stamped once; reopening a request never clears it.
                if request.status == MaintenanceStatus::Completed
                    && request.resolved_date.is_none()
                {
                    request.resolved_date = Some(now);
                }
            }

            occupancy::refresh_shop(registry, previous_shop);
            if new_shop != previous_shop {
                occupancy::refresh_shop(registry, new_shop);
            }
            fetch_maintenance(registry, id)
        })
    }

    /// Resolve a request: mark it completed, stamp `resolved_date` if this is
    /// the first completion, store the notes verbatim, and let the shop fall
    /// back to Occupied or Vacant once nothing open holds it.
    pub fn complete_maintenance(
        &self,
        id: MaintenanceId,
        notes: Option<String>,
        now: NaiveDateTime,
    ) -> Result<MaintenanceRequest, BackOfficeError> {
        self.transact(|registry| {
            let shop_id = {
                let request = registry
                    .maintenance_mut(id)
                    .ok_or(BackOfficeError::maintenance_not_found(id))?;
                request.status = MaintenanceStatus::Completed;
                if request.resolved_date.is_none() {
                    request.resolved_date = Some(now);
                }
                request.resolution_notes = notes;
                request.shop_id
            };
            occupancy::refresh_shop(registry, shop_id);
            info!(maintenance = %id, shop = %shop_id, "maintenance request completed");
            fetch_maintenance(registry, id)
        })
    }

    pub fn delete_maintenance(&self, id: MaintenanceId) -> Result<(), BackOfficeError> {
        self.transact(|registry| {
            let request = registry
                .remove_maintenance(id)
                .ok_or(BackOfficeError::maintenance_not_found(id))?;
            occupancy::refresh_shop(registry, request.shop_id);
            Ok(())
        })
    }

    pub fn list_maintenance(&self) -> Vec<MaintenanceDetails> {
        self.read(views::maintenance_details)
    }

    // --- dashboard ---

    pub fn dashboard(&self) -> DashboardSnapshot {
        self.read(views::dashboard_snapshot)
    }
}

fn fetch_shop(registry: &Registry, id: ShopId) -> Result<Shop, BackOfficeError> {
    registry
        .shop(id)
        .cloned()
        .ok_or(BackOfficeError::shop_not_found(id))
}

fn fetch_tenant(registry: &Registry, id: TenantId) -> Result<Tenant, BackOfficeError> {
    registry
        .tenant(id)
        .cloned()
        .ok_or(BackOfficeError::tenant_not_found(id))
}

fn fetch_lease(registry: &Registry, id: LeaseId) -> Result<Lease, BackOfficeError> {
    registry
        .lease(id)
        .cloned()
        .ok_or(BackOfficeError::lease_not_found(id))
}

fn fetch_maintenance(
    registry: &Registry,
    id: MaintenanceId,
) -> Result<MaintenanceRequest, BackOfficeError> {
    registry
        .maintenance(id)
        .cloned()
        .ok_or(BackOfficeError::maintenance_not_found(id))
}

fn validate_shop(draft: &ShopDraft) -> Result<(), BackOfficeError> {
    if draft.name.trim().is_empty() {
        return Err(BackOfficeError::NameRequired {
            kind: EntityKind::Shop,
        });
    }
    Ok(())
}

fn validate_tenant(draft: &TenantDraft) -> Result<(), BackOfficeError> {
    if draft.name.trim().is_empty() {
        return Err(BackOfficeError::NameRequired {
            kind: EntityKind::Tenant,
        });
    }
    Ok(())
}

fn validate_lease(draft: &LeaseDraft) -> Result<(), BackOfficeError> {
    if draft.end_date <= draft.start_date {
        return Err(BackOfficeError::LeaseDatesInverted);
    }
    if draft.rent_amount <= Decimal::ZERO {
        return Err(BackOfficeError::NonPositiveRent);
    }
    Ok(())
}

fn validate_maintenance(draft: &MaintenanceDraft) -> Result<(), BackOfficeError> {
    if draft.description.trim().is_empty() {
        return Err(BackOfficeError::DescriptionRequired);
    }
    Ok(())
}
