//! Shop-occupancy rule engine.
//!
//! Every write to `tenant.shop_id` and every refresh of `shop.status` flows
//! through this module, inside the same transaction as the entity write that
//! triggered it. The rest of the crate never touches either field directly.

use super::domain::{ShopId, ShopStatus, TenantId};
use super::error::BackOfficeError;
use super::registry::Registry;

/// Compute the status a shop must carry given the current records.
///
/// Precedence, highest first: an open high-priority maintenance request
/// forces `Maintenance`; otherwise a referencing tenant means `Occupied`;
/// otherwise `Vacant`.
pub fn derived_status(registry: &Registry, shop_id: ShopId) -> ShopStatus {
    if registry.has_open_high_priority(shop_id) {
        ShopStatus::Maintenance
    } else if registry.occupant(shop_id).is_some() {
        ShopStatus::Occupied
    } else {
        ShopStatus::Vacant
    }
}

/// Rewrite the shop's stored status from the derivation. Idempotent, and a
/// no-op for shops that no longer exist (cascade deletes refresh ids whose
/// shop row is already gone).
pub(crate) fn refresh_shop(registry: &mut Registry, shop_id: ShopId) {
    let status = derived_status(registry, shop_id);
    if let Some(shop) = registry.shop_mut(shop_id) {
        shop.status = status;
    }
}

/// Point a tenant at a shop (or at none), enforcing the one-tenant-per-shop
/// rule and refreshing both sides of the move.
pub(crate) fn assign_tenant_to_shop(
    registry: &mut Registry,
    tenant_id: TenantId,
    shop_id: Option<ShopId>,
) -> Result<(), BackOfficeError> {
    let previous = registry
        .tenant(tenant_id)
        .ok_or(BackOfficeError::tenant_not_found(tenant_id))?
        .shop_id;

    if let Some(target) = shop_id {
        if registry.shop(target).is_none() {
            return Err(BackOfficeError::shop_not_found(target));
        }
        if let Some(occupant) = registry.occupant(target) {
            if occupant.id != tenant_id {
                return Err(BackOfficeError::ShopAlreadyAssigned {
                    shop_id: target,
                    occupant: occupant.id,
                });
            }
        }
    }

    if let Some(tenant) = registry.tenant_mut(tenant_id) {
        tenant.shop_id = shop_id;
    }

    if let Some(old) = previous {
        refresh_shop(registry, old);
    }
    if let Some(new) = shop_id {
        refresh_shop(registry, new);
    }

    Ok(())
}

/// Recompute a tenant's assignment after the lease that backed it stopped
/// being active: fall back to another active lease of the same tenant, else
/// clear the assignment.
pub(crate) fn settle_tenant_assignment(
    registry: &mut Registry,
    tenant_id: TenantId,
) -> Result<(), BackOfficeError> {
    if registry.tenant(tenant_id).is_none() {
        // Tenant went away in the same transaction (cascade delete).
        return Ok(());
    }
    let fallback = registry
        .active_lease_for_tenant(tenant_id)
        .map(|lease| lease.shop_id);
    assign_tenant_to_shop(registry, tenant_id, fallback)
}
