use std::collections::BTreeMap;

use chrono::NaiveDateTime;

use super::domain::{
    Lease, LeaseDraft, LeaseId, LeaseStatus, MaintenanceDraft, MaintenanceId, MaintenancePriority,
    MaintenanceRequest, Shop, ShopDraft, ShopId, ShopStatus, Tenant, TenantDraft, TenantId,
};

/// In-memory entity store for the four back-office record types.
///
/// The registry is plain data: it allocates ids, stores rows, and answers the
/// relational queries the occupancy engine needs. Invariant enforcement and
/// status derivation live in the service and engine layers, which mutate a
/// working copy of the registry and commit it atomically.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    shops: BTreeMap<ShopId, Shop>,
    tenants: BTreeMap<TenantId, Tenant>,
    leases: BTreeMap<LeaseId, Lease>,
    maintenance: BTreeMap<MaintenanceId, MaintenanceRequest>,
    next_shop_id: u64,
    next_tenant_id: u64,
    next_lease_id: u64,
    next_maintenance_id: u64,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_shop(&mut self, draft: ShopDraft) -> ShopId {
        self.next_shop_id += 1;
        let id = ShopId(self.next_shop_id);
        self.shops.insert(
            id,
            Shop {
                id,
                name: draft.name,
                location: draft.location,
                size_sqm: draft.size_sqm,
                rent: draft.rent,
                status: ShopStatus::Vacant,
            },
        );
        id
    }

    /// Stores the tenant unassigned; shop assignment always goes through the
    /// occupancy engine afterwards.
    pub fn insert_tenant(&mut self, draft: TenantDraft) -> TenantId {
        self.next_tenant_id += 1;
        let id = TenantId(self.next_tenant_id);
        self.tenants.insert(
            id,
            Tenant {
                id,
                name: draft.name,
                contact: draft.contact,
                email: draft.email,
                business_type: draft.business_type,
                shop_id: None,
            },
        );
        id
    }

    pub fn insert_lease(&mut self, draft: LeaseDraft) -> LeaseId {
        self.next_lease_id += 1;
        let id = LeaseId(self.next_lease_id);
        self.leases.insert(
            id,
            Lease {
                id,
                tenant_id: draft.tenant_id,
                shop_id: draft.shop_id,
                start_date: draft.start_date,
                end_date: draft.end_date,
                rent_amount: draft.rent_amount,
                status: draft.status,
            },
        );
        id
    }

    pub fn insert_maintenance(
        &mut self,
        draft: MaintenanceDraft,
        resolved_date: Option<NaiveDateTime>,
    ) -> MaintenanceId {
        self.next_maintenance_id += 1;
        let id = MaintenanceId(self.next_maintenance_id);
        self.maintenance.insert(
            id,
            MaintenanceRequest {
                id,
                shop_id: draft.shop_id,
                description: draft.description,
                reported_date: draft.reported_date,
                status: draft.status,
                priority: draft.priority,
                resolved_date,
                resolution_notes: draft.resolution_notes,
            },
        );
        id
    }

    pub fn shop(&self, id: ShopId) -> Option<&Shop> {
        self.shops.get(&id)
    }

    pub fn shop_mut(&mut self, id: ShopId) -> Option<&mut Shop> {
        self.shops.get_mut(&id)
    }

    pub fn remove_shop(&mut self, id: ShopId) -> Option<Shop> {
        self.shops.remove(&id)
    }

    pub fn tenant(&self, id: TenantId) -> Option<&Tenant> {
        self.tenants.get(&id)
    }

    pub fn tenant_mut(&mut self, id: TenantId) -> Option<&mut Tenant> {
        self.tenants.get_mut(&id)
    }

    pub fn remove_tenant(&mut self, id: TenantId) -> Option<Tenant> {
        self.tenants.remove(&id)
    }

    pub fn lease(&self, id: LeaseId) -> Option<&Lease> {
        self.leases.get(&id)
    }

    pub fn lease_mut(&mut self, id: LeaseId) -> Option<&mut Lease> {
        self.leases.get_mut(&id)
    }

    pub fn remove_lease(&mut self, id: LeaseId) -> Option<Lease> {
        self.leases.remove(&id)
    }

    pub fn maintenance(&self, id: MaintenanceId) -> Option<&MaintenanceRequest> {
        self.maintenance.get(&id)
    }

    pub fn maintenance_mut(&mut self, id: MaintenanceId) -> Option<&mut MaintenanceRequest> {
        self.maintenance.get_mut(&id)
    }

    pub fn remove_maintenance(&mut self, id: MaintenanceId) -> Option<MaintenanceRequest> {
        self.maintenance.remove(&id)
    }

    pub fn shops(&self) -> impl Iterator<Item = &Shop> {
        self.shops.values()
    }

    pub fn tenants(&self) -> impl Iterator<Item = &Tenant> {
        self.tenants.values()
    }

    pub fn leases(&self) -> impl Iterator<Item = &Lease> {
        self.leases.values()
    }

    pub fn maintenance_requests(&self) -> impl Iterator<Item = &MaintenanceRequest> {
        self.maintenance.values()
    }

    /// The tenant currently referencing the shop, if any. The service keeps
    /// this at most one.
    pub fn occupant(&self, shop_id: ShopId) -> Option<&Tenant> {
        self.tenants
            .values()
            .find(|tenant| tenant.shop_id == Some(shop_id))
    }

    pub fn tenant_ids_for_shop(&self, shop_id: ShopId) -> Vec<TenantId> {
        self.tenants
            .values()
            .filter(|tenant| tenant.shop_id == Some(shop_id))
            .map(|tenant| tenant.id)
            .collect()
    }

    pub fn active_lease_for_shop(
        &self,
        shop_id: ShopId,
        exclude: Option<LeaseId>,
    ) -> Option<&Lease> {
        self.leases.values().find(|lease| {
            lease.shop_id == shop_id
                && lease.status == LeaseStatus::Active
                && Some(lease.id) != exclude
        })
    }

    pub fn active_lease_for_tenant(&self, tenant_id: TenantId) -> Option<&Lease> {
        self.leases
            .values()
            .find(|lease| lease.tenant_id == tenant_id && lease.status == LeaseStatus::Active)
    }

    pub fn lease_ids_for_shop(&self, shop_id: ShopId) -> Vec<LeaseId> {
        self.leases
            .values()
            .filter(|lease| lease.shop_id == shop_id)
            .map(|lease| lease.id)
            .collect()
    }

    pub fn lease_ids_for_tenant(&self, tenant_id: TenantId) -> Vec<LeaseId> {
        self.leases
            .values()
            .filter(|lease| lease.tenant_id == tenant_id)
            .map(|lease| lease.id)
            .collect()
    }

    pub fn maintenance_ids_for_shop(&self, shop_id: ShopId) -> Vec<MaintenanceId> {
        self.maintenance
            .values()
            .filter(|request| request.shop_id == shop_id)
            .map(|request| request.id)
            .collect()
    }

    /// Count of pending or in-progress requests against the shop.
    pub fn open_maintenance_count(&self, shop_id: ShopId) -> usize {
        self.maintenance
            .values()
            .filter(|request| request.shop_id == shop_id && request.status.is_open())
            .count()
    }

    /// True while an unresolved high-priority request holds the shop.
    pub fn has_open_high_priority(&self, shop_id: ShopId) -> bool {
        self.maintenance.values().any(|request| {
            request.shop_id == shop_id
                && request.status.is_open()
                && request.priority == MaintenancePriority::High
        })
    }
}
