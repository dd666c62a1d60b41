use std::fmt;

use serde::Serialize;

use super::domain::{LeaseId, MaintenanceId, ShopId, TenantId};

/// Entity kinds referenced in error messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Shop,
    Tenant,
    Lease,
    Maintenance,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EntityKind::Shop => "shop",
            EntityKind::Tenant => "tenant",
            EntityKind::Lease => "lease",
            EntityKind::Maintenance => "maintenance request",
        };
        f.write_str(name)
    }
}

/// Coarse classification used to map errors onto the HTTP surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    NotFound,
    Validation,
    Conflict,
}

/// Errors raised by the back-office service. Every mutating operation that
/// returns one of these leaves the registry and all derived statuses
/// untouched.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BackOfficeError {
    #[error("{kind} {id} not found")]
    NotFound { kind: EntityKind, id: u64 },
    #[error("{kind} name is required")]
    NameRequired { kind: EntityKind },
    #[error("maintenance description is required")]
    DescriptionRequired,
    #[error("invalid date '{value}': expected YYYY-MM-DD")]
    MalformedDate { value: String },
    #[error("lease end date must fall after the start date")]
    LeaseDatesInverted,
    #[error("lease rent amount must be positive")]
    NonPositiveRent,
    #[error("shop {shop_id} already has an active lease")]
    ActiveLeaseExists { shop_id: ShopId },
    #[error("shop {shop_id} is already assigned to tenant {occupant}")]
    ShopAlreadyAssigned { shop_id: ShopId, occupant: TenantId },
    #[error("{kind} {id} has dependent records; delete with cascade to remove them")]
    DependentsExist { kind: EntityKind, id: u64 },
}

impl BackOfficeError {
    pub const fn class(&self) -> ErrorClass {
        match self {
            BackOfficeError::NotFound { .. } => ErrorClass::NotFound,
            BackOfficeError::NameRequired { .. }
            | BackOfficeError::DescriptionRequired
            | BackOfficeError::MalformedDate { .. }
            | BackOfficeError::LeaseDatesInverted
            | BackOfficeError::NonPositiveRent => ErrorClass::Validation,
            BackOfficeError::ActiveLeaseExists { .. }
            | BackOfficeError::ShopAlreadyAssigned { .. }
            | BackOfficeError::DependentsExist { .. } => ErrorClass::Conflict,
        }
    }

    pub(crate) fn shop_not_found(id: ShopId) -> Self {
        BackOfficeError::NotFound {
            kind: EntityKind::Shop,
            id: id.0,
        }
    }

    pub(crate) fn tenant_not_found(id: TenantId) -> Self {
        BackOfficeError::NotFound {
            kind: EntityKind::Tenant,
            id: id.0,
        }
    }

    pub(crate) fn lease_not_found(id: LeaseId) -> Self {
        BackOfficeError::NotFound {
            kind: EntityKind::Lease,
            id: id.0,
        }
    }

    pub(crate) fn maintenance_not_found(id: MaintenanceId) -> Self {
        BackOfficeError::NotFound {
            kind: EntityKind::Maintenance,
            id: id.0,
        }
    }
}
