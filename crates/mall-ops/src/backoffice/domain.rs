use std::fmt;

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Identifier wrapper for leasable shop units.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct ShopId(pub u64);

/// Identifier wrapper for tenant businesses.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct TenantId(pub u64);

/// Identifier wrapper for lease agreements.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct LeaseId(pub u64);

/// Identifier wrapper for maintenance requests.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct MaintenanceId(pub u64);

impl fmt::Display for ShopId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl fmt::Display for TenantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl fmt::Display for LeaseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl fmt::Display for MaintenanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Occupancy state of a shop. Always derived from the current tenant and
/// maintenance records; callers never set it directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShopStatus {
    Vacant,
    Occupied,
    Maintenance,
}

impl ShopStatus {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Vacant => "Vacant",
            Self::Occupied => "Occupied",
            Self::Maintenance => "Maintenance",
        }
    }
}

/// A leasable unit of floor space in the mall.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shop {
    pub id: ShopId,
    pub name: String,
    pub location: Option<String>,
    pub size_sqm: Option<f64>,
    pub rent: Option<Decimal>,
    pub status: ShopStatus,
}

/// A business entity that may occupy a shop. `shop_id` is a weak reference,
/// not ownership; at most one tenant may reference a given shop at a time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tenant {
    pub id: TenantId,
    pub name: String,
    pub contact: Option<String>,
    pub email: Option<String>,
    pub business_type: Option<String>,
    pub shop_id: Option<ShopId>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeaseStatus {
    Active,
    Expired,
}

impl LeaseStatus {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::Expired => "Expired",
        }
    }
}

/// A time-bounded rental agreement binding one tenant to one shop.
/// At most one lease per shop may be Active at any time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lease {
    pub id: LeaseId,
    pub tenant_id: TenantId,
    pub shop_id: ShopId,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub rent_amount: Decimal,
    pub status: LeaseStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaintenanceStatus {
    Pending,
    InProgress,
    Completed,
}

impl MaintenanceStatus {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::InProgress => "In Progress",
            Self::Completed => "Completed",
        }
    }

    /// Pending and in-progress requests still hold the shop.
    pub const fn is_open(self) -> bool {
        matches!(self, Self::Pending | Self::InProgress)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaintenancePriority {
    Low,
    Medium,
    High,
}

impl MaintenancePriority {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }
}

/// A reported issue against a shop with priority and resolution tracking.
/// `resolved_date` is stamped exactly once, on the transition into Completed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaintenanceRequest {
    pub id: MaintenanceId,
    pub shop_id: ShopId,
    pub description: String,
    pub reported_date: NaiveDateTime,
    pub status: MaintenanceStatus,
    pub priority: MaintenancePriority,
    pub resolved_date: Option<NaiveDateTime>,
    pub resolution_notes: Option<String>,
}

/// Behavior when deleting an entity that other records still reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeletePolicy {
    /// Refuse the delete while dependent records exist.
    #[default]
    Block,
    /// Remove dependent records along with the entity.
    Cascade,
}

impl DeletePolicy {
    pub const fn from_cascade_flag(cascade: bool) -> Self {
        if cascade {
            Self::Cascade
        } else {
            Self::Block
        }
    }
}

/// Caller-supplied shop fields. Status is absent on purpose: the occupancy
/// engine owns it.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ShopDraft {
    pub name: String,
    pub location: Option<String>,
    pub size_sqm: Option<f64>,
    pub rent: Option<Decimal>,
}

/// Caller-supplied tenant fields.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TenantDraft {
    pub name: String,
    pub contact: Option<String>,
    pub email: Option<String>,
    pub business_type: Option<String>,
    pub shop_id: Option<ShopId>,
}

/// Caller-supplied lease fields.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LeaseDraft {
    pub tenant_id: TenantId,
    pub shop_id: ShopId,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub rent_amount: Decimal,
    pub status: LeaseStatus,
}

/// Caller-supplied maintenance fields. `resolved_date` is absent on purpose:
/// the maintenance coupler stamps it.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MaintenanceDraft {
    pub shop_id: ShopId,
    pub description: String,
    pub reported_date: NaiveDateTime,
    pub status: MaintenanceStatus,
    pub priority: MaintenancePriority,
    pub resolution_notes: Option<String>,
}
