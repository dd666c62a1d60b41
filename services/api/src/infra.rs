use chrono::NaiveDate;
use metrics_exporter_prometheus::PrometheusHandle;
use rust_decimal::Decimal;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use mall_ops::backoffice::{
    BackOfficeService, LeaseDraft, LeaseStatus, MaintenanceDraft, MaintenancePriority,
    MaintenanceStatus, ShopDraft, TenantDraft,
};
use mall_ops::error::AppError;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}

/// Load the sample mall portfolio: four shops, three occupying tenants with
/// active leases, and three maintenance requests. Everything flows through
/// the service so every shop status is derived, not asserted.
pub(crate) fn seed_demo_portfolio(service: &BackOfficeService) -> Result<(), AppError> {
    let clothing = service
        .create_shop(shop("Clothing Store", "1st Floor", 100.0, 5000))?
        .id;
    // The second floor stays vacant in the sample portfolio.
    let _electronics = service
        .create_shop(shop("Electronics", "2nd Floor", 150.0, 7500))?
        .id;
    let cafe = service
        .create_shop(shop("Café", "Ground Floor", 80.0, 4000))?
        .id;
    let bookstore = service
        .create_shop(shop("Bookstore", "3rd Floor", 120.0, 6000))?
        .id;

    let john = service
        .create_tenant(tenant(
            "John Doe",
            "9876543210",
            "john@example.com",
            "Retail",
        ))?
        .id;
    let jane = service
        .create_tenant(tenant("Jane Smith", "8765432109", "jane@example.com", "Food"))?
        .id;
    let bob = service
        .create_tenant(tenant(
            "Bob Johnson",
            "7654321098",
            "bob@example.com",
            "Books",
        ))?
        .id;

    service.create_lease(LeaseDraft {
        tenant_id: john,
        shop_id: clothing,
        start_date: date(2023, 1, 1),
        end_date: date(2024, 1, 1),
        rent_amount: Decimal::from(5000),
        status: LeaseStatus::Active,
    })?;
    service.create_lease(LeaseDraft {
        tenant_id: jane,
        shop_id: cafe,
        start_date: date(2023, 3, 1),
        end_date: date(2024, 3, 1),
        rent_amount: Decimal::from(4000),
        status: LeaseStatus::Active,
    })?;
    service.create_lease(LeaseDraft {
        tenant_id: bob,
        shop_id: bookstore,
        start_date: date(2023, 6, 1),
        end_date: date(2024, 6, 1),
        rent_amount: Decimal::from(6000),
        status: LeaseStatus::Active,
    })?;

    service.create_maintenance(
        MaintenanceDraft {
            shop_id: clothing,
            description: "Leaky pipe in restroom".to_string(),
            reported_date: datetime(2023, 7, 15, 10, 30),
            status: MaintenanceStatus::Pending,
            priority: MaintenancePriority::High,
            resolution_notes: None,
        },
        datetime(2023, 7, 15, 10, 30),
    )?;
    service.create_maintenance(
        MaintenanceDraft {
            shop_id: cafe,
            description: "AC not working properly".to_string(),
            reported_date: datetime(2023, 7, 16, 14, 45),
            status: MaintenanceStatus::InProgress,
            priority: MaintenancePriority::Medium,
            resolution_notes: None,
        },
        datetime(2023, 7, 16, 14, 45),
    )?;
    service.create_maintenance(
        MaintenanceDraft {
            shop_id: bookstore,
            description: "Light fixture replacement needed".to_string(),
            reported_date: datetime(2023, 7, 17, 9, 15),
            status: MaintenanceStatus::Pending,
            priority: MaintenancePriority::Low,
            resolution_notes: None,
        },
        datetime(2023, 7, 17, 9, 15),
    )?;

    Ok(())
}

fn shop(name: &str, location: &str, size_sqm: f64, rent: u32) -> ShopDraft {
    ShopDraft {
        name: name.to_string(),
        location: Some(location.to_string()),
        size_sqm: Some(size_sqm),
        rent: Some(Decimal::from(rent)),
    }
}

fn tenant(name: &str, contact: &str, email: &str, business_type: &str) -> TenantDraft {
    TenantDraft {
        name: name.to_string(),
        contact: Some(contact.to_string()),
        email: Some(email.to_string()),
        business_type: Some(business_type.to_string()),
        shop_id: None,
    }
}

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid seed date")
}

fn datetime(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> chrono::NaiveDateTime {
    date(year, month, day)
        .and_hms_opt(hour, minute, 0)
        .expect("valid seed time")
}
