use std::sync::Arc;

use axum::response::Response;
use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde_json::Value;

use crate::backoffice::domain::{
    LeaseDraft, LeaseStatus, MaintenanceDraft, MaintenancePriority, MaintenanceStatus, ShopDraft,
    ShopId, TenantDraft, TenantId,
};
use crate::backoffice::occupancy::derived_status;
use crate::backoffice::router::backoffice_router;
use crate::backoffice::service::BackOfficeService;

pub(super) fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}

pub(super) fn datetime(year: i32, month: u32, day: u32) -> NaiveDateTime {
    date(year, month, day).and_hms_opt(10, 30, 0).expect("valid time")
}

pub(super) fn shop_draft(name: &str) -> ShopDraft {
    ShopDraft {
        name: name.to_string(),
        location: Some("1st Floor".to_string()),
        size_sqm: Some(100.0),
        rent: Some(Decimal::from(5000)),
    }
}

pub(super) fn tenant_draft(name: &str, shop_id: Option<ShopId>) -> TenantDraft {
    TenantDraft {
        name: name.to_string(),
        contact: Some("9876543210".to_string()),
        email: Some(format!("{}@example.com", name.to_ascii_lowercase())),
        business_type: Some("Retail".to_string()),
        shop_id,
    }
}

pub(super) fn lease_draft(
    tenant_id: TenantId,
    shop_id: ShopId,
    start: NaiveDate,
    end: NaiveDate,
) -> LeaseDraft {
    LeaseDraft {
        tenant_id,
        shop_id,
        start_date: start,
        end_date: end,
        rent_amount: Decimal::from(5000),
        status: LeaseStatus::Active,
    }
}

pub(super) fn maintenance_draft(shop_id: ShopId, priority: MaintenancePriority) -> MaintenanceDraft {
    MaintenanceDraft {
        shop_id,
        description: "Leaky pipe in restroom".to_string(),
        reported_date: datetime(2025, 7, 15),
        status: MaintenanceStatus::Pending,
        priority,
        resolution_notes: None,
    }
}

pub(super) fn add_shop(service: &BackOfficeService, name: &str) -> ShopId {
    service.create_shop(shop_draft(name)).expect("shop created").id
}

pub(super) fn add_tenant(service: &BackOfficeService, name: &str, shop_id: Option<ShopId>) -> TenantId {
    service
        .create_tenant(tenant_draft(name, shop_id))
        .expect("tenant created")
        .id
}

/// Every shop's stored status must match the occupancy derivation.
pub(super) fn assert_consistent(service: &BackOfficeService) {
    let registry = service.snapshot();
    for shop in registry.shops() {
        assert_eq!(
            shop.status,
            derived_status(&registry, shop.id),
            "shop {} status drifted from the derivation",
            shop.id
        );
    }
}

pub(super) fn router(service: Arc<BackOfficeService>) -> axum::Router {
    backoffice_router(service)
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

pub(super) fn json_request(
    method: &str,
    uri: &str,
    payload: &Value,
) -> axum::http::Request<axum::body::Body> {
    axum::http::Request::builder()
        .method(method)
        .uri(uri)
        .header(axum::http::header::CONTENT_TYPE, "application/json")
        .body(axum::body::Body::from(
            serde_json::to_vec(payload).expect("serializable payload"),
        ))
        .expect("request builds")
}

pub(super) fn empty_request(method: &str, uri: &str) -> axum::http::Request<axum::body::Body> {
    axum::http::Request::builder()
        .method(method)
        .uri(uri)
        .body(axum::body::Body::empty())
        .expect("request builds")
}
