//! Integration scenarios for the lease lifecycle: conflicts, fallbacks, and
//! the opportunistic expiry sweep.

use std::sync::Arc;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tower::ServiceExt;

use mall_ops::backoffice::{
    backoffice_router, BackOfficeService, LeaseDraft, LeaseStatus, ShopDraft, ShopId, ShopStatus,
    TenantDraft, TenantId,
};

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}

fn shop(service: &BackOfficeService, name: &str) -> ShopId {
    service
        .create_shop(ShopDraft {
            name: name.to_string(),
            location: None,
            size_sqm: None,
            rent: None,
        })
        .expect("shop created")
        .id
}

fn tenant(service: &BackOfficeService, name: &str) -> TenantId {
    service
        .create_tenant(TenantDraft {
            name: name.to_string(),
            contact: None,
            email: None,
            business_type: None,
            shop_id: None,
        })
        .expect("tenant created")
        .id
}

fn draft(tenant_id: TenantId, shop_id: ShopId, start: NaiveDate, end: NaiveDate) -> LeaseDraft {
    LeaseDraft {
        tenant_id,
        shop_id,
        start_date: start,
        end_date: end,
        rent_amount: Decimal::from(6000),
        status: LeaseStatus::Active,
    }
}

#[test]
fn renewal_replaces_the_expired_term_without_gaps() {
    let service = BackOfficeService::new();
    let shop_id = shop(&service, "Bookstore");
    let tenant_id = tenant(&service, "Bob Johnson");

    let lease = service
        .create_lease(draft(tenant_id, shop_id, date(2023, 6, 1), date(2024, 6, 1)))
        .expect("initial term created");

    // The sweep expires the old term...
    assert_eq!(service.expire_leases(date(2024, 6, 2)), 1);
    assert_eq!(service.lease(lease.id).unwrap().status, LeaseStatus::Expired);
    // ...but leaves occupancy alone until the books are corrected.
    assert_eq!(service.tenant(tenant_id).unwrap().shop_id, Some(shop_id));
    assert_eq!(service.shop(shop_id).unwrap().status, ShopStatus::Occupied);

    // With the old term expired, the renewal slots in without conflict.
    let renewal = service
        .create_lease(draft(tenant_id, shop_id, date(2024, 6, 2), date(2025, 6, 2)))
        .expect("renewal created");
    assert_eq!(renewal.status, LeaseStatus::Active);
    assert_eq!(service.tenant(tenant_id).unwrap().shop_id, Some(shop_id));
}

#[test]
fn sweep_only_touches_overdue_active_leases() {
    let service = BackOfficeService::new();
    let first = shop(&service, "Café");
    let second = shop(&service, "Kiosk");
    let third = shop(&service, "Stall");
    let a = tenant(&service, "A");
    let b = tenant(&service, "B");
    let c = tenant(&service, "C");

    service
        .create_lease(draft(a, first, date(2023, 1, 1), date(2024, 1, 1)))
        .expect("overdue lease");
    service
        .create_lease(draft(b, second, date(2024, 1, 1), date(2024, 7, 1)))
        .expect("lease ending today");
    let mut history = draft(c, third, date(2022, 1, 1), date(2023, 1, 1));
    history.status = LeaseStatus::Expired;
    service.create_lease(history).expect("already expired lease");

    assert_eq!(service.expire_leases(date(2024, 7, 1)), 1);
    assert_eq!(service.expire_leases(date(2024, 7, 1)), 0);

    let statuses: Vec<LeaseStatus> = service
        .list_leases()
        .into_iter()
        .map(|lease| lease.status)
        .collect();
    assert_eq!(
        statuses,
        vec![LeaseStatus::Expired, LeaseStatus::Active, LeaseStatus::Expired]
    );
}

#[tokio::test]
async fn lease_lifecycle_over_http_keeps_responses_in_step() {
    let service = Arc::new(BackOfficeService::new());
    let shop_id = shop(&service, "Electronics");
    let tenant_id = tenant(&service, "Jane Smith");
    let router = backoffice_router(service.clone());

    let create = axum::http::Request::builder()
        .method("POST")
        .uri("/api/leases")
        .header(axum::http::header::CONTENT_TYPE, "application/json")
        .body(axum::body::Body::from(
            serde_json::json!({
                "tenant_id": tenant_id.0,
                "shop_id": shop_id.0,
                "start_date": "2025-01-01",
                "end_date": "2026-01-01",
                "rent_amount": "7500",
            })
            .to_string(),
        ))
        .expect("request builds");

    let response = router.clone().oneshot(create).await.expect("route executes");
    assert_eq!(response.status(), axum::http::StatusCode::CREATED);

    let listing = router
        .oneshot(
            axum::http::Request::builder()
                .method("GET")
                .uri("/api/tenants")
                .body(axum::body::Body::empty())
                .expect("request builds"),
        )
        .await
        .expect("route executes");
    let body = axum::body::to_bytes(listing.into_body(), 64 * 1024)
        .await
        .expect("read body");
    let rows: serde_json::Value = serde_json::from_slice(&body).expect("json payload");
    let row = rows.as_array().expect("tenant rows").first().cloned().expect("one row");
    assert_eq!(row.get("shop_name"), Some(&serde_json::json!("Electronics")));
    assert_eq!(row.get("lease_status"), Some(&serde_json::json!("active")));
    assert_eq!(row.get("shop_status"), Some(&serde_json::json!("occupied")));
}
