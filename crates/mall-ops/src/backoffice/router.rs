use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use chrono::{Local, NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::json;

use super::domain::{
    DeletePolicy, LeaseDraft, LeaseId, LeaseStatus, MaintenanceDraft, MaintenanceId,
    MaintenancePriority, MaintenanceStatus, ShopDraft, ShopId, TenantDraft, TenantId,
};
use super::error::{BackOfficeError, ErrorClass};
use super::service::BackOfficeService;

/// Router builder exposing the back-office REST surface.
pub fn backoffice_router(service: Arc<BackOfficeService>) -> Router {
    Router::new()
        .route("/api/dashboard", get(dashboard_handler))
        .route("/api/shops", get(list_shops_handler).post(create_shop_handler))
        .route(
            "/api/shops/:id",
            get(get_shop_handler)
                .put(update_shop_handler)
                .delete(delete_shop_handler),
        )
        .route(
            "/api/tenants",
            get(list_tenants_handler).post(create_tenant_handler),
        )
        .route(
            "/api/tenants/:id",
            get(get_tenant_handler)
                .put(update_tenant_handler)
                .delete(delete_tenant_handler),
        )
        .route("/api/tenants/:id/reassign", post(reassign_tenant_handler))
        .route(
            "/api/leases",
            get(list_leases_handler).post(create_lease_handler),
        )
        .route("/api/leases/expire-check", post(expire_leases_handler))
        .route(
            "/api/leases/:id",
            get(get_lease_handler)
                .put(update_lease_handler)
                .delete(delete_lease_handler),
        )
        .route(
            "/api/maintenance",
            get(list_maintenance_handler).post(create_maintenance_handler),
        )
        .route(
            "/api/maintenance/:id",
            get(get_maintenance_handler)
                .put(update_maintenance_handler)
                .delete(delete_maintenance_handler),
        )
        .route(
            "/api/maintenance/:id/complete",
            post(complete_maintenance_handler),
        )
        .with_state(service)
}

impl IntoResponse for BackOfficeError {
    fn into_response(self) -> Response {
        let status = match self.class() {
            ErrorClass::NotFound => StatusCode::NOT_FOUND,
            ErrorClass::Validation => StatusCode::BAD_REQUEST,
            ErrorClass::Conflict => StatusCode::CONFLICT,
        };
        let body = Json(json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, BackOfficeError> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").map_err(|_| BackOfficeError::MalformedDate {
        value: raw.to_string(),
    })
}

/// Accepts `YYYY-MM-DD HH:MM:SS` or a bare `YYYY-MM-DD` (midnight).
pub(crate) fn parse_datetime(raw: &str) -> Result<NaiveDateTime, BackOfficeError> {
    let trimmed = raw.trim();
    NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%d %H:%M:%S")
        .ok()
        .or_else(|| {
            NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
        .ok_or_else(|| BackOfficeError::MalformedDate {
            value: raw.to_string(),
        })
}

#[derive(Debug, Deserialize)]
pub(crate) struct DeleteQuery {
    #[serde(default)]
    pub(crate) cascade: bool,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TenantPayload {
    pub(crate) name: String,
    pub(crate) contact: Option<String>,
    pub(crate) email: Option<String>,
    pub(crate) business_type: Option<String>,
    pub(crate) shop_id: Option<u64>,
}

impl TenantPayload {
    fn into_draft(self) -> TenantDraft {
        TenantDraft {
            name: self.name,
            contact: self.contact,
            email: self.email,
            business_type: self.business_type,
            shop_id: self.shop_id.map(ShopId),
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct LeasePayload {
    pub(crate) tenant_id: u64,
    pub(crate) shop_id: u64,
    pub(crate) start_date: String,
    pub(crate) end_date: String,
    pub(crate) rent_amount: Decimal,
    #[serde(default = "default_lease_status")]
    pub(crate) status: LeaseStatus,
}

const fn default_lease_status() -> LeaseStatus {
    LeaseStatus::Active
}

impl LeasePayload {
    fn into_draft(self) -> Result<LeaseDraft, BackOfficeError> {
        Ok(LeaseDraft {
            tenant_id: TenantId(self.tenant_id),
            shop_id: ShopId(self.shop_id),
            start_date: parse_date(&self.start_date)?,
            end_date: parse_date(&self.end_date)?,
            rent_amount: self.rent_amount,
            status: self.status,
        })
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct MaintenancePayload {
    pub(crate) shop_id: u64,
    pub(crate) description: String,
    #[serde(default)]
    pub(crate) reported_date: Option<String>,
    #[serde(default = "default_maintenance_status")]
    pub(crate) status: MaintenanceStatus,
    #[serde(default = "default_maintenance_priority")]
    pub(crate) priority: MaintenancePriority,
    #[serde(default)]
    pub(crate) resolution_notes: Option<String>,
}

const fn default_maintenance_status() -> MaintenanceStatus {
    MaintenanceStatus::Pending
}

const fn default_maintenance_priority() -> MaintenancePriority {
    MaintenancePriority::Medium
}

impl MaintenancePayload {
    fn into_draft(self, now: NaiveDateTime) -> Result<MaintenanceDraft, BackOfficeError> {
        let reported_date = match self.reported_date {
            Some(raw) => parse_datetime(&raw)?,
            None => now,
        };
        Ok(MaintenanceDraft {
            shop_id: ShopId(self.shop_id),
            description: self.description,
            reported_date,
            status: self.status,
            priority: self.priority,
            resolution_notes: self.resolution_notes,
        })
    }
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct ReassignPayload {
    pub(crate) shop_id: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct ExpirePayload {
    #[serde(default)]
    pub(crate) today: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct CompletePayload {
    #[serde(default)]
    pub(crate) resolution_notes: Option<String>,
}

async fn dashboard_handler(State(service): State<Arc<BackOfficeService>>) -> impl IntoResponse {
    Json(service.dashboard())
}

async fn list_shops_handler(State(service): State<Arc<BackOfficeService>>) -> impl IntoResponse {
    Json(service.list_shops())
}

async fn create_shop_handler(
    State(service): State<Arc<BackOfficeService>>,
    Json(payload): Json<ShopDraft>,
) -> Result<impl IntoResponse, BackOfficeError> {
    let shop = service.create_shop(payload)?;
    Ok((StatusCode::CREATED, Json(shop)))
}

async fn get_shop_handler(
    State(service): State<Arc<BackOfficeService>>,
    Path(id): Path<u64>,
) -> Result<impl IntoResponse, BackOfficeError> {
    Ok(Json(service.shop(ShopId(id))?))
}

async fn update_shop_handler(
    State(service): State<Arc<BackOfficeService>>,
    Path(id): Path<u64>,
    Json(payload): Json<ShopDraft>,
) -> Result<impl IntoResponse, BackOfficeError> {
    Ok(Json(service.update_shop(ShopId(id), payload)?))
}

async fn delete_shop_handler(
    State(service): State<Arc<BackOfficeService>>,
    Path(id): Path<u64>,
    Query(query): Query<DeleteQuery>,
) -> Result<impl IntoResponse, BackOfficeError> {
    service.delete_shop(ShopId(id), DeletePolicy::from_cascade_flag(query.cascade))?;
    Ok(StatusCode::NO_CONTENT)
}

async fn list_tenants_handler(State(service): State<Arc<BackOfficeService>>) -> impl IntoResponse {
    Json(service.list_tenants())
}

async fn create_tenant_handler(
    State(service): State<Arc<BackOfficeService>>,
    Json(payload): Json<TenantPayload>,
) -> Result<impl IntoResponse, BackOfficeError> {
    let tenant = service.create_tenant(payload.into_draft())?;
    Ok((StatusCode::CREATED, Json(tenant)))
}

async fn get_tenant_handler(
    State(service): State<Arc<BackOfficeService>>,
    Path(id): Path<u64>,
) -> Result<impl IntoResponse, BackOfficeError> {
    Ok(Json(service.tenant(TenantId(id))?))
}

async fn update_tenant_handler(
    State(service): State<Arc<BackOfficeService>>,
    Path(id): Path<u64>,
    Json(payload): Json<TenantPayload>,
) -> Result<impl IntoResponse, BackOfficeError> {
    Ok(Json(service.update_tenant(TenantId(id), payload.into_draft())?))
}

async fn delete_tenant_handler(
    State(service): State<Arc<BackOfficeService>>,
    Path(id): Path<u64>,
    Query(query): Query<DeleteQuery>,
) -> Result<impl IntoResponse, BackOfficeError> {
    service.delete_tenant(TenantId(id), DeletePolicy::from_cascade_flag(query.cascade))?;
    Ok(StatusCode::NO_CONTENT)
}

async fn reassign_tenant_handler(
    State(service): State<Arc<BackOfficeService>>,
    Path(id): Path<u64>,
    Json(payload): Json<ReassignPayload>,
) -> Result<impl IntoResponse, BackOfficeError> {
    let tenant = service.reassign_tenant(TenantId(id), payload.shop_id.map(ShopId))?;
    Ok(Json(tenant))
}

async fn list_leases_handler(State(service): State<Arc<BackOfficeService>>) -> impl IntoResponse {
    Json(service.list_leases())
}

async fn create_lease_handler(
    State(service): State<Arc<BackOfficeService>>,
    Json(payload): Json<LeasePayload>,
) -> Result<impl IntoResponse, BackOfficeError> {
    let lease = service.create_lease(payload.into_draft()?)?;
    Ok((StatusCode::CREATED, Json(lease)))
}

async fn get_lease_handler(
    State(service): State<Arc<BackOfficeService>>,
    Path(id): Path<u64>,
) -> Result<impl IntoResponse, BackOfficeError> {
    Ok(Json(service.lease(LeaseId(id))?))
}

async fn update_lease_handler(
    State(service): State<Arc<BackOfficeService>>,
    Path(id): Path<u64>,
    Json(payload): Json<LeasePayload>,
) -> Result<impl IntoResponse, BackOfficeError> {
    Ok(Json(service.update_lease(LeaseId(id), payload.into_draft()?)?))
}

async fn delete_lease_handler(
    State(service): State<Arc<BackOfficeService>>,
    Path(id): Path<u64>,
) -> Result<impl IntoResponse, BackOfficeError> {
    service.delete_lease(LeaseId(id))?;
    Ok(StatusCode::NO_CONTENT)
}

async fn expire_leases_handler(
    State(service): State<Arc<BackOfficeService>>,
    payload: Option<Json<ExpirePayload>>,
) -> Result<impl IntoResponse, BackOfficeError> {
    let Json(payload) = payload.unwrap_or_default();
    let today = match payload.today {
        Some(raw) => parse_date(&raw)?,
        None => Local::now().date_naive(),
    };
    let expired = service.expire_leases(today);
    Ok(Json(json!({ "expired": expired })))
}

async fn list_maintenance_handler(
    State(service): State<Arc<BackOfficeService>>,
) -> impl IntoResponse {
    Json(service.list_maintenance())
}

async fn create_maintenance_handler(
    State(service): State<Arc<BackOfficeService>>,
    Json(payload): Json<MaintenancePayload>,
) -> Result<impl IntoResponse, BackOfficeError> {
    let now = Local::now().naive_local();
    let request = service.create_maintenance(payload.into_draft(now)?, now)?;
    Ok((StatusCode::CREATED, Json(request)))
}

async fn get_maintenance_handler(
    State(service): State<Arc<BackOfficeService>>,
    Path(id): Path<u64>,
) -> Result<impl IntoResponse, BackOfficeError> {
    Ok(Json(service.maintenance(MaintenanceId(id))?))
}

async fn update_maintenance_handler(
    State(service): State<Arc<BackOfficeService>>,
    Path(id): Path<u64>,
    Json(payload): Json<MaintenancePayload>,
) -> Result<impl IntoResponse, BackOfficeError> {
    let now = Local::now().naive_local();
    let request = service.update_maintenance(MaintenanceId(id), payload.into_draft(now)?, now)?;
    Ok(Json(request))
}

async fn delete_maintenance_handler(
    State(service): State<Arc<BackOfficeService>>,
    Path(id): Path<u64>,
) -> Result<impl IntoResponse, BackOfficeError> {
    service.delete_maintenance(MaintenanceId(id))?;
    Ok(StatusCode::NO_CONTENT)
}

async fn complete_maintenance_handler(
    State(service): State<Arc<BackOfficeService>>,
    Path(id): Path<u64>,
    payload: Option<Json<CompletePayload>>,
) -> Result<impl IntoResponse, BackOfficeError> {
    let Json(payload) = payload.unwrap_or_default();
    let request = service.complete_maintenance(
        MaintenanceId(id),
        payload.resolution_notes,
        Local::now().naive_local(),
    )?;
    Ok(Json(request))
}
