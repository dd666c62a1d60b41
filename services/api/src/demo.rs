use crate::infra::{parse_date, seed_demo_portfolio};
use chrono::{Local, NaiveDate};
use clap::Args;
use mall_ops::backoffice::{
    BackOfficeService, MaintenanceDraft, MaintenancePriority, MaintenanceStatus, ShopDraft,
    TenantDraft,
};
use mall_ops::error::AppError;
use rust_decimal::Decimal;

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Override the demo's notion of today (YYYY-MM-DD)
    #[arg(long, value_parser = parse_date)]
    pub(crate) today: Option<NaiveDate>,
    /// Skip seeding the sample portfolio and start from an empty registry
    #[arg(long)]
    pub(crate) empty: bool,
}

#[derive(Args, Debug)]
pub(crate) struct ExpireArgs {
    /// Sweep cutoff date (YYYY-MM-DD, defaults to today)
    #[arg(long, value_parser = parse_date)]
    pub(crate) today: Option<NaiveDate>,
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs { today, empty } = args;
    let today = today.unwrap_or_else(|| Local::now().date_naive());
    let now = today.and_hms_opt(12, 0, 0).unwrap_or_else(|| Local::now().naive_local());

    let service = BackOfficeService::new();
    if !empty {
        seed_demo_portfolio(&service)?;
        println!("Seeded the sample mall portfolio");
        render_dashboard(&service);
    }

    println!("\nOccupancy walkthrough");
    let shop = service.create_shop(ShopDraft {
        name: "Pop-Up Gallery".to_string(),
        location: Some("Atrium".to_string()),
        size_sqm: Some(60.0),
        rent: Some(Decimal::from(3200)),
    })?;
    println!("- Created shop '{}' -> {}", shop.name, shop.status.label());

    let tenant = service.create_tenant(TenantDraft {
        name: "Ada's Prints".to_string(),
        contact: Some("5551203948".to_string()),
        email: Some("ada@example.com".to_string()),
        business_type: Some("Art".to_string()),
        shop_id: Some(shop.id),
    })?;
    let shop_after_move_in = service.shop(shop.id)?;
    println!(
        "- Tenant '{}' moved in -> {}",
        tenant.name,
        shop_after_move_in.status.label()
    );

    let report = service.create_maintenance(
        MaintenanceDraft {
            shop_id: shop.id,
            description: "Sprinkler head dripping over the east wall".to_string(),
            reported_date: now,
            status: MaintenanceStatus::Pending,
            priority: MaintenancePriority::High,
            resolution_notes: None,
        },
        now,
    )?;
    println!(
        "- High-priority report #{} filed -> {}",
        report.id,
        service.shop(shop.id)?.status.label()
    );

    let resolved = service.complete_maintenance(
        report.id,
        Some("Replaced the sprinkler head and dried the wall".to_string()),
        now,
    )?;
    println!(
        "- Report #{} completed (resolved {}) -> {}",
        resolved.id,
        resolved
            .resolved_date
            .map(|stamp| stamp.to_string())
            .unwrap_or_else(|| "unset".to_string()),
        service.shop(shop.id)?.status.label()
    );

    let expired = service.expire_leases(today);
    println!("\nExpiry sweep as of {today}: {expired} lease(s) marked expired");

    render_dashboard(&service);
    render_shops(&service);

    Ok(())
}

pub(crate) fn run_expiry_sweep(args: ExpireArgs) -> Result<(), AppError> {
    let today = args.today.unwrap_or_else(|| Local::now().date_naive());

    let service = BackOfficeService::new();
    seed_demo_portfolio(&service)?;

    let expired = service.expire_leases(today);
    println!("Expiry sweep as of {today}: {expired} lease(s) marked expired");
    for lease in service.list_leases() {
        println!(
            "  - lease {} ({} @ {}): {} until {}",
            lease.id, lease.tenant_name, lease.shop_name, lease.status_label, lease.end_date
        );
    }

    Ok(())
}

fn render_dashboard(service: &BackOfficeService) {
    let dashboard = service.dashboard();
    println!(
        "Dashboard: {} shops ({} occupied), {} tenants, {} open maintenance request(s)",
        dashboard.total_shops,
        dashboard.occupied_shops,
        dashboard.total_tenants,
        dashboard.open_maintenance
    );
}

fn render_shops(service: &BackOfficeService) {
    println!("\nShops");
    for summary in service.list_shops() {
        let occupant = summary.tenant_name.as_deref().unwrap_or("none");
        println!(
            "  - [{}] {} ({}): {} | tenant: {} | open maintenance: {}",
            summary.id,
            summary.name,
            summary.location.as_deref().unwrap_or("unlisted"),
            summary.status_label,
            occupant,
            summary.open_maintenance
        );
    }
}
