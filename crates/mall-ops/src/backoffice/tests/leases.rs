use super::common::*;
use crate::backoffice::domain::{LeaseStatus, ShopStatus};
use crate::backoffice::error::BackOfficeError;
use crate::backoffice::service::BackOfficeService;
use rust_decimal::Decimal;

#[test]
fn active_lease_assigns_tenant_and_occupies_shop() {
    let service = BackOfficeService::new();
    let shop_id = add_shop(&service, "Clothing Store");
    let tenant_id = add_tenant(&service, "John", None);

    let lease = service
        .create_lease(lease_draft(
            tenant_id,
            shop_id,
            date(2025, 1, 1),
            date(2026, 1, 1),
        ))
        .expect("lease created");

    assert_eq!(lease.status, LeaseStatus::Active);
    assert_eq!(service.tenant(tenant_id).unwrap().shop_id, Some(shop_id));
    assert_eq!(service.shop(shop_id).unwrap().status, ShopStatus::Occupied);
    assert_consistent(&service);
}

#[test]
fn second_active_lease_for_shop_is_rejected_without_side_effects() {
    let service = BackOfficeService::new();
    let shop_id = add_shop(&service, "Clothing Store");
    let first = add_tenant(&service, "John", None);
    let second = add_tenant(&service, "Jane", None);

    service
        .create_lease(lease_draft(first, shop_id, date(2025, 1, 1), date(2026, 1, 1)))
        .expect("first lease created");

    let err = service
        .create_lease(lease_draft(second, shop_id, date(2025, 6, 1), date(2026, 6, 1)))
        .expect_err("second active lease must conflict");
    assert_eq!(err, BackOfficeError::ActiveLeaseExists { shop_id });

    assert_eq!(service.list_leases().len(), 1);
    assert_eq!(service.tenant(second).unwrap().shop_id, None);
    assert_eq!(service.shop(shop_id).unwrap().status, ShopStatus::Occupied);
    assert_consistent(&service);
}

#[test]
fn expired_lease_creation_skips_assignment() {
    let service = BackOfficeService::new();
    let shop_id = add_shop(&service, "Bookstore");
    let tenant_id = add_tenant(&service, "Bob", None);

    let mut draft = lease_draft(tenant_id, shop_id, date(2023, 1, 1), date(2024, 1, 1));
    draft.status = LeaseStatus::Expired;
    service.create_lease(draft).expect("expired lease recorded");

    assert_eq!(service.tenant(tenant_id).unwrap().shop_id, None);
    assert_eq!(service.shop(shop_id).unwrap().status, ShopStatus::Vacant);
    assert_consistent(&service);
}

#[test]
fn deactivating_only_lease_clears_tenant_and_vacates_shop() {
    let service = BackOfficeService::new();
    let shop_id = add_shop(&service, "Café");
    let tenant_id = add_tenant(&service, "Jane", None);
    let lease = service
        .create_lease(lease_draft(tenant_id, shop_id, date(2025, 3, 1), date(2026, 3, 1)))
        .expect("lease created");

    let mut draft = lease_draft(tenant_id, shop_id, date(2025, 3, 1), date(2026, 3, 1));
    draft.status = LeaseStatus::Expired;
    service.update_lease(lease.id, draft).expect("lease updated");

    assert_eq!(service.tenant(tenant_id).unwrap().shop_id, None);
    assert_eq!(service.shop(shop_id).unwrap().status, ShopStatus::Vacant);
    assert_consistent(&service);
}

#[test]
fn deactivation_falls_back_to_another_active_lease() {
    let service = BackOfficeService::new();
    let first_shop = add_shop(&service, "Café");
    let second_shop = add_shop(&service, "Kiosk");
    let tenant_id = add_tenant(&service, "Jane", None);

    let first = service
        .create_lease(lease_draft(tenant_id, first_shop, date(2025, 1, 1), date(2026, 1, 1)))
        .expect("first lease created");
    let second = service
        .create_lease(lease_draft(tenant_id, second_shop, date(2025, 2, 1), date(2026, 2, 1)))
        .expect("second lease created");
    // The newest assignment wins.
    assert_eq!(service.tenant(tenant_id).unwrap().shop_id, Some(second_shop));

    service.delete_lease(second.id).expect("lease deleted");

    assert_eq!(service.tenant(tenant_id).unwrap().shop_id, Some(first_shop));
    assert_eq!(service.shop(first_shop).unwrap().status, ShopStatus::Occupied);
    assert_eq!(service.shop(second_shop).unwrap().status, ShopStatus::Vacant);
    assert_eq!(service.lease(first.id).unwrap().status, LeaseStatus::Active);
    assert_consistent(&service);
}

#[test]
fn update_swapping_tenants_settles_the_previous_one() {
    let service = BackOfficeService::new();
    let shop_id = add_shop(&service, "Electronics");
    let first = add_tenant(&service, "John", None);
    let second = add_tenant(&service, "Jane", None);
    let lease = service
        .create_lease(lease_draft(first, shop_id, date(2025, 1, 1), date(2026, 1, 1)))
        .expect("lease created");

    service
        .update_lease(
            lease.id,
            lease_draft(second, shop_id, date(2025, 1, 1), date(2026, 1, 1)),
        )
        .expect("lease reassigned");

    assert_eq!(service.tenant(first).unwrap().shop_id, None);
    assert_eq!(service.tenant(second).unwrap().shop_id, Some(shop_id));
    assert_eq!(service.shop(shop_id).unwrap().status, ShopStatus::Occupied);
    assert_consistent(&service);
}

#[test]
fn reactivation_respects_the_single_active_lease_invariant() {
    let service = BackOfficeService::new();
    let shop_id = add_shop(&service, "Café");
    let first = add_tenant(&service, "John", None);
    let second = add_tenant(&service, "Jane", None);

    let mut dormant = lease_draft(first, shop_id, date(2023, 1, 1), date(2024, 1, 1));
    dormant.status = LeaseStatus::Expired;
    let dormant = service.create_lease(dormant).expect("expired lease recorded");

    service
        .create_lease(lease_draft(second, shop_id, date(2025, 1, 1), date(2026, 1, 1)))
        .expect("active lease created");

    let mut revived = lease_draft(first, shop_id, date(2023, 1, 1), date(2026, 1, 1));
    revived.status = LeaseStatus::Active;
    let err = service
        .update_lease(dormant.id, revived)
        .expect_err("reactivation on a leased shop must conflict");
    assert_eq!(err, BackOfficeError::ActiveLeaseExists { shop_id });
    assert_eq!(
        service.lease(dormant.id).unwrap().status,
        LeaseStatus::Expired
    );
    assert_consistent(&service);
}

#[test]
fn moving_an_active_lease_relocates_the_tenant() {
    let service = BackOfficeService::new();
    let first_shop = add_shop(&service, "Café");
    let second_shop = add_shop(&service, "Kiosk");
    let tenant_id = add_tenant(&service, "Jane", None);
    let lease = service
        .create_lease(lease_draft(tenant_id, first_shop, date(2025, 1, 1), date(2026, 1, 1)))
        .expect("lease created");

    service
        .update_lease(
            lease.id,
            lease_draft(tenant_id, second_shop, date(2025, 1, 1), date(2026, 1, 1)),
        )
        .expect("lease moved");

    assert_eq!(service.tenant(tenant_id).unwrap().shop_id, Some(second_shop));
    assert_eq!(service.shop(first_shop).unwrap().status, ShopStatus::Vacant);
    assert_eq!(service.shop(second_shop).unwrap().status, ShopStatus::Occupied);
    assert_consistent(&service);
}

#[test]
fn delete_active_lease_clears_assignment() {
    let service = BackOfficeService::new();
    let shop_id = add_shop(&service, "Bookstore");
    let tenant_id = add_tenant(&service, "Bob", None);
    let lease = service
        .create_lease(lease_draft(tenant_id, shop_id, date(2025, 6, 1), date(2026, 6, 1)))
        .expect("lease created");

    service.delete_lease(lease.id).expect("lease deleted");

    assert_eq!(service.tenant(tenant_id).unwrap().shop_id, None);
    assert_eq!(service.shop(shop_id).unwrap().status, ShopStatus::Vacant);
    assert_consistent(&service);
}

#[test]
fn expiry_sweep_uses_strict_comparison_and_is_idempotent() {
    let service = BackOfficeService::new();
    let first_shop = add_shop(&service, "Café");
    let second_shop = add_shop(&service, "Kiosk");
    let first = add_tenant(&service, "Jane", None);
    let second = add_tenant(&service, "Bob", None);

    let overdue = service
        .create_lease(lease_draft(first, first_shop, date(2024, 1, 1), date(2025, 1, 1)))
        .expect("overdue lease created");
    let ending_today = service
        .create_lease(lease_draft(second, second_shop, date(2024, 6, 1), date(2025, 6, 1)))
        .expect("current lease created");

    let today = date(2025, 6, 1);
    assert_eq!(service.expire_leases(today), 1);
    assert_eq!(
        service.lease(overdue.id).unwrap().status,
        LeaseStatus::Expired
    );
    assert_eq!(
        service.lease(ending_today.id).unwrap().status,
        LeaseStatus::Active,
        "a lease ending today must stay active"
    );

    // Pure sweep: the expired lease's tenant keeps its assignment.
    assert_eq!(service.tenant(first).unwrap().shop_id, Some(first_shop));
    assert_eq!(service.shop(first_shop).unwrap().status, ShopStatus::Occupied);

    assert_eq!(service.expire_leases(today), 0, "second sweep finds nothing");
    assert_consistent(&service);
}

#[test]
fn lease_validation_rejects_bad_input() {
    let service = BackOfficeService::new();
    let shop_id = add_shop(&service, "Café");
    let tenant_id = add_tenant(&service, "Jane", None);

    let mut inverted = lease_draft(tenant_id, shop_id, date(2026, 1, 1), date(2025, 1, 1));
    inverted.status = LeaseStatus::Active;
    assert_eq!(
        service.create_lease(inverted).expect_err("inverted dates"),
        BackOfficeError::LeaseDatesInverted
    );

    let mut free = lease_draft(tenant_id, shop_id, date(2025, 1, 1), date(2026, 1, 1));
    free.rent_amount = Decimal::ZERO;
    assert_eq!(
        service.create_lease(free).expect_err("zero rent"),
        BackOfficeError::NonPositiveRent
    );

    assert!(service.list_leases().is_empty());
    assert_consistent(&service);
}

#[test]
fn lease_creation_requires_existing_parties() {
    let service = BackOfficeService::new();
    let shop_id = add_shop(&service, "Café");
    let tenant_id = add_tenant(&service, "Jane", None);

    let missing_tenant = lease_draft(
        crate::backoffice::domain::TenantId(99),
        shop_id,
        date(2025, 1, 1),
        date(2026, 1, 1),
    );
    assert!(matches!(
        service.create_lease(missing_tenant).expect_err("missing tenant"),
        BackOfficeError::NotFound { .. }
    ));

    let missing_shop = lease_draft(
        tenant_id,
        crate::backoffice::domain::ShopId(99),
        date(2025, 1, 1),
        date(2026, 1, 1),
    );
    assert!(matches!(
        service.create_lease(missing_shop).expect_err("missing shop"),
        BackOfficeError::NotFound { .. }
    ));
}
