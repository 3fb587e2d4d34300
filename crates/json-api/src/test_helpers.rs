//! Test helpers.

use std::sync::Arc;

use salvo::{affix_state::inject, prelude::*};

use ampera_app::{
    auth::MockAuthService,
    context::AppContext,
    domain::{carts::MockCartsService, orders::MockOrdersService},
};

use crate::{extensions::*, state::State};

pub(crate) const TEST_USERNAME: &str = "testuser";

#[salvo::handler]
pub(crate) async fn inject_user(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    depot.insert_username(TEST_USERNAME.to_string());
    ctrl.call_next(req, depot, res).await;
}

fn strict_auth_mock() -> MockAuthService {
    let mut auth = MockAuthService::new();

    auth.expect_authenticate_bearer().never();

    auth
}

fn strict_carts_mock() -> MockCartsService {
    let mut carts = MockCartsService::new();

    carts.expect_cart_for().never();
    carts.expect_save_cart().never();
    carts.expect_delete_lines().never();

    carts
}

fn strict_orders_mock() -> MockOrdersService {
    let mut orders = MockOrdersService::new();

    orders.expect_place_order().never();

    orders
}

fn make_state(
    carts: MockCartsService,
    orders: MockOrdersService,
    auth: MockAuthService,
) -> Arc<State> {
    Arc::new(State::new(AppContext {
        auth: Arc::new(auth),
        carts: Arc::new(carts),
        orders: Arc::new(orders),
    }))
}

pub(crate) fn state_with_auth(auth: MockAuthService) -> Arc<State> {
    make_state(strict_carts_mock(), strict_orders_mock(), auth)
}

pub(crate) fn carts_service(carts: MockCartsService, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(make_state(carts, strict_orders_mock(), strict_auth_mock())))
            .hoop(inject_user)
            .push(route),
    )
}

pub(crate) fn orders_service(orders: MockOrdersService, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(make_state(strict_carts_mock(), orders, strict_auth_mock())))
            .hoop(inject_user)
            .push(route),
    )
}
