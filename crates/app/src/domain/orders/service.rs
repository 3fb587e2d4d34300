//! Orders service.

use std::sync::Arc;

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use tracing::info;

use crate::{
    domain::{
        carts::{
            models::CartStatus,
            repositories::CartsRepository,
        },
        orders::{
            code,
            data::{NewOrder, NewOrderLine, PlaceOrder, PlacedOrder},
            errors::OrdersServiceError,
            models::{OrderStatus, PaymentMethod},
            pricing,
            repository::OrdersRepository,
        },
        promotions::repository::PromotionsRepository,
        users::repository::UsersRepository,
    },
    payments::gateway::{CheckoutRequest, PaymentGateway, PaymentGatewayError},
};

#[derive(Clone)]
pub struct DefaultOrdersService {
    users: Arc<dyn UsersRepository>,
    carts: Arc<dyn CartsRepository>,
    promotions: Arc<dyn PromotionsRepository>,
    orders: Arc<dyn OrdersRepository>,
    gateway: Arc<dyn PaymentGateway>,
    currency: String,
}

impl DefaultOrdersService {
    #[must_use]
    pub fn new(
        users: Arc<dyn UsersRepository>,
        carts: Arc<dyn CartsRepository>,
        promotions: Arc<dyn PromotionsRepository>,
        orders: Arc<dyn OrdersRepository>,
        gateway: Arc<dyn PaymentGateway>,
        currency: String,
    ) -> Self {
        Self {
            users,
            carts,
            promotions,
            orders,
            gateway,
            currency,
        }
    }
}

#[async_trait]
impl OrdersService for DefaultOrdersService {
    #[tracing::instrument(
        name = "orders.service.place_order",
        skip(self, request),
        fields(username = %username, order_code = tracing::field::Empty),
        err
    )]
    async fn place_order(
        &self,
        username: &str,
        request: PlaceOrder,
    ) -> Result<PlacedOrder, OrdersServiceError> {
        let user = self
            .users
            .find_by_username(username)
            .await?
            .ok_or_else(|| OrdersServiceError::UserNotFound {
                username: username.to_string(),
            })?;

        let cart = self
            .carts
            .find_by_username(&user.username)
            .await?
            .ok_or(OrdersServiceError::CartNotFound)?;

        let now = Timestamp::now();
        let mut total: u64 = 0;
        let mut lines = Vec::with_capacity(cart.lines.len());

        for line in &cart.lines {
            let promotions = self
                .promotions
                .active_for_product(line.product_id, now)
                .await?;
            let percent = promotions.first().map(|promotion| promotion.percent);
            let subtotal = pricing::line_total(line.unit_price, line.quantity, percent);

            total += subtotal;
            lines.push(NewOrderLine {
                variant_id: line.variant_id,
                quantity: line.quantity,
                unit_price: line.unit_price,
                subtotal,
            });
        }

        let order_code = code::generate();

        tracing::Span::current().record("order_code", tracing::field::display(&order_code));

        match request.payment_method {
            None => Err(OrdersServiceError::UnknownPaymentMethod),
            Some(PaymentMethod::Cash) => {
                let order = self
                    .orders
                    .save(NewOrder {
                        code: order_code,
                        username: user.username,
                        status: OrderStatus::Confirmed,
                        payment_method: PaymentMethod::Cash,
                        total,
                        gateway_order_id: None,
                        lines,
                    })
                    .await?;

                self.carts.set_status(cart.id, CartStatus::CheckedOut).await?;

                info!(code = %order.code, total, "confirmed cash order");

                Ok(PlacedOrder {
                    code: order.code,
                    total: order.total,
                    payment_method: PaymentMethod::Cash,
                    checkout_url: None,
                })
            }
            Some(PaymentMethod::Paypal) => {
                let session = self
                    .gateway
                    .create_checkout(CheckoutRequest {
                        reference: order_code.clone(),
                        amount: total,
                        currency: self.currency.clone(),
                    })
                    .await
                    .map_err(|source| OrdersServiceError::Gateway { source })?;

                let checkout_url = session
                    .approve_link()
                    .ok_or_else(|| OrdersServiceError::Gateway {
                        source: PaymentGatewayError::UnexpectedResponse(
                            "checkout session has no approve link".to_string(),
                        ),
                    })?
                    .to_string();

                let order = self
                    .orders
                    .save(NewOrder {
                        code: order_code,
                        username: user.username,
                        status: OrderStatus::PendingPayment,
                        payment_method: PaymentMethod::Paypal,
                        total,
                        gateway_order_id: Some(session.id),
                        lines,
                    })
                    .await?;

                info!(code = %order.code, total, "created order pending gateway approval");

                Ok(PlacedOrder {
                    code: order.code,
                    total: order.total,
                    payment_method: PaymentMethod::Paypal,
                    checkout_url: Some(checkout_url),
                })
            }
        }
    }
}

#[automock]
#[async_trait]
pub trait OrdersService: Send + Sync {
    /// Place an order for the authenticated user's cart: apply active
    /// promotions per line, sum the total, then finalize per payment method.
    async fn place_order(
        &self,
        username: &str,
        request: PlaceOrder,
    ) -> Result<PlacedOrder, OrdersServiceError>;
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;
    use testresult::TestResult;

    use crate::{
        domain::{
            carts::{
                models::{Cart, CartLine},
                repositories::MockCartsRepository,
            },
            orders::repository::MockOrdersRepository,
            promotions::{models::Promotion, repository::MockPromotionsRepository},
            users::{
                models::{Address, User},
                repository::MockUsersRepository,
            },
        },
        payments::gateway::{CheckoutLink, CheckoutSession, MockPaymentGateway},
    };

    use super::*;

    const USERNAME: &str = "testuser";

    struct Mocks {
        users: MockUsersRepository,
        carts: MockCartsRepository,
        promotions: MockPromotionsRepository,
        orders: MockOrdersRepository,
        gateway: MockPaymentGateway,
    }

    impl Mocks {
        fn new() -> Self {
            Self {
                users: MockUsersRepository::new(),
                carts: MockCartsRepository::new(),
                promotions: MockPromotionsRepository::new(),
                orders: MockOrdersRepository::new(),
                gateway: MockPaymentGateway::new(),
            }
        }

        fn into_service(self) -> DefaultOrdersService {
            DefaultOrdersService::new(
                Arc::new(self.users),
                Arc::new(self.carts),
                Arc::new(self.promotions),
                Arc::new(self.orders),
                Arc::new(self.gateway),
                "VND".to_string(),
            )
        }
    }

    fn test_user() -> User {
        User {
            id: 1,
            username: USERNAME.to_string(),
            fullname: "Test User".to_string(),
            phone: Some("0123456789".to_string()),
            address: Address {
                line: Some("123 Street".to_string()),
                ward: Some("Ward A".to_string()),
                district: Some("District B".to_string()),
                province: Some("Province C".to_string()),
            },
        }
    }

    fn cart_with_line(unit_price: u64, quantity: u32) -> Cart {
        Cart {
            id: 5,
            username: USERNAME.to_string(),
            status: crate::domain::carts::models::CartStatus::Active,
            lines: vec![CartLine {
                variant_id: 2,
                quantity,
                unit_price,
                product_id: 1,
            }],
        }
    }

    fn ten_percent_promotion() -> Promotion {
        let now = Timestamp::now();

        Promotion {
            id: 9,
            name: "Spring sale".to_string(),
            percent: 10,
            starts_at: now - jiff::SignedDuration::from_hours(1),
            ends_at: now + jiff::SignedDuration::from_hours(1),
        }
    }

    fn saved_order(order: &NewOrder) -> crate::domain::orders::models::Order {
        crate::domain::orders::models::Order {
            id: 42,
            code: order.code.clone(),
            username: order.username.clone(),
            status: order.status,
            payment_method: order.payment_method,
            total: order.total,
            gateway_order_id: order.gateway_order_id.clone(),
            created_at: Timestamp::now(),
        }
    }

    fn approve_session() -> CheckoutSession {
        CheckoutSession {
            id: "paypal-id".to_string(),
            status: "CREATED".to_string(),
            links: vec![CheckoutLink {
                href: "https://paypal.com/checkout".to_string(),
                rel: "approve".to_string(),
                method: Some("GET".to_string()),
            }],
        }
    }

    #[tokio::test]
    async fn cash_order_without_promotion_confirms_and_checks_out_the_cart() -> TestResult {
        let mut mocks = Mocks::new();

        mocks
            .users
            .expect_find_by_username()
            .once()
            .withf(|username| username == USERNAME)
            .return_once(|_| Ok(Some(test_user())));

        mocks
            .carts
            .expect_find_by_username()
            .once()
            .withf(|username| username == USERNAME)
            .return_once(|_| Ok(Some(cart_with_line(100_000, 2))));

        mocks
            .promotions
            .expect_active_for_product()
            .once()
            .withf(|product_id, _| *product_id == 1)
            .return_once(|_, _| Ok(Vec::new()));

        mocks
            .orders
            .expect_save()
            .once()
            .withf(|order| {
                order.status == OrderStatus::Confirmed
                    && order.payment_method == PaymentMethod::Cash
                    && order.total == 200_000
                    && order.gateway_order_id.is_none()
            })
            .return_once(|order| Ok(saved_order(&order)));

        mocks
            .carts
            .expect_set_status()
            .once()
            .withf(|cart_id, status| *cart_id == 5 && *status == CartStatus::CheckedOut)
            .return_once(|_, _| Ok(()));

        mocks.gateway.expect_create_checkout().never();

        let placed = mocks
            .into_service()
            .place_order(USERNAME, PlaceOrder { payment_method: Some(PaymentMethod::Cash) })
            .await?;

        assert_eq!(placed.payment_method, PaymentMethod::Cash);
        assert!(!placed.code.is_empty());
        assert_eq!(placed.checkout_url, None);

        Ok(())
    }

    #[tokio::test]
    async fn cash_order_with_promotion_discounts_the_total() -> TestResult {
        let mut mocks = Mocks::new();

        mocks
            .users
            .expect_find_by_username()
            .return_once(|_| Ok(Some(test_user())));

        mocks
            .carts
            .expect_find_by_username()
            .return_once(|_| Ok(Some(cart_with_line(200_000, 1))));

        mocks
            .promotions
            .expect_active_for_product()
            .once()
            .withf(|product_id, _| *product_id == 1)
            .return_once(|_, _| Ok(vec![ten_percent_promotion()]));

        // 200,000 - 10% = 180,000
        mocks
            .orders
            .expect_save()
            .once()
            .withf(|order| order.total == 180_000 && order.lines[0].subtotal == 180_000)
            .return_once(|order| Ok(saved_order(&order)));

        mocks.carts.expect_set_status().return_once(|_, _| Ok(()));

        let placed = mocks
            .into_service()
            .place_order(USERNAME, PlaceOrder { payment_method: Some(PaymentMethod::Cash) })
            .await?;

        assert_eq!(placed.total, 180_000);

        Ok(())
    }

    #[tokio::test]
    async fn paypal_order_returns_the_approve_link() -> TestResult {
        let mut mocks = Mocks::new();

        mocks
            .users
            .expect_find_by_username()
            .return_once(|_| Ok(Some(test_user())));

        mocks
            .carts
            .expect_find_by_username()
            .return_once(|_| Ok(Some(cart_with_line(100_000, 1))));

        mocks
            .promotions
            .expect_active_for_product()
            .return_once(|_, _| Ok(Vec::new()));

        mocks
            .gateway
            .expect_create_checkout()
            .once()
            .withf(|request| request.amount == 100_000 && request.currency == "VND")
            .return_once(|_| Ok(approve_session()));

        mocks
            .orders
            .expect_save()
            .once()
            .withf(|order| {
                order.status == OrderStatus::PendingPayment
                    && order.payment_method == PaymentMethod::Paypal
                    && order.gateway_order_id.as_deref() == Some("paypal-id")
            })
            .return_once(|order| Ok(saved_order(&order)));

        mocks.carts.expect_set_status().never();

        let placed = mocks
            .into_service()
            .place_order(USERNAME, PlaceOrder { payment_method: Some(PaymentMethod::Paypal) })
            .await?;

        assert_eq!(
            placed.checkout_url.as_deref(),
            Some("https://paypal.com/checkout")
        );

        Ok(())
    }

    #[tokio::test]
    async fn gateway_failure_aborts_the_paypal_order() {
        let mut mocks = Mocks::new();

        mocks
            .users
            .expect_find_by_username()
            .return_once(|_| Ok(Some(test_user())));

        mocks
            .carts
            .expect_find_by_username()
            .return_once(|_| Ok(Some(cart_with_line(100_000, 1))));

        mocks
            .promotions
            .expect_active_for_product()
            .return_once(|_, _| Ok(Vec::new()));

        mocks.gateway.expect_create_checkout().once().return_once(|_| {
            Err(PaymentGatewayError::UnexpectedResponse(
                "token request failed with status 500".to_string(),
            ))
        });

        mocks.orders.expect_save().never();

        let error = mocks
            .into_service()
            .place_order(USERNAME, PlaceOrder { payment_method: Some(PaymentMethod::Paypal) })
            .await
            .expect_err("expected a gateway error");

        assert!(
            error
                .to_string()
                .contains("Cannot create PayPal transaction request"),
            "unexpected message: {error}"
        );
    }

    #[tokio::test]
    async fn session_without_approve_link_is_a_gateway_failure() {
        let mut mocks = Mocks::new();

        mocks
            .users
            .expect_find_by_username()
            .return_once(|_| Ok(Some(test_user())));

        mocks
            .carts
            .expect_find_by_username()
            .return_once(|_| Ok(Some(cart_with_line(100_000, 1))));

        mocks
            .promotions
            .expect_active_for_product()
            .return_once(|_, _| Ok(Vec::new()));

        mocks.gateway.expect_create_checkout().once().return_once(|_| {
            Ok(CheckoutSession {
                id: "paypal-id".to_string(),
                status: "CREATED".to_string(),
                links: Vec::new(),
            })
        });

        mocks.orders.expect_save().never();

        let result = mocks
            .into_service()
            .place_order(USERNAME, PlaceOrder { payment_method: Some(PaymentMethod::Paypal) })
            .await;

        assert!(matches!(result, Err(OrdersServiceError::Gateway { .. })));
    }

    #[tokio::test]
    async fn missing_payment_method_fails_before_any_write() {
        let mut mocks = Mocks::new();

        mocks
            .users
            .expect_find_by_username()
            .return_once(|_| Ok(Some(test_user())));

        mocks
            .carts
            .expect_find_by_username()
            .return_once(|_| Ok(Some(cart_with_line(100_000, 1))));

        mocks
            .promotions
            .expect_active_for_product()
            .return_once(|_, _| Ok(Vec::new()));

        mocks.orders.expect_save().never();
        mocks.carts.expect_set_status().never();
        mocks.gateway.expect_create_checkout().never();

        let error = mocks
            .into_service()
            .place_order(USERNAME, PlaceOrder { payment_method: None })
            .await
            .expect_err("expected an unknown-method error");

        assert_eq!(error.to_string(), "Cannot identify payment method");
    }

    #[tokio::test]
    async fn unknown_user_fails_with_user_not_found() {
        let mut mocks = Mocks::new();

        mocks
            .users
            .expect_find_by_username()
            .once()
            .return_once(|_| Ok(None));

        mocks.carts.expect_find_by_username().never();

        let result = mocks
            .into_service()
            .place_order(USERNAME, PlaceOrder { payment_method: Some(PaymentMethod::Cash) })
            .await;

        assert!(matches!(
            result,
            Err(OrdersServiceError::UserNotFound { .. })
        ));
    }

    #[tokio::test]
    async fn missing_cart_fails_with_cart_not_found() {
        let mut mocks = Mocks::new();

        mocks
            .users
            .expect_find_by_username()
            .return_once(|_| Ok(Some(test_user())));

        mocks
            .carts
            .expect_find_by_username()
            .once()
            .return_once(|_| Ok(None));

        mocks.orders.expect_save().never();

        let result = mocks
            .into_service()
            .place_order(USERNAME, PlaceOrder { payment_method: Some(PaymentMethod::Cash) })
            .await;

        assert!(matches!(result, Err(OrdersServiceError::CartNotFound)));
    }
}
