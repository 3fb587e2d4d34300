//! Create Order Handler

use std::sync::Arc;

use salvo::{
    http::header::LOCATION,
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use ampera_app::domain::orders::{
    data::{PlaceOrder, PlacedOrder},
    models::PaymentMethod,
};

use crate::{extensions::*, orders::errors::into_status_error, state::State};

/// Create Order Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CreateOrderRequest {
    /// Requested payment method; absence is rejected by the order service
    #[serde(default)]
    pub payment_method: Option<PaymentMethodDto>,
}

/// Payment method on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub(crate) enum PaymentMethodDto {
    Cash,
    Paypal,
}

impl From<PaymentMethodDto> for PaymentMethod {
    fn from(method: PaymentMethodDto) -> Self {
        match method {
            PaymentMethodDto::Cash => Self::Cash,
            PaymentMethodDto::Paypal => Self::Paypal,
        }
    }
}

impl From<PaymentMethod> for PaymentMethodDto {
    fn from(method: PaymentMethod) -> Self {
        match method {
            PaymentMethod::Cash => Self::Cash,
            PaymentMethod::Paypal => Self::Paypal,
        }
    }
}

/// Order Placed Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderPlacedResponse {
    /// Public order code
    pub order_code: String,

    /// Order total in minor currency units, promotions applied
    pub total: u64,

    /// Payment method the order was placed with
    pub payment_method: PaymentMethodDto,

    /// Gateway approval URL; null for cash orders
    pub checkout_url: Option<String>,
}

impl From<PlacedOrder> for OrderPlacedResponse {
    fn from(placed: PlacedOrder) -> Self {
        Self {
            order_code: placed.code,
            total: placed.total,
            payment_method: placed.payment_method.into(),
            checkout_url: placed.checkout_url,
        }
    }
}

/// Create Order Handler
///
/// Places an order for the authenticated user's cart.
#[endpoint(
    tags("orders"),
    summary = "Create Order",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Order placed"),
        (status_code = StatusCode::NOT_FOUND, description = "User or cart not found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Unknown payment method"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Unauthorized"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Payment gateway or server failure"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<CreateOrderRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<OrderPlacedResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let username = depot.username_or_401()?;

    let request = PlaceOrder {
        payment_method: json.into_inner().payment_method.map(PaymentMethod::from),
    };

    let placed = state
        .app
        .orders
        .place_order(username, request)
        .await
        .map_err(into_status_error)?;

    res.add_header(LOCATION, format!("/client-api/orders/{}", placed.code), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    Ok(Json(placed.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use ampera_app::{
        domain::orders::{MockOrdersService, OrdersServiceError},
        payments::gateway::PaymentGatewayError,
    };

    use crate::test_helpers::{TEST_USERNAME, orders_service};

    use super::*;

    fn make_service(orders: MockOrdersService) -> Service {
        orders_service(orders, Router::with_path("orders").post(handler))
    }

    fn placed(method: PaymentMethod, checkout_url: Option<&str>) -> PlacedOrder {
        PlacedOrder {
            code: "QX7RX2M4T9A1".to_string(),
            total: 180_000,
            payment_method: method,
            checkout_url: checkout_url.map(ToString::to_string),
        }
    }

    #[tokio::test]
    async fn test_cash_order_has_no_checkout_link() -> TestResult {
        let mut orders = MockOrdersService::new();

        orders
            .expect_place_order()
            .once()
            .withf(|username, request| {
                username == TEST_USERNAME
                    && request.payment_method == Some(PaymentMethod::Cash)
            })
            .return_once(|_, _| Ok(placed(PaymentMethod::Cash, None)));

        let mut res = TestClient::post("http://example.com/orders")
            .json(&json!({ "payment_method": "cash" }))
            .send(&make_service(orders))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::CREATED));

        let location = res
            .headers()
            .get("location")
            .and_then(|v| v.to_str().ok())
            .map(ToString::to_string);

        let body: OrderPlacedResponse = res.take_json().await?;

        assert_eq!(
            location.as_deref(),
            Some("/client-api/orders/QX7RX2M4T9A1")
        );
        assert_eq!(body.order_code, "QX7RX2M4T9A1");
        assert_eq!(body.total, 180_000);
        assert_eq!(body.payment_method, PaymentMethodDto::Cash);
        assert_eq!(body.checkout_url, None);

        Ok(())
    }

    #[tokio::test]
    async fn test_paypal_order_returns_the_checkout_link() -> TestResult {
        let mut orders = MockOrdersService::new();

        orders
            .expect_place_order()
            .once()
            .withf(|username, request| {
                username == TEST_USERNAME
                    && request.payment_method == Some(PaymentMethod::Paypal)
            })
            .return_once(|_, _| {
                Ok(placed(
                    PaymentMethod::Paypal,
                    Some("https://paypal.com/checkout"),
                ))
            });

        let mut res = TestClient::post("http://example.com/orders")
            .json(&json!({ "payment_method": "paypal" }))
            .send(&make_service(orders))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::CREATED));

        let body: OrderPlacedResponse = res.take_json().await?;

        assert_eq!(
            body.checkout_url.as_deref(),
            Some("https://paypal.com/checkout")
        );

        Ok(())
    }

    #[tokio::test]
    async fn test_absent_payment_method_returns_400() -> TestResult {
        let mut orders = MockOrdersService::new();

        orders
            .expect_place_order()
            .once()
            .withf(|_, request| request.payment_method.is_none())
            .return_once(|_, _| Err(OrdersServiceError::UnknownPaymentMethod));

        let res = TestClient::post("http://example.com/orders")
            .json(&json!({}))
            .send(&make_service(orders))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn test_unknown_user_returns_404() -> TestResult {
        let mut orders = MockOrdersService::new();

        orders.expect_place_order().once().return_once(|_, _| {
            Err(OrdersServiceError::UserNotFound {
                username: TEST_USERNAME.to_string(),
            })
        });

        let res = TestClient::post("http://example.com/orders")
            .json(&json!({ "payment_method": "cash" }))
            .send(&make_service(orders))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }

    #[tokio::test]
    async fn test_missing_cart_returns_404() -> TestResult {
        let mut orders = MockOrdersService::new();

        orders
            .expect_place_order()
            .once()
            .return_once(|_, _| Err(OrdersServiceError::CartNotFound));

        let res = TestClient::post("http://example.com/orders")
            .json(&json!({ "payment_method": "cash" }))
            .send(&make_service(orders))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }

    #[tokio::test]
    async fn test_gateway_failure_returns_500() -> TestResult {
        let mut orders = MockOrdersService::new();

        orders.expect_place_order().once().return_once(|_, _| {
            Err(OrdersServiceError::Gateway {
                source: PaymentGatewayError::UnexpectedResponse(
                    "token request failed with status 500".to_string(),
                ),
            })
        });

        let res = TestClient::post("http://example.com/orders")
            .json(&json!({ "payment_method": "paypal" }))
            .send(&make_service(orders))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::INTERNAL_SERVER_ERROR));

        Ok(())
    }
}
