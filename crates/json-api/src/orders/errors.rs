//! Errors

use salvo::http::StatusError;
use tracing::error;

use ampera_app::domain::orders::OrdersServiceError;

pub(crate) fn into_status_error(error: OrdersServiceError) -> StatusError {
    match error {
        OrdersServiceError::UserNotFound { .. } | OrdersServiceError::CartNotFound => {
            StatusError::not_found().brief(error.to_string())
        }
        OrdersServiceError::UnknownPaymentMethod => {
            StatusError::bad_request().brief(error.to_string())
        }
        OrdersServiceError::Gateway { ref source } => {
            error!("payment gateway failure: {source}");

            StatusError::internal_server_error().brief(error.to_string())
        }
        OrdersServiceError::Sql(source) => {
            error!("order storage failure: {source}");

            StatusError::internal_server_error()
        }
    }
}
