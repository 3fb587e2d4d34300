//! Errors

use salvo::http::StatusError;
use tracing::error;

use ampera_app::domain::carts::CartsServiceError;

pub(crate) fn into_status_error(error: CartsServiceError) -> StatusError {
    match error {
        CartsServiceError::NotFound { .. } => StatusError::not_found().brief(error.to_string()),
        CartsServiceError::QuantityExceedsInventory => {
            StatusError::bad_request().brief(error.to_string())
        }
        CartsServiceError::Sql(source) => {
            error!("cart storage failure: {source}");

            StatusError::internal_server_error()
        }
    }
}
