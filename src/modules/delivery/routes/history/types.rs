pub mod request {
    pub struct Payload {
        pub customer_id: String,
    }
}

pub mod response {
    use crate::modules::delivery::repository::DeliveryRecord;
    use axum::{extract::Json, http::StatusCode, response::IntoResponse};
    use serde_json::json;

    pub enum Success {
        Deliveries(Vec<DeliveryRecord>),
    }

    impl IntoResponse for Success {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::Deliveries(deliveries) => (
                    StatusCode::OK,
                    Json(json!({ "success": true, "deliveries": deliveries })),
                )
                    .into_response(),
            }
        }
    }

    pub enum Error {
        InvalidCustomerId,
        FailedToFetchDeliveries,
    }

    impl IntoResponse for Error {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::InvalidCustomerId => (
                    StatusCode::BAD_REQUEST,
                    Json(json!({ "success": false, "error": "Invalid customer ID" })),
                )
                    .into_response(),
                Self::FailedToFetchDeliveries => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "success": false, "error": "Failed to fetch deliveries" })),
                )
                    .into_response(),
            }
        }
    }

    pub type Response = Result<Success, Error>;
}
