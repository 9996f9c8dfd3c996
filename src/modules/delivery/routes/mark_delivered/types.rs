pub mod request {
    use serde::Deserialize;
    use serde_json::Value;

    /// Numbers may arrive as JSON numbers or numeric strings.
    #[derive(Deserialize)]
    pub struct Payload {
        pub customer_id: Option<Value>,
        pub driver_id: Option<Value>,
        pub cans_delivered: Option<Value>,
        pub notes: Option<String>,
    }
}

pub mod response {
    use crate::{modules::delivery::repository::DeliveryRecord, utils::validation};
    use axum::{extract::Json, http::StatusCode, response::IntoResponse};
    use serde_json::json;
    use validator::ValidationErrors;

    pub enum Success {
        Delivered(DeliveryRecord),
    }

    impl IntoResponse for Success {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::Delivered(delivery) => (
                    StatusCode::OK,
                    Json(json!({
                        "success": true,
                        "message": "Delivery recorded",
                        "delivery": delivery,
                    })),
                )
                    .into_response(),
            }
        }
    }

    pub enum Error {
        FailedToValidate(ValidationErrors),
        FailedToRecordDelivery,
    }

    impl IntoResponse for Error {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::FailedToValidate(errors) => validation::into_response(errors),
                Self::FailedToRecordDelivery => (
                    StatusCode::BAD_REQUEST,
                    Json(json!({ "success": false, "error": "Failed to record delivery" })),
                )
                    .into_response(),
            }
        }
    }

    pub type Response = Result<Success, Error>;
}
