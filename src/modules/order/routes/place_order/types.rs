pub mod request {
    use serde::Deserialize;
    use serde_json::Value;
    use validator::Validate;

    /// `user_id` and `cans` may be JSON numbers or numeric strings; they are
    /// checked in the service.
    #[derive(Deserialize, Validate)]
    pub struct Payload {
        pub user_id: Option<Value>,
        pub cans: Option<Value>,
        #[validate(required, length(min = 1))]
        pub slot: Option<String>,
        #[serde(rename = "isPremium", default)]
        pub is_premium: bool,
    }
}

pub mod response {
    use crate::modules::order::repository::WaterOrder;
    use axum::{extract::Json, http::StatusCode, response::IntoResponse};
    use serde_json::json;
    use validator::ValidationErrors;

    pub enum Success {
        OrderPlaced(WaterOrder),
    }

    impl IntoResponse for Success {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::OrderPlaced(order) => (
                    StatusCode::CREATED,
                    Json(json!({
                        "success": true,
                        "message": "Water order placed successfully",
                        "order": order,
                    })),
                )
                    .into_response(),
            }
        }
    }

    pub enum Error {
        MissingRequiredFields(ValidationErrors),
        UserNotFound,
        FailedToFetchUser,
        FailedToPlaceOrder,
    }

    impl IntoResponse for Error {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::MissingRequiredFields(errors) => (
                    StatusCode::BAD_REQUEST,
                    Json(json!({
                        "success": false,
                        "error": "Missing required fields",
                        "errors": errors,
                    })),
                )
                    .into_response(),
                Self::UserNotFound => (
                    StatusCode::BAD_REQUEST,
                    Json(json!({ "success": false, "error": "Invalid user ID" })),
                )
                    .into_response(),
                Self::FailedToFetchUser => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "success": false, "error": "Failed to fetch user" })),
                )
                    .into_response(),
                Self::FailedToPlaceOrder => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "success": false, "error": "Failed to place order" })),
                )
                    .into_response(),
            }
        }
    }

    pub type Response = Result<Success, Error>;
}
