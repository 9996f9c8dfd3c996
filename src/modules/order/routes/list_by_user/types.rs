pub mod request {
    pub struct Payload {
        pub user_id: String,
    }
}

pub mod response {
    use crate::modules::order::repository::WaterOrder;
    use axum::{extract::Json, http::StatusCode, response::IntoResponse};
    use serde_json::json;

    pub enum Success {
        Orders(Vec<WaterOrder>),
    }

    impl IntoResponse for Success {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::Orders(orders) => (StatusCode::OK, Json(orders)).into_response(),
            }
        }
    }

    pub enum Error {
        InvalidUserId,
        FailedToFetchOrders,
    }

    impl IntoResponse for Error {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::InvalidUserId => (
                    StatusCode::BAD_REQUEST,
                    Json(json!({ "success": false, "error": "Invalid user ID" })),
                )
                    .into_response(),
                Self::FailedToFetchOrders => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "success": false, "error": "Failed to fetch orders" })),
                )
                    .into_response(),
            }
        }
    }

    pub type Response = Result<Success, Error>;
}
