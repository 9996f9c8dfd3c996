pub mod request {
    use serde::Deserialize;
    use serde_json::Value;

    #[derive(Deserialize)]
    pub struct Payload {
        #[serde(rename = "userId")]
        pub user_id: Option<Value>,
    }
}

pub mod response {
    use axum::{extract::Json, http::StatusCode, response::IntoResponse};
    use serde_json::json;

    pub enum Success {
        PremiumApproved,
    }

    impl IntoResponse for Success {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::PremiumApproved => (
                    StatusCode::OK,
                    Json(json!({ "success": true, "message": "Premium approved" })),
                )
                    .into_response(),
            }
        }
    }

    pub enum Error {
        UserIdRequired,
        InvalidUserId,
        UserNotFound,
        UnexpectedError,
    }

    impl IntoResponse for Error {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::UserIdRequired => (
                    StatusCode::BAD_REQUEST,
                    Json(json!({ "success": false, "error": "userId is required" })),
                )
                    .into_response(),
                Self::InvalidUserId => (
                    StatusCode::BAD_REQUEST,
                    Json(json!({ "success": false, "error": "Invalid user ID" })),
                )
                    .into_response(),
                Self::UserNotFound => (
                    StatusCode::NOT_FOUND,
                    Json(json!({ "success": false, "error": "User not found" })),
                )
                    .into_response(),
                Self::UnexpectedError => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "success": false, "error": "Sorry an error occurred" })),
                )
                    .into_response(),
            }
        }
    }

    pub type Response = Result<Success, Error>;
}
