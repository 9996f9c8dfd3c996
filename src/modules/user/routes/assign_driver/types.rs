pub mod request {
    use serde::Deserialize;
    use serde_json::Value;

    #[derive(Deserialize)]
    pub struct Payload {
        #[serde(rename = "customerId")]
        pub customer_id: Option<Value>,
        #[serde(rename = "driverId")]
        pub driver_id: Option<Value>,
    }
}

pub mod response {
    use axum::{extract::Json, http::StatusCode, response::IntoResponse};
    use serde_json::json;

    pub enum Success {
        DriverAssigned(String),
    }

    impl IntoResponse for Success {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::DriverAssigned(message) => (
                    StatusCode::OK,
                    Json(json!({ "success": true, "message": message })),
                )
                    .into_response(),
            }
        }
    }

    pub enum Error {
        MissingFields,
        InvalidCustomerId,
        InvalidDriverId,
        UnexpectedError,
    }

    impl IntoResponse for Error {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::MissingFields => (
                    StatusCode::BAD_REQUEST,
                    Json(json!({
                        "success": false,
                        "error": "customerId and driverId are required"
                    })),
                )
                    .into_response(),
                Self::InvalidCustomerId => (
                    StatusCode::BAD_REQUEST,
                    Json(json!({ "success": false, "error": "Invalid customer ID" })),
                )
                    .into_response(),
                Self::InvalidDriverId => (
                    StatusCode::BAD_REQUEST,
                    Json(json!({ "success": false, "error": "Invalid driver ID" })),
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
