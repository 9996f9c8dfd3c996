pub mod request {
    pub struct Payload {
        pub driver_id: Option<String>,
    }
}

pub mod response {
    use crate::modules::user::repository::AssignedCustomer;
    use axum::{extract::Json, http::StatusCode, response::IntoResponse};
    use serde_json::json;

    pub enum Success {
        AssignedCustomers(Vec<AssignedCustomer>),
    }

    impl IntoResponse for Success {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::AssignedCustomers(customers) => (
                    StatusCode::OK,
                    Json(json!({ "success": true, "customers": customers })),
                )
                    .into_response(),
            }
        }
    }

    pub enum Error {
        DriverIdRequired,
        InvalidDriverId,
        UnexpectedError,
    }

    impl IntoResponse for Error {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::DriverIdRequired => (
                    StatusCode::BAD_REQUEST,
                    Json(json!({ "success": false, "error": "Driver ID is required" })),
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
