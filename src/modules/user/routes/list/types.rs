pub mod request {
    /// Plural role name taken from the path, e.g. `drivers`.
    pub struct Payload {
        pub role: String,
    }
}

pub mod response {
    use crate::modules::user::repository::AccountProfile;
    use axum::{extract::Json, http::StatusCode, response::IntoResponse};
    use serde_json::json;

    pub enum Success {
        Drivers(Vec<AccountProfile>),
        Customers(Vec<AccountProfile>),
    }

    impl IntoResponse for Success {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::Drivers(drivers) => (
                    StatusCode::OK,
                    Json(json!({ "success": true, "drivers": drivers })),
                )
                    .into_response(),
                Self::Customers(customers) => (
                    StatusCode::OK,
                    Json(json!({ "success": true, "customers": customers })),
                )
                    .into_response(),
            }
        }
    }

    pub enum Error {
        UnknownList,
        FailedToFetchUsers,
    }

    impl IntoResponse for Error {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::UnknownList => (
                    StatusCode::NOT_FOUND,
                    Json(json!({ "success": false, "error": "Unknown user list" })),
                )
                    .into_response(),
                Self::FailedToFetchUsers => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "success": false, "error": "Failed to fetch users" })),
                )
                    .into_response(),
            }
        }
    }

    pub type Response = Result<Success, Error>;
}
