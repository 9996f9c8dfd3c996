pub mod request {
    use serde::Deserialize;

    #[derive(Deserialize)]
    pub struct Payload {
        pub phone: Option<String>,
        #[serde(alias = "otp")]
        pub code: Option<String>,
    }
}

pub mod response {
    use crate::modules::user::repository::AccountProfile;
    use axum::{extract::Json, http::StatusCode, response::IntoResponse};
    use serde_json::json;

    pub enum Success {
        Verified(Option<AccountProfile>),
    }

    impl IntoResponse for Success {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::Verified(Some(user)) => (
                    StatusCode::OK,
                    Json(json!({
                        "success": true,
                        "newUser": false,
                        "isExistingAccount": true,
                        "user": user,
                    })),
                )
                    .into_response(),
                Self::Verified(None) => (
                    StatusCode::OK,
                    Json(json!({
                        "success": true,
                        "newUser": true,
                        "isExistingAccount": false,
                    })),
                )
                    .into_response(),
            }
        }
    }

    pub enum Error {
        MissingFields,
        OtpNotFound,
        OtpExpired,
        InvalidOtp,
        FailedToFetchUser,
        UnexpectedError,
    }

    impl IntoResponse for Error {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::MissingFields => (
                    StatusCode::BAD_REQUEST,
                    Json(json!({ "success": false, "error": "Phone and OTP are required" })),
                )
                    .into_response(),
                Self::OtpNotFound => (
                    StatusCode::BAD_REQUEST,
                    Json(json!({ "success": false, "error": "OTP expired or not found" })),
                )
                    .into_response(),
                Self::OtpExpired => (
                    StatusCode::BAD_REQUEST,
                    Json(json!({ "success": false, "error": "OTP expired" })),
                )
                    .into_response(),
                Self::InvalidOtp => (
                    StatusCode::BAD_REQUEST,
                    Json(json!({ "success": false, "error": "Invalid OTP" })),
                )
                    .into_response(),
                Self::FailedToFetchUser => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "success": false, "error": "Failed to fetch user" })),
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
