pub mod request {
    use serde::Deserialize;

    #[derive(Deserialize)]
    pub struct Payload {
        pub phone: Option<String>,
    }
}

pub mod response {
    use axum::{extract::Json, http::StatusCode, response::IntoResponse};
    use serde_json::json;

    pub enum Success {
        OtpSent,
    }

    impl IntoResponse for Success {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::OtpSent => (
                    StatusCode::OK,
                    Json(json!({ "success": true, "message": "OTP sent successfully" })),
                )
                    .into_response(),
            }
        }
    }

    pub enum Error {
        PhoneNumberRequired,
        FailedToSendOtp,
    }

    impl IntoResponse for Error {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::PhoneNumberRequired => (
                    StatusCode::BAD_REQUEST,
                    Json(json!({ "success": false, "error": "Phone number required" })),
                )
                    .into_response(),
                Self::FailedToSendOtp => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "success": false, "error": "OTP sending failed" })),
                )
                    .into_response(),
            }
        }
    }

    pub type Response = Result<Success, Error>;
}
