pub mod request {
    use serde::Deserialize;

    #[derive(Deserialize)]
    pub struct Payload {
        #[serde(alias = "phone")]
        pub identifier: Option<String>,
        pub password: Option<String>,
    }
}

pub mod response {
    use crate::modules::user::repository::AccountProfile;
    use axum::{extract::Json, http::StatusCode, response::IntoResponse};
    use serde_json::json;

    pub enum Success {
        LoggedIn(AccountProfile),
    }

    impl IntoResponse for Success {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::LoggedIn(user) => (
                    StatusCode::OK,
                    Json(json!({
                        "success": true,
                        "message": "Login successful",
                        "user": user,
                    })),
                )
                    .into_response(),
            }
        }
    }

    pub enum Error {
        MissingCredentials,
        InvalidCredentials,
        LoginFailed,
    }

    impl IntoResponse for Error {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::MissingCredentials => (
                    StatusCode::BAD_REQUEST,
                    Json(json!({ "success": false, "error": "Phone and password are required" })),
                )
                    .into_response(),
                Self::InvalidCredentials => (
                    StatusCode::BAD_REQUEST,
                    Json(json!({ "success": false, "error": "Invalid phone number or password" })),
                )
                    .into_response(),
                Self::LoginFailed => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "success": false, "error": "Login failed" })),
                )
                    .into_response(),
            }
        }
    }

    pub type Response = Result<Success, Error>;
}
