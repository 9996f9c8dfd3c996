pub mod request {
    use serde::Deserialize;
    use validator::Validate;

    #[derive(Deserialize, Validate)]
    pub struct Payload {
        #[validate(
            required(message = "Name is required"),
            length(min = 1, message = "Name is required")
        )]
        pub name: Option<String>,
        #[validate(
            required(message = "Email is required"),
            email(code = "INVALID_USER_EMAIL", message = "Invalid email address")
        )]
        pub email: Option<String>,
        #[validate(required(message = "Phone number is required"))]
        pub phone: Option<String>,
        #[validate(
            required(message = "Password is required"),
            length(min = 1, message = "Password is required")
        )]
        pub password: Option<String>,
        pub address: Option<String>,
        pub pincode: Option<String>,
        pub role: Option<String>,
        pub latitude: Option<f64>,
        pub longitude: Option<f64>,
    }
}

pub mod response {
    use crate::{modules::user::repository::AccountProfile, utils::validation};
    use axum::{extract::Json, http::StatusCode, response::IntoResponse};
    use serde_json::json;
    use validator::ValidationErrors;

    pub enum Success {
        Registered(AccountProfile),
    }

    impl IntoResponse for Success {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::Registered(user) => (
                    StatusCode::CREATED,
                    Json(json!({
                        "success": true,
                        "message": "User registered successfully",
                        "user": user,
                    })),
                )
                    .into_response(),
            }
        }
    }

    pub enum Error {
        FailedToValidate(ValidationErrors),
        MissingRequiredFields,
        InvalidPhoneNumber,
        InvalidRole,
        UserAlreadyExists,
        FailedToFetchUser,
        RegistrationFailed,
        UnexpectedError,
    }

    impl IntoResponse for Error {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::FailedToValidate(errors) => validation::into_response(errors),
                Self::MissingRequiredFields => {
                    validation::bad_request("Name, email, phone and password are required")
                }
                Self::InvalidPhoneNumber => validation::bad_request("Invalid phone number"),
                Self::InvalidRole => validation::bad_request("Invalid role"),
                Self::UserAlreadyExists => (
                    StatusCode::BAD_REQUEST,
                    Json(json!({ "success": false, "error": "User already exists" })),
                )
                    .into_response(),
                Self::FailedToFetchUser => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "success": false, "error": "Failed to fetch user" })),
                )
                    .into_response(),
                Self::RegistrationFailed => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "success": false, "error": "Registration failed" })),
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
