pub mod sms;

pub mod types {
    #[derive(Clone, Debug)]
    pub struct VerificationOtpRequested {
        pub phone: String,
        pub otp: String,
        pub valid_for_minutes: i64,
    }
}

#[derive(Clone, Debug)]
pub enum Notification {
    VerificationOtpRequested(types::VerificationOtpRequested),
}

impl Notification {
    pub fn verification_otp_requested(phone: String, otp: String, valid_for_minutes: i64) -> Self {
        Notification::VerificationOtpRequested(types::VerificationOtpRequested {
            phone,
            otp,
            valid_for_minutes,
        })
    }

    pub fn recipient(&self) -> &str {
        match self {
            Notification::VerificationOtpRequested(n) => &n.phone,
        }
    }

    pub fn message(&self) -> String {
        match self {
            Notification::VerificationOtpRequested(n) => format!(
                "Your OTP is: {}\nIt will expire in {} minutes, do not share it with anyone",
                n.otp, n.valid_for_minutes
            ),
        }
    }
}

#[derive(Debug)]
pub enum Error {
    NotSent,
}

pub type Result<T> = std::result::Result<T, Error>;
