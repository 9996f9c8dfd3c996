use super::otp::generate_code;
use tokio::sync::OnceCell;

/// bcrypt cost factor for stored password hashes.
pub const BCRYPT_COST: u32 = 10;

static DECOY_HASH: OnceCell<Option<String>> = OnceCell::const_new();

#[derive(Debug)]
pub enum Error {
    UnexpectedError,
}

pub async fn hash(password: String) -> Result<String, Error> {
    tokio::task::spawn_blocking(move || bcrypt::hash(password, BCRYPT_COST))
        .await
        .map_err(|err| {
            tracing::error!("Password hashing task failed: {}", err);
            Error::UnexpectedError
        })?
        .map_err(|err| {
            tracing::error!("Failed to hash password: {}", err);
            Error::UnexpectedError
        })
}

pub async fn verify(password: String, hash: String) -> Result<bool, Error> {
    tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash))
        .await
        .map_err(|err| {
            tracing::error!("Password verification task failed: {}", err);
            Error::UnexpectedError
        })?
        .map_err(|err| {
            tracing::error!("Failed to verify password against stored hash: {}", err);
            Error::UnexpectedError
        })
}

/// Runs one bcrypt verification against a throwaway hash, so a login for a
/// phone with no account costs the same as a failed one.
pub async fn verify_decoy(password: String) {
    let decoy = DECOY_HASH
        .get_or_init(|| async { hash(generate_code()).await.ok() })
        .await;

    if let Some(decoy) = decoy {
        let _ = verify(password, decoy.clone()).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn hashes_are_salted_and_verifiable() {
        let first = hash("correct horse".to_string()).await.unwrap();
        let second = hash("correct horse".to_string()).await.unwrap();

        assert_ne!(first, second);
        assert_ne!(first, "correct horse");
        assert!(verify("correct horse".to_string(), first.clone()).await.unwrap());
        assert!(!verify("battery staple".to_string(), first).await.unwrap());
    }

    #[tokio::test]
    async fn uses_the_configured_cost() {
        let hashed = hash("secret".to_string()).await.unwrap();
        assert!(hashed.starts_with("$2b$10$"));
    }

    #[tokio::test]
    async fn decoy_hash_is_built_once_and_reused() {
        verify_decoy("anything".to_string()).await;
        let first = DECOY_HASH.get().cloned().flatten().unwrap();

        verify_decoy("something else".to_string()).await;
        let second = DECOY_HASH.get().cloned().flatten().unwrap();

        assert_eq!(first, second);
        assert!(first.starts_with("$2b$10$"));
    }
}
