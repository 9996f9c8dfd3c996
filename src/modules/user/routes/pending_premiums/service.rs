use super::types::response;
use crate::types::Context;
use std::sync::Arc;

pub async fn service(ctx: Arc<Context>) -> response::Response {
    ctx.db
        .accounts
        .find_many_with_pending_premium()
        .await
        .map(|accounts| response::Success::Users(accounts.into_iter().map(Into::into).collect()))
        .map_err(|_| response::Error::FailedToFetchUsers)
}
