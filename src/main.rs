use std::sync::Arc;
use tracing_subscriber::prelude::*;
use waterplant_backend_rs::{
    app::App,
    jobs,
    types::{Config, Context, ToContext},
};

fn init_tracing() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let ctx: Arc<Context> = Arc::new(Config::from_env()?.to_context().await?);

    let app = App::new(ctx.clone());

    let http = app.serve();
    let job_monitor = jobs::monitor(ctx.clone());

    tokio::select! {
        result = http => result?,
        _ = job_monitor => {}
    }

    Ok(())
}
