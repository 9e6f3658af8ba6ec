use std::sync::Arc;

use anyhow::Context;
use content_sources::prelude::*;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load().context("failed to load configuration")?;
    init_tracing(&config)?;

    let store = Arc::new(InMemoryRepositoryStore::new());
    let state = AppState::new(config.clone(), store);

    Server::new(config)
        .serve(app(state))
        .await
        .context("server terminated with an error")?;

    Ok(())
}
