use std::sync::Arc;

use anyhow::Context as _;
use tracing::{error, info, warn};
use verity_context::{
    teardown, utils::logging::init_logging, Context, ContextBuilder, InMemoryWalletStorage, RocksWalletStorage,
    Settings, StorageBackend, WalletCredential, WalletStorage,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    let settings = Settings::new().context("Failed to load configuration")?;
    let _log_guard = init_logging(&settings.logging).context("Failed to initialise logging")?;

    info!("Starting verity-context v{}", env!("CARGO_PKG_VERSION"));

    let storage: Arc<dyn WalletStorage> = match settings.storage.backend {
        StorageBackend::Memory => Arc::new(InMemoryWalletStorage::new()),
        StorageBackend::Rocks => {
            let path = settings
                .storage_path()
                .context("storage.path is required for the rocks backend")?;
            Arc::new(RocksWalletStorage::new(&path).context("Failed to prepare wallet directory")?)
        }
    };

    let builder = if settings.context.wallet_id.is_none() {
        let credential = WalletCredential::generate()?;
        info!("No wallet configured, generated wallet {}", credential.wallet_id());
        ContextBuilder::blank()
            .with_credential(credential)
            .overlay_settings(&settings.context)
    } else {
        ContextBuilder::from_settings(&settings.context)
    };

    let mut context = builder.build(storage).await.map_err(|e| {
        error!("Failed to build context: {}", e);
        e
    })?;

    let outcome = run(&mut context).await;

    if settings.keep_wallet {
        context.close_wallet().await?;
        warn!("Keeping wallet {} as configured", context.wallet_config().config());
        outcome?;
    } else {
        let cleanup = teardown(Some(&mut context)).await;
        match (outcome, cleanup) {
            (Err(e), Err(cleanup_err)) => {
                error!("Teardown after failure also failed: {}", cleanup_err);
                return Err(e);
            }
            (outcome, cleanup) => {
                outcome?;
                cleanup?;
            }
        }
    }

    info!("Done");
    Ok(())
}

async fn run(context: &mut Context) -> anyhow::Result<()> {
    let sdk_did = context.create_and_store_did().await?;
    info!("Stored SDK DID {} in wallet {}", sdk_did.did, context.wallet_config().id());

    println!("{}", context.to_json()?);
    Ok(())
}
