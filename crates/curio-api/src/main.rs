use curio_core::Config;

// Use mimalloc as the global allocator for lower fragmentation on long-running
// upload workloads.
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize the application (database, storage, routes)
    let (_state, router) = curio_api::setup::initialize_app(config.clone()).await?;

    // Start the server
    curio_api::setup::server::start_server(&config, router).await?;

    Ok(())
}
