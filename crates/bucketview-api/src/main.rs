use bucketview_core::Config;

// Use mimalloc as the global allocator for better performance and lower
// fragmentation, especially when running on musl-based systems inside
// containers.
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    // Load configuration; a declared account missing a field aborts here.
    let config = Config::from_env()?;

    // Initialize the application (telemetry, account connections, routes)
    let (_state, router) = bucketview_api::setup::initialize_app(config.clone())?;

    // Start the server
    bucketview_api::setup::server::start_server(&config, router).await?;

    Ok(())
}
