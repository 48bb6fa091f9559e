use openmensa_mock::{config, make_router, Fixtures, RequestLog};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().init();

    let config = config::read(config::CONFIG_PATH).await?;

    let fixtures = match &config.fixtures {
        Some(path) => Fixtures::read(path).await?,
        None => {
            tracing::info!("no fixtures given, serving demo data");
            Fixtures::demo(chrono::Local::now().date_naive())
        },
    };

    let app = make_router(fixtures, config.paging, RequestLog::default());

    let addr = (config.server.address, config.server.port);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    let addr = listener.local_addr()?;
    tracing::info!("serving mock openmensa on http://{addr}/api/v2");

    axum::serve::serve(listener, app).with_graceful_shutdown(async {
        _ = tokio::signal::ctrl_c().await;
    }).await?;

    Ok(())
}
