use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use s3_enum::args::Args;
use s3_enum::config;
use s3_enum::handlers::run_enumeration;
use s3_enum::region::RegionResolver;
use s3_enum::s3::AnonymousLister;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), anyhow::Error> {
    let args = Args::parse();

    // Load saved config
    let (app_config, load_error) = config::load_config();

    // Logs go to stderr (and optionally a file) so stdout stays a clean listing
    let (file_layer, _guard) = if app_config.log_path.is_empty() {
        (None, None)
    } else {
        let file_appender = tracing_appender::rolling::never(&app_config.log_path, "s3e.log");
        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
        (
            Some(fmt::layer().with_ansi(false).with_writer(non_blocking)),
            Some(guard),
        )
    };

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env().add_directive(args.log_level().into()))
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(file_layer)
        .init();

    config::report_load_error(load_error.as_ref());
    info!("Config loaded from: {:?}", config::get_config_path());

    let request = args.to_request(&app_config);
    let resolver =
        RegionResolver::new(&app_config.probe).context("Failed to build the region probe client")?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    run_enumeration(
        &resolver,
        AnonymousLister::for_region,
        &request,
        app_config.output,
        &mut out,
    )
    .await?;

    Ok(())
}
