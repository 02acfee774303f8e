use anyhow::Context;
use clap::{Parser, Subcommand};

use folio_kernel::settings::Settings;
use folio_kernel::{InitCtx, ModuleRegistry};

#[derive(Parser)]
#[command(name = "folio", about = "Folio book catalog service", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the HTTP server
    Serve,
    /// Print the merged OpenAPI specification as JSON
    Openapi,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let settings = Settings::load().with_context(|| "failed to load Folio settings")?;

    let mut registry = ModuleRegistry::new();
    folio_app::modules::register_all(&mut registry);

    match cli.command {
        Command::Serve => {
            folio_telemetry::init(&settings.telemetry)?;

            tracing::info!(env = ?settings.environment, "folio serve starting");

            let ctx = InitCtx {
                settings: &settings,
            };
            registry.init_modules(&ctx).await?;
            registry.start_modules(&ctx).await?;

            folio_http::start_server(&registry, &settings).await?;

            registry.stop_modules().await?;
        }
        Command::Openapi => {
            let spec = folio_http::router::merged_openapi(&registry);
            println!("{}", serde_json::to_string_pretty(&spec)?);
        }
    }

    Ok(())
}
