use anyhow::Context;
use catalog_app::modules::library::LibraryModule;
use catalog_kernel::settings::Settings;
use clap::{Parser, Subcommand};

/// Books and authors catalog served over GraphQL
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run the HTTP server (default)
    Serve {
        /// Override `server.host`
        #[arg(long)]
        host: Option<String>,
        /// Override `server.port`
        #[arg(long)]
        port: Option<u16>,
    },
    /// Print the GraphQL schema in SDL form
    Schema,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut settings = Settings::load().with_context(|| "failed to load catalog settings")?;

    match cli.command.unwrap_or(Command::Serve {
        host: None,
        port: None,
    }) {
        Command::Serve { host, port } => {
            if let Some(host) = host {
                settings.server.host = host;
            }
            if let Some(port) = port {
                settings.server.port = port;
            }

            catalog_telemetry::init(&settings.telemetry);
            tracing::info!(
                env = ?settings.environment,
                host = %settings.server.host,
                port = settings.server.port,
                "catalog CLI serving"
            );

            catalog_app::run(settings).await
        }
        Command::Schema => {
            let module = LibraryModule::new(&settings.catalog);
            println!("{}", module.schema().sdl());
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn serve_accepts_overrides() {
        let cli = Cli::parse_from(["catalog-cli", "serve", "--port", "4100", "--host", "127.0.0.1"]);
        match cli.command {
            Some(Command::Serve { host, port }) => {
                assert_eq!(host.as_deref(), Some("127.0.0.1"));
                assert_eq!(port, Some(4100));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn no_subcommand_defaults_to_serve() {
        let cli = Cli::parse_from(["catalog-cli"]);
        assert!(cli.command.is_none());
    }
}
