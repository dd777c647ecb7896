use clap::Parser;
use std::path::PathBuf;
use vcapenv_config::Settings;

mod commands;
mod execute;

use commands::{Commands, Context};

#[derive(Parser)]
#[command(name = "vcapenv")]
#[command(about = "Inspect bound services and build connection URIs from VCAP_SERVICES", long_about = None)]
#[command(version)]
struct Cli {
    /// Variable holding the services blob
    #[arg(long = "blob-var", value_name = "NAME", global = true)]
    blob_var: Option<String>,

    /// Properties file consulted after the environment (defaults to $VCAPENV_PROPERTIES)
    #[arg(long, value_name = "PATH", global = true)]
    properties: Option<PathBuf>,

    /// Read the services blob from a file instead of the environment
    #[arg(long, value_name = "PATH", global = true)]
    file: Option<PathBuf>,

    /// Resolve ${KEY,default} placeholders in credential values
    #[arg(long, global = true)]
    resolve: bool,

    #[command(subcommand)]
    command: Commands,
}

fn main() -> eyre::Result<()> {
    color_eyre::install()?;
    vcapenv_utils::tracing::init(vcapenv_utils::tracing::DEFAULT_DIRECTIVE)
        .map_err(|e| eyre::eyre!("failed to initialise logging: {e}"))?;

    let cli = Cli::parse();

    let mut settings = Settings::from_env().with_resolve_placeholders(cli.resolve);
    if let Some(variable) = cli.blob_var {
        settings = settings.with_blob_variable(variable);
    }
    if let Some(path) = cli.properties {
        settings = settings.with_properties_file(path);
    }

    let context = Context::new(settings, cli.file)?;
    cli.command.execute(&context)
}
