use clap::{Parser, Subcommand};
use morroky_cli::{commands, CliStatus};
use morroky_config::{BaasConfig, ENV_BAAS_ANON_KEY, ENV_BAAS_URL};
use morroky_core::MerchantFilter;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[derive(Parser)]
#[command(author, version, about)]
struct Cli {
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Args)]
struct Backend {
    #[arg(long, env = ENV_BAAS_URL)]
    url: String,
    #[arg(long, env = ENV_BAAS_ANON_KEY, hide_env_values = true)]
    anon_key: String,
}

impl Backend {
    fn config(&self) -> BaasConfig {
        BaasConfig::new(&self.url, &self.anon_key)
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Show which screen a path opens, without touching the backend
    Route { path: String },
    /// Boot the client at a path and print the rendered screen
    Render {
        #[arg(default_value = "/")]
        path: String,
        #[command(flatten)]
        backend: Backend,
        #[arg(long, help = "Also print the toast surface")]
        with_toast: bool,
        #[arg(long, help = "Print a JSON report instead of raw HTML")]
        json: bool,
    },
    /// List merchants as JSON
    Merchants {
        #[command(flatten)]
        backend: Backend,
        #[arg(long, value_enum)]
        status: Option<CliStatus>,
        #[arg(long)]
        street: Option<String>,
        #[arg(long, requires = "street")]
        kissaria: Option<String>,
        #[arg(long, requires = "kissaria")]
        alley: Option<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let default = if cli.verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    match cli.command {
        Commands::Route { path } => commands::print_json(&commands::cmd_route(&path))?,
        Commands::Render {
            path,
            backend,
            with_toast,
            json,
        } => {
            let services = commands::connect(&backend.config())?;
            let report = commands::cmd_render(services, &path, with_toast).await?;
            if json {
                commands::print_json(&report)?;
            } else {
                println!("{}", report.html);
                if let Some(toast) = report.toast.filter(|t| !t.is_empty()) {
                    println!("{toast}");
                }
            }
        }
        Commands::Merchants {
            backend,
            status,
            street,
            kissaria,
            alley,
        } => {
            let services = commands::connect(&backend.config())?;
            let filter = MerchantFilter {
                street_id: street,
                kissaria_id: kissaria,
                alley,
                status: status.map(Into::into),
            };
            let merchants = commands::cmd_merchants(&services, filter).await?;
            commands::print_json(&merchants)?;
        }
    }

    Ok(())
}
