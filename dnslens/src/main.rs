use clap::{Parser, Subcommand};
use dnslens_core::cli;
use dnslens_core::logging::init_logging;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "dnslens",
    version,
    about = "DNS query log analysis and device mapping"
)]
struct Cli {
    /// Path to the persisted device map
    #[arg(long, default_value = "device-map.json")]
    device_map: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Analyze a resolver log file and fold observed activity into the device map
    Analyze {
        /// Path to the resolver log file
        log_file: PathBuf,

        /// Print a detailed breakdown for one client IP
        #[arg(long)]
        client: Option<String>,
    },

    /// List all registered devices
    List,

    /// Add or update a device
    Add {
        ip: String,
        name: String,
        #[arg(value_name = "TYPE")]
        device_type: String,
        category: String,
        #[arg(default_value = "")]
        description: String,
    },

    /// Export the routing table
    Export {
        #[arg(default_value = "device-routing-table.json")]
        output: PathBuf,
    },
}

fn main() {
    init_logging();

    let cli = Cli::parse();

    let result: anyhow::Result<()> = match cli.command {
        Command::Analyze { log_file, client } => {
            cli::analyze::run(&log_file, client.as_deref(), &cli.device_map)
        }

        Command::List => cli::devices::list(&cli.device_map),

        Command::Add {
            ip,
            name,
            device_type,
            category,
            description,
        } => cli::devices::add(
            &cli.device_map,
            &ip,
            &name,
            &device_type,
            &category,
            &description,
        ),

        Command::Export { output } => cli::export::run(&cli.device_map, &output),
    };

    if let Err(e) = result {
        eprintln!("dnslens error: {e:#}");
        std::process::exit(1);
    }
}
