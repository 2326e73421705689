use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing::info;

use hostq_core::config::{default_config_path, HostqConfig};
use hostq_core::{Channel, Syncpoint};
use hostq_transport::{DeviceHandle, DrmDevice};

#[derive(Parser)]
#[command(name = "hostq")]
#[command(about = "hostq - syncpoint-fenced GPU job submission")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Round-trip an exclusive syncpoint on a channel context (acquire,
    /// print what the driver assigned, release)
    Syncpt {
        /// DRM device node (defaults to the configured device)
        #[arg(short, long)]
        device: Option<String>,

        /// Channel context id to acquire for
        #[arg(short, long)]
        context: u64,

        /// Also reserve a wait base
        #[arg(long)]
        with_base: bool,

        /// Configuration file path
        #[arg(long, default_value_t = default_config_path())]
        config: String,
    },

    /// Show the resolved device configuration
    Info {
        /// Configuration file path
        #[arg(long, default_value_t = default_config_path())]
        config: String,
    },
}

fn main() -> anyhow::Result<()> {
    hostq_common::init_logging();

    let cli = Cli::parse();

    match cli.command {
        Commands::Syncpt {
            device,
            context,
            with_base,
            config,
        } => {
            anyhow::ensure!(context != 0, "context id must be nonzero");

            let config = HostqConfig::load_or_default(&config);
            let path = device.unwrap_or(config.device.path);

            let device: DeviceHandle = Arc::new(DrmDevice::open(path)?);
            // The channel syncpt is not involved in the exclusive-syncpoint
            // round trip, only the context id is.
            let channel = Channel::new(device, context, 0);

            let syncpt = Syncpoint::acquire_exclusive(&channel, with_base)?;
            println!(
                "syncpt id={} value={} index={}",
                syncpt.id(),
                syncpt.value(),
                syncpt.index()
            );
            syncpt.release()?;

            info!("exclusive syncpoint round trip complete");
        }

        Commands::Info { config } => {
            let config = HostqConfig::load_or_default(&config);
            println!("platform: {}", hostq_common::platform::platform_name());
            println!("device:   {}", config.device.path);
        }
    }

    Ok(())
}
