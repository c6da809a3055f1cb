mod commands;
mod terminal;

use std::sync::Arc;

use commands::{CommandLine, Commands, discover, normalize, provision};
use intake_common::config::Config;
use intake_core::boot::DryRunBoot;
use intake_core::inspection::HttpInventory;
use intake_core::inventory::MemoryInventory;
use intake_core::service::DiscoveryService;
use intake_core::subnets::SubnetTable;
use terminal::{Console, logging, print};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let commands = CommandLine::parse_args();
    logging::init(commands.verbose);

    let console = Console {
        quiet: commands.quiet,
        no_banner: commands.no_banner,
    };
    print::banner(console.no_banner, console.quiet);

    let result = match commands.command {
        Commands::Normalize { text } => {
            print::header("normalizing", console.quiet);
            normalize::normalize(&text, console)
        }
        Commands::Discover { files, refresh } => {
            let service = build_service(commands.config.as_deref())?;
            print::header("getting ready for discovery", console.quiet);
            discover::discover(files, refresh, &service, console).await
        }
        Commands::Provision { file } => {
            let service = build_service(commands.config.as_deref())?;
            print::header("provisioning", console.quiet);
            provision::provision(&file, &service, console)
        }
    };

    print::end_of_program(console.quiet);
    result
}

fn build_service(path: Option<&std::path::Path>) -> anyhow::Result<DiscoveryService> {
    let config = Config::load(path)?;

    let inventory = Arc::new(MemoryInventory::from_config(&config)?);
    let subnets = Arc::new(SubnetTable::from_config(&config, inventory.as_ref())?);
    let inspector = Box::new(HttpInventory::new(&config.inspection)?);

    Ok(DiscoveryService::new(
        Arc::new(config.settings),
        inventory.clone(),
        inventory,
        subnets,
        inspector,
    )
    .with_boot(Box::new(DryRunBoot)))
}
