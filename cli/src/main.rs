use lib::config::Config;
use log::info;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = <Config as clap::Parser>::parse();
    info!("Reading assets from {}", config.asset_root.display());

    let (_, output) = lib::pipeline::generate(config)?;

    info!("Finished. Output written to {}", output.display());

    Ok(())
}
