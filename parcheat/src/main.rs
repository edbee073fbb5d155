mod cli;
mod file;
mod host;
mod tracing_helper;

use std::{path::Path, time::Duration};

use anyhow::{Context, Result};
use clap::Parser;
use parcheat_lib::{new_code_plugin, CodePlugin, ParVariant, RamImage};
use tokio::fs;
use tracing::{info, warn};

use crate::{
    cli::{Cli, Command, RunArgs},
    file::{Settings, SettingsRepo},
    host::{drive_cycles, DEFAULT_CYCLES, DEFAULT_INTERVAL_MS},
};

const DEFAULT_BASE_ADDRESS: usize = 0x7e0000;

async fn read_code(path: &Path) -> Result<String> {
    fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))
}

async fn run(
    plugin: &mut dyn CodePlugin,
    encrypted: bool,
    settings: &Settings,
    args: RunArgs,
) -> Result<()> {
    let RunArgs {
        code_file,
        memory_image,
        base,
        cycles,
        interval_ms,
        output,
    } = args;
    let code = read_code(&code_file).await?;
    let bytes = fs::read(&memory_image)
        .await
        .with_context(|| format!("Failed to read {}", memory_image.display()))?;
    let base = base
        .or(settings.base_address)
        .unwrap_or(DEFAULT_BASE_ADDRESS);
    let cycles = cycles.or(settings.cycles).unwrap_or(DEFAULT_CYCLES);
    let interval_ms = interval_ms
        .or(settings.interval_ms)
        .unwrap_or(DEFAULT_INTERVAL_MS);

    let mut ram = RamImage::new(base, bytes);
    plugin.start(&code, encrypted);
    drive_cycles(plugin, &mut ram, cycles, Duration::from_millis(interval_ms)).await;
    plugin.stop();
    if !plugin.get_error().is_empty() {
        warn!("{}", plugin.get_error());
    }

    let output = output.unwrap_or(memory_image);
    fs::write(&output, ram.into_bytes())
        .await
        .with_context(|| format!("Failed to write {}", output.display()))?;
    info!("saved {}", output.display());
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let settings = SettingsRepo::new(cli.config.clone()).load().await;
    tracing_helper::init_tracing(settings.log_dir.as_deref(), "parcheat.log", true);

    let variant: ParVariant = cli.variant.or(settings.variant).unwrap_or_default();
    let mut plugin = new_code_plugin(variant);
    let result = match cli.command {
        Command::Run(args) => run(plugin.as_mut(), cli.encrypted, &settings, args).await,
        Command::Address { code_file } => {
            let code = read_code(&code_file).await?;
            println!("{:06X}", plugin.get_address(&code, cli.encrypted));
            Ok(())
        }
        Command::Encode { requests } => {
            let code = plugin.get_code_string(&requests, cli.encrypted)?;
            println!("{}", code);
            Ok(())
        }
        Command::Info => {
            println!("name: {}", plugin.name());
            println!("can get address: {}", plugin.can_get_address());
            println!("can encrypt: {}", plugin.can_encrypt());
            println!(
                "accepts encrypted code: {}",
                variant.accepts_encrypted_code()
            );
            Ok(())
        }
    };
    plugin.dispose();
    result
}
