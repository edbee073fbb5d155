use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use parcheat_lib::{MemoryWriteRequest, ParVariant};

use crate::file::DEFAULT_SETTINGS_PATH;

#[derive(Parser, Debug)]
#[command(
    name = "parcheat",
    version,
    about = "Applies Pro Action Replay codes to a memory image"
)]
pub struct Cli {
    /// Settings file
    #[arg(long, global = true, default_value = DEFAULT_SETTINGS_PATH)]
    pub config: String,

    /// Code format: sfc-par or snes-par
    #[arg(long, global = true)]
    pub variant: Option<ParVariant>,

    /// The code text is encrypted
    #[arg(long, global = true)]
    pub encrypted: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Write the codes into a memory image every cycle
    Run(RunArgs),
    /// Print the address the first code targets
    Address { code_file: PathBuf },
    /// Print codes that write the given values (ADDRESS:WIDTH:VALUE, hex address and value)
    Encode {
        #[arg(required = true, value_parser = parse_request)]
        requests: Vec<MemoryWriteRequest>,
    },
    /// Print the capabilities of the code format
    Info,
}

#[derive(Args, Debug)]
pub struct RunArgs {
    pub code_file: PathBuf,
    pub memory_image: PathBuf,
    /// Address of the first byte of the image (hex)
    #[arg(long, value_parser = parse_hex)]
    pub base: Option<usize>,
    #[arg(long)]
    pub cycles: Option<u32>,
    #[arg(long)]
    pub interval_ms: Option<u64>,
    /// Where to save the image, defaults to overwriting it
    #[arg(long)]
    pub output: Option<PathBuf>,
}

fn strip_hex_prefix(s: &str) -> &str {
    s.strip_prefix("0x")
        .or_else(|| s.strip_prefix("0X"))
        .unwrap_or(s)
}

pub fn parse_hex(s: &str) -> Result<usize, String> {
    usize::from_str_radix(strip_hex_prefix(s), 16).map_err(|err| format!("{}: {}", s, err))
}

pub fn parse_request(s: &str) -> Result<MemoryWriteRequest, String> {
    let mut tokens = s.split(':');
    let (Some(address), Some(width), Some(value), None) =
        (tokens.next(), tokens.next(), tokens.next(), tokens.next())
    else {
        return Err(format!("expected ADDRESS:WIDTH:VALUE, got {}", s));
    };
    let address = parse_hex(address)?;
    let width = width
        .parse::<usize>()
        .map_err(|err| format!("{}: {}", width, err))?;
    let value = u64::from_str_radix(strip_hex_prefix(value), 16)
        .map_err(|err| format!("{}: {}", value, err))?;
    Ok(MemoryWriteRequest::new(address, width, value))
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_hex_with_or_without_prefix() {
        assert_eq!(parse_hex("7E0000"), Ok(0x7e0000));
        assert_eq!(parse_hex("0x7e0000"), Ok(0x7e0000));
        assert_eq!(parse_hex("0X7E0000"), Ok(0x7e0000));
        assert!(parse_hex("0x0x10").is_err());
        assert!(parse_hex("zz").is_err());
    }

    #[test]
    fn parses_requests() {
        assert_eq!(
            parse_request("7E0010:2:1234"),
            Ok(MemoryWriteRequest::new(0x7e0010, 2, 0x1234))
        );
        assert_eq!(
            parse_request("0X7E0010:1:0XFF"),
            Ok(MemoryWriteRequest::new(0x7e0010, 1, 0xff))
        );
        assert_eq!(
            parse_request("7e0010:1:0xff"),
            Ok(MemoryWriteRequest::new(0x7e0010, 1, 0xff))
        );
        assert!(parse_request("7E0010:2").is_err());
        assert!(parse_request("7E0010:2:1234:5").is_err());
        assert!(parse_request("7E0010:two:1234").is_err());
    }

    #[test]
    fn parses_subcommands() {
        let cli = Cli::try_parse_from([
            "parcheat",
            "--variant",
            "snes-par",
            "encode",
            "7E0010:2:1234",
            "7E0020:1:FF",
        ])
        .unwrap();
        assert_eq!(cli.variant, Some(ParVariant::SnesPar));
        let Command::Encode { requests } = cli.command else {
            panic!("unexpected command");
        };
        assert_eq!(requests.len(), 2);

        let cli = Cli::try_parse_from([
            "parcheat",
            "run",
            "codes.txt",
            "wram.bin",
            "--base",
            "7E0000",
            "--cycles",
            "5",
        ])
        .unwrap();
        let Command::Run(args) = cli.command else {
            panic!("unexpected command");
        };
        assert_eq!(args.base, Some(0x7e0000));
        assert_eq!(args.cycles, Some(5));
        assert_eq!(args.interval_ms, None);
        assert_eq!(cli.config, DEFAULT_SETTINGS_PATH);
    }
}
