use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use netcalc_cidr::{calculate_cidr, generate_subnets_with_config};
use netcalc_core::{classify, ip_to_long, long_to_ip, to_binary, EngineConfig};
use netcalc_mcp::{McpServer, StdioTransport};
use std::sync::Arc;
use tracing::{info, warn};

mod batch;
mod logging;
mod output;

use batch::{BatchProcessor, BatchResult};
use output::{AddressReport, OutputFormat};

/// IPv4 CIDR analyzer and subnet calculator
#[derive(Parser)]
#[command(name = "netcalc")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Output format
    #[arg(short, long, value_enum, default_value = "human", global = true)]
    output: OutputFormat,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Maximum subnets one request may produce (overrides NETCALC_MAX_SUBNETS)
    #[arg(long, value_name = "N", global = true)]
    max_subnets: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze a CIDR block (e.g., 192.168.1.0/24)
    Calc(CalcArgs),
    /// Split a network into equal subnets
    Subnet(SubnetArgs),
    /// Convert between dotted-quad and integer form
    Addr(AddrArgs),
    /// Analyze many CIDR blocks from a file or stdin
    ///
    /// Every entry is reported. Exits non-zero if any entry failed.
    Batch(BatchArgs),
    /// Serve JSON-RPC requests over stdio
    Serve,
}

#[derive(Parser)]
struct CalcArgs {
    /// CIDR notation, address/prefix
    #[arg(value_name = "CIDR")]
    cidr: String,
}

#[derive(Parser)]
struct SubnetArgs {
    /// Base network in CIDR notation
    #[arg(value_name = "BASE_CIDR")]
    base_cidr: String,

    /// New, longer prefix length
    #[arg(value_name = "NEW_PREFIX")]
    new_prefix: String,
}

#[derive(Parser)]
struct AddrArgs {
    /// Dotted quad (e.g., 10.0.0.1) or unsigned integer (e.g., 167772161)
    #[arg(value_name = "VALUE")]
    value: String,
}

#[derive(Parser)]
struct BatchArgs {
    /// Input file, one CIDR per line (use '-' for stdin)
    #[arg(short, long, value_name = "FILE")]
    file: Option<String>,

    /// Number of worker threads (default: CPU cores)
    #[arg(short, long)]
    threads: Option<usize>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose);
    run(cli)
}

fn run(cli: Cli) -> Result<()> {
    // Only subnet generation reads the engine limits
    match cli.command {
        Commands::Calc(args) => handle_calc(args, cli.output)?,
        Commands::Subnet(args) => {
            let config = load_config(cli.max_subnets)?;
            handle_subnet(args, cli.output, &config)?
        }
        Commands::Addr(args) => handle_addr(args, cli.output)?,
        Commands::Batch(args) => handle_batch(args, cli.output)?,
        Commands::Serve => handle_serve(load_config(cli.max_subnets)?)?,
    }

    Ok(())
}

fn load_config(max_subnets: Option<u64>) -> Result<EngineConfig> {
    let config = EngineConfig::from_env()?;
    match max_subnets {
        Some(n) => Ok(config.with_max_subnets(n)?),
        None => Ok(config),
    }
}

fn handle_calc(args: CalcArgs, format: OutputFormat) -> Result<()> {
    let input = args.cidr.trim();
    let calc = calculate_cidr(input)?;
    output::print_calculation(input, &calc, format)
}

fn handle_subnet(args: SubnetArgs, format: OutputFormat, config: &EngineConfig) -> Result<()> {
    let base = args.base_cidr.trim();
    let subnets = generate_subnets_with_config(base, args.new_prefix.trim(), config)?;
    info!("Generated {} subnets of {}", subnets.len(), base);
    output::print_subnets(base, &subnets, format)
}

fn handle_addr(args: AddrArgs, format: OutputFormat) -> Result<()> {
    let report = address_report(args.value.trim())?;
    output::print_address(&report, format)
}

/// Integers convert to dotted quads; anything else must be a dotted quad.
fn address_report(input: &str) -> Result<AddressReport> {
    let value = if !input.is_empty() && input.bytes().all(|b| b.is_ascii_digit()) {
        match input.parse::<u32>() {
            Ok(value) => value,
            Err(_) => bail!("Value out of IPv4 range: {}", input),
        }
    } else {
        ip_to_long(input)?
    };

    Ok(AddressReport {
        input: input.to_string(),
        ip: long_to_ip(value),
        value,
        ip_type: classify(value),
        binary: to_binary(value),
    })
}

fn handle_batch(args: BatchArgs, format: OutputFormat) -> Result<()> {
    let inputs = batch::read_inputs(args.file.as_deref())?;
    let processor = BatchProcessor::new(args.threads)?;
    info!(
        "Batch processing {} entries with {} threads",
        inputs.len(),
        processor.thread_count()
    );

    let results = processor.process(inputs);
    output::print_batch(&results, format)?;
    batch_outcome(&results)
}

/// Fails when any entry failed, after the full report has been printed
fn batch_outcome(results: &[BatchResult]) -> Result<()> {
    let failed = results.iter().filter(|r| r.result.is_err()).count();
    if failed > 0 {
        warn!("{} of {} entries failed", failed, results.len());
        bail!("{} of {} entries failed", failed, results.len());
    }
    Ok(())
}

fn handle_serve(config: EngineConfig) -> Result<()> {
    info!("Starting JSON-RPC server on stdio");
    let transport = StdioTransport::new(Arc::new(McpServer::new(config)));
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(transport.run_async())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use netcalc_core::IpType;

    #[test]
    fn test_cli_parsing() {
        let cli = Cli::parse_from(["netcalc", "calc", "192.168.1.0/24"]);
        assert!(matches!(cli.command, Commands::Calc(_)));
        assert!(matches!(cli.output, OutputFormat::Human));
        assert_eq!(cli.verbose, 0);
    }

    #[test]
    fn test_output_format_json() {
        let cli = Cli::parse_from(["netcalc", "--output", "json", "calc", "10.0.0.0/8"]);
        assert!(matches!(cli.output, OutputFormat::Json));
    }

    #[test]
    fn test_subnet_command() {
        let cli = Cli::parse_from([
            "netcalc",
            "subnet",
            "192.168.1.0/24",
            "26",
            "--max-subnets",
            "8",
        ]);
        assert_eq!(cli.max_subnets, Some(8));
        if let Commands::Subnet(args) = cli.command {
            assert_eq!(args.base_cidr, "192.168.1.0/24");
            assert_eq!(args.new_prefix, "26");
        } else {
            panic!("Expected Subnet command");
        }
    }

    #[test]
    fn test_batch_command() {
        let cli = Cli::parse_from(["netcalc", "batch", "--file", "nets.txt", "--threads", "5"]);
        if let Commands::Batch(args) = cli.command {
            assert_eq!(args.file, Some("nets.txt".to_string()));
            assert_eq!(args.threads, Some(5));
        } else {
            panic!("Expected Batch command");
        }
    }

    #[test]
    fn test_serve_command() {
        let cli = Cli::parse_from(["netcalc", "serve"]);
        assert!(matches!(cli.command, Commands::Serve));
    }

    #[test]
    fn test_verbose_flag() {
        let cli = Cli::parse_from(["netcalc", "-vv", "addr", "1.1.1.1"]);
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn test_address_report_from_dotted_quad() {
        let report = address_report("172.20.5.1").unwrap();
        assert_eq!(report.value, 0xAC140501);
        assert_eq!(report.ip_type, IpType::Private);
    }

    #[test]
    fn test_address_report_from_integer() {
        let report = address_report("134744072").unwrap();
        assert_eq!(report.ip, "8.8.8.8");
        assert_eq!(report.ip_type, IpType::Public);
    }

    #[test]
    fn test_address_report_rejects_bad_input() {
        assert!(address_report("4294967296").is_err());
        assert!(address_report("1.2.3").is_err());
        assert!(address_report("").is_err());
    }

    #[test]
    fn test_load_config_flag_override() {
        assert_eq!(load_config(Some(32)).unwrap().max_subnets, 32);
        assert!(load_config(Some(0)).is_err());
        assert!(load_config(Some(1 << 32)).is_err());
    }

    #[test]
    fn test_bad_cap_only_affects_subnet_commands() {
        let calc = Cli::parse_from(["netcalc", "--max-subnets", "0", "calc", "10.0.0.0/8"]);
        assert!(run(calc).is_ok());

        let addr = Cli::parse_from(["netcalc", "--max-subnets", "0", "addr", "8.8.8.8"]);
        assert!(run(addr).is_ok());

        let subnet = Cli::parse_from([
            "netcalc",
            "--max-subnets",
            "0",
            "subnet",
            "10.0.0.0/24",
            "25",
        ]);
        assert!(run(subnet).is_err());
    }

    #[test]
    fn test_batch_outcome() {
        let processor = BatchProcessor::new(Some(1)).unwrap();
        let good = processor.process(vec!["10.0.0.0/8".to_string()]);
        assert!(batch_outcome(&good).is_ok());
        assert!(batch_outcome(&[]).is_ok());

        let mixed = processor.process(vec![
            "10.0.0.0/8".to_string(),
            "bogus".to_string(),
            "1.2.3.4/33".to_string(),
        ]);
        let err = batch_outcome(&mixed).unwrap_err();
        assert_eq!(err.to_string(), "2 of 3 entries failed");
    }
}
