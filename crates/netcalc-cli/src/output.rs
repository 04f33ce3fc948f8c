//! Result rendering for every output format

use anyhow::Result;
use clap::ValueEnum;
use colored::Colorize;
use netcalc_cidr::{CidrCalculation, SubnetInfo};
use netcalc_core::IpType;
use serde::Serialize;
use std::io::{self, Write};

use crate::batch::BatchResult;

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table output
    Human,
    /// JSON output (pretty-printed)
    Json,
    /// JSON output (compact)
    JsonCompact,
    /// CSV output
    Csv,
}

/// Result of the `addr` command
#[derive(Debug, Clone, Serialize)]
pub struct AddressReport {
    pub input: String,
    pub ip: String,
    pub value: u32,
    pub ip_type: IpType,
    pub binary: String,
}

#[derive(Serialize)]
struct SubnetReport<'a> {
    base_cidr: &'a str,
    count: usize,
    subnets: &'a [SubnetInfo],
}

#[derive(Serialize)]
struct BatchEntry<'a> {
    input: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    result: Option<&'a CidrCalculation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<&'a str>,
}

impl<'a> From<&'a BatchResult> for BatchEntry<'a> {
    fn from(entry: &'a BatchResult) -> Self {
        match &entry.result {
            Ok(calc) => Self {
                input: &entry.input,
                result: Some(calc),
                error: None,
            },
            Err(msg) => Self {
                input: &entry.input,
                result: None,
                error: Some(msg),
            },
        }
    }
}

const CALCULATION_HEADER: [&str; 12] = [
    "input",
    "cidr_notation",
    "network_address",
    "broadcast_address",
    "first_usable_host",
    "last_usable_host",
    "num_usable_hosts",
    "total_addresses",
    "subnet_mask",
    "wildcard_mask",
    "ip_type",
    "error",
];

fn calculation_record(input: &str, calc: &CidrCalculation) -> Vec<String> {
    vec![
        input.to_string(),
        calc.cidr_notation.clone(),
        calc.network_address.clone(),
        calc.broadcast_address.clone(),
        calc.first_usable_host.clone(),
        calc.last_usable_host.clone(),
        calc.num_usable_hosts.to_string(),
        calc.total_addresses.to_string(),
        calc.subnet_mask.clone(),
        calc.wildcard_mask.clone(),
        calc.ip_type.to_string(),
        String::new(),
    ]
}

fn error_record(input: &str, error: &str) -> Vec<String> {
    let mut record = vec![String::new(); CALCULATION_HEADER.len()];
    record[0] = input.to_string();
    record[CALCULATION_HEADER.len() - 1] = error.to_string();
    record
}

fn write_json<W: Write, T: Serialize + ?Sized>(out: &mut W, value: &T, pretty: bool) -> Result<()> {
    if pretty {
        writeln!(out, "{}", serde_json::to_string_pretty(value)?)?;
    } else {
        writeln!(out, "{}", serde_json::to_string(value)?)?;
    }
    Ok(())
}

fn colored_type(ip_type: IpType) -> colored::ColoredString {
    let label = ip_type.as_str();
    match ip_type {
        IpType::Public => label.green(),
        IpType::Private => label.cyan(),
        IpType::Loopback | IpType::LinkLocal => label.yellow(),
        IpType::Multicast => label.magenta(),
        IpType::Reserved => label.red(),
    }
}

/// Print a single CIDR calculation to stdout
pub fn print_calculation(input: &str, calc: &CidrCalculation, format: OutputFormat) -> Result<()> {
    write_calculation(&mut io::stdout().lock(), input, calc, format)
}

pub fn write_calculation<W: Write>(
    out: &mut W,
    input: &str,
    calc: &CidrCalculation,
    format: OutputFormat,
) -> Result<()> {
    match format {
        OutputFormat::Human => {
            writeln!(out)?;
            writeln!(out, "{}", "CIDR Analysis".bold().cyan())?;
            writeln!(out, "{}", "─".repeat(50).dimmed())?;
            writeln!(out, "{:>18}: {}", "Input", input)?;
            writeln!(out, "{:>18}: {}", "CIDR", calc.cidr_notation.green())?;
            writeln!(out, "{:>18}: {}", "Network", calc.network_address)?;
            writeln!(out, "{:>18}: {}", "Broadcast", calc.broadcast_address)?;
            writeln!(out, "{:>18}: {}", "First usable", calc.first_usable_host)?;
            writeln!(out, "{:>18}: {}", "Last usable", calc.last_usable_host)?;
            writeln!(out, "{:>18}: {}", "Usable hosts", calc.num_usable_hosts)?;
            writeln!(out, "{:>18}: {}", "Total addresses", calc.total_addresses)?;
            writeln!(out, "{:>18}: {}", "Subnet mask", calc.subnet_mask)?;
            writeln!(out, "{:>18}: {}", "Wildcard mask", calc.wildcard_mask)?;
            writeln!(out, "{:>18}: {}", "Type", colored_type(calc.ip_type))?;
            writeln!(out, "{:>18}: {}", "Address bits", calc.binary_address.dimmed())?;
            writeln!(out, "{:>18}: {}", "Mask bits", calc.binary_mask.dimmed())?;
            writeln!(out)?;
        }
        OutputFormat::Json => write_json(out, calc, true)?,
        OutputFormat::JsonCompact => write_json(out, calc, false)?,
        OutputFormat::Csv => {
            let mut wtr = csv::Writer::from_writer(out);
            wtr.write_record(CALCULATION_HEADER)?;
            wtr.write_record(calculation_record(input, calc))?;
            wtr.flush()?;
        }
    }
    Ok(())
}

/// Print a subnet table to stdout
pub fn print_subnets(base_cidr: &str, subnets: &[SubnetInfo], format: OutputFormat) -> Result<()> {
    write_subnets(&mut io::stdout().lock(), base_cidr, subnets, format)
}

pub fn write_subnets<W: Write>(
    out: &mut W,
    base_cidr: &str,
    subnets: &[SubnetInfo],
    format: OutputFormat,
) -> Result<()> {
    let report = SubnetReport {
        base_cidr,
        count: subnets.len(),
        subnets,
    };

    match format {
        OutputFormat::Human => {
            writeln!(out)?;
            writeln!(
                out,
                "{} {} ({} subnets)",
                "Subnets of".bold().cyan(),
                base_cidr.bold(),
                subnets.len()
            )?;
            writeln!(out, "{}", "─".repeat(90).dimmed())?;
            writeln!(
                out,
                "{:<20} {:<33} {:<17} {:>10}",
                "CIDR", "Usable range", "Broadcast", "Hosts"
            )?;
            for subnet in subnets {
                let range = format!(
                    "{} - {}",
                    subnet.usable_host_range.first, subnet.usable_host_range.last
                );
                writeln!(
                    out,
                    "{:<20} {:<33} {:<17} {:>10}",
                    subnet.cidr_notation, range, subnet.broadcast_address, subnet.num_usable_hosts
                )?;
            }
            writeln!(out)?;
        }
        OutputFormat::Json => write_json(out, &report, true)?,
        OutputFormat::JsonCompact => write_json(out, &report, false)?,
        OutputFormat::Csv => {
            let mut wtr = csv::Writer::from_writer(out);
            wtr.write_record([
                "cidr_notation",
                "network_address",
                "first_usable_host",
                "last_usable_host",
                "broadcast_address",
                "num_usable_hosts",
            ])?;
            for subnet in subnets {
                wtr.write_record([
                    subnet.cidr_notation.as_str(),
                    subnet.network_address.as_str(),
                    subnet.usable_host_range.first.as_str(),
                    subnet.usable_host_range.last.as_str(),
                    subnet.broadcast_address.as_str(),
                    &subnet.num_usable_hosts.to_string(),
                ])?;
            }
            wtr.flush()?;
        }
    }
    Ok(())
}

/// Print an address conversion to stdout
pub fn print_address(report: &AddressReport, format: OutputFormat) -> Result<()> {
    write_address(&mut io::stdout().lock(), report, format)
}

pub fn write_address<W: Write>(
    out: &mut W,
    report: &AddressReport,
    format: OutputFormat,
) -> Result<()> {
    match format {
        OutputFormat::Human => {
            writeln!(out)?;
            writeln!(out, "{:>10}: {}", "Address", report.ip.green())?;
            writeln!(out, "{:>10}: {}", "Integer", report.value)?;
            writeln!(out, "{:>10}: {}", "Hex", format!("0x{:08X}", report.value))?;
            writeln!(out, "{:>10}: {}", "Binary", report.binary.dimmed())?;
            writeln!(out, "{:>10}: {}", "Type", colored_type(report.ip_type))?;
            writeln!(out)?;
        }
        OutputFormat::Json => write_json(out, report, true)?,
        OutputFormat::JsonCompact => write_json(out, report, false)?,
        OutputFormat::Csv => {
            let mut wtr = csv::Writer::from_writer(out);
            wtr.write_record(["input", "ip", "value", "ip_type", "binary"])?;
            wtr.write_record([
                report.input.as_str(),
                report.ip.as_str(),
                &report.value.to_string(),
                report.ip_type.as_str(),
                report.binary.as_str(),
            ])?;
            wtr.flush()?;
        }
    }
    Ok(())
}

/// Print batch results to stdout
pub fn print_batch(results: &[BatchResult], format: OutputFormat) -> Result<()> {
    write_batch(&mut io::stdout().lock(), results, format)
}

pub fn write_batch<W: Write>(out: &mut W, results: &[BatchResult], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Human => {
            for entry in results {
                match &entry.result {
                    Ok(calc) => writeln!(
                        out,
                        "{} {:<20} {:<18} {:<16} {:>10} {}",
                        "✓".green(),
                        entry.input,
                        calc.cidr_notation,
                        calc.broadcast_address,
                        calc.num_usable_hosts,
                        colored_type(calc.ip_type)
                    )?,
                    Err(msg) => writeln!(out, "{} {:<20} {}", "✗".red(), entry.input, msg.red())?,
                }
            }
        }
        OutputFormat::Json | OutputFormat::JsonCompact => {
            let entries: Vec<BatchEntry> = results.iter().map(BatchEntry::from).collect();
            write_json(out, &entries, matches!(format, OutputFormat::Json))?;
        }
        OutputFormat::Csv => {
            let mut wtr = csv::Writer::from_writer(out);
            wtr.write_record(CALCULATION_HEADER)?;
            for entry in results {
                match &entry.result {
                    Ok(calc) => wtr.write_record(calculation_record(&entry.input, calc))?,
                    Err(msg) => wtr.write_record(error_record(&entry.input, msg))?,
                }
            }
            wtr.flush()?;
        }
    }
    Ok(())
}
