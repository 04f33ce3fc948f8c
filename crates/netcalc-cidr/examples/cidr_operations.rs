//! CIDR operations example
//!
//! Run with: cargo run -p netcalc-cidr --example cidr_operations

use netcalc_cidr::{calculate_cidr, generate_subnets, CidrSpec};
use netcalc_core::ip_to_long;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("netcalc - CIDR Operations Example\n");

    let calc = calculate_cidr("192.168.1.77/24")?;

    println!("CIDR: {}", calc.cidr_notation);
    println!("─────────────────────────────");
    println!("Network:       {}", calc.network_address);
    println!("Broadcast:     {}", calc.broadcast_address);
    println!("First usable:  {}", calc.first_usable_host);
    println!("Last usable:   {}", calc.last_usable_host);
    println!("Usable hosts:  {}", calc.num_usable_hosts);
    println!("Subnet mask:   {}", calc.subnet_mask);
    println!("Wildcard mask: {}", calc.wildcard_mask);
    println!("Type:          {}", calc.ip_type);
    println!("Mask bits:     {}", calc.binary_mask);

    let spec = CidrSpec::parse("192.168.1.0/24")?;
    println!("\nChecking IP containment:");
    println!("192.168.1.100 in range? {}", spec.contains(ip_to_long("192.168.1.100")?));
    println!("192.168.2.1 in range?   {}", spec.contains(ip_to_long("192.168.2.1")?));

    println!("\nSplitting into /26:");
    for subnet in generate_subnets("192.168.1.0/24", "26")? {
        println!(
            "  {:<18} {} - {} ({} hosts)",
            subnet.cidr_notation,
            subnet.usable_host_range.first,
            subnet.usable_host_range.last,
            subnet.num_usable_hosts
        );
    }

    Ok(())
}
