use std::time::Duration;

use colored::*;
use lanfind_common::network::device::Device;

pub const TOTAL_WIDTH: usize = 64;

pub fn header(msg: &str) {
    let formatted: String = format!("⟦ {} ⟧", msg);
    let msg_len: usize = formatted.chars().count();

    let dash_count: usize = TOTAL_WIDTH.saturating_sub(msg_len);
    let left: usize = dash_count / 2;
    let right: usize = dash_count - left;

    let line: ColoredString = format!(
        "{}{}{}",
        "─".repeat(left),
        formatted.to_uppercase().bright_green(),
        "─".repeat(right)
    )
    .bright_black();

    println!("{line}");
}

pub fn device_line(device: &Device) -> String {
    let ip: ColoredString = format!("{:<15}", device.ip).cyan().bold();
    let mac: ColoredString = device.mac.to_string().yellow();
    let vendor: ColoredString = device
        .vendor
        .as_deref()
        .unwrap_or("unknown vendor")
        .dimmed();

    let interface: String = device
        .interface
        .as_deref()
        .map(|name| format!(" on {name}"))
        .unwrap_or_default();

    format!("{ip} {mac}  {vendor}{interface}")
}

pub fn summary(count: usize, total_time: Duration) {
    let devices: ColoredString = format!(
        "{count} {}",
        if count == 1 { "device" } else { "devices" }
    )
    .bold()
    .green();
    let elapsed: ColoredString = format!("{:.2}s", total_time.as_secs_f64()).bold().yellow();

    println!("{}", "═".repeat(TOTAL_WIDTH).bright_black());
    println!("Discovery complete: {devices} identified in {elapsed}");
}

pub fn no_results() {
    println!("{} {}", "[-]".red().bold(), "no matching device found");
}
