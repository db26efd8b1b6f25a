//! Network snapshots from the system ARP table.
//!
//! Shells out to `arp -a`, which works unprivileged on Linux, macOS, and
//! Windows, and extracts every token that normalizes as a MAC address. A
//! failed or timed-out scan degrades to an empty snapshot so the tick loop
//! keeps running; the affected tick then sees every device as absent.

use std::collections::HashSet;
use std::time::Duration;

use anyhow::{Context, Result};
use tokio::process::Command;

use at_core::MacAddr;

const SCAN_TIMEOUT: Duration = Duration::from_secs(30);

/// Runs one ARP scan and returns the set of visible MAC addresses.
///
/// Fail-soft: scan errors are logged and yield an empty set.
pub async fn scan() -> HashSet<MacAddr> {
    match run_arp().await {
        Ok(output) => {
            let visible = parse_visible(&output);
            tracing::debug!(devices = visible.len(), "arp scan complete");
            visible
        }
        Err(err) => {
            tracing::warn!(error = %err, "arp scan failed, treating all devices as absent");
            HashSet::new()
        }
    }
}

async fn run_arp() -> Result<String> {
    let output = tokio::time::timeout(SCAN_TIMEOUT, Command::new("arp").arg("-a").output())
        .await
        .context("arp scan timed out")?
        .context("failed to run arp")?;
    if !output.status.success() {
        anyhow::bail!("arp exited with status {}", output.status);
    }
    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

/// Extracts normalized MAC addresses from `arp -a` output.
///
/// Token-based so both the Unix format (`? (192.168.1.7) at f8:98:b9:7f:fe:0d
/// [ether] on wlan0`) and the Windows format (`192.168.1.7    f8-98-b9-7f-fe-0d
/// dynamic`) parse without per-platform branches. Tokens that are not MAC
/// addresses (IPs, interface names, flags) fail normalization and are skipped.
#[must_use]
pub fn parse_visible(output: &str) -> HashSet<MacAddr> {
    output
        .split_whitespace()
        .filter_map(|token| MacAddr::parse(token).ok())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mac(s: &str) -> MacAddr {
        MacAddr::parse(s).unwrap()
    }

    #[test]
    fn parses_unix_arp_output() {
        let output = "\
? (192.168.1.1) at 04:d9:f5:11:22:33 [ether] on wlan0
? (192.168.1.7) at f8:98:b9:7f:fe:0d [ether] on wlan0
? (192.168.1.9) at <incomplete> on wlan0
";
        let visible = parse_visible(output);
        assert_eq!(
            visible,
            HashSet::from([mac("04-d9-f5-11-22-33"), mac("f8-98-b9-7f-fe-0d")])
        );
    }

    #[test]
    fn parses_windows_arp_output() {
        let output = "\
Interface: 192.168.1.5 --- 0xb
  Internet Address      Physical Address      Type
  192.168.1.1           04-d9-f5-11-22-33     dynamic
  192.168.1.255         ff-ff-ff-ff-ff-ff     static
";
        let visible = parse_visible(output);
        assert!(visible.contains(&mac("04-d9-f5-11-22-33")));
        assert!(visible.contains(&mac("ff-ff-ff-ff-ff-ff")));
    }

    #[test]
    fn ignores_addresses_and_flags() {
        let visible = parse_visible("? (10.0.0.1) at <incomplete> on eth0");
        assert!(visible.is_empty());
        assert!(parse_visible("").is_empty());
    }
}
