//! MAC address validation and normalization.
//!
//! Network snapshots and employee records meet on the MAC address, so both
//! sides must agree on one canonical form: lowercase hex octets joined by
//! `-` (e.g. `f8-98-b9-7f-fe-0d`).

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The input could not be parsed as a MAC address.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("invalid MAC address: {0:?}")]
pub struct InvalidMac(pub String);

/// A normalized MAC address.
///
/// Accepts `:`/`-`/`.`-separated or bare 12-hex-digit input and stores the
/// canonical dashed lowercase form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct MacAddr(String);

impl MacAddr {
    pub fn parse(raw: &str) -> Result<Self, InvalidMac> {
        let cleaned: String = raw
            .chars()
            .filter(|c| !matches!(c, ':' | '-' | '.'))
            .collect();
        if cleaned.len() != 12 || !cleaned.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(InvalidMac(raw.to_string()));
        }
        let lower = cleaned.to_ascii_lowercase();
        let octets: Vec<&str> = (0..12).step_by(2).map(|i| &lower[i..i + 2]).collect();
        Ok(Self(octets.join("-")))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MacAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for MacAddr {
    type Err = InvalidMac;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for MacAddr {
    type Error = InvalidMac;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<MacAddr> for String {
    fn from(mac: MacAddr) -> Self {
        mac.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_accepts_common_separators() {
        for raw in [
            "F8:98:B9:7F:FE:0D",
            "f8-98-b9-7f-fe-0d",
            "f898.b97f.fe0d",
            "F898B97FFE0D",
        ] {
            let mac = MacAddr::parse(raw).unwrap();
            assert_eq!(mac.as_str(), "f8-98-b9-7f-fe-0d");
        }
    }

    #[test]
    fn parse_rejects_bad_input() {
        for raw in [
            "",
            "f8-98-b9",
            "f8-98-b9-7f-fe-0d-aa",
            "zz-98-b9-7f-fe-0d",
            "192.168.0.1",
        ] {
            assert!(MacAddr::parse(raw).is_err(), "should reject {raw:?}");
        }
    }

    #[test]
    fn serde_roundtrip_uses_canonical_form() {
        let mac: MacAddr = serde_json::from_str(r#""F8:98:B9:7F:FE:0D""#).unwrap();
        assert_eq!(serde_json::to_string(&mac).unwrap(), r#""f8-98-b9-7f-fe-0d""#);
    }

    #[test]
    fn serde_rejects_invalid() {
        let result: Result<MacAddr, _> = serde_json::from_str(r#""not-a-mac""#);
        assert!(result.is_err());
    }
}
