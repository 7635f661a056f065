//! Address / transaction hash classification and block explorer links

use serde::{Deserialize, Serialize};

use crate::buffer::HEX_PREFIX;
use crate::config::ExplorerConfig;
use crate::error::ValidationError;

pub const ADDRESS_BYTES: usize = 20;
pub const TX_HASH_BYTES: usize = 32;

/// `0x` + 40 hex chars
pub const ADDRESS_LEN: usize = HEX_PREFIX.len() + ADDRESS_BYTES * 2;
/// `0x` + 64 hex chars
pub const TX_HASH_LEN: usize = HEX_PREFIX.len() + TX_HASH_BYTES * 2;

const ELLIPSIS: &str = "...";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HexKind {
    Address,
    Tx,
}

impl HexKind {
    /// Explorer path segment
    pub fn path(self) -> &'static str {
        match self {
            HexKind::Address => "address",
            HexKind::Tx => "tx",
        }
    }
}

/// Classify `value` by exact length, then charset
///
/// The length match runs first, so input of any other length is rejected
/// without looking at its characters.
pub fn classify(value: &str) -> Option<HexKind> {
    let kind = match value.len() {
        ADDRESS_LEN => HexKind::Address,
        TX_HASH_LEN => HexKind::Tx,
        _ => return None,
    };
    let body = value.strip_prefix(HEX_PREFIX)?;
    body.bytes().all(|b| b.is_ascii_hexdigit()).then_some(kind)
}

/// Block explorer URL builder
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Explorer {
    mainnet_url: String,
    testnet_url: String,
}

impl Default for Explorer {
    fn default() -> Self {
        Self::new(&ExplorerConfig::default())
    }
}

impl Explorer {
    pub fn new(config: &ExplorerConfig) -> Self {
        Self {
            mainnet_url: config.mainnet_url.trim_end_matches('/').to_string(),
            testnet_url: config.testnet_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self, testnet: bool) -> &str {
        if testnet {
            &self.testnet_url
        } else {
            &self.mainnet_url
        }
    }

    /// Link to an address or transaction page
    ///
    /// `explicit_kind` overrides the inferred kind for the URL path, but the
    /// value must still be a well-formed address or transaction hash.
    ///
    /// # Example
    /// ```
    /// use amount_sdk::Explorer;
    /// let explorer = Explorer::default();
    /// let address = "0x1234567890123456789012345678901234567890";
    /// assert_eq!(
    ///     explorer.build_link(address, None, true).unwrap(),
    ///     format!("https://sepolia.basescan.org/address/{address}")
    /// );
    /// assert!(explorer.build_link("Alice", None, true).is_err());
    /// ```
    pub fn build_link(
        &self,
        value: &str,
        explicit_kind: Option<HexKind>,
        testnet: bool,
    ) -> Result<String, ValidationError> {
        let inferred = classify(value).ok_or_else(|| {
            tracing::debug!(len = value.len(), "rejected explorer link input");
            ValidationError::InvalidAddressOrHash
        })?;
        let kind = explicit_kind.unwrap_or(inferred);
        Ok(format!("{}/{}/{}", self.base_url(testnet), kind.path(), value))
    }
}

/// How many characters to keep on each side of the ellipsis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TruncateOptions {
    pub start: usize,
    pub end: usize,
}

impl Default for TruncateOptions {
    fn default() -> Self {
        Self { start: 6, end: 4 }
    }
}

/// `0x1234...7890` for display; values that fit are returned unchanged
pub fn truncate(value: &str, options: TruncateOptions) -> String {
    let TruncateOptions { start, end } = options;
    // byte length bounds the char count from above
    if value.len() <= start.saturating_add(end) {
        return value.to_string();
    }

    let head_end = match value.char_indices().nth(start) {
        Some((index, _)) => index,
        None => return value.to_string(),
    };
    let tail_start = match end {
        0 => value.len(),
        _ => match value.char_indices().rev().nth(end - 1) {
            Some((index, _)) => index,
            None => return value.to_string(),
        },
    };
    if tail_start <= head_end {
        return value.to_string();
    }

    format!("{}{}{}", &value[..head_end], ELLIPSIS, &value[tail_start..])
}

/// Shorten a full address with the default 6...4 window; other values pass through
pub fn format_address(value: &str) -> String {
    match classify(value) {
        Some(HexKind::Address) => truncate(value, TruncateOptions::default()),
        _ => value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ADDRESS: &str = "0x1234567890123456789012345678901234567890";
    const TX_HASH: &str = "0x1234567890123456789012345678901234567890123456789012345678901234";

    #[test]
    fn test_classify() {
        assert_eq!(classify(ADDRESS), Some(HexKind::Address));
        assert_eq!(classify(TX_HASH), Some(HexKind::Tx));
        assert_eq!(classify("Alice"), None);
        assert_eq!(classify(&ADDRESS.replace('1', "g")), None);
        assert_eq!(classify(&format!("1x{}", &ADDRESS[2..])), None);
    }

    #[test]
    fn test_build_link_infers_kind() {
        let explorer = Explorer::default();
        assert_eq!(
            explorer.build_link(ADDRESS, None, true).unwrap(),
            format!("https://sepolia.basescan.org/address/{ADDRESS}")
        );
        assert_eq!(
            explorer.build_link(TX_HASH, None, true).unwrap(),
            format!("https://sepolia.basescan.org/tx/{TX_HASH}")
        );
    }

    #[test]
    fn test_build_link_explicit_kind_and_network() {
        let explorer = Explorer::default();
        assert_eq!(
            explorer.build_link(TX_HASH, Some(HexKind::Address), true).unwrap(),
            format!("https://sepolia.basescan.org/address/{TX_HASH}")
        );
        assert_eq!(
            explorer.build_link(ADDRESS, None, false).unwrap(),
            format!("https://basescan.org/address/{ADDRESS}")
        );
    }

    #[test]
    fn test_build_link_rejects_malformed() {
        let explorer = Explorer::default();
        let err = explorer.build_link("Alice", None, true).unwrap_err();
        assert_eq!(err.to_string(), "Invalid address or transaction hash.");
        // an explicit kind does not bypass validation
        let bad = format!("0x{}", "z".repeat(40));
        assert!(explorer.build_link(&bad, Some(HexKind::Address), true).is_err());
    }

    #[test]
    fn test_custom_explorer_urls() {
        let explorer = Explorer::new(&ExplorerConfig {
            mainnet_url: "https://explorer.example/".to_string(),
            testnet_url: "https://testnet.explorer.example".to_string(),
        });
        assert_eq!(
            explorer.build_link(TX_HASH, None, false).unwrap(),
            format!("https://explorer.example/tx/{TX_HASH}")
        );
    }

    #[test]
    fn test_format_address() {
        assert_eq!(format_address(ADDRESS), "0x1234...7890");
        assert_eq!(format_address("0x123"), "0x123");
        let long = format!("0x{}", "1".repeat(64));
        assert_eq!(format_address(&long), long);
    }

    #[test]
    fn test_truncate_windows() {
        let opts = |start, end| TruncateOptions { start, end };
        assert_eq!(truncate(ADDRESS, TruncateOptions::default()), "0x1234...7890");
        assert_eq!(truncate(ADDRESS, opts(8, 4)), "0x123456...7890");
        assert_eq!(truncate(ADDRESS, opts(6, 6)), "0x1234...567890");
        assert_eq!(truncate(ADDRESS, opts(4, 2)), "0x12...90");
        assert_eq!(truncate(ADDRESS, opts(6, 0)), "0x1234...");

        let long = format!("0x{}", "1".repeat(64));
        assert_eq!(truncate(&long, TruncateOptions::default()), "0x1111...1111");
    }

    #[test]
    fn test_truncate_short_values() {
        let opts = |start, end| TruncateOptions { start, end };
        assert_eq!(truncate("Alice", TruncateOptions::default()), "Alice");
        assert_eq!(truncate("Alice", opts(1, 1)), "A...e");
        assert_eq!(truncate("Alice", opts(2, 3)), "Alice");
    }

    #[test]
    fn test_truncate_multibyte() {
        // 8 chars, 16 bytes: fits in 4 + 4 chars
        assert_eq!(truncate("éééééééé", TruncateOptions { start: 4, end: 4 }), "éééééééé");
        assert_eq!(truncate("ééééééééé", TruncateOptions { start: 4, end: 4 }), "éééé...éééé");
    }
}
