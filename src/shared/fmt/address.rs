//! Address display helpers.

/// Shorten an address to `0x1234...abcd`. Strings too short to shorten are
/// returned unchanged; an empty counterparty renders as `Unknown`.
pub fn shorten(address: &str) -> String {
    if address.is_empty() {
        return "Unknown".to_string();
    }
    if !address.is_ascii() || address.len() <= 10 {
        return address.to_string();
    }
    format!("{}...{}", &address[..6], &address[address.len() - 4..])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shorten_full_address() {
        assert_eq!(
            shorten("0x71c7656ec7ab88b098defb751b7401b5f6d8976f"),
            "0x71c7...976f"
        );
    }

    #[test]
    fn test_shorten_edge_cases() {
        assert_eq!(shorten(""), "Unknown");
        assert_eq!(shorten("0x1234"), "0x1234");
        assert_eq!(shorten("0xRecipientAddressExample"), "0xReci...mple");
    }
}
