use std::sync::OnceLock;

use mac_oui::Oui;
use pnet::util::MacAddr;

static OUI_DB: OnceLock<Oui> = OnceLock::new();

/// Retrieves or initializes the **Organizationally unique identifier** database.
///
/// Used for linking a vendor to a MAC address (LAN)
fn get_oui_db() -> &'static Oui {
    OUI_DB.get_or_init(|| Oui::default().expect("failed to load OUI database"))
}

/// Identify the vendor of a MAC address.
pub fn get_vendor(mac: MacAddr) -> Option<String> {
    let db = get_oui_db();
    let mac_str = mac.to_string();
    match db.lookup_by_mac(&mac_str) {
        Ok(Some(entry)) => Some(entry.company_name.clone()),
        _ => None,
    }
}

/// Canonical form used for comparing MAC addresses: every non-hex
/// character stripped, remaining digits lower-cased.
///
/// `AA:BB:CC:DD:EE:FF`, `aa-bb-cc-dd-ee-ff` and `aabbccddeeff` all
/// normalize to the same string.
pub fn normalize(mac: &str) -> String {
    mac.chars()
        .filter(|c| c.is_ascii_hexdigit())
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// Parses a MAC address, tolerating the single-digit octets that
/// `arp` output produces on some platforms (e.g. `0:1f:2a:bb:cc:d`).
pub fn parse(mac: &str) -> Option<MacAddr> {
    let octets: Vec<&str> = mac.split([':', '-']).collect();
    if octets.len() != 6 {
        return None;
    }

    let mut bytes = [0u8; 6];
    for (i, octet) in octets.iter().enumerate() {
        if octet.is_empty() || octet.len() > 2 {
            return None;
        }
        bytes[i] = u8::from_str_radix(octet, 16).ok()?;
    }

    Some(MacAddr::new(
        bytes[0], bytes[1], bytes[2], bytes[3], bytes[4], bytes[5],
    ))
}

/// An all-zero MAC marks an unresolved neighbor entry, not a device.
pub fn is_unresolved(mac: MacAddr) -> bool {
    mac == MacAddr::zero()
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_is_case_and_separator_insensitive() {
        assert_eq!(normalize("AA:BB:CC:DD:EE:FF"), "aabbccddeeff");
        assert_eq!(normalize("aa-bb-cc-dd-ee-ff"), "aabbccddeeff");
        assert_eq!(normalize("aabbccddeeff"), "aabbccddeeff");
        assert_eq!(normalize("AA:BB:CC:DD:EE:FF"), normalize("aabbccddeeff"));
    }

    #[test]
    fn parse_accepts_padded_and_unpadded_octets() {
        let expected = MacAddr::new(0x00, 0x1f, 0x2a, 0xbb, 0xcc, 0x0d);
        assert_eq!(parse("00:1f:2a:bb:cc:0d"), Some(expected));
        assert_eq!(parse("0:1f:2a:bb:cc:d"), Some(expected));
        assert_eq!(parse("00-1f-2a-bb-cc-0d"), Some(expected));
    }

    #[test]
    fn parse_rejects_malformed_input() {
        assert_eq!(parse("00:1f:2a:bb:cc"), None);
        assert_eq!(parse("00:1f:2a:bb:cc:dd:ee"), None);
        assert_eq!(parse("gg:1f:2a:bb:cc:dd"), None);
        assert_eq!(parse("001:f2:ab:bc:cd:de"), None);
        assert_eq!(parse("(incomplete)"), None);
    }

    #[test]
    fn zeroed_mac_is_unresolved() {
        assert!(is_unresolved(MacAddr::zero()));
        assert!(!is_unresolved(MacAddr::new(0xaa, 0, 0, 0, 0, 1)));
    }
}
