//! Static manufacturer → companion app table.
//!
//! Every entry is an integration whose automations, schedules and scenes live
//! in the manufacturer's own cloud and are not exposed through the platform
//! API. A match is therefore evidence that platform automation lookups
//! cannot see what controls the device.

/// A manufacturer whose companion app owns its automations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ManufacturerApp {
    /// Lowercase prefixes matched against the reported manufacturer name.
    pub aliases: &'static [&'static str],
    /// Companion app name as users see it.
    pub app_name: &'static str,
}

pub static MANUFACTURER_APPS: &[ManufacturerApp] = &[
    ManufacturerApp {
        aliases: &["sengled"],
        app_name: "Sengled Home",
    },
    ManufacturerApp {
        aliases: &["philips", "signify"],
        app_name: "Philips Hue",
    },
    ManufacturerApp {
        aliases: &["lifx"],
        app_name: "LIFX",
    },
    ManufacturerApp {
        aliases: &["wyze"],
        app_name: "Wyze",
    },
    ManufacturerApp {
        aliases: &["tp-link", "tplink", "kasa"],
        app_name: "Kasa Smart",
    },
];

/// Companion app for a manufacturer name, if it is in the table.
///
/// Case-insensitive prefix match on the trimmed name, so "Signify
/// Netherlands B.V." and "TP-LINK" both resolve.
pub fn proprietary_app(manufacturer: &str) -> Option<&'static str> {
    let normalized = manufacturer.trim().to_lowercase();
    if normalized.is_empty() {
        return None;
    }
    MANUFACTURER_APPS
        .iter()
        .find(|entry| entry.aliases.iter().any(|alias| normalized.starts_with(alias)))
        .map(|entry| entry.app_name)
}
