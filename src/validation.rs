//! Input validation for configured interface records.
//!
//! Interface names are passed straight to `ifconfig` as an argument, so they
//! MUST be validated here before any probe runs.

use anyhow::{Result, bail};

use crate::interface::CriticalInterface;

/// FreeBSD's IFNAMSIZ minus the trailing NUL
const MAX_INTERFACE_NAME_LEN: usize = 15;

/// CARP VHIDs are a single byte and 0 is reserved
const VHID_RANGE: std::ops::RangeInclusive<u32> = 1..=255;

/// Validate an interface name.
///
/// Valid interface names:
/// - Start with a letter
/// - Contain only alphanumeric characters, `.`, `_` and `-`
/// - Are between 1 and 15 characters long
///
/// # Security
/// A name starting with `-` would be parsed by `ifconfig` as an option.
pub fn validate_interface_name(name: &str) -> Result<()> {
    if name.is_empty() {
        bail!("Interface name cannot be empty");
    }

    if name.len() > MAX_INTERFACE_NAME_LEN {
        bail!(
            "Interface name '{}' too long (max {} characters)",
            name,
            MAX_INTERFACE_NAME_LEN
        );
    }

    if !name.starts_with(|c: char| c.is_ascii_alphabetic()) {
        bail!("Interface name '{}' must start with a letter", name);
    }

    for ch in name.chars() {
        if !ch.is_ascii_alphanumeric() && ch != '.' && ch != '_' && ch != '-' {
            bail!(
                "Interface name '{}' contains invalid character '{}'",
                name,
                ch
            );
        }
    }

    Ok(())
}

/// Validate a CARP VHID.
pub fn validate_vhid(vhid: u32) -> Result<()> {
    if !VHID_RANGE.contains(&vhid) {
        bail!(
            "VHID {} out of range ({}-{})",
            vhid,
            VHID_RANGE.start(),
            VHID_RANGE.end()
        );
    }
    Ok(())
}

/// Validate a whole interface record.
pub fn validate_interface(iface: &CriticalInterface) -> Result<()> {
    validate_interface_name(&iface.name)?;
    validate_vhid(iface.vhid)?;
    Ok(())
}
