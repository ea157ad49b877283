//! Cross-check observed CARP state against the configured interface.

use crate::alert::Anomaly;
use crate::carp::CarpRole;
use crate::interface::CriticalInterface;

/// Compare a parsed CARP role/VHID with what the interface should carry.
///
/// Role validity and VHID match are independent: both, either or neither
/// may be reported. Role anomalies come first.
pub fn detect(expected: &CriticalInterface, role: &CarpRole, vhid: u32) -> Vec<Anomaly> {
    let mut anomalies = Vec::new();

    if !role.is_valid() {
        anomalies.push(Anomaly::CarpInvalidState {
            interface: expected.name.clone(),
        });
    }

    if vhid != expected.vhid {
        anomalies.push(Anomaly::VhidMismatch {
            interface: expected.name.clone(),
            observed: vhid,
            expected: expected.vhid,
        });
    }

    anomalies
}

#[cfg(test)]
mod tests {
    use super::*;

    fn igb0() -> CriticalInterface {
        CriticalInterface::new("igb0", 5)
    }

    #[test]
    fn test_healthy() {
        assert!(detect(&igb0(), &CarpRole::Master, 5).is_empty());
        assert!(detect(&igb0(), &CarpRole::Backup, 5).is_empty());
    }

    #[test]
    fn test_vhid_mismatch_with_valid_role() {
        assert_eq!(
            detect(&igb0(), &CarpRole::Master, 7),
            vec![Anomaly::VhidMismatch {
                interface: "igb0".to_string(),
                observed: 7,
                expected: 5,
            }]
        );
    }

    #[test]
    fn test_invalid_role_only() {
        assert_eq!(
            detect(&igb0(), &CarpRole::Other("FOO".to_string()), 5),
            vec![Anomaly::CarpInvalidState {
                interface: "igb0".to_string()
            }]
        );
    }

    #[test]
    fn test_both_checks_fire() {
        let anomalies = detect(&igb0(), &CarpRole::Other("FOO".to_string()), 9);
        assert_eq!(anomalies.len(), 2);
        assert!(matches!(anomalies[0], Anomaly::CarpInvalidState { .. }));
        assert!(matches!(
            anomalies[1],
            Anomaly::VhidMismatch {
                observed: 9,
                expected: 5,
                ..
            }
        ));
    }
}
