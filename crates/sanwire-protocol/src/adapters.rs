//! Views over raw union fields.
//!
//! Some sync fields pack two values into one integer. Packets store the
//! raw integer so the codec stays a straight field copy; these wrappers
//! split and join the halves for callers that care.

use serde::{Deserialize, Serialize};

const LOW_SIX: u8 = 0b0011_1111;

/// Weapon id (low 6 bits) and two extra key bits (high 2 bits).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WeaponKeys(pub u8);

impl WeaponKeys {
    /// Out-of-range parts are masked.
    pub fn new(weapon: u8, additional_key: u8) -> Self {
        Self((weapon & LOW_SIX) | (additional_key << 6))
    }

    pub fn weapon(self) -> u8 {
        self.0 & LOW_SIX
    }

    pub fn additional_key(self) -> u8 {
        self.0 >> 6
    }
}

/// Camera zoom (low 6 bits) and weapon state (high 2 bits).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ZoomWeaponState(pub u8);

impl ZoomWeaponState {
    pub fn new(zoom: u8, weapon_state: u8) -> Self {
        Self((zoom & LOW_SIX) | (weapon_state << 6))
    }

    pub fn zoom(self) -> u8 {
        self.0 & LOW_SIX
    }

    pub fn weapon_state(self) -> u8 {
        self.0 >> 6
    }
}

/// The vehicle auxiliary word.
///
/// Hydras put their thrust angle here; trains put their speed as raw
/// float bits. Which one applies depends on the vehicle model, which the
/// codec does not know.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VehicleAux(pub u32);

impl VehicleAux {
    pub fn from_hydra_thrust_angle(angle: u32) -> Self {
        Self(angle)
    }

    pub fn from_train_speed(speed: f32) -> Self {
        Self(speed.to_bits())
    }

    pub fn hydra_thrust_angle(self) -> u32 {
        self.0
    }

    pub fn train_speed(self) -> f32 {
        f32::from_bits(self.0)
    }

    pub fn is_zero(self) -> bool {
        self.0 == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weapon_keys_split() {
        let wk = WeaponKeys::new(31, 2);
        assert_eq!(wk.0, 0b1001_1111);
        assert_eq!(wk.weapon(), 31);
        assert_eq!(wk.additional_key(), 2);
    }

    #[test]
    fn test_weapon_keys_masks_overflow() {
        let wk = WeaponKeys::new(0xFF, 0);
        assert_eq!(wk.weapon(), 63);
        assert_eq!(wk.additional_key(), 0);
    }

    #[test]
    fn test_zoom_weapon_state_split() {
        let z = ZoomWeaponState(0xC5);
        assert_eq!(z.zoom(), 5);
        assert_eq!(z.weapon_state(), 3);
        assert_eq!(ZoomWeaponState::new(5, 3), z);
    }

    #[test]
    fn test_vehicle_aux_train_speed_bits() {
        let aux = VehicleAux::from_train_speed(0.75);
        assert_eq!(aux.0, 0.75f32.to_bits());
        assert_eq!(aux.train_speed(), 0.75);
        assert!(!aux.is_zero());
        assert!(VehicleAux::from_hydra_thrust_angle(0).is_zero());
    }
}
