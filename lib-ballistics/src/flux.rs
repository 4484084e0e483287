//! AUSM-type flux splitting across a moving face.
//!
//! Mach numbers are taken relative to the face velocity, so a face that moves
//! with the gas carries no mass. The split polynomials blend smoothly into pure
//! upwinding at `|M| = 1`.

use crate::state::{Conserved, Primitive};




// ============================================================================
/// Right-running part of the Mach number of the cell left of a face.
pub fn mach_plus(m: f64) -> f64 {
    if m.abs() >= 1.0 {
        0.5 * (m + m.abs())
    } else {
        0.25 * (m + 1.0).powi(2) * (1.0 + 0.5 * (m - 1.0).powi(2))
    }
}

/// Left-running part of the Mach number of the cell right of a face.
pub fn mach_minus(m: f64) -> f64 {
    if m.abs() >= 1.0 {
        0.5 * (m - m.abs())
    } else {
        -0.25 * (m - 1.0).powi(2) * (1.0 + 0.5 * (m + 1.0).powi(2))
    }
}

/// Share of the left cell pressure that acts on the face.
pub fn pressure_plus(m: f64) -> f64 {
    if m.abs() >= 1.0 {
        (m + m.abs()) / (2.0 * m)
    } else {
        (m + 1.0).powi(2) * ((2.0 - m) / 4.0 + 3.0 / 16.0 * m * (m - 1.0).powi(2))
    }
}

/// Share of the right cell pressure that acts on the face.
pub fn pressure_minus(m: f64) -> f64 {
    if m.abs() >= 1.0 {
        (m - m.abs()) / (2.0 * m)
    } else {
        (m - 1.0).powi(2) * ((2.0 + m) / 4.0 - 3.0 / 16.0 * m * (m + 1.0).powi(2))
    }
}




// ============================================================================
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct InterfaceSplit {
    pub mach: f64,
    pub pressure: f64,
}

impl InterfaceSplit {
    pub fn new(mach_left: f64, mach_right: f64, pressure_left: f64, pressure_right: f64) -> Self {
        InterfaceSplit {
            mach: mach_plus(mach_left) + mach_minus(mach_right),
            pressure: pressure_plus(mach_left) * pressure_left + pressure_minus(mach_right) * pressure_right,
        }
    }
}




// ============================================================================
/// Numerical flux through a face moving at `face_velocity` between the cells
/// `pl` and `pr`.
pub fn interface_flux(pl: &Primitive, pr: &Primitive, face_velocity: f64) -> Conserved {
    let c = 0.5 * (pl.sound_speed + pr.sound_speed);
    let split = InterfaceSplit::new(
        (pl.velocity - face_velocity) / c,
        (pr.velocity - face_velocity) / c,
        pl.pressure,
        pr.pressure);

    let fl = pl.advected_vector();
    let fr = pr.advected_vector();
    let advective_term = 0.5 * c * (split.mach * (fr + fl) - split.mach.abs() * (fr - fl));
    let pressure_term = Conserved(0.0, split.pressure, split.pressure * face_velocity, 0.0);
    advective_term + pressure_term
}




// ============================================================================
#[cfg(test)]
mod tests {
    use super::*;

    fn gas(density: f64, velocity: f64, pressure: f64) -> Primitive {
        let gamma: f64 = 1.4;
        Primitive {
            density,
            velocity,
            energy: pressure / (gamma - 1.0) / density,
            pressure,
            sound_speed: (gamma * pressure / density).sqrt(),
            burnt_depth: 0.0,
            psi: 0.0,
        }
    }

    #[test]
    fn split_mach_numbers_add_up() {
        for &m in &[-3.0, -1.0, -0.7, -0.1, 0.0, 0.4, 0.99, 1.0, 2.5] {
            assert!((mach_plus(m) + mach_minus(m) - m).abs() < 1e-12, "m={}", m);
            assert!((pressure_plus(m) + pressure_minus(m) - 1.0).abs() < 1e-12, "m={}", m);
        }
    }

    #[test]
    fn splitting_is_continuous_at_the_sonic_point() {
        let eps = 1e-9;
        for &m in &[-1.0, 1.0] {
            assert!((mach_plus(m - eps) - mach_plus(m + eps)).abs() < 1e-6);
            assert!((mach_minus(m - eps) - mach_minus(m + eps)).abs() < 1e-6);
            assert!((pressure_plus(m - eps) - pressure_plus(m + eps)).abs() < 1e-6);
            assert!((pressure_minus(m - eps) - pressure_minus(m + eps)).abs() < 1e-6);
        }
    }

    #[test]
    fn supersonic_flow_is_fully_upwinded() {
        assert_eq!(mach_plus(2.0), 2.0);
        assert_eq!(mach_minus(2.0), 0.0);
        assert_eq!(pressure_plus(-2.0), 0.0);
        assert_eq!(pressure_minus(-2.0), 1.0);
    }

    #[test]
    fn uniform_gas_at_rest_carries_only_pressure() {
        let p = gas(141.47, 0.0, 5e6);
        let f = interface_flux(&p, &p, 0.0);
        assert!(f.0.abs() < 1e-9);
        assert!((f.1 - 5e6).abs() < 1e-6);
        assert!(f.2.abs() < 1e-6);
    }

    #[test]
    fn face_moving_with_the_gas_carries_no_mass() {
        let p = gas(10.0, 120.0, 2e5);
        let f = interface_flux(&p, &p, 120.0);
        assert!(f.0.abs() < 1e-9);
        assert!((f.1 - 2e5).abs() < 1e-6);
        assert!((f.2 - 2e5 * 120.0).abs() < 1e-3);
    }

    #[test]
    fn uniform_flow_reproduces_the_euler_flux() {
        let p = gas(1.2, 50.0, 1e5);
        let f = interface_flux(&p, &p, 0.0);
        assert!((f.0 - p.momentum()).abs() < 1e-9);
        assert!((f.1 - (p.momentum() * p.velocity + p.pressure)).abs() < 1e-6);
        assert!((f.2 - (p.total_energy() + p.pressure) * p.velocity).abs() < 1e-3);
    }
}
