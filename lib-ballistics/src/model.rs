use crate::burn::BurnLaw;
use crate::config::Gas;
use crate::eos::{IdealGasEos, PropellantEos};
use crate::propellant::Propellant;
use crate::state::{Conserved, Primitive};




// ============================================================================
/// The working fluid behind the projectile. The grid only talks to the fluid
/// through this trait; the flux splitting is the same for every model.
pub trait FlowModel {
    fn name(&self) -> &'static str;

    /// Cell state of a gas at rest with the given density and pressure.
    fn initial_primitive(&self, density: f64, pressure: f64) -> Primitive;

    fn to_primitive(&self, u: Conserved) -> Primitive;

    /// Rate of the burnt depth density produced in a cell. Models without a
    /// burning charge produce nothing.
    fn apply_source_term(&self, _p: &Primitive) -> f64 {
        0.0
    }
}




// ============================================================================
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct InertGas {
    pub eos: IdealGasEos,
}

impl InertGas {
    pub fn new(gas: &Gas) -> Self {
        InertGas { eos: IdealGasEos { gamma: gas.gamma } }
    }
}

impl FlowModel for InertGas {
    fn name(&self) -> &'static str {
        "pneumatic"
    }

    fn initial_primitive(&self, density: f64, pressure: f64) -> Primitive {
        Primitive {
            density,
            velocity: 0.0,
            energy: self.eos.internal_energy(density, pressure),
            pressure,
            sound_speed: self.eos.sound_speed(density, pressure),
            burnt_depth: 0.0,
            psi: 0.0,
        }
    }

    fn to_primitive(&self, u: Conserved) -> Primitive {
        let density = u.density();
        let energy = u.internal_energy();
        let pressure = self.eos.pressure(density, energy);
        Primitive {
            density,
            velocity: u.velocity(),
            energy,
            pressure,
            sound_speed: self.eos.sound_speed(density, pressure),
            burnt_depth: 0.0,
            psi: 0.0,
        }
    }
}




// ============================================================================
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Combustion {
    pub eos: PropellantEos,
    pub burn: BurnLaw,
}

impl Combustion {
    pub fn new(propellant: &Propellant) -> Self {
        Combustion { eos: propellant.eos(), burn: propellant.burn_law() }
    }
}

impl FlowModel for Combustion {
    fn name(&self) -> &'static str {
        "artillery"
    }

    fn initial_primitive(&self, density: f64, pressure: f64) -> Primitive {
        let psi = self.burn.psi(0.0);
        Primitive {
            density,
            velocity: 0.0,
            energy: self.eos.internal_energy(density, pressure, psi),
            pressure,
            sound_speed: self.eos.sound_speed(density, pressure, psi),
            burnt_depth: 0.0,
            psi,
        }
    }

    fn to_primitive(&self, u: Conserved) -> Primitive {
        let density = u.density();
        let energy = u.internal_energy();
        let burnt_depth = u.burnt_depth();
        let psi = self.burn.psi(burnt_depth);
        let pressure = self.eos.pressure(density, energy, psi);
        Primitive {
            density,
            velocity: u.velocity(),
            energy,
            pressure,
            sound_speed: self.eos.sound_speed(density, pressure, psi),
            burnt_depth,
            psi,
        }
    }

    fn apply_source_term(&self, p: &Primitive) -> f64 {
        self.burn.source_rate(p.density, p.pressure)
    }
}




// ============================================================================
#[cfg(test)]
mod tests {
    use super::*;

    fn combustion() -> Combustion {
        Combustion {
            eos: PropellantEos { gamma: 1.228, force: 1.004e6, solid_density: 1600.0, covolume: 1e-3 },
            burn: BurnLaw { k_1: 1.06, lambda_1: -0.06, k_2: 0.018, lambda_2: 0.0, z_k: 1.2, impulse: 1.5e6 },
        }
    }

    #[test]
    fn inert_gas_round_trips_through_the_conserved_vector() {
        let model = InertGas::new(&Gas::air());
        let p0 = model.initial_primitive(141.47, 5e6);
        let p1 = model.to_primitive(p0.to_conserved());
        assert!((p1.pressure - 5e6).abs() < 1e-3);
        assert!((p1.sound_speed - p0.sound_speed).abs() < 1e-9);
        assert_eq!(model.apply_source_term(&p1), 0.0);
    }

    #[test]
    fn combustion_round_trips_and_burns() {
        let model = combustion();
        let mut p0 = model.initial_primitive(775.0, 5e6);
        assert_eq!(p0.psi, 0.0);

        p0.burnt_depth = 0.5;
        let p1 = model.to_primitive(p0.to_conserved());
        assert!((p1.burnt_depth - 0.5).abs() < 1e-12);
        assert!((p1.psi - model.burn.psi(0.5)).abs() < 1e-12);
        assert!(p1.pressure > p0.pressure, "released gas must raise the pressure");
        assert!((model.apply_source_term(&p1) - 775.0 * p1.pressure / 1.5e6).abs() < 1e-6);
    }
}
