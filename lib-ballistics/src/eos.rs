//! Equations of state closing the conserved vector.




// ============================================================================
/// Calorically perfect gas, `p = ρ e (γ - 1)`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct IdealGasEos {
    pub gamma: f64,
}

impl IdealGasEos {
    pub fn pressure(&self, density: f64, energy: f64) -> f64 {
        density * energy * (self.gamma - 1.0)
    }

    pub fn sound_speed(&self, density: f64, pressure: f64) -> f64 {
        (self.gamma * pressure / density).sqrt()
    }

    pub fn internal_energy(&self, density: f64, pressure: f64) -> f64 {
        pressure / (self.gamma - 1.0) / density
    }
}




// ============================================================================
/// Noble-Abel gas mixed with the unburnt part of a propellant charge.
///
/// The gas occupies the specific volume left over by the solid grains and the
/// covolume of the molecules already released. The energy that the unburnt
/// fraction `1 - ψ` still holds, `(1 - ψ) f / (γ - 1)`, does not contribute to
/// the pressure.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PropellantEos {
    pub gamma: f64,
    /// Propellant force `f`, J/kg.
    pub force: f64,
    pub solid_density: f64,
    pub covolume: f64,
}

impl PropellantEos {
    /// Volume per unit mixture mass available to the gas. Goes non-positive for
    /// non-physical combinations of density and ψ; callers check the resulting
    /// pressure.
    pub fn effective_volume(&self, density: f64, psi: f64) -> f64 {
        1.0 / density - (1.0 - psi) / self.solid_density - self.covolume * psi
    }

    fn unreleased_energy(&self, psi: f64) -> f64 {
        (1.0 - psi) * self.force / (self.gamma - 1.0)
    }

    pub fn pressure(&self, density: f64, energy: f64, psi: f64) -> f64 {
        (energy - self.unreleased_energy(psi)) * (self.gamma - 1.0) / self.effective_volume(density, psi)
    }

    pub fn sound_speed(&self, density: f64, pressure: f64, psi: f64) -> f64 {
        (self.gamma * pressure / self.effective_volume(density, psi)).sqrt() / density
    }

    pub fn internal_energy(&self, density: f64, pressure: f64, psi: f64) -> f64 {
        pressure / (self.gamma - 1.0) * self.effective_volume(density, psi) + self.unreleased_energy(psi)
    }
}




// ============================================================================
#[cfg(test)]
mod tests {
    use super::*;

    fn powder() -> PropellantEos {
        PropellantEos { gamma: 1.228, force: 1.004e6, solid_density: 1600.0, covolume: 1e-3 }
    }

    #[test]
    fn ideal_gas_matches_textbook_air() {
        let eos = IdealGasEos { gamma: 1.4 };
        let e = eos.internal_energy(141.47, 5e6);
        assert!((eos.pressure(141.47, e) - 5e6).abs() < 1e-6);
        assert!((eos.sound_speed(1.2, 1e5) - 341.56).abs() < 0.01);
    }

    #[test]
    fn propellant_energy_inverts_pressure() {
        let eos = powder();
        for &psi in &[0.0, 0.3, 1.0] {
            let e = eos.internal_energy(775.0, 5e6, psi);
            let p = eos.pressure(775.0, e, psi);
            assert!((p - 5e6).abs() < 1e-3, "psi={} p={}", psi, p);
        }
    }

    #[test]
    fn fully_burnt_propellant_is_a_noble_abel_gas() {
        let eos = powder();
        let (rho, e) = (200.0, 2e6);
        let expected = e * (eos.gamma - 1.0) / (1.0 / rho - eos.covolume);
        assert!((eos.pressure(rho, e, 1.0) - expected).abs() < 1e-6);
    }

    #[test]
    fn overfilled_volume_goes_negative() {
        let eos = powder();
        assert!(eos.effective_volume(1600.0, 0.0) <= 0.0);
        assert!(eos.effective_volume(775.0, 0.0) > 0.0);
    }
}
