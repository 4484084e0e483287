// ============================================================================
/// Geometric burn law of a propellant grain.
///
/// The burnt depth `z` is normalised so that `z = 1` is the moment the grain
/// splits into slivers and `z = z_k` the end of burning. The burn rate is
/// taken proportional to pressure, `dz/dt = p / I_k`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct BurnLaw {
    pub k_1: f64,
    pub lambda_1: f64,
    pub k_2: f64,
    pub lambda_2: f64,
    pub z_k: f64,
    /// Pressure impulse of the end of burning `I_k`, Pa s.
    pub impulse: f64,
}

impl BurnLaw {
    /// Gas fraction at the moment the grain splits into slivers.
    pub fn split_fraction(&self) -> f64 {
        self.k_1 * (1.0 + self.lambda_1)
    }

    /// Fraction `ψ` of the charge already turned into gas.
    pub fn psi(&self, z: f64) -> f64 {
        if z <= 1.0 {
            self.k_1 * z * (1.0 + self.lambda_1 * z)
        } else if z <= self.z_k {
            let s = z - 1.0;
            (self.split_fraction() + self.k_2 * s * (1.0 + self.lambda_2 * s)).min(1.0)
        } else {
            1.0
        }
    }

    /// Rate of the burnt depth density, `ρ p / I_k`.
    pub fn source_rate(&self, density: f64, pressure: f64) -> f64 {
        density * pressure / self.impulse
    }
}
