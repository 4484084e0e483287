// ============================================================================
/// Conserved quantities of one cell: density, momentum, total energy density
/// and density times burnt depth. The last component stays zero for an inert
/// gas.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Conserved(pub f64, pub f64, pub f64, pub f64);




// ============================================================================
impl std::ops::Add<Conserved> for Conserved { type Output = Self; fn add(self, u: Conserved) -> Conserved { Conserved(self.0 + u.0, self.1 + u.1, self.2 + u.2, self.3 + u.3) } }
impl std::ops::Sub<Conserved> for Conserved { type Output = Self; fn sub(self, u: Conserved) -> Conserved { Conserved(self.0 - u.0, self.1 - u.1, self.2 - u.2, self.3 - u.3) } }
impl std::ops::Mul<Conserved> for f64 { type Output = Conserved; fn mul(self, u: Conserved) -> Conserved { Conserved(self * u.0, self * u.1, self * u.2, self * u.3) } }
impl std::ops::Mul<f64> for Conserved { type Output = Conserved; fn mul(self, a: f64) -> Conserved { Conserved(self.0 * a, self.1 * a, self.2 * a, self.3 * a) } }
impl std::ops::Div<f64> for Conserved { type Output = Conserved; fn div(self, a: f64) -> Conserved { Conserved(self.0 / a, self.1 / a, self.2 / a, self.3 / a) } }




// ============================================================================
impl Into<[f64; 4]> for Conserved {
    fn into(self) -> [f64; 4] {
        [self.0, self.1, self.2, self.3]
    }
}

impl From<[f64; 4]> for Conserved {
    fn from(a: [f64; 4]) -> Conserved {
        Conserved(a[0], a[1], a[2], a[3])
    }
}




// ============================================================================
impl Conserved {
    pub fn density            (self) -> f64 { self.0 }
    pub fn momentum           (self) -> f64 { self.1 }
    pub fn total_energy       (self) -> f64 { self.2 }
    pub fn burnt_depth_density(self) -> f64 { self.3 }
    pub fn velocity           (self) -> f64 { self.momentum() / self.density() }
    pub fn burnt_depth        (self) -> f64 { self.burnt_depth_density() / self.density() }

    /// Specific internal energy, total energy per unit mass less the kinetic
    /// part.
    pub fn internal_energy(self) -> f64 {
        self.total_energy() / self.density() - 0.5 * self.velocity().powi(2)
    }
}




// ============================================================================
/// Quantities derived from [`Conserved`] through an equation of state. `energy`
/// is the specific internal energy; `psi` is the fraction of the charge already
/// turned into gas (zero for an inert gas).
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Primitive {
    pub density: f64,
    pub velocity: f64,
    pub energy: f64,
    pub pressure: f64,
    pub sound_speed: f64,
    pub burnt_depth: f64,
    pub psi: f64,
}

impl Primitive {
    pub fn momentum(&self) -> f64 {
        self.density * self.velocity
    }

    pub fn total_energy(&self) -> f64 {
        self.density * (self.energy + 0.5 * self.velocity.powi(2))
    }

    pub fn to_conserved(&self) -> Conserved {
        Conserved(
            self.density,
            self.momentum(),
            self.total_energy(),
            self.density * self.burnt_depth)
    }

    /// The vector carried across a face by the split Mach number: like the
    /// conserved vector but with total enthalpy in place of total energy.
    pub fn advected_vector(&self) -> Conserved {
        Conserved(
            self.density,
            self.momentum(),
            self.total_energy() + self.pressure,
            self.density * self.burnt_depth)
    }

    pub fn signal_speed(&self) -> f64 {
        self.velocity.abs() + self.sound_speed
    }

    pub fn is_physical(&self) -> bool {
        self.density > 0.0
            && self.pressure > 0.0
            && self.sound_speed > 0.0
            && self.pressure.is_finite()
            && self.sound_speed.is_finite()
    }
}




// ============================================================================
#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Primitive {
        Primitive { density: 2.0, velocity: 3.0, energy: 5.0, pressure: 4.0, sound_speed: 1.0, burnt_depth: 0.25, psi: 0.1 }
    }

    #[test]
    fn conserved_round_trip_recovers_velocity_energy_and_depth() {
        let u = sample().to_conserved();
        assert_eq!(u.density(), 2.0);
        assert!((u.velocity() - 3.0).abs() < 1e-14);
        assert!((u.internal_energy() - 5.0).abs() < 1e-14);
        assert!((u.burnt_depth() - 0.25).abs() < 1e-14);
    }

    #[test]
    fn advected_vector_adds_pressure_to_the_energy_slot_only() {
        let p = sample();
        let d = p.advected_vector() - p.to_conserved();
        assert_eq!(d, Conserved(0.0, 0.0, 4.0, 0.0));
    }

    #[test]
    fn arithmetic_is_component_wise() {
        let a = Conserved(1.0, 2.0, 3.0, 4.0);
        assert_eq!(a + a, 2.0 * a);
        assert_eq!((a * 4.0) / 2.0, Conserved(2.0, 4.0, 6.0, 8.0));
        assert_eq!(Into::<[f64; 4]>::into(a - a), [0.0; 4]);
    }

    #[test]
    fn non_finite_pressure_is_not_physical() {
        let mut p = sample();
        assert!(p.is_physical());
        p.sound_speed = f64::NAN;
        assert!(!p.is_physical());
        p.sound_speed = 1.0;
        p.pressure = -1.0;
        assert!(!p.is_physical());
    }
}
