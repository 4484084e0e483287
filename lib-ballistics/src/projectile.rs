// ============================================================================
/// Rigid projectile closing the gas column at its base.
///
/// A projectile with an engagement pressure stays in place until the base
/// pressure first reaches it. After that it moves freely for the rest of the
/// shot, whatever the pressure does.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Projectile {
    pub position: f64,
    pub velocity: f64,
    pub mass: f64,
    pub area: f64,
    pub engagement_pressure: Option<f64>,
    engaged: bool,
}

impl Projectile {
    pub fn new(position: f64, mass: f64, area: f64, engagement_pressure: Option<f64>) -> Self {
        Projectile {
            position,
            velocity: 0.0,
            mass,
            area,
            engagement_pressure,
            engaged: engagement_pressure.is_none(),
        }
    }

    pub fn is_engaged(&self) -> bool {
        self.engaged
    }

    pub fn acceleration(&self, base_pressure: f64) -> f64 {
        base_pressure * self.area / self.mass
    }

    /// Move the projectile over `tau` under constant base pressure.
    pub fn advance(&mut self, base_pressure: f64, tau: f64) {
        if !self.engaged {
            match self.engagement_pressure {
                Some(threshold) if base_pressure < threshold => return,
                _ => {
                    self.engaged = true;
                    log::debug!("projectile engaged at base pressure {:.3} MPa", base_pressure * 1e-6);
                }
            }
        }
        let a = self.acceleration(base_pressure);
        self.position += self.velocity * tau + 0.5 * a * tau * tau;
        self.velocity += a * tau;
    }
}
