//! Gun, gas and solver parameter records.
//!
//! Records are plain immutable values. Overrides go through the `with_*`
//! methods, which return a modified copy, and every record is checked by
//! `validate` before a solve starts. Records can also be read from JSON; the
//! field names of the classic parameter tables (`initialp`, `boostp`,
//! `denload`, ...) are accepted as aliases.

use std::f64::consts::PI;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};




// ============================================================================
fn positive(field: &'static str, value: f64) -> Result<()> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(Error::config(field, format!("must be positive, got {}", value)))
    }
}

fn courant(value: f64) -> Result<()> {
    if value > 0.0 && value < 1.0 {
        Ok(())
    } else {
        Err(Error::config("kurant", format!("must lie in (0, 1), got {}", value)))
    }
}

pub(crate) fn check_nodes(nodes: usize) -> Result<()> {
    if nodes < 4 {
        return Err(Error::config("nodes", format!("must be at least 4, got {}", nodes)));
    }
    Ok(())
}

fn read_json<T: serde::de::DeserializeOwned>(record: &'static str, text: &str) -> Result<T> {
    serde_json::from_str(text).map_err(|source| Error::Record { record, source })
}

fn bore_area(caliber: f64) -> f64 {
    PI * caliber.powi(2) / 4.0
}




// ============================================================================
/// Gun driven by a light gas compressed in the chamber.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PneumaticGun {
    /// Projectile mass, kg.
    pub shell: f64,
    pub kurant: f64,
    /// Distance from the breech to the muzzle, m.
    pub barrel: f64,
    pub caliber: f64,
    /// Initial distance from the breech to the projectile base, m.
    pub chamber: f64,
    #[serde(alias = "initialp")]
    pub initial_pressure: f64,
}

impl PneumaticGun {
    pub fn preset() -> Self {
        PneumaticGun {
            shell: 0.1,
            kurant: 0.5,
            barrel: 2.0,
            caliber: 0.03,
            chamber: 0.5,
            initial_pressure: 5e6,
        }
    }

    pub fn from_json_str(text: &str) -> Result<Self> {
        read_json("pneumatic gun", text)
    }

    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::from_json_str(&std::fs::read_to_string(path)?)
    }

    pub fn with_barrel(self, barrel: f64) -> Self { PneumaticGun { barrel, ..self } }
    pub fn with_kurant(self, kurant: f64) -> Self { PneumaticGun { kurant, ..self } }
    pub fn with_chamber(self, chamber: f64) -> Self { PneumaticGun { chamber, ..self } }
    pub fn with_initial_pressure(self, initial_pressure: f64) -> Self { PneumaticGun { initial_pressure, ..self } }

    pub fn bore_area(&self) -> f64 {
        bore_area(self.caliber)
    }

    pub fn validate(&self) -> Result<()> {
        positive("shell", self.shell)?;
        positive("barrel", self.barrel)?;
        positive("caliber", self.caliber)?;
        positive("chamber", self.chamber)?;
        positive("initial_pressure", self.initial_pressure)?;
        courant(self.kurant)?;

        if self.chamber >= self.barrel {
            return Err(Error::config("chamber", "must be shorter than the barrel"));
        }
        Ok(())
    }
}




// ============================================================================
/// Light gas filling the chamber of a pneumatic gun.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Gas {
    /// Adiabatic index.
    #[serde(alias = "k")]
    pub gamma: f64,
    /// Specific gas constant, J/(kg K).
    #[serde(alias = "R")]
    pub gas_constant: f64,
    /// Initial density, kg/m^3.
    #[serde(alias = "ro")]
    pub density: f64,
}

impl Gas {
    pub fn air() -> Self {
        Gas { gamma: 1.4, gas_constant: 287.0, density: 141.471 }
    }

    pub fn from_json_str(text: &str) -> Result<Self> {
        read_json("gas", text)
    }

    pub fn with_density(self, density: f64) -> Self { Gas { density, ..self } }

    /// Temperature of the gas at the given pressure.
    pub fn temperature(&self, pressure: f64) -> f64 {
        pressure / (self.density * self.gas_constant)
    }

    pub fn validate(&self) -> Result<()> {
        positive("gas_constant", self.gas_constant)?;
        positive("density", self.density)?;
        if self.gamma > 1.0 && self.gamma.is_finite() {
            Ok(())
        } else {
            Err(Error::config("gamma", format!("must be greater than one, got {}", self.gamma)))
        }
    }
}




// ============================================================================
/// Gun driven by a burning propellant charge. The chamber length is not given
/// directly; it follows from the charge mass and the loading density.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ArtilleryGun {
    /// Projectile mass, kg.
    pub shell: f64,
    pub barrel: f64,
    pub kurant: f64,
    /// Base pressure at which the driving band shears and the projectile
    /// starts to move, Pa.
    #[serde(alias = "boostp")]
    pub boost_pressure: f64,
    pub caliber: f64,
    /// Charge mass per unit chamber volume, kg/m^3.
    #[serde(alias = "denload")]
    pub loading_density: f64,
    /// Charge mass over projectile mass.
    #[serde(alias = "omega_q")]
    pub charge_ratio: f64,
    /// Pressure of the igniter gases filling the chamber at the start, Pa.
    #[serde(alias = "press_vsp")]
    pub ignition_pressure: f64,
}

impl ArtilleryGun {
    pub fn preset() -> Self {
        ArtilleryGun {
            shell: 3.75,
            barrel: 3.861,
            kurant: 0.4,
            boost_pressure: 30e6,
            caliber: 0.057,
            loading_density: 775.0,
            charge_ratio: 0.257,
            ignition_pressure: 5e6,
        }
    }

    pub fn from_json_str(text: &str) -> Result<Self> {
        read_json("artillery gun", text)
    }

    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::from_json_str(&std::fs::read_to_string(path)?)
    }

    pub fn with_barrel(self, barrel: f64) -> Self { ArtilleryGun { barrel, ..self } }
    pub fn with_kurant(self, kurant: f64) -> Self { ArtilleryGun { kurant, ..self } }
    pub fn with_boost_pressure(self, boost_pressure: f64) -> Self { ArtilleryGun { boost_pressure, ..self } }
    pub fn with_loading_density(self, loading_density: f64) -> Self { ArtilleryGun { loading_density, ..self } }
    pub fn with_charge_ratio(self, charge_ratio: f64) -> Self { ArtilleryGun { charge_ratio, ..self } }

    pub fn bore_area(&self) -> f64 {
        bore_area(self.caliber)
    }

    pub fn charge_mass(&self) -> f64 {
        self.charge_ratio * self.shell
    }

    pub fn chamber(&self) -> f64 {
        self.charge_mass() / self.loading_density / self.bore_area()
    }

    pub fn validate(&self) -> Result<()> {
        positive("shell", self.shell)?;
        positive("barrel", self.barrel)?;
        positive("caliber", self.caliber)?;
        positive("boost_pressure", self.boost_pressure)?;
        positive("loading_density", self.loading_density)?;
        positive("charge_ratio", self.charge_ratio)?;
        positive("ignition_pressure", self.ignition_pressure)?;
        courant(self.kurant)?;

        if self.chamber() >= self.barrel {
            return Err(Error::config("barrel", format!("must be longer than the chamber ({:.3} m)", self.chamber())));
        }
        Ok(())
    }
}




// ============================================================================
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SolverOptions {
    /// Number of cells, the two ghost cells included.
    pub nodes: usize,
    pub max_steps: usize,
}

impl Default for SolverOptions {
    fn default() -> Self {
        SolverOptions { nodes: 100, max_steps: 5_000_000 }
    }
}

impl SolverOptions {
    pub fn with_nodes(self, nodes: usize) -> Self { SolverOptions { nodes, ..self } }
    pub fn with_max_steps(self, max_steps: usize) -> Self { SolverOptions { max_steps, ..self } }

    pub fn validate(&self) -> Result<()> {
        check_nodes(self.nodes)?;
        if self.max_steps == 0 {
            return Err(Error::config("max_steps", "must be positive"));
        }
        Ok(())
    }
}




// ============================================================================
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presets_are_valid() {
        PneumaticGun::preset().validate().unwrap();
        ArtilleryGun::preset().validate().unwrap();
        Gas::air().validate().unwrap();
        SolverOptions::default().validate().unwrap();
    }

    #[test]
    fn with_methods_copy_and_override_one_field() {
        let gun = PneumaticGun::preset();
        let longer = gun.with_barrel(5.098);
        assert_eq!(longer.barrel, 5.098);
        assert_eq!(gun.barrel, 2.0);
        assert_eq!(longer.chamber, gun.chamber);
    }

    #[test]
    fn bore_area_follows_the_caliber() {
        assert!((PneumaticGun::preset().bore_area() - 7.0686e-4).abs() < 1e-7);
    }

    #[test]
    fn artillery_chamber_follows_from_the_charge() {
        let gun = ArtilleryGun::preset();
        let expected = 0.257 * 3.75 / 775.0 / gun.bore_area();
        assert!((gun.chamber() - expected).abs() < 1e-12);
        assert!(gun.chamber() > 0.4 && gun.chamber() < 0.6);
    }

    #[test]
    fn courant_number_outside_the_unit_interval_is_rejected() {
        let err = PneumaticGun::preset().with_kurant(1.2).validate().unwrap_err();
        assert!(matches!(err, Error::Config { field: "kurant", .. }));
    }

    #[test]
    fn chamber_longer_than_the_barrel_is_rejected() {
        let err = PneumaticGun::preset().with_chamber(3.0).validate().unwrap_err();
        assert!(matches!(err, Error::Config { field: "chamber", .. }));
    }

    #[test]
    fn records_read_from_json_with_classic_names() {
        let gun = PneumaticGun::from_json_str(
            r#"{"shell": 0.1, "kurant": 0.5, "barrel": 2, "caliber": 0.03, "chamber": 0.5, "initialp": 5e6}"#).unwrap();
        assert_eq!(gun, PneumaticGun::preset());

        let gas = Gas::from_json_str(r#"{"k": 1.4, "R": 287, "ro": 141.471}"#).unwrap();
        assert_eq!(gas, Gas::air());
    }

    #[test]
    fn missing_json_field_is_a_record_error() {
        let err = ArtilleryGun::from_json_str(r#"{"shell": 3.75}"#).unwrap_err();
        assert!(matches!(err, Error::Record { record: "artillery gun", .. }));
        assert!(err.to_string().contains("missing field"));
    }

    #[test]
    fn records_read_from_json_files() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gun.json");
        std::fs::write(&path, r#"{"shell": 3.75, "barrel": 5.0, "kurant": 0.4, "boostp": 3e7, "caliber": 0.057,
            "denload": 775, "omega_q": 0.257, "press_vsp": 5e6}"#).unwrap();
        assert_eq!(ArtilleryGun::from_json_file(&path).unwrap(), ArtilleryGun::preset().with_barrel(5.0));

        std::fs::write(&path, serde_json::to_string(&PneumaticGun::preset().with_initial_pressure(8e6)).unwrap()).unwrap();
        assert_eq!(PneumaticGun::from_json_file(&path).unwrap().initial_pressure, 8e6);

        let err = PneumaticGun::from_json_file(dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn artillery_overrides_keep_the_other_fields() {
        let gun = ArtilleryGun::preset().with_boost_pressure(15e6).with_loading_density(700.0);
        assert_eq!(gun.boost_pressure, 15e6);
        assert_eq!(gun.loading_density, 700.0);
        assert_eq!(gun.charge_ratio, ArtilleryGun::preset().charge_ratio);
        assert!(gun.chamber() > ArtilleryGun::preset().chamber());
    }

    #[test]
    fn gas_temperature_follows_the_ideal_gas_law() {
        let air = Gas::air();
        assert!((air.temperature(5e6) - 123.15).abs() < 0.01);
        assert!((air.with_density(70.7355).temperature(5e6) - 246.3).abs() < 0.1);
    }

    #[test]
    fn too_few_nodes_are_rejected() {
        assert!(SolverOptions::default().with_nodes(3).validate().is_err());
    }
}
