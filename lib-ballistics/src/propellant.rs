//! Propellant records and the tables they are looked up in.
//!
//! Tables are JSON documents mapping a propellant name to a record in the
//! customary units of powder handbooks:
//!
//! | key        | meaning                          | unit     |
//! |------------|----------------------------------|----------|
//! | `f`        | force                            | MJ/kg    |
//! | `ro`       | solid density                    | g/cm^3   |
//! | `k_1`      | first shape coefficient          |          |
//! | `k_2`      | sliver shape coefficient         |          |
//! | `I_k`      | pressure impulse of burnout      | MPa s    |
//! | `Z_k`      | relative burnt depth at burnout  |          |
//! | `etta`     | adiabatic index less one         |          |
//! | `alpha_k`  | covolume                         | dm^3/kg  |
//! | `lambda_1` | first shape exponent             |          |
//! | `lambda_2` | sliver shape exponent            |          |

use std::collections::BTreeMap;
use std::path::Path;

use serde_json::Value;

use crate::burn::BurnLaw;
use crate::eos::PropellantEos;
use crate::error::{Error, Result};

static BUILTIN_TABLE: &str = include_str!("../data/gpowders.json");




// ============================================================================
/// Anything propellants can be looked up in by name.
pub trait PropellantSource {
    fn lookup(&self, name: &str) -> Result<Propellant>;
}




// ============================================================================
/// A propellant in SI units.
#[derive(Clone, Debug, PartialEq)]
pub struct Propellant {
    pub name: String,
    pub gamma: f64,
    pub force: f64,
    pub solid_density: f64,
    pub k_1: f64,
    pub k_2: f64,
    pub impulse: f64,
    pub z_k: f64,
    pub covolume: f64,
    pub lambda_1: f64,
    pub lambda_2: f64,
}

impl Propellant {
    /// Read a handbook record, converting it to SI units.
    pub fn from_record(name: &str, record: &Value) -> Result<Self> {
        let field = |key: &'static str| {
            record
                .get(key)
                .and_then(Value::as_f64)
                .ok_or_else(|| Error::MalformedPropellant { name: name.to_string(), field: key })
        };

        let propellant = Propellant {
            name: name.to_string(),
            gamma: field("etta")? + 1.0,
            force: field("f")? * 1e6,
            solid_density: field("ro")? * 1e3,
            k_1: field("k_1")?,
            k_2: field("k_2")?,
            impulse: field("I_k")? * 1e6,
            z_k: field("Z_k")?,
            covolume: field("alpha_k")? * 1e-3,
            lambda_1: field("lambda_1")?,
            lambda_2: field("lambda_2")?,
        };
        propellant.validate()?;
        Ok(propellant)
    }

    pub fn eos(&self) -> PropellantEos {
        PropellantEos {
            gamma: self.gamma,
            force: self.force,
            solid_density: self.solid_density,
            covolume: self.covolume,
        }
    }

    pub fn burn_law(&self) -> BurnLaw {
        BurnLaw {
            k_1: self.k_1,
            lambda_1: self.lambda_1,
            k_2: self.k_2,
            lambda_2: self.lambda_2,
            z_k: self.z_k,
            impulse: self.impulse,
        }
    }

    pub fn validate(&self) -> Result<()> {
        let checks = [
            ("etta", self.gamma > 1.0),
            ("f", self.force > 0.0),
            ("ro", self.solid_density > 0.0),
            ("k_1", self.k_1 > 0.0),
            ("I_k", self.impulse > 0.0),
            ("Z_k", self.z_k >= 1.0),
            ("alpha_k", self.covolume >= 0.0),
        ];
        match checks.iter().find(|(_, ok)| !ok) {
            Some(&(field, _)) => Err(Error::MalformedPropellant { name: self.name.clone(), field }),
            None => Ok(()),
        }
    }
}




// ============================================================================
/// Propellant records keyed by name. Records are converted on lookup, so a
/// table with one malformed record is still usable for the others.
#[derive(Clone, Debug)]
pub struct PropellantTable {
    records: BTreeMap<String, Value>,
}

impl PropellantTable {
    /// The table shipped with the library.
    pub fn builtin() -> Result<Self> {
        Self::from_json_str(BUILTIN_TABLE)
    }

    pub fn from_json_str(text: &str) -> Result<Self> {
        let records = serde_json::from_str(text).map_err(|source| Error::Record { record: "propellant table", source })?;
        Ok(PropellantTable { records })
    }

    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::from_json_str(&std::fs::read_to_string(path)?)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.records.keys().map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.records.contains_key(name)
    }

    /// The raw record, in handbook units.
    pub fn record(&self, name: &str) -> Option<&Value> {
        self.records.get(name)
    }
}

impl PropellantSource for PropellantTable {
    fn lookup(&self, name: &str) -> Result<Propellant> {
        let record = self.record(name).ok_or_else(|| Error::PropellantNotFound(name.to_string()))?;
        Propellant::from_record(name, record)
    }
}




// ============================================================================
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_table_parses_and_lists_its_powders() {
        let table = PropellantTable::builtin().unwrap();
        let names: Vec<_> = table.names().collect();
        assert_eq!(names, vec!["12/7", "16/1 tr"]);
        assert!(table.contains("16/1 tr"));
    }

    #[test]
    fn lookup_converts_to_si_units() {
        let powder = PropellantTable::builtin().unwrap().lookup("16/1 tr").unwrap();
        assert_eq!(powder.name, "16/1 tr");
        assert!((powder.gamma - 1.228).abs() < 1e-12);
        assert!((powder.force - 1.004e6).abs() < 1e-6);
        assert!((powder.solid_density - 1600.0).abs() < 1e-9);
        assert!((powder.impulse - 1.5e6).abs() < 1e-6);
        assert!((powder.covolume - 1e-3).abs() < 1e-15);
    }

    #[test]
    fn shipped_burn_laws_end_at_full_burnout() {
        let table = PropellantTable::builtin().unwrap();
        for name in table.names() {
            let law = table.lookup(name).unwrap().burn_law();
            assert!((law.psi(law.z_k) - 1.0).abs() < 1e-3, "{}", name);
            assert!((law.psi(1.0 + 1e-9) - law.psi(1.0)).abs() < 1e-6, "{}", name);
        }
    }

    #[test]
    fn unknown_powder_is_not_found() {
        let err = PropellantTable::builtin().unwrap().lookup("no such powder").unwrap_err();
        assert!(matches!(err, Error::PropellantNotFound(ref name) if name == "no such powder"));
    }

    #[test]
    fn record_missing_a_field_is_malformed() {
        let table = PropellantTable::from_json_str(r#"{"broken": {"f": 1.0, "ro": 1.6}}"#).unwrap();
        let err = table.lookup("broken").unwrap_err();
        assert!(matches!(err, Error::MalformedPropellant { field: "etta", .. }));
    }

    #[test]
    fn non_numeric_field_is_malformed() {
        let mut record: Value = serde_json::from_str(BUILTIN_TABLE).unwrap();
        record["12/7"]["k_2"] = Value::from("many");
        let err = Propellant::from_record("12/7", &record["12/7"]).unwrap_err();
        assert!(matches!(err, Error::MalformedPropellant { field: "k_2", .. }));
    }
}
