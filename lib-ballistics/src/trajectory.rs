use std::collections::BTreeMap;

use crate::archive::Archive;
use crate::error::{Error, Result};

const TIME: &str = "time";
const POSITION: &str = "position";
const VELOCITY: &str = "velocity";
const BASE_PRESSURE: &str = "base_pressure";
const BREECH_PRESSURE: &str = "breech_pressure";




// ============================================================================
/// Projectile history sampled once per step. The sequences only grow while a
/// solve is running; once it is marked solved the trajectory is final and can
/// be saved.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Trajectory {
    time: Vec<f64>,
    position: Vec<f64>,
    velocity: Vec<f64>,
    base_pressure: Vec<f64>,
    breech_pressure: Vec<f64>,
    solved: bool,
}

impl Trajectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, time: f64, position: f64, velocity: f64, base_pressure: f64, breech_pressure: f64) {
        self.time.push(time);
        self.position.push(position);
        self.velocity.push(velocity);
        self.base_pressure.push(base_pressure);
        self.breech_pressure.push(breech_pressure);
    }

    pub(crate) fn mark_solved(&mut self) {
        self.solved = true;
    }

    pub fn is_solved(&self) -> bool {
        self.solved
    }

    pub fn len(&self) -> usize {
        self.position.len()
    }

    pub fn is_empty(&self) -> bool {
        self.position.is_empty()
    }

    /// Elapsed time of each sample. Empty for trajectories loaded from an
    /// archive that did not record it.
    pub fn time(&self) -> &[f64] { &self.time }
    pub fn position(&self) -> &[f64] { &self.position }
    pub fn velocity(&self) -> &[f64] { &self.velocity }
    pub fn base_pressure(&self) -> &[f64] { &self.base_pressure }
    pub fn breech_pressure(&self) -> &[f64] { &self.breech_pressure }

    pub fn save(&self, archive: &Archive) -> Result<()> {
        if !self.solved {
            return Err(Error::NotSolved);
        }
        let mut datasets = BTreeMap::new();
        datasets.insert(TIME.to_string(), self.time.clone());
        datasets.insert(POSITION.to_string(), self.position.clone());
        datasets.insert(VELOCITY.to_string(), self.velocity.clone());
        datasets.insert(BASE_PRESSURE.to_string(), self.base_pressure.clone());
        datasets.insert(BREECH_PRESSURE.to_string(), self.breech_pressure.clone());
        archive.write(datasets)?;
        log::info!("saved {} samples to {}", self.len(), archive.path().display());
        Ok(())
    }

    /// Load a trajectory saved by [`Trajectory::save`]. Returns `None` when the
    /// archive does not exist.
    pub fn load(archive: &Archive) -> Result<Option<Trajectory>> {
        let mut datasets = match archive.read()? {
            Some(datasets) => datasets,
            None => return Ok(None),
        };
        let mut take = |name: &str| {
            datasets.remove(name).ok_or_else(|| Error::BadArchive {
                path: archive.path().to_path_buf(),
                why: format!("dataset '{}' is missing", name),
            })
        };

        let trajectory = Trajectory {
            position: take(POSITION)?,
            velocity: take(VELOCITY)?,
            base_pressure: take(BASE_PRESSURE)?,
            breech_pressure: take(BREECH_PRESSURE)?,
            time: take(TIME).unwrap_or_default(),
            solved: true,
        };

        let n = trajectory.len();
        let lengths = [trajectory.velocity.len(), trajectory.base_pressure.len(), trajectory.breech_pressure.len()];
        if lengths.iter().any(|&m| m != n) || !(trajectory.time.is_empty() || trajectory.time.len() == n) {
            return Err(Error::BadArchive {
                path: archive.path().to_path_buf(),
                why: "datasets differ in length".to_string(),
            });
        }
        Ok(Some(trajectory))
    }
}
