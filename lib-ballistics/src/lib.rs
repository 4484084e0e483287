//! Interior ballistics on a moving Eulerian grid.
//!
//! The gas between the breech and the projectile base is treated as a
//! quasi-one-dimensional compressible flow. Cells are advanced with an
//! AUSM-type flux splitting on a mesh that stretches with the projectile, which
//! is pushed by the pressure of the cell next to its base. Two working fluids
//! are supported: an inert compressed gas ([`model::InertGas`]) and the
//! combustion products of a burning propellant charge ([`model::Combustion`]).
//!
//! ```no_run
//! use lib_ballistics::{Gas, PneumaticGun, Solution, SolverOptions};
//!
//! let solution = Solution::pneumatic(&PneumaticGun::preset(), &Gas::air(), &SolverOptions::default())?;
//! println!("muzzle velocity {:.1} m/s", solution.muzzle_velocity());
//! # Ok::<(), lib_ballistics::Error>(())
//! ```

pub mod archive;
pub mod burn;
pub mod config;
pub mod eos;
pub mod error;
pub mod flux;
pub mod grid;
pub mod model;
pub mod projectile;
pub mod propellant;
pub mod solver;
pub mod state;
pub mod timestep;
pub mod trajectory;

pub use archive::Archive;
pub use config::{ArtilleryGun, Gas, PneumaticGun, SolverOptions};
pub use error::{Error, Result};
pub use propellant::{Propellant, PropellantSource, PropellantTable};
pub use solver::{Solution, Stage};
pub use trajectory::Trajectory;
