use crate::archive::Archive;
use crate::config::{ArtilleryGun, Gas, PneumaticGun, SolverOptions};
use crate::error::{Error, Result};
use crate::grid::Grid;
use crate::model::{Combustion, FlowModel, InertGas};
use crate::projectile::Projectile;
use crate::propellant::{Propellant, PropellantSource};
use crate::trajectory::Trajectory;

const PROGRESS_INTERVAL: usize = 1000;




// ============================================================================
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Stage {
    Uninitialized,
    Stepping,
    Solved,
}




// ============================================================================
/// Time marching of the gas column together with the projectile it pushes.
pub struct Solver<M> {
    grid: Grid<M>,
    projectile: Projectile,
    barrel: f64,
    kurant: f64,
    max_steps: usize,
    time: f64,
    steps: usize,
    stage: Stage,
    trajectory: Trajectory,
}

impl<M: FlowModel> Solver<M> {
    pub fn new(grid: Grid<M>, projectile: Projectile, barrel: f64, kurant: f64, options: &SolverOptions) -> Self {
        Solver {
            grid,
            projectile,
            barrel,
            kurant,
            max_steps: options.max_steps,
            time: 0.0,
            steps: 0,
            stage: Stage::Uninitialized,
            trajectory: Trajectory::new(),
        }
    }

    pub fn grid(&self) -> &Grid<M> { &self.grid }
    pub fn projectile(&self) -> &Projectile { &self.projectile }
    pub fn trajectory(&self) -> &Trajectory { &self.trajectory }
    pub fn stage(&self) -> Stage { self.stage }
    pub fn time(&self) -> f64 { self.time }
    pub fn steps(&self) -> usize { self.steps }

    pub fn is_finished(&self) -> bool {
        self.projectile.position >= self.barrel
    }

    /// Advance the gas and the projectile by one CFL step.
    pub fn step(&mut self) -> Result<()> {
        self.stage = Stage::Stepping;

        let tau = self.grid.time_step(self.kurant);
        if !(tau > 0.0 && tau.is_finite()) {
            return Err(Error::NumericalInstability { step: self.steps, what: format!("time step {:e}", tau) });
        }

        self.projectile.advance(self.grid.base_pressure(), tau);
        let dx_prev = self.grid.move_boundary(self.projectile.position, self.projectile.velocity);

        self.time += tau;
        self.steps += 1;
        self.trajectory.push(
            self.time,
            self.projectile.position,
            self.projectile.velocity,
            self.grid.base_pressure(),
            self.grid.breech_pressure());

        let fluxes = self.grid.interface_fluxes();
        self.grid.update_conserved(tau, dx_prev, &fluxes);
        self.grid.derive_primitives();

        if let Some(j) = self.grid.first_unphysical_cell() {
            let p = self.grid.primitive()[j];
            return Err(Error::NumericalInstability {
                step: self.steps,
                what: format!("cell {} has density {:e}, pressure {:e}, sound speed {:e}", j, p.density, p.pressure, p.sound_speed),
            });
        }
        self.grid.apply_boundary_conditions();

        if self.steps % PROGRESS_INTERVAL == 0 {
            log::debug!("[{:07}] t={:.4e} x={:.4} v={:.2}", self.steps, self.time, self.projectile.position, self.projectile.velocity);
        }
        Ok(())
    }

    /// Step until the projectile reaches the muzzle.
    pub fn run(mut self) -> Result<Solution> {
        log::info!(
            "{} shot: {} cells, chamber {:.4} m, barrel {:.4} m",
            self.grid.model().name(),
            self.grid.nodes(),
            self.projectile.position,
            self.barrel);

        while !self.is_finished() {
            if self.steps >= self.max_steps {
                return Err(Error::StepLimit(self.max_steps));
            }
            self.step()?;
        }
        self.stage = Stage::Solved;
        self.trajectory.mark_solved();

        let solution = Solution {
            model: self.grid.model().name(),
            steps: self.steps,
            trajectory: self.trajectory,
        };
        log::info!(
            "{} steps, muzzle velocity {:.2} m/s, shot time {:.3} ms",
            solution.steps,
            solution.muzzle_velocity(),
            solution.shot_time() * 1e3);
        Ok(solution)
    }
}




// ============================================================================
/// A finished shot.
#[derive(Clone, Debug)]
pub struct Solution {
    model: &'static str,
    steps: usize,
    trajectory: Trajectory,
}

impl Solution {
    pub fn pneumatic(gun: &PneumaticGun, gas: &Gas, options: &SolverOptions) -> Result<Self> {
        gun.validate()?;
        gas.validate()?;
        options.validate()?;

        let grid = Grid::new(InertGas::new(gas), options.nodes, gun.chamber, gas.density, gun.initial_pressure)?;
        let projectile = Projectile::new(gun.chamber, gun.shell, gun.bore_area(), None);
        Solver::new(grid, projectile, gun.barrel, gun.kurant, options).run()
    }

    pub fn artillery(gun: &ArtilleryGun, source: &dyn PropellantSource, powder: &str, options: &SolverOptions) -> Result<Self> {
        Self::artillery_with(gun, &source.lookup(powder)?, options)
    }

    pub fn artillery_with(gun: &ArtilleryGun, propellant: &Propellant, options: &SolverOptions) -> Result<Self> {
        gun.validate()?;
        propellant.validate()?;
        options.validate()?;

        let chamber = gun.chamber();
        let grid = Grid::new(Combustion::new(propellant), options.nodes, chamber, gun.loading_density, gun.ignition_pressure)?;
        let projectile = Projectile::new(chamber, gun.shell, gun.bore_area(), Some(gun.boost_pressure));
        Solver::new(grid, projectile, gun.barrel, gun.kurant, options).run()
    }

    pub fn model(&self) -> &'static str {
        self.model
    }

    pub fn steps(&self) -> usize {
        self.steps
    }

    pub fn trajectory(&self) -> &Trajectory {
        &self.trajectory
    }

    pub fn muzzle_velocity(&self) -> f64 {
        self.trajectory.velocity().last().copied().unwrap_or(0.0)
    }

    pub fn shot_time(&self) -> f64 {
        self.trajectory.time().last().copied().unwrap_or(0.0)
    }

    pub fn peak_base_pressure(&self) -> f64 {
        self.trajectory.base_pressure().iter().copied().fold(0.0, f64::max)
    }

    pub fn peak_breech_pressure(&self) -> f64 {
        self.trajectory.breech_pressure().iter().copied().fold(0.0, f64::max)
    }

    pub fn save(&self, archive: &Archive) -> Result<()> {
        self.trajectory.save(archive)
    }
}
