//! Cells between the breech and the projectile base.
//!
//! The mesh has `nodes` cells and `nodes - 1` interfaces. Cells `0` and
//! `nodes - 1` are ghosts; the first interface sits at the breech and the last
//! one at the projectile base. Interfaces are spread evenly over the column
//! and move with it, so the mesh stretches as the projectile travels.

use ndarray::{s, Array, Array1, Zip};

use crate::config::check_nodes;
use crate::error::Result;
use crate::flux::interface_flux;
use crate::model::FlowModel;
use crate::state::{Conserved, Primitive};
use crate::timestep::cfl_time_step;




// ============================================================================
/// Evenly spaced interfaces from the breech to `base`, the last one placed
/// exactly at the base.
fn spread(base: f64, count: usize) -> Array1<f64> {
    let mut x = Array::linspace(0.0, base, count);
    x[count - 1] = base;
    x
}




// ============================================================================
pub struct Grid<M> {
    model: M,
    conserved: Array1<Conserved>,
    primitive: Array1<Primitive>,
    x_interface: Array1<f64>,
    v_interface: Array1<f64>,
}




// ============================================================================
impl<M: FlowModel> Grid<M> {

    /// Fill a column of length `chamber` with gas at rest. The column needs
    /// at least two interior cells besides the ghosts.
    pub fn new(model: M, nodes: usize, chamber: f64, density: f64, pressure: f64) -> Result<Self> {
        check_nodes(nodes)?;
        let primitive = Array1::from_elem(nodes, model.initial_primitive(density, pressure));
        let conserved = primitive.mapv(|p| p.to_conserved());
        Ok(Grid {
            model,
            conserved,
            primitive,
            x_interface: spread(chamber, nodes - 1),
            v_interface: Array1::zeros(nodes - 1),
        })
    }

    pub fn model(&self) -> &M {
        &self.model
    }

    pub fn nodes(&self) -> usize {
        self.conserved.len()
    }

    pub fn conserved(&self) -> &Array1<Conserved> {
        &self.conserved
    }

    pub fn primitive(&self) -> &Array1<Primitive> {
        &self.primitive
    }

    pub fn x_interface(&self) -> &Array1<f64> {
        &self.x_interface
    }

    pub fn v_interface(&self) -> &Array1<f64> {
        &self.v_interface
    }

    pub fn base_position(&self) -> f64 {
        self.x_interface[self.nodes() - 2]
    }

    /// Pressure of the last interior cell, the one pushing on the projectile.
    pub fn base_pressure(&self) -> f64 {
        self.primitive[self.nodes() - 2].pressure
    }

    pub fn breech_pressure(&self) -> f64 {
        self.primitive[1].pressure
    }

    pub fn time_step(&self, kurant: f64) -> f64 {
        cfl_time_step(kurant, self.x_interface.view(), self.primitive.view())
    }

    /// Respread the interfaces over `[0, position]` with velocities growing
    /// linearly from zero at the breech to `velocity` at the base. Returns the
    /// width of the first cell before the move.
    ///
    /// The ghosts are reflected again off the moved walls, so that no gas
    /// crosses the base face at its new velocity.
    pub fn move_boundary(&mut self, position: f64, velocity: f64) -> f64 {
        let dx_prev = self.x_interface[1];
        self.x_interface = spread(position, self.nodes() - 1);
        self.v_interface = self.x_interface.mapv(|x| velocity * x / position);
        self.apply_boundary_conditions();
        dx_prev
    }

    pub fn interface_fluxes(&self) -> Array1<Conserved> {
        Zip::from(self.primitive.slice(s![..-1]))
            .and(self.primitive.slice(s![1..]))
            .and(&self.v_interface)
            .map_collect(|pl, pr, &v| interface_flux(pl, pr, v))
    }

    /// Advance the interior cells over `tau`. The conserved vectors are
    /// rescaled from the old cell width `dx_prev` to the current one, and
    /// the burn source feeds the burnt depth component.
    pub fn update_conserved(&mut self, tau: f64, dx_prev: f64, fluxes: &Array1<Conserved>) {
        let model = &self.model;
        let x1 = self.x_interface[1];
        let stretch = dx_prev / x1;

        Zip::from(self.conserved.slice_mut(s![1..-1]))
            .and(self.primitive.slice(s![1..-1]))
            .and(fluxes.slice(s![..-1]))
            .and(fluxes.slice(s![1..]))
            .for_each(|u, p, &fl, &fr| {
                let source = Conserved(0.0, 0.0, 0.0, model.apply_source_term(p) * x1);
                *u = stretch * (*u - (fr - fl - source) * (tau / dx_prev));
            });
    }

    pub fn derive_primitives(&mut self) {
        let model = &self.model;
        Zip::from(self.primitive.slice_mut(s![1..-1]))
            .and(self.conserved.slice(s![1..-1]))
            .for_each(|p, &u| *p = model.to_primitive(u));
    }

    pub fn first_unphysical_cell(&self) -> Option<usize> {
        self.primitive
            .slice(s![1..-1])
            .iter()
            .position(|p| !p.is_physical())
            .map(|j| j + 1)
    }

    /// Reflect the breech ghost off a wall at rest, and the base ghost off the
    /// moving projectile, then bring the ghost primitives up to date.
    pub fn apply_boundary_conditions(&mut self) {
        let n = self.nodes();

        let u1 = self.conserved[1];
        self.conserved[0] = Conserved(u1.0, -u1.1, u1.2, u1.3);

        let un = self.conserved[n - 2];
        let vn = self.primitive[n - 2].velocity;
        self.conserved[n - 1] = Conserved(un.0, un.0 * (2.0 * self.v_interface[n - 2] - vn), un.2, un.3);

        self.primitive[0] = self.model.to_primitive(self.conserved[0]);
        self.primitive[n - 1] = self.model.to_primitive(self.conserved[n - 1]);
    }

    /// Gas mass per unit bore area held by the interior cells.
    pub fn interior_mass(&self) -> f64 {
        let dx = &self.x_interface.slice(s![1..]) - &self.x_interface.slice(s![..-1]);
        Zip::from(&dx)
            .and(self.conserved.slice(s![1..-1]))
            .fold(0.0, |mass, &dx, u| mass + u.density() * dx)
    }
}




// ============================================================================
#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Gas;
    use crate::error::Error;
    use crate::model::InertGas;

    fn air_column(nodes: usize) -> Grid<InertGas> {
        Grid::new(InertGas::new(&Gas::air()), nodes, 0.5, 141.471, 5e6).unwrap()
    }

    #[test]
    fn new_grid_spans_the_chamber() {
        let grid = air_column(10);
        assert_eq!(grid.nodes(), 10);
        assert_eq!(grid.x_interface().len(), 9);
        assert_eq!(grid.base_position(), 0.5);
        assert!((grid.interior_mass() - 141.471 * 0.5).abs() < 1e-9);
        assert!((grid.base_pressure() - 5e6).abs() < 1e-3);
    }

    #[test]
    fn gas_at_rest_behind_a_fixed_wall_stays_at_rest() {
        let mut grid = air_column(12);
        let tau = grid.time_step(0.5);
        assert!(tau > 0.0);

        let dx_prev = grid.move_boundary(0.5, 0.0);
        let fluxes = grid.interface_fluxes();
        grid.update_conserved(tau, dx_prev, &fluxes);
        grid.derive_primitives();
        grid.apply_boundary_conditions();

        assert_eq!(grid.first_unphysical_cell(), None);
        for p in grid.primitive().iter() {
            assert!(p.velocity.abs() < 1e-9);
            assert!((p.pressure - 5e6).abs() < 1e-3);
        }
    }

    #[test]
    fn moving_boundary_sets_linear_interface_velocities() {
        let mut grid = air_column(6);
        let dx_prev = grid.move_boundary(1.0, 40.0);
        assert!((dx_prev - 0.125).abs() < 1e-15);
        assert_eq!(grid.base_position(), 1.0);
        assert!((grid.v_interface()[2] - 20.0).abs() < 1e-12);
        assert_eq!(grid.v_interface()[4], 40.0);
    }

    #[test]
    fn ghosts_reflect_the_neighbouring_cells() {
        let mut grid = air_column(6);
        grid.move_boundary(0.5, 10.0);
        grid.conserved[1].1 = 141.471 * 3.0;
        grid.conserved[4].1 = 141.471 * 4.0;
        grid.derive_primitives();
        grid.apply_boundary_conditions();

        let p = grid.primitive();
        assert!((p[0].velocity + 3.0).abs() < 1e-12);
        assert!((p[5].velocity - (2.0 * 10.0 - 4.0)).abs() < 1e-12);
        assert_eq!(p[0].density, p[1].density);
    }

    #[test]
    fn too_short_a_column_is_rejected() {
        for nodes in 0..4 {
            let err = Grid::new(InertGas::new(&Gas::air()), nodes, 0.5, 141.471, 5e6).err().unwrap();
            assert!(matches!(err, Error::Config { field: "nodes", .. }), "nodes={}", nodes);
        }
    }

    #[test]
    fn base_ghost_follows_the_face_as_soon_as_it_moves() {
        let mut grid = air_column(8);
        grid.move_boundary(0.6, 25.0);
        let fluxes = grid.interface_fluxes();
        assert!(fluxes[6].0.abs() < 1e-9, "mass flux through the base {}", fluxes[6].0);
        assert!((grid.primitive()[7].velocity - 50.0).abs() < 1e-12);
    }
}
