use ndarray::{s, ArrayView1, Zip};

use crate::state::Primitive;




// ============================================================================
/// CFL-limited step over the interior cells. Interior cell `j` spans the
/// interfaces `j - 1` and `j`, so `x_interface` has one entry fewer than
/// `primitive`.
pub fn cfl_time_step(kurant: f64, x_interface: ArrayView1<f64>, primitive: ArrayView1<Primitive>) -> f64 {
    let dx = &x_interface.slice(s![1..]) - &x_interface.slice(s![..-1]);

    let shortest = Zip::from(&dx)
        .and(primitive.slice(s![1..-1]))
        .fold(f64::INFINITY, |tmin, &dx, p| tmin.min(dx / p.signal_speed()));

    kurant * shortest
}




// ============================================================================
#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{Array, Array1};

    fn cell(velocity: f64, sound_speed: f64) -> Primitive {
        Primitive { density: 1.0, velocity, energy: 1.0, pressure: 1.0, sound_speed, burnt_depth: 0.0, psi: 0.0 }
    }

    #[test]
    fn step_is_set_by_the_fastest_signal_in_the_smallest_cell() {
        let x = Array::linspace(0.0, 1.0, 5);
        let p: Array1<Primitive> = (0..6).map(|j| cell(if j == 3 { -100.0 } else { 0.0 }, 300.0)).collect();
        let tau = cfl_time_step(0.5, x.view(), p.view());
        assert!((tau - 0.5 * 0.25 / 400.0).abs() < 1e-15);
    }

    #[test]
    fn ghost_cells_do_not_limit_the_step() {
        let x = Array::linspace(0.0, 1.0, 3);
        let mut p: Array1<Primitive> = (0..4).map(|_| cell(0.0, 100.0)).collect();
        p[0] = cell(0.0, 1e9);
        p[3] = cell(1e9, 1.0);
        let tau = cfl_time_step(1.0, x.view(), p.view());
        assert!((tau - 0.5 / 100.0).abs() < 1e-15);
    }
}
