//! Curve generators: pure functions from scalar parameters to ordered
//! vertex sequences.
//!
//! All generators sample the angle domain with `phi = lerp(min, max,
//! i / n)` so the upper bound is approached but never reached, keeping
//! the sample spacing uniform for any `n`. Each call tags every emitted
//! vertex with the caller-supplied color and z offset.

use super::{ArchimedeanParams, BernoulliParams, FermatParams, Vertex};

#[inline]
fn lerp(a: f32, b: f32, f: f32) -> f32 {
    a + f * (b - a)
}

#[inline]
fn polar_vertex(r: f32, phi: f32, z: f32, color: [f32; 4]) -> Vertex {
    Vertex::new([r * phi.cos(), r * phi.sin(), z], color)
}

/// Archimedean spiral: `r = a * phi`, `phi` sampled over
/// `[phi_min, phi_max)`.
///
/// Produces exactly `samples` vertices.
#[must_use]
pub fn archimedean(params: &ArchimedeanParams, samples: usize) -> Vec<Vertex> {
    let n = samples as f32;
    (0..samples)
        .map(|i| {
            let phi = lerp(params.phi_min, params.phi_max, i as f32 / n);
            polar_vertex(params.a * phi, phi, params.z_offset, params.color)
        })
        .collect()
}

/// Fermat spiral: `r = +/- a * sqrt(phi)`, both branches.
///
/// The negative branch is emitted in reverse angular order followed by
/// the positive branch in forward order, so the combined sequence passes
/// continuously through the origin when drawn as a line strip. Produces
/// exactly `samples` vertices total across the two branches. Angles
/// below zero are clamped to zero before the square root.
#[must_use]
pub fn fermat(params: &FermatParams, samples: usize) -> Vec<Vertex> {
    let half = samples / 2;
    let denom = half.max(1) as f32;
    let mut vertices = Vec::with_capacity(samples);

    // Negative branch, outermost sample first.
    for i in (0..half).rev() {
        let phi = lerp(params.phi_min, params.phi_max, i as f32 / denom);
        let r = -params.a * phi.max(0.0).sqrt();
        vertices.push(polar_vertex(r, phi, params.z_offset, params.color));
    }
    // Positive branch. Picks up the extra sample when `samples` is odd.
    for i in 0..(samples - half) {
        let phi = lerp(params.phi_min, params.phi_max, i as f32 / denom);
        let r = params.a * phi.max(0.0).sqrt();
        vertices.push(polar_vertex(r, phi, params.z_offset, params.color));
    }

    vertices
}

/// Lemniscate of Bernoulli: `r^2 = a^2 * cos(scale * phi)`, `phi`
/// sampled over `[phi_min, phi_max)`.
///
/// Where the radicand `a^2 * cos(scale * phi)` is negative the radius is
/// clamped to zero, collapsing the sample onto the origin instead of
/// producing a NaN. Produces exactly `samples` vertices.
#[must_use]
pub fn bernoulli(params: &BernoulliParams, samples: usize) -> Vec<Vertex> {
    let n = samples as f32;
    let scale = params.scale as f32;
    let a_sq = params.a * params.a;
    (0..samples)
        .map(|i| {
            let phi = lerp(params.phi_min, params.phi_max, i as f32 / n);
            let radicand = a_sq * (scale * phi).cos();
            let r = radicand.max(0.0).sqrt();
            polar_vertex(r, phi, params.z_offset, params.color)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use std::f32::consts::PI;

    use super::*;

    fn radius(v: &Vertex) -> f32 {
        (v.position[0] * v.position[0] + v.position[1] * v.position[1]).sqrt()
    }

    #[test]
    fn archimedean_is_deterministic() {
        let params = ArchimedeanParams::default();
        assert_eq!(archimedean(&params, 1000), archimedean(&params, 1000));
    }

    #[test]
    fn fermat_is_deterministic() {
        let params = FermatParams::default();
        assert_eq!(fermat(&params, 1000), fermat(&params, 1000));
    }

    #[test]
    fn bernoulli_is_deterministic() {
        let params = BernoulliParams::default();
        assert_eq!(bernoulli(&params, 1000), bernoulli(&params, 1000));
    }

    #[test]
    fn generators_produce_exact_counts() {
        let a = ArchimedeanParams::default();
        let f = FermatParams::default();
        let b = BernoulliParams::default();
        for n in [1, 2, 7, 100, 1001] {
            assert_eq!(archimedean(&a, n).len(), n);
            assert_eq!(fermat(&f, n).len(), n);
            assert_eq!(bernoulli(&b, n).len(), n);
        }
    }

    #[test]
    fn archimedean_endpoints_match_formula() {
        // Scenario: a=0.33, phi in [0, 31.4), N=100000.
        let params = ArchimedeanParams {
            phi_min: 0.0,
            phi_max: 31.4,
            a: 0.33,
            z_offset: 1.5,
            ..ArchimedeanParams::default()
        };
        let n = 100_000;
        let verts = archimedean(&params, n);
        assert_eq!(verts.len(), n);

        // First vertex sits at the origin (phi = 0 => r = 0).
        let first = &verts[0];
        assert!(radius(first) < 1e-6);
        assert!((first.position[2] - 1.5).abs() < 1e-6);

        // Last vertex radius approaches a * phi_max.
        let last = &verts[n - 1];
        let expected = 0.33 * 31.4 * ((n - 1) as f32 / n as f32);
        assert!((radius(last) - expected).abs() < 1e-3);
        assert!((radius(last) - 10.36).abs() < 0.01);
    }

    #[test]
    fn fermat_branches_meet_at_origin() {
        let params = FermatParams {
            phi_min: 0.0,
            phi_max: PI * 10.0,
            a: 2.5,
            ..FermatParams::default()
        };
        let n = 1000;
        let verts = fermat(&params, n);
        let half = n / 2;

        // Last negative-branch vertex and first positive-branch vertex
        // are both the phi -> 0+ sample: no jump across the boundary.
        let neg_end = &verts[half - 1];
        let pos_start = &verts[half];
        assert!(radius(neg_end) < 1e-4);
        assert!(radius(pos_start) < 1e-4);

        let dx = neg_end.position[0] - pos_start.position[0];
        let dy = neg_end.position[1] - pos_start.position[1];
        assert!((dx * dx + dy * dy).sqrt() < 1e-4);
    }

    #[test]
    fn fermat_odd_count_is_exact() {
        let verts = fermat(&FermatParams::default(), 999);
        assert_eq!(verts.len(), 999);
    }

    #[test]
    fn bernoulli_radius_at_known_angles() {
        // Scenario: a=5, phi in [-pi/2, pi/2), scale=2.
        let params = BernoulliParams {
            phi_min: -PI / 2.0,
            phi_max: PI / 2.0,
            a: 5.0,
            scale: 2,
            ..BernoulliParams::default()
        };
        let verts = bernoulli(&params, 8);

        // i=4 => phi = 0 => r = a.
        assert!((radius(&verts[4]) - 5.0).abs() < 1e-4);
        // i=2 => phi = -pi/4, i=6 => phi = +pi/4 => cos(+-pi/2) = 0 => r = 0.
        assert!(radius(&verts[2]) < 1e-3);
        assert!(radius(&verts[6]) < 1e-3);
    }

    #[test]
    fn bernoulli_clamps_negative_radicand() {
        // Over a full turn with scale=2 half the domain has a negative
        // radicand; those samples collapse to the origin, never NaN.
        let params = BernoulliParams {
            phi_min: -PI,
            phi_max: PI,
            a: 5.0,
            scale: 2,
            ..BernoulliParams::default()
        };
        let verts = bernoulli(&params, 1000);
        assert!(verts
            .iter()
            .all(|v| v.position.iter().all(|c| c.is_finite())));
        assert!(verts.iter().any(|v| radius(v) < 1e-6));
    }

    #[test]
    fn color_and_z_are_uniform_per_call() {
        let params = ArchimedeanParams {
            color: [0.2, 0.4, 0.6, 0.8],
            z_offset: -3.0,
            ..ArchimedeanParams::default()
        };
        for v in archimedean(&params, 64) {
            assert_eq!(v.color, [0.2, 0.4, 0.6, 0.8]);
            assert!((v.position[2] + 3.0).abs() < 1e-6);
        }
    }
}
