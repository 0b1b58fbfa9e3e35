//! 2x2 gate matrices used as per-level factors of a diagram.

use num_complex::Complex64;
use std::f64::consts::PI;

const ZERO: Complex64 = Complex64::new(0.0, 0.0);
const ONE: Complex64 = Complex64::new(1.0, 0.0);

/// A 2x2 matrix in row-major order.
///
/// The element order `[m00, m01, m10, m11]` matches the child order of a
/// diagram node (row bit, column bit).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GateMatrix {
    /// The matrix elements in row-major order: [[a, b], [c, d]].
    pub data: [Complex64; 4],
}

impl GateMatrix {
    /// Create a new 2x2 matrix.
    pub const fn new(a: Complex64, b: Complex64, c: Complex64, d: Complex64) -> Self {
        Self { data: [a, b, c, d] }
    }

    /// The identity matrix.
    pub const fn identity() -> Self {
        Self::new(ONE, ZERO, ZERO, ONE)
    }

    /// The matrix unit `|row⟩⟨col|`.
    pub fn unit(row: usize, col: usize) -> Self {
        let mut data = [ZERO; 4];
        data[2 * (row & 1) + (col & 1)] = ONE;
        Self { data }
    }

    /// Projector onto |0⟩.
    pub fn zero_projector() -> Self {
        Self::unit(0, 0)
    }

    /// Projector onto |1⟩.
    pub fn one_projector() -> Self {
        Self::unit(1, 1)
    }

    /// Hadamard.
    pub fn h() -> Self {
        let s = Complex64::new(1.0 / 2.0_f64.sqrt(), 0.0);
        Self::new(s, s, s, -s)
    }

    /// Pauli-X.
    pub fn x() -> Self {
        Self::new(ZERO, ONE, ONE, ZERO)
    }

    /// Pauli-Y.
    pub fn y() -> Self {
        Self::new(ZERO, Complex64::new(0.0, -1.0), Complex64::new(0.0, 1.0), ZERO)
    }

    /// Pauli-Z.
    pub fn z() -> Self {
        Self::new(ONE, ZERO, ZERO, -ONE)
    }

    /// S gate (sqrt(Z)).
    pub fn s() -> Self {
        Self::new(ONE, ZERO, ZERO, Complex64::new(0.0, 1.0))
    }

    /// S-dagger gate.
    pub fn sdg() -> Self {
        Self::new(ONE, ZERO, ZERO, Complex64::new(0.0, -1.0))
    }

    /// T gate (fourth root of Z).
    pub fn t() -> Self {
        Self::p(PI / 4.0)
    }

    /// T-dagger gate.
    pub fn tdg() -> Self {
        Self::p(-PI / 4.0)
    }

    /// sqrt(X) gate.
    pub fn sx() -> Self {
        let half = Complex64::new(0.5, 0.0);
        let half_i = Complex64::new(0.0, 0.5);
        Self::new(half + half_i, half - half_i, half - half_i, half + half_i)
    }

    /// sqrt(X)-dagger gate.
    pub fn sxdg() -> Self {
        let half = Complex64::new(0.5, 0.0);
        let half_i = Complex64::new(0.0, 0.5);
        Self::new(half - half_i, half + half_i, half + half_i, half - half_i)
    }

    /// RX rotation.
    pub fn rx(theta: f64) -> Self {
        let c = (theta / 2.0).cos();
        let s = (theta / 2.0).sin();
        Self::new(
            Complex64::new(c, 0.0),
            Complex64::new(0.0, -s),
            Complex64::new(0.0, -s),
            Complex64::new(c, 0.0),
        )
    }

    /// RY rotation.
    pub fn ry(theta: f64) -> Self {
        let c = (theta / 2.0).cos();
        let s = (theta / 2.0).sin();
        Self::new(
            Complex64::new(c, 0.0),
            Complex64::new(-s, 0.0),
            Complex64::new(s, 0.0),
            Complex64::new(c, 0.0),
        )
    }

    /// RZ rotation.
    pub fn rz(theta: f64) -> Self {
        Self::new(
            Complex64::from_polar(1.0, -theta / 2.0),
            ZERO,
            ZERO,
            Complex64::from_polar(1.0, theta / 2.0),
        )
    }

    /// Phase gate P(lambda).
    pub fn p(lambda: f64) -> Self {
        Self::new(ONE, ZERO, ZERO, Complex64::from_polar(1.0, lambda))
    }

    /// U gate U(theta, phi, lambda).
    pub fn u(theta: f64, phi: f64, lambda: f64) -> Self {
        let c = (theta / 2.0).cos();
        let s = (theta / 2.0).sin();
        Self::new(
            Complex64::new(c, 0.0),
            -Complex64::from_polar(s, lambda),
            Complex64::from_polar(s, phi),
            Complex64::from_polar(c, phi + lambda),
        )
    }

    /// `self - I`, the factor a controlled gate adds on its target.
    pub fn minus_identity(&self) -> Self {
        let [a, b, c, d] = self.data;
        Self::new(a - ONE, b, c, d - ONE)
    }

    /// Matrix product `self * other`.
    #[allow(clippy::many_single_char_names)]
    pub fn mul(&self, other: &Self) -> Self {
        let [a, b, c, d] = self.data;
        let [e, f, g, h] = other.data;
        Self::new(a * e + b * g, a * f + b * h, c * e + d * g, c * f + d * h)
    }

    /// Conjugate transpose.
    pub fn dagger(&self) -> Self {
        Self::new(
            self.data[0].conj(),
            self.data[2].conj(),
            self.data[1].conj(),
            self.data[3].conj(),
        )
    }

    /// Whether every element is within `tol` of `other`'s.
    pub fn approx_eq(&self, other: &Self, tol: f64) -> bool {
        self.data
            .iter()
            .zip(&other.data)
            .all(|(a, b)| (a - b).norm() <= tol)
    }
}

impl Default for GateMatrix {
    fn default() -> Self {
        Self::identity()
    }
}

impl std::ops::Mul for GateMatrix {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        GateMatrix::mul(&self, &rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOL: f64 = 1e-12;

    #[test]
    fn test_involutions() {
        let i = GateMatrix::identity();
        for g in [GateMatrix::h(), GateMatrix::x(), GateMatrix::y(), GateMatrix::z()] {
            assert!((g * g).approx_eq(&i, TOL));
        }
    }

    #[test]
    fn test_phase_family() {
        assert!((GateMatrix::t() * GateMatrix::t()).approx_eq(&GateMatrix::s(), TOL));
        assert!((GateMatrix::s() * GateMatrix::s()).approx_eq(&GateMatrix::z(), TOL));
        assert!((GateMatrix::sx() * GateMatrix::sx()).approx_eq(&GateMatrix::x(), TOL));
        assert!(GateMatrix::sdg().approx_eq(&GateMatrix::s().dagger(), TOL));
        assert!(GateMatrix::tdg().approx_eq(&GateMatrix::t().dagger(), TOL));
        assert!(GateMatrix::sxdg().approx_eq(&GateMatrix::sx().dagger(), TOL));
    }

    #[test]
    fn test_hzh_is_x() {
        let h = GateMatrix::h();
        assert!((h * GateMatrix::z() * h).approx_eq(&GateMatrix::x(), TOL));
    }

    #[test]
    fn test_u_inverse() {
        let u = GateMatrix::u(0.3, 1.1, -0.4);
        let inv = GateMatrix::u(-0.3, 0.4, -1.1);
        assert!((u * inv).approx_eq(&GateMatrix::identity(), TOL));
    }

    #[test]
    fn test_units() {
        let p0 = GateMatrix::zero_projector();
        let p1 = GateMatrix::one_projector();
        assert_eq!(p0.data[0], ONE);
        assert_eq!(p1.data[3], ONE);
        assert_eq!(GateMatrix::unit(0, 1).data[1], ONE);
        assert_eq!(GateMatrix::unit(1, 0).data[2], ONE);
        assert!(GateMatrix::x().minus_identity().approx_eq(
            &GateMatrix::new(-ONE, ONE, ONE, -ONE),
            TOL
        ));
    }
}
