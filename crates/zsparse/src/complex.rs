//! Complex scalar used throughout the kernel.
//!
//! Division, magnitude and square root are computed in scaled form so that
//! intermediate values do not overflow or underflow when the result itself
//! is representable.

use std::fmt;
use std::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign};

use num_complex::Complex64;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Complex {
    pub re: f64,
    pub im: f64,
}

impl Complex {
    pub const ZERO: Complex = Complex { re: 0.0, im: 0.0 };
    pub const ONE: Complex = Complex { re: 1.0, im: 0.0 };

    #[inline]
    pub const fn new(re: f64, im: f64) -> Self {
        Self { re, im }
    }

    #[inline]
    pub const fn from_real(re: f64) -> Self {
        Self { re, im: 0.0 }
    }

    #[inline]
    pub fn conj(self) -> Self {
        Self::new(self.re, -self.im)
    }

    #[inline]
    pub fn is_zero(self) -> bool {
        self.re == 0.0 && self.im == 0.0
    }

    /// `re² + im²`, unscaled. Only use where overflow cannot matter.
    #[inline]
    pub fn norm_sqr(self) -> f64 {
        self.re * self.re + self.im * self.im
    }

    /// Magnitude `max · sqrt(1 + (min/max)²)`.
    pub fn abs(self) -> f64 {
        let ar = self.re.abs();
        let ai = self.im.abs();
        let (big, small) = if ar >= ai { (ar, ai) } else { (ai, ar) };
        if big == 0.0 {
            return 0.0;
        }
        if small == 0.0 {
            return big;
        }
        let r = small / big;
        big * (1.0 + r * r).sqrt()
    }

    /// Unit-modulus factor `x / |x|`, or one for zero.
    pub fn phase(self) -> Self {
        let a = self.abs();
        if a == 0.0 { Self::ONE } else { self / a }
    }

    /// Principal square root.
    pub fn sqrt(self) -> Self {
        let r = self.abs();
        if r == 0.0 {
            return Self::ZERO;
        }
        if self.re > 0.0 {
            let t = (0.5 * (r + self.re)).sqrt();
            Self::new(t, 0.5 * self.im / t)
        } else {
            let mut t = (0.5 * (r - self.re)).sqrt();
            if self.im < 0.0 {
                t = -t;
            }
            Self::new(0.5 * self.im / t, t)
        }
    }

    /// `|self - other| <= |tol|`
    pub fn approx_eq(self, other: Self, tol: f64) -> bool {
        (self - other).abs() <= tol.abs()
    }
}

impl From<f64> for Complex {
    fn from(re: f64) -> Self {
        Self::from_real(re)
    }
}

impl From<Complex64> for Complex {
    fn from(z: Complex64) -> Self {
        Self::new(z.re, z.im)
    }
}

impl From<Complex> for Complex64 {
    fn from(z: Complex) -> Self {
        Complex64::new(z.re, z.im)
    }
}

impl fmt::Display for Complex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.re, self.im)
    }
}

impl Add for Complex {
    type Output = Complex;
    #[inline]
    fn add(self, rhs: Complex) -> Complex {
        Complex::new(self.re + rhs.re, self.im + rhs.im)
    }
}

impl Sub for Complex {
    type Output = Complex;
    #[inline]
    fn sub(self, rhs: Complex) -> Complex {
        Complex::new(self.re - rhs.re, self.im - rhs.im)
    }
}

impl Neg for Complex {
    type Output = Complex;
    #[inline]
    fn neg(self) -> Complex {
        Complex::new(-self.re, -self.im)
    }
}

impl Mul for Complex {
    type Output = Complex;
    #[inline]
    fn mul(self, rhs: Complex) -> Complex {
        Complex::new(
            self.re * rhs.re - self.im * rhs.im,
            self.im * rhs.re + self.re * rhs.im,
        )
    }
}

impl Mul<f64> for Complex {
    type Output = Complex;
    #[inline]
    fn mul(self, rhs: f64) -> Complex {
        Complex::new(self.re * rhs, self.im * rhs)
    }
}

impl Div for Complex {
    type Output = Complex;

    /// Smith's algorithm: scale through by the larger component of the
    /// divisor.
    fn div(self, rhs: Complex) -> Complex {
        let (a, b) = (self.re, self.im);
        let (c, d) = (rhs.re, rhs.im);
        if c.abs() >= d.abs() {
            let r = d / c;
            let den = c + r * d;
            Complex::new((a + b * r) / den, (b - a * r) / den)
        } else {
            let r = c / d;
            let den = r * c + d;
            Complex::new((a * r + b) / den, (b * r - a) / den)
        }
    }
}

impl Div<f64> for Complex {
    type Output = Complex;
    #[inline]
    fn div(self, rhs: f64) -> Complex {
        Complex::new(self.re / rhs, self.im / rhs)
    }
}

impl AddAssign for Complex {
    #[inline]
    fn add_assign(&mut self, rhs: Complex) {
        *self = *self + rhs;
    }
}

impl SubAssign for Complex {
    #[inline]
    fn sub_assign(&mut self, rhs: Complex) {
        *self = *self - rhs;
    }
}

impl MulAssign for Complex {
    #[inline]
    fn mul_assign(&mut self, rhs: Complex) {
        *self = *self * rhs;
    }
}

impl DivAssign for Complex {
    #[inline]
    fn div_assign(&mut self, rhs: Complex) {
        *self = *self / rhs;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const TOL: f64 = 1e-12;

    #[test]
    fn arithmetic_basics() {
        let x = Complex::new(1.0, 2.0);
        let y = Complex::new(3.0, -1.0);
        assert_eq!(x + y, Complex::new(4.0, 1.0));
        assert_eq!(x - y, Complex::new(-2.0, 3.0));
        assert_eq!(x * y, Complex::new(5.0, 5.0));
        assert_eq!(x * 2.0, Complex::new(2.0, 4.0));
        assert_eq!(-x, Complex::new(-1.0, -2.0));
        assert_eq!(x.conj(), Complex::new(1.0, -2.0));
    }

    #[rstest]
    #[case(Complex::new(5.0, 5.0), Complex::new(3.0, -1.0), Complex::new(1.0, 2.0))]
    #[case(Complex::new(1.0, 0.0), Complex::new(0.0, 1.0), Complex::new(0.0, -1.0))]
    #[case(Complex::new(4.0, 0.0), Complex::new(2.0, 0.0), Complex::new(2.0, 0.0))]
    #[case(Complex::new(-2.0, 6.0), Complex::new(1.0, 3.0), Complex::new(1.6, 1.2))]
    fn division(#[case] a: Complex, #[case] b: Complex, #[case] expected: Complex) {
        assert!((a / b).approx_eq(expected, TOL), "{} / {} = {}", a, b, a / b);
    }

    #[test]
    fn division_does_not_overflow() {
        let big = 1e300;
        let q = Complex::new(big, big) / Complex::new(big, big);
        assert!(q.approx_eq(Complex::ONE, TOL));
    }

    #[test]
    fn abs_is_scaled() {
        assert_eq!(Complex::new(3.0, 4.0).abs(), 5.0);
        assert_eq!(Complex::ZERO.abs(), 0.0);
        assert_eq!(Complex::new(0.0, -2.0).abs(), 2.0);
        // naive sqrt(re² + im²) overflows to inf here
        let a = Complex::new(3e200, 4e200).abs();
        assert!((a - 5e200).abs() <= 5e200 * 1e-15);
        let a = Complex::new(3e-200, 4e-200).abs();
        assert!((a - 5e-200).abs() <= 5e-200 * 1e-15);
    }

    #[rstest]
    #[case(Complex::new(4.0, 0.0), Complex::new(2.0, 0.0))]
    #[case(Complex::new(-4.0, 0.0), Complex::new(0.0, 2.0))]
    #[case(Complex::new(0.0, 2.0), Complex::new(1.0, 1.0))]
    #[case(Complex::new(0.0, -2.0), Complex::new(1.0, -1.0))]
    #[case(Complex::new(3.0, 4.0), Complex::new(2.0, 1.0))]
    #[case(Complex::new(-3.0, -4.0), Complex::new(1.0, -2.0))]
    #[case(Complex::ZERO, Complex::ZERO)]
    fn principal_sqrt(#[case] x: Complex, #[case] expected: Complex) {
        let y = x.sqrt();
        assert!(y.approx_eq(expected, TOL), "sqrt{} = {}", x, y);
        assert!((y * y).approx_eq(x, 1e-11));
    }

    #[test]
    fn approx_eq_uses_absolute_tolerance() {
        let x = Complex::new(1.0, 1.0);
        let y = Complex::new(1.0, 1.5);
        assert!(x.approx_eq(y, 0.5));
        assert!(x.approx_eq(y, -0.5));
        assert!(!x.approx_eq(y, 0.49));
    }

    #[test]
    fn converts_to_and_from_complex64() {
        let z = Complex::new(1.5, -0.25);
        let w: Complex64 = z.into();
        assert_eq!(w, Complex64::new(1.5, -0.25));
        assert_eq!(Complex::from(w * w), z * z);
    }

    #[test]
    fn phase_of_zero_is_one() {
        assert_eq!(Complex::ZERO.phase(), Complex::ONE);
        assert!(Complex::new(0.0, -3.0).phase().approx_eq(Complex::new(0.0, -1.0), TOL));
    }
}
