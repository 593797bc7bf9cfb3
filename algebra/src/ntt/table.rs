use crate::{
    arith::PrimitiveRoot,
    modulus::{BarrettModulus, ShoupFactor},
    reduce::RingReduce,
    AlgebraError,
};

use super::NumberTheoryTransform;

/// This struct store the pre-computed data for the negacyclic number theory
/// transform and its inverse.
///
/// ## The structure members meet the following conditions:
///
/// 1. `n = 1 << log_n`
/// 1. `root^{n} ≡ -1 (mod modulus)`
/// 1. `n * inv_n ≡ 1 (mod modulus)`
/// 1. `root_powers[i] = root^{rev(i)}`, where `rev` reverses the `log_n` low bits.
/// 1. `inv_root_powers[i] = root^{-rev(i)}`.
///
/// The root is the minimal primitive `2n`-th root of unity, so two tables
/// built for the same `(modulus, n)` are identical.
#[derive(Debug, Clone)]
pub struct NttTable {
    root: u64,
    modulus: BarrettModulus,
    log_n: u32,
    n: usize,
    inv_n: ShoupFactor,
    root_powers: Vec<ShoupFactor>,
    inv_root_powers: Vec<ShoupFactor>,
}

impl NttTable {
    /// Creates a new [`NttTable`] for polynomials of dimension `2^log_n`.
    ///
    /// Fails if `2^(log_n+1)` does not divide `modulus - 1`.
    pub fn new(modulus: BarrettModulus, log_n: u32) -> Result<Self, AlgebraError> {
        let n = 1usize << log_n;
        let p = modulus.value();
        if log_n == 0 || log_n > 30 || (p - 1) % ((n as u64) << 1) != 0 {
            return Err(AlgebraError::NttTableErr {
                modulus: p,
                dimension: n,
            });
        }

        let root = modulus.try_minimal_primitive_root(log_n + 1)?;
        let inv_root = modulus.inv(root);

        let mut root_powers = vec![ShoupFactor::default(); n];
        let mut inv_root_powers = vec![ShoupFactor::default(); n];

        let mut power = 1;
        let mut inv_power = 1;
        for i in 0..n {
            let rev = i.reverse_bits() >> (usize::BITS - log_n);
            root_powers[rev] = ShoupFactor::new(power, p);
            inv_root_powers[rev] = ShoupFactor::new(inv_power, p);
            power = modulus.reduce_mul(power, root);
            inv_power = modulus.reduce_mul(inv_power, inv_root);
        }

        let inv_n = ShoupFactor::new(modulus.inv(n as u64 % p), p);

        Ok(Self {
            root,
            modulus,
            log_n,
            n,
            inv_n,
            root_powers,
            inv_root_powers,
        })
    }

    /// Returns the root of this [`NttTable`].
    #[inline]
    pub fn root(&self) -> u64 {
        self.root
    }

    /// Returns the modulus of this [`NttTable`].
    #[inline]
    pub fn modulus(&self) -> BarrettModulus {
        self.modulus
    }

    /// Returns the modulus value of this [`NttTable`].
    #[inline]
    pub fn modulus_value(&self) -> u64 {
        self.modulus.value()
    }

    /// Returns the log n of this [`NttTable`].
    #[inline]
    pub fn log_n(&self) -> u32 {
        self.log_n
    }

    /// Returns the polynomial dimension of this [`NttTable`].
    #[inline]
    pub fn dimension(&self) -> usize {
        self.n
    }
}

impl NumberTheoryTransform for NttTable {
    fn transform_slice(&self, values: &mut [u64]) {
        debug_assert_eq!(values.len(), self.n);
        let p = self.modulus.value();
        let modulus = self.modulus;

        let mut t = self.n;
        let mut m = 1;
        while m < self.n {
            t >>= 1;
            for (chunk, &s) in values
                .chunks_exact_mut(t << 1)
                .zip(&self.root_powers[m..m << 1])
            {
                let (lo, hi) = chunk.split_at_mut(t);
                for (x, y) in lo.iter_mut().zip(hi.iter_mut()) {
                    let u = *x;
                    let v = s.mul_reduce(*y, p);
                    *x = modulus.reduce_add(u, v);
                    *y = modulus.reduce_sub(u, v);
                }
            }
            m <<= 1;
        }
    }

    fn inverse_transform_slice(&self, values: &mut [u64]) {
        debug_assert_eq!(values.len(), self.n);
        let p = self.modulus.value();
        let modulus = self.modulus;

        let mut t = 1;
        let mut m = self.n;
        while m > 1 {
            let h = m >> 1;
            for (chunk, &s) in values
                .chunks_exact_mut(t << 1)
                .zip(&self.inv_root_powers[h..m])
            {
                let (lo, hi) = chunk.split_at_mut(t);
                for (x, y) in lo.iter_mut().zip(hi.iter_mut()) {
                    let u = *x;
                    let v = *y;
                    *x = modulus.reduce_add(u, v);
                    *y = s.mul_reduce(modulus.reduce_sub(u, v), p);
                }
            }
            t <<= 1;
            m = h;
        }

        values
            .iter_mut()
            .for_each(|v| *v = self.inv_n.mul_reduce(*v, p));
    }

    fn transform_monomial(&self, coeff: u64, degree: usize, values: &mut [u64]) {
        debug_assert!(degree < self.n << 1);
        values.fill(0);
        if degree < self.n {
            values[degree] = coeff;
        } else {
            values[degree - self.n] = self.modulus.reduce_neg(coeff);
        }
        self.transform_slice(values);
    }
}
