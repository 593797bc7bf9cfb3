use crate::{modulus::BarrettModulus, reduce::RingReduce, AlgebraError};

/// For ease of introduction we use `n` for `degree` and `p` for prime number.
///
/// Let `n` be a power of 2 and `p` a prime with `p ≡ 1 (mod n)`.
///
/// This trait define the function to get the primitive `n`-th root of unity reduce `p`.
///
/// A candidate `g` is raised to `ω = g^((p-1)/n)`; `ω` is a primitive
/// `n`-th root exactly when `ω^(n/2) ≡ -1 (mod p)`.
pub trait PrimitiveRoot {
    /// Check if `root` is a primitive `degree`-th root of unity in integers reduce `p`.
    fn check_primitive_root(self, root: u64, log_degree: u32) -> bool;

    /// Try to get a primitive `degree`-th root of unity reduce `p`.
    fn try_primitive_root(self, log_degree: u32) -> Result<u64, AlgebraError>;

    /// Try to get the minimal primitive `degree`-th root of unity reduce `p`.
    fn try_minimal_primitive_root(self, log_degree: u32) -> Result<u64, AlgebraError>;
}

impl PrimitiveRoot for BarrettModulus {
    fn check_primitive_root(self, root: u64, log_degree: u32) -> bool {
        debug_assert!(log_degree > 0);
        let p = self.value();
        if root == 0 || root >= p {
            return false;
        }
        // ω^(n/2) ≡ -1 implies ω has order exactly n
        self.pow(root, 1 << (log_degree - 1)) == p - 1
    }

    fn try_primitive_root(self, log_degree: u32) -> Result<u64, AlgebraError> {
        let p = self.value();
        let degree = 1u64 << log_degree;
        let no_root = || AlgebraError::NoPrimitiveRoot { degree, modulus: p };

        if log_degree == 0 || (p - 1) % degree != 0 {
            return Err(no_root());
        }
        let quotient = (p - 1) / degree;

        // a quadratic non-residue appears among the first few candidates for any prime
        (2..p.min(1 << 20))
            .map(|g| self.pow(g, quotient))
            .find(|&root| self.check_primitive_root(root, log_degree))
            .ok_or_else(no_root)
    }

    fn try_minimal_primitive_root(self, log_degree: u32) -> Result<u64, AlgebraError> {
        let mut root = self.try_primitive_root(log_degree)?;

        let generator_sq = self.reduce_mul(root, root);
        let mut current = root;

        for _ in 0..(1u64 << (log_degree - 1)) {
            if current < root {
                root = current;
            }
            current = self.reduce_mul(current, generator_sq);
        }

        Ok(root)
    }
}
