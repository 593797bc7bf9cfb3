use algebra::arith::ntt_prime;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use super::ConstParameters;

/// Named parameter sets.
///
/// `Opt` variants lower the LWE dimension for speed at the same security target,
/// `Q` variants target quantum security levels. `Toy` offers no security.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BinFheParamSet {
    /// No security, for fast tests.
    Toy,
    /// More than 100 bits of classical security.
    Medium,
    /// 128 bits of classical security, tuned for AP.
    Std128Ap,
    /// 128 bits of classical security, tuned for AP with a smaller LWE dimension.
    Std128ApOpt,
    /// 128 bits of classical security.
    Std128,
    /// 128 bits of classical security with a smaller LWE dimension.
    Std128Opt,
    /// 192 bits of classical security.
    Std192,
    /// 192 bits of classical security with a smaller LWE dimension.
    Std192Opt,
    /// 256 bits of classical security.
    Std256,
    /// 256 bits of classical security with a smaller LWE dimension.
    Std256Opt,
    /// 128 bits of quantum security.
    Std128Q,
    /// 128 bits of quantum security with a smaller LWE dimension.
    Std128QOpt,
    /// 192 bits of quantum security.
    Std192Q,
    /// 192 bits of quantum security with a smaller LWE dimension.
    Std192QOpt,
    /// 256 bits of quantum security.
    Std256Q,
    /// 256 bits of quantum security with a smaller LWE dimension.
    Std256QOpt,
}

impl BinFheParamSet {
    /// Every parameter set, in catalog order.
    pub const ALL: [BinFheParamSet; 16] = [
        BinFheParamSet::Toy,
        BinFheParamSet::Medium,
        BinFheParamSet::Std128Ap,
        BinFheParamSet::Std128ApOpt,
        BinFheParamSet::Std128,
        BinFheParamSet::Std128Opt,
        BinFheParamSet::Std192,
        BinFheParamSet::Std192Opt,
        BinFheParamSet::Std256,
        BinFheParamSet::Std256Opt,
        BinFheParamSet::Std128Q,
        BinFheParamSet::Std128QOpt,
        BinFheParamSet::Std192Q,
        BinFheParamSet::Std192QOpt,
        BinFheParamSet::Std256Q,
        BinFheParamSet::Std256QOpt,
    ];

    /// Returns the raw numbers of this parameter set.
    #[inline]
    pub fn const_parameters(self) -> &'static ConstParameters {
        &CATALOG[self as usize]
    }
}

/// `key_switching_modulus == None` means the key switching runs modulo **Q**.
#[allow(clippy::too_many_arguments)]
fn entry(
    ring_modulus_bits: u32,
    ring_dimension: usize,
    lwe_dimension: usize,
    lwe_modulus: u64,
    key_switching_modulus: Option<u64>,
    key_switching_basis: u64,
    gadget_basis: u64,
    refresh_basis: u64,
) -> ConstParameters {
    let ring_modulus = ntt_prime(ring_modulus_bits, (ring_dimension as u64) << 1)
        .expect("every catalog entry has an NTT friendly ring modulus");
    ConstParameters {
        lwe_dimension,
        ring_dimension,
        lwe_modulus,
        ring_modulus,
        key_switching_modulus: key_switching_modulus.unwrap_or(ring_modulus),
        noise_standard_deviation: 3.19,
        key_switching_basis,
        gadget_basis,
        refresh_basis,
    }
}

static CATALOG: Lazy<Vec<ConstParameters>> = Lazy::new(|| {
    vec![
        // Toy
        entry(27, 512, 64, 512, None, 25, 1 << 9, 23),
        // Medium
        entry(28, 1024, 422, 1024, Some(1 << 14), 1 << 7, 1 << 10, 32),
        // Std128Ap
        entry(27, 1024, 512, 1024, Some(1 << 14), 1 << 5, 1 << 9, 32),
        // Std128ApOpt
        entry(27, 1024, 503, 1024, Some(1 << 14), 1 << 5, 1 << 9, 32),
        // Std128
        entry(27, 1024, 512, 1024, Some(1 << 14), 1 << 5, 1 << 7, 32),
        // Std128Opt
        entry(27, 1024, 446, 1024, Some(1 << 14), 1 << 5, 1 << 7, 32),
        // Std192
        entry(37, 2048, 1024, 1024, Some(1 << 15), 32, 1 << 13, 32),
        // Std192Opt
        entry(37, 2048, 805, 1024, Some(1 << 15), 32, 1 << 13, 32),
        // Std256
        entry(29, 2048, 1024, 2048, Some(1 << 14), 1 << 7, 1 << 8, 46),
        // Std256Opt
        entry(29, 2048, 990, 2048, Some(1 << 14), 1 << 7, 1 << 8, 46),
        // Std128Q
        entry(50, 2048, 1024, 1024, Some(1 << 15), 32, 1 << 25, 32),
        // Std128QOpt
        entry(50, 2048, 585, 1024, Some(1 << 15), 32, 1 << 25, 32),
        // Std192Q
        entry(35, 2048, 1024, 1024, Some(1 << 15), 32, 1 << 12, 32),
        // Std192QOpt
        entry(35, 2048, 875, 1024, Some(1 << 15), 32, 1 << 12, 32),
        // Std256Q
        entry(27, 2048, 2048, 1024, Some(1 << 16), 16, 1 << 7, 32),
        // Std256QOpt
        entry(27, 2048, 1225, 1024, Some(1 << 16), 16, 1 << 7, 32),
    ]
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_order() {
        assert_eq!(CATALOG.len(), BinFheParamSet::ALL.len());
        for (i, set) in BinFheParamSet::ALL.into_iter().enumerate() {
            assert_eq!(set as usize, i);
        }

        let toy = BinFheParamSet::Toy.const_parameters();
        assert_eq!(toy.key_switching_modulus, toy.ring_modulus);
        assert!(toy.ring_modulus < 1 << 27);

        let std128 = BinFheParamSet::Std128.const_parameters();
        assert_eq!(
            (std128.lwe_dimension, std128.ring_dimension, std128.lwe_modulus),
            (512, 1024, 1024)
        );
        assert_eq!(std128.gadget_basis, 1 << 7);
    }
}
