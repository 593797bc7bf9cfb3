//! Building the test polynomial that starts a bootstrap and reading its result back.

use algebra::{Polynomial, RingReduce};
use lattice::Rlwe;

use crate::{LweCiphertext, RingGswParameters};

/// Builds the trivial accumulator `(0, m(X))` for the LWE body `b` and the threshold `q1`.
///
/// For `j` in `[0, q/2)` the coefficient of `X^{j * 2N/q}` is `-Q/8` when
/// `(b - j - q1) mod q < q/2` and `Q/8` otherwise; every other coefficient is zero.
/// After rotating by `-<a, s>` the constant coefficient is `-Q/8` exactly when
/// the phase `b - <a, s>` falls in `[q1, q1 + q/2)` modulo `q`.
pub fn init_accumulator(b: u64, threshold: u64, params: &RingGswParameters) -> Rlwe {
    let dimension = params.dimension();
    let factor = params.rotation_factor();
    let q = params.lwe_modulus();
    let half_q = q.value() >> 1;
    let ring_modulus = params.modulus();
    let amplitude = params.amplitude();
    let minus_amplitude = ring_modulus.reduce_neg(amplitude);

    let b = q.reduce(b);
    let threshold = q.reduce(threshold);

    let mut m = Polynomial::zero(dimension);
    for j in 0..half_q {
        let temp = q.reduce_sub(b, j);
        m[j as usize * factor] = if q.reduce_sub(temp, threshold) < half_q {
            minus_amplitude
        } else {
            amplitude
        };
    }

    Rlwe::new(Polynomial::zero(dimension), m)
}

/// Extracts the constant coefficient of `acc` as an LWE ciphertext modulo **Q**
/// under the ring secret, shifting its body by `Q/8`.
///
/// A constant coefficient of `∓Q/8` becomes a phase of `0` or `Q/4`.
pub fn extract_accumulator(acc: &Rlwe, params: &RingGswParameters) -> LweCiphertext {
    let modulus = params.modulus();
    let mut extracted = acc.extract_lwe(modulus);
    modulus.reduce_add_assign(extracted.b_mut(), params.amplitude());
    extracted
}
