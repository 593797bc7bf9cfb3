use crate::AlgebraError;

const WITNESSES: [u64; 12] = [2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37];

#[inline]
fn mul_mod(a: u64, b: u64, m: u64) -> u64 {
    ((a as u128 * b as u128) % m as u128) as u64
}

fn pow_mod(mut base: u64, mut exp: u64, m: u64) -> u64 {
    let mut result = 1 % m;
    base %= m;
    while exp > 0 {
        if exp & 1 == 1 {
            result = mul_mod(result, base, m);
        }
        base = mul_mod(base, base, m);
        exp >>= 1;
    }
    result
}

/// Deterministic Miller-Rabin primality test, exact for every `u64`.
pub fn is_prime(n: u64) -> bool {
    if n < 2 {
        return false;
    }
    for &p in WITNESSES.iter() {
        if n % p == 0 {
            return n == p;
        }
    }

    let s = (n - 1).trailing_zeros();
    let d = (n - 1) >> s;

    'witness: for &a in WITNESSES.iter() {
        let mut x = pow_mod(a, d, n);
        if x == 1 || x == n - 1 {
            continue;
        }
        for _ in 1..s {
            x = mul_mod(x, x, n);
            if x == n - 1 {
                continue 'witness;
            }
        }
        return false;
    }
    true
}

/// Returns the largest prime `p < 2^bits` with `p ≡ 1 (mod order)`.
///
/// `order` is usually `2N` for a negacyclic NTT of dimension `N`.
pub fn ntt_prime(bits: u32, order: u64) -> Result<u64, AlgebraError> {
    let err = AlgebraError::NoNttPrime { bits, order };
    if !(2..=62).contains(&bits) || order == 0 {
        return Err(err);
    }

    let bound = 1u64 << bits;
    let mut candidate = (bound - 1) / order * order + 1;
    if candidate >= bound {
        candidate = match candidate.checked_sub(order) {
            Some(c) => c,
            None => return Err(err),
        };
    }

    while candidate > order {
        if is_prime(candidate) {
            return Ok(candidate);
        }
        candidate -= order;
    }
    Err(err)
}
