use crate::LweCiphertext;

/// Rounds `value * modulus_out / modulus_in` to the nearest integer, modulo `modulus_out`.
#[inline]
pub fn modulus_switch_value(value: u64, modulus_in: u64, modulus_out: u64) -> u64 {
    let numerator = value as u128 * modulus_out as u128 + (modulus_in as u128 >> 1);
    ((numerator / modulus_in as u128) % modulus_out as u128) as u64
}

/// Switches every component of `cipher_text` from `modulus_in` to `modulus_out`.
///
/// The phase is scaled by `modulus_out / modulus_in`, with a rounding error
/// bounded by `(1 + ||s||_1) / 2`.
pub fn lwe_modulus_switch(
    cipher_text: &LweCiphertext,
    modulus_in: u64,
    modulus_out: u64,
) -> LweCiphertext {
    let a = cipher_text
        .a()
        .iter()
        .map(|&v| modulus_switch_value(v, modulus_in, modulus_out))
        .collect();
    let b = modulus_switch_value(cipher_text.b(), modulus_in, modulus_out);
    LweCiphertext::new(a, b)
}
