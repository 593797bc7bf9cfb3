//! Scaling between the plaintext space `Z_p` and the cipher space `Z_q`.

use crate::FHECoreError;

/// Checks that `plain_modulus` is at least 2 and divides `cipher_modulus`.
#[inline]
pub fn check_plain_modulus(plain_modulus: u64, cipher_modulus: u64) -> Result<(), FHECoreError> {
    if plain_modulus < 2 || plain_modulus > cipher_modulus || cipher_modulus % plain_modulus != 0 {
        return Err(FHECoreError::PlainModulusUnValid {
            plain_modulus,
            cipher_modulus,
        });
    }
    Ok(())
}

/// Returns `message * (q / p)`.
#[inline]
pub fn encode(message: u64, plain_modulus: u64, cipher_modulus: u64) -> Result<u64, FHECoreError> {
    check_plain_modulus(plain_modulus, cipher_modulus)?;
    if message >= plain_modulus {
        return Err(FHECoreError::MessageOutOfRange {
            message,
            plain_modulus,
        });
    }
    Ok(message * (cipher_modulus / plain_modulus))
}

/// Returns `round(phase / (q / p)) mod p`.
#[inline]
pub fn decode(phase: u64, plain_modulus: u64, cipher_modulus: u64) -> Result<u64, FHECoreError> {
    check_plain_modulus(plain_modulus, cipher_modulus)?;
    let delta = cipher_modulus / plain_modulus;
    Ok(((phase + (delta >> 1)) / delta) % plain_modulus)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_decode() {
        let q = 1024;
        assert_eq!(encode(1, 4, q), Ok(256));
        assert_eq!(encode(3, 8, q), Ok(384));
        assert!(encode(4, 4, q).is_err());
        assert!(encode(0, 3, q).is_err());
        assert!(encode(0, 1, q).is_err());

        assert_eq!(decode(250, 4, q), Ok(1));
        assert_eq!(decode(1020, 4, q), Ok(0));
        assert_eq!(decode(127, 4, q), Ok(0));
        assert_eq!(decode(128, 4, q), Ok(1));
        assert_eq!(decode(1023, 1024, q), Ok(1023));
    }
}
