//! Versioned byte encoding of parameters, keys and ciphertexts.
//!
//! Every object is written as `{ object name, version, payload }` with `bincode`.
//! The header is read before the payload, so a newer version is rejected
//! without interpreting any payload bytes.

use fhe_core::{BlindRotationKey, LweCiphertext, LweKeySwitchingKey, LweSecretKey};
use serde::{de::DeserializeOwned, Deserialize, Serialize};

use crate::{parameter::ParamsRecord, BinFheParams, BootstrappingKey, FHEError};

/// The newest serialization version this library writes and reads.
pub const SERIALIZATION_VERSION: u32 = 1;

#[derive(Serialize)]
struct EnvelopeRef<'a, T> {
    object: &'a str,
    version: u32,
    payload: &'a T,
}

#[derive(Deserialize)]
struct Header {
    object: String,
    version: u32,
}

#[derive(Deserialize)]
struct Envelope<T> {
    #[allow(dead_code)]
    object: String,
    #[allow(dead_code)]
    version: u32,
    payload: T,
}

/// Objects with a versioned byte encoding.
pub trait Serializable: Serialize + DeserializeOwned {
    /// The name written into the header.
    const OBJECT_NAME: &'static str;

    /// Encodes `self` with the current version.
    fn to_bytes(&self) -> Result<Vec<u8>, FHEError> {
        Ok(bincode::serialize(&EnvelopeRef {
            object: Self::OBJECT_NAME,
            version: SERIALIZATION_VERSION,
            payload: self,
        })?)
    }

    /// Decodes an object written by [`Serializable::to_bytes`].
    fn from_bytes(bytes: &[u8]) -> Result<Self, FHEError> {
        decode_payload(bytes, Self::OBJECT_NAME)
    }
}

/// Checks the header, then decodes the payload as `T`.
fn decode_payload<T: DeserializeOwned>(bytes: &[u8], object: &'static str) -> Result<T, FHEError> {
    let header: Header = bincode::deserialize(bytes)?;
    if header.version > SERIALIZATION_VERSION {
        return Err(FHEError::Version {
            object: header.object,
            found: header.version,
            supported: SERIALIZATION_VERSION,
        });
    }
    if header.object != object {
        return Err(FHEError::UnexpectedObject {
            expected: object,
            found: header.object,
        });
    }
    let envelope: Envelope<T> = bincode::deserialize(bytes)?;
    Ok(envelope.payload)
}

impl Serializable for BinFheParams {
    const OBJECT_NAME: &'static str = "BinFheParams";

    /// Decodes the raw numbers, then checks them like [`BinFheParams::new`].
    fn from_bytes(bytes: &[u8]) -> Result<Self, FHEError> {
        let record: ParamsRecord = decode_payload(bytes, Self::OBJECT_NAME)?;
        BinFheParams::new(record.parameters, record.method)
    }
}

impl Serializable for LweSecretKey {
    const OBJECT_NAME: &'static str = "LweSecretKey";
}

impl Serializable for LweCiphertext {
    const OBJECT_NAME: &'static str = "LweCiphertext";
}

impl Serializable for LweKeySwitchingKey {
    const OBJECT_NAME: &'static str = "LweKeySwitchingKey";
}

impl Serializable for BlindRotationKey {
    const OBJECT_NAME: &'static str = "BlindRotationKey";
}

impl Serializable for BootstrappingKey {
    const OBJECT_NAME: &'static str = "BootstrappingKey";
}

#[cfg(test)]
mod tests {
    use fhe_core::{BootstrapMethod, FHECoreError};

    use crate::BinFheParamSet;

    use super::*;

    #[test]
    fn test_header_checks() {
        let ct = LweCiphertext::new(vec![1, 2, 3], 4);
        let bytes = ct.to_bytes().unwrap();
        assert_eq!(LweCiphertext::from_bytes(&bytes).unwrap(), ct);

        assert!(matches!(
            LweSecretKey::from_bytes(&bytes),
            Err(FHEError::UnexpectedObject { .. })
        ));

        let newer = bincode::serialize(&EnvelopeRef {
            object: LweCiphertext::OBJECT_NAME,
            version: SERIALIZATION_VERSION + 1,
            payload: &ct,
        })
        .unwrap();
        assert!(matches!(
            LweCiphertext::from_bytes(&newer),
            Err(FHEError::Version { found, supported, .. })
                if found == SERIALIZATION_VERSION + 1 && supported == SERIALIZATION_VERSION
        ));

        // a newer version is rejected before the payload is read
        let mut truncated = newer.clone();
        truncated.truncate(truncated.len() - 8);
        assert!(matches!(
            LweCiphertext::from_bytes(&truncated),
            Err(FHEError::Version { .. })
        ));

        assert!(matches!(
            LweCiphertext::from_bytes(&bytes[..bytes.len() - 1]),
            Err(FHEError::Serialization(_))
        ));
    }

    #[test]
    fn test_params_are_checked_on_load() {
        let params =
            BinFheParams::new(*BinFheParamSet::Toy.const_parameters(), BootstrapMethod::Ap)
                .unwrap();
        let bytes = params.to_bytes().unwrap();
        assert_eq!(BinFheParams::from_bytes(&bytes).unwrap(), params);

        let mut raw = *params.const_parameters();
        raw.ring_dimension = 500;
        let bad = bincode::serialize(&EnvelopeRef {
            object: BinFheParams::OBJECT_NAME,
            version: SERIALIZATION_VERSION,
            payload: &(raw, BootstrapMethod::Ap),
        })
        .unwrap();
        assert!(matches!(
            BinFheParams::from_bytes(&bad),
            Err(FHEError::Parameter(FHECoreError::RingDimensionUnValid(500)))
        ));

        // plain serde still refuses the record, with its own error type
        let payload = bincode::serialize(&(raw, BootstrapMethod::Ap)).unwrap();
        assert!(bincode::deserialize::<BinFheParams>(&payload).is_err());
    }
}
