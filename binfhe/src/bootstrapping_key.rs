use std::sync::Arc;

use fhe_core::{
    extract_accumulator, init_accumulator, lwe_modulus_switch, BlindRotate, BlindRotationKey,
    FHECoreError, LweCiphertext, LweKeySwitchingKey, LweSecretKey,
};
use rand::{CryptoRng, Rng};
use serde::{Deserialize, Serialize};

use crate::{BinFheParams, FHEError};

/// The public key material needed to evaluate gates.
///
/// It holds the blind rotation key (refreshing key) and the key switching key.
/// Neither part reveals the LWE secret key, so evaluation-only parties can hold it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BootstrappingKey {
    refresh: Arc<BlindRotationKey>,
    switch: Arc<LweKeySwitchingKey>,
}

impl BootstrappingKey {
    /// Assembles a [`BootstrappingKey`] from independently obtained parts.
    #[inline]
    pub fn new(refresh: Arc<BlindRotationKey>, switch: Arc<LweKeySwitchingKey>) -> Self {
        Self { refresh, switch }
    }

    /// Generates a [`BootstrappingKey`] for the LWE secret key `lwe_secret_key`
    /// and the ring secret key `ring_secret_key`.
    pub fn generate<R>(
        lwe_secret_key: &LweSecretKey,
        ring_secret_key: &LweSecretKey,
        params: &BinFheParams,
        rng: &mut R,
    ) -> Self
    where
        R: Rng + CryptoRng,
    {
        let refresh = BlindRotationKey::generate(lwe_secret_key, ring_secret_key, params.ring(), rng);
        let switch = LweKeySwitchingKey::generate(ring_secret_key, lwe_secret_key, params.lwe(), rng);
        Self::new(Arc::new(refresh), Arc::new(switch))
    }

    /// Returns a shared handle to the refreshing key.
    #[inline]
    pub fn refresh_key(&self) -> &Arc<BlindRotationKey> {
        &self.refresh
    }

    /// Returns a shared handle to the key switching key.
    #[inline]
    pub fn switch_key(&self) -> &Arc<LweKeySwitchingKey> {
        &self.switch
    }

    /// Checks that both parts fit `params`, headers first, then every table entry.
    pub fn check(&self, params: &BinFheParams) -> Result<(), FHEError> {
        let method = params.method();
        if self.refresh.method() != method {
            return Err(FHECoreError::MethodMismatch {
                expected: method,
                found: self.refresh.method(),
            }
            .into());
        }

        let gadget_digits = params.ring().gadget_basis().digit_count();
        let switch = &self.switch;
        let checks = [
            (params.lwe_dimension(), self.refresh.lwe_dimension()),
            (params.ring_dimension(), self.refresh.ring_dimension()),
            (gadget_digits, self.refresh.gadget_digit_count()),
            (params.ring_dimension(), switch.input_dimension()),
            (params.lwe_dimension(), switch.output_dimension()),
        ];
        if let Some(&(expected, found)) = checks.iter().find(|(e, f)| e != f) {
            return Err(FHECoreError::DimensionMismatch { expected, found }.into());
        }

        if let BlindRotationKey::Ap(key) = self.refresh.as_ref() {
            let basis = params.ring().refresh_basis();
            if key.refresh_basis() != basis {
                return Err(FHECoreError::BasisUnValid {
                    name: "Refreshing basis",
                    basis: key.refresh_basis().basis(),
                }
                .into());
            }
        }

        let lwe = params.lwe();
        if switch.modulus().value() != lwe.key_switching_modulus().value() {
            return Err(FHECoreError::KeySwitchingModulusUnValid(switch.modulus().value()).into());
        }
        if switch.basis() != lwe.key_switching_basis() {
            return Err(FHECoreError::BasisUnValid {
                name: "Key switching basis",
                basis: switch.basis().basis(),
            }
            .into());
        }

        self.refresh.check_shape(params.ring())?;
        switch.check_shape()?;

        Ok(())
    }

    /// Refreshes `cipher_text`, returning an encryption of 1 exactly when its
    /// phase lies outside `[threshold, threshold + q/2)`.
    ///
    /// The steps are blind rotation, extraction, `Q -> qKS` modulus switching,
    /// `N -> n` key switching and `qKS -> q` modulus switching.
    pub fn bootstrap(
        &self,
        cipher_text: &LweCiphertext,
        threshold: u64,
        params: &BinFheParams,
    ) -> Result<LweCiphertext, FHEError> {
        let ring = params.ring();

        let acc = init_accumulator(cipher_text.b(), threshold, ring);
        let acc = self.refresh.blind_rotate(acc, cipher_text.a(), ring);
        let extracted = extract_accumulator(&acc, ring);

        let switched = lwe_modulus_switch(
            &extracted,
            params.ring_modulus(),
            params.key_switching_modulus(),
        );
        let switched = self.switch.key_switch(&switched)?;

        Ok(lwe_modulus_switch(
            &switched,
            params.key_switching_modulus(),
            params.lwe_modulus(),
        ))
    }
}
