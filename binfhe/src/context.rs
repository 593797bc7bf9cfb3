//! The context orchestrating parameters, keys and gate evaluation.

use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc, Mutex, MutexGuard, PoisonError,
};

use algebra::RingReduce;
use fhe_core::{
    check_plain_modulus, decode, encode, BlindRotationKey, BootstrapMethod, FHECoreError,
    LweCiphertext, LweKeySwitchingKey, LweSecretKey,
};
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use serde::{Deserialize, Serialize};
use tracing::{info, trace};

use crate::{BinFheParamSet, BinFheParams, BinGate, BootstrappingKey, ConstParameters, FHEError};

/// The plaintext modulus of the boolean gate encoding, `Δ = q/4`.
pub const GATE_PLAIN_MODULUS: u64 = 4;

/// The lifecycle stages of a [`BinFheContext`], in increasing order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ContextState {
    /// No parameters yet.
    Uninitialized,
    /// Parameters are fixed.
    ParametersSet,
    /// A secret key has been generated.
    KeysGenerated,
    /// A bootstrapping key is installed, gates can be evaluated.
    BootstrappingReady,
}

/// Whether [`BinFheContext::encrypt`] refreshes the fresh ciphertext before returning it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OutputMode {
    /// Return the fresh encryption.
    #[default]
    Fresh,
    /// Bootstrap the fresh encryption before returning it.
    Bootstrapped,
}

/// The boolean FHE context.
///
/// It owns the parameters, the optional bootstrapping key and a cryptographically
/// secure generator seeded once from the operating system. Evaluation takes `&self`
/// and can run on many threads at once; key installation takes `&mut self`.
pub struct BinFheContext {
    params: Option<BinFheParams>,
    keys_generated: bool,
    bootstrapping_key: Option<BootstrappingKey>,
    rng: Mutex<ChaCha20Rng>,
    bootstrap_count: AtomicUsize,
}

impl Default for BinFheContext {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for BinFheContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BinFheContext")
            .field("state", &self.state())
            .field("params", &self.params)
            .field("bootstrap_count", &self.bootstrap_count())
            .finish_non_exhaustive()
    }
}

impl BinFheContext {
    /// Creates an uninitialized [`BinFheContext`].
    #[inline]
    pub fn new() -> Self {
        Self {
            params: None,
            keys_generated: false,
            bootstrapping_key: None,
            rng: Mutex::new(ChaCha20Rng::from_entropy()),
            bootstrap_count: AtomicUsize::new(0),
        }
    }

    /// Fixes the parameters from the catalog entry `set`.
    pub fn generate_context(
        &mut self,
        set: BinFheParamSet,
        method: BootstrapMethod,
    ) -> Result<(), FHEError> {
        self.install_params(*set.const_parameters(), method)?;
        info!(?set, ?method, "context generated");
        Ok(())
    }

    /// Fixes the parameters from the nine raw numbers.
    ///
    /// Only the structural conditions are checked; whether the noise stays below the
    /// decryption threshold is the caller's responsibility.
    #[allow(clippy::too_many_arguments)]
    pub fn generate_context_manual(
        &mut self,
        lwe_dimension: usize,
        ring_dimension: usize,
        lwe_modulus: u64,
        ring_modulus: u64,
        key_switching_modulus: u64,
        noise_standard_deviation: f64,
        key_switching_basis: u64,
        gadget_basis: u64,
        refresh_basis: u64,
        method: BootstrapMethod,
    ) -> Result<(), FHEError> {
        let raw = ConstParameters {
            lwe_dimension,
            ring_dimension,
            lwe_modulus,
            ring_modulus,
            key_switching_modulus,
            noise_standard_deviation,
            key_switching_basis,
            gadget_basis,
            refresh_basis,
        };
        self.install_params(raw, method)?;
        info!(?raw, ?method, "context generated from manual parameters");
        Ok(())
    }

    /// Fixes the parameters to [`BinFheParamSet::Std128`] with GINX.
    #[inline]
    pub fn generate_default_context(&mut self) -> Result<(), FHEError> {
        self.generate_context(BinFheParamSet::Std128, BootstrapMethod::Ginx)
    }

    fn install_params(
        &mut self,
        raw: ConstParameters,
        method: BootstrapMethod,
    ) -> Result<(), FHEError> {
        let current = self.state();
        if current != ContextState::Uninitialized {
            return Err(FHEError::State {
                operation: "GenerateBinFHEContext",
                required: ContextState::Uninitialized,
                current,
            });
        }
        self.params = Some(BinFheParams::new(raw, method)?);
        Ok(())
    }

    /// Returns the current lifecycle state.
    #[inline]
    pub fn state(&self) -> ContextState {
        if self.params.is_none() {
            ContextState::Uninitialized
        } else if self.bootstrapping_key.is_some() {
            ContextState::BootstrappingReady
        } else if self.keys_generated {
            ContextState::KeysGenerated
        } else {
            ContextState::ParametersSet
        }
    }

    /// Returns the parameters, if set.
    #[inline]
    pub fn params(&self) -> Option<&BinFheParams> {
        self.params.as_ref()
    }

    /// Returns how many bootstraps this context has run.
    #[inline]
    pub fn bootstrap_count(&self) -> usize {
        self.bootstrap_count.load(Ordering::Relaxed)
    }

    /// Resets the bootstrap counter to zero.
    #[inline]
    pub fn reset_bootstrap_count(&self) {
        self.bootstrap_count.store(0, Ordering::Relaxed);
    }

    fn require(
        &self,
        operation: &'static str,
        required: ContextState,
    ) -> Result<&BinFheParams, FHEError> {
        let current = self.state();
        match self.params.as_ref() {
            Some(params) if current >= required => Ok(params),
            _ => Err(FHEError::State {
                operation,
                required,
                current,
            }),
        }
    }

    fn require_bootstrapping(
        &self,
        operation: &'static str,
    ) -> Result<(&BinFheParams, &BootstrappingKey), FHEError> {
        let current = self.state();
        match (self.params.as_ref(), self.bootstrapping_key.as_ref()) {
            (Some(params), Some(key)) => Ok((params, key)),
            _ => Err(FHEError::State {
                operation,
                required: ContextState::BootstrappingReady,
                current,
            }),
        }
    }

    #[inline]
    fn rng(&self) -> MutexGuard<'_, ChaCha20Rng> {
        self.rng.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Generates a fresh LWE secret key of dimension **n**.
    pub fn key_gen(&mut self) -> Result<LweSecretKey, FHEError> {
        let dimension = self
            .require("KeyGen", ContextState::ParametersSet)?
            .lwe_dimension();
        let sk = LweSecretKey::generate(dimension, &mut *self.rng());
        self.keys_generated = true;
        Ok(sk)
    }

    /// Generates a fresh LWE secret key of dimension **N**.
    pub fn key_gen_n(&mut self) -> Result<LweSecretKey, FHEError> {
        let dimension = self
            .require("KeyGenN", ContextState::ParametersSet)?
            .ring_dimension();
        let sk = LweSecretKey::generate(dimension, &mut *self.rng());
        self.keys_generated = true;
        Ok(sk)
    }

    /// Encrypts `bit` with `Δ = q/4`.
    #[inline]
    pub fn encrypt(
        &self,
        sk: &LweSecretKey,
        bit: bool,
        output: OutputMode,
    ) -> Result<LweCiphertext, FHEError> {
        self.encrypt_with_modulus(sk, bit as u64, GATE_PLAIN_MODULUS, output)
    }

    /// Encrypts `message` in `Z_p` with `Δ = q/p`.
    ///
    /// [`OutputMode::Bootstrapped`] is only defined for the gate encoding `p = 4`.
    pub fn encrypt_with_modulus(
        &self,
        sk: &LweSecretKey,
        message: u64,
        plain_modulus: u64,
        output: OutputMode,
    ) -> Result<LweCiphertext, FHEError> {
        let params = self.require("Encrypt", ContextState::ParametersSet)?;
        check_secret_key(sk, params)?;
        let q = params.lwe().cipher_modulus();
        let scaled = encode(message, plain_modulus, q.value())?;

        if output == OutputMode::Bootstrapped {
            if plain_modulus != GATE_PLAIN_MODULUS {
                return Err(FHECoreError::PlainModulusUnValid {
                    plain_modulus,
                    cipher_modulus: q.value(),
                }
                .into());
            }
            self.require_bootstrapping("Encrypt")?;
        }

        let cipher_text = sk.encrypt(scaled, q, params.lwe().noise_distribution(), &mut *self.rng());

        match output {
            OutputMode::Fresh => Ok(cipher_text),
            OutputMode::Bootstrapped => self.bootstrap(&cipher_text),
        }
    }

    /// Decrypts a gate encoded ciphertext.
    ///
    /// The phase is decoded in `Z_4` and only `1` reads as `true`. The symbols `2` and `3`,
    /// which a fresh gate ciphertext only reaches through excess noise, read as `false`.
    /// Use [`BinFheContext::decrypt_with_modulus`] with `p = 4` to see the symbol itself.
    #[inline]
    pub fn decrypt(&self, sk: &LweSecretKey, cipher_text: &LweCiphertext) -> Result<bool, FHEError> {
        Ok(self.decrypt_with_modulus(sk, cipher_text, GATE_PLAIN_MODULUS)? == 1)
    }

    /// Decrypts to `Z_p` by rounding the phase to the nearest multiple of `q/p`.
    ///
    /// With a gate encoded ciphertext and `p = 4` this yields `0` or `1` when the
    /// noise is small. A wrong key gives a wrong value, never an error.
    pub fn decrypt_with_modulus(
        &self,
        sk: &LweSecretKey,
        cipher_text: &LweCiphertext,
        plain_modulus: u64,
    ) -> Result<u64, FHEError> {
        let params = self.require("Decrypt", ContextState::ParametersSet)?;
        check_secret_key(sk, params)?;
        check_cipher_text(cipher_text, params)?;
        let q = params.lwe().cipher_modulus();
        check_plain_modulus(plain_modulus, q.value())?;
        Ok(decode(sk.phase(cipher_text, q), plain_modulus, q.value())?)
    }

    /// Returns the noiseless encryption `(0, message * q/p)`, decryptable under every key.
    pub fn trivial_encrypt(
        &self,
        message: u64,
        plain_modulus: u64,
    ) -> Result<LweCiphertext, FHEError> {
        let params = self.require("TrivialEncrypt", ContextState::ParametersSet)?;
        let b = encode(message, plain_modulus, params.lwe_modulus())?;
        Ok(LweCiphertext::trivial(params.lwe_dimension(), b))
    }

    /// Generates a key switching key from the **N** dimensional `sk_n` to the
    /// **n** dimensional `sk`.
    pub fn key_switch_gen(
        &self,
        sk: &LweSecretKey,
        sk_n: &LweSecretKey,
    ) -> Result<LweKeySwitchingKey, FHEError> {
        let params = self.require("KeySwitchGen", ContextState::ParametersSet)?;
        check_secret_key(sk, params)?;
        check_dimension(params.ring_dimension(), sk_n.dimension())?;
        Ok(LweKeySwitchingKey::generate(
            sk_n,
            sk,
            params.lwe(),
            &mut *self.rng(),
        ))
    }

    /// Switches the **N** dimensional `cipher_text` modulo **qKS** to dimension **n**.
    pub fn key_switch(
        &self,
        cipher_text: &LweCiphertext,
        key: &LweKeySwitchingKey,
    ) -> Result<LweCiphertext, FHEError> {
        self.require("KeySwitch", ContextState::ParametersSet)?;
        Ok(key.key_switch(cipher_text)?)
    }

    /// Generates and installs the bootstrapping key for `sk`, with a fresh ring secret key.
    pub fn bt_key_gen(&mut self, sk: &LweSecretKey) -> Result<(), FHEError> {
        let params = self.require("BTKeyGen", ContextState::KeysGenerated)?;
        check_secret_key(sk, params)?;

        let key = {
            let mut rng = self.rng();
            let ring_sk = LweSecretKey::generate(params.ring_dimension(), &mut *rng);
            BootstrappingKey::generate(sk, &ring_sk, params, &mut *rng)
        };

        info!(method = ?params.method(), "bootstrapping key generated");
        self.bootstrapping_key = Some(key);
        Ok(())
    }

    /// Installs a bootstrapping key obtained elsewhere.
    ///
    /// The key is checked against the parameters first; on failure nothing changes.
    pub fn bt_key_load(&mut self, key: BootstrappingKey) -> Result<(), FHEError> {
        let params = self.require("BTKeyLoad", ContextState::ParametersSet)?;
        key.check(params)?;
        info!(method = ?params.method(), "bootstrapping key loaded");
        self.bootstrapping_key = Some(key);
        Ok(())
    }

    /// Discards the bootstrapping key, keeping the parameters.
    pub fn clear_bt_keys(&mut self) {
        if self.bootstrapping_key.take().is_some() {
            info!("bootstrapping key cleared");
        }
    }

    /// Returns the installed bootstrapping key.
    #[inline]
    pub fn bootstrapping_key(&self) -> Result<&BootstrappingKey, FHEError> {
        self.require_bootstrapping("BootstrappingKey")
            .map(|(_, key)| key)
    }

    /// Returns a shared handle to the refreshing key.
    #[inline]
    pub fn refresh_key(&self) -> Result<Arc<BlindRotationKey>, FHEError> {
        self.bootstrapping_key().map(|key| Arc::clone(key.refresh_key()))
    }

    /// Returns a shared handle to the key switching key.
    #[inline]
    pub fn switch_key(&self) -> Result<Arc<LweKeySwitchingKey>, FHEError> {
        self.bootstrapping_key().map(|key| Arc::clone(key.switch_key()))
    }

    fn bootstrap_with_threshold(
        &self,
        operation: &'static str,
        cipher_text: &LweCiphertext,
        threshold: u64,
    ) -> Result<LweCiphertext, FHEError> {
        let (params, key) = self.require_bootstrapping(operation)?;
        let result = key.bootstrap(cipher_text, threshold, params)?;
        let count = self.bootstrap_count.fetch_add(1, Ordering::Relaxed) + 1;
        trace!(operation, threshold, count, "bootstrap");
        Ok(result)
    }

    /// Evaluates `gate` on two gate encoded ciphertexts with a single bootstrap.
    pub fn eval_bin_gate(
        &self,
        gate: BinGate,
        c1: &LweCiphertext,
        c2: &LweCiphertext,
    ) -> Result<LweCiphertext, FHEError> {
        let (params, _) = self.require_bootstrapping("EvalBinGate")?;
        check_cipher_text(c1, params)?;
        check_cipher_text(c2, params)?;

        let q = params.lwe().cipher_modulus();
        let mut combined = c1.add_reduce_component_wise_ref(c2, q);
        if gate.is_doubled() {
            combined.mul_scalar_reduce_inplace(2, q);
        }

        self.bootstrap_with_threshold("EvalBinGate", &combined, gate.threshold(q.value()))
    }

    /// Returns `(-a, q/4 - b)`, which decrypts to the negated bit. No bootstrap runs.
    pub fn eval_not(&self, cipher_text: &LweCiphertext) -> Result<LweCiphertext, FHEError> {
        let (params, _) = self.require_bootstrapping("EvalNOT")?;
        check_cipher_text(cipher_text, params)?;

        let q = params.lwe().cipher_modulus();
        let mut result = cipher_text.clone();
        result.neg_reduce_inplace(q);
        q.reduce_add_assign(result.b_mut(), q.value() / GATE_PLAIN_MODULUS);
        Ok(result)
    }

    /// Returns the noiseless gate encoding of `bit`.
    #[inline]
    pub fn eval_constant(&self, bit: bool) -> Result<LweCiphertext, FHEError> {
        self.trivial_encrypt(bit as u64, GATE_PLAIN_MODULUS)
    }

    /// Refreshes a gate encoded ciphertext.
    #[inline]
    pub fn bootstrap(&self, cipher_text: &LweCiphertext) -> Result<LweCiphertext, FHEError> {
        let (params, _) = self.require_bootstrapping("Bootstrap")?;
        check_cipher_text(cipher_text, params)?;
        let q = params.lwe_modulus();
        self.bootstrap_with_threshold("Bootstrap", cipher_text, 5 * q / 8)
    }

    /// Evaluates the sign of a ciphertext of `m` in `Z_p`.
    ///
    /// Returns a gate encoded ciphertext of `m >= p/2`, with one bootstrap.
    /// Requires `p | q` and `2p <= q`.
    pub fn eval_sign(
        &self,
        cipher_text: &LweCiphertext,
        plain_modulus: u64,
    ) -> Result<LweCiphertext, FHEError> {
        let (params, _) = self.require_bootstrapping("EvalSign")?;
        check_cipher_text(cipher_text, params)?;

        let q = params.lwe_modulus();
        check_plain_modulus(plain_modulus, q)?;
        if plain_modulus > q / 2 {
            return Err(FHECoreError::PlainModulusUnValid {
                plain_modulus,
                cipher_modulus: q,
            }
            .into());
        }

        self.bootstrap_with_threshold("EvalSign", cipher_text, q - q / (2 * plain_modulus))
    }
}

#[inline]
fn check_dimension(expected: usize, found: usize) -> Result<(), FHEError> {
    if expected != found {
        return Err(FHECoreError::DimensionMismatch { expected, found }.into());
    }
    Ok(())
}

#[inline]
fn check_secret_key(sk: &LweSecretKey, params: &BinFheParams) -> Result<(), FHEError> {
    check_dimension(params.lwe_dimension(), sk.dimension())
}

#[inline]
fn check_cipher_text(cipher_text: &LweCiphertext, params: &BinFheParams) -> Result<(), FHEError> {
    check_dimension(params.lwe_dimension(), cipher_text.dimension())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_transitions() {
        let mut ctx = BinFheContext::new();
        assert_eq!(ctx.state(), ContextState::Uninitialized);
        assert!(matches!(
            ctx.key_gen(),
            Err(FHEError::State {
                required: ContextState::ParametersSet,
                current: ContextState::Uninitialized,
                ..
            })
        ));

        ctx.generate_context(BinFheParamSet::Toy, BootstrapMethod::Ginx)
            .unwrap();
        assert_eq!(ctx.state(), ContextState::ParametersSet);
        assert!(matches!(
            ctx.generate_default_context(),
            Err(FHEError::State { .. })
        ));

        let sk = ctx.key_gen().unwrap();
        assert_eq!(ctx.state(), ContextState::KeysGenerated);

        let c = ctx.encrypt(&sk, true, OutputMode::Fresh).unwrap();
        assert!(matches!(
            ctx.eval_not(&c),
            Err(FHEError::State {
                required: ContextState::BootstrappingReady,
                current: ContextState::KeysGenerated,
                ..
            })
        ));
        assert!(matches!(
            ctx.encrypt(&sk, true, OutputMode::Bootstrapped),
            Err(FHEError::State { .. })
        ));

        ctx.clear_bt_keys();
        assert_eq!(ctx.state(), ContextState::KeysGenerated);
    }

    #[test]
    fn test_trivial_and_constant() {
        let mut ctx = BinFheContext::new();
        assert!(ctx.eval_constant(true).is_err());
        ctx.generate_context(BinFheParamSet::Toy, BootstrapMethod::Ap)
            .unwrap();

        let one = ctx.eval_constant(true).unwrap();
        assert!(one.a().iter().all(|&v| v == 0));
        assert_eq!(one.b(), 128);
        assert_eq!(ctx.trivial_encrypt(3, 8).unwrap().b(), 192);
        assert!(ctx.trivial_encrypt(8, 8).is_err());
        assert!(ctx.trivial_encrypt(1, 3).is_err());
    }
}
