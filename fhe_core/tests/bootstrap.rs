use algebra::{arith::ntt_prime, RingReduce};
use fhe_core::{
    decode, encode, extract_accumulator, init_accumulator, lwe_modulus_switch, BlindRotate,
    BlindRotationKey, BootstrapMethod, LweKeySwitchingKey, LweParameters, LweSecretKey,
    RingGswParameters,
};
use rand::thread_rng;

fn refresh(method: BootstrapMethod) {
    let mut rng = thread_rng();

    let lwe = LweParameters::new(32, 256, 1 << 14, 1 << 5, 3.19).unwrap();
    let ring_modulus = ntt_prime(27, 512).unwrap();
    let ring =
        RingGswParameters::new(&lwe, 256, ring_modulus, 1 << 9, 16, method).unwrap();

    let q = lwe.cipher_modulus();
    let q_value = q.value();
    let qks = lwe.key_switching_modulus().value();

    let lwe_sk = LweSecretKey::generate(lwe.dimension(), &mut rng);
    let ring_sk = LweSecretKey::generate(ring.dimension(), &mut rng);
    let brk = BlindRotationKey::generate(&lwe_sk, &ring_sk, &ring, &mut rng);
    let ksk = LweKeySwitchingKey::generate(&ring_sk, &lwe_sk, &lwe, &mut rng);

    for bit in [0u64, 1, 1, 0] {
        let c = lwe_sk.encrypt(
            encode(bit, 4, q_value).unwrap(),
            q,
            lwe.noise_distribution(),
            &mut rng,
        );

        // identity refresh
        let acc = init_accumulator(c.b(), 5 * q_value / 8, &ring);
        let acc = brk.blind_rotate(acc, c.a(), &ring);
        let extracted = extract_accumulator(&acc, &ring);

        let switched = lwe_modulus_switch(&extracted, ring_modulus, qks);
        let switched = ksk.key_switch(&switched).unwrap();
        let refreshed = lwe_modulus_switch(&switched, qks, q_value);

        assert_eq!(refreshed.dimension(), lwe.dimension());
        let phase = lwe_sk.phase(&refreshed, q);
        assert_eq!(decode(phase, 4, q_value).unwrap(), bit, "{method:?}");

        let err = q.centered(q.reduce_sub(phase, bit * q_value / 4));
        assert!(err.abs() < (q_value / 8) as i64);
    }
}

#[test]
fn test_refresh_ginx() {
    refresh(BootstrapMethod::Ginx);
}

#[test]
fn test_refresh_ap() {
    refresh(BootstrapMethod::Ap);
}
