use binfhe::{
    BinFheContext, BinFheParamSet, BinFheParams, BinGate, BootstrapMethod, BootstrappingKey,
    ContextState, FHEError, LweCiphertext, LweSecretKey, OutputMode, Serializable,
};

#[test]
fn test_round_trip_through_bytes() {
    let mut ctx = BinFheContext::new();
    ctx.generate_context(BinFheParamSet::Toy, BootstrapMethod::Ap)
        .unwrap();
    let sk = ctx.key_gen().unwrap();
    ctx.bt_key_gen(&sk).unwrap();

    let params_bytes = ctx.params().unwrap().to_bytes().unwrap();
    let sk_bytes = sk.to_bytes().unwrap();
    let key_bytes = ctx.bootstrapping_key().unwrap().to_bytes().unwrap();
    let ct_bytes: Vec<_> = [true, false]
        .into_iter()
        .map(|bit| {
            ctx.encrypt(&sk, bit, OutputMode::Fresh)
                .unwrap()
                .to_bytes()
                .unwrap()
        })
        .collect();

    // a second context rebuilt only from bytes
    let params = BinFheParams::from_bytes(&params_bytes).unwrap();
    assert_eq!(&params, ctx.params().unwrap());
    assert_eq!(params.method(), BootstrapMethod::Ap);

    let mut loaded = BinFheContext::new();
    loaded
        .generate_context(BinFheParamSet::Toy, params.method())
        .unwrap();
    loaded
        .bt_key_load(BootstrappingKey::from_bytes(&key_bytes).unwrap())
        .unwrap();
    assert_eq!(loaded.state(), ContextState::BootstrappingReady);

    let sk = LweSecretKey::from_bytes(&sk_bytes).unwrap();
    let c1 = LweCiphertext::from_bytes(&ct_bytes[0]).unwrap();
    let c2 = LweCiphertext::from_bytes(&ct_bytes[1]).unwrap();
    assert!(loaded.decrypt(&sk, &c1).unwrap());
    assert!(!loaded.decrypt(&sk, &c2).unwrap());

    for gate in BinGate::ALL {
        let c = loaded.eval_bin_gate(gate, &c1, &c2).unwrap();
        assert_eq!(ctx.decrypt(&sk, &c).unwrap(), gate.evaluate(true, false));
    }
}

#[test]
fn test_rejects_wrong_objects_and_versions() {
    let mut ctx = BinFheContext::new();
    ctx.generate_context(BinFheParamSet::Toy, BootstrapMethod::Ginx)
        .unwrap();
    let sk = ctx.key_gen().unwrap();
    let ct = ctx.encrypt(&sk, true, OutputMode::Fresh).unwrap();

    let sk_bytes = sk.to_bytes().unwrap();
    assert!(matches!(
        LweCiphertext::from_bytes(&sk_bytes),
        Err(FHEError::UnexpectedObject {
            expected: "LweCiphertext",
            ..
        })
    ));

    // bincode writes the name as a length prefixed string, then the version
    let mut newer = ct.to_bytes().unwrap();
    let offset = 8 + LweCiphertext::OBJECT_NAME.len();
    newer[offset..offset + 4].copy_from_slice(&2u32.to_le_bytes());
    assert!(matches!(
        LweCiphertext::from_bytes(&newer),
        Err(FHEError::Version {
            found: 2,
            supported: 1,
            ..
        })
    ));

    assert!(matches!(
        LweCiphertext::from_bytes(&[]),
        Err(FHEError::Serialization(_))
    ));
}
