use binfhe::{BinFheContext, BinFheParamSet, BinGate, BootstrapMethod, LweSecretKey, OutputMode};
use itertools::iproduct;
use rand::{thread_rng, Rng};

fn toy_context(method: BootstrapMethod) -> (BinFheContext, LweSecretKey) {
    let mut ctx = BinFheContext::new();
    ctx.generate_context(BinFheParamSet::Toy, method).unwrap();
    let sk = ctx.key_gen().unwrap();
    ctx.bt_key_gen(&sk).unwrap();
    (ctx, sk)
}

fn check_truth_tables(method: BootstrapMethod) {
    let (ctx, sk) = toy_context(method);

    for (gate, a, b, _) in iproduct!(BinGate::ALL, [false, true], [false, true], 0..3) {
        let c1 = ctx.encrypt(&sk, a, OutputMode::Fresh).unwrap();
        let c2 = ctx.encrypt(&sk, b, OutputMode::Fresh).unwrap();
        let c = ctx.eval_bin_gate(gate, &c1, &c2).unwrap();
        assert_eq!(
            ctx.decrypt(&sk, &c).unwrap(),
            gate.evaluate(a, b),
            "{method:?} {gate:?}({a}, {b})"
        );
    }
    assert_eq!(ctx.bootstrap_count(), BinGate::ALL.len() * 4 * 3);
}

#[test]
fn test_gates_ginx() {
    check_truth_tables(BootstrapMethod::Ginx);
}

#[test]
fn test_gates_ap() {
    check_truth_tables(BootstrapMethod::Ap);
}

#[test]
fn test_concrete_scenario() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
    let (ctx, sk) = toy_context(BootstrapMethod::Ginx);

    let ct0 = ctx.encrypt(&sk, false, OutputMode::Fresh).unwrap();
    let ct1 = ctx.encrypt(&sk, true, OutputMode::Fresh).unwrap();

    let xor = ctx.eval_bin_gate(BinGate::Xor, &ct0, &ct1).unwrap();
    let and = ctx.eval_bin_gate(BinGate::And, &ct1, &ct1).unwrap();
    let nor = ctx.eval_bin_gate(BinGate::Nor, &ct0, &ct0).unwrap();

    assert!(ctx.decrypt(&sk, &xor).unwrap());
    assert!(ctx.decrypt(&sk, &and).unwrap());
    assert!(ctx.decrypt(&sk, &nor).unwrap());
}

#[test]
fn test_gate_chain() {
    let mut rng = thread_rng();
    let (ctx, sk) = toy_context(BootstrapMethod::Ginx);

    let mut plain: bool = rng.gen();
    let mut cipher = ctx.encrypt(&sk, plain, OutputMode::Fresh).unwrap();

    for step in 0..50 {
        let gate = BinGate::ALL[rng.gen_range(0..BinGate::ALL.len())];
        let other: bool = rng.gen();
        let other_cipher = ctx.encrypt(&sk, other, OutputMode::Fresh).unwrap();

        cipher = ctx.eval_bin_gate(gate, &cipher, &other_cipher).unwrap();
        plain = gate.evaluate(plain, other);

        assert_eq!(ctx.decrypt(&sk, &cipher).unwrap(), plain, "step {step}, {gate:?}");
    }
    assert_eq!(ctx.bootstrap_count(), 50);
}

#[test]
fn test_concurrent_gates() {
    let (ctx, sk) = toy_context(BootstrapMethod::Ginx);

    let inputs: Vec<_> = [false, true]
        .into_iter()
        .map(|bit| ctx.encrypt(&sk, bit, OutputMode::Fresh).unwrap())
        .collect();

    std::thread::scope(|s| {
        for gate in BinGate::ALL {
            let (ctx, sk, inputs) = (&ctx, &sk, &inputs);
            s.spawn(move || {
                let c = ctx.eval_bin_gate(gate, &inputs[1], &inputs[0]).unwrap();
                assert_eq!(ctx.decrypt(sk, &c).unwrap(), gate.evaluate(true, false));
            });
        }
    });
    assert_eq!(ctx.bootstrap_count(), BinGate::ALL.len());
}
