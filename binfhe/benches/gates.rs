use binfhe::{BinFheContext, BinFheParamSet, BinGate, BootstrapMethod, OutputMode};
use criterion::{criterion_group, criterion_main, Criterion};

pub fn criterion_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("gates");
    group.sample_size(10);

    for method in [BootstrapMethod::Ginx, BootstrapMethod::Ap] {
        let mut ctx = BinFheContext::new();
        ctx.generate_context(BinFheParamSet::Std128, method)
            .unwrap();
        let sk = ctx.key_gen().unwrap();
        ctx.bt_key_gen(&sk).unwrap();

        let c1 = ctx.encrypt(&sk, true, OutputMode::Fresh).unwrap();
        let c2 = ctx.encrypt(&sk, false, OutputMode::Fresh).unwrap();

        for gate in [BinGate::And, BinGate::Xor] {
            group.bench_function(format!("{method:?} {gate:?}"), |b| {
                b.iter(|| ctx.eval_bin_gate(gate, &c1, &c2))
            });
        }
        group.bench_function(format!("{method:?} NOT"), |b| b.iter(|| ctx.eval_not(&c1)));
    }

    group.finish();
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
