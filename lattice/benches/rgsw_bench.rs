use algebra::{
    arith::ntt_prime, decompose::SignedBasis, random::sample_ternary_values,
    random::DiscreteGaussian, BarrettModulus, NttTable, NumberTheoryTransform, Polynomial,
};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use lattice::{DecomposeSpace, NttRgsw, NttRlwe};
use rand::thread_rng;

pub fn criterion_benchmark(c: &mut Criterion) {
    let mut rng = thread_rng();

    let log_n = 10;
    let n = 1usize << log_n;
    let q = ntt_prime(27, (n as u64) << 1).unwrap();
    let modulus = BarrettModulus::new(q).unwrap();
    let table = NttTable::new(modulus, log_n).unwrap();
    let basis = SignedBasis::new(modulus, 1 << 7).unwrap();
    let gaussian = DiscreteGaussian::new(3.19).unwrap();

    let sk = sample_ternary_values(n, &mut rng);
    let sk_ntt = table.transform(&Polynomial::from_signed(&sk, modulus));

    let rlwe = NttRlwe::generate_random_zero_sample(&sk_ntt, &gaussian, &table, &mut rng)
        .to_rlwe(&table);
    let rgsw = NttRgsw::generate_monomial(&sk_ntt, 1, 7, &basis, &gaussian, &table, &mut rng);
    let mut space = DecomposeSpace::new(n, basis.digit_count());

    c.bench_function(&format!("rlwe mul rgsw {}", n), |b| {
        b.iter(|| black_box(&rlwe).mul_ntt_rgsw(&rgsw, &basis, &table, &mut space))
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
