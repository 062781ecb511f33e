use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use matrix::{gen_rand_rows, FlexMatrix};
use rand::rngs::StdRng;
use rand::SeedableRng;
use vq::assign::nearest_labels;
use vq::{generate_dict, generate_dict_fast, Params};

const DICT_SIZES: [usize; 3] = [8, 32, 128];
const NB_ROWS: usize = 10_000;

fn random_data<const W: usize>() -> FlexMatrix<f32, W> {
    gen_rand_rows(NB_ROWS, &mut StdRng::seed_from_u64(0))
}

fn nearest_10000_w16(c: &mut Criterion) {
    let data: FlexMatrix<f32, 16> = random_data();
    let mut group = c.benchmark_group("Nearest entries @ 10_000 rows, w16");
    for size in DICT_SIZES.iter() {
        let dict = data[..*size].to_vec();
        group.bench_function(BenchmarkId::new("serial", size), |b| {
            b.iter(|| nearest_labels(&data, &dict, false))
        });
        group.bench_function(BenchmarkId::new("parallel", size), |b| {
            b.iter(|| nearest_labels(&data, &dict, true))
        });
    }
    group.finish();
}

fn generate_10000_w16(c: &mut Criterion) {
    let data: FlexMatrix<f32, 16> = random_data();
    let params = Params {
        max_iterations: 20,
        ..Params::from_seed(1)
    };
    let mut group = c.benchmark_group("Generate @ 10_000 rows, w16");
    group.sample_size(10);
    for size in DICT_SIZES[..2].iter() {
        group.bench_function(BenchmarkId::new("lbg", size), |b| {
            b.iter(|| generate_dict(&data, *size, &params))
        });
        group.bench_function(BenchmarkId::new("fast", size), |b| {
            b.iter(|| generate_dict_fast(&data, *size, &params))
        });
    }
    group.finish();
}

criterion_group!(benches, nearest_10000_w16, generate_10000_w16);
criterion_main!(benches);
