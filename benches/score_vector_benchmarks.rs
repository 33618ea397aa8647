use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use ferrous_score::compute::matrix::encode_sequence;
use ferrous_score::compute::simd_abstraction::SimdEngine128;
use ferrous_score::compute::simd_abstraction::simd::{
    compiled_engine, engine_channels, simd_engine_description,
};
use ferrous_score::{
    DispatchResidueVector, DispatchScoreVector, ResidueVector, RowLookupTable, ScoreVector, blend,
};

fn generate_random_protein(len: usize, seed: u64) -> Vec<u8> {
    // Simple LCG for reproducible sequences over the 20 standard residues
    const RESIDUES: &[u8; 20] = b"ARNDCQEGHILKMFPSTWYV";
    let mut rng = seed;
    let letters: Vec<u8> = (0..len)
        .map(|_| {
            rng = rng.wrapping_mul(1103515245).wrapping_add(12345);
            RESIDUES[((rng / 65536) % 20) as usize]
        })
        .collect();
    encode_sequence(&letters)
}

/// Local-alignment style column sweep: one lookup, one add, a gap penalty,
/// a max and a blend per residue of the target.
macro_rules! column_sweep {
    ($sv:ty, $rv:ty, $table:expr, $codes:expr, $target:expr) => {{
        let gap = <$sv>::splat(11);
        let mut h = <$sv>::zero();
        let mut e = <$sv>::zero();
        let mut best = <$sv>::zero();
        let seq = <$rv>::load($codes);
        for &t in $target {
            let sub = <$sv>::from_row($table, t as usize, &seq);
            let diag = h + sub;
            e = (e - <$sv>::splat(1)).max(h - gap);
            h = diag.max(e).max(<$sv>::zero());
            best.max_assign(h);
            let reset = h.cmpeq(&<$sv>::zero());
            h = blend(h, <$sv>::zero(), reset);
        }
        best
    }};
}

fn bench_row_lookup(c: &mut Criterion) {
    let table = RowLookupTable::blosum62();
    let codes = generate_random_protein(DispatchScoreVector::CHANNELS, 7);
    let seq = DispatchResidueVector::load(&codes);

    let mut group = c.benchmark_group("row_lookup");
    group.throughput(Throughput::Elements(DispatchScoreVector::CHANNELS as u64));
    group.bench_function(simd_engine_description(compiled_engine()), |b| {
        b.iter(|| {
            let mut acc = DispatchScoreVector::zero();
            for row in 0..24 {
                acc += DispatchScoreVector::from_row(black_box(&table), row, black_box(&seq));
            }
            acc
        })
    });
    group.finish();
}

fn bench_column_sweep(c: &mut Criterion) {
    let table = RowLookupTable::blosum62();
    let mut group = c.benchmark_group("column_sweep");

    for target_len in [64usize, 256, 1024].iter() {
        let target = generate_random_protein(*target_len, 42);
        let codes = generate_random_protein(32, 123);

        group.throughput(Throughput::Elements((*target_len * 16) as u64));
        group.bench_with_input(BenchmarkId::new("engine128", target_len), target_len, |b, _| {
            b.iter(|| {
                column_sweep!(
                    ScoreVector<SimdEngine128>,
                    ResidueVector<SimdEngine128>,
                    black_box(&table),
                    &codes,
                    black_box(&target)
                )
            })
        });

        let lanes = engine_channels(compiled_engine());
        if lanes > 16 {
            group.throughput(Throughput::Elements((*target_len * lanes) as u64));
            group.bench_with_input(BenchmarkId::new("dispatch", target_len), target_len, |b, _| {
                b.iter(|| {
                    column_sweep!(
                        DispatchScoreVector,
                        DispatchResidueVector,
                        black_box(&table),
                        &codes,
                        black_box(&target)
                    )
                })
            });
        }
    }
    group.finish();
}

criterion_group!(benches, bench_row_lookup, bench_column_sweep);
criterion_main!(benches);
