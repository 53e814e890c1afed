//! Criterion benchmarks for catalog critical paths
//!
//! Benchmarks the core operations:
//! - Construction: building a catalog of many same-id variants
//! - Lookup: id lookups with and without a tileset filter
//! - Fix activation: unlocking gated screens
//! - Renumber: real -> virtual -> real round trips

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use metascreens::config::CatalogConfig;
use metascreens::models::{
    ScreenData, ScreenFix, ScreenId, TileSource, TilesetName, TilesetRequirement,
};
use metascreens::registry::Metascreens;
use metascreens::rom::{MemoryRom, ScreenStore};

// =============================================================================
// Test Data Generators
// =============================================================================

/// Build a catalog with `count` screens spread over 64 ids, every fourth one
/// gated behind `DesertRocks`.
fn make_catalog(count: usize) -> (Metascreens, MemoryRom) {
    let mut rom = MemoryRom::new();
    for id in 0..64u16 {
        rom.set_screen(ScreenId::Real(id), vec![id as u8; 240]);
    }
    let mut catalog = Metascreens::new(CatalogConfig::default());
    for i in 0..count {
        let requirement = if i % 4 == 0 {
            TilesetRequirement::requires([ScreenFix::DesertRocks])
        } else {
            TilesetRequirement::eager()
        };
        let data = ScreenData::new(ScreenId::Real((i % 64) as u16))
            .tileset(TilesetName::Desert, requirement)
            .definition(TileSource::generator(move |_| vec![i as u8; 240]));
        catalog.metascreen(format!("screen{}", i), data, &mut rom).unwrap();
    }
    (catalog, rom)
}

// =============================================================================
// Benchmarks
// =============================================================================

fn bench_construction(c: &mut Criterion) {
    let mut group = c.benchmark_group("construction");
    for size in [64usize, 512, 2048].iter() {
        group.throughput(Throughput::Elements(*size as u64));
        group.bench_with_input(BenchmarkId::new("metascreen", size), size, |b, &size| {
            b.iter(|| make_catalog(black_box(size)))
        });
    }
    group.finish();
}

fn bench_lookup(c: &mut Criterion) {
    let (catalog, _rom) = make_catalog(2048);
    let mut group = c.benchmark_group("lookup");

    group.bench_function("get_by_id", |b| {
        b.iter(|| catalog.get_by_id(black_box(ScreenId::Real(12)), None))
    });
    group.bench_function("get_by_id_tileset", |b| {
        b.iter(|| catalog.get_by_id(black_box(ScreenId::Real(12)), Some(TilesetName::Desert)))
    });
    group.bench_function("by_name", |b| b.iter(|| catalog.by_name(black_box("screen2000"))));

    group.finish();
}

fn bench_register_fix(c: &mut Criterion) {
    c.bench_function("register_fix_2048", |b| {
        b.iter_batched(
            || make_catalog(2048),
            |(mut catalog, mut rom)| {
                catalog.register_fix(ScreenFix::DesertRocks, None, &mut rom).unwrap();
            },
            criterion::BatchSize::LargeInput,
        )
    });
}

fn bench_renumber(c: &mut Criterion) {
    c.bench_function("renumber_round_trip", |b| {
        b.iter_batched(
            || make_catalog(512),
            |(mut catalog, mut rom)| {
                let spare = ScreenId::Virtual(0);
                catalog.renumber(ScreenId::Real(12), spare, None, &mut rom).unwrap();
                catalog.renumber(spare, ScreenId::Real(12), None, &mut rom).unwrap();
            },
            criterion::BatchSize::LargeInput,
        )
    });
}

criterion_group!(benches, bench_construction, bench_lookup, bench_register_fix, bench_renumber);
criterion_main!(benches);
