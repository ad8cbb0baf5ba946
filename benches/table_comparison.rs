use core::hash::Hasher;
use core::hint::black_box;

use criterion::BatchSize;
use criterion::Criterion;
use criterion::Throughput;
use criterion::criterion_group;
use criterion::criterion_main;
use hashbrown::hash_table::Entry as HashbrownEntry;
use hashbrown::hash_table::HashTable as HashbrownHashTable;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand_distr::Distribution;
use rand_distr::Zipf;
use robin_hash::HashTable as RobinHashTable;
use robin_hash::hash_table::Entry as RobinEntry;
use siphasher::sip::SipHasher;

const SIZES: &[usize] = &[1024, 65536];
const ZIPF_EXPONENT: f64 = 1.03;

#[derive(Clone)]
struct TestItem {
    key: u64,
    value: u64,
}

fn hash_key(key: u64) -> u64 {
    let mut hasher = SipHasher::new();
    hasher.write_u64(key);
    hasher.finish()
}

fn shuffled_keys(n: usize, rng: &mut SmallRng) -> Vec<u64> {
    let mut keys: Vec<u64> = (0..n as u64).collect();
    keys.shuffle(rng);
    keys
}

fn build_robin(keys: &[u64]) -> RobinHashTable<TestItem> {
    let mut table = RobinHashTable::new();
    for &key in keys {
        let hash = hash_key(key);
        match table.entry(hash, |v: &TestItem| v.key == key) {
            RobinEntry::Vacant(entry) => {
                entry.insert(TestItem { key, value: key });
            }
            RobinEntry::Occupied(_) => unreachable!(),
        }
    }
    table
}

fn build_hashbrown(keys: &[u64]) -> HashbrownHashTable<TestItem> {
    let mut table = HashbrownHashTable::new();
    for &key in keys {
        let hash = hash_key(key);
        match table.entry(hash, |v: &TestItem| v.key == key, |v| hash_key(v.key)) {
            HashbrownEntry::Vacant(entry) => {
                entry.insert(TestItem { key, value: key });
            }
            HashbrownEntry::Occupied(_) => unreachable!(),
        }
    }
    table
}

fn bench_insert(c: &mut Criterion) {
    let mut rng = SmallRng::seed_from_u64(0x0BAD_5EED);
    for &size in SIZES {
        let keys = shuffled_keys(size, &mut rng);

        let mut group = c.benchmark_group(format!("insert/{size}"));
        group.throughput(Throughput::Elements(size as u64));
        group.bench_function("robin_hash", |b| {
            b.iter_batched(
                || keys.clone(),
                |keys| black_box(build_robin(&keys)),
                BatchSize::LargeInput,
            );
        });
        group.bench_function("hashbrown", |b| {
            b.iter_batched(
                || keys.clone(),
                |keys| black_box(build_hashbrown(&keys)),
                BatchSize::LargeInput,
            );
        });
        group.finish();
    }
}

fn bench_find_hit(c: &mut Criterion) {
    let mut rng = SmallRng::seed_from_u64(0xF1D0_4B1E);
    for &size in SIZES {
        let keys = shuffled_keys(size, &mut rng);
        let robin = build_robin(&keys);
        let hashbrown = build_hashbrown(&keys);
        let mut probes = keys.clone();
        probes.shuffle(&mut rng);

        let mut group = c.benchmark_group(format!("find_hit/{size}"));
        group.throughput(Throughput::Elements(size as u64));
        group.bench_function("robin_hash", |b| {
            b.iter(|| {
                let mut found = 0usize;
                for &key in &probes {
                    let hash = hash_key(key);
                    if robin.find(hash, |v| v.key == key).is_some() {
                        found += 1;
                    }
                }
                black_box(found)
            });
        });
        group.bench_function("hashbrown", |b| {
            b.iter(|| {
                let mut found = 0usize;
                for &key in &probes {
                    let hash = hash_key(key);
                    if hashbrown.find(hash, |v| v.key == key).is_some() {
                        found += 1;
                    }
                }
                black_box(found)
            });
        });
        group.finish();
    }
}

fn bench_find_miss(c: &mut Criterion) {
    let mut rng = SmallRng::seed_from_u64(0x0005_1A7E);
    for &size in SIZES {
        let keys = shuffled_keys(size, &mut rng);
        let robin = build_robin(&keys);
        let hashbrown = build_hashbrown(&keys);
        let probes: Vec<u64> = (0..size as u64).map(|k| k + size as u64).collect();

        let mut group = c.benchmark_group(format!("find_miss/{size}"));
        group.throughput(Throughput::Elements(size as u64));
        group.bench_function("robin_hash", |b| {
            b.iter(|| {
                let mut found = 0usize;
                for &key in &probes {
                    let hash = hash_key(key);
                    if robin.find(hash, |v| v.key == key).is_some() {
                        found += 1;
                    }
                }
                black_box(found)
            });
        });
        group.bench_function("hashbrown", |b| {
            b.iter(|| {
                let mut found = 0usize;
                for &key in &probes {
                    let hash = hash_key(key);
                    if hashbrown.find(hash, |v| v.key == key).is_some() {
                        found += 1;
                    }
                }
                black_box(found)
            });
        });
        group.finish();
    }
}

fn bench_remove(c: &mut Criterion) {
    let mut rng = SmallRng::seed_from_u64(0x5EED_D00D);
    for &size in SIZES {
        let keys = shuffled_keys(size, &mut rng);
        let robin = build_robin(&keys);
        let mut removal_order = keys.clone();
        removal_order.shuffle(&mut rng);

        let mut group = c.benchmark_group(format!("remove/{size}"));
        group.throughput(Throughput::Elements(size as u64));
        group.bench_function("robin_hash", |b| {
            b.iter_batched(
                || robin.clone(),
                |mut table| {
                    for &key in &removal_order {
                        let hash = hash_key(key);
                        black_box(table.remove(hash, |v| v.key == key));
                    }
                    table
                },
                BatchSize::LargeInput,
            );
        });
        group.finish();
    }
}

fn bench_zipf_read(c: &mut Criterion) {
    let mut rng = SmallRng::seed_from_u64(0x21AF_D157);
    for &size in SIZES {
        let keys = shuffled_keys(size, &mut rng);
        let robin = build_robin(&keys);
        let hashbrown = build_hashbrown(&keys);
        let zipf = Zipf::new(size as f64, ZIPF_EXPONENT).expect("valid zipf parameters");
        let probes: Vec<u64> = (0..4096)
            .map(|_| zipf.sample(&mut rng) as u64 - 1)
            .collect();

        let mut group = c.benchmark_group(format!("zipf_read/{size}"));
        group.throughput(Throughput::Elements(probes.len() as u64));
        group.bench_function("robin_hash", |b| {
            b.iter(|| {
                let mut sum = 0u64;
                for &key in &probes {
                    let hash = hash_key(key);
                    if let Some(item) = robin.find(hash, |v| v.key == key) {
                        sum = sum.wrapping_add(item.value);
                    }
                }
                black_box(sum)
            });
        });
        group.bench_function("hashbrown", |b| {
            b.iter(|| {
                let mut sum = 0u64;
                for &key in &probes {
                    let hash = hash_key(key);
                    if let Some(item) = hashbrown.find(hash, |v| v.key == key) {
                        sum = sum.wrapping_add(item.value);
                    }
                }
                black_box(sum)
            });
        });
        group.finish();
    }
}

criterion_group!(
    benches,
    bench_insert,
    bench_find_hit,
    bench_find_miss,
    bench_remove,
    bench_zipf_read
);
criterion_main!(benches);
