//! Performance benchmarks for the registry scanner.
//!
//! - Fixtures: the sources under `test_sources/`, parse included
//! - Scan only: the same sources pre-parsed, so only extraction is measured
//! - Package size: synthetic packages with a growing number of classes

use criterion::{Criterion, Throughput, criterion_group, criterion_main};
use gdnative_registrar::{ScanConfig, Scanner, scan_source};
use std::hint::black_box;

const PLAYER: &str = include_str!("../test_sources/player.rs");
const ENEMY: &str = include_str!("../test_sources/enemy.rs");

/// A package of `count` classes, each with a few properties, methods and a
/// constructor carrying one signal.
fn synthetic_package(count: usize) -> String {
    let mut source = String::new();
    for i in 0..count {
        source.push_str(&format!(
            r#"
/// godot::register as UNIT_{i}
pub struct Unit{i} {{
    base: godot::Node2D,
    #[godot(hint = "range", hint_string = "0,100")]
    pub hp: i64,
    pub speed: f32,
    pub tags: Vec<String>,
    pub died: gdnative::Signal,
}}

impl Unit{i} {{
    /// godot::constructor(Unit{i})
    pub fn new() -> Box<Self> {{
        Box::new(Self {{
            base: godot::Node2D::default(),
            hp: 100,
            speed: 1.0,
            tags: Vec::new(),
            died: gdnative::Signal {{
                name: "died".into(),
                args: vec![],
                default_args: vec![],
            }},
        }})
    }}

    pub fn heal(&mut self, amount: i64) -> i64 {{
        self.hp += amount;
        self.hp
    }}

    pub fn position(&self) -> (f32, f32) {{
        (0.0, 0.0)
    }}

    pub fn v_process(&mut self, delta: f64) {{}}
}}
"#
        ));
    }
    source
}

fn fixture_benchmarks(c: &mut Criterion) {
    let mut group = c.benchmark_group("scanner/fixtures");

    group.throughput(Throughput::Bytes(PLAYER.len() as u64));
    group.bench_function("player", |b| {
        b.iter(|| {
            let registry = scan_source(black_box(PLAYER)).unwrap();
            black_box(registry.len())
        });
    });

    group.throughput(Throughput::Bytes(ENEMY.len() as u64));
    group.bench_function("enemy", |b| {
        b.iter(|| {
            let registry = scan_source(black_box(ENEMY)).unwrap();
            black_box(registry.len())
        });
    });

    group.finish();
}

fn scan_only_benchmarks(c: &mut Criterion) {
    let mut group = c.benchmark_group("scanner/scan_only");
    let files = vec![
        syn::parse_file(PLAYER).unwrap(),
        syn::parse_file(ENEMY).unwrap(),
    ];
    let scanner = Scanner::with_config(ScanConfig::default());

    group.throughput(Throughput::Bytes((PLAYER.len() + ENEMY.len()) as u64));
    group.bench_function("fixture_package", |b| {
        b.iter(|| {
            let registry = scanner.scan_files(black_box(&files)).unwrap();
            black_box(registry.len())
        });
    });

    group.finish();
}

fn package_size_benchmarks(c: &mut Criterion) {
    let mut group = c.benchmark_group("scanner/package_size");

    for count in [1, 10, 50, 200] {
        let source = synthetic_package(count);
        group.throughput(Throughput::Bytes(source.len() as u64));
        group.bench_function(format!("{}_classes", count), |b| {
            b.iter(|| {
                let registry = scan_source(black_box(&source)).unwrap();
                black_box(registry.len())
            });
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    fixture_benchmarks,
    scan_only_benchmarks,
    package_size_benchmarks
);
criterion_main!(benches);
