//! Benchmark suite for the DsDoc pipeline
//!
//! Measures lexing, parsing with registration, and finalize on synthetic
//! sources where every node has a few actions and a value child.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use dsdoc_core::doc::MarkdownGenerator;
use dsdoc_core::lexer::Lexer;
use dsdoc_core::{DocParser, Extractor};

/// Generate a source file documenting `num_nodes` nodes
///
/// Children are emitted before their parents so half of the links are
/// resolved at finalize.
fn generate_source(num_nodes: usize) -> String {
    let mut out = String::new();
    for i in (0..num_nodes).rev() {
        let parent = if i == 0 { "root".to_string() } else { format!("node{}", i / 4) };
        out.push_str(&format!(
            "//* @Node node{i}\n//* @Parent {parent}\n//*\n//* Node number {i}.\n//*\n\
             //* A longer description that wraps\n//* onto a second line.\nclass Node{i} {{}}\n\n"
        ));
        out.push_str(&format!(
            "//* @Action Reset{i}\n//* @Parent node{i}\n//*\n//* Resets the node.\n//*\n\
             //* @Param force bool Skip the confirmation.\n//* @Param delay number Seconds to wait.\n\
             //* @Return values\n//* @Column ok bool Whether the reset ran.\nvoid reset{i}() {{}}\n\n"
        ));
        out.push_str(&format!(
            "//* @Node status{i}\n//* @Parent node{i}\n//*\n//* Status value.\n//*\n\
             //* @Value enum[ok,failed] never\nString status{i};\n\n"
        ));
    }
    out
}

/// Benchmark batch extraction
fn bench_extract(c: &mut Criterion) {
    let mut group = c.benchmark_group("extract");

    for size in [10, 100, 1_000].iter() {
        let source = generate_source(*size);
        group.throughput(Throughput::Bytes(source.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &source, |b, source| {
            b.iter(|| black_box(Extractor::default().extract("bench.dart", source)));
        });
    }

    group.finish();
}

/// Benchmark tokenization of every batch
fn bench_lex(c: &mut Criterion) {
    let mut group = c.benchmark_group("lex");

    for size in [10, 100, 1_000].iter() {
        let batches = Extractor::default().extract("bench.dart", &generate_source(*size));
        group.throughput(Throughput::Elements(batches.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &batches, |b, batches| {
            b.iter(|| {
                for batch in batches {
                    black_box(Lexer::tokenize(&batch.lines));
                }
            });
        });
    }

    group.finish();
}

/// Benchmark parsing, registration and linking
fn bench_parse_and_link(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_and_link");

    for size in [10, 100, 1_000].iter() {
        let batches = Extractor::default().extract("bench.dart", &generate_source(*size));
        group.throughput(Throughput::Elements(batches.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &batches, |b, batches| {
            b.iter(|| {
                let mut parser = DocParser::new();
                for batch in batches {
                    parser.parse_batch(batch).unwrap();
                }
                black_box(parser.finalize().unwrap())
            });
        });
    }

    group.finish();
}

/// Benchmark Markdown rendering of a linked tree
fn bench_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("render_markdown");

    for size in [10, 100, 1_000].iter() {
        let tree = dsdoc_core::parse_source("bench.dart", &generate_source(*size)).unwrap();
        group.throughput(Throughput::Elements(tree.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &tree, |b, tree| {
            b.iter(|| black_box(MarkdownGenerator::generate(tree)));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_extract, bench_lex, bench_parse_and_link, bench_render);

criterion_main!(benches);
