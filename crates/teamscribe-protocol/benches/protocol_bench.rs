// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

use teamscribe_protocol::{ServiceMessageWriter, escape};

fn escape_benchmark(c: &mut Criterion) {
    let clean = "Namespace.Fixture.a_fairly_long_test_method_name";
    let dirty = "assertion failed: expected ['a'|'b']\n  at Fixture.Method()\r\n";

    c.bench_function("escape_clean", |b| b.iter(|| escape(black_box(clean))));
    c.bench_function("escape_dirty", |b| b.iter(|| escape(black_box(dirty))));
}

fn writer_benchmark(c: &mut Criterion) {
    c.bench_function("test_finished_line", |b| {
        let writer = ServiceMessageWriter::new(std::io::sink());
        b.iter(|| {
            writer
                .test_finished(black_box("Namespace.Fixture.Method"), 123, "0-1000")
                .expect("sink write cannot fail")
        })
    });
}

criterion_group!(benches, escape_benchmark, writer_benchmark);
criterion_main!(benches);
