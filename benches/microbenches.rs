//! Criterion microbenches for identifier expansion and roster lookup.
//!
//! Run with: `cargo bench`

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use std::hint::black_box;

use cardmatch::ident::expand_variants;
use cardmatch::lookup::{lookup, ProbePlan};
use cardmatch::store::roster::from_roster_json_str;
use cardmatch::store::{CandidateRecord, Collection, Roster};

const ROSTER_FIXTURE: &str = include_str!("../tests/fixtures/roster.json");

fn bench_expand_variants(c: &mut Criterion) {
    let mut group = c.benchmark_group("expand_variants");

    for (label, raw) in [
        ("decimal_4_byte", "2686677508"),
        ("decimal_7_byte", "1317758887798401"),
        ("hex_colon", "04:AE:7E:A6:68:26:81"),
        ("text", "STUDENT-42"),
    ] {
        group.bench_with_input(BenchmarkId::from_parameter(label), raw, |b, raw| {
            b.iter(|| black_box(expand_variants(black_box(raw))))
        });
    }

    group.finish();
}

/// Fixture roster padded with `size` students that never match the probe.
fn large_roster(size: u32) -> Roster {
    let mut roster = from_roster_json_str(ROSTER_FIXTURE).unwrap();
    for i in 0..size {
        roster.push(
            Collection::Students,
            CandidateRecord::new(format!("bulk-{i}"), format!("Student {i}"))
                .with_card_number(format!("{:08X}", i.wrapping_mul(2_654_435_761)))
                .with_student_id(format!("BULK-{i}")),
        );
    }
    roster
}

fn bench_lookup(c: &mut Criterion) {
    let plan = ProbePlan::default();
    let mut group = c.benchmark_group("lookup");

    for size in [100u32, 10_000] {
        let roster = large_roster(size);
        group.bench_with_input(
            BenchmarkId::new("teacher_fallthrough", size),
            &roster,
            |b, roster| b.iter(|| black_box(lookup(roster, black_box("04:AE:7E:A6:68:26:81"), &plan))),
        );
    }

    group.finish();
}

criterion_group!(benches, bench_expand_variants, bench_lookup);
criterion_main!(benches);
