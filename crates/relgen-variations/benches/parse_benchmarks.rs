use criterion::{Criterion, black_box, criterion_group, criterion_main};
use relgen_variations::{SavedMatrix, parse};
use std::collections::BTreeMap;

/// A document with `repos * 4 branches * 3 triggers * 5 testsuites` records.
fn wide_document(repos: usize) -> SavedMatrix {
    let level = |names: Vec<String>, child: SavedMatrix| -> BTreeMap<String, SavedMatrix> {
        names.into_iter().map(|n| (n, child.clone())).collect()
    };
    let mut testsuite = SavedMatrix::default();
    testsuite.payload.pump = vec!["tyk-pump".into(), "$LATEST".into()];

    let trigger = SavedMatrix {
        level: level((0..5).map(|i| format!("ts{i}")).collect(), testsuite),
        ..Default::default()
    };
    let branch = SavedMatrix {
        level: level(
            vec!["push".into(), "pull_request".into(), "schedule".into()],
            trigger,
        ),
        ..Default::default()
    };
    let repo = SavedMatrix {
        level: level((0..4).map(|i| format!("release-{i}")).collect(), branch),
        ..Default::default()
    };
    SavedMatrix {
        level: level((0..repos).map(|i| format!("repo{i}")).collect(), repo),
        ..Default::default()
    }
}

fn bench_parse(c: &mut Criterion) {
    let doc = wide_document(10);
    c.bench_function("parse_600_testsuites", |b| b.iter(|| parse(black_box(&doc))));
}

criterion_group!(benches, bench_parse);
criterion_main!(benches);
