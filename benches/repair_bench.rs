use criterion::{Criterion, criterion_group, criterion_main};
use jsonmend::{Options, repair_to_string};

fn bench_repair(c: &mut Criterion) {
    let mut group = c.benchmark_group("repair");
    let cases = vec![
        r#"{a:1}"#,
        r#"// comment
        {"a": 1, /*b*/ "b": 2,}
        "#,
        r#"```json
        {c:3}
        ```
        "#,
        r#"{"text": "The quick brown fox"}"#,
        "undefined",
        "True False None",
        r#"{"a":1}{"b":2}{"c":3}"#,
        r#"{'users': [{'name': 'Alice', 'active': True}], 'success': True}"#,
    ];
    let opts = Options::default();
    for (i, s) in cases.into_iter().enumerate() {
        group.bench_function(format!("case_{}", i), |b| {
            b.iter(|| {
                let out = repair_to_string(std::hint::black_box(s.as_bytes()), &opts).unwrap();
                std::hint::black_box(out);
            })
        });
    }
    group.finish();
}

fn bench_fast_path(c: &mut Criterion) {
    let mut group = c.benchmark_group("fast_path");
    let valid = r#"{"a":1,"b":[1,2,3],"c":{"d":"e"}}"#;
    let opts = Options::default();
    group.bench_function("already_valid", |b| {
        b.iter(|| {
            let out = repair_to_string(std::hint::black_box(valid.as_bytes()), &opts).unwrap();
            std::hint::black_box(out);
        })
    });
    group.finish();
}

criterion_group!(benches, bench_repair, bench_fast_path);
criterion_main!(benches);
