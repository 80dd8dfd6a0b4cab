extern crate criterion;
extern crate term_completion;

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use term_completion::{parse_term, parse_trs, unify, Signature, Substitution, Term, Variable};

fn sig() -> Signature {
    Signature::new(
        &[("A", 2), ("C", 1), ("B", 0)],
        &["v0", "v1", "v2", "v3", "v4", "v5", "v6", "v7", "v8"],
    )
    .expect("signature")
}

pub fn term_parse_benchmark(c: &mut Criterion) {
    let sig = sig();
    let input = "A(A(C(A(v4, C(A(v5, v6)))), A(C(A(B, v7)), A(B, C(B)))), C(A(B, v8)))";

    c.bench_function("parse", |b| {
        b.iter(|| parse_term(black_box(&sig), black_box(input)))
    });
}

pub fn term_rewrite_benchmark(c: &mut Criterion) {
    let sig = sig();
    let trs = parse_trs(&sig, "A(B, v0) = v0; C(C(v0)) = v0; A(C(v0), v0) = B").expect("parsed TRS");
    let term = parse_term(&sig, "C(C(A(C(A(B, C(C(B)))), A(B, C(C(v1))))))").expect("parsed term");

    c.bench_function("rewrite", |b| b.iter(|| black_box(&trs).rewrite(black_box(&term))));
    c.bench_function("normalize", |b| {
        b.iter(|| black_box(&trs).normalize(black_box(&term), 100))
    });
}

pub fn term_unify_benchmark(c: &mut Criterion) {
    let sig = sig();
    let t1 = parse_term(&sig, "A(A(C(A(B, v0)), A(v1, v2)), C(A(v3, C(B))))").expect("parse of t1");
    let t2 = parse_term(
        &sig,
        "A(A(C(A(v4, C(A(v5, v6)))), A(C(A(B, v7)), A(B, C(B)))), C(A(B, v8)))",
    )
    .expect("parse of t2");

    let problem = vec![(t1, t2)];

    c.bench_function("unify", |b| b.iter(|| unify(black_box(&problem))));
}

pub fn term_substitute_benchmark(c: &mut Criterion) {
    let sig = sig();
    let term = parse_term(&sig, "A(A(v0, v1), A(v2, A(v1, v0)))").expect("parsed term");
    let b_term = parse_term(&sig, "B").expect("parsed B");
    let cb = parse_term(&sig, "C(B)").expect("parsed C(B)");

    let sub = Substitution(vec![
        (Variable::new("v0"), b_term.clone()),
        (Variable::new("v1"), cb.clone()),
        (Variable::new("v2"), Term::app("A", vec![b_term, cb])),
    ]);

    c.bench_function("substitute", |b| {
        b.iter(|| black_box(&term).substitute(black_box(&sub)))
    });
}

criterion_group!(
    term,
    term_parse_benchmark,
    term_unify_benchmark,
    term_substitute_benchmark,
    term_rewrite_benchmark,
);
criterion_main!(term);
