use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};
use draftforge_config::HeadingHeuristics;
use draftforge_engine::{parse_sections, parse_table, render_sections};

fn proposal_markup() -> String {
    let mut out = String::new();
    for section in 0..24 {
        out.push_str(&format!("<h2>Section {section}</h2>"));
        out.push_str(
            "<p>Body copy for this section, with <b>bold</b>, <i>italic</i> and a \
             <a href=\"https://example.com\">link</a> to keep the resolver honest.</p>",
        );
        out.push_str("<p>• First bullet</p><p>• Second bullet</p><p>• Third bullet</p>");
        out.push_str("<ol><li>one</li><li>two<ol><li>two-a</li></ol></li></ol>");
    }
    out
}

fn bench_parse(c: &mut Criterion) {
    let markup = proposal_markup();
    let heuristics = HeadingHeuristics::default();

    c.bench_function("parse_sections", |b| {
        b.iter(|| parse_sections(black_box(&markup), &heuristics));
    });
}

fn bench_render(c: &mut Criterion) {
    let markup = proposal_markup();
    let sections = parse_sections(&markup, &HeadingHeuristics::default());

    c.bench_function("render_sections", |b| {
        b.iter(|| render_sections(black_box(&sections)));
    });
}

fn bench_table(c: &mut Criterion) {
    let mut text = String::from("Service\tCost\tNote\n");
    for row in 0..200 {
        text.push_str(&format!("Line item {row}\t{row}00\tas scoped\n"));
    }

    c.bench_function("parse_table", |b| {
        b.iter(|| parse_table(black_box(&text)));
    });
}

criterion_group!(benches, bench_parse, bench_render, bench_table);
criterion_main!(benches);
