use criterion::BenchmarkId;
use criterion::Criterion;
use criterion::Throughput;
use criterion::black_box;
use criterion::criterion_group;
use criterion::criterion_main;
use gqlengine_parser::GraphQLParser;
use gqlengine_parser::token_source::StrGraphQLTokenSource;

const SMALL_QUERY: &str = r#"
query Hero($episode: Episode = JEDI) {
  hero(episode: $episode) {
    name
    ... on Droid { primaryFunction }
    friends { name }
  }
}
"#;

/// Builds a query with `width` sibling fields per level, `depth` levels
/// deep, plus one fragment spread per level.
fn synthetic_query(width: usize, depth: usize) -> String {
    fn level(out: &mut String, width: usize, depth: usize) {
        out.push_str("{ ");
        for i in 0..width {
            out.push_str(&format!("f{i}(arg: {i}, s: \"v{i}\") "));
            if depth > 1 && i == 0 {
                level(out, width, depth - 1);
            }
        }
        out.push_str("...Frag }");
    }

    let mut out = String::from("query Synthetic ");
    level(&mut out, width, depth);
    out.push_str("\nfragment Frag on T { a b: c @include(if: true) }\n");
    out
}

fn lex(c: &mut Criterion) {
    let mut group = c.benchmark_group("lex");
    for (label, source) in [
        ("small", SMALL_QUERY.to_string()),
        ("large", synthetic_query(50, 8)),
    ] {
        group.throughput(Throughput::Bytes(source.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(label), &source, |b, source| {
            b.iter(|| black_box(StrGraphQLTokenSource::new(source).count()))
        });
    }
    group.finish();
}

fn parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_executable");
    for (label, source) in [
        ("small", SMALL_QUERY.to_string()),
        ("medium", synthetic_query(10, 4)),
        ("large", synthetic_query(50, 8)),
    ] {
        group.throughput(Throughput::Bytes(source.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(label), &source, |b, source| {
            b.iter(|| black_box(GraphQLParser::new(source).parse_executable_document()))
        });
    }
    group.finish();
}

criterion_group!(benches, lex, parse);
criterion_main!(benches);
