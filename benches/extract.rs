use criterion::{Criterion, black_box, criterion_group, criterion_main};
use go_extractor::Extractor;
use go_extractor::extractor::syntax::SourceFile;
use std::fmt::Write;
use std::path::Path;

/// A file with `n` models and four routes per model.
fn synthetic_source(n: usize) -> String {
    let mut source = String::from("package bench\n\n");
    for i in 0..n {
        writeln!(
            source,
            "type Model{i} struct {{\n    gorm.Model\n    Name string\n    Refs []*Ref\n    Extra map[string]int\n}}\n"
        )
        .unwrap();
    }
    source.push_str("func routes(r *gin.Engine) {\n");
    for i in 0..n {
        writeln!(source, "    r.GET(\"/m{i}\", list{i})").unwrap();
        writeln!(source, "    r.POST(\"/m{i}\", create{i})").unwrap();
        writeln!(source, "    r.DELETE(\"/m{i}/:id\", remove{i})").unwrap();
        writeln!(source, "    helper{i}(\"/not-a-route\")").unwrap();
    }
    source.push_str("}\n");
    source
}

fn bench_extract(c: &mut Criterion) {
    let source = synthetic_source(500);
    let path = Path::new("bench.go");
    let extractor = Extractor::new();

    c.bench_function("parse_and_extract_500", |b| {
        b.iter(|| {
            let result = extractor.extract_source(path, black_box(&source)).unwrap();
            black_box(result.nodes().len())
        })
    });

    let file = SourceFile::parse(path, source.clone()).unwrap();
    c.bench_function("extract_parsed_500", |b| {
        b.iter(|| black_box(extractor.extract(black_box(&file)).nodes().len()))
    });
}

criterion_group!(benches, bench_extract);
criterion_main!(benches);
