use criterion::{black_box, criterion_group, criterion_main, Criterion};

use structxml::{decode, encode, Object, Value};

const SIMPLE_XML: &str = "<root><name>test</name><value>42</value></root>";
const ATTRIBUTED_XML: &str =
    "<catalog><book id=\"1\" price=\"9.99\">first</book><book id=\"2\" price=\"14.50\">second</book></catalog>";
const NESTED_XML: &str = "<a><b><c><d>deep</d></c></b><b><c><d>deeper</d></c></b></a>";

fn sample_value() -> Value {
    let mut book = Object::new();
    book.insert("@id", Value::Number(1.0));
    book.insert("title", Value::from("first"));
    book.insert("tags", Value::from(vec![Value::from("x"), Value::from("y")]));

    let mut root = Object::new();
    root.insert("book", Value::Object(book));
    Value::Object(root)
}

fn bench_decode_simple(c: &mut Criterion) {
    c.bench_function("decode_simple", |b| b.iter(|| decode(black_box(SIMPLE_XML))));
}

fn bench_decode_attributed(c: &mut Criterion) {
    c.bench_function("decode_attributed", |b| {
        b.iter(|| decode(black_box(ATTRIBUTED_XML)))
    });
}

fn bench_decode_nested(c: &mut Criterion) {
    c.bench_function("decode_nested", |b| b.iter(|| decode(black_box(NESTED_XML))));
}

fn bench_encode(c: &mut Criterion) {
    let value = sample_value();
    c.bench_function("encode_value", |b| b.iter(|| encode(black_box(&value))));
}

fn bench_roundtrip(c: &mut Criterion) {
    c.bench_function("roundtrip", |b| {
        b.iter(|| {
            let value = decode(black_box(ATTRIBUTED_XML))?;
            encode(&value)
        })
    });
}

criterion_group!(
    benches,
    bench_decode_simple,
    bench_decode_attributed,
    bench_decode_nested,
    bench_encode,
    bench_roundtrip
);
criterion_main!(benches);
