#![no_main]

use arbitrary::{Arbitrary, Unstructured};
use jsonstream::{AnyValue, Error, Reader, TokenRead, Writer, WriterOptions};
use libfuzzer_sys::fuzz_target;
use serde_json::{Map, Number, Value};

const MAX_DEPTH: usize = 100;

#[derive(Debug, Arbitrary)]
struct Flags {
    escape_non_ascii: bool,
    threshold: u8,
}

/// Reads one value with the high-level reader, bailing out on documents
/// nested deeper than serde_json will follow.
fn read<'a, T: TokenRead<'a>>(r: &mut Reader<'a, T>, depth: usize) -> jsonstream::Result<Value> {
    if depth > MAX_DEPTH {
        r.add_error(Error::msg("too deep"));
    }
    Ok(match r.any()? {
        AnyValue::Null => Value::Null,
        AnyValue::Bool(b) => Value::Bool(b),
        AnyValue::Number(n) => Number::from_f64(n).map_or(Value::Null, Value::Number),
        AnyValue::String(s) => Value::String(s.into_owned()),
        AnyValue::Array(mut arr) => {
            let mut items = Vec::new();
            while let Some(r) = arr.next() {
                items.push(read(r, depth + 1)?);
            }
            Value::Array(items)
        }
        AnyValue::Object(mut obj) => {
            let mut map = Map::new();
            while let Some((name, r)) = obj.next() {
                let name = name.to_owned();
                map.insert(name, read(r, depth + 1)?);
            }
            Value::Object(map)
        }
    })
}

fn write(w: &mut Writer<impl jsonstream::TokenWrite>, value: &Value) {
    match value {
        Value::Null => w.null(),
        Value::Bool(b) => w.bool(*b),
        Value::Number(n) => w.float(n.as_f64().unwrap_or(f64::NAN)),
        Value::String(s) => w.string(s),
        Value::Array(items) => {
            let mut arr = w.array();
            for item in items {
                write(arr.next(), item);
            }
            arr.end();
        }
        Value::Object(map) => {
            let mut obj = w.object();
            for (name, item) in map {
                write(obj.property(name), item);
            }
            obj.end();
        }
    }
}

fn roundtrip(data: &[u8]) {
    let mut u = Unstructured::new(data);
    let Ok(flags) = Flags::arbitrary(&mut u) else {
        return;
    };
    let doc = u.take_rest();

    // Skipping and reading must agree on whether the document is valid.
    let mut r = Reader::new(doc);
    let skipped = r.skip_value().and_then(|()| r.require_eof());

    let mut r = Reader::new(doc);
    let value = match read(&mut r, 0).and_then(|v| r.require_eof().map(|()| v)) {
        Ok(value) => value,
        Err(Error::Custom(_)) => return,
        Err(err) => {
            assert!(skipped.is_err(), "skip accepted what read rejected: {err}");
            assert!(
                serde_json::from_slice::<Value>(doc).is_err(),
                "rejected valid JSON: {err}"
            );
            return;
        }
    };
    assert!(skipped.is_ok(), "skip rejected what read accepted: {skipped:?}");

    // Whatever was read must encode identically in memory and streaming.
    let options = WriterOptions {
        escape_non_ascii: flags.escape_non_ascii,
    };
    let mut w = Writer::with_options(options);
    write(&mut w, &value);
    let bytes = w.into_bytes().expect("in-memory writer failed");

    let mut sink = Vec::new();
    let mut w = Writer::streaming_with_options(&mut sink, usize::from(flags.threshold), options);
    write(&mut w, &value);
    w.flush().expect("streaming writer failed");
    drop(w);
    assert_eq!(sink, bytes);

    if flags.escape_non_ascii {
        assert!(bytes.is_ascii());
    }
    assert!(
        serde_json::from_slice::<Value>(&bytes).is_ok(),
        "writer produced invalid JSON"
    );
    let mut r = Reader::new(&bytes);
    let reread = read(&mut r, 0).and_then(|v| r.require_eof().map(|()| v));
    assert_eq!(reread.ok(), Some(value));
}

fuzz_target!(|data: &[u8]| roundtrip(data));
