// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use serde_json::json;

#[test]
fn json_codec_round_trips_structured_values() {
    let codec = JsonCodec;
    let value = json!({"a": 1, "b": [true, null, "x"]});
    let bytes = codec.encode(&value).unwrap();
    assert_eq!(codec.decode(&bytes).unwrap(), value);
}

#[test]
fn msgpack_codec_round_trips_structured_values() {
    let codec = MsgpackCodec;
    let value = json!({"a": 1, "b": [true, null, "x"]});
    let bytes = codec.encode(&value).unwrap();
    assert_eq!(codec.decode(&bytes).unwrap(), value);
}

#[test]
fn json_codec_rejects_malformed_bytes() {
    let codec = JsonCodec;
    assert!(codec.decode(b"not json").is_err());
}

#[test]
fn typed_round_trip_helpers_work_across_codecs() {
    #[derive(serde::Serialize, serde::Deserialize, PartialEq, Debug)]
    struct Sample {
        name: String,
        count: u32,
    }

    let sample = Sample { name: "leaf".to_string(), count: 3 };
    for codec in [Box::new(JsonCodec) as Box<dyn Codec>, Box::new(MsgpackCodec) as Box<dyn Codec>] {
        let bytes = encode_typed(codec.as_ref(), &sample).unwrap();
        let decoded: Sample = decode_typed(codec.as_ref(), &bytes).unwrap();
        assert_eq!(decoded, sample);
    }
}
