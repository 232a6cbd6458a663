//! Round-trip tests
//!
//! Flush or close, then decode the file from disk: the bytes must match
//! what was written, exactly and in call order.

use crate::{split_records, temp_writer};
use rand::{Rng, SeedableRng};

fn frag(s: &str) -> Option<&[u8]> {
    Some(s.as_bytes())
}

#[test]
fn test_two_lines_flush_read_back() {
    let (_dir, writer) = temp_writer();

    writer.write_two_lines(b"line1_1", b"line2_1").unwrap();
    writer.flush().unwrap();

    assert_eq!(writer.read_all(), b"\nline1_1\nline2_1");
    writer.close().unwrap();
}

#[test]
fn test_six_fragment_record() {
    let (_dir, writer) = temp_writer();

    writer
        .write_line_fragments(
            &[
                frag("line1_1"),
                frag("line1_2"),
                frag("line1_3"),
                frag("line1_4"),
                frag("line1_5"),
                frag("line1_6"),
            ],
            &[
                frag("line2_1"),
                frag("line2_2"),
                frag("line2_3"),
                frag("line2_4"),
                frag("line2_5"),
                frag("line2_6"),
            ],
        )
        .unwrap();
    writer.flush().unwrap();

    let expected: &[u8] = b"\nline1_1line1_2line1_3line1_4line1_5line1_6\nline2_1line2_2line2_3line2_4line2_5line2_6";
    assert_eq!(writer.read_all(), expected);
}

#[test]
fn test_fragment_concatenation_skips_absent() {
    let (_dir, writer) = temp_writer();

    writer
        .write_line_fragments(&[frag("a"), frag("b")], &[None, frag("c"), None])
        .unwrap();
    writer.flush().unwrap();

    assert_eq!(writer.read_all(), b"\nab\nc");
}

#[test]
fn test_json_envelope_fragments() {
    let (_dir, writer) = temp_writer();
    let body = r#"{\"user\":42}"#;

    writer
        .write_line_fragments(
            &[frag("{\"body\":\""), frag(body), frag("\"}"), None, None, None],
            &[frag(r#"{"ok":true}"#), None, None, None, None, None],
        )
        .unwrap();
    writer.close().unwrap();

    let records = split_records(&writer.read_all());
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].0, br#"{"body":"{\"user\":42}"}"#.to_vec());
    assert_eq!(records[0].1, br#"{"ok":true}"#.to_vec());
}

#[test]
fn test_random_payloads_round_trip_at_every_flush() {
    let (_dir, writer) = temp_writer();
    let mut rng = rand::rngs::StdRng::seed_from_u64(0x6A5E_ED01);

    let mut expected = Vec::new();
    for round in 0..20 {
        for _ in 0..50 {
            let len = rng.gen_range(0..2048);
            let payload: Vec<u8> = (0..len).map(|_| rng.gen()).collect();
            assert_eq!(writer.write_bytes(&payload).unwrap(), payload.len());
            expected.extend_from_slice(&payload);
        }
        writer.flush().unwrap();
        assert_eq!(writer.read_all(), expected, "mismatch after flush {}", round);
    }

    writer.close().unwrap();
    assert_eq!(writer.read_all(), expected);
}

#[test]
fn test_payload_larger_than_buffer() {
    let (_dir, writer) = temp_writer();
    let big: Vec<u8> = (0..200_000u32).map(|i| (i % 251) as u8).collect();

    writer.write_two_lines(&big, b"tail").unwrap();
    writer.close().unwrap();

    let decoded = writer.read_all();
    assert_eq!(decoded.len(), big.len() + 2 + 4);
    assert_eq!(&decoded[1..1 + big.len()], big.as_slice());
    assert!(decoded.ends_with(b"\ntail"));
}

#[test]
fn test_strings_and_formatting() {
    use std::io::Write;

    let (_dir, writer) = temp_writer();
    writer.write_str("\nGET /index.html").unwrap();
    write!(&writer, "\n{} {}", 200, "OK").unwrap();
    writer.flush().unwrap();

    let records = split_records(&writer.read_all());
    assert_eq!(records, vec![(b"GET /index.html".to_vec(), b"200 OK".to_vec())]);
}
