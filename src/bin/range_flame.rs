use rangecoder::range::{RangeDecoder, RangeEncoder};
use std::io::Cursor;

fn main() {
    let input = (0..10000).map(|i| i % 3).collect::<Vec<usize>>();
    let count = [2u64, 1, 1];
    let count_cum = [2u64, 3, 4];

    for _ in 0..1000 {
        let mut encoder = RangeEncoder::new(Cursor::new(Vec::new()));
        for &index in &input {
            encoder.encode(&count, &count_cum, index).unwrap();
        }
        let stream = encoder.finish().unwrap();

        let mut decoder = RangeDecoder::new(stream).unwrap();
        for _ in 0..input.len() {
            decoder.decode(&count, &count_cum).unwrap();
        }
    }
}
