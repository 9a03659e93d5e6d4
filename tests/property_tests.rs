use proptest::prelude::*;
use rangecoder::range::{ByteOrder, RangeConfig, RangeDecoder, RangeEncoder};
use std::io::Cursor;

fn cumulative(count: &[u64]) -> Vec<u64> {
    let mut cum = Vec::with_capacity(count.len());
    let mut total = 0;
    for &c in count {
        total += c;
        cum.push(total);
    }
    cum
}

proptest! {
    #[test]
    fn test_range_roundtrip(
        weights in prop::collection::vec(1u64..1000, 1..20),
        seq in prop::collection::vec(0usize..20, 1..300),
        little in any::<bool>(),
        wide in any::<bool>(),
    ) {
        // Widths and orders must round-trip alike; the 32-bit register
        // keeps scale bounded by 2^16, which the weight ranges satisfy.
        let config = RangeConfig {
            range_size: if wide { 64 } else { 32 },
            precision: 8,
            byte_order: if little { ByteOrder::Little } else { ByteOrder::Big },
        };

        let input: Vec<usize> = seq.into_iter().map(|s| s % weights.len()).collect();
        let count_cum = cumulative(&weights);

        let mut encoder = RangeEncoder::with_config(Cursor::new(Vec::new()), config).unwrap();
        for &index in &input {
            encoder.encode(&weights, &count_cum, index).unwrap();
        }
        let stream = encoder.finish().unwrap();

        let mut decoder = RangeDecoder::with_config(stream, config).unwrap();
        let mut output = Vec::with_capacity(input.len());
        for _ in 0..input.len() {
            output.push(decoder.decode(&weights, &count_cum).unwrap());
        }

        prop_assert_eq!(input, output);
    }
}
