#![forbid(unsafe_code)]

use proptest::prelude::*;

use scpost_kernel_contracts::text::char_length;

fn mixed_width_char() -> impl Strategy<Value = char> {
    prop_oneof![
        // 1 byte
        (0x20u32..0x7F).prop_map(|c| char::from_u32(c).unwrap()),
        // 2 bytes
        (0x80u32..0x800).prop_map(|c| char::from_u32(c).unwrap()),
        // 3 bytes, skipping the surrogate block
        (0x800u32..0xD800).prop_map(|c| char::from_u32(c).unwrap()),
        (0xE000u32..0x1_0000).prop_map(|c| char::from_u32(c).unwrap()),
        // 4 bytes
        (0x1_0000u32..0x11_0000).prop_map(|c| char::from_u32(c).unwrap()),
    ]
}

proptest! {
    /// N known code points of varying widths count as N.
    #[test]
    fn prop_length_of_n_code_points_is_n(chars in prop::collection::vec(mixed_width_char(), 0..300)) {
        let text: String = chars.iter().collect();
        prop_assert_eq!(char_length(text.as_bytes()), Ok(chars.len()));
    }

    /// Accept/reject agrees with the standard decoder on arbitrary bytes, and the
    /// reported offset is where valid input stops.
    #[test]
    fn prop_agrees_with_std_decoder(bytes in prop::collection::vec(any::<u8>(), 0..64)) {
        match (char_length(&bytes), std::str::from_utf8(&bytes)) {
            (Ok(n), Ok(s)) => prop_assert_eq!(n, s.chars().count()),
            (Err(e), Err(std_err)) => prop_assert_eq!(e.offset, std_err.valid_up_to()),
            (ours, theirs) => prop_assert!(false, "disagreement: {:?} vs {:?}", ours, theirs),
        }
    }

    /// Corrupting valid text with a lone continuation byte is always caught.
    #[test]
    fn prop_inserted_stray_continuation_is_rejected(
        chars in prop::collection::vec(mixed_width_char(), 1..50),
        at in any::<prop::sample::Index>(),
    ) {
        let text: String = chars.iter().collect();
        let boundaries: Vec<usize> = text.char_indices().map(|(i, _)| i).collect();
        let pos = boundaries[at.index(boundaries.len())];
        let mut bytes = text.into_bytes();
        bytes.insert(pos, 0x80);
        prop_assert!(char_length(&bytes).is_err());
    }
}

#[test]
fn at_strlen_props_01_budget_example_byte_length_exceeds_char_length() {
    let text = "龍".repeat(100);
    assert_eq!(text.len(), 300);
    assert_eq!(char_length(text.as_bytes()), Ok(100));
}
