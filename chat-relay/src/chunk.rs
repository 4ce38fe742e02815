//! Splits reply text into transport-sized pieces.

/// Largest text a single outbound message may carry, in UTF-16 code units (Telegram's measure).
pub const MAX_CHUNK_UNITS: usize = 4096;

/// Splits `text` into consecutive pieces of at most `max_units` UTF-16 code units.
///
/// A piece is cut before the character that would take it past `max_units`, so a surrogate pair
/// (emoji and other astral-plane characters) is never split and a full piece may end one unit
/// short. The pieces concatenate back to `text`. Empty text gives no pieces. `max_units` of 0 is
/// treated as 1; a character wider than the limit gets a piece of its own.
pub fn split_into_chunks(text: &str, max_units: usize) -> Vec<&str> {
    let max_units = max_units.max(1);
    let mut chunks = Vec::with_capacity(text.len() / max_units + 1);
    let mut start = 0;
    let mut units = 0;

    for (idx, ch) in text.char_indices() {
        let width = ch.len_utf16();
        if units > 0 && units + width > max_units {
            chunks.push(&text[start..idx]);
            start = idx;
            units = 0;
        }
        units += width;
    }
    if start < text.len() {
        chunks.push(&text[start..]);
    }
    chunks
}

#[cfg(test)]
mod tests {
    use super::*;

    fn units(s: &str) -> usize {
        s.encode_utf16().count()
    }

    #[test]
    fn test_empty_text_has_no_chunks() {
        assert!(split_into_chunks("", MAX_CHUNK_UNITS).is_empty());
    }

    #[test]
    fn test_short_text_is_one_chunk() {
        assert_eq!(split_into_chunks("hello", MAX_CHUNK_UNITS), vec!["hello"]);
    }

    #[test]
    fn test_exact_multiple_has_no_trailing_empty_chunk() {
        let text = "x".repeat(MAX_CHUNK_UNITS * 2);
        let chunks = split_into_chunks(&text, MAX_CHUNK_UNITS);
        assert_eq!(chunks.len(), 2);
        assert!(chunks.iter().all(|c| units(c) == MAX_CHUNK_UNITS));
    }

    #[test]
    fn test_5000_chars_split_4096_then_904() {
        let text = "A".repeat(5000);
        let chunks = split_into_chunks(&text, MAX_CHUNK_UNITS);
        assert_eq!(chunks.len(), 2);
        assert_eq!(units(chunks[0]), 4096);
        assert_eq!(units(chunks[1]), 904);
    }

    #[test]
    fn test_chunk_count_and_lossless_for_many_lengths() {
        for len in [1usize, 2, 9, 10, 11, 99, 100, 101, 1000] {
            let text: String = (0..len).map(|i| char::from(b'a' + (i % 26) as u8)).collect();
            let chunks = split_into_chunks(&text, 10);
            assert_eq!(chunks.len(), (len + 9) / 10, "len {}", len);
            assert_eq!(chunks.concat(), text);
            let (last, full) = chunks.split_last().unwrap();
            assert!(full.iter().all(|c| units(c) == 10));
            assert!(units(last) <= 10 && !last.is_empty());
        }
    }

    #[test]
    fn test_bmp_multibyte_characters_count_one_unit_each() {
        let text = "çãoé".repeat(3);
        let chunks = split_into_chunks(&text, 4);
        assert_eq!(chunks, vec!["çãoé", "çãoé", "çãoé"]);
    }

    #[test]
    fn test_emoji_reply_stays_within_telegram_limit() {
        let text = "😀".repeat(5000);
        let chunks = split_into_chunks(&text, MAX_CHUNK_UNITS);

        assert_eq!(chunks.concat(), text);
        assert_eq!(chunks.len(), 3);
        assert!(chunks.iter().all(|c| units(c) <= MAX_CHUNK_UNITS));
        assert_eq!(units(chunks[0]), 4096);
        assert_eq!(units(chunks[1]), 4096);
        assert_eq!(units(chunks[2]), 1808);
    }

    #[test]
    fn test_surrogate_pair_is_never_split() {
        // 'a' then an emoji: the pair would straddle the 2-unit boundary, so it moves to the next piece.
        let chunks = split_into_chunks("a🎉b🎉", 2);
        assert_eq!(chunks, vec!["a", "🎉", "b", "🎉"]);
        assert!(chunks.iter().all(|c| units(c) <= 2));
    }

    #[test]
    fn test_zero_max_is_treated_as_one() {
        assert_eq!(split_into_chunks("abc", 0), vec!["a", "b", "c"]);
        assert_eq!(split_into_chunks("🎉x", 0), vec!["🎉", "x"]);
    }
}
