//! Text utilities: mention extraction and long-message splitting

use regex::Regex;
use std::sync::OnceLock;

/// Longest text that fits in a single post
pub const MAX_CHUNK_CHARS: usize = 140;

/// Marker appended to every chunk that continues in the next one
pub const CONTINUATION_MARKER: &str = "...";

/// Extract `@handle` mentions from a status text
///
/// A match is skipped when the character right before the `@` exists and is
/// not a space, which filters out e-mail addresses. Handles are lowercased;
/// duplicates are kept, in order of appearance.
pub fn mentions(text: &str) -> Vec<String> {
    static MENTION_REGEX: OnceLock<Regex> = OnceLock::new();
    let re = MENTION_REGEX.get_or_init(|| Regex::new(r"@(\w+)").expect("valid mention regex"));

    re.captures_iter(text)
        .filter_map(|cap| {
            let at = cap.get(0)?.start();
            if let Some(prev) = text[..at].chars().next_back() {
                if prev != ' ' {
                    return None;
                }
            }
            cap.get(1).map(|m| m.as_str().to_lowercase())
        })
        .collect()
}

/// Split a long text into chunks suitable for posting one after another
///
/// Text of at most [`MAX_CHUNK_CHARS`] characters is returned unchanged as a
/// single chunk. Longer text is packed greedily, word by word; every chunk
/// except the last ends with [`CONTINUATION_MARKER`] and stays within the
/// limit including the marker. A single word too long for any chunk is
/// emitted on its own, unmarked.
pub fn split_message(long_text: &str) -> Vec<String> {
    if long_text.chars().count() <= MAX_CHUNK_CHARS {
        return vec![long_text.to_string()];
    }

    let budget = MAX_CHUNK_CHARS - CONTINUATION_MARKER.len();
    let mut sections = Vec::new();
    let mut chunk = String::with_capacity(MAX_CHUNK_CHARS);
    let mut chunk_len = 0;

    for word in long_text.split_whitespace() {
        let word_len = word.chars().count();

        if word_len > budget {
            // Oversized word: flush what we have, then emit the word alone
            if chunk_len > 0 {
                chunk.push_str(CONTINUATION_MARKER);
                sections.push(std::mem::take(&mut chunk));
                chunk_len = 0;
            }
            sections.push(word.to_string());
            continue;
        }

        let needed = if chunk_len == 0 { word_len } else { chunk_len + 1 + word_len };
        if needed > budget && chunk_len > 0 {
            chunk.push_str(CONTINUATION_MARKER);
            sections.push(std::mem::take(&mut chunk));
            chunk.push_str(word);
            chunk_len = word_len;
        } else {
            if chunk_len > 0 {
                chunk.push(' ');
            }
            chunk.push_str(word);
            chunk_len = needed;
        }
    }

    if chunk_len > 0 {
        sections.push(chunk);
    }
    sections
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mentions_skip_email() {
        assert_eq!(
            mentions("hello @bob and @carol, cc user@example.com"),
            vec!["bob".to_string(), "carol".to_string()]
        );
    }

    #[test]
    fn test_mentions_at_start_and_lowercase() {
        assert_eq!(mentions("@Alice hi @BOB"), vec!["alice", "bob"]);
    }

    #[test]
    fn test_mentions_keep_duplicates() {
        assert_eq!(mentions("@bob @bob"), vec!["bob", "bob"]);
    }

    #[test]
    fn test_mentions_preceded_by_punctuation_are_skipped() {
        // Only a plain space counts as a separator
        assert!(mentions("(@bob)").is_empty());
        assert!(mentions("line\n@bob").is_empty());
        assert!(mentions("no mentions here").is_empty());
    }

    #[test]
    fn test_split_short_message() {
        let text = "three short words";
        assert_eq!(split_message(text), vec![text.to_string()]);
    }

    #[test]
    fn test_split_exactly_at_limit() {
        let text = "a".repeat(MAX_CHUNK_CHARS);
        assert_eq!(split_message(&text), vec![text]);
    }

    #[test]
    fn test_split_long_message() {
        let text = "lorem ipsum dolor sit amet ".repeat(20);
        let chunks = split_message(&text);
        assert!(chunks.len() > 1);
        for chunk in &chunks {
            assert!(chunk.chars().count() <= MAX_CHUNK_CHARS, "chunk too long: {chunk:?}");
        }
        let (last, rest) = chunks.split_last().unwrap();
        assert!(rest.iter().all(|c| c.ends_with(CONTINUATION_MARKER)));
        assert!(!last.ends_with(CONTINUATION_MARKER));

        // No words lost or reordered
        let rebuilt: Vec<&str> = chunks
            .iter()
            .flat_map(|c| c.trim_end_matches(CONTINUATION_MARKER).split_whitespace())
            .collect();
        let original: Vec<&str> = text.split_whitespace().collect();
        assert_eq!(rebuilt, original);
    }

    #[test]
    fn test_split_counts_characters_not_bytes() {
        let text = "é".repeat(100) + " " + &"ü".repeat(30);
        // 131 characters but far more bytes
        assert_eq!(split_message(&text).len(), 1);
    }

    #[test]
    fn test_split_oversized_word() {
        let long_word = "x".repeat(200);
        let text = format!("start {long_word} end");
        let chunks = split_message(&text);
        assert_eq!(chunks, vec!["start...".to_string(), long_word, "end".to_string()]);
    }
}
