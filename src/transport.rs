//! Caller-side helpers for pushing a rendered report through a chat channel.

use std::mem;

/// Longest message the chat transport accepts, in characters.
pub const MAX_MESSAGE_LEN: usize = 4000;

/// Splits `text` into chunks of at most `limit` characters.
///
/// Breaks after a newline whenever a whole line still fits, and only cuts a
/// line apart when it is longer than `limit` on its own. Concatenating the
/// chunks gives back `text` exactly.
pub fn split_message(text: &str, limit: usize) -> Vec<String> {
    let limit = limit.max(1);
    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for line in text.split_inclusive('\n') {
        let line_len = line.chars().count();

        if current_len + line_len > limit && !current.is_empty() {
            chunks.push(mem::take(&mut current));
            current_len = 0;
        }

        if line_len > limit {
            for c in line.chars() {
                if current_len == limit {
                    chunks.push(mem::take(&mut current));
                    current_len = 0;
                }
                current.push(c);
                current_len += 1;
            }
        } else {
            current.push_str(line);
            current_len += line_len;
        }
    }

    if !current.is_empty() {
        chunks.push(current);
    }
    chunks
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_text_is_one_chunk() {
        assert_eq!(split_message("Sun Opposition Moon\n", MAX_MESSAGE_LEN), vec!["Sun Opposition Moon\n"]);
        assert!(split_message("", MAX_MESSAGE_LEN).is_empty());
    }

    #[test]
    fn test_breaks_on_lines() {
        let text = "aaaa\nbbbb\ncccc\n";
        assert_eq!(split_message(text, 10), vec!["aaaa\nbbbb\n", "cccc\n"]);
    }

    #[test]
    fn test_long_line_is_cut() {
        let chunks = split_message("abcdefghij\nxy", 4);
        assert_eq!(chunks, vec!["abcd", "efgh", "ij\n", "xy"]);
    }

    #[test]
    fn test_counts_characters_not_bytes() {
        let text = "Жизненный период\n".repeat(300);
        let chunks = split_message(&text, MAX_MESSAGE_LEN);
        assert!(chunks.len() > 1);
        assert!(chunks.iter().all(|chunk| chunk.chars().count() <= MAX_MESSAGE_LEN));
        assert_eq!(chunks.concat(), text);
    }
}
