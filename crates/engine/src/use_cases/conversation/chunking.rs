//! Reply segmentation for progressive display.
//!
//! Replies are split on terminal punctuation and re-accumulated into chunks
//! bounded by a word budget. Sentences are never split: a single sentence
//! over budget becomes its own oversized chunk. Terminal `!` and `?` are
//! normalized to `.`.

/// Word budget per displayed chunk.
pub const MAX_WORDS_PER_CHUNK: usize = 25;

/// Split a reply into ordered, non-empty chunks of at most `max_words`
/// whitespace-delimited tokens (except for single oversized sentences).
pub fn split_reply(reply: &str, max_words: usize) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut current = String::new();

    for sentence in reply
        .split(['.', '!', '?'])
        .filter(|s| !s.trim().is_empty())
    {
        if !current.is_empty() && word_count(&format!("{current}{sentence}")) > max_words {
            chunks.push(current.trim().to_string());
            current.clear();
        }
        current.push_str(sentence);
        current.push('.');
    }

    let last = current.trim();
    if !last.is_empty() {
        chunks.push(last.to_string());
    }
    chunks
}

/// Whitespace-token count: a deliberately approximate stand-in for a real
/// tokenizer.
fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}
