// Sentence and word segmentation.
//
// Boundaries follow Unicode Text Segmentation (UAX #29) via the
// `unicode-segmentation` crate, with one correction on top: UAX #29 breaks
// after "Dr." or "Mr." whenever the next word is capitalised, so a segment
// ending in a known abbreviation is glued back onto the following one. A
// lone initial is glued only when a name-like word follows it.
//
// Everything here is pure. Empty or whitespace-only input yields an empty
// Vec, never an error.

use unicode_segmentation::UnicodeSegmentation;

/// Abbreviations that end in a period but almost never end a sentence.
/// Compared lowercased against the last whitespace token of a segment.
const ABBREVIATIONS: &[&str] = &[
    "mr.", "mrs.", "ms.", "dr.", "prof.", "sr.", "jr.", "st.", "mt.", "vs.", "e.g.", "i.e.",
    "cf.", "fig.", "vol.", "inc.", "ltd.", "co.", "corp.", "dept.", "approx.", "jan.", "feb.",
    "mar.", "apr.", "jun.", "jul.", "aug.", "sep.", "sept.", "oct.", "nov.", "dec.",
];

/// Capitalised words that usually open a new sentence, so a single capital
/// before them ("an A. I was") is a sentence end rather than an initial.
const SENTENCE_STARTERS: &[&str] = &[
    "after", "also", "an", "and", "as", "at", "but", "for", "he", "her", "his", "however",
    "i", "if", "in", "it", "its", "my", "no", "on", "our", "she", "so", "that", "the", "their",
    "then", "there", "these", "they", "this", "those", "we", "when", "yes", "you",
];

/// Split text into sentences, in order, each trimmed of surrounding whitespace.
pub fn split_sentences(text: &str) -> Vec<String> {
    let mut sentences: Vec<String> = Vec::new();

    for segment in text.split_sentence_bounds() {
        let segment = segment.trim();
        if segment.is_empty() {
            continue;
        }
        match sentences.last_mut() {
            Some(previous) if continues_after(previous, segment) => {
                previous.push(' ');
                previous.push_str(segment);
            }
            _ => sentences.push(segment.to_string()),
        }
    }

    sentences
}

/// Split text into word tokens, in order.
///
/// Punctuation marks are kept as their own tokens ("file." gives "file" and
/// "."), whitespace is dropped. This matches how conventional NLP word
/// tokenizers count tokens for lexical-diversity measures.
pub fn split_words(text: &str) -> Vec<&str> {
    text.split_word_bounds()
        .filter(|token| !token.trim().is_empty())
        .collect()
}

/// Number of whitespace-separated tokens, the plain "word count" used for
/// sentence lengths and document metadata.
pub fn whitespace_word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Whether a boundary between `previous` and `next` is a false break.
fn continues_after(previous: &str, next: &str) -> bool {
    let Some(last) = previous.split_whitespace().last() else {
        return false;
    };
    let lower = last.to_lowercase();
    if ABBREVIATIONS.contains(&lower.as_str()) {
        return true;
    }
    // "No. 5", but not "He said no. Then"
    if lower == "no." {
        return next.starts_with(|c: char| c.is_ascii_digit());
    }
    // Single initials: "J. R. R. Tolkien"
    let mut chars = last.chars();
    let is_initial = matches!(
        (chars.next(), chars.next(), chars.next()),
        (Some(c), Some('.'), None) if c.is_uppercase()
    );
    is_initial && starts_name(next)
}

/// Whether `text` opens with a capitalised word that isn't a common
/// sentence opener.
fn starts_name(text: &str) -> bool {
    let Some(word) = text.split_whitespace().next() else {
        return false;
    };
    let word = word.trim_end_matches(|c: char| !c.is_alphanumeric());
    word.starts_with(char::is_uppercase)
        && !SENTENCE_STARTERS.contains(&word.to_lowercase().as_str())
}
