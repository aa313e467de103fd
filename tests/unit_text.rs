// Segmentation, extraction and document-model behavior.

use draftcheck::corpus::extract::{extract_bytes, extract_str};
use draftcheck::error::CheckError;
use draftcheck::style::profile::{average_sentence_length, type_token_ratio};
use draftcheck::text::document::{Document, DocumentMetadata};
use draftcheck::text::segment::{split_sentences, split_words, whitespace_word_count};

// ============================================================
// Sentence segmentation
// ============================================================

#[test]
fn two_paragraph_document_yields_its_two_sentences() {
    let doc = Document::new(
        "a.txt",
        vec![
            "This is a test file.".to_string(),
            "This is another paragraph.".to_string(),
        ],
    );
    assert_eq!(
        doc.sentences(),
        vec!["This is a test file.", "This is another paragraph."]
    );
}

#[test]
fn first_paragraph_has_no_repeated_tokens() {
    assert_eq!(type_token_ratio("This is a test file."), 1.0);
    assert_eq!(split_words("This is a test file.").len(), 6);
}

#[test]
fn blank_text_has_no_sentences_or_words() {
    assert!(split_sentences("").is_empty());
    assert!(split_sentences(" \n\t ").is_empty());
    assert!(split_words("   ").is_empty());
    assert_eq!(whitespace_word_count(""), 0);
}

#[test]
fn question_and_exclamation_end_sentences() {
    let sentences = split_sentences("Is it raining? Yes! Bring an umbrella.");
    assert_eq!(sentences, vec!["Is it raining?", "Yes!", "Bring an umbrella."]);
}

#[test]
fn titles_do_not_split_sentences() {
    let sentences = split_sentences("We met Dr. Smith yesterday. She was kind.");
    assert_eq!(
        sentences,
        vec!["We met Dr. Smith yesterday.", "She was kind."]
    );
}

#[test]
fn short_answers_and_letter_grades_end_sentences() {
    assert_eq!(
        split_sentences("He said no. Then he left the room."),
        vec!["He said no.", "Then he left the room."]
    );
    assert_eq!(
        split_sentences("My grade was an A. I was happy."),
        vec!["My grade was an A.", "I was happy."]
    );
    // 3 and 5 words, not one 8-word sentence
    assert_eq!(average_sentence_length("He said no. Then he left the room."), 4.0);
}

#[test]
fn sentence_order_is_preserved() {
    let text = "First one. Second one. Third one.";
    let sentences = split_sentences(text);
    assert_eq!(sentences.len(), 3);
    assert!(sentences[0].starts_with("First"));
    assert!(sentences[2].starts_with("Third"));
}

// ============================================================
// Extraction -> Document
// ============================================================

#[test]
fn extracted_paragraphs_keep_file_order() {
    let paragraphs = extract_str("Alpha paragraph.\n\nBeta paragraph.\n\nGamma paragraph.");
    let doc = Document::new("essay.txt", paragraphs);
    assert_eq!(doc.paragraphs.len(), 3);
    assert_eq!(doc.paragraphs[1], "Beta paragraph.");
    assert_eq!(doc.full_text(), "Alpha paragraph.\nBeta paragraph.\nGamma paragraph.");
}

#[test]
fn extraction_of_blank_upload_is_empty_document() {
    assert!(matches!(
        extract_bytes("blank.txt", b"\n\n\n"),
        Err(CheckError::EmptyDocument)
    ));
}

#[test]
fn extraction_rejects_other_formats() {
    assert!(matches!(
        extract_bytes("essay.docx", b"PK\x03\x04"),
        Err(CheckError::UnsupportedFormat { .. })
    ));
}

#[test]
fn word_count_is_whitespace_based() {
    let doc = Document::new(
        "a.txt",
        vec!["One two, three.".to_string(), "Four".to_string()],
    );
    assert_eq!(doc.word_count(), 4);

    let meta = DocumentMetadata::for_upload(&doc, 123);
    assert_eq!(meta.identifier, "a.txt");
    assert_eq!(meta.size_bytes, 123);
    assert_eq!(meta.word_count, 4);
}

#[test]
fn whitespace_only_paragraphs_make_an_empty_document() {
    let doc = Document::new("a.txt", vec!["   ".to_string(), "\n".to_string()]);
    assert!(doc.is_empty());
    assert!(doc.sentences().is_empty());
}
