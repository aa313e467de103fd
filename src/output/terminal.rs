// Colored terminal output for check and compare reports.
//
// All terminal-specific formatting lives here; main.rs delegates to these
// functions and prints JSON itself when --json is given.

use colored::Colorize;

use crate::db::models::LogEntry;
use crate::report::{CheckReport, CompareReport, ComparedDocument};
use crate::text::document::DocumentMetadata;

/// Display a one-vs-corpus report.
pub fn display_check_report(report: &CheckReport) {
    println!(
        "\n{}",
        format!("=== Check: {} ===", report.metadata.identifier).bold()
    );
    display_metadata(&report.metadata);
    println!(
        "  Compared against: {} document{}",
        report.corpus_size,
        if report.corpus_size == 1 { "" } else { "s" }
    );
    println!();
    display_scores(report.lexical_score, report.semantic_score);

    if report.matches.is_empty() {
        println!("\n  No sentences closely match the corpus.");
    } else {
        println!(
            "\n  {} matching sentence{}:",
            report.matches.len(),
            if report.matches.len() == 1 { "" } else { "s" }
        );
        for m in &report.matches {
            println!(
                "    {} {}",
                colorize_score(m.similarity),
                super::truncate_chars(&m.sentence, 120).dimmed()
            );
        }
    }

    println!("\n  Paragraph style:");
    println!(
        "    {:>3}  {:>9}  {:>5}  {:>7}  {}",
        "#".dimmed(),
        "Sentiment".dimmed(),
        "TTR".dimmed(),
        "Avg len".dimmed(),
        "Paragraph".dimmed(),
    );
    println!("    {}", "-".repeat(74).dimmed());
    for (i, (text, metrics)) in report
        .paragraphs
        .iter()
        .zip(&report.style.metrics)
        .enumerate()
    {
        let flagged = report.style.inconsistent.get(i).copied().unwrap_or(false);
        let marker = if flagged {
            "!".yellow().bold()
        } else {
            " ".normal()
        };
        println!(
            "  {} {:>3}  {:>+9.3}  {:>5.2}  {:>7.1}  {}",
            marker,
            i + 1,
            metrics.sentiment,
            metrics.ttr,
            metrics.avg_sentence_length,
            super::truncate_chars(text, 40).dimmed()
        );
    }

    let flagged = report.style.flagged_count();
    if flagged > 0 {
        println!(
            "\n  {} {} paragraph{} shift style abruptly from the one before",
            "!".yellow().bold(),
            flagged,
            if flagged == 1 { "" } else { "s" }
        );
    }
    println!();
}

/// Display a one-vs-one comparison.
pub fn display_compare_report(report: &CompareReport) {
    println!(
        "\n{}",
        format!(
            "=== Compare: {} vs {} ===",
            report.first.metadata.identifier, report.second.metadata.identifier
        )
        .bold()
    );
    println!();
    display_scores(report.lexical_score, report.semantic_score);

    println!("\n  {} matching sentence pairs", report.pairs.len());
    for pair in &report.pairs {
        println!("    {}", colorize_score(pair.similarity));
        println!("      1: {}", super::truncate_chars(&pair.sentence1, 110).dimmed());
        println!("      2: {}", super::truncate_chars(&pair.sentence2, 110).dimmed());
    }

    display_compared_side(&report.first);
    display_compared_side(&report.second);
    println!();
}

fn display_compared_side(side: &ComparedDocument) {
    println!("\n  {}", side.metadata.identifier.bold());
    display_metadata(&side.metadata);
    println!(
        "  Matched sentences: {}",
        side.matched_sentences.len()
    );
}

/// Display the stored corpus identifiers.
pub fn display_corpus(ids: &[String]) {
    if ids.is_empty() {
        println!("No documents in the corpus yet. Run `draftcheck check <file>` to add one.");
        return;
    }
    println!(
        "\n{}",
        format!("=== Corpus ({} documents) ===", ids.len()).bold()
    );
    for id in ids {
        println!("  {id}");
    }
    println!();
}

/// Display recent result-log entries.
pub fn display_history(entries: &[LogEntry]) {
    if entries.is_empty() {
        println!("No checks logged yet.");
        return;
    }

    println!(
        "\n{}",
        format!("=== Recent checks ({}) ===", entries.len()).bold()
    );
    println!();
    println!(
        "  {:<20}  {:<32} {:>8}  {:>8}",
        "Checked at".dimmed(),
        "Document".dimmed(),
        "Lexical".dimmed(),
        "Semantic".dimmed(),
    );
    println!("  {}", "-".repeat(74).dimmed());
    for entry in entries {
        println!(
            "  {:<20}  {:<32} {:>7.2}%  {:>7.2}%",
            entry.checked_at.format("%Y-%m-%d %H:%M:%S"),
            super::truncate_chars(&entry.identifier, 32),
            entry.lexical_score,
            entry.semantic_score,
        );
    }
    println!();
}

fn display_metadata(metadata: &DocumentMetadata) {
    println!(
        "  Size: {}  |  Words: {}  |  Submitted: {}",
        super::format_bytes(metadata.size_bytes),
        metadata.word_count,
        metadata.submitted_at.format("%Y-%m-%d %H:%M:%S UTC"),
    );
}

fn display_scores(lexical: f64, semantic: f64) {
    println!("  Lexical similarity:  {}", colorize_score(lexical));
    println!("  Semantic similarity: {}", colorize_score(semantic));
}

/// Colorize a 0-100 similarity percentage by how alarming it is.
fn colorize_score(score: f64) -> colored::ColoredString {
    let text = format!("{score:>6.2}%");
    if score >= 80.0 {
        text.red().bold()
    } else if score >= 50.0 {
        text.bright_red()
    } else if score >= 25.0 {
        text.yellow()
    } else {
        text.green()
    }
}
