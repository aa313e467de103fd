// Lexicon-and-rule sentiment scoring.
//
// VADER via the `vader_sentiment` crate: the full ~7,500-entry valence
// lexicon plus its fixed rules (boosters, negation window, "but" contrast,
// ALL-CAPS and punctuation emphasis). Only the normalised compound score is
// used:
//
//   compound = s / sqrt(s² + 15)
//
// No training; the lexicon and constants are fixed.

use vader_sentiment::SentimentIntensityAnalyzer;

/// Swap-ready abstraction over the sentiment model.
pub trait SentimentScorer: Send + Sync {
    /// Compound polarity in [-1, 1]: negative < 0 < positive.
    fn polarity(&self, text: &str) -> f64;
}

/// The default sentiment model.
///
/// The analyzer only borrows the crate's static lexicons, so building one
/// per call costs nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct LexiconSentiment;

impl SentimentScorer for LexiconSentiment {
    fn polarity(&self, text: &str) -> f64 {
        if text.trim().is_empty() {
            return 0.0;
        }
        SentimentIntensityAnalyzer::new()
            .polarity_scores(text)
            .get("compound")
            .copied()
            .unwrap_or(0.0)
            .clamp(-1.0, 1.0)
    }
}
