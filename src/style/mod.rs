// Stylistic drift detection across a document's paragraphs.

pub mod profile;
pub mod sentiment;

pub use profile::{profile, ParagraphMetrics, StyleProfile};
pub use sentiment::{LexiconSentiment, SentimentScorer};
