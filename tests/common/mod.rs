// Shared test doubles: deterministic encoders and a failing result log.
//
// The hashing encoder maps each lowercase word to one of 384 buckets and
// counts occurrences, so identical texts embed identically (cosine 1) and
// texts with no words in common embed orthogonally (barring collisions).

#![allow(dead_code)]

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;

use draftcheck::db::{LogEntry, NewLogEntry, ResultLog};
use draftcheck::error::CheckError;
use draftcheck::report::Engine;
use draftcheck::similarity::encoder::TextEncoder;
use draftcheck::style::LexiconSentiment;
use draftcheck::text::document::Document;

pub const DIM: usize = 384;

#[derive(Default)]
pub struct HashingEncoder {
    calls: AtomicUsize,
}

impl HashingEncoder {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn embed(text: &str) -> Vec<f64> {
        let mut v = vec![0.0; DIM];
        for word in text
            .split(|c: char| !c.is_alphanumeric())
            .filter(|w| !w.is_empty())
        {
            let mut hasher = DefaultHasher::new();
            word.to_lowercase().hash(&mut hasher);
            v[(hasher.finish() % DIM as u64) as usize] += 1.0;
        }
        v
    }
}

#[async_trait]
impl TextEncoder for HashingEncoder {
    async fn encode_batch(&self, texts: &[String]) -> Result<Vec<Vec<f64>>, CheckError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(texts.iter().map(|t| Self::embed(t)).collect())
    }
}

/// An encoder whose model never loaded.
pub struct FailingEncoder;

#[async_trait]
impl TextEncoder for FailingEncoder {
    async fn encode_batch(&self, _texts: &[String]) -> Result<Vec<Vec<f64>>, CheckError> {
        Err(CheckError::EncoderUnavailable("model not loaded".to_string()))
    }
}

/// An encoder that drops the last vector of every batch.
pub struct ShortEncoder;

#[async_trait]
impl TextEncoder for ShortEncoder {
    async fn encode_batch(&self, texts: &[String]) -> Result<Vec<Vec<f64>>, CheckError> {
        Ok(texts
            .iter()
            .skip(1)
            .map(|t| HashingEncoder::embed(t))
            .collect())
    }
}

/// A result log whose writes always fail.
pub struct FailingLog;

#[async_trait]
impl ResultLog for FailingLog {
    async fn table_count(&self) -> Result<i64> {
        anyhow::bail!("disk full")
    }

    async fn append(&self, _entry: &NewLogEntry) -> Result<i64> {
        anyhow::bail!("disk full")
    }

    async fn recent(&self, _limit: u32) -> Result<Vec<LogEntry>> {
        anyhow::bail!("disk full")
    }

    async fn count(&self) -> Result<i64> {
        anyhow::bail!("disk full")
    }
}

pub fn engine() -> Engine {
    Engine::new(Arc::new(HashingEncoder::default()), Arc::new(LexiconSentiment))
}

pub fn failing_engine() -> Engine {
    Engine::new(Arc::new(FailingEncoder), Arc::new(LexiconSentiment))
}

pub fn doc(id: &str, paragraphs: &[&str]) -> Document {
    Document::new(id, paragraphs.iter().map(|p| p.to_string()).collect())
}
