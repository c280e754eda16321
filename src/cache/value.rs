//! Value Generation Module
//!
//! Cache misses are answered with freshly generated payloads. Generation is
//! injected as a capability so tests can script the produced values.

use rand::{distributions::Alphanumeric, Rng};

/// Length of generated payloads.
pub const DEFAULT_VALUE_LEN: usize = 32;

/// Produces payloads for entries created on a cache miss.
pub trait ValueGenerator: Send + Sync {
    fn generate(&self) -> String;
}

/// Generates random strings drawn uniformly from `[A-Za-z0-9]`.
#[derive(Debug, Clone)]
pub struct AlphanumericValues {
    len: usize,
}

impl AlphanumericValues {
    pub fn new(len: usize) -> Self {
        Self { len }
    }
}

impl Default for AlphanumericValues {
    fn default() -> Self {
        Self::new(DEFAULT_VALUE_LEN)
    }
}

impl ValueGenerator for AlphanumericValues {
    fn generate(&self) -> String {
        rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(self.len)
            .map(char::from)
            .collect()
    }
}

// == Test Generator ==
/// Hands out a scripted sequence of values, cycling when exhausted.
#[cfg(test)]
#[derive(Debug)]
pub struct SequenceValues {
    values: Vec<String>,
    next: std::sync::atomic::AtomicUsize,
}

#[cfg(test)]
impl SequenceValues {
    pub fn new<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            values: values.into_iter().map(Into::into).collect(),
            next: std::sync::atomic::AtomicUsize::new(0),
        }
    }
}

#[cfg(test)]
impl ValueGenerator for SequenceValues {
    fn generate(&self) -> String {
        let i = self.next.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        self.values[i % self.values.len()].clone()
    }
}
