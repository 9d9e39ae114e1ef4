//! Randomness for production calls.
//!
//! Every randomized operation in this crate takes `&mut R where R: Rng`, so
//! tests can pass a seeded generator. Production code builds a fresh
//! [`EntropySource`] per call instead of sharing one generator across
//! threads.

use once_cell::sync::Lazy;
use rand::rngs::{OsRng, SmallRng, StdRng};
use rand::{RngCore, SeedableRng, TryRngCore};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

/// Whether the operating system entropy source answered the startup probe.
///
/// Evaluated at most once per process, so the fallback warning is logged once.
static OS_ENTROPY_AVAILABLE: Lazy<bool> = Lazy::new(|| {
    let mut probe = [0u8; 8];
    match OsRng.try_fill_bytes(&mut probe) {
        Ok(()) => true,
        Err(e) => {
            log::warn!(
                "OS entropy source unavailable ({}); falling back to a clock-seeded PRNG. \
                Display locations and heatmaps will be weaker against reconstruction.",
                e
            );
            false
        }
    }
});

static FALLBACK_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Probe the OS entropy source, logging once if it is missing.
///
/// Returns `true` when secure randomness is available.
pub fn probe() -> bool {
    *OS_ENTROPY_AVAILABLE
}

/// Per-call random number generator.
///
/// `Secure` is a ChaCha-based `StdRng` seeded from the operating system.
/// `Fallback` is only used when the OS source cannot be read; callers see
/// the same contract with weaker unpredictability.
#[derive(Debug)]
pub enum EntropySource {
    Secure(StdRng),
    Fallback(SmallRng),
}

impl EntropySource {
    pub fn new() -> Self {
        if probe() {
            match StdRng::try_from_os_rng() {
                Ok(rng) => return EntropySource::Secure(rng),
                Err(e) => log::debug!("OS entropy read failed after a successful probe: {}", e),
            }
        }
        EntropySource::Fallback(SmallRng::seed_from_u64(fallback_seed()))
    }

    pub fn is_secure(&self) -> bool {
        matches!(self, EntropySource::Secure(_))
    }
}

impl Default for EntropySource {
    fn default() -> Self {
        Self::new()
    }
}

/// Clock nanoseconds mixed with a process-wide counter, so concurrent
/// fallback generators created in the same instant still diverge.
fn fallback_seed() -> u64 {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or_default();
    let count = FALLBACK_COUNTER.fetch_add(1, Ordering::Relaxed);
    nanos ^ count.wrapping_mul(0x9E37_79B9_7F4A_7C15)
}

impl RngCore for EntropySource {
    fn next_u32(&mut self) -> u32 {
        match self {
            EntropySource::Secure(rng) => rng.next_u32(),
            EntropySource::Fallback(rng) => rng.next_u32(),
        }
    }

    fn next_u64(&mut self) -> u64 {
        match self {
            EntropySource::Secure(rng) => rng.next_u64(),
            EntropySource::Fallback(rng) => rng.next_u64(),
        }
    }

    fn fill_bytes(&mut self, dst: &mut [u8]) {
        match self {
            EntropySource::Secure(rng) => rng.fill_bytes(dst),
            EntropySource::Fallback(rng) => rng.fill_bytes(dst),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    #[test]
    fn test_secure_source_when_os_available() {
        // CI hosts always expose an OS entropy source.
        assert!(probe());
        assert!(EntropySource::new().is_secure());
    }

    #[test]
    fn test_fresh_sources_diverge() {
        let a: [u64; 4] = EntropySource::new().random();
        let b: [u64; 4] = EntropySource::new().random();
        assert_ne!(a, b);
    }

    #[test]
    fn test_fallback_seeds_differ() {
        assert_ne!(fallback_seed(), fallback_seed());
    }

    #[test]
    fn test_usable_as_dyn_rng() {
        let mut source = EntropySource::new();
        let rng: &mut dyn RngCore = &mut source;
        let value: f64 = rng.random();
        assert!((0.0..1.0).contains(&value));
    }
}
