//! Known-answer self test and the streaming demo.

#![forbid(unsafe_code)]

use crate::clock::TickSource;
use crate::timing::measure;
use rpsha_hash::{sha256_hex, Sha256};
use serde::Serialize;

/// A message and its published SHA-256 digest.
#[derive(Debug, Clone, Copy)]
pub struct KnownAnswer {
    pub input: &'static str,
    pub expected: &'static str,
}

/// NIST FIPS 180-4 examples plus the common pangram vector.
pub const KNOWN_ANSWERS: [KnownAnswer; 4] = [
    KnownAnswer {
        input: "",
        expected: "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855",
    },
    KnownAnswer {
        input: "abc",
        expected: "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad",
    },
    KnownAnswer {
        input: "abcdbcdecdefdefgefghfghighijhijkijkljklmklmnlmnomnopnopq",
        expected: "248d6a61d20638b8e5c026930c3e6039a33ce45964ff2167f6ecedd419db06c1",
    },
    KnownAnswer {
        input: "The quick brown fox jumps over the lazy dog",
        expected: "d7a8fbb307d7809469ca9abcb0082e4f8d5651e46d3cdb762d02d0bf37c9e592",
    },
];

/// Result of checking one known answer.
#[derive(Debug, Clone, Serialize)]
pub struct VectorOutcome {
    pub input: String,
    pub expected: String,
    pub computed: String,
    pub passed: bool,
    pub elapsed_us: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct SelfTestReport {
    pub outcomes: Vec<VectorOutcome>,
}

impl SelfTestReport {
    pub fn all_passed(&self) -> bool {
        self.outcomes.iter().all(|o| o.passed)
    }

    pub fn failures(&self) -> usize {
        self.outcomes.iter().filter(|o| !o.passed).count()
    }
}

/// Hash every known answer, timing each one.
pub fn run_self_test<C: TickSource + ?Sized>(clock: &C) -> SelfTestReport {
    let outcomes: Vec<VectorOutcome> = KNOWN_ANSWERS
        .iter()
        .map(|ka| {
            let (computed, elapsed_us) = measure(clock, || sha256_hex(ka.input.as_bytes()));
            let passed = computed == ka.expected;
            if !passed {
                log::warn!("known answer mismatch for {:?}: got {}", ka.input, computed);
            }
            VectorOutcome {
                input: ka.input.to_string(),
                expected: ka.expected.to_string(),
                computed,
                passed,
                elapsed_us,
            }
        })
        .collect();

    SelfTestReport { outcomes }
}

/// Streaming versus one-shot hash of the same text.
#[derive(Debug, Clone, Serialize)]
pub struct IncrementalDemo {
    pub parts: Vec<String>,
    pub streamed_hex: String,
    pub one_shot_hex: String,
    pub matches: bool,
}

/// Default pieces for [`incremental_demo`].
pub const DEMO_PARTS: [&str; 2] = ["Hello, ", "World!"];

/// Feed `parts` one update at a time and compare with hashing their concatenation.
pub fn incremental_demo(parts: &[&str]) -> IncrementalDemo {
    let mut hasher = Sha256::new();
    for part in parts {
        hasher.update_str(part);
    }
    let streamed_hex = hasher.digest_hex();
    let one_shot_hex = sha256_hex(parts.concat().as_bytes());

    IncrementalDemo {
        parts: parts.iter().map(|p| p.to_string()).collect(),
        matches: streamed_hex == one_shot_hex,
        streamed_hex,
        one_shot_hex,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::StepClock;

    #[test]
    fn test_self_test_passes() {
        let clock = StepClock::new(0, 10);
        let report = run_self_test(&clock);
        assert_eq!(report.outcomes.len(), KNOWN_ANSWERS.len());
        assert!(report.all_passed());
        assert_eq!(report.failures(), 0);
        assert!(report.outcomes.iter().all(|o| o.elapsed_us == 10));
    }

    #[test]
    fn test_vectors_are_full_width() {
        for ka in KNOWN_ANSWERS {
            assert_eq!(ka.expected.len(), 64, "bad vector for {:?}", ka.input);
        }
    }

    #[test]
    fn test_incremental_demo_matches() {
        let demo = incremental_demo(&DEMO_PARTS);
        assert!(demo.matches);
        assert_eq!(
            demo.one_shot_hex,
            "dffd6021bb2bd5b0af676290809ec3a53191dd81c7f70a4b28688a362182986f"
        );
        assert_eq!(demo.parts, vec!["Hello, ", "World!"]);
    }

    #[test]
    fn test_incremental_demo_no_parts() {
        let demo = incremental_demo(&[]);
        assert!(demo.matches);
        assert_eq!(demo.streamed_hex, KNOWN_ANSWERS[0].expected);
    }
}
