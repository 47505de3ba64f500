//! Plausibility checks for API keys and commit SHAs.

/// Keys shorter than this still validate but trigger an advisory warning.
pub const RECOMMENDED_API_KEY_LENGTH: usize = 32;

const SHA_LENGTH: usize = 40;

/// Result of inspecting an API key without side effects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiKeyAssessment {
    /// The key is empty or only whitespace.
    Blank,
    /// The key is usable but shorter than [`RECOMMENDED_API_KEY_LENGTH`].
    Short,
    /// The key looks plausible.
    Plausible,
}

/// Classifies an API key by presence and length.
#[must_use]
pub fn assess_api_key(key: &str) -> ApiKeyAssessment {
    if key.trim().is_empty() {
        ApiKeyAssessment::Blank
    } else if key.chars().count() < RECOMMENDED_API_KEY_LENGTH {
        ApiKeyAssessment::Short
    } else {
        ApiKeyAssessment::Plausible
    }
}

/// Returns false when the key is empty or blank.
///
/// Short keys are accepted but logged as a warning.
#[must_use]
pub fn validate_api_key(key: &str) -> bool {
    match assess_api_key(key) {
        ApiKeyAssessment::Blank => false,
        ApiKeyAssessment::Short => {
            tracing::warn!(
                "API key appears to be shorter than expected ({RECOMMENDED_API_KEY_LENGTH} characters)"
            );
            true
        }
        ApiKeyAssessment::Plausible => true,
    }
}

/// Returns true when `sha` is exactly 40 lowercase hex digits.
#[must_use]
pub fn validate_sha(sha: &str) -> bool {
    sha.len() == SHA_LENGTH
        && sha
            .bytes()
            .all(|byte| byte.is_ascii_digit() || (b'a'..=b'f').contains(&byte))
}

#[cfg(test)]
mod tests {
    use std::io;
    use std::sync::{Arc, Mutex};

    use rstest::rstest;
    use tracing_subscriber::fmt::MakeWriter;

    use super::{ApiKeyAssessment, assess_api_key, validate_api_key, validate_sha};

    #[derive(Clone, Default)]
    struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

    impl CapturedLogs {
        fn contents(&self) -> String {
            let bytes = self.0.lock().expect("log buffer should be available");
            String::from_utf8_lossy(&bytes).into_owned()
        }
    }

    impl io::Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0
                .lock()
                .expect("log buffer should be available")
                .extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl<'writer> MakeWriter<'writer> for CapturedLogs {
        type Writer = Self;

        fn make_writer(&'writer self) -> Self::Writer {
            self.clone()
        }
    }

    fn validate_with_captured_logs(key: &str) -> (bool, String) {
        let logs = CapturedLogs::default();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(logs.clone())
            .with_ansi(false)
            .finish();
        let valid = tracing::subscriber::with_default(subscriber, || validate_api_key(key));
        (valid, logs.contents())
    }

    #[rstest]
    #[case::empty("")]
    #[case::spaces("  ")]
    #[case::tabs_and_newlines("\t\n ")]
    fn blank_keys_are_rejected(#[case] key: &str) {
        assert!(!validate_api_key(key), "blank key {key:?} should be rejected");
        assert_eq!(assess_api_key(key), ApiKeyAssessment::Blank);
    }

    #[rstest]
    fn long_key_passes_without_warning() {
        let key = "k".repeat(32);
        let (valid, logs) = validate_with_captured_logs(&key);

        assert!(valid, "32 character key should be valid");
        assert!(logs.is_empty(), "no warning expected, got {logs:?}");
    }

    #[rstest]
    #[case::two_chars("q7")]
    #[case::thirty_one_chars("abcdefghijklmnopqrstuvwxyz01234")]
    fn short_key_passes_with_warning(#[case] key: &str) {
        let (valid, logs) = validate_with_captured_logs(key);

        assert!(valid, "short key should still be valid");
        assert!(
            logs.contains("shorter than expected"),
            "expected a warning, got {logs:?}"
        );
        assert!(!logs.contains(key), "warning must not echo the key");
    }

    #[rstest]
    fn very_long_key_is_accepted() {
        assert_eq!(assess_api_key(&"x".repeat(4096)), ApiKeyAssessment::Plausible);
    }

    #[rstest]
    #[case::all_digits("0123456789012345678901234567890123456789")]
    #[case::mixed("abc123def4567890abc123def4567890abc123de")]
    #[case::all_letters("ffffffffffffffffffffffffffffffffffffffff")]
    fn accepts_lowercase_sha(#[case] sha: &str) {
        assert!(validate_sha(sha), "{sha} should be accepted");
    }

    #[rstest]
    #[case::empty("")]
    #[case::abbreviated("abc123d")]
    #[case::thirty_nine("abc123def4567890abc123def4567890abc123d")]
    #[case::forty_one("abc123def4567890abc123def4567890abc123def")]
    #[case::uppercase("ABC123DEF4567890ABC123DEF4567890ABC123DE")]
    #[case::non_hex("ghijklmnopqrstuvwxyzghijklmnopqrstuvwxyz")]
    #[case::padded(" abc123def4567890abc123def4567890abc123d")]
    fn rejects_malformed_sha(#[case] sha: &str) {
        assert!(!validate_sha(sha), "{sha:?} should be rejected");
    }
}
