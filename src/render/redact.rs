//! Best-effort redaction of IPv4 addresses in rendered paste content.

use crate::constants::REDACTION_TOKENS;
use once_cell::sync::Lazy;
use rand::seq::SliceRandom;
use regex::Regex;

static IPV4_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b\d{1,3}(?:\.\d{1,3}){3}\b").expect("valid ipv4 pattern"));

/// Replace every IPv4-shaped dotted quad with a token drawn uniformly at
/// random from [`REDACTION_TOKENS`].
///
/// One match is replaced at a time and the whole text is rescanned until
/// no match remains, so adjacent or overlapping occurrences are all
/// caught. Termination relies on the token list containing nothing
/// IP-shaped. This is pattern-based privacy scrubbing, not a guarantee:
/// dotted version strings false-positive, and anything not shaped like a
/// dotted quad passes through.
pub fn redact_ip_addresses(input: &str) -> String {
    let mut out = input.to_string();
    let mut rng = rand::thread_rng();
    while let Some(range) = IPV4_PATTERN.find(&out).map(|m| m.range()) {
        let token = REDACTION_TOKENS
            .choose(&mut rng)
            .copied()
            .unwrap_or("redacted");
        out.replace_range(range, token);
    }
    out
}
