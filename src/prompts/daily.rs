use chrono::{NaiveDate, Utc};

use super::corpus::Corpus;
use crate::model::{Domain, Prompt};

/// 31-multiplier rolling hash over the date string, folded to a signed
/// 32-bit value. Every installation computes the same index for the same
/// date, so the daily prompt is shared across devices.
fn hash_date(date_str: &str) -> u32 {
    let mut hash: i32 = 0;
    for c in date_str.chars() {
        hash = hash.wrapping_shl(5).wrapping_sub(hash).wrapping_add(c as i32);
    }
    hash.unsigned_abs()
}

impl Corpus {
    /// Today's deterministic prompt for a domain configuration
    pub fn daily(&self, domains: &[Domain]) -> Prompt {
        self.daily_on(domains, Utc::now().date_naive())
    }

    /// Deterministic prompt for an explicit calendar date
    pub fn daily_on(&self, domains: &[Domain], date: NaiveDate) -> Prompt {
        let pool = self.domain_pool(domains);
        if pool.is_empty() {
            return self.default_prompt();
        }
        let key = date.format("%Y-%m-%d").to_string();
        let idx = hash_date(&key) as usize % pool.len();
        pool[idx].clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_is_stable() {
        assert_eq!(hash_date("2026-08-05"), hash_date("2026-08-05"));
        assert_ne!(hash_date("2026-08-05"), hash_date("2026-08-06"));
    }

    #[test]
    fn hash_handles_long_input_without_overflow() {
        // Wraps in 32 bits the way the rolling hash always has
        let _ = hash_date(&"2026-08-05".repeat(50));
    }
}
