//! Numeric helpers shared by matchers and synthesizers.

use rand::Rng;
use std::ops::RangeInclusive;

pub(crate) const SHARE_PERCENT: RangeInclusive<u32> = 5..=35;
pub(crate) const FOUNDED_YEAR: RangeInclusive<u16> = 1995..=2018;
pub(crate) const REVENUE_MILLIONS: RangeInclusive<u32> = 5..=500;
pub(crate) const GROWTH_PERCENT: RangeInclusive<u32> = 3..=15;

/// 64-bit FNV-1a. Stable across runs and platforms.
pub(crate) fn stable_hash(s: &str) -> u64 {
    const OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
    const PRIME: u64 = 0x0000_0100_0000_01b3;
    s.bytes().fold(OFFSET, |hash, byte| {
        (hash ^ u64::from(byte)).wrapping_mul(PRIME)
    })
}

/// Map `seed` into `range` deterministically.
pub(crate) fn pick_in(seed: u64, range: RangeInclusive<u32>) -> u32 {
    let span = u64::from(range.end() - range.start()) + 1;
    range.start() + (seed % span) as u32
}

pub(crate) fn random_in<T>(range: RangeInclusive<T>) -> T
where
    T: rand::distributions::uniform::SampleUniform + PartialOrd,
{
    rand::thread_rng().gen_range(range)
}

/// `$12M`, `$1.2B`, `$850K`, `$300`.
pub(crate) fn format_money(amount: f64) -> String {
    let amount = amount.max(0.0);
    let (value, suffix) = if amount >= 1e9 {
        (amount / 1e9, "B")
    } else if amount >= 1e6 {
        (amount / 1e6, "M")
    } else if amount >= 1e3 {
        (amount / 1e3, "K")
    } else {
        (amount, "")
    };
    let text = format!("{value:.1}");
    let text = text.strip_suffix(".0").unwrap_or(&text);
    format!("${text}{suffix}")
}

/// Parse `1,250.5` plus an optional magnitude word or letter.
pub(crate) fn parse_amount(number: &str, magnitude: Option<&str>) -> Option<f64> {
    let value: f64 = number.replace(',', "").trim_end_matches('.').parse().ok()?;
    let multiplier = match magnitude.map(str::to_ascii_lowercase).as_deref() {
        None | Some("") => 1.0,
        Some("k") | Some("thousand") => 1e3,
        Some("m") | Some("million") => 1e6,
        Some("b") | Some("billion") => 1e9,
        Some("t") | Some("trillion") => 1e12,
        Some(_) => return None,
    };
    let amount = value * multiplier;
    (amount.is_finite() && amount >= 0.0).then_some(amount)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stable_hash_is_fnv1a() {
        assert_eq!(stable_hash(""), 0xcbf2_9ce4_8422_2325);
        assert_eq!(stable_hash("a"), 0xaf63_dc4c_8601_ec8c);
        assert_eq!(stable_hash("Peloton"), stable_hash("Peloton"));
    }

    #[test]
    fn test_pick_in_stays_in_range() {
        for seed in [0, 1, 30, 31, u64::MAX] {
            let value = pick_in(seed, SHARE_PERCENT);
            assert!(SHARE_PERCENT.contains(&value));
        }
    }

    #[test]
    fn test_format_money() {
        assert_eq!(format_money(12_000_000.0), "$12M");
        assert_eq!(format_money(1_300_000_000.0), "$1.3B");
        assert_eq!(format_money(850_000.0), "$850K");
        assert_eq!(format_money(300.0), "$300");
    }

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("120,000", None), Some(120_000.0));
        assert_eq!(parse_amount("1.5", Some("M")), Some(1_500_000.0));
        assert_eq!(parse_amount("2", Some("billion")), Some(2e9));
        assert_eq!(parse_amount("3.", None), Some(3.0));
        assert_eq!(parse_amount(",", None), None);
    }
}
