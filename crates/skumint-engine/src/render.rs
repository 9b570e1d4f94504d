//! Per-element rendering.
//!
//! Each element kind renders independently from externally supplied
//! inputs: a random source, the current instant, and (for `Sequence`) the
//! ordinal resolved by the caller. Nothing here touches storage.

use crate::error::{EngineError, Result};
use jiff::fmt::strtime;
use jiff::tz::TimeZone;
use jiff::Timestamp;
use rand::{Rng, RngCore};
use skumint_core::{IdElement, MAX_TOKEN_WIDTH};

const HEX_UPPER: &[u8; 16] = b"0123456789ABCDEF";

/// External inputs for one rendering pass.
///
/// A single context is shared across all elements of one generate call, so
/// every `Sequence` element in a format observes the same ordinal and every
/// `DateTime` element the same instant.
pub struct RenderContext<'a, R> {
    pub rng: &'a mut R,
    /// Current instant; `DateTime` elements format it in UTC.
    pub now: Timestamp,
    /// Ordinal for `Sequence` elements, resolved once per call.
    pub ordinal: Option<u64>,
}

/// Renders one element to its string form.
pub fn render<R: Rng>(
    element: &IdElement,
    ctx: &mut RenderContext<'_, R>,
) -> Result<String> {
    match element {
        IdElement::FixedText { value } => Ok(value.clone().unwrap_or_default()),
        IdElement::Random { format } => Ok(random_value(ctx.rng, format.as_deref())),
        IdElement::Sequence { format } => {
            let ordinal = ctx.ordinal.ok_or(EngineError::MissingOrdinal)?;
            Ok(sequence_value(format.as_deref(), ordinal))
        }
        IdElement::DateTime { format } => datetime_value(ctx.now, format.as_deref()),
        IdElement::Guid => Ok(guid_value(ctx.rng)),
        IdElement::Unknown => Err(EngineError::UnknownElementKind),
    }
}

/// Renders a `Random` token.
///
/// `D<n>` draws a decimal below `10^n - 1` and zero-pads to width `n`.
/// `X<n>` draws `n` random bytes, hex-encodes them to `2n` uppercase
/// characters, and keeps the first `n`. The byte-then-truncate sequence
/// halves the entropy per character compared to drawing nibbles directly;
/// stored identifiers were shaped this way, so it stays.
///
/// An absent or unrecognized spec renders as the empty string.
pub fn random_value<R: Rng>(rng: &mut R, spec: Option<&str>) -> String {
    let Some(spec) = spec else {
        return String::new();
    };
    if let Some(width) = token_width(spec, 'D') {
        let max = 10u128.pow(width as u32) - 1;
        let value = if max == 0 { 0 } else { rng.random_range(0..max) };
        return format!("{value:0width$}");
    }
    if let Some(width) = token_width(spec, 'X') {
        let mut bytes = vec![0u8; width];
        rng.fill_bytes(&mut bytes);
        let mut hex = String::with_capacity(width * 2);
        for b in &bytes {
            hex.push(HEX_UPPER[(b >> 4) as usize] as char);
            hex.push(HEX_UPPER[(b & 0x0f) as usize] as char);
        }
        hex.truncate(width);
        return hex;
    }
    String::new()
}

/// Formats a sequence ordinal.
///
/// No spec, or the bare spec `"D"`, renders an unpadded decimal. `D<c>`
/// zero-pads, reading only the single character after `D` as the width, so
/// pad widths of ten or more are not expressible here. Anything else falls
/// back to the unpadded decimal.
pub fn sequence_value(spec: Option<&str>, ordinal: u64) -> String {
    let Some(spec) = spec else {
        return ordinal.to_string();
    };
    if spec == "D" {
        return ordinal.to_string();
    }
    if let Some(rest) = spec.strip_prefix('D') {
        if let Some(width) = rest.chars().next().and_then(|c| c.to_digit(10)) {
            let width = width as usize;
            return format!("{ordinal:0width$}");
        }
    }
    ordinal.to_string()
}

/// Parses the width of a `D<n>` / `X<n>` spec.
///
/// `None` unless `spec` starts with `prefix` and the remainder reads as a
/// non-negative integer no wider than [`MAX_TOKEN_WIDTH`].
fn token_width(spec: &str, prefix: char) -> Option<usize> {
    let rest = spec.strip_prefix(prefix)?;
    let width = rest.parse::<usize>().ok()?;
    (width <= MAX_TOKEN_WIDTH).then_some(width)
}

/// Renders the instant in UTC.
///
/// Patterns use strftime conversion specifiers, which format identically
/// regardless of locale. With no pattern the instant renders as an RFC 3339
/// timestamp.
fn datetime_value(now: Timestamp, pattern: Option<&str>) -> Result<String> {
    let Some(pattern) = pattern else {
        return Ok(now.to_string());
    };
    let zoned = now.to_zoned(TimeZone::UTC);
    strtime::format(pattern, &zoned).map_err(|e| EngineError::DateTimePattern {
        pattern: pattern.to_string(),
        reason: e.to_string(),
    })
}

/// Builds a v4 UUID from injected random bytes.
///
/// Drawing the bytes through the context keeps generation deterministic
/// under a seeded source.
fn guid_value<R: RngCore>(rng: &mut R) -> String {
    let mut bytes = [0u8; 16];
    rng.fill_bytes(&mut bytes);
    uuid::Builder::from_random_bytes(bytes)
        .into_uuid()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn ctx(rng: &mut StdRng) -> RenderContext<'_, StdRng> {
        RenderContext {
            rng,
            now: Timestamp::from_second(1_700_000_000).unwrap(),
            ordinal: Some(6),
        }
    }

    #[test]
    fn fixed_text_renders_verbatim() {
        let mut rng = StdRng::seed_from_u64(1);
        let element = IdElement::FixedText {
            value: Some("SKU-".to_string()),
        };
        assert_eq!(render(&element, &mut ctx(&mut rng)).unwrap(), "SKU-");
    }

    #[test]
    fn fixed_text_without_value_renders_empty() {
        let mut rng = StdRng::seed_from_u64(1);
        let element = IdElement::FixedText { value: None };
        assert_eq!(render(&element, &mut ctx(&mut rng)).unwrap(), "");
    }

    #[test]
    fn random_d4_is_four_digits() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..200 {
            let value = random_value(&mut rng, Some("D4"));
            assert_eq!(value.len(), 4);
            assert!(value.chars().all(|c| c.is_ascii_digit()), "{value}");
        }
    }

    #[test]
    fn random_d_is_deterministic_under_a_seed() {
        let mut a = StdRng::seed_from_u64(42);
        let mut b = StdRng::seed_from_u64(42);
        assert_eq!(
            random_value(&mut a, Some("D6")),
            random_value(&mut b, Some("D6"))
        );
    }

    #[test]
    fn random_x8_is_eight_upper_hex_chars() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..200 {
            let value = random_value(&mut rng, Some("X8"));
            assert_eq!(value.len(), 8);
            assert!(
                value.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_lowercase()),
                "{value}"
            );
        }
    }

    #[test]
    fn random_x_draws_bytes_then_truncates() {
        let mut rng = StdRng::seed_from_u64(9);
        let value = random_value(&mut rng, Some("X5"));

        // Same draw by hand: five bytes, hex-encoded, first five characters.
        let mut rng = StdRng::seed_from_u64(9);
        let mut bytes = [0u8; 5];
        rng.fill_bytes(&mut bytes);
        let expected: String = bytes.iter().map(|b| format!("{b:02X}")).collect();
        assert_eq!(value, expected[..5]);
    }

    #[test]
    fn random_without_spec_is_empty() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(random_value(&mut rng, None), "");
    }

    #[test]
    fn random_with_unrecognized_spec_is_empty() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(random_value(&mut rng, Some("Z4")), "");
        assert_eq!(random_value(&mut rng, Some("D")), "");
        assert_eq!(random_value(&mut rng, Some("Dfour")), "");
        assert_eq!(random_value(&mut rng, Some("X-3")), "");
    }

    #[test]
    fn random_width_over_cap_is_empty() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(random_value(&mut rng, Some("D33")), "");
        assert_eq!(random_value(&mut rng, Some("X999")), "");
    }

    #[test]
    fn sequence_unpadded_by_default() {
        assert_eq!(sequence_value(None, 1), "1");
        assert_eq!(sequence_value(Some("D"), 42), "42");
    }

    #[test]
    fn sequence_pads_to_single_digit_width() {
        assert_eq!(sequence_value(Some("D3"), 6), "006");
        assert_eq!(sequence_value(Some("D5"), 12), "00012");
    }

    #[test]
    fn sequence_reads_only_one_width_character() {
        // "D12" pads to width 1, not 12.
        assert_eq!(sequence_value(Some("D12"), 6), "6");
        assert_eq!(sequence_value(Some("D34"), 6), "006");
    }

    #[test]
    fn sequence_falls_back_on_foreign_specs() {
        assert_eq!(sequence_value(Some("X4"), 6), "6");
        assert_eq!(sequence_value(Some("Dx"), 6), "6");
    }

    #[test]
    fn datetime_formats_in_utc() {
        let now = Timestamp::from_second(1_700_000_000).unwrap(); // 2023-11-14T22:13:20Z
        assert_eq!(
            datetime_value(now, Some("%Y%m%d")).unwrap(),
            "20231114"
        );
        assert_eq!(
            datetime_value(now, Some("%Y-%m-%d %H:%M:%S")).unwrap(),
            "2023-11-14 22:13:20"
        );
    }

    #[test]
    fn datetime_without_pattern_is_rfc3339() {
        let now = Timestamp::from_second(1_700_000_000).unwrap();
        assert_eq!(datetime_value(now, None).unwrap(), "2023-11-14T22:13:20Z");
    }

    #[test]
    fn datetime_rejects_bad_patterns() {
        let now = Timestamp::from_second(1_700_000_000).unwrap();
        assert!(matches!(
            datetime_value(now, Some("%J")),
            Err(EngineError::DateTimePattern { .. })
        ));
    }

    #[test]
    fn guid_is_canonical_and_distinct() {
        let mut rng = StdRng::seed_from_u64(3);
        let first = guid_value(&mut rng);
        let second = guid_value(&mut rng);
        for value in [&first, &second] {
            assert_eq!(value.len(), 36);
            let hyphens: Vec<usize> = value
                .char_indices()
                .filter(|(_, c)| *c == '-')
                .map(|(i, _)| i)
                .collect();
            assert_eq!(hyphens, vec![8, 13, 18, 23]);
        }
        assert_ne!(first, second);
    }

    #[test]
    fn guid_is_deterministic_under_a_seed() {
        let mut a = StdRng::seed_from_u64(11);
        let mut b = StdRng::seed_from_u64(11);
        assert_eq!(guid_value(&mut a), guid_value(&mut b));
    }

    #[test]
    fn unknown_element_fails() {
        let mut rng = StdRng::seed_from_u64(1);
        assert!(matches!(
            render(&IdElement::Unknown, &mut ctx(&mut rng)),
            Err(EngineError::UnknownElementKind)
        ));
    }

    #[test]
    fn sequence_without_ordinal_fails() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut ctx = RenderContext {
            rng: &mut rng,
            now: Timestamp::from_second(0).unwrap(),
            ordinal: None,
        };
        assert!(matches!(
            render(&IdElement::Sequence { format: None }, &mut ctx),
            Err(EngineError::MissingOrdinal)
        ));
    }
}
