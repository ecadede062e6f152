//! Amount input handling, split into small stages so each can be tested on its own:
//!
//! raw keystrokes → [`sanitize`] → normalized decimal string → [`parse`] / [`validate`] → `Decimal`
//!
//! [`format_plain`] goes the other way for export and CLI output.

use rust_decimal::{Decimal, RoundingStrategy};
use std::str::FromStr;

/// Maximum digits kept after the decimal separator.
pub(crate) const MAX_DECIMALS: u32 = 2;

/// Largest accepted amount or limit: one trillion. Every cent value up to here
/// survives the trip through a JSON number unchanged.
pub(crate) const MAX_AMOUNT: Decimal = Decimal::from_parts(3_567_587_328, 232, 0, false, 0);

/// Clean up raw amount text as the user types.
///
/// Keeps ASCII digits and the first separator (`,` is normalized to `.`), drops
/// everything else, turns a leading bare separator into `0.` and stops accepting
/// digits after two decimals. An empty input stays empty so an in-progress edit
/// is not treated as an error. Idempotent.
pub(crate) fn sanitize(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut seen_separator = false;
    let mut decimals = 0;

    for ch in raw.chars() {
        match ch {
            '0'..='9' => {
                if seen_separator {
                    if decimals == MAX_DECIMALS {
                        continue;
                    }
                    decimals += 1;
                }
                out.push(ch);
            }
            '.' | ',' if !seen_separator => {
                seen_separator = true;
                if out.is_empty() {
                    out.push('0');
                }
                out.push('.');
            }
            _ => {}
        }
    }

    out
}

/// Parse a normalized decimal string. A trailing separator (`"3."`) is accepted
/// since that is a normal intermediate state of the input field.
/// Returns `None` for anything that isn't a plain decimal number.
pub(crate) fn parse(normalized: &str) -> Option<Decimal> {
    let s = normalized.trim();
    let s = s.strip_suffix('.').unwrap_or(s);
    if s.is_empty() {
        return None;
    }
    Decimal::from_str(s).ok()
}

/// Round to cents, half away from zero.
pub(crate) fn round(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(MAX_DECIMALS, RoundingStrategy::MidpointAwayFromZero)
}

/// True for an expense amount the store accepts: above zero, at most [`MAX_AMOUNT`].
pub(crate) fn in_range(amount: Decimal) -> bool {
    amount > Decimal::ZERO && amount <= MAX_AMOUNT
}

/// Submit-time check for an expense amount: must parse and be in range
/// once rounded to cents.
pub(crate) fn validate(normalized: &str) -> Option<Decimal> {
    let amount = round(parse(normalized)?);
    in_range(amount).then_some(amount)
}

/// Clamp a limit into `0..=MAX_AMOUNT` and round it to cents.
pub(crate) fn clamp_limit(value: Decimal) -> Decimal {
    round(value.clamp(Decimal::ZERO, MAX_AMOUNT))
}

/// Interpret monthly-limit text. Unparsable input becomes zero, as do negatives.
pub(crate) fn coerce_limit(raw: &str) -> Decimal {
    let normalized = raw.trim().replace(',', ".");
    parse(&normalized).map(clamp_limit).unwrap_or(Decimal::ZERO)
}

/// Plain two-decimal rendering with a dot separator, e.g. `3.50`.
pub(crate) fn format_plain(amount: Decimal) -> String {
    format!("{:.2}", round(amount))
}
