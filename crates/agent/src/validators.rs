//! Per-slot validators
//!
//! Validators are looked up through a static table keyed by slot. Slots
//! without an entry (`preferences`, `feedback`) accept any value.

use formbot_core::{MessageKey, SlotName, SlotValue, Tracker, ValidationResult};

use crate::catalog::CuisineCatalog;

/// Inputs a validator may consult besides the candidate itself
pub struct ValidationContext<'a> {
    pub catalog: &'a CuisineCatalog,
    pub tracker: &'a Tracker,
}

pub type SlotValidator = fn(&SlotValue, &ValidationContext<'_>) -> ValidationResult;

static VALIDATORS: [(SlotName, SlotValidator); 3] = [
    (SlotName::Cuisine, validate_cuisine),
    (SlotName::NumPeople, validate_num_people),
    (SlotName::OutdoorSeating, validate_outdoor_seating),
];

/// Validator registered for a slot, if any
pub fn validator_for(slot: SlotName) -> Option<SlotValidator> {
    VALIDATORS
        .iter()
        .find(|(name, _)| *name == slot)
        .map(|(_, validator)| *validator)
}

/// Accept a cuisine the catalog knows, keeping the user's casing
pub fn validate_cuisine(value: &SlotValue, ctx: &ValidationContext<'_>) -> ValidationResult {
    match value {
        SlotValue::Text(cuisine) if ctx.catalog.contains(cuisine) => {
            ValidationResult::Accept(value.clone())
        }
        _ => ValidationResult::Reject(MessageKey::WrongCuisine),
    }
}

/// Accept a strictly positive integer, keeping the original text
pub fn validate_num_people(value: &SlotValue, _ctx: &ValidationContext<'_>) -> ValidationResult {
    match value {
        SlotValue::Text(s) if is_positive_int(s) => ValidationResult::Accept(value.clone()),
        _ => ValidationResult::Reject(MessageKey::WrongNumPeople),
    }
}

/// Map "out..." to true and "in..." to false; booleans pass through
pub fn validate_outdoor_seating(
    value: &SlotValue,
    _ctx: &ValidationContext<'_>,
) -> ValidationResult {
    match value {
        SlotValue::Bool(_) => ValidationResult::Accept(value.clone()),
        SlotValue::Text(s) if s.contains("out") => ValidationResult::Accept(SlotValue::Bool(true)),
        SlotValue::Text(s) if s.contains("in") => ValidationResult::Accept(SlotValue::Bool(false)),
        SlotValue::Text(_) => ValidationResult::Reject(MessageKey::WrongOutdoorSeating),
    }
}

/// Integer literal check with arbitrary magnitude
///
/// Surrounding whitespace and a leading sign are allowed, as are single
/// underscores between digits ("1_000"). Digits are ASCII only. The value
/// must be greater than zero.
fn is_positive_int(s: &str) -> bool {
    let s = s.trim();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let well_formed = !digits.is_empty()
        && digits.split('_').all(|group| {
            !group.is_empty() && group.bytes().all(|b| b.is_ascii_digit())
        });
    well_formed && !negative && digits.bytes().any(|b| b != b'0' && b != b'_')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check(validator: SlotValidator, value: SlotValue) -> ValidationResult {
        let catalog = CuisineCatalog::default();
        let tracker = Tracker::default();
        validator(&value, &ValidationContext { catalog: &catalog, tracker: &tracker })
    }

    #[test]
    fn test_table_covers_validated_slots() {
        assert!(validator_for(SlotName::Cuisine).is_some());
        assert!(validator_for(SlotName::NumPeople).is_some());
        assert!(validator_for(SlotName::OutdoorSeating).is_some());
        assert!(validator_for(SlotName::Preferences).is_none());
        assert!(validator_for(SlotName::Feedback).is_none());
    }

    #[test]
    fn test_cuisine() {
        for accepted in ["Italian", "greek", "CHINESE", "caribbean"] {
            assert_eq!(
                check(validate_cuisine, accepted.into()),
                ValidationResult::Accept(accepted.into()),
                "{}",
                accepted
            );
        }
        for rejected in ["thai", "", "italian food", "sushi"] {
            assert_eq!(
                check(validate_cuisine, rejected.into()),
                ValidationResult::Reject(MessageKey::WrongCuisine),
                "{}",
                rejected
            );
        }
        assert_eq!(
            check(validate_cuisine, SlotValue::Bool(true)),
            ValidationResult::Reject(MessageKey::WrongCuisine)
        );
    }

    #[test]
    fn test_num_people() {
        assert_eq!(
            check(validate_num_people, "3".into()),
            ValidationResult::Accept("3".into())
        );
        for accepted in [
            "1",
            " 12 ",
            "+4",
            "007",
            "1_0",
            "1_000_000",
            "123456789012345678901234567890",
        ] {
            assert!(check(validate_num_people, accepted.into()).is_accepted(), "{}", accepted);
        }
        for rejected in [
            "0", "-2", "abc", "", "3.5", "two", "-0", "+", "1 2", "_1", "1_", "1__0", "0_0", "-1_0",
            "\u{0664}",
        ] {
            assert_eq!(
                check(validate_num_people, rejected.into()),
                ValidationResult::Reject(MessageKey::WrongNumPeople),
                "{}",
                rejected
            );
        }
        assert!(!check(validate_num_people, SlotValue::Bool(true)).is_accepted());
    }

    #[test]
    fn test_outdoor_seating_text() {
        assert_eq!(
            check(validate_outdoor_seating, "outside please".into()),
            ValidationResult::Accept(SlotValue::Bool(true))
        );
        assert_eq!(
            check(validate_outdoor_seating, "inside".into()),
            ValidationResult::Accept(SlotValue::Bool(false))
        );
        // "out" wins even when "in" is also present
        assert_eq!(
            check(validate_outdoor_seating, "sitting outdoors".into()),
            ValidationResult::Accept(SlotValue::Bool(true))
        );
        assert_eq!(
            check(validate_outdoor_seating, "terrace".into()),
            ValidationResult::Reject(MessageKey::WrongOutdoorSeating)
        );
        // Case-sensitive substring match
        assert_eq!(
            check(validate_outdoor_seating, "OUTSIDE".into()),
            ValidationResult::Reject(MessageKey::WrongOutdoorSeating)
        );
    }

    #[test]
    fn test_outdoor_seating_bool_passthrough() {
        assert_eq!(
            check(validate_outdoor_seating, SlotValue::Bool(true)),
            ValidationResult::Accept(SlotValue::Bool(true))
        );
        assert_eq!(
            check(validate_outdoor_seating, SlotValue::Bool(false)),
            ValidationResult::Accept(SlotValue::Bool(false))
        );
    }
}
