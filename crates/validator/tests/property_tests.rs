//! Property-based tests for warden-validator.

use proptest::prelude::*;
use warden_validator::prelude::*;

struct Age;

impl Validate for Age {
    type Input = i64;

    fn validate(&self, input: &i64) -> Outcome {
        if *input < 0 {
            return ValidatorResult::error("age<0");
        }
        Ok(ValidatorResult::ok())
    }
}

// ============================================================================
// RESULT CONSTRUCTORS
// ============================================================================

proptest! {
    #[test]
    fn warning_keeps_severity_and_message(message in ".{1,40}") {
        let result = ValidatorResult::warning(message.clone()).unwrap();
        prop_assert_eq!(result.severity(), Severity::Warning);
        prop_assert_eq!(result.message(), Some(message.as_str()));
        prop_assert!(!result.is_ok());
    }

    #[test]
    fn error_keeps_severity_and_message(message in ".{1,40}") {
        let result = ValidatorResult::error(message.clone()).unwrap();
        prop_assert_eq!(result.severity(), Severity::Error);
        prop_assert_eq!(result.message(), Some(message.as_str()));
        prop_assert!(!result.is_ok());
    }

    #[test]
    fn equality_ignores_rule_and_params(message in ".{1,20}", rule in "[A-Z][0-9]{3}") {
        let plain = ValidatorResult::error(message.clone()).unwrap();
        let tagged = ValidatorResult::error(message).unwrap().with_rule(rule).with_param("k", "v");
        prop_assert_eq!(plain, tagged);
    }
}

// ============================================================================
// VALIDATORS
// ============================================================================

proptest! {
    #[test]
    fn age_rejects_exactly_negative_values(age in any::<i64>()) {
        let result = Age.validate(&age).unwrap();
        prop_assert_eq!(result.is_error(), age < 0);
        if age < 0 {
            prop_assert_eq!(result.message(), Some("age<0"));
        }
    }

    #[test]
    fn chain_passes_iff_every_check_passes(n in -50i32..50) {
        let chain = ChainBuilder::<i32>::new()
            .check(|n| *n != 0, "zero")
            .check(|n| *n > -10, "too small")
            .check(|n| *n < 10, "too large")
            .build()
            .unwrap();

        let result = chain.validate(&n).unwrap();
        prop_assert_eq!(result.is_ok(), n != 0 && n > -10 && n < 10);
    }
}

#[test]
fn age_examples() {
    assert_eq!(Age.validate(&-1).unwrap(), ValidatorResult::error("age<0").unwrap());
    assert!(Age.validate(&5).unwrap().is_ok());
}

#[test]
fn then_builds_a_short_circuiting_chain() {
    struct Even;

    impl Validate for Even {
        type Input = i64;

        fn validate(&self, input: &i64) -> Outcome {
            if input % 2 == 0 {
                Ok(ValidatorResult::ok())
            } else {
                ValidatorResult::warning("odd")
            }
        }
    }

    let chain = Age.then(Even);
    assert!(chain.validate(&4).unwrap().is_ok());
    assert!(chain.validate(&-3).unwrap().is_error());
    assert!(chain.validate(&3).unwrap().is_warning());
}
