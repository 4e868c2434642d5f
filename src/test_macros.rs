//! Test macros for NonZero newtype wrappers
//!
//! This module provides reusable test macros to reduce boilerplate
//! when testing newtype wrappers around NonZero* types.

/// Generate standard tests for a NonZero newtype wrapper
///
/// # Arguments
/// * `$type_name` - The newtype struct name (e.g., `Lookahead`)
/// * `$default_value` - Expected value of the DEFAULT constant
/// * `$test_value` - A valid non-zero value for testing
///
/// # Generated Tests
/// - `test_default` - Verifies DEFAULT constant value
/// - `test_new_valid` - Tests creating with valid non-zero value
/// - `test_new_zero_rejected` - Verifies zero returns None
/// - `test_copy_equality` - Tests Copy and PartialEq
///
/// # Example
/// ```ignore
/// test_nonzero_newtype!(Lookahead, 8, 3);
/// ```
#[macro_export]
macro_rules! test_nonzero_newtype {
    ($type_name:ident, $default_value:expr, $test_value:expr) => {
        #[test]
        fn test_default() {
            assert_eq!($type_name::DEFAULT.get(), $default_value);
            assert_eq!($type_name::default(), $type_name::DEFAULT);
        }

        #[test]
        fn test_new_valid() {
            let value = $type_name::new($test_value).unwrap();
            assert_eq!(value.get(), $test_value);
        }

        #[test]
        fn test_new_zero_rejected() {
            assert!($type_name::new(0).is_none());
        }

        #[test]
        fn test_copy_equality() {
            let val1 = $type_name::new($test_value).unwrap();
            let val2 = val1;
            let val3 = $type_name::new($test_value).unwrap();
            let val4 = $type_name::new($default_value).unwrap();

            assert_eq!(val1, val2);
            assert_eq!(val1, val3);
            assert_ne!(val1, val4);
        }
    };
}

/// Generate FromStr tests for a newtype with FromStr implementation
///
/// # Example
/// ```ignore
/// test_newtype_from_str!(CacheCapacity, "2000", 2000, "not_a_number");
/// ```
#[macro_export]
macro_rules! test_newtype_from_str {
    ($type_name:ident, $valid_str:expr, $expected_value:expr, $invalid_str:expr) => {
        #[test]
        fn test_from_str_valid() {
            let value: $type_name = $valid_str.parse().unwrap();
            assert_eq!(value.get(), $expected_value);
        }

        #[test]
        fn test_from_str_invalid() {
            let result: Result<$type_name, _> = $invalid_str.parse();
            assert!(result.is_err());
        }
    };
}

/// Generate all standard tests for a NonZero newtype with FromStr
///
/// # Example
/// ```ignore
/// test_nonzero_newtype_full!(
///     CacheCapacity,
///     default: 10_000,
///     test_value: 512,
///     from_str: ("2000", 2000, "invalid")
/// );
/// ```
#[macro_export]
macro_rules! test_nonzero_newtype_full {
    (
        $type_name:ident,
        default: $default_value:expr,
        test_value: $test_value:expr,
        from_str: ($valid_str:expr, $expected:expr, $invalid_str:expr)
    ) => {
        $crate::test_nonzero_newtype!($type_name, $default_value, $test_value);
        $crate::test_newtype_from_str!($type_name, $valid_str, $expected, $invalid_str);
    };
}
