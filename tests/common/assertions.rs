//! Custom assertion macros
//!
//! Enhanced assertions for better failure output in the integration tests.

/// Assert that a result is ok and return the value.
macro_rules! assert_ok {
    ($result:expr) => {
        match $result {
            Ok(value) => value,
            Err(e) => panic!("Expected Ok, got Err: {:?}", e),
        }
    };
    ($result:expr, $message:expr) => {
        match $result {
            Ok(value) => value,
            Err(e) => panic!("{}: {:?}", $message, e),
        }
    };
}

/// Assert that a string contains a substring, printing both on failure.
macro_rules! assert_contains {
    ($haystack:expr, $needle:expr) => {
        assert!(
            $haystack.contains($needle),
            "Expected {:?} to contain {:?}",
            $haystack,
            $needle
        );
    };
}

pub(crate) use {assert_contains, assert_ok};
