//! Cross-crate integration tests for the Lockbridge workspace live in
//! `tests/`. This library target is intentionally empty.
