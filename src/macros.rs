// src/macros.rs
// String shorthands used across the crate.

/// `s!()` is an empty `String`; `s!(x)` is `String::from(x)`.
#[macro_export]
macro_rules! s {
    () => {
        ::std::string::String::new()
    };
    ($expr:expr $(,)?) => {
        ::std::string::String::from($expr)
    };
}

/// Concatenate string slices in one allocation: `join!(stem, ".", ext)`.
#[macro_export]
macro_rules! join {
    ($first:expr $(, $rest:expr)+ $(,)?) => {{
        let parts: &[&str] = &[$first $(, $rest)+];
        parts.concat()
    }};
}
