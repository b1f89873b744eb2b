//! Approximate-result presentation.
//!
//! The REPL only needs the shortest decimal string that round-trips
//! back to the same `f64`; the standard formatter already guarantees
//! exactly that, so this is the single seam where approximate values
//! become text.

pub fn shortest(v: f64) -> String {
    format!("{v}")
}
