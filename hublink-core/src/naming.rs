//! Method naming policies
//!
//! A naming policy maps the logical method name used in Rust code to the
//! name the remote hub expects on the wire. Policies must be pure and
//! deterministic: same input, same output, no I/O and no failure modes.
//!
//! The default policy, [`CapitalizeFirst`], uppercases the first character
//! and leaves the rest of the name untouched, matching the common
//! camelCase-to-PascalCase hub convention. Any `Fn(&str) -> String` closure
//! can be used as a custom policy.

/// Maps a logical method name to the name used on the wire
pub trait MethodNamingPolicy: Send + Sync {
    /// Translate `method` into its wire name
    fn transform(&self, method: &str) -> String;
}

impl<F> MethodNamingPolicy for F
where
    F: Fn(&str) -> String + Send + Sync,
{
    fn transform(&self, method: &str) -> String {
        self(method)
    }
}

/// Default naming policy: uppercase the first character, keep the rest
///
/// `"myMethod"` becomes `"MyMethod"`; an empty name stays empty. Uppercasing
/// the first character may expand it to several characters for some scripts;
/// the remainder of the name is never touched.
#[derive(Debug, Clone, Copy, Default)]
pub struct CapitalizeFirst;

impl MethodNamingPolicy for CapitalizeFirst {
    fn transform(&self, method: &str) -> String {
        let mut chars = method.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }
}
