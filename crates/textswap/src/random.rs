//! Random string generation for substitution handlers.
//!
//! Companion material for handlers that produce random output, e.g. a
//! `{#rand(8)}` placeholder backed by [`random_string`]. Preset class names
//! expand to fixed alphabets; any other non-empty entry is used as a literal
//! alphabet.

use rand::Rng;

/// Preset alphabet classes understood by [`random_string`].
const PRESETS: &[(&str, &str)] = &[
    ("number", "0123456789"),
    ("lower", "abcdefghijklmnopqrstuvwxyz"),
    ("upper", "ABCDEFGHIJKLMNOPQRSTUVWXYZ"),
    ("special", "!@#$%^&*"),
];

/// Builds a random string of `len` characters drawn from the combined
/// alphabet of `classes`.
///
/// Each entry is either a preset name (`"number"`, `"lower"`, `"upper"`,
/// `"special"`) or a literal custom alphabet. An empty class entry, or an
/// empty combined alphabet, yields an empty string.
///
/// # Example
///
/// ```rust
/// use textswap::random_string;
///
/// let pin = random_string(&["number"], 6);
/// assert_eq!(pin.len(), 6);
/// assert!(pin.chars().all(|c| c.is_ascii_digit()));
/// ```
pub fn random_string(classes: &[&str], len: usize) -> String {
    let mut alphabet = String::new();
    for &class in classes {
        if class.is_empty() {
            return String::new();
        }
        match PRESETS.iter().find(|&&(name, _)| name == class) {
            Some(&(_, preset)) => alphabet.push_str(preset),
            None => alphabet.push_str(class),
        }
    }

    let chars: Vec<char> = alphabet.chars().collect();
    if chars.is_empty() {
        return String::new();
    }

    let mut rng = rand::rng();
    (0..len)
        .map(|_| chars[rng.random_range(0..chars.len())])
        .collect()
}
