//! Display labels for descriptor ids
//!
//! Descriptor ids are camelCase (`hornetHive`, `enemyPathDesert`). The label
//! splits them at every lowercase→uppercase boundary and title-cases the
//! result, so `hornetHive` reads as `Hornet Hive`.
//!
//! Title-casing works on cased letters only: a word is a run of letters that
//! have an upper/lower form. Digits, punctuation and uncased scripts such as
//! CJK end a word, so `中a` becomes `中A`.

/// Turn a descriptor id into a human-readable label.
///
/// Running it on its own output returns the same string.
pub fn format_descriptor_id(descriptor_id: &str) -> String {
    title_case(&split_camel_case(descriptor_id))
}

/// Insert a space at each ASCII lowercase→uppercase transition.
fn split_camel_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 4);
    let mut prev_lower = false;
    for c in s.chars() {
        if prev_lower && c.is_ascii_uppercase() {
            out.push(' ');
        }
        out.push(c);
        prev_lower = c.is_ascii_lowercase();
    }
    out
}

/// Upper-case every letter that starts a word and lower-case the rest.
/// A word starts after any uncased character, so digits and punctuation
/// also begin a new word (`2x` → `2X`).
fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut in_word = false;
    for c in s.chars() {
        if is_cased(c) {
            if in_word {
                out.extend(c.to_lowercase());
            } else {
                push_word_start(&mut out, c);
            }
            in_word = true;
        } else {
            out.push(c);
            in_word = false;
        }
    }
    out
}

fn is_cased(c: char) -> bool {
    c.is_uppercase() || c.is_lowercase()
}

/// Only the first char of a multi-char upper-case mapping stays upper
/// (`ß` → `Ss`), so a second pass leaves the word alone.
fn push_word_start(out: &mut String, c: char) {
    let mut upper = c.to_uppercase();
    if let Some(first) = upper.next() {
        out.push(first);
    }
    for rest in upper {
        out.extend(rest.to_lowercase());
    }
}
