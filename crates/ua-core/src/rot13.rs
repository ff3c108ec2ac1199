//! Shift-13 codec for `UserAssist` value names.
//!
//! Windows stores value names with ASCII letters rotated by 13. The rotation
//! is its own inverse, so the same function encodes and decodes.

/// Rotates ASCII letters by 13 places, leaving every other character untouched.
pub fn decode(name: &str) -> String {
    name.chars().map(rotate).collect()
}

fn rotate(c: char) -> char {
    let Ok(byte) = u8::try_from(c) else {
        return c;
    };
    match byte {
        b'a'..=b'm' | b'A'..=b'M' => char::from(byte + 13),
        b'n'..=b'z' | b'N'..=b'Z' => char::from(byte - 13),
        _ => c,
    }
}
