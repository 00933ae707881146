//! JNI symbol names for native methods.
//!
//! The JVM binds `native` methods by looking up `Java_<class>_<method>` in the
//! loaded library, with both parts escaped so any Java identifier maps to a C
//! identifier.

/// Escapes one component of a JNI symbol name.
///
/// Package separators (`/` or `.`) become `_`; `_`, `;` and `[` become `_1`,
/// `_2` and `_3`; anything else outside ASCII alphanumerics becomes `_0xxxx`
/// with the UTF-16 code unit in lower-case hex.
pub fn mangle(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for c in name.chars() {
        match c {
            '/' | '.' => out.push('_'),
            '_' => out.push_str("_1"),
            ';' => out.push_str("_2"),
            '[' => out.push_str("_3"),
            c if c.is_ascii_alphanumeric() => out.push(c),
            c => {
                let mut units = [0u16; 2];
                for unit in c.encode_utf16(&mut units) {
                    out.push_str(&format!("_0{:04x}", unit));
                }
            }
        }
    }
    out
}

/// The short JNI name for `method` of `class` (binary name, `/` or `.` separated).
pub fn jni_short_name(class: &str, method: &str) -> String {
    format!("Java_{}_{}", mangle(class), mangle(method))
}
