//! DXF group code/value pairs

/// A DXF group code/value pair.
///
/// The value is kept as the raw string read from the file so that codes the
/// tool does not interpret survive a load/save cycle byte for byte. Typed
/// accessors parse on demand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodePair {
    /// The DXF group code
    pub code: i32,
    /// Raw string value for the code
    pub value: String,
}

impl CodePair {
    /// Create a new code/value pair
    pub fn new(code: i32, value: impl Into<String>) -> Self {
        Self {
            code,
            value: value.into(),
        }
    }

    /// Get the value as a string slice
    pub fn as_str(&self) -> &str {
        &self.value
    }

    /// Get the value as an integer
    pub fn as_int(&self) -> Option<i64> {
        self.value.trim().parse::<i64>().ok()
    }

    /// Get the value as an i16
    pub fn as_i16(&self) -> Option<i16> {
        self.as_int().and_then(|v| i16::try_from(v).ok())
    }

    /// Get the value as a double
    pub fn as_double(&self) -> Option<f64> {
        self.value.trim().parse::<f64>().ok()
    }

    /// Get the value as a handle (hex string to u64)
    pub fn as_handle(&self) -> Option<u64> {
        u64::from_str_radix(self.value.trim(), 16).ok()
    }
}

/// Find the first pair with the given code.
pub fn find_code(pairs: &[CodePair], code: i32) -> Option<&CodePair> {
    pairs.iter().find(|p| p.code == code)
}

/// Get the string value of the first pair with the given code, or `""`.
pub fn string_value(pairs: &[CodePair], code: i32) -> &str {
    find_code(pairs, code).map(|p| p.as_str()).unwrap_or("")
}

/// Replace the value of the first pair with the given code, appending a new
/// pair when the code is absent.
pub fn set_string_value(pairs: &mut Vec<CodePair>, code: i32, value: &str) {
    match pairs.iter_mut().find(|p| p.code == code) {
        Some(pair) => pair.value = value.to_string(),
        None => pairs.push(CodePair::new(code, value)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_typed_accessors() {
        let pair = CodePair::new(70, "42");
        assert_eq!(pair.as_int(), Some(42));
        assert_eq!(pair.as_i16(), Some(42));

        let pair = CodePair::new(40, "123.456");
        assert_eq!(pair.as_double(), Some(123.456));

        let pair = CodePair::new(5, "FF");
        assert_eq!(pair.as_handle(), Some(255));
    }

    #[test]
    fn test_string_value_defaults_to_empty() {
        let pairs = vec![CodePair::new(8, "0")];
        assert_eq!(string_value(&pairs, 8), "0");
        assert_eq!(string_value(&pairs, 1), "");
    }

    #[test]
    fn test_set_string_value_replaces_first() {
        let mut pairs = vec![CodePair::new(1, "old"), CodePair::new(1, "other")];
        set_string_value(&mut pairs, 1, "new");
        assert_eq!(pairs[0].value, "new");
        assert_eq!(pairs[1].value, "other");
    }

    #[test]
    fn test_set_string_value_appends_when_missing() {
        let mut pairs = vec![CodePair::new(8, "0")];
        set_string_value(&mut pairs, 1, "text");
        assert_eq!(pairs.len(), 2);
        assert_eq!(string_value(&pairs, 1), "text");
    }
}
