// murmur/murmur-core-client
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use serde::{Deserialize, Serialize};

/// An index into a string counted in Unicode scalar values (`char`s), independent of the
/// string's encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UnicodeScalarIndex(usize);

impl UnicodeScalarIndex {
    pub fn new(value: usize) -> Self {
        Self(value)
    }

    pub fn value(&self) -> usize {
        self.0
    }

    /// Converts a UTF-8 byte offset into `string` into a scalar index. Offsets which are not at
    /// a char boundary are rounded down to the previous boundary.
    pub fn from_utf8_offset(string: &str, offset: usize) -> Self {
        Self(
            string
                .char_indices()
                .take_while(|(idx, _)| *idx < offset)
                .count(),
        )
    }

    /// Converts the index into a UTF-8 byte offset into `string`. Returns `None` if the index
    /// is out of bounds.
    pub fn to_utf8_offset(&self, string: &str) -> Option<usize> {
        if self.0 == string.chars().count() {
            return Some(string.len());
        }
        string.char_indices().nth(self.0).map(|(idx, _)| idx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offset_conversion() {
        let s = "hé @Bob";

        assert_eq!(UnicodeScalarIndex::from_utf8_offset(s, 0).value(), 0);
        assert_eq!(UnicodeScalarIndex::from_utf8_offset(s, 4).value(), 3);
        assert_eq!(UnicodeScalarIndex::new(3).to_utf8_offset(s), Some(4));
        assert_eq!(UnicodeScalarIndex::new(7).to_utf8_offset(s), Some(8));
        assert_eq!(UnicodeScalarIndex::new(8).to_utf8_offset(s), None);
    }
}
