use crate::kind::ValueKind;

/// One of the three JSON keywords.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Literal {
    Null,
    True,
    False,
}

impl Literal {
    /// Matches a complete identifier run against the keywords. Prefixes and
    /// extensions (`nul`, `nullx`) do not match.
    pub(crate) fn from_identifier(ident: &[u8]) -> Option<Self> {
        match ident {
            b"null" => Some(Self::Null),
            b"true" => Some(Self::True),
            b"false" => Some(Self::False),
            _ => None,
        }
    }

    /// Returns `true` for a non-empty proper prefix of a keyword, which is
    /// what a keyword cut off by the end of input looks like.
    pub(crate) fn is_truncated(ident: &[u8]) -> bool {
        !ident.is_empty()
            && [&b"null"[..], b"true", b"false"]
                .iter()
                .any(|keyword| keyword.len() > ident.len() && keyword.starts_with(ident))
    }

    pub(crate) fn kind(self) -> ValueKind {
        match self {
            Self::Null => ValueKind::Null,
            Self::True | Self::False => ValueKind::Bool,
        }
    }
}

/// Bytes that extend an identifier run. Anything else ends it.
#[inline]
pub(crate) fn is_identifier_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}
