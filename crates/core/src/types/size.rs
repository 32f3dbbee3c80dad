//! Garment size selection.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Garment sizes offered for every catalog product.
///
/// The size is half of a cart line item's identity: the same product in two
/// different sizes is two distinct lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum Size {
    Xs,
    S,
    #[default]
    M,
    L,
    Xl,
    Xxl,
}

impl Size {
    /// All sizes in display order.
    pub const ALL: [Self; 6] = [Self::Xs, Self::S, Self::M, Self::L, Self::Xl, Self::Xxl];

    /// The label shown on size selectors and in order messages.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Xs => "XS",
            Self::S => "S",
            Self::M => "M",
            Self::L => "L",
            Self::Xl => "XL",
            Self::Xxl => "XXL",
        }
    }
}

impl std::fmt::Display for Size {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Error parsing a size label.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid size: {0}")]
pub struct SizeParseError(pub String);

impl std::str::FromStr for Size {
    type Err = SizeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "XS" => Ok(Self::Xs),
            "S" => Ok(Self::S),
            "M" => Ok(Self::M),
            "L" => Ok(Self::L),
            "XL" => Ok(Self::Xl),
            "XXL" => Ok(Self::Xxl),
            other => Err(SizeParseError(other.to_owned())),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_label_round_trip() {
        for size in Size::ALL {
            assert_eq!(size.label().parse::<Size>().unwrap(), size);
        }
    }

    #[test]
    fn test_parse_rejects_unknown() {
        assert_eq!(
            "XXXL".parse::<Size>(),
            Err(SizeParseError("XXXL".to_owned()))
        );
    }

    #[test]
    fn test_serde_uses_labels() {
        let json = serde_json::to_string(&Size::Xxl).unwrap();
        assert_eq!(json, "\"XXL\"");
        assert_eq!(serde_json::from_str::<Size>("\"XS\"").unwrap(), Size::Xs);
    }
}
