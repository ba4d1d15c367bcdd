use serde::{Deserialize, Serialize};

/// Returned when a stored string does not name a known variant.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid {field} value: {value}")]
pub struct InvalidEnum {
    pub field: String,
    pub value: String,
}

/// Macro to generate enum with as_str + std::str::FromStr pattern
macro_rules! str_enum {
    ($name:ident { $($variant:ident => $s:literal),+ $(,)? }) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(rename_all = "snake_case")]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $s),+
                }
            }
        }

        impl std::str::FromStr for $name {
            type Err = InvalidEnum;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($s => Ok(Self::$variant)),+,
                    _ => Err(InvalidEnum {
                        field: stringify!($name).into(),
                        value: s.into(),
                    }),
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

str_enum!(Gender {
    Male => "male",
    Female => "female",
    Other => "other",
});

str_enum!(ResultFlag {
    Normal => "normal",
    Low => "low",
    High => "high",
    Critical => "critical",
});

impl Gender {
    /// Lenient parse used at the document boundary: any case, `M`/`F`
    /// abbreviations, unknown words become `Other`. Blank input is unknown.
    pub fn from_loose(raw: &str) -> Option<Self> {
        let lower = raw.trim().to_lowercase();
        match lower.as_str() {
            "" => None,
            "male" | "m" => Some(Self::Male),
            "female" | "f" => Some(Self::Female),
            _ => Some(Self::Other),
        }
    }
}

impl ResultFlag {
    /// Everything except `Normal` is rendered as out of range.
    pub fn is_abnormal(&self) -> bool {
        !matches!(self, Self::Normal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn result_flag_round_trip() {
        for (variant, s) in [
            (ResultFlag::Normal, "normal"),
            (ResultFlag::Low, "low"),
            (ResultFlag::High, "high"),
            (ResultFlag::Critical, "critical"),
        ] {
            assert_eq!(variant.as_str(), s);
            assert_eq!(ResultFlag::from_str(s).unwrap(), variant);
        }
    }

    #[test]
    fn gender_round_trip() {
        for (variant, s) in [
            (Gender::Male, "male"),
            (Gender::Female, "female"),
            (Gender::Other, "other"),
        ] {
            assert_eq!(variant.as_str(), s);
            assert_eq!(Gender::from_str(s).unwrap(), variant);
        }
    }

    #[test]
    fn invalid_enum_returns_error() {
        let err = ResultFlag::from_str("borderline").unwrap_err();
        assert_eq!(err.field, "ResultFlag");
        assert_eq!(err.value, "borderline");
    }

    #[test]
    fn loose_gender_accepts_case_and_abbreviations() {
        assert_eq!(Gender::from_loose("Male"), Some(Gender::Male));
        assert_eq!(Gender::from_loose(" F "), Some(Gender::Female));
        assert_eq!(Gender::from_loose("FEMALE"), Some(Gender::Female));
        assert_eq!(Gender::from_loose("transgender"), Some(Gender::Other));
        assert_eq!(Gender::from_loose("   "), None);
    }

    #[test]
    fn only_normal_is_not_abnormal() {
        assert!(!ResultFlag::Normal.is_abnormal());
        assert!(ResultFlag::Low.is_abnormal());
        assert!(ResultFlag::High.is_abnormal());
        assert!(ResultFlag::Critical.is_abnormal());
    }

    #[test]
    fn flag_serializes_lowercase() {
        let json = serde_json::to_string(&ResultFlag::High).unwrap();
        assert_eq!(json, "\"high\"");
    }
}
