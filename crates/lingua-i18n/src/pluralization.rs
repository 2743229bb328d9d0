//! Pluralization rules for different languages
//!
//! This module maps a language to its CLDR plural categories so plural
//! templates can pick the right case for a count. Only cardinal rules are
//! covered, and only for the language families below; everything else uses
//! the English `one`/`other` split.

use crate::error::PluralCaseError;
use crate::LocaleTag;
use std::fmt;
use std::str::FromStr;

/// CLDR plural category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PluralCategory {
    /// `zero`
    Zero,
    /// `one`
    One,
    /// `two`
    Two,
    /// `few`
    Few,
    /// `many`
    Many,
    /// `other`, the catch-all every language has
    Other,
}

impl PluralCategory {
    /// Get the CLDR keyword for this category
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Zero => "zero",
            Self::One => "one",
            Self::Two => "two",
            Self::Few => "few",
            Self::Many => "many",
            Self::Other => "other",
        }
    }

    /// All categories in CLDR order
    pub fn all() -> [Self; 6] {
        [
            Self::Zero,
            Self::One,
            Self::Two,
            Self::Few,
            Self::Many,
            Self::Other,
        ]
    }
}

impl fmt::Display for PluralCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PluralCategory {
    type Err = PluralCaseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "zero" => Ok(Self::Zero),
            "one" => Ok(Self::One),
            "two" => Ok(Self::Two),
            "few" => Ok(Self::Few),
            "many" => Ok(Self::Many),
            "other" => Ok(Self::Other),
            _ => Err(PluralCaseError::UnknownCategory {
                case: s.to_string(),
            }),
        }
    }
}

/// Plural rule family a language belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PluralRule {
    /// No plural distinction (Chinese, Japanese, Korean, ...)
    NoPlural,
    /// `one` for exactly 1 (English, German, Italian, ...)
    OneOther,
    /// `one` for 0 and 1 (French, Portuguese, Hindi, ...)
    ZeroOneOther,
    /// Russian, Ukrainian, Belarusian
    EastSlavic,
    /// Polish
    Polish,
    /// Czech, Slovak
    WestSlavic,
    /// Arabic
    Arabic,
    /// Hebrew
    Hebrew,
}

impl PluralRule {
    /// Get the rule for a locale's primary language
    pub fn for_locale(locale: &LocaleTag) -> Self {
        Self::for_language(locale.language())
    }

    /// Get the rule for a primary language subtag
    pub fn for_language(language: &str) -> Self {
        match language {
            "zh" | "ja" | "ko" | "vi" | "th" | "id" | "ms" | "lo" | "my" | "km" | "yue" => {
                Self::NoPlural
            }
            "fr" | "pt" | "hi" | "bn" | "fa" | "am" | "zu" => Self::ZeroOneOther,
            "ru" | "uk" | "be" => Self::EastSlavic,
            "pl" => Self::Polish,
            "cs" | "sk" => Self::WestSlavic,
            "ar" => Self::Arabic,
            "he" | "iw" => Self::Hebrew,
            _ => Self::OneOther,
        }
    }

    /// Select the category for a count
    pub fn category(&self, count: f64) -> PluralCategory {
        if !count.is_finite() {
            return PluralCategory::Other;
        }
        let n = count.abs();
        let integer = n.fract() == 0.0;
        // Counts beyond i64 only matter for their trailing digits, which saturate here.
        let i = n.trunc() as i64;

        match self {
            Self::NoPlural => PluralCategory::Other,
            Self::OneOther => {
                if integer && i == 1 {
                    PluralCategory::One
                } else {
                    PluralCategory::Other
                }
            }
            Self::ZeroOneOther => {
                if i == 0 || i == 1 {
                    PluralCategory::One
                } else {
                    PluralCategory::Other
                }
            }
            Self::EastSlavic => {
                if !integer {
                    PluralCategory::Other
                } else {
                    slavic_category(i, PluralCategory::Many)
                }
            }
            Self::Polish => {
                if !integer {
                    PluralCategory::Other
                } else if i == 1 {
                    PluralCategory::One
                } else {
                    match slavic_category(i, PluralCategory::Many) {
                        PluralCategory::Few => PluralCategory::Few,
                        _ => PluralCategory::Many,
                    }
                }
            }
            Self::WestSlavic => {
                if !integer {
                    PluralCategory::Many
                } else {
                    match i {
                        1 => PluralCategory::One,
                        2..=4 => PluralCategory::Few,
                        _ => PluralCategory::Other,
                    }
                }
            }
            Self::Arabic => {
                if !integer {
                    return PluralCategory::Other;
                }
                match (i, i % 100) {
                    (0, _) => PluralCategory::Zero,
                    (1, _) => PluralCategory::One,
                    (2, _) => PluralCategory::Two,
                    (_, 3..=10) => PluralCategory::Few,
                    (_, 11..=99) => PluralCategory::Many,
                    _ => PluralCategory::Other,
                }
            }
            Self::Hebrew => match (integer, i) {
                (true, 1) => PluralCategory::One,
                (true, 2) => PluralCategory::Two,
                _ => PluralCategory::Other,
            },
        }
    }

    /// Categories a translation for this rule is expected to provide
    pub fn categories(&self) -> Vec<PluralCategory> {
        use PluralCategory::{Few, Many, One, Other, Two, Zero};
        match self {
            Self::NoPlural => vec![Other],
            Self::OneOther | Self::ZeroOneOther => vec![One, Other],
            Self::EastSlavic | Self::Polish | Self::WestSlavic => vec![One, Few, Many, Other],
            Self::Arabic => vec![Zero, One, Two, Few, Many, Other],
            Self::Hebrew => vec![One, Two, Other],
        }
    }
}

/// The `n % 10` / `n % 100` split shared by the Slavic rules
fn slavic_category(i: i64, otherwise: PluralCategory) -> PluralCategory {
    let (rem10, rem100) = (i % 10, i % 100);
    if rem10 == 1 && rem100 != 11 {
        PluralCategory::One
    } else if (2..=4).contains(&rem10) && !(12..=14).contains(&rem100) {
        PluralCategory::Few
    } else {
        otherwise
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use PluralCategory::*;

    #[test]
    fn test_english_rule() {
        let rule = PluralRule::for_language("en");
        assert_eq!(rule.category(1.0), One);
        assert_eq!(rule.category(0.0), Other);
        assert_eq!(rule.category(2.0), Other);
        assert_eq!(rule.category(1.5), Other);
    }

    #[test]
    fn test_french_rule() {
        let rule = PluralRule::for_locale(&LocaleTag::resolve("fr_FR"));
        assert_eq!(rule.category(0.0), One);
        assert_eq!(rule.category(1.0), One);
        assert_eq!(rule.category(1.5), One);
        assert_eq!(rule.category(2.0), Other);
    }

    #[test]
    fn test_chinese_has_no_plural() {
        let rule = PluralRule::for_locale(&LocaleTag::resolve("zh_Hans"));
        assert_eq!(rule, PluralRule::NoPlural);
        assert_eq!(rule.category(1.0), Other);
        assert_eq!(rule.categories(), vec![Other]);
    }

    #[test]
    fn test_russian_rule() {
        let rule = PluralRule::for_language("ru");
        assert_eq!(rule.category(1.0), One);
        assert_eq!(rule.category(21.0), One);
        assert_eq!(rule.category(11.0), Many);
        assert_eq!(rule.category(3.0), Few);
        assert_eq!(rule.category(13.0), Many);
        assert_eq!(rule.category(5.0), Many);
        assert_eq!(rule.category(2.5), Other);
    }

    #[test]
    fn test_polish_rule() {
        let rule = PluralRule::for_language("pl");
        assert_eq!(rule.category(1.0), One);
        assert_eq!(rule.category(21.0), Many);
        assert_eq!(rule.category(22.0), Few);
        assert_eq!(rule.category(5.0), Many);
    }

    #[test]
    fn test_arabic_rule() {
        let rule = PluralRule::for_language("ar");
        assert_eq!(rule.category(0.0), Zero);
        assert_eq!(rule.category(2.0), Two);
        assert_eq!(rule.category(105.0), Few);
        assert_eq!(rule.category(111.0), Many);
        assert_eq!(rule.category(100.0), Other);
    }

    #[test]
    fn test_category_keywords() {
        for category in PluralCategory::all() {
            assert_eq!(category.as_str().parse::<PluralCategory>(), Ok(category));
        }
        assert!("several".parse::<PluralCategory>().is_err());
    }
}
