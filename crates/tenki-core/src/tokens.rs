//! Display model built from a weather phrase
//!
//! A phrase such as 「晴のち雨」 becomes at most two icon tokens. Tokens are
//! ordered by where their keyword first appears in the phrase, and the pair
//! separator tells "then" (のち) apart from "at times" (時々, 一時).

use crate::dictionary::{WeatherIcon, KEYWORD_ICONS};
use serde::Serialize;
use std::fmt;

/// Marker for a change over the day
pub const TRANSITION_WORD: &str = "のち";

/// Icon size for a lone token
pub const SINGLE_ICON_SIZE: u16 = 70;

/// Icon size for each token of a pair
pub const PAIR_ICON_SIZE: u16 = 40;

/// Icon size for the unknown token
pub const UNKNOWN_ICON_SIZE: u16 = 50;

/// One icon with its color token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DisplayToken {
    pub icon: &'static str,
    pub color: &'static str,
}

impl DisplayToken {
    pub const UNKNOWN: DisplayToken = DisplayToken {
        icon: "help_outline",
        color: "grey_300",
    };

    fn new(icon: WeatherIcon, color: &'static str) -> Self {
        Self {
            icon: icon.as_str(),
            color,
        }
    }
}

/// How the two tokens of a pair are joined
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Separator {
    /// Arrow: the first condition turns into the second
    Sequential,
    /// Divider: both conditions occur during the day
    Simultaneous,
}

impl Separator {
    pub fn symbol(&self) -> &'static str {
        match self {
            Separator::Sequential => "→",
            Separator::Simultaneous => "|",
        }
    }
}

/// 0/1/2 icon representation of a phrase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum DisplayModel {
    Unknown,
    Single(DisplayToken),
    Pair {
        first: DisplayToken,
        separator: Separator,
        second: DisplayToken,
    },
}

impl DisplayModel {
    pub fn icon_size(&self) -> u16 {
        match self {
            DisplayModel::Unknown => UNKNOWN_ICON_SIZE,
            DisplayModel::Single(_) => SINGLE_ICON_SIZE,
            DisplayModel::Pair { .. } => PAIR_ICON_SIZE,
        }
    }

    /// Leading token; the unknown token when nothing matched
    pub fn primary(&self) -> DisplayToken {
        match self {
            DisplayModel::Unknown => DisplayToken::UNKNOWN,
            DisplayModel::Single(token) => *token,
            DisplayModel::Pair { first, .. } => *first,
        }
    }
}

impl fmt::Display for DisplayModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DisplayModel::Unknown => write!(f, "{}", DisplayToken::UNKNOWN.icon),
            DisplayModel::Single(token) => write!(f, "{}", token.icon),
            DisplayModel::Pair {
                first,
                separator,
                second,
            } => write!(f, "{} {} {}", first.icon, separator.symbol(), second.icon),
        }
    }
}

/// Build the display model for a phrase.
///
/// Keywords are searched in the phrase as given; normalization only affects
/// the short text shown under the icons.
pub fn to_display_tokens(phrase: &str) -> DisplayModel {
    let mut found: Vec<(usize, DisplayToken)> = KEYWORD_ICONS
        .iter()
        .filter_map(|(word, icon, color)| {
            phrase
                .find(word)
                .map(|index| (index, DisplayToken::new(*icon, *color)))
        })
        .collect();

    // Stable: equal positions keep table order
    found.sort_by_key(|(index, _)| *index);

    match found.as_slice() {
        [] => DisplayModel::Unknown,
        [(_, token)] => DisplayModel::Single(*token),
        [(_, first), (_, second), ..] => {
            let separator = if phrase.contains(TRANSITION_WORD) {
                Separator::Sequential
            } else {
                Separator::Simultaneous
            };
            DisplayModel::Pair {
                first: *first,
                separator,
                second: *second,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sunny() -> DisplayToken {
        DisplayToken::new(WeatherIcon::Sunny, "orange")
    }

    fn rain() -> DisplayToken {
        DisplayToken::new(WeatherIcon::WaterDrop, "blue")
    }

    fn cloud() -> DisplayToken {
        DisplayToken::new(WeatherIcon::Cloud, "grey")
    }

    #[test]
    fn test_single_keyword() {
        let model = to_display_tokens("晴");
        assert_eq!(model, DisplayModel::Single(sunny()));
        assert_eq!(model.icon_size(), SINGLE_ICON_SIZE);

        assert_eq!(to_display_tokens("晴れ"), DisplayModel::Single(sunny()));
        assert_eq!(to_display_tokens("くもり"), DisplayModel::Single(cloud()));
    }

    #[test]
    fn test_order_follows_position_not_table() {
        // 晴 precedes 雨 in the table but appears later in the phrase
        let model = to_display_tokens("雨時々晴");
        assert_eq!(
            model,
            DisplayModel::Pair {
                first: rain(),
                separator: Separator::Simultaneous,
                second: sunny(),
            }
        );
        assert_eq!(model.icon_size(), PAIR_ICON_SIZE);
    }

    #[test]
    fn test_no_keyword_is_unknown() {
        let model = to_display_tokens("風");
        assert_eq!(model, DisplayModel::Unknown);
        assert_eq!(model.primary(), DisplayToken::UNKNOWN);
        assert_eq!(model.icon_size(), UNKNOWN_ICON_SIZE);
        assert_eq!(to_display_tokens(""), DisplayModel::Unknown);
    }

    #[test]
    fn test_transition_word_forces_sequential() {
        for phrase in ["晴のち雨", "くもりのち晴", "雪のち雨", "雨のちくもり"] {
            match to_display_tokens(phrase) {
                DisplayModel::Pair { separator, .. } => {
                    assert_eq!(separator, Separator::Sequential, "{phrase}")
                }
                other => panic!("expected pair for {phrase}, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_extra_keywords_dropped() {
        // 雷 and 雪 are found too, only the first two by position survive
        let model = to_display_tokens("晴のち雨 雷 雪");
        assert_eq!(
            model,
            DisplayModel::Pair {
                first: sunny(),
                separator: Separator::Sequential,
                second: rain(),
            }
        );
    }

    #[test]
    fn test_cloud_and_overcast_share_token() {
        let model = to_display_tokens("曇時々くもり");
        assert_eq!(
            model,
            DisplayModel::Pair {
                first: cloud(),
                separator: Separator::Simultaneous,
                second: cloud(),
            }
        );
    }

    #[test]
    fn test_tokens_use_unnormalized_phrase() {
        // 所により would be stripped for display but keywords are found either way
        let model = to_display_tokens("くもり 所により 雨");
        assert_eq!(model.primary(), cloud());
    }

    #[test]
    fn test_display_text() {
        insta::assert_snapshot!(to_display_tokens("晴のち雨").to_string(), @"sunny → water_drop");
        insta::assert_snapshot!(to_display_tokens("くもり時々雪").to_string(), @"cloud | snowing");
        insta::assert_snapshot!(to_display_tokens("大雨").to_string(), @"water_drop");
        insta::assert_snapshot!(to_display_tokens("風").to_string(), @"help_outline");
    }
}
