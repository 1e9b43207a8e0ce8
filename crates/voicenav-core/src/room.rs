//! Room categories and their natural-language aliases.

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString, IntoEnumIterator};

/// Canonical, closed set of functional spaces a phrase can resolve to.
///
/// The wire form is snake_case (`living_room`), which is also what gets
/// published on the resolved-room event.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum RoomCategory {
    LivingRoom,
    Bedroom,
    Kitchen,
    Bathroom,
    DiningRoom,
    Study,
    Balcony,
    Entrance,
}

impl RoomCategory {
    /// Wire identifier with `_` separators replaced by spaces.
    ///
    /// This is the form compared against waypoint labels.
    pub fn spaced_name(&self) -> String {
        self.as_ref().replace('_', " ")
    }

    /// Human-facing name for the given display language.
    ///
    /// `zh_CN` (and any `zh*` tag) yields the Chinese name; everything else
    /// falls back to the spaced English identifier.
    pub fn display_name(&self, language: &str) -> String {
        if language.starts_with("zh") {
            let name = match self {
                Self::LivingRoom => "客厅",
                Self::Bedroom => "卧室",
                Self::Kitchen => "厨房",
                Self::Bathroom => "卫生间",
                Self::DiningRoom => "餐厅",
                Self::Study => "书房",
                Self::Balcony => "阳台",
                Self::Entrance => "玄关",
            };
            name.to_string()
        } else {
            self.spaced_name()
        }
    }
}

/// Ordered alias table: category order and alias order both matter, since
/// resolution ties are broken by first occurrence.
pub type AliasTable = [(RoomCategory, &'static [&'static str])];

/// Process-wide alias table.
pub static ROOM_ALIASES: &AliasTable = &[
    (
        RoomCategory::LivingRoom,
        &["客厅", "起居室", "会客厅", "living room", "lounge", "大厅"],
    ),
    (
        RoomCategory::Bedroom,
        &["卧室", "主卧", "次卧", "房间", "bedroom", "bed room", "睡眠室"],
    ),
    (
        RoomCategory::Kitchen,
        &["厨房", "灶间", "kitchen", "做饭的地方"],
    ),
    (
        RoomCategory::Bathroom,
        &["卫生间", "厕所", "洗手间", "浴室", "bathroom", "洗澡间"],
    ),
    (
        RoomCategory::DiningRoom,
        &["餐厅", "饭厅", "吃饭的地方", "dining room", "餐饮区"],
    ),
    (
        RoomCategory::Study,
        &["书房", "学习室", "办公室", "study", "工作室", "书籍室"],
    ),
    (
        RoomCategory::Balcony,
        &["阳台", "露台", "balcony", "室外"],
    ),
    (
        RoomCategory::Entrance,
        &["玄关", "入口", "门厅", "entrance", "进门处", "大门"],
    ),
];

/// Returns the aliases registered for `category` in [`ROOM_ALIASES`].
pub fn aliases_for(category: RoomCategory) -> &'static [&'static str] {
    ROOM_ALIASES
        .iter()
        .find(|(c, _)| *c == category)
        .map(|(_, aliases)| *aliases)
        .unwrap_or(&[])
}

/// All categories in declaration order.
pub fn all_categories() -> impl Iterator<Item = RoomCategory> {
    RoomCategory::iter()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_wire_form_round_trips() {
        assert_eq!(RoomCategory::LivingRoom.to_string(), "living_room");
        assert_eq!(
            RoomCategory::from_str("dining_room").unwrap(),
            RoomCategory::DiningRoom
        );
        assert!(RoomCategory::from_str("garage").is_err());
    }

    #[test]
    fn test_spaced_name() {
        assert_eq!(RoomCategory::LivingRoom.spaced_name(), "living room");
        assert_eq!(RoomCategory::Study.spaced_name(), "study");
    }

    #[test]
    fn test_display_name_by_language() {
        assert_eq!(RoomCategory::Kitchen.display_name("zh_CN"), "厨房");
        assert_eq!(RoomCategory::DiningRoom.display_name("en"), "dining room");
    }

    #[test]
    fn test_every_category_has_aliases() {
        for category in all_categories() {
            assert!(
                !aliases_for(category).is_empty(),
                "{} has no aliases",
                category
            );
        }
        assert_eq!(ROOM_ALIASES.len(), all_categories().count());
    }
}
