use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use blockedit_nbt::NbtTag;

use crate::error::DataBuildError;
use crate::version::{VersionParseError, WorldVersion};

pub mod format;

pub use format::{read_level, read_level_file, write_level, write_level_file};

/// A named world-behavior toggle, either boolean or integral.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameRuleValue {
    Bool(bool),
    Int(i32),
}

impl fmt::Display for GameRuleValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameRuleValue::Bool(value) => write!(f, "{value}"),
            GameRuleValue::Int(value) => write!(f, "{value}"),
        }
    }
}

/// The documented rule set a written level always carries. Any rule absent
/// from the in-memory level is filled from this table into the emitted
/// stream only.
pub const DEFAULT_GAME_RULES: [(&str, GameRuleValue); 15] = [
    ("commandBlockOutput", GameRuleValue::Bool(true)),
    ("doDaylightCycle", GameRuleValue::Bool(true)),
    ("doEntityDrops", GameRuleValue::Bool(true)),
    ("doFireTick", GameRuleValue::Bool(true)),
    ("doMobLoot", GameRuleValue::Bool(true)),
    ("doMobSpawning", GameRuleValue::Bool(true)),
    ("doTileDrops", GameRuleValue::Bool(true)),
    ("keepInventory", GameRuleValue::Bool(false)),
    ("logAdminCommands", GameRuleValue::Bool(true)),
    ("mobGriefing", GameRuleValue::Bool(true)),
    ("naturalRegeneration", GameRuleValue::Bool(true)),
    ("randomTickSpeed", GameRuleValue::Int(3)),
    ("reducedDebugInfo", GameRuleValue::Bool(false)),
    ("sendCommandFeedback", GameRuleValue::Bool(true)),
    ("showDeathMessages", GameRuleValue::Bool(true)),
];

/// The `Version` compound of a level file: a numeric data id, a version
/// name, and a snapshot flag.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LevelVersion {
    pub id: i32,
    pub name: String,
    pub snapshot: bool,
}

impl Default for LevelVersion {
    fn default() -> Self {
        LevelVersion {
            id: 0,
            name: "1.8.8".to_string(),
            snapshot: false,
        }
    }
}

/// The top-level world descriptor: a sorted mapping of setting name to tag,
/// the game-rule mapping, and the world version.
#[derive(Clone, Debug, PartialEq)]
pub struct Level {
    settings: BTreeMap<String, NbtTag>,
    game_rules: BTreeMap<String, GameRuleValue>,
    version: LevelVersion,
}

impl Level {
    pub fn builder() -> LevelBuilder {
        LevelBuilder::default()
    }

    /// A builder pre-seeded with this level's settings, for derived worlds.
    pub fn builder_from(parent: &Level) -> LevelBuilder {
        LevelBuilder {
            settings: parent.settings.clone(),
            game_rules: BTreeMap::new(),
            version: Some(parent.version.clone()),
        }
    }

    pub fn settings(&self) -> &BTreeMap<String, NbtTag> {
        &self.settings
    }

    pub fn setting(&self, name: &str) -> Option<&NbtTag> {
        self.settings.get(name)
    }

    pub fn game_rules(&self) -> &BTreeMap<String, GameRuleValue> {
        &self.game_rules
    }

    pub fn game_rule(&self, name: &str) -> Option<GameRuleValue> {
        self.game_rules.get(name).copied()
    }

    pub fn version(&self) -> &LevelVersion {
        &self.version
    }

    /// Parses the version name into a [`WorldVersion`].
    pub fn world_version(&self) -> Result<WorldVersion, VersionParseError> {
        WorldVersion::from_str(&self.version.name)
    }
}

#[derive(Debug, Default)]
pub struct LevelBuilder {
    settings: BTreeMap<String, NbtTag>,
    game_rules: BTreeMap<String, GameRuleValue>,
    version: Option<LevelVersion>,
}

impl LevelBuilder {
    pub fn setting(mut self, name: impl Into<String>, value: impl Into<NbtTag>) -> Self {
        self.settings.insert(name.into(), value.into());
        self
    }

    pub fn game_rule(mut self, name: impl Into<String>, value: GameRuleValue) -> Self {
        self.game_rules.insert(name.into(), value);
        self
    }

    pub fn game_rules(mut self, rules: BTreeMap<String, GameRuleValue>) -> Self {
        self.game_rules = rules;
        self
    }

    pub fn version(mut self, id: i32, name: impl Into<String>, snapshot: bool) -> Self {
        self.version = Some(LevelVersion {
            id,
            name: name.into(),
            snapshot,
        });
        self
    }

    pub fn build(self) -> Result<Level, DataBuildError> {
        let version = self.version.ok_or(DataBuildError::MissingVersion)?;
        Ok(Level {
            settings: self.settings,
            game_rules: self.game_rules,
            version,
        })
    }
}

#[cfg(test)]
mod test {
    use super::{GameRuleValue, Level};

    #[test]
    fn build_without_version_fails() {
        assert!(Level::builder().setting("SpawnX", 0).build().is_err());
    }

    #[test]
    fn builder_from_parent_inherits_settings() {
        let parent = Level::builder()
            .setting("LevelName", "Old World")
            .game_rule("doFireTick", GameRuleValue::Bool(false))
            .version(0, "1.8.8", false)
            .build()
            .unwrap();

        let child = Level::builder_from(&parent).build().unwrap();
        assert_eq!(
            child.setting("LevelName"),
            parent.setting("LevelName")
        );
        // Game rules are not inherited, only settings and version.
        assert!(child.game_rules().is_empty());
    }

    #[test]
    fn world_version_parses_version_name() {
        let level = Level::builder().version(0, "1.8.8", false).build().unwrap();
        assert!(level.world_version().unwrap().is_release());
    }
}
