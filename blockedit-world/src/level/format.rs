use std::collections::BTreeMap;
use std::fs::OpenOptions;
use std::io::{Read, Write};
use std::path::Path;

use blockedit_nbt::{read_gzip_nbt, write_gzip_nbt, Nbt, NbtCompound, NbtTag};

use crate::error::DataError;
use crate::level::{GameRuleValue, Level, LevelVersion, DEFAULT_GAME_RULES};

/// Name of the root compound of every level stream.
pub const ROOT_NAME: &str = "Data";

const GAME_RULES_KEY: &str = "GameRules";
const VERSION_KEY: &str = "Version";
const RANDOM_TICK_SPEED: &str = "randomTickSpeed";

/// Serializes a level to a gzip-compressed tagged-tree stream rooted at a
/// compound named `Data`.
///
/// Rules absent from the level are filled from [`DEFAULT_GAME_RULES`] in
/// the emitted stream only; the in-memory level is left untouched.
pub fn write_level(level: &Level, output: impl Write) -> Result<(), DataError> {
    let mut root = NbtCompound::new();
    root.put_compound(GAME_RULES_KEY, game_rules_compound(level.game_rules()));
    root.put_compound(VERSION_KEY, version_compound(level.version()));

    for (key, tag) in level.settings() {
        match tag {
            NbtTag::End => {
                return Err(DataError::DisallowedTag {
                    key: key.clone(),
                    kind: "End",
                })
            }
            NbtTag::Compound(_) => {
                return Err(DataError::DisallowedTag {
                    key: key.clone(),
                    kind: "Compound",
                })
            }
            _ => root.put(key, tag.clone()),
        }
    }

    write_gzip_nbt(&Nbt::new(ROOT_NAME, root), output)?;
    Ok(())
}

pub fn write_level_file(level: &Level, path: &Path) -> Result<(), DataError> {
    let file = OpenOptions::new()
        .truncate(true)
        .create(true)
        .write(true)
        .open(path)?;
    write_level(level, file)
}

/// Parses a level from a gzip-compressed tagged-tree stream.
///
/// The root tag must be a compound named `Data`; anything else is reported
/// as a corrupt level file.
pub fn read_level(input: impl Read) -> Result<Level, DataError> {
    let nbt = match read_gzip_nbt(input) {
        Ok(nbt) => nbt,
        Err(blockedit_nbt::Error::NoRootCompound(_)) => return Err(DataError::CorruptLevel),
        Err(err) => return Err(err.into()),
    };
    if nbt.name != ROOT_NAME {
        return Err(DataError::CorruptLevel);
    }

    let mut settings = BTreeMap::new();
    let mut game_rules = BTreeMap::new();
    let mut version = None;

    for (key, tag) in nbt.root_tag {
        match (key.as_str(), &tag) {
            (GAME_RULES_KEY, NbtTag::Compound(rules)) => {
                game_rules = read_game_rules(rules);
            }
            (VERSION_KEY, NbtTag::Compound(compound)) => {
                version = Some(read_version(compound)?);
            }
            _ => {
                settings.insert(key, tag);
            }
        }
    }

    Ok(Level {
        settings,
        game_rules,
        version: version.unwrap_or_default(),
    })
}

pub fn read_level_file(path: &Path) -> Result<Level, DataError> {
    let file = OpenOptions::new().read(true).open(path)?;
    read_level(file)
}

fn game_rules_compound(rules: &BTreeMap<String, GameRuleValue>) -> NbtCompound {
    let mut merged = rules.clone();
    for (name, default) in DEFAULT_GAME_RULES {
        merged.entry(name.to_string()).or_insert(default);
    }

    let mut compound = NbtCompound::new();
    for (name, value) in &merged {
        compound.put_string(name, value.to_string());
    }
    compound
}

fn version_compound(version: &LevelVersion) -> NbtCompound {
    let mut compound = NbtCompound::new();
    compound.put_string("Id", version.id.to_string());
    compound.put_string("Name", version.name.clone());
    compound.put_string("Snapshot", if version.snapshot { "1" } else { "0" });
    compound
}

fn read_game_rules(compound: &NbtCompound) -> BTreeMap<String, GameRuleValue> {
    let mut rules = BTreeMap::new();
    for (name, tag) in &compound.child_tags {
        // Non-string entries are not game rules; skip them.
        let Some(text) = tag.extract_string() else {
            continue;
        };
        let value = if name == RANDOM_TICK_SPEED {
            match text.parse() {
                Ok(speed) => GameRuleValue::Int(speed),
                Err(_) => {
                    log::warn!("Ignoring unparsable {RANDOM_TICK_SPEED} value {text:?}");
                    continue;
                }
            }
        } else {
            GameRuleValue::Bool(text.eq_ignore_ascii_case("true"))
        };
        rules.insert(name.clone(), value);
    }
    rules
}

fn read_version(compound: &NbtCompound) -> Result<LevelVersion, DataError> {
    let id = match compound.get_string("Id") {
        Some(text) => text.parse().map_err(|_| DataError::CorruptLevel)?,
        None => 0,
    };
    let name = compound
        .get_string("Name")
        .cloned()
        .unwrap_or_else(|| "1.8.8".to_string());
    let snapshot = match compound.get_string("Snapshot").map(String::as_str) {
        None | Some("0") => false,
        Some("1") => true,
        Some(other) => return Err(DataError::InvalidSnapshotFlag(other.to_string())),
    };

    Ok(LevelVersion { id, name, snapshot })
}

#[cfg(test)]
mod test {
    use std::io::Cursor;

    use blockedit_nbt::{write_gzip_nbt, Nbt, NbtCompound, NbtTag};

    use super::{read_level, write_level, write_level_file, read_level_file};
    use crate::error::DataError;
    use crate::level::{GameRuleValue, Level};

    fn round_trip(level: &Level) -> Level {
        let mut buffer = Vec::new();
        write_level(level, &mut buffer).unwrap();
        read_level(Cursor::new(buffer)).unwrap()
    }

    #[test]
    fn default_game_rules_fill_emitted_stream() {
        let level = Level::builder().version(0, "1.8.8", false).build().unwrap();
        let read = round_trip(&level);

        assert_eq!(read.game_rules().len(), 15);
        assert_eq!(
            read.game_rule("randomTickSpeed"),
            Some(GameRuleValue::Int(3))
        );
        assert_eq!(
            read.game_rule("keepInventory"),
            Some(GameRuleValue::Bool(false))
        );
        assert_eq!(
            read.game_rule("reducedDebugInfo"),
            Some(GameRuleValue::Bool(false))
        );
        assert_eq!(
            read.game_rule("doDaylightCycle"),
            Some(GameRuleValue::Bool(true))
        );

        // Defaults were written into the stream, never into the instance.
        assert!(level.game_rules().is_empty());
    }

    #[test]
    fn explicit_rule_overrides_default() {
        let level = Level::builder()
            .game_rule("doFireTick", GameRuleValue::Bool(false))
            .game_rule("randomTickSpeed", GameRuleValue::Int(20))
            .version(0, "1.8.8", false)
            .build()
            .unwrap();
        let read = round_trip(&level);

        assert_eq!(
            read.game_rule("doFireTick"),
            Some(GameRuleValue::Bool(false))
        );
        assert_eq!(
            read.game_rule("randomTickSpeed"),
            Some(GameRuleValue::Int(20))
        );
        assert_eq!(read.game_rules().len(), 15);
    }

    #[test]
    fn settings_survive_round_trip() {
        let level = Level::builder()
            .setting("LevelName", "New World")
            .setting("SpawnX", -32)
            .setting("Time", NbtTag::Long(18_000))
            .setting("hardcore", NbtTag::Byte(1))
            .setting("BorderSize", NbtTag::Double(60_000_000.0))
            .version(0, "1.8.8", false)
            .build()
            .unwrap();
        let read = round_trip(&level);

        assert_eq!(read.setting("LevelName"), Some(&NbtTag::String("New World".into())));
        assert_eq!(read.setting("SpawnX"), Some(&NbtTag::Int(-32)));
        assert_eq!(read.setting("Time"), Some(&NbtTag::Long(18_000)));
        assert_eq!(read.setting("hardcore"), Some(&NbtTag::Byte(1)));
        assert_eq!(read.setting("BorderSize"), Some(&NbtTag::Double(60_000_000.0)));
    }

    #[test]
    fn version_survives_round_trip() {
        let level = Level::builder()
            .version(100, "15w31a", true)
            .build()
            .unwrap();
        let read = round_trip(&level);

        assert_eq!(read.version().id, 100);
        assert_eq!(read.version().name, "15w31a");
        assert!(read.version().snapshot);
        assert!(read.world_version().unwrap().is_snapshot());
    }

    #[test]
    fn missing_version_defaults() {
        // A stream with no Version compound at all.
        let mut root = NbtCompound::new();
        root.put_int("SpawnX", 0);
        let mut buffer = Vec::new();
        write_gzip_nbt(&Nbt::new("Data", root), &mut buffer).unwrap();

        let read = read_level(Cursor::new(buffer)).unwrap();
        assert_eq!(read.version().id, 0);
        assert_eq!(read.version().name, "1.8.8");
        assert!(!read.version().snapshot);
    }

    #[test]
    fn unparsable_random_tick_speed_is_skipped() {
        let _ = env_logger::try_init();

        let mut rules = NbtCompound::new();
        rules.put_string("randomTickSpeed", "fast");
        rules.put_string("doFireTick", "true");
        let mut root = NbtCompound::new();
        root.put_compound("GameRules", rules);
        let mut buffer = Vec::new();
        write_gzip_nbt(&Nbt::new("Data", root), &mut buffer).unwrap();

        let read = read_level(Cursor::new(buffer)).unwrap();
        assert_eq!(read.game_rule("randomTickSpeed"), None);
        assert_eq!(read.game_rule("doFireTick"), Some(GameRuleValue::Bool(true)));
    }

    #[test]
    fn wrong_root_name_is_corrupt() {
        let mut buffer = Vec::new();
        write_gzip_nbt(&Nbt::new("NotData", NbtCompound::new()), &mut buffer).unwrap();
        let err = read_level(Cursor::new(buffer)).unwrap_err();
        assert!(matches!(err, DataError::CorruptLevel));
    }

    #[test]
    fn invalid_snapshot_flag_is_rejected() {
        let mut version = NbtCompound::new();
        version.put_string("Id", "169");
        version.put_string("Name", "1.8.8");
        version.put_string("Snapshot", "2");
        let mut root = NbtCompound::new();
        root.put_compound("Version", version);
        let mut buffer = Vec::new();
        write_gzip_nbt(&Nbt::new("Data", root), &mut buffer).unwrap();

        let err = read_level(Cursor::new(buffer)).unwrap_err();
        assert!(matches!(err, DataError::InvalidSnapshotFlag(flag) if flag == "2"));
    }

    #[test]
    fn compound_setting_is_disallowed() {
        let level = Level::builder()
            .setting("Inner", NbtTag::Compound(NbtCompound::new()))
            .version(0, "1.8.8", false)
            .build()
            .unwrap();
        let err = write_level(&level, Vec::new()).unwrap_err();
        assert!(matches!(
            err,
            DataError::DisallowedTag { key, kind: "Compound" } if key == "Inner"
        ));
    }

    #[test]
    fn end_setting_is_disallowed() {
        let level = Level::builder()
            .setting("Broken", NbtTag::End)
            .version(0, "1.8.8", false)
            .build()
            .unwrap();
        let err = write_level(&level, Vec::new()).unwrap_err();
        assert!(matches!(
            err,
            DataError::DisallowedTag { key, kind: "End" } if key == "Broken"
        ));
    }

    #[test]
    fn file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("level.dat");

        let level = Level::builder()
            .setting("LevelName", "File World")
            .version(0, "1.8.8", false)
            .build()
            .unwrap();
        write_level_file(&level, &path).unwrap();

        let read = read_level_file(&path).unwrap();
        assert_eq!(
            read.setting("LevelName"),
            Some(&NbtTag::String("File World".into()))
        );
    }

    #[test]
    fn missing_file_surfaces_io_error() {
        let err = read_level_file(std::path::Path::new("/nonexistent/level.dat")).unwrap_err();
        assert!(matches!(err, DataError::Io(_)));
    }
}
