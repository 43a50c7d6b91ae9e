//! Plain-text workout entries such as `"Bench Press 3x10 @60kg"`.

use anyhow::{Result, anyhow, bail};
use regex::Regex;
use std::sync::LazyLock;

use crate::db::models::NewWorkoutRecord;

static ENTRY_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^\s*(?P<name>[^@\s][^@]*?)\s*(?:(?P<sets>\d+)\s*x\s*(?P<reps>\d+))?\s*(?:@\s*(?P<weight>\d+(?:\.\d+)?)\s*(?:kg)?)?\s*$",
    )
    .expect("entry pattern is valid")
});

/// Parses `<name> [<sets>x<reps>] [@<weight>[kg]]`.
pub fn parse_workout_entry(input: &str) -> Result<NewWorkoutRecord> {
    if input.trim().is_empty() {
        bail!("Workout entry is empty");
    }

    let caps = ENTRY_PATTERN
        .captures(input)
        .ok_or_else(|| anyhow!("Could not understand workout entry: {:?}", input))?;

    let name = caps
        .name("name")
        .map(|m| m.as_str().trim().to_string())
        .unwrap_or_default();
    if name.is_empty() {
        bail!("Workout entry has no exercise name");
    }

    let int_group = |group: &str| -> Result<Option<i64>> {
        caps.name(group)
            .map(|m| {
                m.as_str()
                    .parse::<i64>()
                    .map_err(|e| anyhow!("Invalid {} in {:?}: {}", group, input, e))
            })
            .transpose()
    };

    let weight = caps
        .name("weight")
        .map(|m| m.as_str().parse::<f64>())
        .transpose()
        .map_err(|e| anyhow!("Invalid weight in {:?}: {}", input, e))?;

    Ok(NewWorkoutRecord {
        name,
        sets: int_group("sets")?,
        reps: int_group("reps")?,
        weight,
    })
}
