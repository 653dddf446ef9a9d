use crate::conf::load_or_default;
use serde::Serialize;
use std::path::PathBuf;

pub fn dump(path: Option<PathBuf>, json: bool, yaml: bool) -> anyhow::Result<()> {
    let cfg = load_or_default(path.as_deref())?;

    let s = if yaml && !json {
        to_yaml(&cfg)?
    } else {
        to_json(&cfg)?
    };
    println!("{s}");
    Ok(())
}

pub fn to_json<T: Serialize>(value: &T) -> anyhow::Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

pub fn to_yaml<T: Serialize>(value: &T) -> anyhow::Result<String> {
    Ok(serde_yaml::to_string(value)?)
}
