use anyhow::{Context, Result, anyhow, bail};
use std::collections::{HashMap, HashSet};
use std::path::PathBuf;
use std::str::FromStr;

/// `--name value` options and `--name` switches for one command.
#[derive(Debug, Default)]
pub struct Flags {
    values: HashMap<String, String>,
    switches: HashSet<String>,
}

impl Flags {
    /// Parse `args`, accepting only the listed option and switch names.
    pub fn parse(args: &[String], options: &[&str], switches: &[&str]) -> Result<Self> {
        let mut flags = Self::default();
        let mut iter = args.iter();

        while let Some(arg) = iter.next() {
            if options.contains(&arg.as_str()) {
                let value = iter
                    .next()
                    .ok_or_else(|| anyhow!("Missing value for {}", arg))?;
                flags.values.insert(arg.clone(), value.clone());
            } else if switches.contains(&arg.as_str()) {
                flags.switches.insert(arg.clone());
            } else {
                bail!("Unexpected argument '{}'", arg);
            }
        }

        Ok(flags)
    }

    pub fn value(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    pub fn path(&self, name: &str) -> Option<PathBuf> {
        self.value(name).map(PathBuf::from)
    }

    pub fn has(&self, name: &str) -> bool {
        self.switches.contains(name)
    }

    pub fn parsed<T>(&self, name: &str) -> Result<Option<T>>
    where
        T: FromStr,
        T::Err: std::error::Error + Send + Sync + 'static,
    {
        self.value(name)
            .map(|raw| {
                raw.parse::<T>()
                    .with_context(|| format!("Invalid value '{}' for {}", raw, name))
            })
            .transpose()
    }
}

/// Split a comma-separated list, dropping empty entries.
pub fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
