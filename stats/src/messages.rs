use std::{
    collections::{HashMap, HashSet},
    fs,
    path::Path,
};

use anyhow::{bail, Context};
use serde::Deserialize;

const BUILTIN: &str = include_str!("../../Messages.toml");

/// Weekly summary template in the message-file format: the prose plus the
/// set of `{variable}` placeholders it expects to be filled.
#[derive(Debug, Deserialize)]
pub struct SummaryTemplate {
    summary: String,
    variables: HashSet<String>,
}

impl SummaryTemplate {
    pub fn builtin() -> anyhow::Result<Self> {
        toml::from_str(BUILTIN).context("built-in summary template is malformed")
    }

    pub fn load_from_file(path: &Path) -> anyhow::Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read summary template {}", path.display()))?;
        toml::from_str(&raw).context("failed to parse summary template")
    }

    pub fn format(&self, values: HashMap<&'static str, String>) -> anyhow::Result<String> {
        let mut formatted = self.summary.clone();
        for key in self.variables.iter() {
            let Some(value) = values.get(key.as_str()) else {
                bail!("the summary template expects a variable that wasn't provided: {key}");
            };
            formatted = formatted.replace(&format!("{{{}}}", key), value);
        }

        Ok(formatted)
    }
}
