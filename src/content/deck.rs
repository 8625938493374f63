use anyhow::{Context, Result};
use rand::seq::SliceRandom;
use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::Path;

/// The static prompt lists shipped in the data directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PromptKind {
    Truth,
    Dare,
    NeverHaveIEver,
    ThisOrThat,
}

impl PromptKind {
    pub const ALL: [PromptKind; 4] = [
        PromptKind::Truth,
        PromptKind::Dare,
        PromptKind::NeverHaveIEver,
        PromptKind::ThisOrThat,
    ];

    pub fn file_name(self) -> &'static str {
        match self {
            PromptKind::Truth => "truths.txt",
            PromptKind::Dare => "dares.txt",
            PromptKind::NeverHaveIEver => "nhie.txt",
            PromptKind::ThisOrThat => "tot.txt",
        }
    }
}

impl fmt::Display for PromptKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PromptKind::Truth => "truths",
            PromptKind::Dare => "dares",
            PromptKind::NeverHaveIEver => "nhie",
            PromptKind::ThisOrThat => "tot",
        };
        f.write_str(name)
    }
}

/// Prompt lists loaded once at startup.
#[derive(Debug, Clone, Default)]
pub struct PromptDeck {
    prompts: HashMap<PromptKind, Vec<String>>,
}

impl PromptDeck {
    /// Reads every list from `data_dir`. A missing file is an error.
    pub fn load(data_dir: &Path) -> Result<Self> {
        let mut prompts = HashMap::new();
        for kind in PromptKind::ALL {
            let path = data_dir.join(kind.file_name());
            let lines = parse_list_file(&path)?;
            tracing::info!("Loaded {} {} prompts from {}", lines.len(), kind, path.display());
            prompts.insert(kind, lines);
        }
        Ok(Self { prompts })
    }

    pub fn from_lists(lists: impl IntoIterator<Item = (PromptKind, Vec<String>)>) -> Self {
        Self {
            prompts: lists.into_iter().collect(),
        }
    }

    pub fn random(&self, kind: PromptKind) -> Option<&str> {
        self.prompts
            .get(&kind)?
            .choose(&mut rand::thread_rng())
            .map(String::as_str)
    }

    pub fn count(&self, kind: PromptKind) -> usize {
        self.prompts.get(&kind).map_or(0, Vec::len)
    }
}

/// One prompt per line; lines are trimmed and blank lines dropped.
pub fn parse_list_file(path: &Path) -> Result<Vec<String>> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read prompt file {}", path.display()))?;
    Ok(parse_list(&raw))
}

pub fn parse_list(raw: &str) -> Vec<String> {
    raw.lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(str::to_string)
        .collect()
}
