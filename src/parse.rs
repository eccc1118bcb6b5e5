// Input parsing: whitespace tokenizer and the flag extractor.
//
// There is no quoting. Multi-word values (joke text, category names) are
// rebuilt from the positional tokens by the command handlers.

use std::collections::BTreeMap;

/// A flag the interpreter understands, with every alias that spells it.
/// Aliases are consulted in the listed order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlagSpec {
    pub name: &'static str,
    pub aliases: &'static [&'static str],
}

/// `--category CAT` or `-c CAT`.
pub const CATEGORY: FlagSpec = FlagSpec {
    name: "category",
    aliases: &["--category", "-c"],
};

/// `--id ID`.
pub const ID: FlagSpec = FlagSpec {
    name: "id",
    aliases: &["--id"],
};

/// Split a raw line on runs of whitespace, dropping empty pieces.
pub fn tokenize(line: &str) -> Vec<String> {
    line.split_whitespace().map(str::to_owned).collect()
}

/// Flag values keyed by canonical flag name. A present key with a `None`
/// value means the alias was the last token and had nothing to consume.
pub type Flags = BTreeMap<&'static str, Option<String>>;

/// Pull the flags described by `specs` out of `tokens`.
///
/// For each spec the aliases are tried in order and the first occurrence of
/// the first alias found wins; its value is the token right after it, taken
/// verbatim even when that token looks like another flag. Repeated flags are
/// not an error: later occurrences simply stay in the positional residue.
/// Both the alias and its value are removed from the residue.
pub fn extract(tokens: &[String], specs: &[FlagSpec]) -> (Flags, Vec<String>) {
    let mut flags = Flags::new();
    let mut consumed = vec![false; tokens.len()];

    for spec in specs {
        let found = spec
            .aliases
            .iter()
            .find_map(|alias| tokens.iter().position(|t| t == alias));
        let Some(idx) = found else { continue };

        consumed[idx] = true;
        let value = tokens.get(idx + 1).cloned();
        if value.is_some() {
            consumed[idx + 1] = true;
        }
        flags.insert(spec.name, value);
    }

    let positionals = tokens
        .iter()
        .zip(consumed)
        .filter(|(_, used)| !used)
        .map(|(t, _)| t.clone())
        .collect();
    (flags, positionals)
}

/// A command line after flag extraction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedCommand {
    pub name: String,
    pub flags: Flags,
    pub positionals: Vec<String>,
}

impl ParsedCommand {
    /// Build from the command name and its argument tokens, recognising only
    /// the flags in `specs`. Anything else is positional.
    pub fn new(name: &str, args: &[String], specs: &[FlagSpec]) -> Self {
        let (flags, positionals) = extract(args, specs);
        ParsedCommand {
            name: name.to_owned(),
            flags,
            positionals,
        }
    }

    /// The flag's value, if the flag was given with one.
    pub fn flag(&self, name: &str) -> Option<&str> {
        self.flags.get(name).and_then(|v| v.as_deref())
    }

    /// Whether the flag appeared at all, with or without a value.
    pub fn has_flag(&self, name: &str) -> bool {
        self.flags.contains_key(name)
    }

    /// Positional tokens rejoined with single spaces, in input order.
    pub fn rest(&self) -> String {
        self.positionals.join(" ")
    }
}
