//! The canonical action model: what every wire encoding is normalized into.

use std::collections::BTreeMap;
use std::collections::btree_map;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::action::Action;

/// Property name → ordered values.
///
/// Value order is meaningful (e.g. several categories) and is preserved from
/// the wire. Values are JSON so that structured values such as
/// `{"html": "…"}` content or `{"value": "…", "alt": "…"}` photos survive.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Properties(BTreeMap<String, Vec<Value>>);

impl Properties {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one value to `name`, creating the property if needed.
    pub fn push(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.0.entry(name.into()).or_default().push(value.into());
    }

    /// Append several values to `name`, creating the property if needed.
    pub fn extend(&mut self, name: impl Into<String>, values: impl IntoIterator<Item = Value>) {
        self.0.entry(name.into()).or_default().extend(values);
    }

    /// Set `name` to exactly `values`, returning the previous values.
    pub fn insert(&mut self, name: impl Into<String>, values: Vec<Value>) -> Option<Vec<Value>> {
        self.0.insert(name.into(), values)
    }

    pub fn remove(&mut self, name: &str) -> Option<Vec<Value>> {
        self.0.remove(name)
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&[Value]> {
        self.0.get(name).map(Vec::as_slice)
    }

    /// First value of `name` when it is a string.
    #[must_use]
    pub fn first_str(&self, name: &str) -> Option<&str> {
        self.get(name)?.first()?.as_str()
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> btree_map::Iter<'_, String, Vec<Value>> {
        self.0.iter()
    }

    /// Keep only the properties whose name satisfies `keep`.
    pub fn retain(&mut self, mut keep: impl FnMut(&str) -> bool) {
        self.0.retain(|name, _| keep(name));
    }

    /// Apply update commands in `replace`, `add`, `delete` order.
    ///
    /// - `replace` sets a property to the given values; no values removes it.
    /// - `add` appends values, creating the property.
    /// - `delete` with no values removes the property; with values it removes
    ///   each matching value and drops the property once it is empty.
    pub fn apply(&mut self, commands: &Commands) {
        for (command, props) in commands.iter() {
            for (name, values) in props.iter() {
                match command {
                    UpdateCommand::Replace if values.is_empty() => {
                        self.0.remove(name);
                    }
                    UpdateCommand::Replace => {
                        self.0.insert(name.clone(), values.clone());
                    }
                    UpdateCommand::Add => {
                        if !values.is_empty() {
                            self.extend(name.clone(), values.iter().cloned());
                        }
                    }
                    UpdateCommand::Delete if values.is_empty() => {
                        self.0.remove(name);
                    }
                    UpdateCommand::Delete => {
                        if let Some(existing) = self.0.get_mut(name) {
                            existing.retain(|value| !values.contains(value));
                            if existing.is_empty() {
                                self.0.remove(name);
                            }
                        }
                    }
                }
            }
        }
    }
}

impl FromIterator<(String, Vec<Value>)> for Properties {
    fn from_iter<I: IntoIterator<Item = (String, Vec<Value>)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for Properties {
    type Item = (String, Vec<Value>);
    type IntoIter = btree_map::IntoIter<String, Vec<Value>>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Properties {
    type Item = (&'a String, &'a Vec<Value>);
    type IntoIter = btree_map::Iter<'a, String, Vec<Value>>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// An update operation applied to an existing item.
///
/// Declaration order is application order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UpdateCommand {
    Replace,
    Add,
    Delete,
}

impl UpdateCommand {
    /// Recognize a command key as it appears on the wire.
    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "replace" => Some(Self::Replace),
            "add" => Some(Self::Add),
            "delete" => Some(Self::Delete),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Replace => "replace",
            Self::Add => "add",
            Self::Delete => "delete",
        }
    }
}

/// Update command → affected properties. Absent commands are no-ops.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Commands(BTreeMap<UpdateCommand, Properties>);

impl Commands {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn get(&self, command: UpdateCommand) -> Option<&Properties> {
        self.0.get(&command)
    }

    /// Properties for `command`, registering the command if absent.
    pub fn entry(&mut self, command: UpdateCommand) -> &mut Properties {
        self.0.entry(command).or_default()
    }

    /// `true` when no command at all was given.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> btree_map::Iter<'_, UpdateCommand, Properties> {
        self.0.iter()
    }
}

impl FromIterator<(UpdateCommand, Properties)> for Commands {
    fn from_iter<I: IntoIterator<Item = (UpdateCommand, Properties)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// A resolved Micropub request. Each variant carries only what its action
/// needs, so a create can never hold update commands and a delete can never
/// hold properties.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    /// Create a new item of microformat type `kind` (e.g. `h-entry`).
    Create { kind: String, properties: Properties },
    /// Modify the item at `url`.
    Update { url: String, commands: Commands },
    /// Delete the item at `url`.
    Delete { url: String },
    /// Restore the deleted item at `url`.
    Undelete { url: String },
}

impl Request {
    #[must_use]
    pub fn action(&self) -> Action {
        match self {
            Self::Create { .. } => Action::Create,
            Self::Update { .. } => Action::Update,
            Self::Delete { .. } => Action::Delete,
            Self::Undelete { .. } => Action::Undelete,
        }
    }

    /// Target item, for every action except create.
    #[must_use]
    pub fn url(&self) -> Option<&str> {
        match self {
            Self::Create { .. } => None,
            Self::Update { url, .. } | Self::Delete { url } | Self::Undelete { url } => Some(url),
        }
    }

    /// Microformat type, for create only.
    #[must_use]
    pub fn kind(&self) -> Option<&str> {
        match self {
            Self::Create { kind, .. } => Some(kind),
            _ => None,
        }
    }
}
