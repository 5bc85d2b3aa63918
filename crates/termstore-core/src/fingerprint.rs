//! Fingerprint — the labels, descriptions and aliases of one entity.
//!
//! A fingerprint is a plain value: it is decomposed into individual terms on
//! write and reassembled from flat rows on read.

use std::collections::BTreeMap;

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

use crate::term::{Term, TermKind};

/// All terms attached to a single entity.
///
/// Languages map to at most one label and one description. Aliases form a
/// set per language; insertion order is kept and duplicates collapse. Empty
/// alias groups are never stored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fingerprint {
  #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
  labels:       BTreeMap<String, String>,
  #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
  descriptions: BTreeMap<String, String>,
  #[serde(
    default,
    skip_serializing_if = "BTreeMap::is_empty",
    deserialize_with = "deserialize_alias_groups"
  )]
  aliases:      BTreeMap<String, IndexSet<String>>,
}

fn deserialize_alias_groups<'de, D>(
  deserializer: D,
) -> Result<BTreeMap<String, IndexSet<String>>, D::Error>
where
  D: serde::Deserializer<'de>,
{
  let mut groups = BTreeMap::<String, IndexSet<String>>::deserialize(deserializer)?;
  groups.retain(|_, group| !group.is_empty());
  Ok(groups)
}

impl Fingerprint {
  pub fn new() -> Self { Self::default() }

  // ── Labels ────────────────────────────────────────────────────────────

  pub fn labels(&self) -> &BTreeMap<String, String> { &self.labels }

  pub fn label(&self, language: &str) -> Option<&str> {
    self.labels.get(language).map(String::as_str)
  }

  /// Set the label for `language`, replacing any previous one.
  pub fn set_label(&mut self, language: impl Into<String>, text: impl Into<String>) {
    self.labels.insert(language.into(), text.into());
  }

  pub fn remove_label(&mut self, language: &str) -> Option<String> {
    self.labels.remove(language)
  }

  // ── Descriptions ──────────────────────────────────────────────────────

  pub fn descriptions(&self) -> &BTreeMap<String, String> { &self.descriptions }

  pub fn description(&self, language: &str) -> Option<&str> {
    self.descriptions.get(language).map(String::as_str)
  }

  pub fn set_description(
    &mut self,
    language: impl Into<String>,
    text: impl Into<String>,
  ) {
    self.descriptions.insert(language.into(), text.into());
  }

  pub fn remove_description(&mut self, language: &str) -> Option<String> {
    self.descriptions.remove(language)
  }

  // ── Aliases ───────────────────────────────────────────────────────────

  pub fn alias_groups(&self) -> &BTreeMap<String, IndexSet<String>> { &self.aliases }

  pub fn aliases(&self, language: &str) -> Option<&IndexSet<String>> {
    self.aliases.get(language)
  }

  /// Replace the alias group for `language`. An empty group removes it.
  pub fn set_alias_group<I, S>(&mut self, language: impl Into<String>, aliases: I)
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
  {
    let language = language.into();
    let group: IndexSet<String> = aliases.into_iter().map(Into::into).collect();
    if group.is_empty() {
      self.aliases.remove(&language);
    } else {
      self.aliases.insert(language, group);
    }
  }

  /// Append one alias to the group for `language`. Returns `false` if it was
  /// already present.
  pub fn add_alias(&mut self, language: impl Into<String>, alias: impl Into<String>) -> bool {
    self.aliases.entry(language.into()).or_default().insert(alias.into())
  }

  pub fn remove_alias_group(&mut self, language: &str) -> Option<IndexSet<String>> {
    self.aliases.remove(language)
  }

  // ── Whole-fingerprint views ───────────────────────────────────────────

  pub fn is_empty(&self) -> bool {
    self.labels.is_empty() && self.descriptions.is_empty() && self.aliases.is_empty()
  }

  /// Number of individual terms, counting each alias separately.
  pub fn len(&self) -> usize {
    self.labels.len()
      + self.descriptions.len()
      + self.aliases.values().map(IndexSet::len).sum::<usize>()
  }

  /// Every term with its kind: labels, then descriptions, then aliases.
  pub fn terms(&self) -> impl Iterator<Item = (TermKind, Term)> + '_ {
    let labels = self
      .labels
      .iter()
      .map(|(lang, text)| (TermKind::Label, Term::new(lang, text)));
    let descriptions = self
      .descriptions
      .iter()
      .map(|(lang, text)| (TermKind::Description, Term::new(lang, text)));
    let aliases = self.aliases.iter().flat_map(|(lang, group)| {
      group.iter().map(move |text| (TermKind::Alias, Term::new(lang, text)))
    });

    labels.chain(descriptions).chain(aliases)
  }
}
