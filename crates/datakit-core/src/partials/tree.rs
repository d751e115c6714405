//! Hierarchical selector state
//!
//! A [`PartialTree`] is one parsed selector set (e.g. every `include` path of
//! an object); [`PartialTrees`] bundles the four independent sets the
//! transformation engine consults at one nesting level.
//!
//! Copyright (c) 2025 Datakit Team
//! Licensed under the Apache-2.0 license

use super::parser::PartialsParser;
use super::PartialsResult;
use std::collections::BTreeMap;
use std::fmt;

/// One level of a parsed selector set
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PartialTree {
    /// `*`: every property at this level. With a subtree (`*.name`) the
    /// subtree applies to every child; without one children see no selector.
    Wildcard(Option<Box<PartialTree>>),
    /// Named children; an empty map is a leaf
    Fields(BTreeMap<String, PartialTree>),
}

impl Default for PartialTree {
    fn default() -> Self {
        Self::empty()
    }
}

impl PartialTree {
    /// A leaf: no children selected
    pub fn empty() -> Self {
        PartialTree::Fields(BTreeMap::new())
    }

    /// A bare wildcard
    pub fn all() -> Self {
        PartialTree::Wildcard(None)
    }

    /// A wildcard with an optional subtree applied to every child
    pub fn wildcard(nested: Option<PartialTree>) -> Self {
        match nested {
            Some(tree) if !tree.is_empty() => PartialTree::Wildcard(Some(Box::new(tree))),
            _ => PartialTree::Wildcard(None),
        }
    }

    /// A single named child
    pub fn field(name: impl Into<String>, nested: PartialTree) -> Self {
        PartialTree::Fields(BTreeMap::from([(name.into(), nested)]))
    }

    /// Parse flat paths into a tree; an empty list yields `None`
    pub fn parse<I, S>(paths: I) -> PartialsResult<Option<Self>>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        PartialsParser::parse(paths)
    }

    /// Whether this level is exactly `*`
    pub fn is_all(&self) -> bool {
        matches!(self, PartialTree::Wildcard(None))
    }

    pub fn is_wildcard(&self) -> bool {
        matches!(self, PartialTree::Wildcard(_))
    }

    /// Whether this is a leaf (selects no children)
    pub fn is_empty(&self) -> bool {
        matches!(self, PartialTree::Fields(fields) if fields.is_empty())
    }

    /// Subtree for `field`: its own entry, or the wildcard's subtree
    pub fn get(&self, field: &str) -> Option<&PartialTree> {
        match self {
            PartialTree::Wildcard(nested) => nested.as_deref(),
            PartialTree::Fields(fields) => fields.get(field),
        }
    }

    /// Whether `field` is a key at this level
    pub fn contains(&self, field: &str) -> bool {
        self.get(field).is_some()
    }

    /// Union of two trees. A wildcard overwrites named siblings.
    pub fn merge(self, other: PartialTree) -> PartialTree {
        match (self, other) {
            (PartialTree::Wildcard(a), PartialTree::Wildcard(b)) => {
                let nested = match (a, b) {
                    (Some(a), Some(b)) => Some(a.merge(*b)),
                    (Some(tree), None) | (None, Some(tree)) => Some(*tree),
                    (None, None) => None,
                };
                PartialTree::wildcard(nested)
            }
            (wildcard @ PartialTree::Wildcard(_), PartialTree::Fields(_))
            | (PartialTree::Fields(_), wildcard @ PartialTree::Wildcard(_)) => wildcard,
            (PartialTree::Fields(mut fields), PartialTree::Fields(other)) => {
                for (name, nested) in other {
                    let merged = match fields.remove(&name) {
                        Some(existing) => existing.merge(nested),
                        None => nested,
                    };
                    fields.insert(name, merged);
                }
                PartialTree::Fields(fields)
            }
        }
    }

    /// Flatten back into dotted paths
    pub fn paths(&self) -> Vec<String> {
        match self {
            PartialTree::Wildcard(None) => vec!["*".to_string()],
            PartialTree::Wildcard(Some(nested)) => nested
                .paths()
                .into_iter()
                .map(|path| format!("*.{path}"))
                .collect(),
            PartialTree::Fields(fields) => fields
                .iter()
                .flat_map(|(name, nested)| {
                    if nested.is_empty() {
                        vec![name.clone()]
                    } else {
                        nested
                            .paths()
                            .into_iter()
                            .map(|path| format!("{name}.{path}"))
                            .collect()
                    }
                })
                .collect(),
        }
    }
}

impl fmt::Display for PartialTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.paths().join(", "))
    }
}

/// The selector sets active at one nesting level
///
/// `None` means the set was never supplied, which is different from an
/// empty tree (supplied, selecting nothing).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PartialTrees {
    /// Lazy properties to include
    pub lazy_included: Option<PartialTree>,
    /// Lazy properties to exclude
    pub lazy_excluded: Option<PartialTree>,
    /// Restrict output to these properties
    pub only: Option<PartialTree>,
    /// Remove these properties from output
    pub except: Option<PartialTree>,
}

impl PartialTrees {
    pub fn new(
        lazy_included: Option<PartialTree>,
        lazy_excluded: Option<PartialTree>,
        only: Option<PartialTree>,
        except: Option<PartialTree>,
    ) -> Self {
        Self {
            lazy_included,
            lazy_excluded,
            only,
            except,
        }
    }

    /// Parse the four flat path lists
    pub fn from_paths<S: AsRef<str>>(
        includes: &[S],
        excludes: &[S],
        only: &[S],
        except: &[S],
    ) -> PartialsResult<Self> {
        Ok(Self {
            lazy_included: PartialsParser::parse(includes)?,
            lazy_excluded: PartialsParser::parse(excludes)?,
            only: PartialsParser::parse(only)?,
            except: PartialsParser::parse(except)?,
        })
    }

    /// Whether no selector set was supplied at all
    pub fn is_unset(&self) -> bool {
        self.lazy_included.is_none()
            && self.lazy_excluded.is_none()
            && self.only.is_none()
            && self.except.is_none()
    }

    /// The trees one level down, for the value of property `field`
    pub fn nested(&self, field: &str) -> PartialTrees {
        let narrow = |tree: &Option<PartialTree>| tree.as_ref().and_then(|t| t.get(field)).cloned();

        PartialTrees {
            lazy_included: narrow(&self.lazy_included),
            lazy_excluded: narrow(&self.lazy_excluded),
            only: narrow(&self.only),
            except: narrow(&self.except),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree(paths: &[&str]) -> PartialTree {
        PartialTree::parse(paths).unwrap().unwrap()
    }

    #[test]
    fn test_get_and_contains() {
        let songs = tree(&["songs.name", "title"]);
        assert!(songs.contains("songs"));
        assert!(songs.contains("title"));
        assert!(!songs.contains("artist"));
        assert!(songs.get("title").unwrap().is_empty());
        assert!(songs.get("songs").unwrap().contains("name"));
    }

    #[test]
    fn test_bare_wildcard_narrows_to_nothing() {
        let all = PartialTree::all();
        assert!(all.is_all());
        assert!(all.get("anything").is_none());
    }

    #[test]
    fn test_wildcard_subtree_applies_to_every_child() {
        let all_names = tree(&["*.name"]);
        assert!(!all_names.is_all());
        assert!(all_names.is_wildcard());
        assert_eq!(all_names.get("songs"), Some(&tree(&["name"])));
        assert_eq!(all_names.get("albums"), Some(&tree(&["name"])));
    }

    #[test]
    fn test_merge_wildcard_overwrites_fields() {
        let merged = tree(&["songs", "title"]).merge(PartialTree::all());
        assert_eq!(merged, PartialTree::all());
    }

    #[test]
    fn test_paths_round_trip_through_display() {
        let songs = tree(&["songs.{name,artist}", "title"]);
        assert_eq!(songs.paths(), vec!["songs.artist", "songs.name", "title"]);
        assert_eq!(songs.to_string(), "[songs.artist, songs.name, title]");
    }

    #[test]
    fn test_nested_trees() {
        let trees = PartialTrees::from_paths(&["songs.name"], &[], &["songs"], &["*"]).unwrap();
        let nested = trees.nested("songs");

        assert_eq!(nested.lazy_included, Some(tree(&["name"])));
        assert_eq!(nested.lazy_excluded, None);
        assert_eq!(nested.only, Some(PartialTree::empty()));
        assert_eq!(nested.except, None);
    }

    #[test]
    fn test_unset_trees() {
        let empty: [&str; 0] = [];
        let trees = PartialTrees::from_paths(&empty, &empty, &empty, &empty).unwrap();
        assert!(trees.is_unset());
        assert_eq!(trees, PartialTrees::default());
    }
}
