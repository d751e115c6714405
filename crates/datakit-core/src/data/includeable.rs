//! Partial selector state carried by data objects and collections
//!
//! Copyright (c) 2025 Datakit Team
//! Licensed under the Apache-2.0 license

use crate::partials::PartialTrees;
use crate::Result;

/// Collected include/exclude/only/except paths, or a pre-resolved tree
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Partials {
    includes: Vec<String>,
    excludes: Vec<String>,
    only: Vec<String>,
    except: Vec<String>,
    trees: Option<PartialTrees>,
}

fn add_unique<I, S>(target: &mut Vec<String>, paths: I)
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    for path in paths {
        let path = path.into();
        if !target.contains(&path) {
            target.push(path);
        }
    }
}

impl Partials {
    pub fn includes(&self) -> &[String] {
        &self.includes
    }

    pub fn excludes(&self) -> &[String] {
        &self.excludes
    }

    pub fn only(&self) -> &[String] {
        &self.only
    }

    pub fn except(&self) -> &[String] {
        &self.except
    }

    /// Tree attached by a parent transformation, if any
    pub fn trees(&self) -> Option<&PartialTrees> {
        self.trees.as_ref()
    }

    pub fn add_includes<I: IntoIterator<Item = S>, S: Into<String>>(&mut self, paths: I) {
        add_unique(&mut self.includes, paths);
    }

    pub fn add_excludes<I: IntoIterator<Item = S>, S: Into<String>>(&mut self, paths: I) {
        add_unique(&mut self.excludes, paths);
    }

    pub fn add_only<I: IntoIterator<Item = S>, S: Into<String>>(&mut self, paths: I) {
        add_unique(&mut self.only, paths);
    }

    pub fn add_except<I: IntoIterator<Item = S>, S: Into<String>>(&mut self, paths: I) {
        add_unique(&mut self.except, paths);
    }

    pub fn set_trees(&mut self, trees: PartialTrees) {
        self.trees = Some(trees);
    }

    /// The attached tree, else the parsed path lists
    pub fn resolve(&self) -> Result<PartialTrees> {
        if let Some(trees) = &self.trees {
            return Ok(trees.clone());
        }

        Ok(PartialTrees::from_paths(
            self.includes.as_slice(),
            self.excludes.as_slice(),
            self.only.as_slice(),
            self.except.as_slice(),
        )?)
    }
}

/// Fluent partial selection, shared by data objects and collections
///
/// All builders consume and return `self`; paths accumulate as a set.
pub trait IncludeableData: Sized {
    fn partials(&self) -> &Partials;

    fn partials_mut(&mut self) -> &mut Partials;

    /// Include lazy properties
    fn include<I: IntoIterator<Item = S>, S: Into<String>>(mut self, paths: I) -> Self {
        self.partials_mut().add_includes(paths);
        self
    }

    /// Exclude lazy properties
    fn exclude<I: IntoIterator<Item = S>, S: Into<String>>(mut self, paths: I) -> Self {
        self.partials_mut().add_excludes(paths);
        self
    }

    /// Restrict the output to these properties
    fn only<I: IntoIterator<Item = S>, S: Into<String>>(mut self, paths: I) -> Self {
        self.partials_mut().add_only(paths);
        self
    }

    /// Remove these properties from the output
    fn except<I: IntoIterator<Item = S>, S: Into<String>>(mut self, paths: I) -> Self {
        self.partials_mut().add_except(paths);
        self
    }

    fn only_when(self, path: impl Into<String>, condition: bool) -> Self {
        if condition {
            self.only([path.into()])
        } else {
            self
        }
    }

    fn except_when(self, path: impl Into<String>, condition: bool) -> Self {
        if condition {
            self.except([path.into()])
        } else {
            self
        }
    }

    /// `only` when `condition` holds for this value
    fn only_when_with<F>(self, path: impl Into<String>, condition: F) -> Self
    where
        F: FnOnce(&Self) -> bool,
    {
        let holds = condition(&self);
        self.only_when(path, holds)
    }

    /// `except` when `condition` holds for this value
    fn except_when_with<F>(self, path: impl Into<String>, condition: F) -> Self
    where
        F: FnOnce(&Self) -> bool,
    {
        let holds = condition(&self);
        self.except_when(path, holds)
    }

    /// Attach an already resolved tree, bypassing the path lists
    fn with_partial_trees(mut self, trees: PartialTrees) -> Self {
        self.partials_mut().set_trees(trees);
        self
    }

    /// Selector state for the next transformation
    fn partial_trees(&self) -> Result<PartialTrees> {
        self.partials().resolve()
    }
}
