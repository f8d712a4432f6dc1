//! This module defines [DataFrameJoinVisitors].

use crate::{
    error::{Error, JoinSide, TypeMismatch},
    tabular::DataFrame,
};

use super::{
    hash_combine,
    join_visitor::{join_visitor, type_mismatch, JoinRow, JoinVisitor, JoinVisitorEnum},
    options::JoinOptions,
};

/// One [JoinVisitor] per pair of join keys of a left and a right [DataFrame].
#[derive(Debug)]
pub struct DataFrameJoinVisitors<'a> {
    left: &'a DataFrame,
    right: &'a DataFrame,
    visitor_names_left: Vec<String>,
    visitor_names_right: Vec<String>,
    visitors: Vec<JoinVisitorEnum<'a>>,
    warnings: Vec<TypeMismatch>,
}

impl<'a> DataFrameJoinVisitors<'a> {
    /// Build one join visitor for each pair `(names_left[i], names_right[i])`.
    ///
    /// Keys are resolved position by position, the left key before the right one.
    /// If `options.warn` is set, every pair of incompatible types is logged
    /// and recorded in [DataFrameJoinVisitors::warnings].
    ///
    /// # Errors
    /// Returns [Error::JoinKeyCountMismatch] if the name lists differ in length,
    /// and [Error::JoinKeyMissing] for the first key that cannot be resolved.
    pub fn new<S: AsRef<str>>(
        left: &'a DataFrame,
        right: &'a DataFrame,
        names_left: &[S],
        names_right: &[S],
        options: JoinOptions,
    ) -> Result<Self, Error> {
        if names_left.len() != names_right.len() {
            return Err(Error::JoinKeyCountMismatch {
                left: names_left.len(),
                right: names_right.len(),
            });
        }

        let indices_left = left.match_names(names_left);
        let indices_right = right.match_names(names_right);

        let mut visitors = Vec::with_capacity(names_left.len());
        let mut warnings = Vec::new();

        for (position, (name_left, name_right)) in names_left.iter().zip(names_right).enumerate() {
            let index_left = indices_left[position].ok_or_else(|| Error::JoinKeyMissing {
                name: name_left.as_ref().to_owned(),
                side: JoinSide::Left,
            })?;
            let index_right = indices_right[position].ok_or_else(|| Error::JoinKeyMissing {
                name: name_right.as_ref().to_owned(),
                side: JoinSide::Right,
            })?;

            let column_left = left.column(index_left);
            let column_right = right.column(index_right);

            if options.warn {
                if let Some(mismatch) = type_mismatch(column_left, column_right) {
                    log::warn!("{mismatch}");
                    warnings.push(mismatch);
                }
            }

            visitors.push(join_visitor(column_left, column_right, &options));
        }

        Ok(Self {
            left,
            right,
            visitor_names_left: names_left.iter().map(|name| name.as_ref().to_owned()).collect(),
            visitor_names_right: names_right
                .iter()
                .map(|name| name.as_ref().to_owned())
                .collect(),
            visitors,
            warnings,
        })
    }

    /// Return the visitor for the `k`-th pair of keys.
    ///
    /// # Panics
    /// Panics if `k` is out of bounds.
    pub fn get(&self, k: usize) -> &JoinVisitorEnum<'a> {
        &self.visitors[k]
    }

    /// Return the visitor of the first key pair whose left key is called `name`.
    ///
    /// Only the names of left keys are searched.
    ///
    /// # Errors
    /// Returns [Error::VisitorNotFound] if no left key is called `name`.
    pub fn get_by_name(&self, name: &str) -> Result<&JoinVisitorEnum<'a>, Error> {
        self.visitor_names_left
            .iter()
            .position(|candidate| candidate == name)
            .map(|k| self.get(k))
            .ok_or_else(|| Error::VisitorNotFound(name.to_owned()))
    }

    /// Return the number of key pairs.
    pub fn size(&self) -> usize {
        self.visitors.len()
    }

    /// Return the names of the left keys.
    pub fn names_left(&self) -> &[String] {
        &self.visitor_names_left
    }

    /// Return the names of the right keys.
    pub fn names_right(&self) -> &[String] {
        &self.visitor_names_right
    }

    /// Return the left table.
    pub fn left(&self) -> &'a DataFrame {
        self.left
    }

    /// Return the right table.
    pub fn right(&self) -> &'a DataFrame {
        self.right
    }

    /// Return the type mismatches found while building the visitors.
    pub fn warnings(&self) -> &[TypeMismatch] {
        &self.warnings
    }

    /// Return a hash of the given row over all keys.
    pub fn hash(&self, row: JoinRow) -> u64 {
        self.visitors
            .iter()
            .fold(0, |seed, visitor| hash_combine(seed, visitor.hash(row)))
    }

    /// Returns true iff the two rows match on every key.
    pub fn equal(&self, first: JoinRow, second: JoinRow) -> bool {
        self.visitors
            .iter()
            .all(|visitor| visitor.equal(first, second))
    }
}
