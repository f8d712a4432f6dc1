use std::sync::Arc;

use hashbrown::{HashMap, HashSet};

use super::{ColumnData, FactorColumn};

/// Interns strings so that equal values handed out by the same pool
/// share one allocation and can be recognized by pointer identity.
#[derive(Debug, Default, Clone)]
pub struct StringPool {
    strings: HashSet<Arc<str>>,
}

impl StringPool {
    /// Construct a new and empty pool.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the shared copy of `string`, adding it to the pool if necessary.
    pub fn intern(&mut self, string: &str) -> Arc<str> {
        if let Some(known) = self.strings.get(string) {
            return known.clone();
        }

        let fresh: Arc<str> = Arc::from(string);
        self.strings.insert(fresh.clone());
        fresh
    }

    /// Return the number of distinct strings in the pool.
    pub fn len(&self) -> usize {
        self.strings.len()
    }

    /// Returns true iff no string has been interned yet.
    pub fn is_empty(&self) -> bool {
        self.strings.is_empty()
    }

    /// Build a string column whose values are interned in this pool.
    pub fn column<I, S>(&mut self, values: I) -> ColumnData
    where
        I: IntoIterator<Item = Option<S>>,
        S: AsRef<str>,
    {
        ColumnData::String(
            values
                .into_iter()
                .map(|value| value.map(|value| self.intern(value.as_ref())))
                .collect(),
        )
    }

    /// Build a factor column over the given values.
    /// Levels are interned in this pool and appear in order of first occurrence.
    pub fn factor<I, S>(&mut self, values: I) -> FactorColumn
    where
        I: IntoIterator<Item = Option<S>>,
        S: AsRef<str>,
    {
        let mut levels = Vec::<Arc<str>>::new();
        let mut level_codes = HashMap::<Arc<str>, u32>::new();

        let codes = values
            .into_iter()
            .map(|value| {
                value.map(|value| {
                    let interned = self.intern(value.as_ref());
                    *level_codes.entry(interned.clone()).or_insert_with(|| {
                        levels.push(interned);
                        u32::try_from(levels.len() - 1).unwrap_or(u32::MAX)
                    })
                })
            })
            .collect();

        FactorColumn::from_parts(codes, levels.into())
    }
}

#[cfg(test)]
mod test {
    use std::sync::Arc;

    use crate::datatypes::ColumnData;

    use super::StringPool;

    #[test]
    fn intern() {
        let mut pool = StringPool::new();
        let first = pool.intern("value");
        let second = pool.intern(&String::from("value"));
        let other = pool.intern("other");

        assert!(Arc::ptr_eq(&first, &second));
        assert!(!Arc::ptr_eq(&first, &other));
        assert_eq!(pool.len(), 2);
    }

    #[test]
    fn column_shares_storage() {
        let mut pool = StringPool::new();
        let column = pool.column([Some("a"), None, Some("a")]);

        let ColumnData::String(values) = column else {
            panic!("pool builds string columns");
        };
        let (Some(first), Some(third)) = (&values[0], &values[2]) else {
            panic!("non-missing values stay present");
        };
        assert!(Arc::ptr_eq(first, third));
        assert!(values[1].is_none());
    }

    #[test]
    fn factor_levels_in_first_seen_order() {
        let mut pool = StringPool::new();
        let factor = pool.factor([Some("b"), Some("a"), None, Some("b")]);

        assert_eq!(factor.codes(), &[Some(0), Some(1), None, Some(0)]);
        assert_eq!(
            factor.levels().iter().map(|s| &**s).collect::<Vec<_>>(),
            vec!["b", "a"]
        );
    }
}
