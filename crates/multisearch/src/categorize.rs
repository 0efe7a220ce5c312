//! Grouping records into named categories before filtering.

use std::collections::HashMap;

use serde::Serialize;

/// A named bucket of records, stored as indices into the source collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Category {
    /// Category key.
    pub key: String,
    /// Indices into the source collection, in display order.
    pub members: Vec<usize>,
}

impl Category {
    pub fn new(key: impl Into<String>, members: Vec<usize>) -> Self {
        Category {
            key: key.into(),
            members,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

/// Partitions a source collection into categories.
///
/// Implemented for any `Fn(&[T]) -> Vec<Category>`, so a closure is usually
/// enough:
///
/// ```
/// use multisearch::{Categorizer, Category};
///
/// let parity = |numbers: &[i64]| {
///     let (even, odd): (Vec<usize>, Vec<usize>) =
///         (0..numbers.len()).partition(|&i| numbers[i] % 2 == 0);
///     vec![Category::new("even", even), Category::new("odd", odd)]
/// };
///
/// let categories = parity.categorize(&[1, 2, 3]);
/// assert_eq!(categories[0].members, vec![1]);
/// ```
pub trait Categorizer<T> {
    fn categorize(&self, records: &[T]) -> Vec<Category>;
}

impl<T, F> Categorizer<T> for F
where
    F: Fn(&[T]) -> Vec<Category>,
{
    fn categorize(&self, records: &[T]) -> Vec<Category> {
        self(records)
    }
}

/// Builds a categorizer that groups records by a key function.
///
/// Categories appear in order of first occurrence.
pub fn group_by<T, F>(key: F) -> impl Fn(&[T]) -> Vec<Category>
where
    F: Fn(&T) -> String,
{
    move |records: &[T]| {
        let mut positions: HashMap<String, usize> = HashMap::new();
        let mut categories: Vec<Category> = Vec::new();
        for (index, record) in records.iter().enumerate() {
            let name = key(record);
            match positions.get(&name) {
                Some(&position) => categories[position].members.push(index),
                None => {
                    positions.insert(name.clone(), categories.len());
                    categories.push(Category::new(name, vec![index]));
                }
            }
        }
        categories
    }
}
