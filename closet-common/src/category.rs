//! Clothing categories and the fixed four-bucket grouping
//!
//! Every closet listing, outfit and outfit-creation request is partitioned
//! into exactly these four buckets. Bucket names outside the enum are
//! rejected at deserialization time instead of silently creating new keys.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::Error;

/// Clothing category
///
/// Immutable once an item is created; decides which bucket of an outfit the
/// item occupies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Tops,
    Bottoms,
    Accessories,
    Shoes,
}

impl Category {
    /// All categories in presentation order
    pub const ALL: [Category; 4] = [
        Category::Tops,
        Category::Bottoms,
        Category::Accessories,
        Category::Shoes,
    ];

    /// Database / wire representation
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Tops => "tops",
            Category::Bottoms => "bottoms",
            Category::Accessories => "accessories",
            Category::Shoes => "shoes",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "tops" => Ok(Category::Tops),
            "bottoms" => Ok(Category::Bottoms),
            "accessories" => Ok(Category::Accessories),
            "shoes" => Ok(Category::Shoes),
            other => Err(Error::Validation(format!("Invalid category: {}", other))),
        }
    }
}

/// One list per category
///
/// Serializes as `{"tops": [...], "bottoms": [...], "accessories": [...],
/// "shoes": [...]}`. Missing buckets deserialize as empty lists; unknown
/// bucket names are an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ByCategory<T> {
    #[serde(default = "Vec::new")]
    pub tops: Vec<T>,
    #[serde(default = "Vec::new")]
    pub bottoms: Vec<T>,
    #[serde(default = "Vec::new")]
    pub accessories: Vec<T>,
    #[serde(default = "Vec::new")]
    pub shoes: Vec<T>,
}

impl<T> Default for ByCategory<T> {
    fn default() -> Self {
        Self {
            tops: Vec::new(),
            bottoms: Vec::new(),
            accessories: Vec::new(),
            shoes: Vec::new(),
        }
    }
}

impl<T> ByCategory<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, category: Category) -> &[T] {
        match category {
            Category::Tops => &self.tops,
            Category::Bottoms => &self.bottoms,
            Category::Accessories => &self.accessories,
            Category::Shoes => &self.shoes,
        }
    }

    pub fn get_mut(&mut self, category: Category) -> &mut Vec<T> {
        match category {
            Category::Tops => &mut self.tops,
            Category::Bottoms => &mut self.bottoms,
            Category::Accessories => &mut self.accessories,
            Category::Shoes => &mut self.shoes,
        }
    }

    pub fn push(&mut self, category: Category, value: T) {
        self.get_mut(category).push(value);
    }

    /// Iterate every entry with its bucket, in presentation order
    pub fn iter(&self) -> impl Iterator<Item = (Category, &T)> + '_ {
        Category::ALL
            .into_iter()
            .flat_map(move |category| self.get(category).iter().map(move |v| (category, v)))
    }

    /// Total number of entries across all buckets
    pub fn len(&self) -> usize {
        self.tops.len() + self.bottoms.len() + self.accessories.len() + self.shoes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Apply `f` to every entry, keeping the bucket layout
    pub fn map<U, F>(self, mut f: F) -> ByCategory<U>
    where
        F: FnMut(T) -> U,
    {
        ByCategory {
            tops: self.tops.into_iter().map(&mut f).collect(),
            bottoms: self.bottoms.into_iter().map(&mut f).collect(),
            accessories: self.accessories.into_iter().map(&mut f).collect(),
            shoes: self.shoes.into_iter().map(&mut f).collect(),
        }
    }
}

impl<T> FromIterator<(Category, T)> for ByCategory<T> {
    fn from_iter<I: IntoIterator<Item = (Category, T)>>(iter: I) -> Self {
        let mut grouped = ByCategory::new();
        for (category, value) in iter {
            grouped.push(category, value);
        }
        grouped
    }
}
