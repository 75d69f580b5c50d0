//! Signature model: the identity of a defined callable.
//!
//! A [`Signature`] is keyed by `(name, min_args, max_args)` only. The
//! [`Category`] of the definition that produced it travels alongside in a
//! [`Definition`] and never takes part in equality, hashing, or ordering, so
//! two definitions with the same name and arity collapse into one graph node
//! no matter which file, class, or decorator they came from.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Upper bound on the number of arguments a definition accepts.
///
/// `Unbounded` orders above every `Bounded` value. Serialized as a number or
/// `null`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "Option<usize>", into = "Option<usize>")]
pub enum MaxArgs {
    Bounded(usize),
    Unbounded,
}

impl From<Option<usize>> for MaxArgs {
    fn from(v: Option<usize>) -> Self {
        v.map_or(MaxArgs::Unbounded, MaxArgs::Bounded)
    }
}

impl From<MaxArgs> for Option<usize> {
    fn from(v: MaxArgs) -> Self {
        match v {
            MaxArgs::Bounded(n) => Some(n),
            MaxArgs::Unbounded => None,
        }
    }
}

impl MaxArgs {
    /// `true` if `n` does not exceed this bound.
    #[inline]
    pub fn admits(self, n: usize) -> bool {
        match self {
            MaxArgs::Bounded(max) => n <= max,
            MaxArgs::Unbounded => true,
        }
    }
}

impl Display for MaxArgs {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            MaxArgs::Bounded(n) => write!(f, "{n}"),
            MaxArgs::Unbounded => f.write_str("inf"),
        }
    }
}

/// Display category of a definition. Informational only.
///
/// Variants are declared in ascending display precedence, so `Ord` picks the
/// category shown for a node that several definitions contributed to.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Plain,
    StaticMethod,
    ClassMethod,
    Property,
    ClassConstructor,
}

impl Category {
    /// Graphviz fill colour used by downstream renderers.
    pub fn fill_color(self) -> &'static str {
        match self {
            Category::Plain => "lightgray",
            Category::ClassConstructor => "yellow",
            Category::Property => "orchid",
            Category::ClassMethod => "bisque",
            Category::StaticMethod => "lightskyblue",
        }
    }

    /// Map a bare decorator name to a category marker, if it is one.
    pub fn from_decorator(name: &str) -> Option<Self> {
        match name {
            "property" => Some(Category::Property),
            "classmethod" => Some(Category::ClassMethod),
            "staticmethod" => Some(Category::StaticMethod),
            _ => None,
        }
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Category::Plain => "plain",
            Category::ClassConstructor => "class_constructor",
            Category::Property => "property",
            Category::ClassMethod => "class_method",
            Category::StaticMethod => "static_method",
        })
    }
}

/// Name plus inclusive accepted-argument-count range.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Signature {
    pub name: String,
    pub min_args: usize,
    pub max_args: MaxArgs,
}

impl Signature {
    pub fn new(name: impl Into<String>, min_args: usize, max_args: MaxArgs) -> Self {
        Self {
            name: name.into(),
            min_args,
            max_args,
        }
    }

    /// `true` if a call supplying exactly `n` arguments fits this range.
    #[inline]
    pub fn accepts(&self, n: usize) -> bool {
        n >= self.min_args && self.max_args.admits(n)
    }

    /// `true` if a call supplying at least `n` arguments could fit this range.
    #[inline]
    pub fn accepts_at_least(&self, n: usize) -> bool {
        self.max_args.admits(n)
    }

    /// `min_args == max_args == 0`: candidates for implicit property access.
    #[inline]
    pub fn is_nullary(&self) -> bool {
        self.min_args == 0 && self.max_args == MaxArgs::Bounded(0)
    }

    /// Stable textual key `name_min_max`, used for node ids and file stems.
    pub fn key(&self) -> String {
        format!("{}_{}_{}", self.name, self.min_args, self.max_args)
    }
}

impl Display for Signature {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.key())
    }
}

/// A signature as produced by one concrete definition, with its category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Definition {
    #[serde(flatten)]
    pub signature: Signature,
    pub category: Category,
}

impl Definition {
    pub fn new(signature: Signature, category: Category) -> Self {
        Self {
            signature,
            category,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn identity_ignores_category() {
        let a = Definition::new(Signature::new("f", 1, MaxArgs::Bounded(2)), Category::Plain);
        let b = Definition::new(
            Signature::new("f", 1, MaxArgs::Bounded(2)),
            Category::StaticMethod,
        );
        let set: HashSet<Signature> = [a.signature, b.signature].into_iter().collect();
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn unbounded_accepts_any_count_above_min() {
        let s = Signature::new("g", 1, MaxArgs::Unbounded);
        assert!(!s.accepts(0));
        assert!(s.accepts(1));
        assert!(s.accepts(40));
        assert!(MaxArgs::Unbounded > MaxArgs::Bounded(usize::MAX));
    }

    #[test]
    fn max_args_serializes_as_number_or_null() {
        let s = Signature::new("g", 0, MaxArgs::Unbounded);
        let v = serde_json::to_value(&s).unwrap();
        assert_eq!(v["max_args"], serde_json::Value::Null);
        let back: Signature = serde_json::from_str(r#"{"name":"f","min_args":1,"max_args":2}"#).unwrap();
        assert_eq!(back.max_args, MaxArgs::Bounded(2));
    }

    #[test]
    fn key_renders_unbounded_as_inf() {
        assert_eq!(Signature::new("g", 0, MaxArgs::Unbounded).key(), "g_0_inf");
        assert_eq!(Signature::new("C", 1, MaxArgs::Bounded(1)).key(), "C_1_1");
    }

    #[test]
    fn constructor_has_highest_display_precedence() {
        let mut cats = vec![
            Category::Property,
            Category::ClassConstructor,
            Category::Plain,
            Category::ClassMethod,
        ];
        cats.sort();
        assert_eq!(cats.last(), Some(&Category::ClassConstructor));
        assert_eq!(cats.first(), Some(&Category::Plain));
    }
}
