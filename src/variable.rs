//! Definition of the variable module
//!
//! A `Variable` represents a named discrete random variable. Its `Domain` is the ordered set of
//! values it may take; the order of the `Domain` is the order in which the variable is
//! enumerated everywhere it appears.

use crate::util::{Result, TallyError};

use indexmap::{IndexMap, IndexSet};
use itertools::Itertools;

use std::fmt;
use std::iter::FromIterator;
use std::ops::Index;


/// A single value a `Variable` may take.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Value {
    Bool(bool),
    Int(i64),
    Str(String)
}

impl Value {

    /// Get the value as a `bool`, if it is one
    pub fn as_bool(&self) -> Option<bool> {
        match *self {
            Value::Bool(b) => Some(b),
            _ => None
        }
    }

    /// Get the value as an integer, if it is one
    pub fn as_int(&self) -> Option<i64> {
        match *self {
            Value::Int(i) => Some(i),
            _ => None
        }
    }

    /// Get the value as a string slice, if it is one
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s.as_str()),
            _ => None
        }
    }

}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Value::Bool(b) => write!(f, "{}", b),
            Value::Int(i) => write!(f, "{}", i),
            Value::Str(s) => write!(f, "{}", s)
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Int(i64::from(i))
    }
}

impl<'a> From<&'a str> for Value {
    fn from(s: &'a str) -> Self {
        Value::Str(String::from(s))
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl PartialEq<bool> for Value {
    fn eq(&self, other: &bool) -> bool {
        self.as_bool() == Some(*other)
    }
}

impl PartialEq<i64> for Value {
    fn eq(&self, other: &i64) -> bool {
        self.as_int() == Some(*other)
    }
}

impl<'a> PartialEq<&'a str> for Value {
    fn eq(&self, other: &&'a str) -> bool {
        self.as_str() == Some(*other)
    }
}


/// The ordered, duplicate-free set of values a `Variable` can take.
///
/// Two `Domain`s are equal only if they hold the same values in the same order.
#[derive(Clone, Debug)]
pub struct Domain {
    values: IndexSet<Value>
}

impl Domain {

    /// Construct a new `Domain` from an ordered sequence of values.
    ///
    /// # Errors
    /// * `TallyError::InvalidDomain` if the sequence is empty or holds a value twice
    pub fn new<I, V>(values: I) -> Result<Self>
        where I: IntoIterator<Item = V>,
              V: Into<Value>
    {
        let mut set = IndexSet::new();
        for v in values {
            let v = v.into();
            if set.contains(&v) {
                return Err(TallyError::InvalidDomain(format!("duplicate value {}", v)));
            }
            set.insert(v);
        }

        if set.is_empty() {
            return Err(TallyError::InvalidDomain(String::from("a domain needs at least one value")));
        }

        Ok(Domain { values: set })
    }

    /// The binary domain `[true, false]`
    pub fn boolean() -> Self {
        Domain { values: vec![Value::Bool(true), Value::Bool(false)].into_iter().collect() }
    }

    /// The integer domain `[0, count)`
    pub fn range(count: usize) -> Result<Self> {
        Domain::new((0..count).map(|i| Value::Int(i as i64)))
    }

    /// Number of values in the `Domain`
    pub fn size(&self) -> usize {
        self.values.len()
    }

    /// The values of the `Domain`, in declared order
    pub fn values(&self) -> indexmap::set::Iter<Value> {
        self.values.iter()
    }

    pub fn contains(&self, value: &Value) -> bool {
        self.values.contains(value)
    }

    /// Position of `value` in the declared order
    pub fn index_of(&self, value: &Value) -> Option<usize> {
        self.values.get_index_of(value)
    }

    /// The value at position `idx` of the declared order
    pub fn value(&self, idx: usize) -> Option<&Value> {
        self.values.get_index(idx)
    }

}

impl PartialEq for Domain {
    fn eq(&self, other: &Self) -> bool {
        self.values.iter().eq(other.values.iter())
    }
}

impl Eq for Domain {}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "[{}]", self.values.iter().join(", "))
    }
}


/// A named discrete random variable
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Variable {
    /// The name of the `Variable`
    name: String,

    /// The values the `Variable` may take
    domain: Domain
}

impl Variable {

    /// Construct a new `Variable` over the given `Domain`
    pub fn new(name: &str, domain: Domain) -> Self {
        Variable { name: String::from(name), domain }
    }

    /// Construct a new `Variable` with the domain `[true, false]`
    pub fn binary(name: &str) -> Self {
        Variable::new(name, Domain::boolean())
    }

    /// Construct a new `Variable` with integer values `0..count`
    pub fn discrete(name: &str, count: usize) -> Result<Self> {
        Ok(Variable::new(name, Domain::range(count)?))
    }

    /// Construct a new `Variable` with an enumerated set of named values
    pub fn enumerated(name: &str, values: &[&str]) -> Result<Self> {
        Ok(Variable::new(name, Domain::new(values.iter().cloned())?))
    }

    /// Get the name of the `Variable`
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the `Domain` of the `Variable`
    pub fn domain(&self) -> &Domain {
        &self.domain
    }

    /// Get the number of values the `Variable` may take
    pub fn cardinality(&self) -> usize {
        self.domain.size()
    }

}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} {}", self.name, self.domain)
    }
}


/// A mapping from variable names to values.
///
/// Insertion order is kept for display, but two `Assignment`s are equal whenever they map the
/// same names to the same values.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Assignment {
    values: IndexMap<String, Value>
}

impl Assignment {

    /// Construct an empty `Assignment`
    pub fn new() -> Self {
        Assignment { values: IndexMap::new() }
    }

    /// Assign `value` to the variable `name`, replacing any previous value
    pub fn set<N, V>(&mut self, name: N, value: V) -> &mut Self
        where N: Into<String>,
              V: Into<Value>
    {
        self.values.insert(name.into(), value.into());
        self
    }

    /// Consuming version of `set`, for chaining
    pub fn with<N, V>(mut self, name: N, value: V) -> Self
        where N: Into<String>,
              V: Into<Value>
    {
        self.set(name, value);
        self
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// The assigned names, in insertion order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(|k| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Restrict the `Assignment` to the given names. Names that are not assigned are skipped.
    pub fn restrict<'a, I>(&self, names: I) -> Assignment
        where I: IntoIterator<Item = &'a str>
    {
        names.into_iter()
             .filter_map(|n| self.values.get(n).map(|v| (String::from(n), v.clone())))
             .collect()
    }

    /// `true` if both `Assignment`s give the same value to every name they share
    pub fn agrees(&self, other: &Assignment) -> bool {
        self.values.iter().all(|(k, v)| other.get(k).map_or(true, |o| o == v))
    }

}

impl<'a> Index<&'a str> for Assignment {
    type Output = Value;

    fn index(&self, name: &'a str) -> &Value {
        match self.values.get(name) {
            Some(v) => v,
            None => panic!("no value assigned to `{}`", name)
        }
    }
}

impl<N, V> FromIterator<(N, V)> for Assignment
    where N: Into<String>,
          V: Into<Value>
{
    fn from_iter<I: IntoIterator<Item = (N, V)>>(iter: I) -> Self {
        Assignment {
            values: iter.into_iter().map(|(n, v)| (n.into(), v.into())).collect()
        }
    }
}

impl fmt::Display for Assignment {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.values.iter().map(|(k, v)| format!("{}={}", k, v)).join(", "))
    }
}


/// Build an `Assignment` inline.
///
/// ```
/// # #[macro_use] extern crate tally;
/// # fn main() {
/// let evidence = assignment!{ "S" => true, "G" => "high" };
/// assert_eq!(evidence.len(), 2);
/// assert!(evidence["S"] == true);
/// # }
/// ```
#[macro_export]
macro_rules! assignment {
    () => { $crate::Assignment::new() };
    ($($name:expr => $value:expr),+ $(,)?) => {{
        let mut assignment = $crate::Assignment::new();
        $( assignment.set($name, $value); )+
        assignment
    }};
}
