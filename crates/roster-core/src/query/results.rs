//! Query result containers.

use serde::Serialize;

use super::expr::Projection;
use super::value::Value;

/// One page of results plus the total row count without paging.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueryResults<T> {
    pub results: Vec<T>,
    pub total: u64,
    pub offset: u64,
    pub limit: Option<u64>,
}

impl<T> QueryResults<T> {
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> QueryResults<U> {
        QueryResults {
            results: self.results.into_iter().map(f).collect(),
            total: self.total,
            offset: self.offset,
            limit: self.limit,
        }
    }
}

/// A heterogeneous result row, looked up by the projection that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct Tuple {
    entries: Vec<(Projection, Value)>,
}

impl Tuple {
    pub const fn new(entries: Vec<(Projection, Value)>) -> Self {
        Self { entries }
    }

    /// Value of `projection`, or `None` if it was not selected.
    pub fn get(&self, projection: impl Into<Projection>) -> Option<&Value> {
        let wanted = projection.into();
        self.entries
            .iter()
            .find(|(p, _)| *p == wanted)
            .map(|(_, v)| v)
    }

    pub fn get_at(&self, index: usize) -> Option<&Value> {
        self.entries.get(index).map(|(_, v)| v)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn values(&self) -> impl Iterator<Item = &Value> {
        self.entries.iter().map(|(_, v)| v)
    }
}
