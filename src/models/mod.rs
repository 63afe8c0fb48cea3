//! Shared data models for motormart

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::codec::Variables;

pub mod refs;
pub use refs::*;

/// String-encoded boolean used throughout the marketplace API
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum YesNo {
    Yes,
    #[default]
    No,
}

impl YesNo {
    pub fn is_yes(&self) -> bool {
        matches!(self, YesNo::Yes)
    }
}

impl From<bool> for YesNo {
    fn from(value: bool) -> Self {
        if value {
            YesNo::Yes
        } else {
            YesNo::No
        }
    }
}

/// Cursor pagination info
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PageInfo {
    pub start_cursor: Option<String>,
    pub end_cursor: Option<String>,
    pub has_next_page: bool,
    pub has_previous_page: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge<T> {
    #[serde(default)]
    pub cursor: String,
    pub node: T,
}

/// Cursor-paginated collection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Connection<T> {
    #[serde(default = "Vec::new")]
    pub edges: Vec<Edge<T>>,
    #[serde(default)]
    pub page_info: PageInfo,
    #[serde(default)]
    pub total_count: u64,
}

impl<T> Default for Connection<T> {
    fn default() -> Self {
        Self {
            edges: Vec::new(),
            page_info: PageInfo::default(),
            total_count: 0,
        }
    }
}

impl<T> Connection<T> {
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    pub fn nodes(&self) -> impl Iterator<Item = &T> {
        self.edges.iter().map(|edge| &edge.node)
    }

    /// Enforce the page invariants against the requested page size.
    ///
    /// Returns true when the server's envelope had to be corrected.
    pub fn normalize(&mut self, requested_first: Option<u32>) -> bool {
        let mut adjusted = false;
        let len = self.edges.len() as u64;

        if len > self.total_count {
            self.total_count = len;
            adjusted = true;
        }

        if let Some(first) = requested_first.filter(|first| *first > 0) {
            if len < u64::from(first) && self.page_info.has_next_page {
                self.page_info.has_next_page = false;
                adjusted = true;
            }
        }

        adjusted
    }
}

/// Cursor pagination arguments
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageArgs {
    pub first: Option<u32>,
    pub last: Option<u32>,
    pub after: Option<String>,
    pub before: Option<String>,
}

impl PageArgs {
    pub fn first(count: u32) -> Self {
        Self {
            first: Some(count),
            ..Self::default()
        }
    }

    pub fn last(count: u32) -> Self {
        Self {
            last: Some(count),
            ..Self::default()
        }
    }

    pub fn after(mut self, cursor: impl Into<String>) -> Self {
        self.after = Some(cursor.into());
        self
    }

    pub fn before(mut self, cursor: impl Into<String>) -> Self {
        self.before = Some(cursor.into());
        self
    }

    /// Variables for the truthy arguments only. Zero counts and empty cursors
    /// are dropped, so `first: 0` is never sent.
    pub fn to_variables(&self) -> Variables {
        let mut variables = Variables::new();
        if let Some(first) = self.first.filter(|n| *n > 0) {
            variables.insert("first".to_string(), Value::from(first));
        }
        if let Some(last) = self.last.filter(|n| *n > 0) {
            variables.insert("last".to_string(), Value::from(last));
        }
        if let Some(after) = self.after.as_ref().filter(|c| !c.is_empty()) {
            variables.insert("after".to_string(), Value::from(after.clone()));
        }
        if let Some(before) = self.before.as_ref().filter(|c| !c.is_empty()) {
            variables.insert("before".to_string(), Value::from(before.clone()));
        }
        variables
    }
}

/// Filter used by pages that take no filter arguments
pub type NoFilter = serde_json::Map<String, Value>;

/// Page request: pagination arguments travel separately from the filter
#[derive(Debug, Clone, Default)]
pub struct PageQuery<F> {
    pub page: PageArgs,
    pub filter: F,
}

impl<F> PageQuery<F> {
    pub fn new(page: PageArgs, filter: F) -> Self {
        Self { page, filter }
    }
}

impl PageQuery<NoFilter> {
    pub fn unfiltered(page: PageArgs) -> Self {
        Self {
            page,
            filter: NoFilter::new(),
        }
    }
}

/// Common back-office list filter
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vendor_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organization_id: Option<String>,
}

impl ListFilter {
    pub fn status(status: impl Into<String>) -> Self {
        Self {
            status: Some(status.into()),
            ..Self::default()
        }
    }

    pub fn vendor(vendor_id: impl Into<String>) -> Self {
        Self {
            vendor_id: Some(vendor_id.into()),
            ..Self::default()
        }
    }
}
