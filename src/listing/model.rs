use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::pagination::PageChanged;

pub const PAGE_NUMBER_KEY: &str = "pageNumber";
pub const PAGE_SIZE_KEY: &str = "pageSize";

/// Scalar value of a single filter field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FilterValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl FilterValue {
    /// Parse user input: booleans and numbers are recognised, anything else is text.
    pub fn parse(raw: &str) -> Self {
        if let Ok(value) = raw.parse::<bool>() {
            return Self::Bool(value);
        }
        if let Ok(value) = raw.parse::<i64>() {
            return Self::Int(value);
        }
        if let Ok(value) = raw.parse::<f64>() {
            if value.is_finite() {
                return Self::Float(value);
            }
        }
        Self::Text(raw.to_string())
    }

    pub fn as_u32(&self) -> Option<u32> {
        match self {
            Self::Int(value) => u32::try_from(*value).ok(),
            Self::Text(value) => value.trim().parse().ok(),
            _ => None,
        }
    }
}

impl fmt::Display for FilterValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(value) => write!(f, "{}", value),
            Self::Int(value) => write!(f, "{}", value),
            Self::Float(value) => write!(f, "{}", value),
            Self::Text(value) => f.write_str(value),
        }
    }
}

impl From<bool> for FilterValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for FilterValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<u32> for FilterValue {
    fn from(value: u32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<f64> for FilterValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<&str> for FilterValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for FilterValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

/// Snapshot of the filter form plus pagination fields driving one fetch.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FilterSet {
    fields: BTreeMap<String, FilterValue>,
}

impl FilterSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<FilterValue>) -> Self {
        self.set(name, value);
        self
    }

    /// Returns `true` if the stored value changed.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<FilterValue>) -> bool {
        let value = value.into();
        match self.fields.insert(name.into(), value.clone()) {
            Some(previous) => previous != value,
            None => true,
        }
    }

    /// Returns `true` if the field was present.
    pub fn remove(&mut self, name: &str) -> bool {
        self.fields.remove(name).is_some()
    }

    pub fn get(&self, name: &str) -> Option<&FilterValue> {
        self.fields.get(name)
    }

    pub fn page_number(&self) -> Option<u32> {
        self.get(PAGE_NUMBER_KEY).and_then(FilterValue::as_u32)
    }

    pub fn page_size(&self) -> Option<u32> {
        self.get(PAGE_SIZE_KEY).and_then(FilterValue::as_u32)
    }

    /// Write a paginator event into the pagination fields.
    pub fn apply_page_change(&mut self, change: PageChanged) -> bool {
        let page = self.set(PAGE_NUMBER_KEY, change.page_number);
        let size = self.set(PAGE_SIZE_KEY, change.page_size);
        page || size
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FilterValue)> {
        self.fields.iter().map(|(name, value)| (name.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<K: Into<String>, V: Into<FilterValue>> FromIterator<(K, V)> for FilterSet {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(name, value)| (name.into(), value.into()))
                .collect(),
        }
    }
}

/// A request parameter: a scalar or a list of scalars.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    Scalar(FilterValue),
    List(Vec<FilterValue>),
}

impl From<FilterValue> for ParamValue {
    fn from(value: FilterValue) -> Self {
        Self::Scalar(value)
    }
}

impl From<Vec<FilterValue>> for ParamValue {
    fn from(values: Vec<FilterValue>) -> Self {
        Self::List(values)
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        Self::Scalar(value.into())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        Self::Scalar(value.into())
    }
}

impl From<i64> for ParamValue {
    fn from(value: i64) -> Self {
        Self::Scalar(value.into())
    }
}

impl From<u32> for ParamValue {
    fn from(value: u32) -> Self {
        Self::Scalar(value.into())
    }
}

impl From<bool> for ParamValue {
    fn from(value: bool) -> Self {
        Self::Scalar(value.into())
    }
}

/// Parameters handed to the fetch capability.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RequestParams {
    params: BTreeMap<String, ParamValue>,
}

impl RequestParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<ParamValue>) {
        self.params.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&ParamValue> {
        self.params.get(name)
    }

    /// Flatten into `(name, value)` pairs; list values repeat their name.
    pub fn to_query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::with_capacity(self.params.len());
        for (name, value) in &self.params {
            match value {
                ParamValue::Scalar(value) => pairs.push((name.clone(), value.to_string())),
                ParamValue::List(values) => {
                    pairs.extend(values.iter().map(|value| (name.clone(), value.to_string())))
                }
            }
        }
        pairs
    }
}

impl From<FilterSet> for RequestParams {
    fn from(filters: FilterSet) -> Self {
        Self {
            params: filters
                .fields
                .into_iter()
                .map(|(name, value)| (name, ParamValue::Scalar(value)))
                .collect(),
        }
    }
}

/// Page of items returned by a listing endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingResponse<I> {
    pub items: Vec<I>,
    #[serde(default, alias = "totalCount", alias = "count", skip_serializing_if = "Option::is_none")]
    pub total_items_count: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_number: Option<u32>,
}

impl<I> Default for ListingResponse<I> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            total_items_count: None,
            page_number: None,
        }
    }
}
