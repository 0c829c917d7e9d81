//! Listing data flow: filter snapshots in, fetched pages out.

mod api;
mod coordinator;
mod http;
mod model;
mod transform;

pub use api::{FetchError, ListingApi};
pub use coordinator::ListingCoordinator;
pub use http::HttpListingApi;
pub use model::{
    FilterSet, FilterValue, ListingResponse, ParamValue, RequestParams, PAGE_NUMBER_KEY,
    PAGE_SIZE_KEY,
};
pub use transform::Transforms;
