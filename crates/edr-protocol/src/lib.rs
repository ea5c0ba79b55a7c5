//! OGC API - Environmental Data Retrieval (EDR) client types
//!
//! The subset of the EDR v1.1 data model needed to request a vertical
//! cross-section: instance metadata, trajectory queries and the
//! CoverageJSON documents they return.
//!
//! # Example
//!
//! ```rust
//! use edr_protocol::TrajectoryQuery;
//!
//! let query = TrajectoryQuery::from_wkt("LINESTRING(7 66.2,8 66.2)")
//!     .unwrap()
//!     .with_parameter("Temperature")
//!     .with_levels(vec![850.0, 500.0]);
//! let pairs = query.to_query_pairs();
//! assert_eq!(pairs[0], ("parameter-name".to_string(), "Temperature".to_string()));
//! ```

pub mod types;
pub mod collections;
pub mod parameters;
pub mod coverage_json;
pub mod queries;
pub mod errors;

// Re-export commonly used types
pub use types::{Extent, Link, NumberOrString, SpatialExtent, TemporalExtent, VerticalExtent};
pub use collections::{Instance, InstanceList};
pub use parameters::{I18nString, ObservedProperty, Parameter, Unit};
pub use coverage_json::{
    Axis, AxisValue, CompositePoint, CovJsonParameter, CoverageCollection, CoverageJson,
    CoverageType, Domain, DomainType, NdArray,
};
pub use queries::{CoordinateParseError, LineStringType, TrajectoryQuery, TrajectoryWaypoint};
pub use errors::{EdrError, ExceptionResponse};

/// Media types used in EDR responses
pub mod media_types {
    /// CoverageJSON media type
    pub const COVERAGE_JSON: &str = "application/vnd.cov+json";
    /// JSON media type
    pub const JSON: &str = "application/json";
}
