//! Polygon kernel: rings, polygons with holes, validation and boolean
//! operations.
//!
//! # Example
//!
//! ```
//! use polyedit::polygon::{Polygon, polygon_union};
//! use polyedit::Point2;
//!
//! // Two overlapping squares
//! let square1: Polygon<f64> = Polygon::from_points(vec![
//!     Point2::new(0.0, 0.0),
//!     Point2::new(2.0, 0.0),
//!     Point2::new(2.0, 2.0),
//!     Point2::new(0.0, 2.0),
//! ]).unwrap();
//!
//! let square2 = Polygon::from_points(vec![
//!     Point2::new(1.0, 1.0),
//!     Point2::new(3.0, 1.0),
//!     Point2::new(3.0, 3.0),
//!     Point2::new(1.0, 3.0),
//! ]).unwrap();
//!
//! let union = polygon_union(&square1, &square2);
//! assert_eq!(union.len(), 1);
//! assert!((union[0].area() - 7.0).abs() < 1e-9);
//! ```

mod boolean;
mod core;
mod overlay;
mod ring;
mod validate;

pub use boolean::{
    polygon_difference, polygon_intersection, polygon_union, polygon_xor, BooleanEngine,
};
pub use self::core::Polygon;
pub use overlay::{overlay, BooleanOp};
pub use ring::{polygon_contains, polygon_signed_area, Ring};
pub use validate::{is_simple, is_simple_points, validate_ring, RingDefect};
