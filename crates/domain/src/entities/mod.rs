//! Domain entities - Objects with identity and lifecycle

mod point_of_interest;

pub use point_of_interest::{
    PointOfInterest, UNKNOWN_ADDRESS, UNKNOWN_DENOMINATION, UNNAMED_PLACE,
};
