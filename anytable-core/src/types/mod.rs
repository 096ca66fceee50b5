//! Row and criteria types shared by every backend.

pub mod criteria;
pub mod row;

pub use criteria::Criteria;
pub use row::Row;
