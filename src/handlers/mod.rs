pub mod enumerate;

pub use self::enumerate::{EnumerationRequest, run_enumeration};
