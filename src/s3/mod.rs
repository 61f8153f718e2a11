pub mod client;
pub mod enumerate;
pub mod listing;

pub use client::{AnonymousLister, create_anonymous_client};
pub use enumerate::TreeEnumerator;
pub use listing::{ListingPage, ObjectEntry, ObjectLister};
