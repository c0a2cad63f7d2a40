pub mod filter;
pub mod identity;
pub mod locus;

pub use filter::{LocusFilter, Sideload, SortBy, SortOrder};
pub use identity::{Identity, Role};
pub use locus::{Locus, LocusMember, LocusWithMembers};
