pub mod locus;
pub mod visibility;

pub use locus::LocusListing;
