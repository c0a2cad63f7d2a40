pub mod auth;
pub mod locus;

pub use auth::login;
pub use locus::list_locus;
