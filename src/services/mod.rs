pub mod antiforgery;
pub mod identity;
