/*
 * Responsibility
 * - Public interface of the middleware layer (re-exports)
 * - auth::identity (who is calling), antiforgery (token gate), plus transport concerns
 */
pub mod antiforgery;
pub mod auth;
pub mod cors;
pub mod http;
