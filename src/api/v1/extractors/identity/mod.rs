/*!
 * Request identity extractor
 *
 * Responsibility:
 * - Hand the `RequestIdentity` (set by the identity middleware) to handlers
 * - axum plumbing stays in core; the type itself lives in services::identity
 */

mod core;

pub use core::CurrentIdentity;
