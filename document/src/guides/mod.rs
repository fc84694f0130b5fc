//! Per-transaction-set rule tables and segment schemas.
//!
//! Each module here is a declarative `(schemas, rules)` pair for one
//! implementation guide; the binder is entirely generic over them.
pub mod x222a2;
