// * Pattern library: pure, deterministic normalization primitives for
// * time, day, and price tokens. No I/O, no state. Every function in
// * this module is idempotent over its own output.

pub mod day;
pub mod price;
pub mod time;
