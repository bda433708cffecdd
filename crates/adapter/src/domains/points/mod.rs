mod resolve_point;

pub use resolve_point::*;
