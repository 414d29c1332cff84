mod parse;

pub use parse::{parse_args, USAGE};
