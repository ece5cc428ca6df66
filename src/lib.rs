//! Package implement an Ordered Symbol Table.
//!
//! Following types implement the symbol table for specific use cases:
//!
//! * [OMap] implements an ephemeral ordered-map, using
//!   [left-leaning-red-black][wiki-llrb].
//! * [OSet] implements the companion ordered-set, sharing the same
//!   tree engine.
//!
//! Every tree node carries the count of entries in its subtree, on top
//! of the usual color bit. That augmentation is what makes the
//! order-statistic operations, `rank()` and `select()`, and range
//! counting logarithmic. A presorted sequence of unique entries can be
//! bulk loaded in linear time without a single key comparison.
//!
//! The [bisect] module provides the companion binary searches over
//! presorted slices.
//!
//! Simple ordered-map for single threaded use case
//! -----------------------------------------------
//!
//! - Each entry in OMap instance correspond to a {Key, Value} pair.
//! - Parametrised over `key-type` and `value-type`.
//! - CRUD operations, via set(), get(), remove() api.
//! - Ordered queries, via min(), max(), floor(), ceiling(),
//!   predecessor(), successor() api.
//! - Order statistics, via rank() and select() api.
//! - Full table scan, to iterate over all entries.
//! - Range scan, to iterate between a ``low`` and ``high``.
//! - Reverse iteration.
//! - Uses ownership model and borrow semantics to ensure safety.
//! - No Durability guarantee.
//! - Not thread safe.
//!
//! Constructing a new [OMap] instance and CRUD operations:
//!
//! ```
//! use ostable::OMap;
//!
//! let mut index: OMap<String,String> = OMap::new();
//! assert_eq!(index.len(), 0);
//! assert_eq!(index.is_empty(), true);
//!
//! index.set("key1".to_string(), "value1".to_string());
//! index.set("key2".to_string(), "value2".to_string());
//!
//! let n = index.len();
//! assert_eq!(n, 2);
//!
//! let value = index.get("key1").unwrap();
//! assert_eq!(value, "value1");
//! let value = index.get("key2").unwrap();
//! assert_eq!(value, "value2");
//!
//! let old_value = index.remove("key1").unwrap();
//! assert_eq!(old_value, "value1".to_string());
//! ```
//!
//! Order statistics on an [OSet] instance:
//!
//! ```
//! use ostable::OSet;
//!
//! let index: OSet<u32> = OSet::from_sorted(10..20);
//! assert_eq!(index.rank(&15), 5);
//! assert_eq!(index.select(5), Some(&15));
//! ```
//!
//! [wiki-llrb]: https://en.wikipedia.org/wiki/Left-leaning_red-black_tree

use std::{error, fmt, result};

// Short form to compose Error values.
//
// Here are few possible ways:
//
// ```ignore
// use crate::Error;
// err_at!(Fatal, msg: format!("unbalanced blacks"));
// ```
//
// ```ignore
// use crate::Error;
// err_at!(Fatal, std::io::read(buf));
// ```
//
macro_rules! err_at {
    ($v:ident, msg: $($arg:expr),+) => {{
        let prefix = format!("{}:{}", file!(), line!());
        Err(Error::$v(prefix, format!($($arg),+)))
    }};
    ($v:ident, $e:expr) => {{
        match $e {
            Ok(val) => Ok(val),
            Err(err) => {
                let prefix = format!("{}:{}", file!(), line!());
                Err(Error::$v(prefix, format!("{}", err)))
            }
        }
    }};
}

mod llrb;

pub mod bisect;
pub mod omap;
pub mod oset;

pub use omap::OMap;
pub use oset::OSet;

/// Error variants that are returned by this package's API.
///
/// Each variant carries a prefix, typically identifying the
/// error location.
pub enum Error {
    Fatal(String, String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> result::Result<(), fmt::Error> {
        use Error::*;

        match self {
            Fatal(p, msg) => write!(f, "{} Fatal: {}", p, msg),
        }
    }
}

impl fmt::Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> result::Result<(), fmt::Error> {
        write!(f, "{}", self)
    }
}

impl error::Error for Error {}

/// Type alias for Result return type, used by this package.
pub type Result<T> = result::Result<T, Error>;
