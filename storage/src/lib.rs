pub mod db;
pub mod errors;
pub mod util;

#[cfg(any(test, feature = "test_utils"))]
pub mod test_utils;
