mod query_error_tests;
mod schema_tests;
pub(crate) mod test_utils;
