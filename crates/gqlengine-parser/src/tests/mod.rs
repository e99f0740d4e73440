mod ast_selection_tests;
mod graphql_parser_error_tests;
mod graphql_parser_selection_tests;
mod graphql_token_stream_tests;
mod round_trip_tests;
pub(crate) mod utils;
