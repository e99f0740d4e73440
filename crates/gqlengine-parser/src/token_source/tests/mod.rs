mod str_to_graphql_token_source_tests;
