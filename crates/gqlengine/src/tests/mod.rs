mod concurrency_tests;
mod execution_tests;
