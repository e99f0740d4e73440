mod field_binding_tests;
mod field_rule_tests;
mod operation_rule_tests;
