mod test_arithmetic_operators;
mod test_basic_parsing;
mod test_source_reconstruction;
mod test_while_loops;
