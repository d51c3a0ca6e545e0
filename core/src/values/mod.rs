mod number;

pub use number::Number;

#[cfg(test)]
mod number_test;
