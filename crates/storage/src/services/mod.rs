pub mod assembler;
pub mod conflicts;
pub mod ordering;
pub mod roster;
pub mod scheduling;
pub mod spacing;

#[cfg(test)]
pub(crate) mod test_support;
