pub mod helper;
pub mod testing;
