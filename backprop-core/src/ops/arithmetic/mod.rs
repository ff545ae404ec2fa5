pub mod add;
pub mod mul;

pub use add::add_op;
pub use mul::mul_op;
