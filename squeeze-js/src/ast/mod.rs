pub mod expr;
pub mod func;
pub mod make;
pub mod node;
pub mod stmt;
pub mod stx;
