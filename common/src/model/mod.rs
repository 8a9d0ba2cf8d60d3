pub mod order;
pub mod template;
pub mod variable;
