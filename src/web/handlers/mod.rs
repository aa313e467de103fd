pub mod assignments;
pub mod check;
pub mod compare;
pub mod history;
