pub mod linked_list;
pub mod vector;

pub use linked_list::LinkedList;
pub use vector::Vector;
