// Text primitives: segmentation and the Document model.

pub mod document;
pub mod segment;
