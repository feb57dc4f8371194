pub mod document_form;

pub use document_form::{DocumentForm, FILE_FIELD};
