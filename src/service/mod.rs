//! Services: document CRUD through the SQL builder, credentials, request validation.

mod auth;
mod documents;
mod validation;
pub use auth::{hash_password, verify_password, AuthService, NewUser, PublicUser, Role};
pub use documents::{
    DocumentListItem, DocumentPatch, DocumentRecord, DocumentService, FileRef, FileUpload, NewDocument,
};
pub use validation::RequestValidator;
