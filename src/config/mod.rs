pub mod documents;
pub mod settings;

pub use documents::*;
pub use settings::*;
