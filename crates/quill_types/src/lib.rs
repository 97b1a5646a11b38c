// quill_types - Frontend type model shared by the quill compiler back ends
mod definition;
mod tmpl;
mod types;

pub use definition::*;
pub use tmpl::*;
pub use types::*;
