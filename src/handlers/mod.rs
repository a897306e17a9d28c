mod url;

pub use self::url::{create_form_handler, create_handler, index_handler, redirect_handler};
