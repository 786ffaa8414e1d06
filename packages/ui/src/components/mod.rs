//! Small presentational building blocks shared by the forms and views.

mod drawer;
pub use drawer::Drawer;

mod text_field;
pub use text_field::{visible_error, TextField};

mod submission;
pub use submission::Submission;
