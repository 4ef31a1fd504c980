pub mod customer_form;

pub use customer_form::CustomerSubmission;
