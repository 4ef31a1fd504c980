pub mod action_state;
pub mod forms;

pub use action_state::{ActionState, FieldErrors};
pub use forms::{CustomerForm, InvoiceForm, UploadedFile, ValidCustomer};
