//! Expense tracking for the application.
//!
//! This module contains the web side of the expense tracker:
//! - The form for recording expenses and its validation
//! - The rendering of the expense list and running total
//! - Route handlers for the page, the form, deletion and the JSON API

mod api;
mod create_endpoint;
mod delete_endpoint;
mod form;
mod page;
mod view;

pub use api::{create_transaction_endpoint, list_transactions_endpoint};
pub use create_endpoint::create_expense_endpoint;
pub use delete_endpoint::delete_expense_endpoint;
pub use page::get_expenses_page;
